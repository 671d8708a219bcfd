use super::constants::{ERRONEOUS_KEY, PICTURE_KEY};
use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::err;
use crate::picture::{Picture, PictureInformation};
use crate::tag::{TagField, TagTextField};
use crate::util::text::TextEncoding;

/// A single `KEY=value` Vorbis comment
///
/// Keys are stored upper-cased. A comment read without a `=` separator is kept with the key
/// `ERRONEOUS`, and the whole comment as its value. Only such a comment is written back without a
/// key, a regular `ERRONEOUS=...` comment keeps its key.
///
/// # Examples
///
/// ```rust
/// use entag::ogg::VorbisField;
/// use entag::tag::{TagField, TagTextField};
///
/// let field = VorbisField::new("artist", "Foo");
/// assert_eq!(field.id(), "ARTIST");
/// assert_eq!(field.content(), "Foo");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VorbisField {
	pub(crate) key: String,
	pub(crate) value: String,
	erroneous: bool,
}

impl VorbisField {
	/// Create a new `VorbisField`
	///
	/// The key is upper-cased.
	pub fn new(key: &str, value: &str) -> Self {
		Self {
			key: key.to_ascii_uppercase(),
			value: value.to_owned(),
			erroneous: false,
		}
	}

	/// Split a raw `KEY=value` comment on its first `=`
	///
	/// Returns `None` if there is no separator.
	pub(crate) fn parse(comment: &str) -> Option<Self> {
		let (key, value) = comment.split_once('=')?;
		Some(Self::new(key, value))
	}

	/// A field holding a comment that had no separator
	pub(crate) fn erroneous(comment: &str) -> Self {
		Self {
			key: String::from(ERRONEOUS_KEY),
			value: comment.to_owned(),
			erroneous: true,
		}
	}

	/// The upper-cased key
	pub fn key(&self) -> &str {
		&self.key
	}

	/// The value
	pub fn value(&self) -> &str {
		&self.value
	}

	/// Whether this field was read without a `=` separator
	pub fn is_erroneous(&self) -> bool {
		self.erroneous
	}

	/// Create a copy of this field with a new value
	pub fn with_value(&self, value: &str) -> Self {
		Self {
			key: self.key.clone(),
			value: value.to_owned(),
			erroneous: self.erroneous,
		}
	}

	/// Decode the picture stored in a `METADATA_BLOCK_PICTURE` field
	///
	/// Returns `None` for any other key.
	///
	/// # Errors
	///
	/// The value is not a base64 encoded FLAC picture block
	pub fn picture(
		&self,
		parse_mode: ParsingMode,
	) -> Option<Result<(Picture, PictureInformation)>> {
		if self.key != PICTURE_KEY {
			return None;
		}

		Some(Picture::from_flac_bytes(
			self.value.as_bytes(),
			true,
			parse_mode,
		))
	}

	/// Store a picture as a `METADATA_BLOCK_PICTURE` field
	pub fn from_picture(picture: &Picture, information: PictureInformation) -> Self {
		let encoded = picture.as_flac_bytes(information, true);

		Self {
			key: String::from(PICTURE_KEY),
			// Base64 output is always ASCII
			value: String::from_utf8_lossy(&encoded).into_owned(),
			erroneous: false,
		}
	}
}

impl TagField for VorbisField {
	fn id(&self) -> &str {
		&self.key
	}

	fn is_binary(&self) -> bool {
		false
	}

	fn is_empty(&self) -> bool {
		self.value.is_empty()
	}

	fn is_common(&self) -> bool {
		super::common_field(&self.key).is_some()
	}

	fn raw_content(&self) -> Result<Vec<u8>> {
		let mut comment = Vec::new();

		if !self.is_erroneous() {
			comment.extend_from_slice(self.key.as_bytes());
			comment.push(b'=');
		}
		comment.extend_from_slice(self.value.as_bytes());

		let Ok(len) = u32::try_from(comment.len()) else {
			err!(TooMuchData);
		};

		let mut raw = Vec::with_capacity(comment.len() + 4);
		raw.extend(len.to_le_bytes());
		raw.append(&mut comment);

		Ok(raw)
	}
}

impl TagTextField for VorbisField {
	fn content(&self) -> &str {
		&self.value
	}

	fn encoding(&self) -> TextEncoding {
		TextEncoding::UTF8
	}
}
