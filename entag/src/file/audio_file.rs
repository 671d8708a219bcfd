use super::FileType;
use crate::config::WriteOptions;
use crate::error::{EntagError, Result};
use crate::macros::err;
use crate::properties::EncodingInfo;
use crate::tag::Tag;
use crate::util::io::{FileLike, Length, Truncate};

use std::fs::OpenOptions;
use std::path::Path;

/// The result of reading a file: its format, stream properties and tag
///
/// An `AudioFile` is never modified in place. [`AudioFile::with_tag`] creates a new value,
/// which can then be written back with [`AudioFile::save_to`].
///
/// When a file has no tag, [`AudioFile::tag`] is an empty tag of the format's
/// [primary tag type](FileType::primary_tag_type).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioFile {
	pub(crate) file_type: FileType,
	pub(crate) encoding_info: EncodingInfo,
	pub(crate) tag: Tag,
}

impl AudioFile {
	pub(crate) fn new(file_type: FileType, encoding_info: EncodingInfo, tag: Tag) -> Self {
		Self {
			file_type,
			encoding_info,
			tag,
		}
	}

	/// The format of the file
	pub fn file_type(&self) -> FileType {
		self.file_type
	}

	/// The stream properties
	///
	/// This is [`EncodingInfo::default`] when [`ParseOptions::read_properties`] is disabled.
	///
	/// [`ParseOptions::read_properties`]: crate::config::ParseOptions::read_properties
	pub fn encoding_info(&self) -> &EncodingInfo {
		&self.encoding_info
	}

	/// The tag of the file
	///
	/// If multiple tags were present, this is the preferred one. For example, an MPEG file with
	/// both an ID3v2 and an ID3v1 tag reports the ID3v2 tag.
	pub fn tag(&self) -> &Tag {
		&self.tag
	}

	/// Consume the file, returning its tag
	pub fn into_tag(self) -> Tag {
		self.tag
	}

	/// Create a copy of the file with a different tag
	///
	/// # Examples
	///
	/// ```rust
	/// # fn main() -> entag::error::Result<()> {
	/// # let flac = {
	/// #   let mut b = b"fLaC\x80\x00\x00\x22".to_vec();
	/// #   b.extend([0x10, 0, 0x10, 0, 0, 0, 0, 0, 0, 0, 0x0A, 0xC4, 0x42, 0xF0, 0, 0, 0, 0]);
	/// #   b.extend([0; 16]);
	/// #   b
	/// # };
	/// use entag::tag::Tag;
	/// use std::io::Cursor;
	///
	/// let file = entag::probe::read(&mut Cursor::new(&flac), "audio/flac")?;
	///
	/// let mut tag = file.tag().clone();
	/// tag.set_title(String::from("New title"));
	///
	/// let updated = file.with_tag(tag);
	/// assert_eq!(updated.tag().title().count(), 1);
	/// assert_eq!(file.tag().title().count(), 0);
	/// # Ok(()) }
	/// ```
	pub fn with_tag(&self, tag: Tag) -> Self {
		Self {
			file_type: self.file_type,
			encoding_info: self.encoding_info.clone(),
			tag,
		}
	}

	/// Write the tag to a file of the same format
	///
	/// # Errors
	///
	/// * The tag is not the primary tag type of the format, see [`FileType::primary_tag_type`]
	/// * `file` is not a valid file of the format
	/// * The tag can't be serialized, for example due to an invalid APE key
	pub fn save_to<F>(&self, file: &mut F, write_options: WriteOptions) -> Result<()>
	where
		F: FileLike,
		EntagError: From<<F as Truncate>::Error>,
		EntagError: From<<F as Length>::Error>,
	{
		if self.tag.tag_type() != self.file_type.primary_tag_type() {
			err!(UnsupportedTag);
		}

		file.rewind()?;

		match self.file_type {
			FileType::Mpeg => crate::id3::v2::write::write_id3v2(file, &self.tag, write_options),
			FileType::Ape | FileType::Mpc => {
				crate::ape::tag::write::write_to(file, &self.tag, write_options)
			},
			FileType::Flac => crate::flac::write::write_to(file, &self.tag, write_options),
			FileType::Vorbis => crate::ogg::write::write_to(file, &self.tag, write_options),
		}
	}

	/// Write the tag to the file at `path`
	///
	/// # Errors
	///
	/// * `path` can't be opened for reading and writing
	/// * See [`AudioFile::save_to`]
	pub fn save_to_path(&self, path: impl AsRef<Path>, write_options: WriteOptions) -> Result<()> {
		let mut file = OpenOptions::new().read(true).write(true).open(path)?;
		self.save_to(&mut file, write_options)
	}
}
