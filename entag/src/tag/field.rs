use super::{CommonField, TagType};
use crate::ape::ApeItem;
use crate::error::{Result, UnsupportedEncodingError};
use crate::id3::v2::Frame;
use crate::ogg::VorbisField;
use crate::util::text::TextEncoding;

/// The capabilities shared by every metadata record
pub trait TagField {
	/// The format-specific identifier of the field
	///
	/// * ID3v2: The frame ID (ex. `TIT2`)
	/// * APE: The item key (ex. `Artist`)
	/// * Vorbis comments: The upper-cased key (ex. `ARTIST`)
	fn id(&self) -> &str;

	/// Whether the field holds binary content rather than text
	fn is_binary(&self) -> bool;

	/// Whether the field has no content
	fn is_empty(&self) -> bool;

	/// Whether the field is one of its format's common fields
	///
	/// See [`CommonField`].
	fn is_common(&self) -> bool;

	/// The fully serialized on-disk representation of this field alone
	///
	/// # Errors
	///
	/// The field contents can't be represented in the field's encoding
	fn raw_content(&self) -> Result<Vec<u8>>;
}

/// A field with text content
pub trait TagTextField: TagField {
	/// The text content
	///
	/// APE binary items have no text content, and return an empty string.
	fn content(&self) -> &str;

	/// The encoding used when the content is serialized
	fn encoding(&self) -> TextEncoding;
}

/// A single field of a [`Tag`](super::Tag), in one of the supported formats
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Field {
	/// An ID3v2 frame, also used to represent ID3v1 fields
	Id3v2(Frame),
	/// An APE item
	Ape(ApeItem),
	/// A Vorbis comment
	Vorbis(VorbisField),
}

impl Field {
	/// The common slot this field fills, if any
	///
	/// # Examples
	///
	/// ```rust
	/// use entag::ogg::VorbisField;
	/// use entag::tag::{CommonField, Field};
	///
	/// let field = Field::Vorbis(VorbisField::new("tracknumber", "4"));
	/// assert_eq!(field.common_field(), Some(CommonField::Track));
	/// ```
	pub fn common_field(&self) -> Option<CommonField> {
		match self {
			Field::Id3v2(frame) => crate::id3::v2::common_field(frame.id()),
			Field::Ape(item) => crate::ape::common_field(item.key()),
			Field::Vorbis(field) => crate::ogg::common_field(field.key()),
		}
	}

	/// Whether this kind of field may be stored in a tag of type `tag_type`
	pub fn is_compatible(&self, tag_type: TagType) -> bool {
		matches!(
			(self, tag_type),
			(Field::Id3v2(_), TagType::Id3v2 | TagType::Id3v1)
				| (Field::Ape(_), TagType::Ape)
				| (Field::Vorbis(_), TagType::VorbisComments)
		)
	}

	/// The field as a text field
	///
	/// This is `None` for binary fields.
	pub fn as_text(&self) -> Option<&dyn TagTextField> {
		match self {
			Field::Id3v2(frame) => frame.as_text(),
			Field::Ape(item) if !item.is_binary() => Some(item),
			Field::Ape(_) => None,
			Field::Vorbis(field) => Some(field),
		}
	}

	/// The text content of the field, if it is a text field
	pub fn text(&self) -> Option<&str> {
		self.as_text().map(TagTextField::content)
	}

	/// Create a copy of this field with new text content
	///
	/// The identifier, flags and encoding are kept. This is `None` for binary fields.
	pub fn with_content(&self, content: &str) -> Option<Field> {
		match self {
			Field::Id3v2(frame) => frame.with_text(content).map(Field::Id3v2),
			Field::Ape(item) => item.with_text(content).map(Field::Ape),
			Field::Vorbis(field) => Some(Field::Vorbis(field.with_value(content))),
		}
	}

	/// Create a copy of this field holding the content of `other`
	///
	/// The content is only taken when both fields are the same kind. Otherwise, an
	/// unchanged copy of `self` is returned.
	pub fn with_content_from(&self, other: &Field) -> Field {
		let same_kind = match (self, other) {
			(Field::Id3v2(a), Field::Id3v2(b)) => a.is_same_kind(b),
			(Field::Ape(a), Field::Ape(b)) => a.is_binary() == b.is_binary(),
			(Field::Vorbis(_), Field::Vorbis(_)) => true,
			_ => false,
		};

		if !same_kind {
			return self.clone();
		}

		match (self, other) {
			(Field::Id3v2(a), Field::Id3v2(b)) => Field::Id3v2(a.with_content_from(b)),
			(Field::Ape(a), Field::Ape(b)) => Field::Ape(a.with_value(b.value().clone())),
			_ => other
				.text()
				.and_then(|text| self.with_content(text))
				.unwrap_or_else(|| self.clone()),
		}
	}

	/// Create a copy of this field using a different text encoding
	///
	/// # Errors
	///
	/// The field's format does not allow `encoding`
	pub fn with_encoding(&self, encoding: TextEncoding) -> Result<Field> {
		match self {
			Field::Id3v2(frame) => Ok(Field::Id3v2(frame.with_encoding(encoding))),
			Field::Ape(_) if encoding != TextEncoding::UTF8 => {
				Err(UnsupportedEncodingError::new(TagType::Ape, encoding).into())
			},
			Field::Vorbis(_) if encoding != TextEncoding::UTF8 => {
				Err(UnsupportedEncodingError::new(TagType::VorbisComments, encoding).into())
			},
			_ => Ok(self.clone()),
		}
	}

	pub(crate) fn encoding(&self) -> Option<TextEncoding> {
		self.as_text().map(TagTextField::encoding)
	}
}

impl TagField for Field {
	fn id(&self) -> &str {
		match self {
			Field::Id3v2(frame) => frame.id(),
			Field::Ape(item) => item.id(),
			Field::Vorbis(field) => field.id(),
		}
	}

	fn is_binary(&self) -> bool {
		match self {
			Field::Id3v2(frame) => frame.is_binary(),
			Field::Ape(item) => item.is_binary(),
			Field::Vorbis(field) => field.is_binary(),
		}
	}

	fn is_empty(&self) -> bool {
		match self {
			Field::Id3v2(frame) => TagField::is_empty(frame),
			Field::Ape(item) => item.is_empty(),
			Field::Vorbis(field) => field.is_empty(),
		}
	}

	fn is_common(&self) -> bool {
		self.common_field().is_some()
	}

	fn raw_content(&self) -> Result<Vec<u8>> {
		match self {
			Field::Id3v2(frame) => frame.raw_content(),
			Field::Ape(item) => item.raw_content(),
			Field::Vorbis(field) => field.raw_content(),
		}
	}
}

impl From<Frame> for Field {
	fn from(input: Frame) -> Self {
		Field::Id3v2(input)
	}
}

impl From<ApeItem> for Field {
	fn from(input: ApeItem) -> Self {
		Field::Ape(input)
	}
}

impl From<VorbisField> for Field {
	fn from(input: VorbisField) -> Self {
		Field::Vorbis(input)
	}
}

#[cfg(test)]
mod tests {
	use crate::ape::{ApeItem, ItemValue};
	use crate::error::ErrorKind;
	use crate::id3::v2::{Frame, FrameId, TextInformationFrame};
	use crate::ogg::VorbisField;
	use crate::tag::{Field, TagField};
	use crate::util::text::TextEncoding;

	#[test_log::test]
	fn with_content_keeps_identity() {
		let field = Field::Vorbis(VorbisField::new("ARTIST", "Foo"));
		let replaced = field.with_content("Bar").unwrap();

		assert_eq!(replaced.id(), "ARTIST");
		assert_eq!(replaced.text(), Some("Bar"));
		// The original is untouched
		assert_eq!(field.text(), Some("Foo"));
	}

	#[test_log::test]
	fn with_content_from_mismatched_kind() {
		let ape = Field::Ape(ApeItem::new("Artist", ItemValue::Text(String::from("Foo"))).unwrap());
		let vorbis = Field::Vorbis(VorbisField::new("ARTIST", "Bar"));

		assert_eq!(ape.with_content_from(&vorbis), ape);
		assert_eq!(
			vorbis
				.with_content_from(&Field::Vorbis(VorbisField::new("TITLE", "Baz")))
				.text(),
			Some("Baz")
		);

		let binary =
			Field::Ape(ApeItem::new("Cover Art", ItemValue::Binary(vec![1, 2, 3])).unwrap());
		assert_eq!(ape.with_content_from(&binary), ape);
	}

	#[test_log::test]
	fn utf8_only_formats_reject_other_encodings() {
		let vorbis = Field::Vorbis(VorbisField::new("ARTIST", "Foo"));
		let err = vorbis.with_encoding(TextEncoding::UTF16).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::UnsupportedEncoding(_)));
		assert!(vorbis.with_encoding(TextEncoding::UTF8).is_ok());

		let ape = Field::Ape(ApeItem::new("Artist", ItemValue::Text(String::from("Foo"))).unwrap());
		assert!(ape.with_encoding(TextEncoding::Latin1).is_err());

		let frame = Field::Id3v2(Frame::Text(TextInformationFrame::new(
			FrameId::new("TPE1").unwrap(),
			TextEncoding::Latin1,
			String::from("Foo"),
		)));
		let utf16 = frame.with_encoding(TextEncoding::UTF16).unwrap();
		assert_eq!(utf16.encoding(), Some(TextEncoding::UTF16));
	}
}
