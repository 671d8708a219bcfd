//! The format-agnostic tag model
//!
//! A [`Tag`] is an ordered list of [`Field`]s in one format. Every format maps the same set of
//! [`CommonField`] slots onto its own keys, which is what the accessors like [`Tag::artist`]
//! are built on.
//!
//! ```rust
//! use entag::tag::{Tag, TagTextField, TagType};
//!
//! let mut tag = Tag::new(TagType::VorbisComments);
//! tag.push_artist(String::from("Foo artist"));
//! tag.push_artist(String::from("Bar artist"));
//!
//! let artists: Vec<&str> = tag.artist().map(|a| a.content()).collect();
//! assert_eq!(artists, ["Foo artist", "Bar artist"]);
//! ```

mod common;
mod field;

pub use common::{CommonField, combine_tags};
pub use field::{Field, TagField, TagTextField};

use crate::error::{Result, UnsupportedEncodingError};
use crate::macros::err;
use crate::util::text::TextEncoding;

/// The tag's format
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TagType {
	/// This covers both APEv1 and APEv2 as it doesn't matter much
	Ape,
	/// Represents an ID3v1 tag
	///
	/// These are read only, and hold ID3v2 frames for their fields.
	Id3v1,
	/// This covers all ID3v2 versions since they all get upgraded to ID3v2.3 on write
	Id3v2,
	/// Represents vorbis comments, shared by OGG Vorbis and FLAC
	VorbisComments,
}

impl TagType {
	/// The key this format uses for `slot`
	///
	/// # Examples
	///
	/// ```rust
	/// use entag::tag::{CommonField, TagType};
	///
	/// assert_eq!(TagType::Ape.field_id(CommonField::Artist), Some("Artist"));
	/// assert_eq!(TagType::VorbisComments.field_id(CommonField::Artist), Some("ARTIST"));
	/// assert_eq!(TagType::Id3v2.field_id(CommonField::Artist), Some("TPE1"));
	/// ```
	pub fn field_id(self, slot: CommonField) -> Option<&'static str> {
		match self {
			TagType::Id3v2 | TagType::Id3v1 => crate::id3::v2::common_key(slot),
			TagType::Ape => crate::ape::common_key(slot),
			TagType::VorbisComments => crate::ogg::common_key(slot),
		}
	}

	/// Create a field of this format for `slot`
	///
	/// This is `None` when the format has no key for `slot`.
	pub fn new_text_field(self, slot: CommonField, text: &str) -> Option<Field> {
		let key = self.field_id(slot)?;

		match self {
			TagType::Id3v2 => Some(Field::Id3v2(crate::id3::v2::new_text_frame(
				key,
				text,
				None,
			)?)),
			TagType::Id3v1 => Some(Field::Id3v2(crate::id3::v2::new_text_frame(
				key,
				text,
				Some(TextEncoding::Latin1),
			)?)),
			TagType::Ape => crate::ape::ApeItem::new_text(key, text).map(Field::Ape),
			TagType::VorbisComments => Some(Field::Vorbis(crate::ogg::VorbisField::new(key, text))),
		}
	}

	/// Whether fields of this format may use `encoding`
	///
	/// APE and Vorbis comments are UTF-8 only, and ID3v1 is Latin-1 only.
	pub fn is_allowed_encoding(self, encoding: TextEncoding) -> bool {
		match self {
			TagType::Id3v2 => true,
			TagType::Id3v1 => encoding == TextEncoding::Latin1,
			TagType::Ape | TagType::VorbisComments => encoding == TextEncoding::UTF8,
		}
	}

	fn id_matches(self, stored: &str, query: &str) -> bool {
		match self {
			TagType::VorbisComments => stored.eq_ignore_ascii_case(query),
			_ => stored == query,
		}
	}
}

macro_rules! common_accessors {
	($($name:ident => $slot:ident),+ $(,)?) => {
		paste::paste! {
			$(
				#[doc = "Every " $name " value, in insertion order"]
				pub fn $name(&self) -> impl Iterator<Item = &dyn TagTextField> {
					self.common(CommonField::$slot)
				}

				#[doc = "Replace every " $name " value with `value`"]
				///
				/// Returns `false` if the format can't represent this field.
				pub fn [<set_ $name>](&mut self, value: String) -> bool {
					self.insert_text(CommonField::$slot, value)
				}

				#[doc = "Append a " $name " value"]
				///
				/// Returns `false` if the format can't represent this field.
				pub fn [<push_ $name>](&mut self, value: String) -> bool {
					self.push_text(CommonField::$slot, value)
				}

				#[doc = "Remove every " $name " value"]
				pub fn [<remove_ $name>](&mut self) {
					self.remove_common(CommonField::$slot)
				}
			)+
		}
	};
}

/// An ordered collection of fields in a single format
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
	tag_type: TagType,
	pub(crate) fields: Vec<Field>,
	pub(crate) vendor: Option<String>,
}

impl Tag {
	/// Create an empty `Tag`
	pub fn new(tag_type: TagType) -> Self {
		Self {
			tag_type,
			fields: Vec::new(),
			vendor: None,
		}
	}

	/// The tag's format
	pub fn tag_type(&self) -> TagType {
		self.tag_type
	}

	/// The vendor string, only used by Vorbis comments
	pub fn vendor(&self) -> Option<&str> {
		self.vendor.as_deref()
	}

	/// Set the vendor string
	///
	/// This is ignored when writing formats other than Vorbis comments.
	pub fn set_vendor(&mut self, vendor: Option<String>) {
		self.vendor = vendor;
	}

	/// Iterate over every field, in order
	pub fn iter(&self) -> impl Iterator<Item = &Field> {
		self.fields.iter()
	}

	/// The number of fields
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Whether the tag has no fields
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Every field with the identifier `id`, in order
	///
	/// Vorbis comment keys are compared case-insensitively, all others are compared exactly.
	pub fn fields<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Field> {
		let tag_type = self.tag_type;
		self.fields
			.iter()
			.filter(move |field| tag_type.id_matches(field.id(), id))
	}

	/// Append a field
	///
	/// # Errors
	///
	/// * The field belongs to another format ([`ErrorKind::UnsupportedTag`](crate::error::ErrorKind::UnsupportedTag))
	/// * The field's encoding is not allowed ([`ErrorKind::UnsupportedEncoding`](crate::error::ErrorKind::UnsupportedEncoding))
	pub fn add(&mut self, field: Field) -> Result<()> {
		self.verify(&field)?;
		self.fields.push(field);
		Ok(())
	}

	/// Replace every field with the same identifier as `field`
	///
	/// # Errors
	///
	/// See [`Tag::add`]
	pub fn set(&mut self, field: Field) -> Result<()> {
		self.verify(&field)?;

		let tag_type = self.tag_type;
		self.fields
			.retain(|existing| !tag_type.id_matches(existing.id(), field.id()));
		self.fields.push(field);
		Ok(())
	}

	/// Remove every field with the identifier `id`
	pub fn clear(&mut self, id: &str) {
		let tag_type = self.tag_type;
		self.fields
			.retain(|existing| !tag_type.id_matches(existing.id(), id));
	}

	/// Remove every field that does not satisfy `f`
	pub fn retain<F>(&mut self, f: F)
	where
		F: FnMut(&Field) -> bool,
	{
		self.fields.retain(f)
	}

	/// Whether fields in this tag may use `encoding`
	///
	/// See [`TagType::is_allowed_encoding`]
	pub fn is_allowed_encoding(&self, encoding: TextEncoding) -> bool {
		self.tag_type.is_allowed_encoding(encoding)
	}

	/// Every text field filling `slot`, in order
	pub fn common(&self, slot: CommonField) -> impl Iterator<Item = &dyn TagTextField> {
		self.fields
			.iter()
			.filter(move |field| field.common_field() == Some(slot))
			.filter_map(Field::as_text)
	}

	/// The first value of `slot`
	pub fn get_string(&self, slot: CommonField) -> Option<&str> {
		self.common(slot).next().map(TagTextField::content)
	}

	/// Replace every value of `slot` with `text`
	///
	/// Returns `false` if the format can't represent `slot`.
	pub fn insert_text(&mut self, slot: CommonField, text: String) -> bool {
		let Some(field) = self.tag_type.new_text_field(slot, &text) else {
			return false;
		};

		self.remove_common(slot);
		self.fields.push(field);
		true
	}

	/// Append a value to `slot`
	///
	/// Returns `false` if the format can't represent `slot`.
	pub fn push_text(&mut self, slot: CommonField, text: String) -> bool {
		let Some(field) = self.tag_type.new_text_field(slot, &text) else {
			return false;
		};

		self.fields.push(field);
		true
	}

	/// Remove every field filling `slot`
	pub fn remove_common(&mut self, slot: CommonField) {
		self.fields
			.retain(|field| field.common_field() != Some(slot));
	}

	common_accessors! {
		artist => Artist,
		album => Album,
		title => Title,
		track => Track,
		track_count => TrackCount,
		year => Year,
		comment => Comment,
		genre => Genre,
	}

	fn verify(&self, field: &Field) -> Result<()> {
		if !field.is_compatible(self.tag_type) {
			err!(UnsupportedTag);
		}

		if let Some(encoding) = field.encoding() {
			if !self.is_allowed_encoding(encoding) {
				return Err(UnsupportedEncodingError::new(self.tag_type, encoding).into());
			}
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use crate::ape::{ApeItem, ItemValue};
	use crate::error::ErrorKind;
	use crate::id3::v2::{CommentFrame, Frame};
	use crate::ogg::VorbisField;
	use crate::tag::{CommonField, Field, Tag, TagField, TagTextField, TagType};
	use crate::util::text::TextEncoding;

	#[test_log::test]
	fn multi_valued_artist() {
		let mut tag = Tag::new(TagType::Ape);
		tag.add(Field::Ape(
			ApeItem::new("Artist", ItemValue::Text(String::from("Foo"))).unwrap(),
		))
		.unwrap();
		tag.add(Field::Ape(
			ApeItem::new("Title", ItemValue::Text(String::from("Song"))).unwrap(),
		))
		.unwrap();
		tag.add(Field::Ape(
			ApeItem::new("Artist", ItemValue::Text(String::from("Bar"))).unwrap(),
		))
		.unwrap();

		let artists: Vec<&str> = tag.artist().map(|a| a.content()).collect();
		assert_eq!(artists, ["Foo", "Bar"]);
		assert_eq!(tag.fields("Artist").count(), 2);
		// APE keys are case-sensitive
		assert_eq!(tag.fields("ARTIST").count(), 0);
	}

	#[test_log::test]
	fn set_replaces_all_of_id() {
		let mut tag = Tag::new(TagType::VorbisComments);
		tag.push_year(String::from("1999"));
		tag.push_year(String::from("2000"));
		tag.set(Field::Vorbis(VorbisField::new("date", "2024")))
			.unwrap();

		assert_eq!(tag.len(), 1);
		assert_eq!(tag.get_string(CommonField::Year), Some("2024"));
		// Vorbis keys are case-insensitive
		assert_eq!(tag.fields("Date").count(), 1);

		tag.clear("DATE");
		assert!(tag.is_empty());
	}

	#[test_log::test]
	fn set_accessor_overwrites_aliases() {
		let mut tag = Tag::new(TagType::VorbisComments);
		tag.add(Field::Vorbis(VorbisField::new("COMMENT", "old")))
			.unwrap();
		tag.add(Field::Vorbis(VorbisField::new("DESCRIPTION", "older")))
			.unwrap();
		assert_eq!(tag.comment().count(), 2);

		assert!(tag.set_comment(String::from("new")));
		let comments: Vec<&str> = tag.comment().map(|c| c.content()).collect();
		assert_eq!(comments, ["new"]);
		assert_eq!(tag.iter().next().map(TagField::id), Some("DESCRIPTION"));
	}

	#[test_log::test]
	fn add_rejects_foreign_fields() {
		let mut tag = Tag::new(TagType::Ape);
		let err = tag
			.add(Field::Vorbis(VorbisField::new("ARTIST", "Foo")))
			.unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::UnsupportedTag));
	}

	#[test_log::test]
	fn id3v1_is_latin1_only() {
		let mut tag = Tag::new(TagType::Id3v1);
		let frame = Frame::Comment(CommentFrame::new(
			TextEncoding::UTF16,
			*b"eng",
			String::new(),
			String::from("Hello"),
		));

		let err = tag.add(Field::Id3v2(frame)).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::UnsupportedEncoding(_)));
		assert!(!tag.is_allowed_encoding(TextEncoding::UTF8));
		assert!(tag.is_allowed_encoding(TextEncoding::Latin1));
	}

	#[test_log::test]
	fn track_count_support() {
		let mut vorbis = Tag::new(TagType::VorbisComments);
		assert!(vorbis.set_track_count(String::from("10")));
		assert_eq!(vorbis.fields("TRACKTOTAL").count(), 1);

		let mut id3v2 = Tag::new(TagType::Id3v2);
		assert!(!id3v2.set_track_count(String::from("10")));
		assert!(id3v2.is_empty());
	}

	#[test_log::test]
	fn common_fields_per_format() {
		for tag_type in [TagType::Id3v2, TagType::Ape, TagType::VorbisComments] {
			let mut tag = Tag::new(tag_type);
			for slot in [
				CommonField::Artist,
				CommonField::Album,
				CommonField::Title,
				CommonField::Track,
				CommonField::Year,
				CommonField::Comment,
				CommonField::Genre,
			] {
				assert!(tag.insert_text(slot, String::from("1")), "{tag_type:?} {slot:?}");
			}

			assert_eq!(tag.len(), 7);
			assert!(tag.iter().all(TagField::is_common), "{tag_type:?}");
			assert_eq!(tag.get_string(CommonField::Genre), Some("1"));
		}
	}
}
