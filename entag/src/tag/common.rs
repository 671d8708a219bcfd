use super::Tag;

/// A semantic metadata slot that every format can represent
///
/// See [`TagType::field_id`](super::TagType::field_id) for the key each format uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommonField {
	/// The track artist
	Artist,
	/// The album title
	Album,
	/// The track title
	Title,
	/// The track number
	Track,
	/// The total number of tracks
	TrackCount,
	/// The recording year
	Year,
	/// A free-form comment
	Comment,
	/// The genre
	Genre,
}

impl CommonField {
	/// Every slot, in declaration order
	pub const ALL: [CommonField; 8] = [
		CommonField::Artist,
		CommonField::Album,
		CommonField::Title,
		CommonField::Track,
		CommonField::TrackCount,
		CommonField::Year,
		CommonField::Comment,
		CommonField::Genre,
	];
}

/// Merge the common fields of several tags into one
///
/// The result uses the format of the first tag. For each [`CommonField`], the values of every
/// tag are appended in order, so the artists of `combine_tags(&[&a, &b])` are the artists of `a`
/// followed by those of `b`. Duplicates are kept.
///
/// Slots the target format has no field for are dropped. Returns `None` if `tags` is empty.
///
/// # Examples
///
/// ```rust
/// use entag::tag::{Tag, TagTextField, TagType, combine_tags};
///
/// let mut first = Tag::new(TagType::Ape);
/// first.push_artist(String::from("Foo"));
///
/// let mut second = Tag::new(TagType::VorbisComments);
/// second.push_artist(String::from("Bar"));
///
/// let combined = combine_tags(&[&first, &second]).unwrap();
/// let artists: Vec<&str> = combined.artist().map(|a| a.content()).collect();
/// assert_eq!(artists, ["Foo", "Bar"]);
/// ```
pub fn combine_tags(tags: &[&Tag]) -> Option<Tag> {
	let (first, _) = tags.split_first()?;

	let tag_type = first.tag_type();
	let mut combined = Tag::new(tag_type);
	combined.vendor = first.vendor.clone();

	for slot in CommonField::ALL {
		for tag in tags {
			for field in tag.common(slot) {
				match tag_type.new_text_field(slot, field.content()) {
					Some(new_field) => combined.fields.push(new_field),
					None => {
						log::debug!("{tag_type:?} has no field for {slot:?}, dropping value");
					},
				}
			}
		}
	}

	Some(combined)
}
