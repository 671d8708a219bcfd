//! APE specific items
//!
//! ## File notes
//!
//! It is possible for an `APE` file to contain an `ID3v2` tag. It is skipped when reading,
//! and kept untouched when writing. An `ID3v1` tag is read as a fallback when there is no
//! `APE` tag.
pub(crate) mod constants;
pub(crate) mod header;
mod item;
mod properties;
pub(crate) mod read;
pub(crate) mod tag;

// Exports

pub use item::{ApeItem, ItemValue};

use crate::tag::CommonField;

/// The common slot an APE item key maps to
///
/// Keys are matched exactly, `title` is not a common key.
pub(crate) fn common_field(key: &str) -> Option<CommonField> {
	let slot = match key {
		"Title" => CommonField::Title,
		"Album" => CommonField::Album,
		"Artist" => CommonField::Artist,
		"Track" => CommonField::Track,
		"Year" => CommonField::Year,
		"Comment" => CommonField::Comment,
		"Genre" => CommonField::Genre,
		_ => return None,
	};

	Some(slot)
}

/// The item key written for a common slot
pub(crate) fn common_key(slot: CommonField) -> Option<&'static str> {
	match slot {
		CommonField::Title => Some("Title"),
		CommonField::Album => Some("Album"),
		CommonField::Artist => Some("Artist"),
		CommonField::Track => Some("Track"),
		CommonField::Year => Some("Year"),
		CommonField::Comment => Some("Comment"),
		CommonField::Genre => Some("Genre"),
		CommonField::TrackCount => None,
	}
}
