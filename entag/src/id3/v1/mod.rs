//! ID3v1 items
//!
//! ID3v1 is a fixed 128 byte structure at the end of the stream. It is only read, as a fallback
//! for files without an ID3v2 or APE tag. Its fields are represented as Latin-1 ID3v2 frames
//! in a [`Tag`](crate::tag::Tag) of type [`TagType::Id3v1`](crate::tag::TagType::Id3v1).

pub(crate) mod constants;
pub(crate) mod read;

pub use constants::GENRES;
