//! Items for FLAC
//!
//! ## File notes
//!
//! * The only supported tag format is [`VorbisComments`](crate::tag::TagType::VorbisComments)
//! * An ID3v2 tag before the stream marker is skipped, and kept untouched when writing
//! * `PICTURE` blocks are preserved as-is
mod block;
mod properties;
pub(crate) mod read;
pub(crate) mod write;

// Exports

pub use block::{BlockHeader, BlockType};
