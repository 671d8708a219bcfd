//! MPEG audio specific items
//!
//! ## File notes
//!
//! The tag of an MPEG file is its leading ID3v2 tag, with an ID3v1 tag as a fallback. Only the
//! ID3v2 tag is written.
mod constants;
mod header;
mod properties;
pub(crate) mod read;
