//! Musepack specific items
//!
//! ## File notes
//!
//! Only stream version 7 headers are decoded. The tag of an MPC file is the APE tag at the end
//! of the stream, with an ID3v1 tag as a fallback. A leading ID3v2 tag is skipped.
mod constants;
mod properties;
pub(crate) mod read;
