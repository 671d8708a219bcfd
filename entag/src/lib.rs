//! Read and write audio metadata in ID3v2, APE, Vorbis comments, FLAC and Musepack files.
//!
//! # Supported formats
//!
//! | Format        | Mimetype       | Tag written       | Tags read                    |
//! |---------------|----------------|-------------------|------------------------------|
//! | MPEG          | `audio/mpeg`   | `ID3v2`           | `ID3v2`, `ID3v1`             |
//! | Monkey's Audio| `audio/ape`    | `APE`             | `APE`, `ID3v1`               |
//! | Musepack SV7  | `audio/mpc`    | `APE`             | `APE`, `ID3v1`               |
//! | OGG Vorbis    | `audio/ogg`    | `Vorbis Comments` | `Vorbis Comments`            |
//! | FLAC          | `audio/flac`   | `Vorbis Comments` | `Vorbis Comments`            |
//!
//! See [`registry`] for every accepted key.
//!
//! # Examples
//!
//! ## Reading a file
//!
//! ```rust,no_run
//! # fn main() -> entag::error::Result<()> {
//! use entag::probe;
//! use entag::tag::TagTextField;
//!
//! // The format comes from the extension
//! let audio_file = probe::read_from_path("test.flac")?;
//!
//! let properties = audio_file.encoding_info();
//! println!("{} ({} kbps)", properties.encoding_type(), properties.bitrate());
//!
//! if let Some(title) = audio_file.tag().title().next() {
//! 	println!("Title: {}", title.content());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Using an existing reader
//!
//! ```rust,no_run
//! # fn main() -> entag::error::Result<()> {
//! use entag::config::ParseOptions;
//! use entag::probe;
//! use std::fs::File;
//!
//! let mut file = File::open("test.ogg")?;
//!
//! // Without a path, the mimetype has to be provided
//! let audio_file = probe::read_with_options(
//! 	&mut file,
//! 	"audio/ogg",
//! 	ParseOptions::new().read_properties(false),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Writing a tag
//!
//! ```rust,no_run
//! # fn main() -> entag::error::Result<()> {
//! use entag::config::WriteOptions;
//! use entag::probe;
//! use std::fs::OpenOptions;
//!
//! let audio_file = probe::read_from_path("test.mp3")?;
//!
//! let mut tag = audio_file.tag().clone();
//! tag.set_artist(String::from("Foo artist"));
//!
//! let mut file = OpenOptions::new().read(true).write(true).open("test.mp3")?;
//! audio_file
//! 	.with_tag(tag)
//! 	.save_to(&mut file, WriteOptions::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! # Important format-specific notes
//!
//! All formats have their own quirks that may produce unexpected results between conversions.
//! Be sure to read the module documentation of each format to see important notes and warnings.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod config;
pub mod error;
pub mod file;
pub(crate) mod macros;
pub mod picture;
pub mod probe;
pub mod properties;
pub mod registry;
pub mod tag;
mod util;

pub mod ape;
pub mod flac;
pub mod id3;
pub(crate) mod mpeg;
pub(crate) mod musepack;
pub mod ogg;

pub use crate::probe::{read_from_path, read_from_path_with_options};

pub use util::text::TextEncoding;

pub use util::io;
