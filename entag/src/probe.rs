//! Format-agnostic file reading
//!
//! The format is never sniffed from the content. It is chosen by a mimetype, looked up in the
//! [`registry`](crate::registry), or by the extension of a path.
//!
//! ```rust
//! # fn main() -> entag::error::Result<()> {
//! # let flac = {
//! #   let mut b = b"fLaC\x80\x00\x00\x22".to_vec();
//! #   b.extend([0x10, 0, 0x10, 0, 0, 0, 0, 0, 0, 0, 0x0A, 0xC4, 0x42, 0xF0, 0, 0, 0, 0]);
//! #   b.extend([0; 16]);
//! #   b
//! # };
//! use entag::file::FileType;
//! use std::io::Cursor;
//!
//! let file = entag::probe::read(&mut Cursor::new(flac), "audio/flac")?;
//! assert_eq!(file.file_type(), FileType::Flac);
//! assert_eq!(file.encoding_info().sampling_rate(), 44_100);
//! # Ok(()) }
//! ```

use crate::config::ParseOptions;
use crate::error::Result;
use crate::file::{AudioFile, FileType};
use crate::macros::decode_err;
use crate::registry;

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// Read an [`AudioFile`] from a reader, with the default [`ParseOptions`]
///
/// # Errors
///
/// See [`read_with_options`]
pub fn read<R>(reader: &mut R, mimetype: &str) -> Result<AudioFile>
where
	R: Read + Seek,
{
	read_with_options(reader, mimetype, ParseOptions::new())
}

/// Read an [`AudioFile`] from a reader
///
/// `mimetype` is looked up with [`registry::lookup`].
///
/// # Errors
///
/// * No reader is registered for `mimetype`
/// * The reader for the format fails
///
/// # Examples
///
/// ```rust
/// use entag::config::ParseOptions;
/// use entag::error::ErrorKind;
/// use std::io::Cursor;
///
/// let err = entag::probe::read_with_options(
/// 	&mut Cursor::new(Vec::new()),
/// 	"audio/unknown-format",
/// 	ParseOptions::new(),
/// )
/// .unwrap_err();
///
/// let ErrorKind::CannotRead(decoding_error) = err.kind() else {
/// 	unreachable!()
/// };
/// assert_eq!(
/// 	decoding_error.description(),
/// 	"No Reader associated to this MimeType"
/// );
/// ```
pub fn read_with_options<R>(
	reader: &mut R,
	mimetype: &str,
	parse_options: ParseOptions,
) -> Result<AudioFile>
where
	R: Read + Seek,
{
	let Some(file_type) = registry::lookup(mimetype) else {
		log::debug!("Probe: No reader registered for {mimetype:?}");
		decode_err!(@BAIL "No Reader associated to this MimeType");
	};

	if !parse_options.read_tags && !parse_options.read_properties {
		log::warn!("Skipping both tag and property reading, file will be empty");
	}

	log::debug!("Probe: Reading {mimetype:?} as {file_type:?}");

	match file_type {
		FileType::Ape => crate::ape::read::read_from(reader, parse_options),
		FileType::Flac => crate::flac::read::read_from(reader, parse_options),
		FileType::Mpc => crate::musepack::read::read_from(reader, parse_options),
		FileType::Mpeg => crate::mpeg::read::read_from(reader, parse_options),
		FileType::Vorbis => crate::ogg::read::read_from(reader, parse_options),
	}
}

/// Read an [`AudioFile`] from a path, with the default [`ParseOptions`]
///
/// # Errors
///
/// See [`read_from_path_with_options`]
pub fn read_from_path<P>(path: P) -> Result<AudioFile>
where
	P: AsRef<Path>,
{
	read_from_path_with_options(path, ParseOptions::new())
}

/// Read an [`AudioFile`] from a path
///
/// The lookup key is the extension of the file name, lower-cased. A file without an extension
/// is never associated with a reader.
///
/// # Errors
///
/// * `path` does not exist or cannot be opened
/// * See [`read_with_options`]
///
/// # Examples
///
/// ```rust,no_run
/// # fn main() -> entag::error::Result<()> {
/// use entag::config::ParseOptions;
///
/// let file = entag::probe::read_from_path_with_options(
/// 	"path/to/my.ogg",
/// 	ParseOptions::new().read_cover_art(false),
/// )?;
/// # Ok(()) }
/// ```
pub fn read_from_path_with_options<P>(path: P, parse_options: ParseOptions) -> Result<AudioFile>
where
	P: AsRef<Path>,
{
	let path = path.as_ref();
	let key = path_key(path);

	log::debug!("Probe: Opening {} (key: {key:?})", path.display());

	let mut reader = BufReader::new(File::open(path)?);
	read_with_options(&mut reader, &key, parse_options)
}

fn path_key(path: &Path) -> String {
	let Some(file_name) = path.file_name() else {
		return String::new();
	};

	let file_name = file_name.to_string_lossy();
	match file_name.rsplit_once('.') {
		Some((_, extension)) => extension.to_ascii_lowercase(),
		None => String::new(),
	}
}
