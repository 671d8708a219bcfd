//! The mimetype registry
//!
//! Every reader is registered under its mimetypes and the extensions it is commonly found with.
//! Lookups are exact, so keys must already be lower-cased.
//!
//! ```rust
//! use entag::file::FileType;
//! use entag::registry;
//!
//! assert_eq!(registry::lookup("audio/x-flac"), Some(FileType::Flac));
//! assert_eq!(registry::lookup("mp+"), Some(FileType::Mpc));
//! assert_eq!(registry::lookup("audio/wav"), None);
//! ```

use crate::file::FileType;

const REGISTRY: &[(&str, FileType)] = &[
	// MPEG
	("audio/mpeg", FileType::Mpeg),
	("audio/mp3", FileType::Mpeg),
	("audio/x-mp3", FileType::Mpeg),
	("audio/x-mpeg", FileType::Mpeg),
	("mp3", FileType::Mpeg),
	// Monkey's Audio
	("audio/ape", FileType::Ape),
	("audio/x-ape", FileType::Ape),
	("audio/x-monkeys-audio", FileType::Ape),
	("entagged/ape", FileType::Ape),
	("ape", FileType::Ape),
	// Musepack
	("audio/mpc", FileType::Mpc),
	("audio/x-mpc", FileType::Mpc),
	("entagged/mpc", FileType::Mpc),
	("mpc", FileType::Mpc),
	("mp+", FileType::Mpc),
	("mpp", FileType::Mpc),
	// OGG Vorbis
	("audio/ogg", FileType::Vorbis),
	("audio/x-ogg", FileType::Vorbis),
	("audio/vorbis", FileType::Vorbis),
	("application/ogg", FileType::Vorbis),
	("ogg", FileType::Vorbis),
	("oga", FileType::Vorbis),
	// FLAC
	("audio/flac", FileType::Flac),
	("audio/x-flac", FileType::Flac),
	("flac", FileType::Flac),
];

/// Find the [`FileType`] registered under `mimetype`
///
/// `mimetype` may also be a bare extension, such as `"ogg"`.
pub fn lookup(mimetype: &str) -> Option<FileType> {
	REGISTRY
		.iter()
		.find(|(key, _)| *key == mimetype)
		.map(|(_, file_type)| *file_type)
}

/// All keys registered for `file_type`, in registration order
///
/// # Examples
///
/// ```rust
/// use entag::file::FileType;
/// use entag::registry;
///
/// let keys: Vec<&str> = registry::mimetypes(FileType::Flac).collect();
/// assert_eq!(keys, ["audio/flac", "audio/x-flac", "flac"]);
/// ```
pub fn mimetypes(file_type: FileType) -> impl Iterator<Item = &'static str> {
	REGISTRY
		.iter()
		.filter(move |(_, ty)| *ty == file_type)
		.map(|(key, _)| *key)
}

#[cfg(test)]
mod tests {
	use super::{REGISTRY, lookup, mimetypes};
	use crate::file::FileType;

	#[test_log::test]
	fn every_key_is_unique() {
		for (idx, (key, _)) in REGISTRY.iter().enumerate() {
			assert!(
				REGISTRY[idx + 1..].iter().all(|(other, _)| other != key),
				"duplicate key: {key}"
			);
		}
	}

	#[test_log::test]
	fn lookup_is_exact() {
		assert_eq!(lookup("audio/mpeg"), Some(FileType::Mpeg));
		assert_eq!(lookup("entagged/ape"), Some(FileType::Ape));
		assert_eq!(lookup("application/ogg"), Some(FileType::Vorbis));

		assert_eq!(lookup("AUDIO/MPEG"), None);
		assert_eq!(lookup("audio/mpeg "), None);
		assert_eq!(lookup(""), None);
	}

	#[test_log::test]
	fn keys_per_format() {
		assert_eq!(mimetypes(FileType::Mpeg).count(), 5);
		assert_eq!(mimetypes(FileType::Ape).count(), 5);
		assert_eq!(mimetypes(FileType::Mpc).count(), 6);
		assert_eq!(mimetypes(FileType::Vorbis).count(), 6);
		assert_eq!(mimetypes(FileType::Flac).count(), 3);

		for file_type in [
			FileType::Ape,
			FileType::Flac,
			FileType::Mpc,
			FileType::Mpeg,
			FileType::Vorbis,
		] {
			assert!(mimetypes(file_type).all(|key| lookup(key) == Some(file_type)));
		}
	}
}
