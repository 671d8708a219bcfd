use crate::tag::TagType;

/// The type of file read
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[allow(missing_docs)]
#[non_exhaustive]
pub enum FileType {
	Ape,
	Flac,
	Mpc,
	Mpeg,
	Vorbis,
}

impl FileType {
	/// Returns the file type's "primary" [`TagType`], the one written by
	/// [`AudioFile::save_to`](crate::file::AudioFile::save_to)
	///
	/// | [`FileType`]     | [`TagType`]      |
	/// |------------------|------------------|
	/// | `Mpeg`           | `Id3v2`          |
	/// | `Ape`, `Mpc`     | `Ape`            |
	/// | `Flac`, `Vorbis` | `VorbisComments` |
	///
	/// # Examples
	///
	/// ```rust
	/// use entag::file::FileType;
	/// use entag::tag::TagType;
	///
	/// let file_type = FileType::Mpeg;
	/// assert_eq!(file_type.primary_tag_type(), TagType::Id3v2);
	/// ```
	pub fn primary_tag_type(&self) -> TagType {
		match self {
			FileType::Mpeg => TagType::Id3v2,
			FileType::Ape | FileType::Mpc => TagType::Ape,
			FileType::Flac | FileType::Vorbis => TagType::VorbisComments,
		}
	}

	/// Whether a tag of `tag_type` can be read from this format
	///
	/// Every format only ever writes its [primary tag type](FileType::primary_tag_type).
	///
	/// # Examples
	///
	/// ```rust
	/// use entag::file::FileType;
	/// use entag::tag::TagType;
	///
	/// assert!(FileType::Mpc.supports_tag_type(TagType::Id3v1));
	/// assert!(!FileType::Flac.supports_tag_type(TagType::Id3v2));
	/// ```
	pub fn supports_tag_type(&self, tag_type: TagType) -> bool {
		if self.primary_tag_type() == tag_type {
			return true;
		}

		matches!(
			(self, tag_type),
			(
				FileType::Ape | FileType::Mpc | FileType::Mpeg,
				TagType::Id3v1
			)
		)
	}
}
