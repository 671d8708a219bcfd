pub const VORBIS_IDENT_HEAD: &[u8] = &[1, 118, 111, 114, 98, 105, 115];
pub const VORBIS_COMMENT_HEAD: &[u8] = &[3, 118, 111, 114, 98, 105, 115];

/// The id given to a comment without a `=` separator
pub const ERRONEOUS_KEY: &str = "ERRONEOUS";
pub const PICTURE_KEY: &str = "METADATA_BLOCK_PICTURE";

pub(crate) const DEFAULT_VENDOR: &str = "entag - audio metadata codec";
