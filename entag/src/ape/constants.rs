pub(crate) const APE_PREAMBLE: &[u8; 8] = b"APETAGEX";

// Keys that would make the tag ambiguous with other tag formats
pub(crate) const INVALID_KEYS: [&str; 4] = ["ID3", "TAG", "OGGS", "MP+"];

/// The keys APE pictures are stored under, by convention
pub(crate) const APE_PICTURE_PREFIX: &str = "Cover Art";
