//! Generic file handling utilities

mod audio_file;
mod file_type;

pub use audio_file::AudioFile;
pub use file_type::FileType;
