use crate::util::{id3v1, musepack, read, set_artist, temp_file, verify_artist};
use entag::error::ErrorKind;
use entag::file::FileType;
use entag::tag::TagType;

use std::io::Cursor;

#[test_log::test]
fn mpc_read_properties() {
	let audio_file = read(&mut Cursor::new(musepack()), "audio/x-mpc");
	assert_eq!(audio_file.file_type(), FileType::Mpc);

	let properties = audio_file.encoding_info();
	assert_eq!(properties.encoding_type(), "MPEGplus (MPC) rev.7");
	assert_eq!(
		properties.extra_encoding_infos(),
		"Profile: Standard (q=5.0), Encoder: --Alpha-- 1.15"
	);
	assert_eq!(properties.sampling_rate(), 44_100);
	assert_eq!(properties.channel_number(), 2);
	// 1000 frames of 1152 samples
	assert_eq!(properties.length(), 26);
	assert!(properties.is_vbr());
}

#[test_log::test]
fn mpc_write() {
	let mut file = temp_file(&musepack());
	let audio_file = read(&mut file, "mpc");
	assert_eq!(audio_file.tag().tag_type(), TagType::Ape);

	let updated = set_artist(&audio_file, &mut file, "mpc", "Foo artist");
	assert_eq!(updated.encoding_info().length(), 26);
}

#[test_log::test]
fn mpc_id3v1_fallback() {
	let mut bytes = musepack();
	bytes.extend(id3v1("", "Foo artist"));

	let audio_file = read(&mut Cursor::new(bytes), "mp+");
	verify_artist(&audio_file, TagType::Id3v1, "Foo artist");
}

#[test_log::test]
fn mpc_not_musepack() {
	let err = entag::probe::read(&mut Cursor::new(vec![0; 64]), "audio/mpc").unwrap_err();

	let ErrorKind::CannotRead(decoding_error) = err.kind() else {
		panic!("expected CannotRead, got {err:?}");
	};
	assert_eq!(decoding_error.format(), Some(FileType::Mpc));
	assert_eq!(decoding_error.description(), "MP+ Header not found");
}
