use crate::util::{id3v1, mpeg_frames, read, set_artist, temp_file, verify_artist};
use entag::config::ParseOptions;
use entag::file::FileType;
use entag::tag::{TagTextField, TagType};

use std::io::Cursor;

#[test_log::test]
fn mpeg_read_properties() {
	let audio_file = read(&mut Cursor::new(mpeg_frames(10)), "audio/mpeg");
	assert_eq!(audio_file.file_type(), FileType::Mpeg);

	let properties = audio_file.encoding_info();
	assert_eq!(properties.encoding_type(), "MPEG-1 Layer 3");
	assert_eq!(properties.extra_encoding_infos(), "Joint Stereo");
	assert_eq!(properties.bitrate(), 128);
	assert_eq!(properties.sampling_rate(), 44_100);
	assert_eq!(properties.channel_number(), 2);
	assert!(!properties.is_vbr());
}

#[test_log::test]
fn mpeg_write() {
	let mut file = temp_file(&mpeg_frames(10));
	let audio_file = read(&mut file, "audio/mp3");
	assert_eq!(audio_file.tag().tag_type(), TagType::Id3v2);
	assert!(audio_file.tag().is_empty());

	let updated = set_artist(&audio_file, &mut file, "audio/mp3", "Foo artist");
	assert_eq!(updated.encoding_info(), audio_file.encoding_info());

	let updated = set_artist(&updated, &mut file, "audio/mp3", "Bar artist");
	assert_eq!(updated.tag().len(), 1);
}

#[test_log::test]
fn mpeg_id3v1_fallback() {
	let mut bytes = mpeg_frames(4);
	bytes.extend(id3v1("Foo title", "Foo artist"));

	let audio_file = read(&mut Cursor::new(bytes), "mp3");
	verify_artist(&audio_file, TagType::Id3v1, "Foo artist");
	assert_eq!(
		audio_file.tag().title().next().map(TagTextField::content),
		Some("Foo title")
	);
}

#[test_log::test]
fn mpeg_junk_limit() {
	let mut bytes = vec![0x20; 16];
	bytes.extend(mpeg_frames(4));

	assert!(
		entag::probe::read_with_options(
			&mut Cursor::new(bytes.clone()),
			"audio/mpeg",
			ParseOptions::new().max_junk_bytes(8),
		)
		.is_err()
	);

	let audio_file = read(&mut Cursor::new(bytes), "audio/mpeg");
	assert_eq!(audio_file.encoding_info().bitrate(), 128);
}
