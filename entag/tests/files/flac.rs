use crate::util::{flac, read, set_artist, temp_file, verify_artist, vorbis_comments};
use entag::config::{ParseOptions, ParsingMode, WriteOptions};
use entag::file::FileType;
use entag::tag::{TagTextField, TagType};

use std::io::Cursor;
use std::time::Duration;

const VORBIS_COMMENT: u8 = 4;
const PADDING: u8 = 1;
const APPLICATION: u8 = 2;

#[test_log::test]
fn flac_read() {
	let comments = vorbis_comments("FLAC vendor", &["ARTIST=Foo artist"]);
	let mut file = temp_file(&flac(&[(VORBIS_COMMENT, &comments[..]), (PADDING, &[0; 32][..])]));

	let audio_file = read(&mut file, "audio/flac");
	assert_eq!(audio_file.file_type(), FileType::Flac);
	verify_artist(&audio_file, TagType::VorbisComments, "Foo artist");
	assert_eq!(audio_file.tag().vendor(), Some("FLAC vendor"));

	let properties = audio_file.encoding_info();
	assert_eq!(properties.encoding_type(), "FLAC 16 bits");
	assert_eq!(properties.channel_number(), 2);
	assert_eq!(properties.sampling_rate(), 44_100);
	assert_eq!(properties.duration(), Duration::from_secs(10));
	// 20000 bytes of audio over 10 seconds
	assert_eq!(properties.bitrate(), 16);
}

#[test_log::test]
fn flac_write() {
	let comments = vorbis_comments("FLAC vendor", &["ARTIST=Foo artist", "DATE=2001"]);
	let mut file = temp_file(&flac(&[
		(APPLICATION, &b"TESTdata"[..]),
		(VORBIS_COMMENT, &comments[..]),
	]));

	let audio_file = read(&mut file, "audio/x-flac");
	let updated = set_artist(&audio_file, &mut file, "audio/x-flac", "Bar artist");

	assert_eq!(updated.tag().vendor(), Some("FLAC vendor"));
	assert_eq!(
		updated.tag().year().next().map(TagTextField::content),
		Some("2001")
	);
	assert_eq!(updated.encoding_info(), audio_file.encoding_info());
}

#[test_log::test]
fn flac_write_without_comments() {
	let mut file = Cursor::new(flac(&[]));
	let audio_file = read(&mut file, "flac");
	assert!(audio_file.tag().is_empty());

	let updated = set_artist(&audio_file, &mut file, "flac", "Foo artist");
	assert_eq!(updated.tag().len(), 1);

	// The audio frames follow the new metadata untouched
	let bytes = file.into_inner();
	let audio_start = bytes.len() - 20_000;
	assert_eq!(&bytes[audio_start..audio_start + 4], &[0xFF, 0xF8, 0x69, 0x08]);
}

#[test_log::test]
fn flac_padding_is_optional() {
	let mut file = Cursor::new(flac(&[(PADDING, &[0; 64][..])]));
	let audio_file = read(&mut file, "flac");

	let original_len = file.get_ref().len();
	audio_file
		.save_to(&mut file, WriteOptions::new().preferred_padding(0))
		.unwrap();

	// The padding block is replaced by an empty comment block
	let comments_len = 4 + "entag - audio metadata codec".len() + 4;
	assert_eq!(
		file.get_ref().len(),
		original_len - (4 + 64) + (4 + comments_len)
	);
}

#[test_log::test]
fn flac_multiple_comment_blocks() {
	let first = vorbis_comments("", &["ARTIST=First"]);
	let second = vorbis_comments("", &["ARTIST=Second"]);
	let bytes = flac(&[(VORBIS_COMMENT, &first[..]), (VORBIS_COMMENT, &second[..])]);

	let audio_file = read(&mut Cursor::new(bytes.clone()), "flac");
	verify_artist(&audio_file, TagType::VorbisComments, "Second");

	assert!(
		entag::probe::read_with_options(
			&mut Cursor::new(bytes),
			"flac",
			ParseOptions::new().parsing_mode(ParsingMode::Strict),
		)
		.is_err()
	);
}

#[test_log::test]
fn flac_missing_marker() {
	let mut bytes = flac(&[]);
	bytes[..4].copy_from_slice(b"fLaX");

	let err = entag::probe::read(&mut Cursor::new(bytes), "flac").unwrap_err();
	assert!(err.is_cannot_read());
}
