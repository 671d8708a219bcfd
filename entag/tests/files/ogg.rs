use crate::util::{ogg_vorbis, read, set_artist, temp_file, verify_artist, vorbis_comments};
use entag::config::{ParseOptions, WriteOptions};
use entag::file::FileType;
use entag::tag::{TagField, TagTextField, TagType};

use std::io::{Cursor, Seek};
use std::time::Duration;

fn full_test() -> Vec<u8> {
	ogg_vorbis(&vorbis_comments(
		"Test vendor",
		&["ARTIST=Foo artist", "TITLE=Foo title", "album=Foo album"],
	))
}

#[test_log::test]
fn vorbis_read() {
	let mut file = temp_file(&full_test());
	let audio_file = read(&mut file, "audio/ogg");

	assert_eq!(audio_file.file_type(), FileType::Vorbis);
	verify_artist(&audio_file, TagType::VorbisComments, "Foo artist");

	let tag = audio_file.tag();
	assert_eq!(tag.vendor(), Some("Test vendor"));

	let ids: Vec<&str> = tag.iter().map(TagField::id).collect();
	assert_eq!(ids, ["ARTIST", "TITLE", "ALBUM"]);
}

#[test_log::test]
fn vorbis_properties() {
	let audio_file = read(&mut Cursor::new(full_test()), "application/ogg");

	let properties = audio_file.encoding_info();
	assert_eq!(properties.encoding_type(), "Ogg Vorbis v0");
	assert_eq!(properties.channel_number(), 2);
	assert_eq!(properties.sampling_rate(), 44_100);
	assert_eq!(properties.bitrate(), 128);
	assert_eq!(properties.duration(), Duration::from_secs(10));
	assert_eq!(properties.length(), 10);
	assert!(properties.is_vbr());
}

#[test_log::test]
fn vorbis_write() {
	let mut file = temp_file(&full_test());
	let audio_file = read(&mut file, "audio/ogg");

	let updated = set_artist(&audio_file, &mut file, "audio/ogg", "Bar artist");

	// Everything else is untouched
	let tag = updated.tag();
	assert_eq!(tag.vendor(), Some("Test vendor"));
	assert_eq!(
		tag.title().map(TagTextField::content).collect::<Vec<_>>(),
		["Foo title"]
	);
	assert_eq!(updated.encoding_info(), audio_file.encoding_info());

	file.rewind().unwrap();
	let again = set_artist(&updated, &mut file, "audio/ogg", "Foo artist");
	assert_eq!(again.tag().len(), 3);
}

#[test_log::test]
fn vorbis_write_cursor_round_trip() {
	let mut file = Cursor::new(full_test());
	let audio_file = read(&mut file, "audio/vorbis");

	let mut tag = audio_file.tag().clone();
	tag.remove_artist();
	tag.push_genre(String::from("Rock"));
	tag.set_vendor(None);

	audio_file
		.with_tag(tag)
		.save_to(&mut file, WriteOptions::default())
		.unwrap();

	let updated = read(&mut file, "audio/vorbis");
	let tag = updated.tag();
	assert_eq!(tag.artist().count(), 0);
	assert_eq!(tag.genre().next().map(TagTextField::content), Some("Rock"));
	assert_eq!(tag.vendor(), Some("entag - audio metadata codec"));
	assert_eq!(updated.encoding_info().length(), 10);
}

#[test_log::test]
fn vorbis_no_tags() {
	let mut file = temp_file(&full_test());
	file.rewind().unwrap();

	let audio_file = entag::probe::read_with_options(
		&mut file,
		"ogg",
		ParseOptions::new().read_tags(false),
	)
	.unwrap();

	assert!(audio_file.tag().is_empty());
	assert_eq!(audio_file.encoding_info().sampling_rate(), 44_100);
}

#[test_log::test]
fn vorbis_rejects_other_tags() {
	let mut file = Cursor::new(full_test());
	let audio_file = read(&mut file, "oga");
	let id3v2 = entag::tag::Tag::new(TagType::Id3v2);

	assert!(
		audio_file
			.with_tag(id3v2)
			.save_to(&mut file, WriteOptions::default())
			.is_err()
	);
}
