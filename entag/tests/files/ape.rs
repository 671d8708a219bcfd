use crate::util::{id3v1, monkeys_audio, read, set_artist, temp_file, verify_artist};
use entag::config::WriteOptions;
use entag::file::FileType;
use entag::tag::{Tag, TagTextField, TagType};

use std::io::Cursor;
use std::time::Duration;

#[test_log::test]
fn ape_read_properties() {
	let audio_file = read(&mut Cursor::new(monkeys_audio()), "audio/ape");
	assert_eq!(audio_file.file_type(), FileType::Ape);

	let properties = audio_file.encoding_info();
	assert_eq!(properties.encoding_type(), "Monkey's Audio v3990");
	assert_eq!(properties.extra_encoding_infos(), "16 bits");
	assert_eq!(properties.channel_number(), 2);
	assert_eq!(properties.sampling_rate(), 44_100);
	assert_eq!(properties.duration(), Duration::from_millis(9359));

	// No tag, so an empty one of the primary type
	assert_eq!(audio_file.tag().tag_type(), TagType::Ape);
	assert!(audio_file.tag().is_empty());
}

#[test_log::test]
fn ape_write() {
	let mut file = temp_file(&monkeys_audio());
	let audio_file = read(&mut file, "audio/x-monkeys-audio");

	let updated = set_artist(&audio_file, &mut file, "audio/x-monkeys-audio", "Foo artist");
	assert_eq!(updated.encoding_info(), audio_file.encoding_info());

	let updated = set_artist(&updated, &mut file, "audio/x-monkeys-audio", "Bar artist");
	assert_eq!(updated.tag().len(), 1);
}

#[test_log::test]
fn ape_id3v1_fallback() {
	let mut bytes = monkeys_audio();
	bytes.extend(id3v1("Foo title", "Foo artist"));

	let mut file = Cursor::new(bytes);
	let audio_file = read(&mut file, "ape");
	verify_artist(&audio_file, TagType::Id3v1, "Foo artist");

	// ID3v1 is never written, an APE tag has to be created
	assert!(
		audio_file
			.save_to(&mut file, WriteOptions::default())
			.is_err()
	);

	let mut ape = Tag::new(TagType::Ape);
	ape.set_title(String::from("Bar title"));
	audio_file
		.with_tag(ape)
		.save_to(&mut file, WriteOptions::default())
		.unwrap();

	let updated = read(&mut file, "ape");
	assert_eq!(updated.tag().tag_type(), TagType::Ape);
	assert_eq!(
		updated.tag().title().next().map(TagTextField::content),
		Some("Bar title")
	);

	// The ID3v1 tag stays at the end
	assert_eq!(
		&file.get_ref()[file.get_ref().len() - 128..][..3],
		b"TAG"
	);
}

#[test_log::test]
fn ape_missing_magic() {
	let mut bytes = monkeys_audio();
	bytes[..4].copy_from_slice(b"MAC_");

	let err = entag::probe::read(&mut Cursor::new(bytes), "entagged/ape").unwrap_err();
	assert!(err.is_cannot_read());
}
