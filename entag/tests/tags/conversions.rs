// Tests for moving fields between files of different formats

use entag::TextEncoding;
use entag::config::WriteOptions;
use entag::id3::v2::{CommentFrame, Frame};
use entag::tag::{Field, Tag, TagField, TagTextField, TagType, combine_tags};

use std::io::Cursor;

fn contents<'a>(values: impl Iterator<Item = &'a dyn TagTextField>) -> Vec<&'a str> {
	values.map(TagTextField::content).collect()
}

#[test_log::test]
fn id3v2_comment_frame() {
	let mut tag = Tag::new(TagType::Id3v2);
	assert!(tag.set_comment(String::from("Hello")));

	let Some(Field::Id3v2(frame)) = tag.iter().next() else {
		panic!("expected an ID3v2 frame");
	};

	assert_eq!(
		frame,
		&Frame::Comment(CommentFrame::new(
			TextEncoding::Latin1,
			*b"eng",
			String::new(),
			String::from("Hello")
		))
	);
	assert_eq!(frame.id(), "COMM");
}

#[test_log::test]
fn id3v2_comment_survives_write() {
	let mut frames = Vec::new();
	for _ in 0..3 {
		let mut frame = vec![0; 417];
		frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x64]);
		frames.extend(frame);
	}

	let mut file = Cursor::new(frames);
	let audio_file = entag::probe::read(&mut file, "audio/mpeg").unwrap();

	let mut tag = Tag::new(TagType::Id3v2);
	tag.set_comment(String::from("Hello"));
	tag.set_title(String::from("Привет"));

	audio_file
		.with_tag(tag)
		.save_to(&mut file, WriteOptions::default())
		.unwrap();

	file.set_position(0);
	let updated = entag::probe::read(&mut file, "audio/mpeg").unwrap();

	let Some(Field::Id3v2(Frame::Comment(comment))) = updated.tag().fields("COMM").next() else {
		panic!("expected a comment frame");
	};
	assert_eq!(&comment.language, b"eng");
	assert_eq!(comment.description, "");
	assert_eq!(comment.content, "Hello");

	// Text outside of Latin-1 has to be UTF-16
	assert_eq!(contents(updated.tag().title()), ["Привет"]);
	assert_eq!(
		updated.tag().title().next().map(TagTextField::encoding),
		Some(TextEncoding::UTF16)
	);
}

#[test_log::test]
fn combine_across_formats() {
	let mut vorbis = Tag::new(TagType::VorbisComments);
	vorbis.push_artist(String::from("Foo artist"));
	vorbis.push_title(String::from("Foo title"));
	vorbis.push_track_count(String::from("12"));

	let mut ape = Tag::new(TagType::Ape);
	ape.push_artist(String::from("Bar artist"));
	ape.push_genre(String::from("Jazz"));

	let mut id3v2 = Tag::new(TagType::Id3v2);
	id3v2.push_artist(String::from("Baz artist"));

	let combined = combine_tags(&[&id3v2, &vorbis, &ape]).unwrap();
	assert_eq!(combined.tag_type(), TagType::Id3v2);
	assert_eq!(
		contents(combined.artist()),
		["Baz artist", "Foo artist", "Bar artist"]
	);
	assert_eq!(contents(combined.title()), ["Foo title"]);
	assert_eq!(contents(combined.genre()), ["Jazz"]);
	// ID3v2 has no field for the track count
	assert_eq!(combined.track_count().count(), 0);

	// Every field uses the target's keys
	let ids: Vec<&str> = combined.iter().map(TagField::id).collect();
	assert_eq!(ids, ["TPE1", "TPE1", "TPE1", "TIT2", "TCON"]);

	let combined = combine_tags(&[&vorbis, &ape]).unwrap();
	assert_eq!(contents(combined.track_count()), ["12"]);
	assert_eq!(combined.fields("ARTIST").count(), 2);
}

#[test_log::test]
fn copy_fields_to_another_format() {
	let mut ape = Tag::new(TagType::Ape);
	ape.push_artist(String::from("Foo artist"));
	ape.push_year(String::from("1999"));

	let mut vorbis = Tag::new(TagType::VorbisComments);
	for field in ape.iter() {
		let slot = field.common_field().unwrap();
		let text = field.text().unwrap();
		assert!(vorbis.push_text(slot, String::from(text)));
	}

	let ids: Vec<&str> = vorbis.iter().map(TagField::id).collect();
	assert_eq!(ids, ["ARTIST", "DATE"]);

	// Fields can't be moved as is
	let field = ape.iter().next().unwrap().clone();
	assert!(vorbis.add(field).is_err());
}
