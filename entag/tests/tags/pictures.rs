use entag::config::ParsingMode;
use entag::ogg::VorbisField;
use entag::picture::{MimeType, Picture, PictureInformation, PictureType};
use entag::tag::{Field, Tag, TagType};

fn picture() -> (Picture, PictureInformation) {
	let picture = Picture::new(
		PictureType::CoverFront,
		Some(MimeType::Png),
		Some(String::from("cover")),
		vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A],
	);

	let information = PictureInformation {
		width: 1,
		height: 1,
		color_depth: 24,
		num_colors: 0,
	};

	(picture, information)
}

#[test_log::test]
fn vorbis_picture_field() {
	let (picture, information) = picture();

	let field = VorbisField::from_picture(&picture, information);
	assert_eq!(field.key(), "METADATA_BLOCK_PICTURE");

	let (decoded, decoded_information) = field.picture(ParsingMode::Strict).unwrap().unwrap();
	assert_eq!(decoded, picture);
	assert_eq!(decoded_information, information);

	let mut tag = Tag::new(TagType::VorbisComments);
	tag.add(Field::Vorbis(field)).unwrap();
	assert_eq!(tag.fields("metadata_block_picture").count(), 1);
}

#[test_log::test]
fn not_a_picture() {
	let field = VorbisField::new("METADATA_BLOCK_PICTURE", "not base64!");
	assert!(field.picture(ParsingMode::BestAttempt).unwrap().is_err());

	assert!(
		VorbisField::new("TITLE", "Foo")
			.picture(ParsingMode::BestAttempt)
			.is_none()
	);
}
