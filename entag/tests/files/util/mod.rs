use entag::config::{ParseOptions, WriteOptions};
use entag::error::EntagError;
use entag::file::AudioFile;
use entag::io::{FileLike, Length, Truncate};
use entag::tag::{TagTextField, TagType};

use std::fs::File;
use std::io::{Seek as _, Write as _};

/// Create a new temporary file holding `content`
pub fn temp_file(content: &[u8]) -> File {
	let mut file = tempfile::tempfile().unwrap();
	file.write_all(content).unwrap();
	file.rewind().unwrap();

	file
}

/// Rewind `file` and parse it as `mimetype`
pub fn read<F: FileLike>(file: &mut F, mimetype: &str) -> AudioFile {
	file.rewind().unwrap();
	entag::probe::read_with_options(file, mimetype, ParseOptions::new()).unwrap()
}

/// Verify that `file` has a tag of `tag_type` with a single artist of `expected_value`
pub fn verify_artist(file: &AudioFile, tag_type: TagType, expected_value: &str) {
	println!("VERIFY: Expecting `{tag_type:?}` to have an artist of \"{expected_value}\"");

	let tag = file.tag();
	assert_eq!(tag.tag_type(), tag_type);

	let artists: Vec<&str> = tag.artist().map(TagTextField::content).collect();
	assert_eq!(artists, [expected_value]);
}

/// This will:
///
/// * Set the artist of the `file` tag to `new_value`
/// * Write the tag back to `handle`
/// * Re-read `handle` as `mimetype`, verifying the new artist
pub fn set_artist<F: FileLike>(
	file: &AudioFile,
	handle: &mut F,
	mimetype: &str,
	new_value: &str,
) -> AudioFile
where
	EntagError: From<<F as Truncate>::Error>,
	EntagError: From<<F as Length>::Error>,
{
	println!("WRITE: Writing artist \"{new_value}\" as {mimetype}");

	let mut tag = file.tag().clone();
	assert!(tag.set_artist(String::from(new_value)));

	file.with_tag(tag)
		.save_to(handle, WriteOptions::default())
		.unwrap();

	let updated = read(handle, mimetype);
	verify_artist(&updated, file.tag().tag_type(), new_value);
	updated
}

/// A Vorbis comment block, without any framing
pub fn vorbis_comments(vendor: &str, comments: &[&str]) -> Vec<u8> {
	let mut block = Vec::new();
	block.extend((vendor.len() as u32).to_le_bytes());
	block.extend(vendor.as_bytes());
	block.extend((comments.len() as u32).to_le_bytes());
	for comment in comments {
		block.extend((comment.len() as u32).to_le_bytes());
		block.extend(comment.as_bytes());
	}
	block
}

fn ogg_crc(page: &[u8]) -> u32 {
	let mut crc = 0_u32;
	for byte in page {
		crc ^= u32::from(*byte) << 24;
		for _ in 0..8 {
			crc = if crc & 0x8000_0000 == 0 {
				crc << 1
			} else {
				(crc << 1) ^ 0x04C1_1DB7
			};
		}
	}
	crc
}

/// A single OGG page holding every packet in `packets`
pub fn ogg_page(header_type: u8, abgp: u64, sequence_number: u32, packets: &[&[u8]]) -> Vec<u8> {
	let mut segments = Vec::new();
	for packet in packets {
		segments.extend(std::iter::repeat_n(255_u8, packet.len() / 255));
		segments.push((packet.len() % 255) as u8);
	}

	let mut page = b"OggS".to_vec();
	page.push(0);
	page.push(header_type);
	page.extend(abgp.to_le_bytes());
	// Stream serial
	page.extend(0x1234_5678_u32.to_le_bytes());
	page.extend(sequence_number.to_le_bytes());
	// Checksum, filled in below
	page.extend([0; 4]);
	page.push(segments.len() as u8);
	page.extend(segments);
	for packet in packets {
		page.extend(*packet);
	}

	let crc = ogg_crc(&page);
	page[22..26].copy_from_slice(&crc.to_le_bytes());
	page
}

/// An OGG Vorbis stream of 10 seconds, 44.1kHz stereo at a nominal 128 kbps
pub fn ogg_vorbis(comment_block: &[u8]) -> Vec<u8> {
	let mut identification = b"\x01vorbis".to_vec();
	identification.extend(0_u32.to_le_bytes());
	identification.push(2);
	identification.extend(44_100_u32.to_le_bytes());
	identification.extend(0_i32.to_le_bytes());
	identification.extend(128_000_i32.to_le_bytes());
	identification.extend(0_i32.to_le_bytes());
	identification.extend([0xB8, 0x01]);

	let mut comments = b"\x03vorbis".to_vec();
	comments.extend(comment_block);
	comments.push(1);

	let setup = b"\x05vorbis\x00\x01\x02\x03".to_vec();

	let mut file = ogg_page(0x02, 0, 0, &[&identification[..]]);
	file.extend(ogg_page(0, 0, 1, &[&comments[..], &setup[..]]));
	file.extend(ogg_page(0, 220_500, 2, &[&[0xAA; 300][..]]));
	file.extend(ogg_page(0x04, 441_000, 3, &[&[0xBB; 100][..]]));
	file
}

/// A FLAC stream of 10 seconds, 44.1kHz stereo at 16 bits
///
/// `blocks` are `(block type, content)` pairs following STREAMINFO.
pub fn flac(blocks: &[(u8, &[u8])]) -> Vec<u8> {
	let mut file = b"fLaC".to_vec();

	let last = if blocks.is_empty() { 0x80 } else { 0 };
	file.extend([last, 0, 0, 34]);
	// Block sizes and frame sizes
	file.extend([0x10, 0, 0x10, 0, 0, 0, 0, 0, 0, 0]);
	// 44100 Hz, 2 channels, 16 bits, 441000 samples
	file.extend([0x0A, 0xC4, 0x42, 0xF0, 0x00, 0x06, 0xBA, 0xA8]);
	// MD5
	file.extend([0; 16]);

	for (idx, (ty, content)) in blocks.iter().enumerate() {
		let last = if idx == blocks.len() - 1 { 0x80 } else { 0 };
		file.push(ty | last);
		file.extend(&(content.len() as u32).to_be_bytes()[1..]);
		file.extend(*content);
	}

	// Fake audio frames
	file.extend([0xFF, 0xF8, 0x69, 0x08]);
	file.extend([0; 19_996]);
	file
}

/// A Monkey's Audio v3990 stream of 9.36 seconds, 44.1kHz stereo at 16 bits
pub fn monkeys_audio() -> Vec<u8> {
	let mut file = b"MAC ".to_vec();
	file.extend(3990_u16.to_le_bytes());

	let mut descriptor = [0; 46];
	descriptor[2..6].copy_from_slice(&52_u32.to_le_bytes());
	file.extend(descriptor);

	// Compression type, format flags
	file.extend([0xD0, 0x07, 0, 0]);
	// Blocks per frame, final frame blocks, total frames
	file.extend(73728_u32.to_le_bytes());
	file.extend(44100_u32.to_le_bytes());
	file.extend(6_u32.to_le_bytes());
	// Bit depth, channels, sample rate
	file.extend(16_u16.to_le_bytes());
	file.extend(2_u16.to_le_bytes());
	file.extend(44100_u32.to_le_bytes());

	// Fake audio frames
	file.extend([0x5A; 1000]);
	file
}

/// A Musepack SV7 stream of 1000 frames, 44.1kHz, standard profile
pub fn musepack() -> Vec<u8> {
	let mut file = b"MP+".to_vec();

	let mut header = [0; 25];
	header[0] = 0x07;
	header[1..5].copy_from_slice(&1000_u32.to_le_bytes());
	header[7] = 0xA0;
	header[24] = 115;
	file.extend(header);

	// Fake audio frames
	file.extend([0x33; 2000]);
	file
}

/// `count` MPEG-1 Layer 3 frames, 128 kbps 44.1kHz joint stereo
pub fn mpeg_frames(count: usize) -> Vec<u8> {
	let mut frames = Vec::new();
	for _ in 0..count {
		let mut frame = vec![0; 417];
		frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x64]);
		frames.extend(frame);
	}
	frames
}

/// A 128 byte ID3v1 tag with a title and artist
pub fn id3v1(title: &str, artist: &str) -> [u8; 128] {
	let mut tag = [0; 128];
	tag[..3].copy_from_slice(b"TAG");
	tag[3..3 + title.len()].copy_from_slice(title.as_bytes());
	tag[33..33 + artist.len()].copy_from_slice(artist.as_bytes());
	// No genre
	tag[127] = 0xFF;
	tag
}
