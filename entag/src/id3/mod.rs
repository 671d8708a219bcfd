//! ID3 specific items
//!
//! ID3v2 tags are read and written. ID3v1 tags are only read, as a fallback for files without a
//! better tag.

pub mod v1;
pub mod v2;

use crate::error::Result;
use crate::macros::try_vec;
use v1::constants::ID3V1_TAG_MARKER;
use v2::header::Id3v2Header;

use std::io::{Read, Seek, SeekFrom};

pub(crate) struct ID3FindResults<Header, Content>(pub Option<Header>, pub Content);

/// Look for an ID3v1 tag in the last 128 bytes
///
/// The reader is left at the start of the tag if one is found, otherwise at the end.
pub(crate) fn find_id3v1<R>(data: &mut R, read: bool) -> Result<ID3FindResults<(), Option<[u8; 128]>>>
where
	R: Read + Seek,
{
	log::debug!("Searching for an ID3v1 tag");

	// Reader is too small to contain an ID3v1 tag
	if data.seek(SeekFrom::End(-128)).is_err() {
		data.seek(SeekFrom::End(0))?;
		return Ok(ID3FindResults(None, None));
	}

	let mut id3v1 = [0; 128];
	data.read_exact(&mut id3v1)?;

	if id3v1[..3] != ID3V1_TAG_MARKER {
		return Ok(ID3FindResults(None, None));
	}

	log::debug!("Found an ID3v1 tag");
	data.seek(SeekFrom::End(-128))?;

	Ok(ID3FindResults(Some(()), read.then_some(id3v1)))
}

/// Look for an ID3v2 tag at the current position
///
/// When found, the reader is left after the tag (and footer), otherwise it is restored.
pub(crate) fn find_id3v2<R>(
	data: &mut R,
	read: bool,
) -> Result<ID3FindResults<Id3v2Header, Option<Vec<u8>>>>
where
	R: Read + Seek,
{
	let start = data.stream_position()?;
	log::debug!("Searching for an ID3v2 tag at offset: {start}");

	let Ok(header) = Id3v2Header::parse(data) else {
		data.seek(SeekFrom::Start(start))?;
		return Ok(ID3FindResults(None, None));
	};

	log::debug!("Found an ID3v2 tag, size: {}", header.size);

	// The extended header was already consumed
	let content_len = header.size.saturating_sub(header.extended_size);

	let mut content = None;
	if read {
		let mut tag = try_vec![0; content_len as usize];
		data.read_exact(&mut tag)?;

		content = Some(tag);
	}

	data.seek(SeekFrom::Start(start + u64::from(header.full_tag_size())))?;

	Ok(ID3FindResults(Some(header), content))
}

#[cfg(test)]
mod tests {
	use super::{find_id3v1, find_id3v2};

	use std::io::{Cursor, Seek};

	#[test_log::test]
	fn id3v2_at_start() {
		let mut bytes = vec![b'I', b'D', b'3', 4, 0, 0x10, 0, 0, 0, 2, 0xAA, 0xBB];
		bytes.extend(*b"3DI\x04\x00\x10\x00\x00\x00\x02");
		bytes.extend(b"audio");

		let mut reader = Cursor::new(bytes);
		let found = find_id3v2(&mut reader, true).unwrap();

		assert!(found.0.is_some());
		assert_eq!(found.1.unwrap(), [0xAA, 0xBB]);
		// Header, content and footer
		assert_eq!(reader.stream_position().unwrap(), 22);
	}

	#[test_log::test]
	fn no_id3v2() {
		let mut reader = Cursor::new(b"fLaC".to_vec());
		let found = find_id3v2(&mut reader, true).unwrap();

		assert!(found.0.is_none());
		assert_eq!(reader.stream_position().unwrap(), 0);
	}

	#[test_log::test]
	fn id3v1_at_end() {
		let mut bytes = vec![0; 10];
		bytes.extend(b"TAG");
		bytes.resize(138, 0);

		let mut reader = Cursor::new(bytes);
		let found = find_id3v1(&mut reader, false).unwrap();

		assert!(found.0.is_some());
		assert_eq!(reader.stream_position().unwrap(), 10);

		let mut short = Cursor::new(vec![0; 20]);
		assert!(find_id3v1(&mut short, true).unwrap().0.is_none());
	}
}
