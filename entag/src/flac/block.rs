use crate::error::Result;
use crate::macros::{err, try_vec};

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ByteOrder};

/// The type of a FLAC metadata block
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BlockType {
	/// `STREAMINFO`, always the first block
	StreamInfo,
	/// `PADDING`
	Padding,
	/// `APPLICATION`
	Application,
	/// `SEEKTABLE`
	SeekTable,
	/// `VORBIS_COMMENT`
	VorbisComment,
	/// `CUESHEET`
	CueSheet,
	/// `PICTURE`
	Picture,
	/// A reserved or invalid block type, keeping its number
	Unknown(u8),
}

impl BlockType {
	/// Get a `BlockType` from the lower 7 bits of a block header
	///
	/// # Examples
	///
	/// ```rust
	/// use entag::flac::BlockType;
	///
	/// assert_eq!(BlockType::from_u8(4), BlockType::VorbisComment);
	/// assert_eq!(BlockType::from_u8(100), BlockType::Unknown(100));
	/// ```
	pub fn from_u8(ty: u8) -> Self {
		match ty {
			0 => Self::StreamInfo,
			1 => Self::Padding,
			2 => Self::Application,
			3 => Self::SeekTable,
			4 => Self::VorbisComment,
			5 => Self::CueSheet,
			6 => Self::Picture,
			n => Self::Unknown(n),
		}
	}

	/// The numeric block type
	pub fn as_u8(self) -> u8 {
		match self {
			Self::StreamInfo => 0,
			Self::Padding => 1,
			Self::Application => 2,
			Self::SeekTable => 3,
			Self::VorbisComment => 4,
			Self::CueSheet => 5,
			Self::Picture => 6,
			Self::Unknown(n) => n,
		}
	}
}

/// The 4 byte header preceding every metadata block
///
/// # Examples
///
/// ```rust
/// use entag::flac::{BlockHeader, BlockType};
///
/// let header = BlockHeader::parse([0x84, 0x00, 0x00, 0x28]);
/// assert!(header.is_last);
/// assert_eq!(header.block_type, BlockType::VorbisComment);
/// assert_eq!(header.length, 40);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockHeader {
	/// Whether this is the final metadata block before the audio frames
	pub is_last: bool,
	/// The block type
	pub block_type: BlockType,
	/// The length of the block content, excluding this header (24 bits)
	pub length: u32,
}

impl BlockHeader {
	/// Parse a block header
	pub fn parse(bytes: [u8; 4]) -> Self {
		Self {
			is_last: bytes[0] & 0x80 != 0,
			block_type: BlockType::from_u8(bytes[0] & 0x7F),
			length: BigEndian::read_u24(&bytes[1..]),
		}
	}

	/// Serialize the block header
	///
	/// Only the lower 24 bits of the length are kept.
	pub fn as_bytes(&self) -> [u8; 4] {
		let mut bytes = [0; 4];
		bytes[0] = (self.block_type.as_u8() & 0x7F) | if self.is_last { 0x80 } else { 0 };
		BigEndian::write_u24(&mut bytes[1..], self.length & 0x00FF_FFFF);
		bytes
	}
}

pub(crate) struct Block {
	pub(crate) header: BlockHeader,
	pub(crate) content: Vec<u8>,
	pub(crate) start: u64,
	pub(crate) end: u64,
}

impl Block {
	/// Read a block, only keeping its content if `predicate` accepts its type
	pub(crate) fn read<R, P>(data: &mut R, mut predicate: P) -> Result<Self>
	where
		R: Read + Seek,
		P: FnMut(BlockType) -> bool,
	{
		let start = data.stream_position()?;

		let mut header_bytes = [0; 4];
		data.read_exact(&mut header_bytes)?;
		let header = BlockHeader::parse(header_bytes);

		log::trace!(
			"Reading FLAC block, type: {:?}, size: {}",
			header.block_type,
			header.length
		);

		let mut content;
		if predicate(header.block_type) {
			content = try_vec![0; header.length as usize];
			data.read_exact(&mut content)?;
		} else {
			content = Vec::new();
			data.seek(SeekFrom::Current(i64::from(header.length)))?;
		}

		let end = data.stream_position()?;

		Ok(Self {
			header,
			content,
			start,
			end,
		})
	}

	pub(crate) fn new(block_type: BlockType, content: Vec<u8>) -> Result<Self> {
		let Ok(length) = u32::try_from(content.len()) else {
			err!(TooMuchData);
		};

		if length > 0x00FF_FFFF {
			err!(TooMuchData);
		}

		Ok(Self {
			header: BlockHeader {
				is_last: false,
				block_type,
				length,
			},
			content,
			start: 0,
			end: 0,
		})
	}

	pub(crate) fn write_to(&self, writer: &mut Vec<u8>) {
		writer.extend(self.header.as_bytes());
		writer.extend_from_slice(&self.content);
	}
}
