use crate::ape::constants::APE_PREAMBLE;
use crate::error::Result;
use crate::macros::decode_err;

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

// Bit 31: the tag contains a header
const HAS_HEADER: u32 = 1 << 31;
// Bit 29: this is the header
const IS_HEADER: u32 = 1 << 29;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct ApeHeader {
	/// The size of the items and the footer
	pub(crate) size: u32,
	pub(crate) item_count: u32,
	pub(crate) flags: u32,
}

impl ApeHeader {
	pub(crate) fn has_header(&self) -> bool {
		self.flags & HAS_HEADER == HAS_HEADER
	}

	/// The size of the entire tag, including the header if present
	pub(crate) fn full_tag_size(&self) -> u32 {
		self.size + if self.has_header() { 32 } else { 0 }
	}
}

/// Read the remainder of a header or footer, the preamble has already been consumed
///
/// For a footer, the reader is moved back to the start of the items.
pub(crate) fn read_ape_header<R>(data: &mut R, footer: bool) -> Result<ApeHeader>
where
	R: Read + Seek,
{
	let version = data.read_u32::<LittleEndian>()?;

	let size = data.read_u32::<LittleEndian>()?;
	if size < 32 {
		// If the size is < 32, something went wrong during encoding
		// The size includes the footer and all tag items
		decode_err!(@BAIL Ape, "APE tag has an invalid size (< 32)");
	}

	let item_count = data.read_u32::<LittleEndian>()?;
	let flags = data.read_u32::<LittleEndian>()?;

	// Skip the reserved bytes
	data.seek(SeekFrom::Current(8))?;

	if footer {
		let Some(items_start) = data.stream_position()?.checked_sub(u64::from(size)) else {
			decode_err!(@BAIL Ape, "APE tag has an invalid size (> file size)");
		};

		data.seek(SeekFrom::Start(items_start))?;
	}

	log::debug!("Found APE tag, version: {version}, size: {size}, items: {item_count}");

	Ok(ApeHeader {
		size,
		item_count,
		flags,
	})
}

/// Create a 32 byte APEv2 header or footer
///
/// Tags are always written with both a header and a footer.
pub(crate) fn create_ape_header(size: u32, item_count: u32, is_header: bool) -> [u8; 32] {
	let mut flags = HAS_HEADER;
	if is_header {
		flags |= IS_HEADER;
	}

	let mut header = [0; 32];
	header[..8].copy_from_slice(APE_PREAMBLE);
	header[8..12].copy_from_slice(&2000_u32.to_le_bytes());
	header[12..16].copy_from_slice(&size.to_le_bytes());
	header[16..20].copy_from_slice(&item_count.to_le_bytes());
	header[20..24].copy_from_slice(&flags.to_le_bytes());

	header
}
