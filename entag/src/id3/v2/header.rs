use crate::error::Result;
use crate::id3::v2::util::synchsafe::SynchsafeInteger;
use crate::macros::{err, id3v2_err};

use std::io::Read;

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};

/// The ID3v2 version
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

/// Flags that apply to the entire tag
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct Id3v2TagFlags {
	/// Whether or not all frames are unsynchronised
	pub unsynchronisation: bool,
	/// Indicates if the tag has an extended header
	pub extended_header: bool,
	/// Indicates if the tag is in an experimental stage
	pub experimental: bool,
	/// Indicates that the tag includes a footer (ID3v2.4 only)
	pub footer: bool,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Id3v2Header {
	pub version: Id3v2Version,
	pub flags: Id3v2TagFlags,
	/// The size of the tag contents, including the extended header
	///
	/// This **does not** include the header or footer.
	pub size: u32,
	/// The number of bytes taken by the extended header
	pub extended_size: u32,
}

impl Id3v2Header {
	pub(crate) fn parse<R>(bytes: &mut R) -> Result<Self>
	where
		R: Read,
	{
		log::debug!("Parsing ID3v2 header");

		let mut header = [0; 10];
		bytes.read_exact(&mut header)?;

		if &header[..3] != b"ID3" {
			err!(FakeTag);
		}

		// Version is stored as [major, minor], the minor revision is only kept for errors
		let version = match header[3] {
			2 => Id3v2Version::V2,
			3 => Id3v2Version::V3,
			4 => Id3v2Version::V4,
			major => return Err(id3v2_err!(BadId3v2Version(major, header[4]))),
		};

		let flags = header[5];

		// Compression was a flag only used in ID3v2.2 (bit 6), without a decided scheme.
		// The tag is to be ignored.
		if version == Id3v2Version::V2 && flags & 0x40 == 0x40 {
			return Err(id3v2_err!(V2Compression));
		}

		let flags_parsed = Id3v2TagFlags {
			unsynchronisation: flags & 0x80 == 0x80,
			extended_header: version != Id3v2Version::V2 && flags & 0x40 == 0x40,
			experimental: version != Id3v2Version::V2 && flags & 0x20 == 0x20,
			footer: version == Id3v2Version::V4 && flags & 0x10 == 0x10,
		};

		let size = BigEndian::read_u32(&header[6..]).unsynch();
		let mut extended_size = 0;

		if flags_parsed.extended_header {
			let stored_size = bytes.read_u32::<BigEndian>()?;

			// ID3v2.4 counts the size field itself, ID3v2.3 does not
			let remaining = match version {
				Id3v2Version::V4 => {
					extended_size = stored_size.unsynch();
					extended_size.checked_sub(4)
				},
				_ => {
					extended_size = stored_size.saturating_add(4);
					Some(stored_size)
				},
			};

			let Some(remaining) = remaining.filter(|_| extended_size >= 6) else {
				return Err(id3v2_err!(BadExtendedHeaderSize));
			};

			if extended_size > size {
				return Err(id3v2_err!(BadExtendedHeaderSize));
			}

			log::debug!("Skipping ID3v2 extended header ({extended_size} bytes)");
			std::io::copy(
				&mut bytes.by_ref().take(u64::from(remaining)),
				&mut std::io::sink(),
			)?;
		}

		Ok(Id3v2Header {
			version,
			flags: flags_parsed,
			size,
			extended_size,
		})
	}

	/// The total size of the tag, including the header and footer
	pub(crate) fn full_tag_size(&self) -> u32 {
		self.size + 10 + if self.flags.footer { 10 } else { 0 }
	}
}
