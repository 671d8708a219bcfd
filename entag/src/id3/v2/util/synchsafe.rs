//! Utilities for working with synchsafe integers and unsynchronized content
//!
//! ID3v2 avoids false MPEG frame syncs by never writing an `0xFF` followed by a byte with its
//! upper 3 bits set. Sizes are stored with only 7 bits per byte, and content may have a `0x00`
//! inserted after every `0xFF`.

use crate::error::Result;

/// An integer that can be converted to and from synchsafe variants
pub trait SynchsafeInteger: Sized {
	/// Create a synchsafe integer
	///
	/// # Errors
	///
	/// `self` doesn't fit in 28 bits
	///
	/// # Examples
	///
	/// ```rust
	/// use entag::id3::v2::util::synchsafe::SynchsafeInteger;
	///
	/// # fn main() -> entag::error::Result<()> {
	/// // Maximum value we can represent in a synchsafe u32
	/// let unsynch_number = 0xFFF_FFFF_u32;
	/// let synch_number = unsynch_number.synch()?;
	///
	/// // Each byte should have 7 set bits and an MSB of 0
	/// assert_eq!(synch_number, 0b01111111_01111111_01111111_01111111_u32);
	/// # Ok(()) }
	/// ```
	fn synch(self) -> Result<Self>;

	/// Unsynchronise a synchsafe integer
	///
	/// # Examples
	///
	/// ```rust
	/// use entag::id3::v2::util::synchsafe::SynchsafeInteger;
	///
	/// // 100, as stored in an ID3v2 header
	/// assert_eq!(0x0000_0064_u32.unsynch(), 100);
	/// // 0x80 and up need 2 bytes
	/// assert_eq!(0x0000_0100_u32.unsynch(), 128);
	/// ```
	fn unsynch(self) -> Self;
}

impl SynchsafeInteger for u32 {
	fn synch(self) -> Result<Self> {
		const MAXIMUM_INTEGER: u32 = 0x0FFF_FFFF;

		if self > MAXIMUM_INTEGER {
			crate::macros::err!(TooMuchData);
		}

		Ok((self & 0x7F)
			| ((self & (0x7F << 7)) << 1)
			| ((self & (0x7F << 14)) << 2)
			| ((self & (0x7F << 21)) << 3))
	}

	fn unsynch(self) -> Self {
		((self & 0x7F00_0000) >> 3)
			| ((self & 0x7F_0000) >> 2)
			| ((self & 0x7F00) >> 1)
			| (self & 0x7F)
	}
}

/// Remove the `0x00` bytes inserted after every `0xFF`
///
/// A `0xFF` followed by anything else is left untouched.
///
/// # Examples
///
/// ```rust
/// use entag::id3::v2::util::synchsafe::resynchronise;
///
/// let content = [0xFF, 0x00, 0x1A, 0xFF, 0x00, 0x15];
/// assert_eq!(resynchronise(&content), [0xFF, 0x1A, 0xFF, 0x15]);
/// ```
pub fn resynchronise(content: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(content.len());

	let mut previous_ff = false;
	for &byte in content {
		if previous_ff && byte == 0 {
			previous_ff = false;
			continue;
		}

		previous_ff = byte == 0xFF;
		out.push(byte);
	}

	out
}
