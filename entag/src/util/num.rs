/// Accumulate `bytes[start..=end]` with the lowest offset as the least significant byte
///
/// Bytes past the end of the slice are treated as zero. At most 8 bytes contribute.
pub(crate) fn read_le_uint(bytes: &[u8], start: usize, end: usize) -> u64 {
	let mut number = 0u64;

	for (i, byte) in bytes
		.iter()
		.skip(start)
		.take(end.saturating_sub(start) + 1)
		.take(8)
		.enumerate()
	{
		number |= u64::from(*byte) << (i * 8);
	}

	number
}

#[cfg(test)]
mod tests {
	use super::read_le_uint;

	#[test_log::test]
	fn little_endian_accumulation() {
		let bytes = [0x07, 0x10, 0x27, 0x00, 0x00, 0xFF];

		assert_eq!(read_le_uint(&bytes, 1, 4), 10_000);
		assert_eq!(read_le_uint(&bytes, 0, 0), 7);
		assert_eq!(read_le_uint(&bytes, 5, 5), 0xFF);
		// Out of range bytes contribute nothing
		assert_eq!(read_le_uint(&bytes, 5, 9), 0xFF);
	}
}
