use crate::error::Result;
use crate::properties::{EncodingInfo, clamp_i32};

use std::io::Read;
use std::time::Duration;

use byteorder::{BigEndian, ReadBytesExt};

pub(super) fn read_properties<R>(stream_info: &mut R, stream_length: u64) -> Result<EncodingInfo>
where
	R: Read,
{
	// Skip 4 bytes
	// Minimum block size (2)
	// Maximum block size (2)
	stream_info.read_u32::<BigEndian>()?;

	// Skip 6 bytes
	// Minimum frame size (3)
	// Maximum frame size (3)
	stream_info.read_uint::<BigEndian>(6)?;

	// Read 4 bytes
	// Sample rate (20 bits)
	// Number of channels (3 bits)
	// Bits per sample (5 bits)
	// Total samples (first 4 bits)
	let info = stream_info.read_u32::<BigEndian>()?;

	let sample_rate = info >> 12;
	let channels = ((info >> 9) & 7) + 1;
	let bits_per_sample = ((info >> 4) & 0b11111) + 1;

	// Read the remaining 32 bits of the total samples
	let total_samples =
		(u64::from(info & 0xF) << 32) | u64::from(stream_info.read_u32::<BigEndian>()?);

	// MD5 signature of the unencoded audio
	stream_info.read_u128::<BigEndian>()?;

	let mut properties = EncodingInfo {
		channel_number: clamp_i32(channels),
		sampling_rate: clamp_i32(sample_rate),
		encoding_type: format!("FLAC {bits_per_sample} bits"),
		vbr: true,
		..EncodingInfo::default()
	};

	if sample_rate > 0 && total_samples > 0 {
		let length = (u128::from(total_samples) * 1000) / u128::from(sample_rate);
		let length = u64::try_from(length).unwrap_or(u64::MAX);
		properties.set_duration(Duration::from_millis(length));

		if length > 0 && stream_length > 0 {
			properties.bitrate = clamp_i32((stream_length * 8) / length);
		}
	} else {
		log::warn!("FLAC: Unable to calculate length, the sample rate or total samples is 0");
	}

	Ok(properties)
}
