use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::decode_err;
use crate::properties::EncodingInfo;
use crate::properties::clamp_i32;

use std::io::{Read, Seek, SeekFrom};
use std::time::Duration;

use byteorder::{LittleEndian, ReadBytesExt};

struct MacHeader {
	version: u16,
	bit_depth: u16,
	channels: u16,
	sample_rate: u32,
	total_frames: u32,
	final_frame_blocks: u32,
	blocks_per_frame: u32,
}

/// Read the stream properties following the `MAC ` magic
///
/// `stream_len` is the length of the audio data, excluding all tags.
pub(super) fn read_properties<R>(
	data: &mut R,
	stream_len: u64,
	parse_mode: ParsingMode,
) -> Result<EncodingInfo>
where
	R: Read + Seek,
{
	let version = data
		.read_u16::<LittleEndian>()
		.map_err(|_| decode_err!(Ape, "Unable to read APE tag version"))?;

	// Property reading differs between versions
	let header = if version >= 3980 {
		header_gt_3980(data, version)?
	} else {
		header_lt_3980(data, version)?
	};

	let mut properties = EncodingInfo::default();
	properties.encoding_type = format!("Monkey's Audio v{version}");
	properties.extra_encoding_infos = format!("{} bits", header.bit_depth);
	properties.channel_number = i32::from(header.channels);
	properties.sampling_rate = clamp_i32(header.sample_rate);

	if let Err(e) = verify(&header) {
		if parse_mode == ParsingMode::Strict {
			return Err(e);
		}

		log::warn!("Unable to determine the APE duration: {e}");
		return Ok(properties);
	}

	let mut total_samples = u64::from(header.final_frame_blocks);
	if header.total_frames > 1 {
		total_samples += u64::from(header.blocks_per_frame) * u64::from(header.total_frames - 1);
	}

	if header.sample_rate > 0 {
		let length = (total_samples as f64 * 1000.0) / f64::from(header.sample_rate);

		properties.set_duration(Duration::from_millis((length + 0.5) as u64));
		if length > 0.0 {
			properties.bitrate = ((stream_len as f64) * 8.0 / length + 0.5) as i32;
		}
	}

	Ok(properties)
}

fn header_gt_3980<R>(data: &mut R, version: u16) -> Result<MacHeader>
where
	R: Read + Seek,
{
	// First read the file descriptor
	let mut descriptor = [0; 46];
	data.read_exact(&mut descriptor).map_err(|_| {
		decode_err!(
			Ape,
			"Not enough data left in reader to finish file descriptor"
		)
	})?;

	// The only piece of information we need from the file descriptor
	let descriptor_len = u32::from_le_bytes([
		descriptor[2],
		descriptor[3],
		descriptor[4],
		descriptor[5],
	]);

	// The descriptor should be 52 bytes long (including ['M', 'A', 'C', ' ']
	// Anything extra is unknown, and just gets skipped
	if descriptor_len > 52 {
		data.seek(SeekFrom::Current(i64::from(descriptor_len - 52)))?;
	}

	// Move on to the header
	let mut header = [0; 24];
	data.read_exact(&mut header)
		.map_err(|_| decode_err!(Ape, "Not enough data left in reader to finish MAC header"))?;

	// Skip the first 4 bytes of the header
	// Compression type (2)
	// Format flags (2)
	let header_read = &mut &header[4..];

	let blocks_per_frame = header_read.read_u32::<LittleEndian>()?;
	let final_frame_blocks = header_read.read_u32::<LittleEndian>()?;
	let total_frames = header_read.read_u32::<LittleEndian>()?;

	Ok(MacHeader {
		version,
		bit_depth: header_read.read_u16::<LittleEndian>()?,
		channels: header_read.read_u16::<LittleEndian>()?,
		sample_rate: header_read.read_u32::<LittleEndian>()?,
		total_frames,
		final_frame_blocks,
		blocks_per_frame,
	})
}

fn header_lt_3980<R>(data: &mut R, version: u16) -> Result<MacHeader>
where
	R: Read,
{
	// Versions < 3980 don't have a descriptor
	let mut header = [0; 26];
	data.read_exact(&mut header)
		.map_err(|_| decode_err!(Ape, "Not enough data left in reader to finish MAC header"))?;

	let header_reader = &mut &header[..];

	let compression_level = header_reader.read_u16::<LittleEndian>()?;
	let format_flags = header_reader.read_u16::<LittleEndian>()?;
	let bit_depth = if format_flags & 0b1 == 1 {
		8
	} else if format_flags & 0b1000 == 8 {
		24
	} else {
		16
	};

	let blocks_per_frame = match version {
		_ if version >= 3950 => 73728 * 4,
		_ if version >= 3900 || (version >= 3800 && compression_level >= 4000) => 73728,
		_ => 9216,
	};

	let channels = header_reader.read_u16::<LittleEndian>()?;
	let sample_rate = header_reader.read_u32::<LittleEndian>()?;

	// Skipping 8 bytes
	// WAV header length (4)
	// WAV tail length (4)
	let mut _skip = [0; 8];
	header_reader.read_exact(&mut _skip)?;

	Ok(MacHeader {
		version,
		bit_depth,
		channels,
		sample_rate,
		total_frames: header_reader.read_u32::<LittleEndian>()?,
		final_frame_blocks: header_reader.read_u32::<LittleEndian>()?,
		blocks_per_frame,
	})
}

/// Verifies the channel count falls within the bounds of the spec, and we have some audio frames to work with.
fn verify(header: &MacHeader) -> Result<()> {
	if !(1..=32).contains(&header.channels) {
		decode_err!(@BAIL Ape, "File has an invalid channel count (must be between 1 and 32 inclusive)");
	}

	if header.total_frames == 0 {
		decode_err!(@BAIL Ape, "File contains no frames");
	}

	log::trace!("MAC v{} stream with {} frames", header.version, header.total_frames);
	Ok(())
}
