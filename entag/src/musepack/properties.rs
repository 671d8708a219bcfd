use super::constants::{FREQUENCY_TABLE, MPC_FRAME_LENGTH, PROFILES};
use crate::properties::{EncodingInfo, clamp_i32};
use crate::util::num::read_le_uint;

use std::time::Duration;

// http://trac.musepack.net/musepack/wiki/SV7Specification

pub(super) const STREAM_HEADER_SIZE: usize = 25;

/// The SV7 stream header, following the `MP+` marker
pub(super) struct StreamHeader {
	pub(super) version: u8,
	pub(super) frame_count: u32,
	pub(super) profile: u8,
	pub(super) sample_frequency: u32,
	pub(super) encoder_version: u8,
}

impl StreamHeader {
	pub(super) fn parse(header: &[u8; STREAM_HEADER_SIZE]) -> Self {
		Self {
			version: header[0] & 0x0F,
			frame_count: read_le_uint(header, 1, 4) as u32,
			profile: header[7] >> 4,
			sample_frequency: FREQUENCY_TABLE[usize::from(header[7] & 0x03)],
			encoder_version: header[24],
		}
	}
}

pub(super) fn encoder_name(version: u8) -> String {
	match version {
		0 => String::from("Buggy encoder, <1.05"),
		v if v % 10 == 0 => format!("Release {}.{}", v / 100, (v / 10) % 10),
		v if v % 2 == 0 => format!("Beta {}.{:02}", v / 100, v % 100),
		v => format!("--Alpha-- {}.{:02}", v / 100, v % 100),
	}
}

pub(super) fn read_properties(header: &StreamHeader, file_length: u64) -> EncodingInfo {
	if header.version != 7 {
		log::warn!(
			"MPC: Unsupported stream version {}, unable to read properties",
			header.version
		);

		return EncodingInfo {
			encoding_type: format!("MPEGplus (MPC) rev.{}", header.version),
			..EncodingInfo::default()
		};
	}

	let mut properties = EncodingInfo {
		channel_number: 2,
		sampling_rate: clamp_i32(header.sample_frequency),
		encoding_type: String::from("MPEGplus (MPC) rev.7"),
		extra_encoding_infos: format!(
			"Profile: {}, Encoder: {}",
			PROFILES[usize::from(header.profile)],
			encoder_name(header.encoder_version)
		),
		// Every frame may use a different bitrate
		vbr: true,
		..EncodingInfo::default()
	};

	let total_samples = u64::from(header.frame_count) * MPC_FRAME_LENGTH;
	let length_ms = (total_samples * 1000) / u64::from(header.sample_frequency);
	properties.set_duration(Duration::from_millis(length_ms));

	let length_secs = length_ms / 1000;
	if length_secs > 0 {
		properties.bitrate = clamp_i32((file_length / 1000) * 8 / length_secs);
	}

	properties
}
