use super::header::{FrameHeader, VbrHeader, VbrHeaderType};
use crate::properties::{EncodingInfo, clamp_i32};
use crate::util::math::RoundedDivision;

use std::time::Duration;

/// Stream properties from the first frame, and a VBR header if one was found
///
/// `stream_length` is the number of bytes from the first frame to the end of the audio.
pub(super) fn read_properties(
	first_frame_header: &FrameHeader,
	vbr_header: Option<VbrHeader>,
	stream_length: u64,
) -> EncodingInfo {
	let mut properties = EncodingInfo {
		channel_number: i32::from(first_frame_header.channel_mode.channels()),
		sampling_rate: clamp_i32(first_frame_header.sample_rate),
		encoding_type: format!(
			"MPEG-{} Layer {}",
			first_frame_header.version.as_str(),
			first_frame_header.layer as u8
		),
		extra_encoding_infos: String::from(first_frame_header.channel_mode.as_str()),
		..EncodingInfo::default()
	};

	if let Some(vbr_header) = vbr_header.filter(VbrHeader::is_valid) {
		log::debug!("MPEG: Valid VBR header; using it to calculate duration");

		let sample_rate = u64::from(first_frame_header.sample_rate);
		let samples_per_frame = u64::from(first_frame_header.samples);
		let total_frames = u64::from(vbr_header.frames);

		let length = (samples_per_frame * 1000 * total_frames).div_round(sample_rate);
		properties.set_duration(Duration::from_millis(length));

		if length > 0 {
			properties.bitrate = clamp_i32((u64::from(vbr_header.size) * 8) / length);
		}

		// "Info" is written by encoders for CBR streams
		properties.vbr = vbr_header.ty != VbrHeaderType::Info;
		return properties;
	}

	log::debug!("MPEG: Using bitrate to estimate duration");

	properties.bitrate = clamp_i32(first_frame_header.bitrate);

	let length = (stream_length * 8).div_round(u64::from(first_frame_header.bitrate));
	properties.set_duration(Duration::from_millis(length));

	properties
}

#[cfg(test)]
mod tests {
	use super::read_properties;
	use crate::mpeg::header::{FrameHeader, VbrHeader, VbrHeaderType};

	use std::time::Duration;

	fn header() -> FrameHeader {
		FrameHeader::read(0xFFFB_9064).unwrap()
	}

	#[test_log::test]
	fn cbr_estimate() {
		// 10 seconds at 128 kbps
		let properties = read_properties(&header(), None, 160_000);

		assert_eq!(properties.encoding_type(), "MPEG-1 Layer 3");
		assert_eq!(properties.extra_encoding_infos(), "Joint Stereo");
		assert_eq!(properties.channel_number(), 2);
		assert_eq!(properties.sampling_rate(), 44_100);
		assert_eq!(properties.bitrate(), 128);
		assert_eq!(properties.duration(), Duration::from_secs(10));
		assert!(!properties.is_vbr());
	}

	#[test_log::test]
	fn xing_frame_count() {
		let vbr = VbrHeader {
			ty: VbrHeaderType::Xing,
			frames: 3828,
			size: 1_600_000,
		};

		let properties = read_properties(&header(), Some(vbr), 0);

		// 3828 * 1152 / 44100 = 99.9967s
		assert_eq!(properties.duration(), Duration::from_millis(99_997));
		assert_eq!(properties.length(), 99);
		assert_eq!(properties.bitrate(), 128);
		assert!(properties.is_vbr());
	}

	#[test_log::test]
	fn info_is_cbr() {
		let vbr = VbrHeader {
			ty: VbrHeaderType::Info,
			frames: 100,
			size: 41_700,
		};

		assert!(!read_properties(&header(), Some(vbr), 0).is_vbr());
	}

	#[test_log::test]
	fn invalid_vbr_header_is_ignored() {
		let vbr = VbrHeader {
			ty: VbrHeaderType::Xing,
			frames: 0,
			size: 0,
		};

		let properties = read_properties(&header(), Some(vbr), 16_000);
		assert_eq!(properties.duration(), Duration::from_secs(1));
		assert!(!properties.is_vbr());
	}
}
