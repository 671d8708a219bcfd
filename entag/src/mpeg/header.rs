use super::constants::{BITRATES, PADDING_SIZES, SAMPLE_RATES, SAMPLES, SIDE_INFORMATION_SIZES};
use crate::error::Result;
use crate::macros::decode_err;

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

pub(super) fn verify_frame_sync(frame_sync: [u8; 2]) -> bool {
	frame_sync[0] == 0xFF && frame_sync[1] >> 5 == 0b111
}

// Used to compare the versions, layers, and sample rates of two frame headers.
// If they aren't equal, something is broken.
pub(super) const HEADER_MASK: u32 = 0xFFFE_0C00;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum MpegVersion {
	V1,
	V2,
	V2_5,
}

impl MpegVersion {
	pub(super) fn as_str(self) -> &'static str {
		match self {
			MpegVersion::V1 => "1",
			MpegVersion::V2 => "2",
			MpegVersion::V2_5 => "2.5",
		}
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum Layer {
	Layer1 = 1,
	Layer2 = 2,
	Layer3 = 3,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum ChannelMode {
	Stereo = 0,
	JointStereo = 1,
	/// Two independent mono channels
	DualChannel = 2,
	SingleChannel = 3,
}

impl ChannelMode {
	pub(super) fn as_str(self) -> &'static str {
		match self {
			ChannelMode::Stereo => "Stereo",
			ChannelMode::JointStereo => "Joint Stereo",
			ChannelMode::DualChannel => "Dual Channel",
			ChannelMode::SingleChannel => "Single Channel",
		}
	}

	pub(super) fn channels(self) -> u8 {
		match self {
			ChannelMode::SingleChannel => 1,
			_ => 2,
		}
	}
}

#[derive(Copy, Clone, Debug)]
pub(super) struct FrameHeader {
	pub(super) sample_rate: u32,
	/// The full frame length, including this header
	pub(super) len: u32,
	/// The offset of the Xing/Info header from the frame start
	pub(super) data_start: u32,
	pub(super) samples: u16,
	pub(super) bitrate: u32,
	pub(super) version: MpegVersion,
	pub(super) layer: Layer,
	pub(super) channel_mode: ChannelMode,
}

impl FrameHeader {
	pub(super) fn read(data: u32) -> Option<Self> {
		if !verify_frame_sync([(data >> 24) as u8, (data >> 16) as u8]) {
			return None;
		}

		let version = match (data >> 19) & 0b11 {
			0b00 => MpegVersion::V2_5,
			0b10 => MpegVersion::V2,
			0b11 => MpegVersion::V1,
			_ => return None,
		};

		let version_index = if version == MpegVersion::V1 { 0 } else { 1 };

		let layer = match (data >> 17) & 0b11 {
			0b01 => Layer::Layer3,
			0b10 => Layer::Layer2,
			0b11 => Layer::Layer1,
			_ => {
				log::debug!("MPEG: Frame header uses a reserved layer");
				return None;
			},
		};

		let layer_index = (layer as usize) - 1;

		let bitrate_index = (data >> 12) & 0xF;
		let bitrate = BITRATES[version_index][layer_index][bitrate_index as usize];
		if bitrate == 0 {
			return None;
		}

		let sample_rate_index = (data >> 10) & 0b11;
		let sample_rate = match sample_rate_index {
			// This is invalid
			0b11 => return None,
			_ => SAMPLE_RATES[version as usize][sample_rate_index as usize],
		};

		let mut padding = 0;
		if (data >> 9) & 1 == 1 {
			padding = u32::from(PADDING_SIZES[layer_index]);
		}

		let channel_mode = match (data >> 6) & 0b11 {
			0b00 => ChannelMode::Stereo,
			0b01 => ChannelMode::JointStereo,
			0b10 => ChannelMode::DualChannel,
			_ => ChannelMode::SingleChannel,
		};

		let samples = SAMPLES[layer_index][version_index];
		let len = (u32::from(samples) * bitrate * 125 / sample_rate) + padding;

		Some(Self {
			sample_rate,
			len,
			data_start: SIDE_INFORMATION_SIZES[version_index][channel_mode as usize] + 4,
			samples,
			bitrate,
			version,
			layer,
			channel_mode,
		})
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum VbrHeaderType {
	Xing,
	Info,
	Vbri,
}

#[derive(Copy, Clone, Debug)]
pub(super) struct VbrHeader {
	pub(super) ty: VbrHeaderType,
	pub(super) frames: u32,
	pub(super) size: u32,
}

impl VbrHeader {
	pub(super) fn read(reader: &mut &[u8]) -> Result<Option<Self>> {
		let reader_len = reader.len();
		if reader_len < 4 {
			return Ok(None);
		}

		let mut header = [0; 4];
		reader.read_exact(&mut header)?;

		match &header {
			b"Xing" | b"Info" => {
				if reader_len < 16 {
					decode_err!(@BAIL Mpeg, "Xing header has an invalid size (< 16)");
				}

				let mut flags = [0; 4];
				reader.read_exact(&mut flags)?;

				if flags[3] & 0x03 != 0x03 {
					log::debug!(
						"MPEG: Xing header doesn't have required flags set (0x0001 and 0x0002)"
					);
					return Ok(None);
				}

				let frames = reader.read_u32::<BigEndian>()?;
				let size = reader.read_u32::<BigEndian>()?;

				let ty = if &header == b"Xing" {
					VbrHeaderType::Xing
				} else {
					VbrHeaderType::Info
				};

				Ok(Some(Self { ty, frames, size }))
			},
			b"VBRI" => {
				if reader_len < 18 {
					decode_err!(@BAIL Mpeg, "VBRI header has an invalid size (< 18)");
				}

				// Skip 6 bytes
				// Version ID (2)
				// Delay float (2)
				// Quality indicator (2)
				let _info = reader.read_uint::<BigEndian>(6)?;

				let size = reader.read_u32::<BigEndian>()?;
				let frames = reader.read_u32::<BigEndian>()?;

				Ok(Some(Self {
					ty: VbrHeaderType::Vbri,
					frames,
					size,
				}))
			},
			_ => Ok(None),
		}
	}

	pub(super) fn is_valid(&self) -> bool {
		self.frames > 0 && self.size > 0
	}
}

#[cfg(test)]
mod tests {
	use super::{ChannelMode, FrameHeader, Layer, MpegVersion, VbrHeader, VbrHeaderType};

	#[test_log::test]
	fn layer3_frame() {
		// MPEG-1 Layer 3, 128 kbps, 44.1 kHz, joint stereo
		let header = FrameHeader::read(0xFFFB_9064).unwrap();

		assert_eq!(header.version, MpegVersion::V1);
		assert_eq!(header.layer, Layer::Layer3);
		assert_eq!(header.bitrate, 128);
		assert_eq!(header.sample_rate, 44_100);
		assert_eq!(header.channel_mode, ChannelMode::JointStereo);
		assert_eq!(header.samples, 1152);
		assert_eq!(header.len, 417);
		assert_eq!(header.data_start, 36);
	}

	#[test_log::test]
	fn mpeg2_mono_with_padding() {
		// MPEG-2 Layer 3, 64 kbps, 22.05 kHz, padded, mono
		let header = FrameHeader::read(0xFFF3_82C0).unwrap();

		assert_eq!(header.version, MpegVersion::V2);
		assert_eq!(header.bitrate, 64);
		assert_eq!(header.sample_rate, 22_050);
		assert_eq!(header.channel_mode.channels(), 1);
		assert_eq!(header.samples, 576);
		assert_eq!(header.len, 576 * 64 * 125 / 22_050 + 1);
		assert_eq!(header.data_start, 13);
	}

	#[test_log::test]
	fn invalid_headers() {
		// No frame sync
		assert!(FrameHeader::read(0x0000_0000).is_none());
		// Reserved version
		assert!(FrameHeader::read(0xFFEB_9064).is_none());
		// Free format bitrate
		assert!(FrameHeader::read(0xFFFB_0064).is_none());
		// Reserved sample rate
		assert!(FrameHeader::read(0xFFFB_9C64).is_none());
	}

	#[test_log::test]
	fn xing_header() {
		let mut bytes = b"Xing".to_vec();
		bytes.extend([0, 0, 0, 0x03]);
		bytes.extend(100_u32.to_be_bytes());
		bytes.extend(41_700_u32.to_be_bytes());

		let vbr = VbrHeader::read(&mut &bytes[..]).unwrap().unwrap();
		assert_eq!(vbr.ty, VbrHeaderType::Xing);
		assert_eq!(vbr.frames, 100);
		assert_eq!(vbr.size, 41_700);
		assert!(vbr.is_valid());

		// Missing the frame and size flags
		bytes[7] = 0x01;
		assert!(VbrHeader::read(&mut &bytes[..]).unwrap().is_none());
	}

	#[test_log::test]
	fn vbri_header() {
		let mut bytes = b"VBRI".to_vec();
		bytes.extend([0; 6]);
		bytes.extend(5000_u32.to_be_bytes());
		bytes.extend(10_u32.to_be_bytes());

		let vbr = VbrHeader::read(&mut &bytes[..]).unwrap().unwrap();
		assert_eq!(vbr.ty, VbrHeaderType::Vbri);
		assert_eq!((vbr.frames, vbr.size), (10, 5000));
	}

	#[test_log::test]
	fn no_vbr_header() {
		assert!(VbrHeader::read(&mut &[0_u8; 32][..]).unwrap().is_none());
	}
}
