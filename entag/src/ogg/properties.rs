use crate::error::Result;
use crate::properties::{EncodingInfo, clamp_i32};
use crate::util::math::RoundedDivision;

use std::io::{Read, Seek, SeekFrom};
use std::time::Duration;

use byteorder::{LittleEndian, ReadBytesExt};
use ogg_pager::{Page, PageHeader};

struct VorbisIdentification {
	version: u32,
	channels: u8,
	sample_rate: u32,
	bitrate_maximum: i32,
	bitrate_nominal: i32,
	bitrate_minimum: i32,
}

impl VorbisIdentification {
	fn parse(packet: &[u8]) -> Result<Self> {
		// Skip the packet signature
		let content = &mut &packet[7..];

		Ok(Self {
			version: content.read_u32::<LittleEndian>()?,
			channels: content.read_u8()?,
			sample_rate: content.read_u32::<LittleEndian>()?,
			bitrate_maximum: content.read_i32::<LittleEndian>()?,
			bitrate_nominal: content.read_i32::<LittleEndian>()?,
			bitrate_minimum: content.read_i32::<LittleEndian>()?,
		})
	}

	fn is_vbr(&self) -> bool {
		!(self.bitrate_minimum == self.bitrate_nominal
			&& self.bitrate_nominal == self.bitrate_maximum)
	}
}

// The reader is expected to be positioned after the header packets
fn last_page_abgp<R>(data: &mut R) -> Option<u64>
where
	R: Read + Seek,
{
	let mut abgp = None;
	while let Ok(page) = Page::read(data) {
		abgp = Some(page.header().abgp);
	}

	abgp
}

pub(super) fn read_properties<R>(
	data: &mut R,
	first_page_header: &PageHeader,
	identification_packet: &[u8],
) -> Result<EncodingInfo>
where
	R: Read + Seek,
{
	let identification = VorbisIdentification::parse(identification_packet)?;

	let mut properties = EncodingInfo {
		channel_number: i32::from(identification.channels),
		sampling_rate: clamp_i32(identification.sample_rate),
		encoding_type: format!("Ogg Vorbis v{}", identification.version),
		vbr: identification.is_vbr(),
		..EncodingInfo::default()
	};

	let last_page_abgp = last_page_abgp(data);
	let file_length = data.seek(SeekFrom::End(0))?;

	let mut length_ms = 0;
	match last_page_abgp {
		Some(last_page_abgp) if identification.sample_rate > 0 => {
			let total_samples =
				u128::from(last_page_abgp.saturating_sub(first_page_header.abgp));

			if total_samples > 0 {
				length_ms = (total_samples * 1000)
					.div_round(u128::from(identification.sample_rate))
					as u64;
				properties.set_duration(Duration::from_millis(length_ms));
			} else {
				log::warn!("Vorbis: The file contains invalid PCM values, unable to calculate length");
			}
		},
		Some(_) => log::warn!("Vorbis: Sample rate = 0, unable to calculate length"),
		None => log::warn!("Vorbis: No audio pages found, unable to calculate length"),
	}

	if identification.bitrate_nominal > 0 {
		properties.bitrate = identification.bitrate_nominal / 1000;
	} else if length_ms > 0 {
		properties.bitrate = clamp_i32(file_length.saturating_mul(8) / length_ms);
	}

	Ok(properties)
}

#[cfg(test)]
mod tests {
	use super::VorbisIdentification;

	fn identification(min: i32, nominal: i32, max: i32) -> Vec<u8> {
		let mut packet = b"\x01vorbis".to_vec();
		packet.extend(0_u32.to_le_bytes());
		packet.push(2);
		packet.extend(44_100_u32.to_le_bytes());
		packet.extend(max.to_le_bytes());
		packet.extend(nominal.to_le_bytes());
		packet.extend(min.to_le_bytes());
		packet.extend([0xB8, 0x01]);
		packet
	}

	#[test_log::test]
	fn parse_identification() {
		let ident = VorbisIdentification::parse(&identification(0, 128_000, 0)).unwrap();
		assert_eq!(ident.channels, 2);
		assert_eq!(ident.sample_rate, 44_100);
		assert_eq!(ident.bitrate_nominal, 128_000);
		assert!(ident.is_vbr());
	}

	#[test_log::test]
	fn fixed_bitrate() {
		let ident =
			VorbisIdentification::parse(&identification(128_000, 128_000, 128_000)).unwrap();
		assert!(!ident.is_vbr());
	}

	#[test_log::test]
	fn truncated_identification() {
		let packet = identification(0, 0, 0);
		assert!(VorbisIdentification::parse(&packet[..12]).is_err());
	}
}
