use std::time::Duration;

/// Various *immutable* stream parameters
///
/// Integer values that could not be determined are [`EncodingInfo::UNKNOWN`].
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub struct EncodingInfo {
	pub(crate) bitrate: i32,
	pub(crate) channel_number: i32,
	pub(crate) encoding_type: String,
	pub(crate) extra_encoding_infos: String,
	pub(crate) sampling_rate: i32,
	pub(crate) length: i32,
	pub(crate) vbr: bool,
	pub(crate) duration: Duration,
}

impl Default for EncodingInfo {
	fn default() -> Self {
		Self {
			bitrate: Self::UNKNOWN,
			channel_number: Self::UNKNOWN,
			encoding_type: String::new(),
			extra_encoding_infos: String::new(),
			sampling_rate: Self::UNKNOWN,
			length: Self::UNKNOWN,
			vbr: false,
			duration: Duration::ZERO,
		}
	}
}

impl EncodingInfo {
	/// The value of every integer field that could not be determined
	pub const UNKNOWN: i32 = -1;

	/// Bitrate (kbps)
	pub fn bitrate(&self) -> i32 {
		self.bitrate
	}

	/// Channel count
	pub fn channel_number(&self) -> i32 {
		self.channel_number
	}

	/// A short description of the codec, such as `FLAC 16 bits`
	pub fn encoding_type(&self) -> &str {
		&self.encoding_type
	}

	/// Codec specific details, such as the channel mode or encoder profile
	pub fn extra_encoding_infos(&self) -> &str {
		&self.extra_encoding_infos
	}

	/// Sample rate (Hz)
	pub fn sampling_rate(&self) -> i32 {
		self.sampling_rate
	}

	/// Length in whole seconds
	pub fn length(&self) -> i32 {
		self.length
	}

	/// Whether the stream uses a variable bitrate
	pub fn is_vbr(&self) -> bool {
		self.vbr
	}

	/// The precise duration of the stream
	pub fn duration(&self) -> Duration {
		self.duration
	}

	pub(crate) fn set_duration(&mut self, duration: Duration) {
		self.duration = duration;
		self.length = clamp_i32(duration.as_secs());
	}
}

// Anything that doesn't fit is treated as unknown
pub(crate) fn clamp_i32<T>(value: T) -> i32
where
	T: TryInto<i32>,
{
	value.try_into().unwrap_or(EncodingInfo::UNKNOWN)
}
