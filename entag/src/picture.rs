//! Format-agnostic picture handling

use crate::config::ParsingMode;
use crate::error::{EntagError, ErrorKind, Result};
use crate::macros::{err, try_vec};

use std::fmt::{Debug, Display, Formatter};
use std::io::{Cursor, Read};

use byteorder::{BigEndian, ReadBytesExt as _};
use data_encoding::BASE64;

/// MIME types for pictures.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum MimeType {
	/// PNG image
	Png,
	/// JPEG image
	Jpeg,
	/// TIFF image
	Tiff,
	/// BMP image
	Bmp,
	/// GIF image
	Gif,
	/// Some unknown MIME type
	Unknown(String),
}

impl MimeType {
	/// Get a `MimeType` from a string
	///
	/// # Examples
	///
	/// ```rust
	/// use entag::picture::MimeType;
	///
	/// assert_eq!(MimeType::from_str("image/JPEG"), MimeType::Jpeg);
	/// ```
	#[must_use]
	#[allow(clippy::should_implement_trait)] // Infallible in contrast to FromStr
	pub fn from_str(mime_type: &str) -> Self {
		match &*mime_type.to_lowercase() {
			"image/jpeg" | "image/jpg" => Self::Jpeg,
			"image/png" => Self::Png,
			"image/tiff" => Self::Tiff,
			"image/bmp" => Self::Bmp,
			"image/gif" => Self::Gif,
			_ => Self::Unknown(mime_type.to_owned()),
		}
	}

	/// Get a &str from a `MimeType`
	#[must_use]
	pub fn as_str(&self) -> &str {
		match self {
			MimeType::Jpeg => "image/jpeg",
			MimeType::Png => "image/png",
			MimeType::Tiff => "image/tiff",
			MimeType::Bmp => "image/bmp",
			MimeType::Gif => "image/gif",
			MimeType::Unknown(unknown) => unknown,
		}
	}

	// ID3v2.2 `PIC` frames use a 3 character image format
	pub(crate) fn from_id3v22_format(format: &[u8; 3]) -> Option<Self> {
		match format {
			b"PNG" => Some(Self::Png),
			b"JPG" => Some(Self::Jpeg),
			b"BMP" => Some(Self::Bmp),
			b"GIF" => Some(Self::Gif),
			b"TIF" => Some(Self::Tiff),
			_ => None,
		}
	}
}

impl Display for MimeType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The picture type, according to ID3v2 APIC
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum PictureType {
	Other,
	Icon,
	OtherIcon,
	CoverFront,
	CoverBack,
	Leaflet,
	Media,
	LeadArtist,
	Artist,
	Conductor,
	Band,
	Composer,
	Lyricist,
	RecordingLocation,
	DuringRecording,
	DuringPerformance,
	ScreenCapture,
	BrightFish,
	Illustration,
	BandLogo,
	PublisherLogo,
	Undefined(u8),
}

// Indexed by the APIC picture type byte
const PICTURE_TYPES: [PictureType; 21] = [
	PictureType::Other,
	PictureType::Icon,
	PictureType::OtherIcon,
	PictureType::CoverFront,
	PictureType::CoverBack,
	PictureType::Leaflet,
	PictureType::Media,
	PictureType::LeadArtist,
	PictureType::Artist,
	PictureType::Conductor,
	PictureType::Band,
	PictureType::Composer,
	PictureType::Lyricist,
	PictureType::RecordingLocation,
	PictureType::DuringRecording,
	PictureType::DuringPerformance,
	PictureType::ScreenCapture,
	PictureType::BrightFish,
	PictureType::Illustration,
	PictureType::BandLogo,
	PictureType::PublisherLogo,
];

impl PictureType {
	/// Get a `u8` from a `PictureType` according to ID3v2 APIC
	pub fn as_u8(&self) -> u8 {
		if let Self::Undefined(byte) = self {
			return *byte;
		}

		PICTURE_TYPES
			.iter()
			.position(|ty| ty == self)
			.map_or(0, |pos| pos as u8)
	}

	/// Get a `PictureType` from a u8 according to ID3v2 APIC
	pub fn from_u8(byte: u8) -> Self {
		PICTURE_TYPES
			.get(usize::from(byte))
			.copied()
			.unwrap_or(Self::Undefined(byte))
	}
}

/// Information about a [`Picture`]
///
/// This information is only stored in FLAC's `METADATA_BLOCK_PICTURE`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct PictureInformation {
	/// The picture's width in pixels
	pub width: u32,
	/// The picture's height in pixels
	pub height: u32,
	/// The picture's color depth in bits per pixel
	pub color_depth: u32,
	/// The number of colors used
	pub num_colors: u32,
}

/// Represents a picture.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Picture {
	pub(crate) pic_type: PictureType,
	pub(crate) mime_type: Option<MimeType>,
	pub(crate) description: Option<String>,
	pub(crate) data: Vec<u8>,
}

impl Debug for Picture {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Picture")
			.field("pic_type", &self.pic_type)
			.field("mime_type", &self.mime_type)
			.field("description", &self.description)
			.field("data", &format!("<{} bytes>", self.data.len()))
			.finish()
	}
}

impl Picture {
	/// Create a new `Picture`
	///
	/// `data` is not verified against `mime_type`.
	pub fn new(
		pic_type: PictureType,
		mime_type: Option<MimeType>,
		description: Option<String>,
		data: Vec<u8>,
	) -> Self {
		Self {
			pic_type,
			mime_type,
			description,
			data,
		}
	}

	/// Returns the [`PictureType`]
	pub fn pic_type(&self) -> PictureType {
		self.pic_type
	}

	/// Returns the [`MimeType`]
	pub fn mime_type(&self) -> Option<&MimeType> {
		self.mime_type.as_ref()
	}

	pub(crate) fn mime_str(&self) -> &str {
		match self.mime_type.as_ref() {
			Some(mime_type) => mime_type.as_str(),
			None => "",
		}
	}

	/// Returns the description
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Returns the picture data
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Consumes a [`Picture`], returning its data
	pub fn into_data(self) -> Vec<u8> {
		self.data
	}

	/// Convert a [`Picture`] to a FLAC `METADATA_BLOCK_PICTURE` body
	///
	/// With `encode`, the body is base64 encoded for use as a Vorbis comment value.
	pub fn as_flac_bytes(&self, picture_information: PictureInformation, encode: bool) -> Vec<u8> {
		let mut data = Vec::<u8>::new();

		let mime_str = self.mime_str();
		let description = self.description.as_deref().unwrap_or_default();

		data.extend(u32::from(self.pic_type.as_u8()).to_be_bytes());
		data.extend((mime_str.len() as u32).to_be_bytes());
		data.extend(mime_str.as_bytes());
		data.extend((description.len() as u32).to_be_bytes());
		data.extend(description.as_bytes());

		data.extend(picture_information.width.to_be_bytes());
		data.extend(picture_information.height.to_be_bytes());
		data.extend(picture_information.color_depth.to_be_bytes());
		data.extend(picture_information.num_colors.to_be_bytes());

		data.extend((self.data.len() as u32).to_be_bytes());
		data.extend(&self.data);

		if encode {
			BASE64.encode(&data).into_bytes()
		} else {
			data
		}
	}

	/// Get a [`Picture`] from a FLAC `METADATA_BLOCK_PICTURE` body
	///
	/// With `encoded`, `bytes` is the base64 encoded Vorbis comment value.
	///
	/// # Errors
	///
	/// This function will return [`NotAPicture`][ErrorKind::NotAPicture] if
	/// at any point it's unable to parse the data
	pub fn from_flac_bytes(
		bytes: &[u8],
		encoded: bool,
		parse_mode: ParsingMode,
	) -> Result<(Self, PictureInformation)> {
		if encoded {
			let data = BASE64
				.decode(bytes)
				.map_err(|_| EntagError::new(ErrorKind::NotAPicture))?;
			Self::from_flac_bytes_inner(&data, parse_mode)
		} else {
			Self::from_flac_bytes_inner(bytes, parse_mode)
		}
	}

	fn from_flac_bytes_inner(
		content: &[u8],
		parse_mode: ParsingMode,
	) -> Result<(Self, PictureInformation)> {
		// Type, mime length, description length, 4 info fields, data length
		if content.len() < 32 {
			err!(NotAPicture);
		}

		let mut reader = Cursor::new(content);

		let pic_ty = reader.read_u32::<BigEndian>()?;

		// APIC only has a single byte for the type
		if pic_ty > 255 && parse_mode == ParsingMode::Strict {
			err!(NotAPicture);
		}

		let mime_type_str = read_flac_string(&mut reader)?;
		let description = read_flac_string(&mut reader)?;

		let information = PictureInformation {
			width: reader.read_u32::<BigEndian>()?,
			height: reader.read_u32::<BigEndian>()?,
			color_depth: reader.read_u32::<BigEndian>()?,
			num_colors: reader.read_u32::<BigEndian>()?,
		};

		let data_len = reader.read_u32::<BigEndian>()? as usize;
		let remaining = content.len() - reader.position() as usize;
		if data_len > remaining {
			err!(SizeMismatch);
		}

		let mut data = try_vec![0; data_len];
		reader.read_exact(&mut data)?;

		let mime_type = (!mime_type_str.is_empty()).then(|| MimeType::from_str(&mime_type_str));
		let description = (!description.is_empty()).then_some(description);

		Ok((
			Self {
				pic_type: PictureType::from_u8(pic_ty as u8),
				mime_type,
				description,
				data,
			},
			information,
		))
	}
}

fn read_flac_string(reader: &mut Cursor<&[u8]>) -> Result<String> {
	let len = reader.read_u32::<BigEndian>()? as usize;
	let remaining = reader.get_ref().len() - reader.position() as usize;
	if len > remaining {
		err!(SizeMismatch);
	}

	let mut bytes = try_vec![0; len];
	reader.read_exact(&mut bytes)?;

	String::from_utf8(bytes).map_err(|_| EntagError::new(ErrorKind::NotAPicture))
}
