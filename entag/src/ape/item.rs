use crate::ape::constants::INVALID_KEYS;
use crate::error::{EntagError, ErrorKind, Result};
use crate::tag::{TagField, TagTextField};
use crate::util::text::TextEncoding;

/// The value of an [`ApeItem`]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemValue {
	/// UTF-8 text, item type 0
	Text(String),
	/// Binary data, item type 1
	Binary(Vec<u8>),
	/// A UTF-8 locator of external information, item type 2
	Locator(String),
}

impl ItemValue {
	/// Returns the value if the variant is `Text` or `Locator`
	pub fn text(&self) -> Option<&str> {
		match self {
			Self::Text(text) | Self::Locator(text) => Some(text),
			Self::Binary(_) => None,
		}
	}

	/// Returns the value if the variant is `Binary`
	pub fn binary(&self) -> Option<&[u8]> {
		match self {
			Self::Binary(bin) => Some(bin),
			_ => None,
		}
	}

	fn as_bytes(&self) -> &[u8] {
		match self {
			Self::Text(text) | Self::Locator(text) => text.as_bytes(),
			Self::Binary(bin) => bin,
		}
	}

	fn item_type(&self) -> u32 {
		match self {
			Self::Text(_) => 0,
			Self::Binary(_) => 1,
			Self::Locator(_) => 2,
		}
	}
}

/// Represents an `APE` tag item
///
/// The restrictions for `APE` lie in the key rather than the value,
/// so these are still able to use [`ItemValue`]s
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApeItem {
	/// Whether or not to mark the item as read only
	pub read_only: bool,
	pub(crate) key: String,
	pub(crate) value: ItemValue,
}

impl ApeItem {
	/// Create an [`ApeItem`]
	///
	/// # Errors
	///
	/// * `key` is illegal ("ID3", "TAG", "OGGS", "MP+")
	/// * `key` has a bad length (must be 2 to 255, inclusive)
	/// * `key` contains invalid characters (must be in the range 0x20 to 0x7E, inclusive)
	///
	/// # Examples
	///
	/// ```rust
	/// use entag::ape::{ApeItem, ItemValue};
	///
	/// let item = ApeItem::new("Artist", ItemValue::Text(String::from("Foo")))?;
	/// assert_eq!(item.key(), "Artist");
	///
	/// assert!(ApeItem::new("TAG", ItemValue::Text(String::from("Foo"))).is_err());
	/// # Ok::<(), entag::error::EntagError>(())
	/// ```
	pub fn new(key: impl Into<String>, value: ItemValue) -> Result<Self> {
		let key = key.into();

		if INVALID_KEYS.contains(&key.to_uppercase().as_str()) {
			return Err(EntagError::new(ErrorKind::BadApeKey(key)));
		}

		if !(2..=255).contains(&key.len()) {
			return Err(EntagError::new(ErrorKind::BadApeKey(key)));
		}

		if key.bytes().any(|b| !(0x20..=0x7E).contains(&b)) {
			return Err(EntagError::new(ErrorKind::BadApeKey(key)));
		}

		Ok(Self {
			read_only: false,
			key,
			value,
		})
	}

	/// Create a text item, returning `None` if the key is invalid
	pub fn new_text(key: &str, text: &str) -> Option<Self> {
		Self::new(key, ItemValue::Text(text.to_owned())).ok()
	}

	/// Returns the item key
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Returns the item value
	pub fn value(&self) -> &ItemValue {
		&self.value
	}

	/// Whether the item holds binary data
	pub fn is_binary(&self) -> bool {
		matches!(self.value, ItemValue::Binary(_))
	}

	/// Create a copy of this item with new text, keeping the item type
	///
	/// This is `None` for binary items.
	pub fn with_text(&self, text: &str) -> Option<Self> {
		let value = match self.value {
			ItemValue::Text(_) => ItemValue::Text(text.to_owned()),
			ItemValue::Locator(_) => ItemValue::Locator(text.to_owned()),
			ItemValue::Binary(_) => return None,
		};

		Some(self.with_value(value))
	}

	/// Create a copy of this item with a new value
	pub fn with_value(&self, value: ItemValue) -> Self {
		Self {
			read_only: self.read_only,
			key: self.key.clone(),
			value,
		}
	}

	pub(crate) fn flags(&self) -> u32 {
		(self.value.item_type() << 1) | u32::from(self.read_only)
	}
}

impl TagField for ApeItem {
	fn id(&self) -> &str {
		&self.key
	}

	fn is_binary(&self) -> bool {
		ApeItem::is_binary(self)
	}

	fn is_empty(&self) -> bool {
		self.value.as_bytes().is_empty()
	}

	fn is_common(&self) -> bool {
		crate::ape::common_field(&self.key).is_some()
	}

	fn raw_content(&self) -> Result<Vec<u8>> {
		let value = self.value.as_bytes();
		let size =
			u32::try_from(value.len()).map_err(|_| EntagError::new(ErrorKind::TooMuchData))?;

		let mut bytes = Vec::with_capacity(9 + self.key.len() + value.len());
		bytes.extend(size.to_le_bytes());
		bytes.extend(self.flags().to_le_bytes());
		bytes.extend(self.key.as_bytes());
		bytes.push(0);
		bytes.extend(value);

		Ok(bytes)
	}
}

impl TagTextField for ApeItem {
	fn content(&self) -> &str {
		self.value.text().unwrap_or_default()
	}

	fn encoding(&self) -> TextEncoding {
		TextEncoding::UTF8
	}
}
