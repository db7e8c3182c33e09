use std::fs;
use std::path::Path;

use tracing::{debug, instrument};

use crate::error::{Error, Result};

/// Turns the raw bytes of an exported listing into text.
pub trait Decode {
	fn decode(&self, bytes: &[u8]) -> std::result::Result<String, &'static str>;
}

/// Text encodings the HP-15C emulator (and editors re-saving its files) produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
	/// The emulator's own export format; always starts with a byte-order mark.
	Utf16Le,
	Utf8,
	Latin1,
}

const UTF16LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16BE_BOM: &[u8] = &[0xFE, 0xFF];
const UTF32LE_BOM: &[u8] = &[0xFF, 0xFE, 0x00, 0x00];
const UTF32BE_BOM: &[u8] = &[0x00, 0x00, 0xFE, 0xFF];
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

impl Encoding {
	pub fn detect(bytes: &[u8]) -> std::result::Result<Self, &'static str> {
		if bytes.starts_with(UTF32LE_BOM) || bytes.starts_with(UTF32BE_BOM) {
			Err("UTF-32")
		} else if bytes.starts_with(UTF16LE_BOM) {
			Ok(Self::Utf16Le)
		} else if bytes.starts_with(UTF16BE_BOM) {
			Err("UTF-16 big-endian")
		} else if bytes.starts_with(UTF8_BOM) {
			Ok(Self::Utf8)
		} else if bytes.contains(&0) {
			Err("UTF-16 without byte-order mark, or binary data")
		} else if std::str::from_utf8(bytes).is_ok() {
			Ok(Self::Utf8)
		} else {
			Ok(Self::Latin1)
		}
	}

	pub fn decode(self, bytes: &[u8]) -> std::result::Result<String, &'static str> {
		match self {
			Self::Utf16Le => {
				let body = bytes.strip_prefix(UTF16LE_BOM).unwrap_or(bytes);
				if body.len() % 2 != 0 {
					return Err("truncated UTF-16");
				}
				let units: Vec<u16> = body
					.chunks_exact(2)
					.map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
					.collect();
				String::from_utf16(&units).map_err(|_| "invalid UTF-16")
			}
			Self::Utf8 => {
				let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
				String::from_utf8(body.to_vec()).map_err(|_| "invalid UTF-8")
			}
			Self::Latin1 => Ok(bytes.iter().copied().map(char::from).collect()),
		}
	}
}

/// Picks the encoding from the bytes themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct Detect;

impl Decode for Detect {
	fn decode(&self, bytes: &[u8]) -> std::result::Result<String, &'static str> {
		let encoding = Encoding::detect(bytes)?;
		debug!("detected {encoding:?}");
		encoding.decode(bytes)
	}
}

impl Decode for Encoding {
	fn decode(&self, bytes: &[u8]) -> std::result::Result<String, &'static str> {
		Encoding::decode(*self, bytes)
	}
}

#[instrument(skip(decoder))]
pub fn read_listing(path: &Path, decoder: &impl Decode) -> Result<String> {
	let bytes = fs::read(path).map_err(|e| Error::Io(path.to_path_buf(), e))?;
	decoder
		.decode(&bytes)
		.map_err(|found| Error::UnsupportedEncoding(path.to_path_buf(), found))
}
