//! Candidate character encodings for uploaded bytes.

use std::borrow::Cow;
use std::fmt;

use encoding_rs::{UTF_8, WINDOWS_1252};
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// A character encoding tried when decoding an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    Utf8,
    Latin1,
    Iso8859_1,
    Windows1252,
}

impl TextEncoding {
    /// Default try order.
    pub const CANDIDATES: [TextEncoding; 4] = [
        TextEncoding::Utf8,
        TextEncoding::Latin1,
        TextEncoding::Iso8859_1,
        TextEncoding::Windows1252,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
            Self::Iso8859_1 => "iso-8859-1",
            Self::Windows1252 => "windows-1252",
        }
    }

    /// Decode bytes strictly; malformed input is an error, never replaced.
    ///
    /// Latin-1 and ISO-8859-1 map every byte to the code point of the same
    /// value, so they always succeed.
    pub fn decode(self, bytes: &[u8]) -> Result<Cow<'_, str>> {
        let decoded = match self {
            Self::Utf8 => UTF_8.decode_without_bom_handling_and_without_replacement(bytes),
            Self::Latin1 | Self::Iso8859_1 => Some(encoding_rs::mem::decode_latin1(bytes)),
            Self::Windows1252 => {
                WINDOWS_1252.decode_without_bom_handling_and_without_replacement(bytes)
            }
        };
        decoded.ok_or(IngestError::Undecodable { encoding: self })
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
