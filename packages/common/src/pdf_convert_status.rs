use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a stored file stands in the PDF conversion lifecycle.
///
/// Files start out `NotConverted`; the conversion collaborator moves them to
/// one of the terminal states. Nothing here enforces the transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PdfConvertStatus {
    /// Waiting for the conversion collaborator.
    NotConverted,
    /// A PDF rendition exists.
    Converted,
    /// The content type cannot be converted.
    NotSupported,
    /// The content is already a PDF or an image, or there is no content.
    NotNeeded,
}

impl PdfConvertStatus {
    /// Returns true once no further conversion work is expected.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::NotConverted)
    }

    /// Returns true if a PDF payload is expected to be populated.
    pub fn has_pdf(&self) -> bool {
        matches!(self, Self::Converted)
    }

    /// All possible status values.
    pub const ALL: &'static [PdfConvertStatus] = &[
        Self::NotConverted,
        Self::Converted,
        Self::NotSupported,
        Self::NotNeeded,
    ];

    /// All terminal statuses.
    pub const TERMINAL: &'static [PdfConvertStatus] =
        &[Self::Converted, Self::NotSupported, Self::NotNeeded];

    /// Returns the storage representation (SCREAMING_SNAKE_CASE).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotConverted => "NOT_CONVERTED",
            Self::Converted => "CONVERTED",
            Self::NotSupported => "NOT_SUPPORTED",
            Self::NotNeeded => "NOT_NEEDED",
        }
    }
}

impl fmt::Display for PdfConvertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for PdfConvertStatus {
    fn default() -> Self {
        Self::NotConverted
    }
}

/// Error when parsing an invalid conversion status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    invalid: String,
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid PDF conversion status '{}'. Valid values: {}",
            self.invalid,
            PdfConvertStatus::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for PdfConvertStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_CONVERTED" => Ok(Self::NotConverted),
            "CONVERTED" => Ok(Self::Converted),
            "NOT_SUPPORTED" => Ok(Self::NotSupported),
            "NOT_NEEDED" => Ok(Self::NotNeeded),
            _ => Err(ParseStatusError {
                invalid: s.to_string(),
            }),
        }
    }
}
