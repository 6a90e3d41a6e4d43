//! Storage formats for page tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// How a page's tables are serialized by the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageFormat {
    /// CSV text inlined into the page.
    #[default]
    CsvEmbedded,

    /// JSON records inlined into the page.
    JsonEmbedded,

    /// CSV files beside the page.
    CsvExternal,

    /// JSON files beside the page.
    JsonExternal,

    /// Parquet files beside the page.
    Parquet,
}

impl StorageFormat {
    /// Every recognized format, in token order.
    pub const ALL: [StorageFormat; 5] = [
        StorageFormat::CsvEmbedded,
        StorageFormat::JsonEmbedded,
        StorageFormat::CsvExternal,
        StorageFormat::JsonExternal,
        StorageFormat::Parquet,
    ];

    /// The canonical token for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageFormat::CsvEmbedded => "csv_embedded",
            StorageFormat::JsonEmbedded => "json_embedded",
            StorageFormat::CsvExternal => "csv_external",
            StorageFormat::JsonExternal => "json_external",
            StorageFormat::Parquet => "parquet",
        }
    }

    /// Whether table data lives inside the HTML page.
    pub fn is_embedded(&self) -> bool {
        matches!(self, StorageFormat::CsvEmbedded | StorageFormat::JsonEmbedded)
    }

    /// File extension used for external data files.
    pub fn file_extension(&self) -> Option<&'static str> {
        match self {
            StorageFormat::CsvExternal => Some("csv"),
            StorageFormat::JsonExternal => Some("json"),
            StorageFormat::Parquet => Some("parquet"),
            StorageFormat::CsvEmbedded | StorageFormat::JsonEmbedded => None,
        }
    }
}

impl fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StorageFormat {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        StorageFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == token)
            .ok_or_else(|| Error::InvalidStorageFormat {
                token: token.to_string(),
            })
    }
}

impl From<StorageFormat> for String {
    fn from(format: StorageFormat) -> Self {
        format.as_str().to_string()
    }
}
