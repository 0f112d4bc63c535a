use thiserror::Error;

#[derive(Error, Debug)]
pub enum IOEntry {
    #[error("Embedded asset {0} is missing")]
    MissingAssetError(String),
    #[error("Failed to parse font data")]
    FontParseError,
    #[error("Failed to decode image {0}: {1}")]
    ImageDecodeError(String, String),
    #[error("Failed to encode image: {0}")]
    ImageEncodeError(String),
}

impl From<IOEntry> for String {
    #[inline(always)]
    fn from(value: IOEntry) -> Self {
        value.to_string()
    }
}
