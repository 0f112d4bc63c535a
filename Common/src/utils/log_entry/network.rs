use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkEntry {
    #[error("Rejected detection backend host {0:?}")]
    InvalidHostError(String),
    #[error("Failed to reach detection backend {0}: {1}")]
    EstablishConnectionError(String, String),
    #[error("Detection backend {0} responded with status {1}")]
    BadStatusError(String, u16),
    #[error("Failed to parse detection backend response: {0}")]
    ResponseParseError(String),
}

impl From<NetworkEntry> for String {
    #[inline(always)]
    fn from(value: NetworkEntry) -> Self {
        value.to_string()
    }
}
