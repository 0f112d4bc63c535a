use thiserror::Error;

#[derive(Error, Debug)]
pub enum MiscEntry {
    #[error("Invalid file name")]
    InvalidFileNameError,
    #[error("Unsupported file type")]
    UnsupportedFileTypeError,
    #[error("Submission {0} completed after being superseded")]
    StaleSubmissionEntry(u64),
}

impl From<MiscEntry> for String {
    #[inline(always)]
    fn from(value: MiscEntry) -> Self {
        value.to_string()
    }
}
