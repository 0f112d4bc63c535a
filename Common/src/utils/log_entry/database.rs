use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseEntry {
    #[error("Failed to open database {0}: {1}")]
    ConnectError(String, String),
    #[error("Failed to prepare database schema: {0}")]
    SchemaError(String),
    #[error("Failed to execute query: {0}")]
    QueryError(String),
}

impl From<DatabaseEntry> for String {
    #[inline(always)]
    fn from(value: DatabaseEntry) -> Self {
        value.to_string()
    }
}
