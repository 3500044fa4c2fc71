use thiserror::Error;

/// Errors that abort a whole load call.
///
/// Only source-level failures belong here. Rows with unparsable or
/// out-of-range coordinates are dropped by policy, not raised; the loader
/// counts them in its [`LoadReport`](crate::loader::LoadReport) instead.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be opened, fetched, or read.
    #[error("source '{source}' could not be read: {cause}")]
    SourceUnreadable { source: String, cause: String },

    /// The source parsed as a table but lacks a required column.
    #[error("source '{source}' is missing required column {column}")]
    MissingColumn { source: String, column: String },

    /// A later source's header row differs from the first source's.
    #[error("source '{source}' header row does not match baseline source '{baseline}'")]
    HeaderMismatch { source: String, baseline: String },

    /// The source is not decodable or parsable as delimited text.
    #[error("source '{source}' is not valid delimited data: {cause}")]
    MalformedData { source: String, cause: String },
}

impl LoadError {
    /// Identity of the source that failed the load.
    pub fn source_id(&self) -> &str {
        match self {
            LoadError::SourceUnreadable { source, .. }
            | LoadError::MissingColumn { source, .. }
            | LoadError::HeaderMismatch { source, .. }
            | LoadError::MalformedData { source, .. } => source,
        }
    }
}
