//! Error type shared by collaborator implementations.

/// Error returned by [`SheetSource`](crate::SheetSource) and
/// [`SchemaLoader`](crate::SchemaLoader) implementations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The sheet has no header in the underlying archive.
    #[error("header not found for sheet '{sheet}'")]
    HeaderNotFound { sheet: String },

    /// I/O error while reading from the underlying storage.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Any other collaborator failure (corrupt header, unreadable schema directory, ...).
    #[error("{message}")]
    Other {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl SourceError {
    pub fn other(message: impl Into<String>) -> Self {
        SourceError::Other {
            message: message.into(),
            source: None,
        }
    }
}
