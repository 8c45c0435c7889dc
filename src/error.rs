use thiserror::Error;

/// Failure of one document's pipeline. Never crosses the per-document task boundary.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("failed to extract text from {file}: {reason}")]
    ExtractionFailed { file: String, reason: String },

    #[error("no pages found in {file}")]
    EmptyDocument { file: String },

    #[error("failed to serialize outline for {file}: {reason}")]
    SerializationFailed { file: String, reason: String },

    #[error("failed to write outline for {file}: {reason}")]
    WriteFailed { file: String, reason: String },
}

impl DocumentError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ExtractionFailed { .. } => "extraction_failed",
            Self::EmptyDocument { .. } => "empty_document",
            Self::SerializationFailed { .. } => "serialization_failed",
            Self::WriteFailed { .. } => "write_failed",
        }
    }

    pub fn file(&self) -> &str {
        match self {
            Self::ExtractionFailed { file, .. }
            | Self::EmptyDocument { file }
            | Self::SerializationFailed { file, .. }
            | Self::WriteFailed { file, .. } => file,
        }
    }
}
