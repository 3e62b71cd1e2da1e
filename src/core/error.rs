// src/core/error.rs

use thiserror::Error;

/// Error taxonomy for the telemetry pipeline.
///
/// None of these ever reach a presentation consumer: the service layer
/// collapses every failure to the last published record (or the sentinel)
/// before handing data out.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("diagnostic source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("required field `{0}` missing or not numeric")]
    MissingRequiredField(&'static str),

    #[error("record encode failed: {0}")]
    Encode(serde_json::Error),

    #[error("record decode failed: {0}")]
    Decode(serde_json::Error),

    #[error("store I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;
