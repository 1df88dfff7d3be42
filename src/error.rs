use std::result;

use thiserror::Error;

/// Error types for PubChem and RCSB client operations
///
/// Public client operations never return these directly: they are reported to the
/// configured [`DiagnosticSink`](crate::diagnostics::DiagnosticSink) and discarded.
/// The `try_*` variants of each operation surface them unchanged.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Non-success HTTP status
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// The upstream service answered but had nothing for this input
    #[error("No result for {resource}")]
    NotFound { resource: String },

    /// A payload path the client reads was absent
    #[error("Response is missing field: {field}")]
    MissingField { field: &'static str },

    /// PubChem encodes some failures as plain-text bodies with a success status
    #[error("Upstream returned a status body instead of data: {body}")]
    UpstreamStatus { body: String },

    /// Raw structure file too short to be a real coordinate file
    #[error("Structure file too short ({length} characters)")]
    UndersizedStructureFile { length: usize },

    /// Invalid 4-character PDB code
    #[error("Invalid PDB code: {code}")]
    InvalidStructureCode { code: String },

    /// Polymer entity identifier not of the form `ENTRY_ENTITY`
    #[error("Invalid polymer entity identifier: {entity_id}")]
    InvalidEntityId { entity_id: String },

    /// Invalid PubChem compound identifier
    #[error("Invalid PubChem CID: {cid}")]
    InvalidCompoundId { cid: String },

    /// Chemical notation was empty after trimming
    #[error("Chemical notation is empty")]
    EmptyNotation,

    /// Sequence was empty after removing FASTA headers and whitespace
    #[error("Sequence is empty after cleaning")]
    InvalidSequence,

    /// API rate limit exceeded
    #[error("API rate limit exceeded")]
    RateLimitExceeded,
}

pub type Result<T> = result::Result<T, ClientError>;

impl ClientError {
    /// Short label describing the class of failure, used in diagnostics
    pub fn cause(&self) -> &'static str {
        match self {
            ClientError::RequestError(err) if err.is_timeout() => "Request timeout",
            ClientError::RequestError(err) if err.is_connect() => "Connection error",
            ClientError::RequestError(_) => "Network error",
            ClientError::ApiError { status, .. } => match status {
                404 => "Not found",
                429 => "Rate limit exceeded",
                500..=599 => "Server error",
                _ => "HTTP error",
            },
            ClientError::JsonError(_) | ClientError::MissingField { .. } => "Malformed response",
            ClientError::NotFound { .. } => "Not found",
            ClientError::UpstreamStatus { .. } | ClientError::UndersizedStructureFile { .. } => {
                "Upstream soft failure"
            }
            ClientError::InvalidStructureCode { .. }
            | ClientError::InvalidEntityId { .. }
            | ClientError::InvalidCompoundId { .. }
            | ClientError::EmptyNotation
            | ClientError::InvalidSequence => "Invalid input",
            ClientError::RateLimitExceeded => "Rate limit exceeded",
        }
    }

    /// Whether the error was raised before any request was sent
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidStructureCode { .. }
                | ClientError::InvalidEntityId { .. }
                | ClientError::InvalidCompoundId { .. }
                | ClientError::EmptyNotation
                | ClientError::InvalidSequence
        )
    }
}
