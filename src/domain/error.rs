use std::time::Duration;

/// Failures of the record pipeline. All of them collapse to `indeterminate`
/// at the `PidChecker` boundary.
#[derive(thiserror::Error, Debug)]
pub enum CheckError {
    #[error("invalid record address: {0}")]
    InvalidAddress(String),
    #[error("failed to fetch {url}: {reason}")]
    Transport { url: String, reason: String },
    #[error("empty response body from {0}")]
    EmptyResponse(String),
    #[error("malformed metadata document: {0}")]
    MalformedDocument(String),
    #[error("metadata query failed: {0}")]
    Query(String),
}

/// Why the approved-schema vocabulary could not be used. Never leaves the resolver.
#[derive(thiserror::Error, Debug)]
pub enum VocabularyError {
    #[error(transparent)]
    Transport(#[from] TransportFailure),
    #[error("vocabulary service returned HTTP {0}")]
    Status(u16),
    #[error("vocabulary response is not valid: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no valid PID schemas found in vocabulary response")]
    Empty,
}

/// A request that produced no HTTP response at all.
#[derive(thiserror::Error, Debug)]
pub enum TransportFailure {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("{0}")]
    Other(String),
}
