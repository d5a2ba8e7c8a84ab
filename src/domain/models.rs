use crate::domain::constants::{
    FALLBACK_SCHEMES, RECORD_ENDPOINT, RECORD_TIMEOUT, VOCABULARY_TIMEOUT, VOCABULARY_URL,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// Outcome of one compliance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
    Indeterminate,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Pass => "pass",
            Verdict::Fail => "fail",
            Verdict::Indeterminate => "indeterminate",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pass" => Ok(Verdict::Pass),
            "fail" => Ok(Verdict::Fail),
            "indeterminate" => Ok(Verdict::Indeterminate),
            other => Err(format!("unknown verdict: {}", other)),
        }
    }
}

/// Catalogue record id taken from a detail-page address. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Callers must have rejected the empty string already.
    pub(crate) fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An `IDNo`-style declaration: identifier value plus its free-text issuing scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierDeclaration {
    pub value: String,
    pub agency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaSource {
    Vocabulary,
    Fallback,
}

/// Immutable set of approved PID scheme names. Cloning shares the underlying set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovedSchemas {
    names: Arc<BTreeSet<String>>,
    source: SchemaSource,
}

impl ApprovedSchemas {
    pub fn from_vocabulary(names: BTreeSet<String>) -> Self {
        Self {
            names: Arc::new(names),
            source: SchemaSource::Vocabulary,
        }
    }

    pub fn fallback() -> Self {
        Self {
            names: Arc::new(FALLBACK_SCHEMES.iter().map(|s| s.to_string()).collect()),
            source: SchemaSource::Fallback,
        }
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, scheme: &str) -> bool {
        self.names.contains(scheme)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn source(&self) -> SchemaSource {
        self.source
    }
}

/// Endpoints and timeouts used by a [`crate::PidChecker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Record id is appended verbatim to this prefix.
    pub record_endpoint: String,
    pub vocabulary_url: String,
    pub record_timeout: Duration,
    pub vocabulary_timeout: Duration,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            record_endpoint: RECORD_ENDPOINT.to_string(),
            vocabulary_url: VOCABULARY_URL.to_string(),
            record_timeout: RECORD_TIMEOUT,
            vocabulary_timeout: VOCABULARY_TIMEOUT,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub address: String,
    pub verdict: Verdict,
}

#[derive(Debug, Serialize)]
pub struct SchemasReport {
    pub source: SchemaSource,
    pub schemes: Vec<String>,
}
