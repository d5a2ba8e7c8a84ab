//! Approved PID scheme names, fetched once from the controlled vocabulary.
//!
//! The cache slot is written at most once, and only with a non-empty set
//! decoded from the vocabulary. A failed fetch hands back the fallback set
//! without storing it, so the next caller tries the network again.

use crate::domain::constants::VOCABULARY_ACCEPT;
use crate::domain::error::VocabularyError;
use crate::domain::models::ApprovedSchemas;
use crate::services::transport::{HttpRequest, HttpTransport};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

/// Text of a scalar `title`; `null`, objects and arrays carry none.
fn title_text(title: &Value) -> Option<String> {
    match title {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Non-blank, trimmed `versions[0].concepts[].title` values. Entries that
/// carry no usable title are skipped; later versions are never read.
fn decode_vocabulary(body: &[u8]) -> Result<BTreeSet<String>, VocabularyError> {
    let doc: Value = serde_json::from_slice(body)?;
    let names: BTreeSet<String> = doc
        .get("versions")
        .and_then(Value::as_array)
        .and_then(|versions| versions.first())
        .and_then(|v| v.get("concepts"))
        .and_then(Value::as_array)
        .map(|concepts| {
            concepts
                .iter()
                .filter_map(|c| c.get("title"))
                .filter_map(title_text)
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default();
    if names.is_empty() {
        return Err(VocabularyError::Empty);
    }
    Ok(names)
}

pub struct SchemaResolver {
    transport: Arc<dyn HttpTransport>,
    vocabulary_url: String,
    timeout: Duration,
    cached: OnceLock<ApprovedSchemas>,
    populate: Mutex<()>,
}

impl SchemaResolver {
    pub fn new(transport: Arc<dyn HttpTransport>, vocabulary_url: String, timeout: Duration) -> Self {
        Self {
            transport,
            vocabulary_url,
            timeout,
            cached: OnceLock::new(),
            populate: Mutex::new(()),
        }
    }

    /// Never fails: falls back to DOI/Handle/URN/ARK when the vocabulary is unusable.
    pub fn get_approved_schemas(&self) -> ApprovedSchemas {
        if let Some(set) = self.cached.get() {
            return set.clone();
        }

        // The guarded value is `()`, so a poisoned lock carries no broken state.
        let _guard = self
            .populate
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(set) = self.cached.get() {
            return set.clone();
        }

        tracing::info!(url = %self.vocabulary_url, "fetching approved PID schemas from vocabulary");
        match self.fetch_vocabulary() {
            Ok(names) => {
                let set = ApprovedSchemas::from_vocabulary(names);
                tracing::info!(
                    count = set.len(),
                    schemas = ?set.iter().collect::<Vec<_>>(),
                    "fetched approved PID schemas"
                );
                self.cached.get_or_init(|| set).clone()
            }
            Err(e) => {
                tracing::warn!(error = %e, "using fallback PID schemas");
                ApprovedSchemas::fallback()
            }
        }
    }

    pub fn is_populated(&self) -> bool {
        self.cached.get().is_some()
    }

    fn fetch_vocabulary(&self) -> Result<BTreeSet<String>, VocabularyError> {
        let reply = self.transport.get(&HttpRequest {
            url: &self.vocabulary_url,
            accept: VOCABULARY_ACCEPT,
            timeout: self.timeout,
        })?;
        if !reply.is_ok() {
            return Err(VocabularyError::Status(reply.status));
        }
        let names = decode_vocabulary(&reply.body)?;
        for name in &names {
            tracing::debug!(schema = %name, "found PID schema entry");
        }
        Ok(names)
    }
}
