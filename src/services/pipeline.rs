use crate::domain::error::{CheckError, TransportFailure};
use crate::domain::models::{ApprovedSchemas, CheckerConfig, Verdict};
use crate::services::address::extract_record_id;
use crate::services::evaluator::VerdictEvaluator;
use crate::services::record::RecordFetcher;
use crate::services::schemas::SchemaResolver;
use crate::services::transport::{HttpTransport, ReqwestTransport};
use std::sync::Arc;

/// Address in, verdict out. Shareable across threads; the approved-schema
/// cache lives as long as the checker.
pub struct PidChecker {
    fetcher: RecordFetcher,
    resolver: Arc<SchemaResolver>,
    evaluator: VerdictEvaluator,
}

impl PidChecker {
    pub fn new(config: CheckerConfig) -> Result<Self, TransportFailure> {
        Ok(Self::with_transport(config, Arc::new(ReqwestTransport::new()?)))
    }

    pub fn with_transport(config: CheckerConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let resolver = Arc::new(SchemaResolver::new(
            transport.clone(),
            config.vocabulary_url,
            config.vocabulary_timeout,
        ));
        Self {
            fetcher: RecordFetcher::new(transport, config.record_endpoint, config.record_timeout),
            evaluator: VerdictEvaluator::new(resolver.clone()),
            resolver,
        }
    }

    /// Never returns an error: every failure becomes `Indeterminate`.
    pub fn check_approved_pid(&self, address: &str) -> Verdict {
        match self.try_check(address) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(address = %address, error = %e, "check failed");
                Verdict::Indeterminate
            }
        }
    }

    pub fn approved_schemas(&self) -> ApprovedSchemas {
        self.resolver.get_approved_schemas()
    }

    fn try_check(&self, address: &str) -> Result<Verdict, CheckError> {
        let id = extract_record_id(address)?;
        let doc = self.fetcher.fetch_metadata_document(&id)?;
        let verdict = self.evaluator.evaluate(&doc);
        tracing::info!(record = %id, verdict = %verdict, "check complete");
        Ok(verdict)
    }
}
