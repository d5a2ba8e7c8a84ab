use crate::domain::constants::{AGENCY_ATTRIBUTE, IDENTIFIER_PATH, NAMESPACES};
use crate::domain::error::CheckError;
use crate::domain::models::{IdentifierDeclaration, Verdict};
use crate::services::record::MetadataDocument;
use crate::services::schemas::SchemaResolver;
use crate::services::xml::{Element, NamespacePath};
use std::sync::Arc;

/// Every `IDNo` under the citation title statement, in document order.
pub(crate) fn identifier_elements(doc: &MetadataDocument) -> Result<Vec<&Element>, CheckError> {
    let path = NamespacePath::parse(IDENTIFIER_PATH, NAMESPACES)
        .map_err(|e| CheckError::Query(e.to_string()))?;
    Ok(path.select(doc.root()))
}

fn declaration(el: &Element) -> Result<IdentifierDeclaration, CheckError> {
    let agency = el.attribute(AGENCY_ATTRIBUTE).ok_or_else(|| {
        CheckError::Query(format!(
            "identifier '{}' has no {} attribute",
            el.text, AGENCY_ATTRIBUTE
        ))
    })?;
    Ok(IdentifierDeclaration {
        value: el.text.clone(),
        agency: agency.to_string(),
    })
}

pub struct VerdictEvaluator {
    resolver: Arc<SchemaResolver>,
}

impl VerdictEvaluator {
    pub fn new(resolver: Arc<SchemaResolver>) -> Self {
        Self { resolver }
    }

    pub fn evaluate(&self, doc: &MetadataDocument) -> Verdict {
        match self.try_evaluate(doc) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, "error checking document for approved PID");
                Verdict::Indeterminate
            }
        }
    }

    fn try_evaluate(&self, doc: &MetadataDocument) -> Result<Verdict, CheckError> {
        let elements = identifier_elements(doc)?;
        if elements.is_empty() {
            tracing::info!("no IDNo elements found in DDI document");
            return Ok(Verdict::Fail);
        }

        let approved = self.resolver.get_approved_schemas();
        for el in elements {
            let decl = declaration(el)?;
            if approved.contains(&decl.agency) {
                tracing::info!(agency = %decl.agency, pid = %decl.value, "found approved PID schema");
                return Ok(Verdict::Pass);
            }
        }
        tracing::info!("no approved PID schemas found");
        Ok(Verdict::Fail)
    }
}
