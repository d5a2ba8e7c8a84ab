use crate::domain::constants::{
    BODY_PREVIEW_BYTES, CODEBOOK_ELEMENT, DDI_NAMESPACE, RECORD_ACCEPT,
};
use crate::domain::error::CheckError;
use crate::domain::models::RecordId;
use crate::services::transport::{HttpRequest, HttpTransport};
use crate::services::xml::Element;
use std::sync::Arc;
use std::time::Duration;

/// A standalone DDI `codeBook` subtree. Owned by the check that fetched it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataDocument {
    root: Element,
}

impl MetadataDocument {
    /// Isolate the first `ddi:codeBook` found anywhere in `bytes`.
    pub fn from_xml(bytes: &[u8]) -> Result<Self, CheckError> {
        let parsed =
            Element::parse(bytes).map_err(|e| CheckError::MalformedDocument(e.to_string()))?;
        let root = parsed
            .into_first_descendant(Some(DDI_NAMESPACE), CODEBOOK_ELEMENT)
            .ok_or_else(|| CheckError::MalformedDocument("no DDI codeBook found".to_string()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }
}

pub struct RecordFetcher {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
    timeout: Duration,
}

impl RecordFetcher {
    pub fn new(transport: Arc<dyn HttpTransport>, endpoint: String, timeout: Duration) -> Self {
        Self {
            transport,
            endpoint,
            timeout,
        }
    }

    pub fn record_url(&self, id: &RecordId) -> String {
        format!("{}{}", self.endpoint, id)
    }

    /// One GET, no retry.
    pub fn fetch_metadata_document(&self, id: &RecordId) -> Result<MetadataDocument, CheckError> {
        let url = self.record_url(id);
        tracing::debug!(url = %url, "fetching record");
        let reply = self
            .transport
            .get(&HttpRequest {
                url: &url,
                accept: RECORD_ACCEPT,
                timeout: self.timeout,
            })
            .map_err(|e| CheckError::Transport {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        if !reply.is_ok() {
            return Err(CheckError::Transport {
                url,
                reason: format!("HTTP {}", reply.status),
            });
        }
        if reply.body.is_empty() {
            return Err(CheckError::EmptyResponse(url));
        }

        tracing::info!(url = %url, "parsing XML response from record endpoint");
        MetadataDocument::from_xml(&reply.body).inspect_err(|_| {
            let end = reply.body.len().min(BODY_PREVIEW_BYTES);
            tracing::error!(
                preview = %String::from_utf8_lossy(&reply.body[..end]),
                "failed to parse XML"
            );
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{MetadataDocument, RecordFetcher};
    use crate::domain::constants::RECORD_TIMEOUT;
    use crate::domain::error::CheckError;
    use crate::domain::models::RecordId;
    use crate::services::transport::fake::FakeTransport;
    use std::sync::Arc;
    use std::time::Duration;

    const BASE: &str = "http://oai.test/oai?identifier=";

    const OAI_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<OAI-PMH xmlns="http://www.openarchives.org/OAI/2.0/">
  <GetRecord><record><metadata>
    <codeBook xmlns="ddi:codebook:2_5">
      <stdyDscr><citation><titlStmt>
        <IDNo agency="DOI">10.123/abc</IDNo>
      </titlStmt></citation></stdyDscr>
    </codeBook>
  </metadata></record></GetRecord>
</OAI-PMH>"#;

    fn fetcher(transport: FakeTransport) -> RecordFetcher {
        RecordFetcher::new(Arc::new(transport), BASE.to_string(), Duration::from_secs(30))
    }

    fn id(s: &str) -> RecordId {
        RecordId::new(s)
    }

    #[test]
    fn isolates_codebook_from_oai_envelope() {
        let f = fetcher(FakeTransport::new().reply(&format!("{}abc", BASE), 200, OAI_RESPONSE));
        let doc = f.fetch_metadata_document(&id("abc")).unwrap();
        assert!(doc.root().is(Some("ddi:codebook:2_5"), "codeBook"));
        assert_eq!(doc.root().children.len(), 1);
    }

    #[test]
    fn bare_codebook_document_is_accepted() {
        let xml = "<ddi:codeBook xmlns:ddi='ddi:codebook:2_5'><ddi:stdyDscr/></ddi:codeBook>";
        let doc = MetadataDocument::from_xml(xml.as_bytes()).unwrap();
        assert_eq!(doc.root().name, "codeBook");
    }

    #[test]
    fn non_success_status_is_transport_error() {
        let f = fetcher(FakeTransport::new().reply(&format!("{}abc", BASE), 500, ""));
        assert!(matches!(
            f.fetch_metadata_document(&id("abc")),
            Err(CheckError::Transport { .. })
        ));
    }

    #[test]
    fn transport_failure_is_transport_error() {
        let f = fetcher(FakeTransport::new().fail(&format!("{}abc", BASE), "connection reset"));
        let err = f.fetch_metadata_document(&id("abc")).unwrap_err();
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn empty_body_is_empty_response() {
        let f = fetcher(FakeTransport::new().reply(&format!("{}abc", BASE), 200, ""));
        assert!(matches!(
            f.fetch_metadata_document(&id("abc")),
            Err(CheckError::EmptyResponse(_))
        ));
    }

    #[test]
    fn missing_codebook_or_bad_xml_is_malformed() {
        let f = fetcher(
            FakeTransport::new()
                .reply(&format!("{}a", BASE), 200, "<OAI-PMH><error code='idDoesNotExist'/></OAI-PMH>")
                .reply(&format!("{}b", BASE), 200, "<OAI-PMH><unclosed></OAI-PMH>")
                .reply(
                    &format!("{}c", BASE),
                    200,
                    "<codeBook xmlns='ddi:codebook:2_4'/>",
                ),
        );
        for rid in ["a", "b", "c"] {
            assert!(
                matches!(
                    f.fetch_metadata_document(&id(rid)),
                    Err(CheckError::MalformedDocument(_))
                ),
                "record {} should be malformed",
                rid
            );
        }
    }

    #[test]
    fn exactly_one_attempt_per_fetch() {
        let transport = Arc::new(FakeTransport::new().reply(&format!("{}abc", BASE), 503, ""));
        let f = RecordFetcher::new(transport.clone(), BASE.to_string(), Duration::from_secs(1));
        let _ = f.fetch_metadata_document(&id("abc"));
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn record_request_asks_for_xml_with_record_timeout() {
        let url = format!("{}abc", BASE);
        let transport = Arc::new(FakeTransport::new().reply(&url, 200, OAI_RESPONSE));
        let f = RecordFetcher::new(transport.clone(), BASE.to_string(), RECORD_TIMEOUT);
        f.fetch_metadata_document(&id("abc")).unwrap();

        let seen = transport.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].url, url);
        assert_eq!(seen[0].accept, "application/xml, text/xml, */*");
        assert_eq!(seen[0].timeout, Duration::from_secs(30));
    }

    #[test]
    fn latin1_declared_record_is_decoded() {
        let xml: &[u8] = b"<?xml version='1.0' encoding='ISO-8859-1'?>\
            <codeBook xmlns='ddi:codebook:2_5'><stdyDscr><citation><titlStmt>\
            <IDNo agency='Soci\xe9t\xe9'>r\xe9f-1</IDNo>\
            </titlStmt></citation></stdyDscr></codeBook>";
        let doc = MetadataDocument::from_xml(xml).unwrap();
        let idno = &doc.root().children[0].children[0].children[0].children[0];
        assert_eq!(idno.name, "IDNo");
        assert_eq!(idno.attribute("agency"), Some("Soci\u{e9}t\u{e9}"));
        assert_eq!(idno.text, "r\u{e9}f-1");
    }
}
