use std::time::Duration;

/// Path segment separating the catalogue base from the record id.
pub const DETAIL_SEGMENT: &str = "/detail/";

pub const RECORD_ENDPOINT: &str = "https://datacatalogue.cessda.eu/oai-pmh/v0/oai?verb=GetRecord&metadataPrefix=oai_ddi25&identifier=";

pub const VOCABULARY_URL: &str = "https://vocabularies.cessda.eu/v2/vocabularies/CessdaPersistentIdentifierTypes/1.0.0?languageVersion=en-1.0.0&format=json";

pub const DDI_PREFIX: &str = "ddi";
pub const DDI_NAMESPACE: &str = "ddi:codebook:2_5";

/// Prefix table handed to the path query engine.
pub const NAMESPACES: &[(&str, &str)] = &[(DDI_PREFIX, DDI_NAMESPACE)];

/// Local name of the metadata root, searched anywhere in the response.
pub const CODEBOOK_ELEMENT: &str = "codeBook";
pub const IDENTIFIER_PATH: &str =
    "//ddi:codeBook/ddi:stdyDscr/ddi:citation/ddi:titlStmt/ddi:IDNo";
pub const AGENCY_ATTRIBUTE: &str = "agency";

pub const RECORD_ACCEPT: &str = "application/xml, text/xml, */*";
pub const VOCABULARY_ACCEPT: &str = "application/json";

pub const RECORD_TIMEOUT: Duration = Duration::from_secs(30);
pub const VOCABULARY_TIMEOUT: Duration = Duration::from_secs(20);
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub const FALLBACK_SCHEMES: [&str; 4] = ["DOI", "Handle", "URN", "ARK"];

/// Bytes of an unparseable body echoed into the error log.
pub const BODY_PREVIEW_BYTES: usize = 500;
