#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use axum::extract::{OriginalUri, State};
use axum::http::StatusCode;
use axum::Router;
use serde_json::Value;
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

pub const RECORD_PATH: &str = "/oai?verb=GetRecord&metadataPrefix=oai_ddi25&identifier=";
pub const VOCAB_PATH: &str = "/v2/vocabularies/CessdaPersistentIdentifierTypes/1.0.0";

pub const VOCAB_JSON: &str = r#"{
  "versions": [{
    "concepts": [
      {"title": "ARK"},
      {"title": "DOI"},
      {"title": "Handle"},
      {"title": "URN"}
    ]
  }]
}"#;

/// Canned replies keyed by request target (path plus query), and every target seen.
#[derive(Clone, Default)]
struct StubState {
    routes: Arc<Mutex<HashMap<String, (u16, String)>>>,
    hits: Arc<Mutex<Vec<String>>>,
}

async fn respond(State(stub): State<StubState>, OriginalUri(uri): OriginalUri) -> (StatusCode, String) {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    stub.hits.lock().unwrap().push(target.clone());
    let (status, body) = stub
        .routes
        .lock()
        .unwrap()
        .get(&target)
        .cloned()
        .unwrap_or((404, String::new()));
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        body,
    )
}

/// axum app on 127.0.0.1 serving canned bodies, run on its own runtime thread.
pub struct StubServer {
    port: u16,
    state: StubState,
}

impl StubServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        listener.set_nonblocking(true).expect("nonblocking listener");
        let port = listener.local_addr().expect("stub addr").port();
        let state = StubState::default();
        let app = Router::new().fallback(respond).with_state(state.clone());

        thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("stub runtime");
            rt.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("adopt stub listener");
                axum::serve(listener, app).await.expect("stub server");
            });
        });

        Self { port, state }
    }

    pub fn route(&self, target: &str, status: u16, body: &str) -> &Self {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert(target.to_string(), (status, body.to_string()));
        self
    }

    pub fn record(&self, id: &str, status: u16, body: &str) -> &Self {
        self.route(&format!("{}{}", RECORD_PATH, id), status, body)
    }

    pub fn vocabulary(&self, status: u16, body: &str) -> &Self {
        self.route(VOCAB_PATH, status, body)
    }

    pub fn base(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn record_endpoint(&self) -> String {
        format!("{}{}", self.base(), RECORD_PATH)
    }

    pub fn vocabulary_url(&self) -> String {
        format!("{}{}", self.base(), VOCAB_PATH)
    }

    pub fn hits(&self, target: &str) -> usize {
        self.state
            .hits
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.as_str() == target)
            .count()
    }
}

/// A loopback address nothing listens on.
pub fn closed_port_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind scratch port");
    let port = listener.local_addr().expect("scratch addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}{}", port, path)
}

pub fn ddi_record(idnos: &[(&str, &str)]) -> String {
    let declarations: String = idnos
        .iter()
        .map(|(agency, value)| format!("<IDNo agency=\"{}\">{}</IDNo>", agency, value))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<OAI-PMH xmlns="http://www.openarchives.org/OAI/2.0/">
  <GetRecord>
    <record>
      <header><identifier>fixture</identifier></header>
      <metadata>
        <codeBook xmlns="ddi:codebook:2_5">
          <stdyDscr><citation><titlStmt>
            <titl>Fixture Survey</titl>
            {}
          </titlStmt></citation></stdyDscr>
        </codeBook>
      </metadata>
    </record>
  </GetRecord>
</OAI-PMH>"#,
        declarations
    )
}

pub struct TestEnv {
    pub stub: StubServer,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            stub: StubServer::start(),
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("pidcheck");
        cmd.env("PIDCHECK_RECORD_ENDPOINT", self.stub.record_endpoint())
            .env("PIDCHECK_VOCABULARY_URL", self.stub.vocabulary_url())
            .env("PIDCHECK_RECORD_TIMEOUT_SECS", "5")
            .env("PIDCHECK_VOCABULARY_TIMEOUT_SECS", "5")
            .env("PIDCHECK_LOG", "warn");
        cmd
    }

    pub fn detail(&self, id: &str) -> String {
        format!("https://datacatalogue.cessda.eu/detail/{}?lang=en", id)
    }

    /// Runs with `--json`; `expect_success` matches the process exit status.
    pub fn run_json(&self, args: &[&str], expect_success: bool) -> Value {
        let mut cmd = self.cmd();
        let assert = cmd.arg("--json").args(args).assert();
        let assert = if expect_success {
            assert.success()
        } else {
            assert.failure()
        };
        let out = assert.get_output().stdout.clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}
