use crate::domain::constants::CONNECT_TIMEOUT;
use crate::domain::error::TransportFailure;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct HttpRequest<'a> {
    pub url: &'a str,
    pub accept: &'a str,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// One blocking GET. Any HTTP status is a reply; only a missing response is an error.
pub trait HttpTransport: Send + Sync {
    fn get(&self, request: &HttpRequest<'_>) -> Result<HttpReply, TransportFailure>;
}

pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportFailure> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("pidcheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportFailure::Other(e.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, request: &HttpRequest<'_>) -> Result<HttpReply, TransportFailure> {
        let classify = |e: reqwest::Error| {
            if e.is_timeout() {
                TransportFailure::Timeout(request.timeout)
            } else if e.is_connect() {
                TransportFailure::Connect(e.to_string())
            } else {
                TransportFailure::Other(e.to_string())
            }
        };
        let resp = self
            .client
            .get(request.url)
            .header(reqwest::header::ACCEPT, request.accept)
            .timeout(request.timeout)
            .send()
            .map_err(classify)?;
        let status = resp.status().as_u16();
        let body = resp.bytes().map_err(classify)?.to_vec();
        Ok(HttpReply { status, body })
    }
}
