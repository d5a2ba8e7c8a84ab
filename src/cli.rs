use clap::{Parser, Subcommand};
use pidcheck::domain::constants::{RECORD_ENDPOINT, VOCABULARY_URL};
use pidcheck::CheckerConfig;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "pidcheck",
    version,
    about = "Check that a catalogue record declares a PID from an approved scheme"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        env = "PIDCHECK_RECORD_ENDPOINT",
        default_value = RECORD_ENDPOINT,
        help = "OAI-PMH GetRecord URL prefix; the record id is appended"
    )]
    pub record_endpoint: String,
    #[arg(
        long,
        global = true,
        env = "PIDCHECK_VOCABULARY_URL",
        default_value = VOCABULARY_URL,
        help = "Controlled vocabulary listing approved PID schemes (JSON)"
    )]
    pub vocabulary_url: String,
    #[arg(long, global = true, env = "PIDCHECK_RECORD_TIMEOUT_SECS", default_value_t = 30)]
    pub record_timeout_secs: u64,
    #[arg(long, global = true, env = "PIDCHECK_VOCABULARY_TIMEOUT_SECS", default_value_t = 20)]
    pub vocabulary_timeout_secs: u64,
    #[arg(
        long,
        global = true,
        env = "PIDCHECK_LOG",
        default_value = "info",
        help = "Log filter for stderr (e.g. warn, pidcheck=debug)"
    )]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check one record detail-page address; exits 0 only on `pass`.
    Check { address: String },
    /// List the approved PID schemes currently in effect.
    Schemas,
}

impl Cli {
    pub fn checker_config(&self) -> CheckerConfig {
        CheckerConfig {
            record_endpoint: self.record_endpoint.clone(),
            vocabulary_url: self.vocabulary_url.clone(),
            record_timeout: Duration::from_secs(self.record_timeout_secs),
            vocabulary_timeout: Duration::from_secs(self.vocabulary_timeout_secs),
        }
    }
}
