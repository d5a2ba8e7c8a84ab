use crate::cli::{Cli, Commands};
use pidcheck::domain::models::{CheckReport, SchemasReport};
use pidcheck::services::output::{print_lines, print_one};
use pidcheck::{PidChecker, Verdict};
use std::process::ExitCode;

pub fn handle_commands(cli: &Cli, checker: &PidChecker) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Commands::Check { address } => {
            let verdict = checker.check_approved_pid(address);
            let report = CheckReport {
                address: address.clone(),
                verdict,
            };
            print_one(cli.json, report, |r| r.verdict.to_string())?;
            Ok(if verdict == Verdict::Pass {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Schemas => {
            let approved = checker.approved_schemas();
            tracing::info!(source = ?approved.source(), "approved PID schemes");
            let report = SchemasReport {
                source: approved.source(),
                schemes: approved.iter().map(str::to_string).collect(),
            };
            print_lines(cli.json, report, |r| r.schemes.clone())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
