//! `dig` subprocess backend

use crate::dns::lookup::{is_queryable, RecordLookup};
use crate::models::{LookupOutcome, RecordType};
use crate::utils::{command_line, run_captured, ExternalCommandError, LookupError};
use async_trait::async_trait;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Resolves records by running `dig +short <TYPE> <domain>`
#[derive(Debug, Clone)]
pub struct DigLookup {
    binary: String,
    timeout: Duration,
}

impl DigLookup {
    pub fn new() -> Self {
        Self {
            binary: "dig".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Use a different `dig` executable
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Set the per-query timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for DigLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordLookup for DigLookup {
    async fn lookup(&self, domain: &str, record_type: RecordType) -> LookupOutcome {
        if !is_queryable(domain) {
            return LookupOutcome::Failed(LookupError::InvalidDomain {
                domain: domain.to_string(),
            });
        }

        let args = ["+short", record_type.as_str(), domain];
        let command = command_line(&self.binary, &args);
        tracing::debug!("Running {}", command);

        match run_captured(&self.binary, &args, self.timeout).await {
            Ok(output) if output.success() => {
                LookupOutcome::Resolved(parse_dig_output(record_type, &output.stdout))
            }
            Ok(output) => {
                // dig prints resolver errors such as ";; connection timed out" on stdout
                let detail = if output.stderr.trim().is_empty() {
                    output.stdout.trim().to_string()
                } else {
                    output.stderr.trim().to_string()
                };
                LookupOutcome::Failed(LookupError::CommandFailed {
                    command,
                    code: output.status.code(),
                    stderr: detail,
                })
            }
            Err(ExternalCommandError::Timeout { timeout, .. }) => {
                LookupOutcome::Failed(LookupError::Timeout {
                    domain: domain.to_string(),
                    record_type,
                    timeout,
                })
            }
            Err(e) => LookupOutcome::Failed(LookupError::Spawn {
                command,
                message: e.to_string(),
            }),
        }
    }
}

/// Extract record values from `dig +short` output.
///
/// For A queries only IPv4 addresses are kept, so CNAME targets printed ahead
/// of the address are skipped. NS names lose their trailing root dot.
pub fn parse_dig_output(record_type: RecordType, stdout: &str) -> Vec<String> {
    let lines = stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(';'));

    match record_type {
        RecordType::A => lines
            .filter(|line| line.parse::<Ipv4Addr>().is_ok())
            .map(str::to_string)
            .collect(),
        RecordType::Ns => lines
            .map(|line| line.trim_end_matches('.').to_string())
            .collect(),
    }
}
