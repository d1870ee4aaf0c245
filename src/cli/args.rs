//! CLI argument definitions using clap

use crate::config::{FilterSettings, LookupBackend};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ssl")]
#[command(version)]
#[command(about = "DNS and TLS toolbox: domain filtering, certificate decoding and PFX handling", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file (TOML); defaults to config/default.toml when present
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Keep domains whose A record and nameservers match the criteria
    #[command(visible_alias = "r")]
    Filter(FilterArgs),

    /// Decode a PEM certificate or CSR
    #[command(visible_alias = "d")]
    Decode(DecodeArgs),

    /// Pack a certificate, key and CA chain into a PFX file
    #[command(visible_alias = "p")]
    Pack(PackArgs),

    /// Extract .crt, .ca and .key files from a PFX file
    #[command(visible_alias = "e")]
    Extract(ExtractArgs),

    /// Show a server's certificate chain with openssl s_client
    #[command(visible_alias = "x")]
    Chain(ChainArgs),

    /// Highlight openssl s_client output read from stdin
    #[command(visible_alias = "hl")]
    Highlight,

    /// Run sslscan with the given arguments
    #[command(visible_alias = "s")]
    Scan(ScanArgs),
}

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// File containing domains (one per line)
    #[arg(required = true)]
    pub input: PathBuf,

    /// File the matching domains are written to (truncated)
    #[arg(required = true)]
    pub output: PathBuf,

    /// Required A record prefix
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Nameserver to match; `*.suffix` matches by suffix (repeatable)
    #[arg(short, long = "nameserver", value_name = "PATTERN")]
    pub nameservers: Vec<String>,

    /// Number of domains resolved in parallel
    #[arg(short, long)]
    pub parallel: Option<usize>,

    /// Per-lookup timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// DNS backend
    #[arg(long, value_enum)]
    pub backend: Option<LookupBackend>,

    /// Compare nameservers case-insensitively (`--ignore-case=false` to turn off)
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub ignore_case: Option<bool>,

    /// Print per-domain verdicts as JSON instead of the summary
    #[arg(long)]
    pub json: bool,
}

impl FilterArgs {
    /// Overlay the flags that were given on top of file/default settings
    pub fn apply(&self, settings: &mut FilterSettings) {
        if let Some(prefix) = &self.prefix {
            settings.a_record_prefix = prefix.clone();
        }
        if !self.nameservers.is_empty() {
            settings.nameservers = self.nameservers.clone();
        }
        if let Some(parallel) = self.parallel {
            settings.parallel = parallel;
        }
        if let Some(timeout) = self.timeout {
            settings.lookup_timeout_secs = timeout;
        }
        if let Some(backend) = self.backend {
            settings.backend = backend;
        }
        if let Some(ignore_case) = self.ignore_case {
            settings.ignore_case = ignore_case;
        }
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// PEM file to decode; reads stdin when omitted
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct PackArgs {
    /// Certificate (PEM); pasted on stdin when omitted
    #[arg(long, value_name = "FILE")]
    pub cert: Option<PathBuf>,

    /// Private key (PEM: PKCS#8, PKCS#1 RSA or SEC1 EC); pasted on stdin when omitted
    #[arg(long, value_name = "FILE")]
    pub key: Option<PathBuf>,

    /// CA certificate(s) (PEM, repeatable)
    #[arg(long, value_name = "FILE")]
    pub ca: Vec<PathBuf>,

    /// Output name without extension [default: certificate]
    #[arg(long)]
    pub name: Option<String>,

    /// PFX password; prompted for when omitted on a terminal
    #[arg(long, env = "SSL_PFX_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// PFX file
    #[arg(required = true)]
    pub file: PathBuf,

    /// PFX password; an empty password is tried first
    #[arg(long, env = "SSL_PFX_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Directory for the extracted files [default: next to the PFX]
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ChainArgs {
    /// Domain to connect to
    #[arg(required = true)]
    pub domain: String,

    /// Port
    #[arg(long, default_value = "443")]
    pub port: u16,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Arguments passed to sslscan
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
