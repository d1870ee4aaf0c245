//! Custom error types for ssl-toolbox
//!
//! This module defines domain-specific error types using `thiserror` for
//! the failure modes of the filter pipeline and the certificate tools.

use crate::models::RecordType;
use std::time::Duration;
use thiserror::Error;

/// Top-level error type for the ssl-toolbox library
#[derive(Error, Debug)]
pub enum ToolkitError {
    #[error("Domain filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("DNS lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Certificate file error: {0}")]
    CertFile(#[from] CertFileError),

    #[error("External command error: {0}")]
    External(#[from] ExternalCommandError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single DNS lookup that did not produce usable records.
///
/// These never abort a filter run; the pipeline logs them and excludes the
/// domain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("refusing to look up '{domain}': not a domain name")]
    InvalidDomain { domain: String },

    #[error("failed to start '{command}': {message}")]
    Spawn { command: String, message: String },

    #[error("command '{command}' failed with exit code {code:?}: {stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{record_type} lookup for {domain} timed out after {timeout:?}")]
    Timeout {
        domain: String,
        record_type: RecordType,
        timeout: Duration,
    },

    #[error("DNS resolver setup failed: {message}")]
    Setup { message: String },

    #[error("{record_type} lookup for {domain} failed: {message}")]
    Resolver {
        domain: String,
        record_type: RecordType,
        message: String,
    },
}

/// Fatal errors of the domain filter pipeline
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("cannot read domain list {path}: {message}")]
    InputUnavailable { path: String, message: String },

    #[error("cannot create output file {path}: {message}")]
    OutputUnwritable { path: String, message: String },

    #[error("failed writing to {path}: {message}")]
    WriteFailed { path: String, message: String },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Certificate, CSR and PKCS#12 file errors
#[derive(Error, Debug)]
pub enum CertFileError {
    #[error("Failed to read {path}: {message}")]
    FileReadError { path: String, message: String },

    #[error("Failed to write {path}: {message}")]
    FileWriteError { path: String, message: String },

    #[error("Invalid PEM data: {message}")]
    PemError { message: String },

    #[error("No {expected} block found in input")]
    MissingBlock { expected: String },

    #[error("Failed to parse {kind}: {message}")]
    ParseError { kind: String, message: String },

    #[error("Unsupported private key format '{tag}'; convert it with 'openssl pkcs8 -topk8 -nocrypt'")]
    UnsupportedKey { tag: String },

    #[error("PKCS#12 error: {message}")]
    Pkcs12Error { message: String },
}

/// Failures running a passthrough tool such as `openssl` or `sslscan`
#[derive(Error, Debug)]
pub enum ExternalCommandError {
    #[error("failed to start '{program}': {message}")]
    Spawn { program: String, message: String },

    #[error("'{program}' exited with status {code:?}")]
    Failed { program: String, code: Option<i32> },

    #[error("'{program}' did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },
}

/// Result type alias using ToolkitError
pub type Result<T> = std::result::Result<T, ToolkitError>;
