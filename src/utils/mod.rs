//! Utility modules for ssl-toolbox
//!
//! This module contains error types and the subprocess helpers shared by the
//! tools that shell out.

pub mod error;
pub mod process;

pub use error::{
    CertFileError, ConfigError, ExternalCommandError, FilterError, LookupError, Result,
    ToolkitError,
};
pub use process::{command_line, run_captured, run_inherited, CapturedOutput};
