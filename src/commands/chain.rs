//! Certificate chain command, a highlighted `openssl s_client` run

use crate::cli::ChainArgs;
use crate::config::OpensslSettings;
use crate::output::{print_error, Highlighter};
use crate::utils::{command_line, run_captured, ExternalCommandError};
use tracing::debug;

pub async fn run_chain(args: &ChainArgs, openssl: &OpensslSettings) -> anyhow::Result<()> {
    let domain = args.domain.trim();
    if domain.is_empty() || domain.starts_with('-') {
        anyhow::bail!("Invalid domain: {:?}", args.domain);
    }

    let target = format!("{}:{}", domain, args.port);
    let cmd_args = [
        "s_client",
        "-showcerts",
        "-connect",
        target.as_str(),
        "-servername",
        domain,
    ];
    debug!("Running {}", command_line(&openssl.binary, &cmd_args));

    let output = run_captured(&openssl.binary, &cmd_args, openssl.timeout()).await?;

    let highlighter = Highlighter::for_stdout();
    highlighter.highlight_to(output.stdout.as_bytes(), std::io::stdout().lock())?;

    if !output.success() {
        for line in output.stderr.lines().filter(|l| !l.trim().is_empty()) {
            print_error(line);
        }
        return Err(ExternalCommandError::Failed {
            program: openssl.binary.clone(),
            code: output.status.code(),
        }
        .into());
    }

    Ok(())
}
