//! Highlight `openssl s_client` output piped in on stdin

use crate::output::Highlighter;

pub fn run_highlight() -> anyhow::Result<()> {
    Highlighter::for_stdout().highlight_to(std::io::stdin().lock(), std::io::stdout().lock())?;
    Ok(())
}
