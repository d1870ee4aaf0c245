//! Command implementations for ssl-toolbox

pub mod chain;
pub mod decode;
pub mod extract;
pub mod filter;
pub mod highlight;
pub mod pack;
pub mod scan;

pub use chain::run_chain;
pub use decode::run_decode;
pub use extract::run_extract;
pub use filter::run_filter;
pub use highlight::run_highlight;
pub use pack::run_pack;
pub use scan::run_scan;

/// Prompt for a password on an attended terminal.
///
/// Returns `None` when stderr is not a terminal, so scripted runs never block.
pub(crate) fn prompt_password(prompt: &str, confirm: bool) -> anyhow::Result<Option<String>> {
    if !console::Term::stderr().is_term() {
        return Ok(None);
    }

    let mut input = dialoguer::Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true);
    if confirm {
        input = input.with_confirmation("Confirm password", "Passwords do not match");
    }

    Ok(Some(input.interact()?))
}
