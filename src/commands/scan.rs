//! sslscan passthrough

use crate::cli::ScanArgs;
use crate::utils::run_inherited;

pub async fn run_scan(args: &ScanArgs) -> anyhow::Result<()> {
    if args.args.is_empty() {
        anyhow::bail!("Usage: ssl scan [sslscan options] <host[:port]>");
    }
    run_inherited("sslscan", &args.args).await?;
    Ok(())
}
