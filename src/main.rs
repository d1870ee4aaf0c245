//! ssl - DNS and TLS toolbox
//!
//! Subcommands:
//! - `filter`: keep domains matching an A record prefix and nameserver list
//! - `decode`, `pack`, `extract`: certificate, CSR and PFX handling
//! - `chain`, `highlight`: colored `openssl s_client` output
//! - `scan`: `sslscan` passthrough

use clap::{CommandFactory, Parser};
use console::style;
use ssl_toolbox::cli::{Cli, Commands};
use ssl_toolbox::{commands, config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle color preference
    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with_target(false)
        .with_ansi(console::colors_enabled_stderr())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let settings = config::load_settings(cli.config.as_deref())?;

    match command {
        Commands::Filter(args) => commands::run_filter(&args, &settings).await,
        Commands::Decode(args) => commands::run_decode(&args),
        Commands::Pack(args) => commands::run_pack(&args),
        Commands::Extract(args) => commands::run_extract(&args),
        Commands::Chain(args) => commands::run_chain(&args, &settings.openssl).await,
        Commands::Highlight => commands::run_highlight(),
        Commands::Scan(args) => commands::run_scan(&args).await,
    }
}
