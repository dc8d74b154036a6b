//! CLI entrypoint for promptweave.

#[path = "promptweave/cli.rs"]
mod cli;
#[path = "promptweave/run.rs"]
mod run;

use anyhow::Context;
use clap::Parser;
use tracing::Level;
use weave_sync::SyncSettings;

use cli::{Cli, Command};

fn main() {
    if let Err(err) = try_main() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => SyncSettings::load(path)
            .with_context(|| format!("failed to load settings {}", path.display()))?,
        None => SyncSettings::default(),
    };
    init_tracing(&settings, cli.verbose);

    match cli.command {
        Command::Declare { template, extra } => run::run_declare(&settings, &template, extra),
        Command::Sync {
            template,
            cache,
            extra,
            set,
        } => run::run_sync(
            settings,
            &template,
            &cache,
            extra.map(cli::Switch::is_on),
            &set,
        ),
        Command::Compile { template, cache } => run::run_compile(&settings, &template, &cache),
    }
}

fn init_tracing(settings: &SyncSettings, verbose: bool) {
    let level = if verbose {
        Level::DEBUG
    } else {
        settings.log_level.parse().unwrap_or(Level::INFO)
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
