//! CLI definitions for promptweave.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "promptweave",
    version,
    about = "Template field declarations, control sync, and prompt compilation",
    after_help = "Examples:\n  promptweave declare prompt.txt\n  promptweave sync prompt.txt --cache values.json --set level=3\n  promptweave compile prompt.txt --cache values.json"
)]
pub struct Cli {
    /// Settings file (TOML).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Log debug details to stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the fields a template declares.
    Declare {
        /// Template file.
        template: PathBuf,
        /// Include fields of the extra block.
        #[arg(long)]
        extra: bool,
    },
    /// Reconcile a cache file with a template and apply value changes.
    Sync {
        /// Template file.
        template: PathBuf,
        /// Cache file (created if missing).
        #[arg(long)]
        cache: PathBuf,
        /// Set the extra-active flag before reconciling.
        #[arg(long, value_enum)]
        extra: Option<Switch>,
        /// Control value to set after reconciling, as NAME=VALUE.
        #[arg(long = "set", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },
    /// Render a template with the values of a cache file.
    Compile {
        /// Template file.
        template: PathBuf,
        /// Cache file.
        #[arg(long)]
        cache: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

fn parse_assignment(text: &str) -> Result<(String, String), String> {
    match text.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{text}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sync_command() {
        let cli = Cli::try_parse_from([
            "promptweave",
            "sync",
            "t.txt",
            "--cache",
            "c.json",
            "--extra",
            "on",
            "--set",
            "level=3",
            "--set",
            "mood = calm",
        ])
        .unwrap();
        let Command::Sync { extra, set, .. } = cli.command else {
            panic!("expected sync");
        };
        assert_eq!(extra, Some(Switch::On));
        assert_eq!(
            set,
            [
                ("level".to_string(), "3".to_string()),
                ("mood".to_string(), " calm".to_string())
            ]
        );
    }

    #[test]
    fn rejects_bare_assignment() {
        assert!(parse_assignment("level").is_err());
        assert!(parse_assignment("=3").is_err());
    }
}
