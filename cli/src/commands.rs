pub mod dir;
pub mod httpcheck;
pub mod mode;
pub mod portscan;
pub mod report;
pub mod subdomain;
pub mod vulncheck;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use recon_common::candidate::wordlist;
use recon_common::config::{Config, EngineSettings};
use recon_common::error::ConfigError;
use recon_common::target::Target;
use recon_core::recon::Recon;

#[derive(Parser)]
#[command(name = "recon")]
#[command(about = "Web reconnaissance: ports, subdomains, directories and known vulnerabilities.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Reduce output: -q drops headers, -qq prints findings only
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Do not print the start-up banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Stop after this many seconds, keeping the results gathered so far
    #[arg(long, value_name = "SECS", global = true)]
    pub max_duration: Option<u64>,

    #[command(flatten)]
    pub tuning: Tuning,
}

/// Overrides for the per-scan engine defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct Tuning {
    /// Maximum number of probes in flight at once
    #[arg(long, value_name = "N", global = true)]
    pub concurrency: Option<usize>,

    /// Per-probe timeout in milliseconds
    #[arg(long = "timeout-ms", value_name = "MS", global = true)]
    pub timeout_ms: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the well-known TCP ports (1-1024)
    #[command(alias = "p")]
    Portscan { target: Target },
    /// Enumerate subdomains from a wordlist
    #[command(alias = "s")]
    Subdomain {
        target: Target,
        /// One label per line; replaces the built-in list
        #[arg(long)]
        wordlist: Option<PathBuf>,
    },
    /// Discover directories from a wordlist
    #[command(alias = "d")]
    Dir {
        target: Target,
        /// One path segment per line; replaces the built-in list
        #[arg(long)]
        wordlist: Option<PathBuf>,
    },
    /// Check the HTTP status of the target
    #[command(alias = "h")]
    Httpcheck { target: Target },
    /// Scan ports, then run vulnerability scripts against the open ones
    #[command(alias = "v")]
    Vulncheck { target: Target },
    /// Run every scan and write a Markdown report
    #[command(alias = "r")]
    Report { target: Target },
    /// Run a predefined set of scans
    #[command(alias = "m")]
    Mode {
        #[arg(long, value_enum, default_value_t = ReconMode::Full)]
        mode: ReconMode,
        #[arg(long)]
        host: Target,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReconMode {
    /// HTTP check, ports, subdomains, directories, vulnerabilities and report
    Full,
    /// Ports and vulnerabilities only
    Less,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            quiet: self.quiet,
            no_banner: self.no_banner,
            max_duration: self.max_duration.map(Duration::from_secs),
        }
    }
}

/// State shared by every command of one invocation.
pub struct Session {
    pub cfg: Config,
    pub recon: Recon,
    tuning: Tuning,
}

impl Session {
    pub fn new(cfg: Config, tuning: Tuning, recon: Recon) -> Self {
        Self { cfg, recon, tuning }
    }

    /// A use case's defaults with the command line overrides applied.
    pub fn settings(&self, defaults: EngineSettings) -> Result<EngineSettings, ConfigError> {
        defaults.with_overrides(
            self.tuning.concurrency,
            self.tuning.timeout_ms.map(Duration::from_millis),
        )
    }

    /// Returns `true` (and says so) if a previous step was cancelled.
    pub fn stop_requested(&self) -> bool {
        if self.recon.is_cancelled() {
            recon_common::warn!("Run cancelled, skipping remaining steps");
            return true;
        }
        false
    }
}

fn candidates(path: Option<&PathBuf>, builtin: fn() -> Vec<String>) -> Result<Vec<String>, ConfigError> {
    match path {
        Some(path) => wordlist::load(path),
        None => Ok(builtin()),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_defaults_to_full() {
        let cli = CommandLine::try_parse_from(["recon", "mode", "--host", "example.com"]).unwrap();
        match cli.command {
            Commands::Mode { mode, host } => {
                assert_eq!(mode, ReconMode::Full);
                assert_eq!(host.host(), "example.com");
            }
            _ => panic!("expected mode subcommand"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = CommandLine::try_parse_from([
            "recon", "d", "example.com", "--concurrency", "5", "--timeout-ms", "250", "-qq",
            "--max-duration", "30",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Dir { wordlist: None, .. }));
        assert_eq!(cli.quiet, 2);
        assert_eq!(cli.config().max_duration, Some(Duration::from_secs(30)));

        let session = Session::new(cli.config(), cli.tuning.clone(), Recon::new());
        let settings = session.settings(EngineSettings::directory()).unwrap();
        assert_eq!(settings.concurrency(), 5);
        assert_eq!(settings.probe_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let cli = CommandLine::try_parse_from(["recon", "portscan", "10.0.0.1", "--concurrency", "0"]).unwrap();
        let session = Session::new(cli.config(), cli.tuning.clone(), Recon::new());
        assert!(matches!(
            session.settings(EngineSettings::port_scan()),
            Err(ConfigError::ZeroConcurrency)
        ));
    }

    #[test]
    fn malformed_target_fails_parsing() {
        assert!(CommandLine::try_parse_from(["recon", "portscan", "ftp://example.com"]).is_err());
        assert!(CommandLine::try_parse_from(["recon", "mode", "--mode", "half", "--host", "x.com"]).is_err());
    }
}
