//! Command-line interface for rocketstar.
//!
//! This module provides the CLI structure and the text renderings of the
//! catalog views for the `rocketstar` binary.

mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AstronautCommand, CheckCommand, ConfigCommand, MissionCommand, MissionsCommand, OutputFormat,
};
pub use render::{render_astronaut, render_check, render_mission, render_missions};

/// rocketstar - Browse the Apollo missions and their crews
///
/// Loads the astronaut roster and mission list, checks every crew reference,
/// and prints missions, crews and astronaut biographies.
#[derive(Debug, Parser)]
#[command(name = "rocketstar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all missions
    Missions(MissionsCommand),

    /// Show one mission and its crew
    Mission(MissionCommand),

    /// Show one astronaut and the missions they flew
    Astronaut(AstronautCommand),

    /// Load the catalog, check every crew reference and report
    Check(CheckCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.verbose, self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Check(CheckCommand { json: false }),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "rocketstar");
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(cli(0, true).verbosity(), crate::logging::Verbosity::Quiet);
        assert_eq!(cli(0, false).verbosity(), crate::logging::Verbosity::Normal);
        assert_eq!(cli(1, false).verbosity(), crate::logging::Verbosity::Verbose);
        assert_eq!(cli(2, false).verbosity(), crate::logging::Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_missions() {
        let cli = Cli::try_parse_from(["rocketstar", "missions"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Missions(MissionsCommand {
                format: OutputFormat::Table
            })
        ));
    }

    #[test]
    fn test_parse_mission() {
        let cli = Cli::try_parse_from(["rocketstar", "mission", "11", "-f", "json"]).unwrap();
        match cli.command {
            Command::Mission(cmd) => {
                assert_eq!(cmd.id, 11);
                assert_eq!(cmd.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_mission_negative_id() {
        let cli = Cli::try_parse_from(["rocketstar", "mission", "-1"]).unwrap();
        assert!(matches!(cli.command, Command::Mission(ref cmd) if cmd.id == -1));
    }

    #[test]
    fn test_parse_mission_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["rocketstar", "mission", "eleven"]).is_err());
    }

    #[test]
    fn test_parse_astronaut() {
        let cli = Cli::try_parse_from(["rocketstar", "astronaut", "armstrong"]).unwrap();
        assert!(matches!(cli.command, Command::Astronaut(ref cmd) if cmd.key == "armstrong"));
    }

    #[test]
    fn test_parse_check_json() {
        let cli = Cli::try_parse_from(["rocketstar", "check", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Check(CheckCommand { json: true })));
    }

    #[test]
    fn test_parse_with_config() {
        let cli =
            Cli::try_parse_from(["rocketstar", "-c", "/custom/config.toml", "missions"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose() {
        let cli = Cli::try_parse_from(["rocketstar", "-vv", "check"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_config_validate() {
        let cli =
            Cli::try_parse_from(["rocketstar", "config", "validate", "--file", "x.toml"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }
}
