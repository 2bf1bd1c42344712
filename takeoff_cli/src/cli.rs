//! Command-line interface definition using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Lumberly - stick-framing material takeoff
#[derive(Parser, Debug)]
#[command(name = "lumberly")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate the material list for a project file
    Calc {
        /// Project file (.lbr) or bare project input JSON
        #[arg(required = true)]
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,

        /// Write to this file (or directory) instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create a starter project file
    New {
        /// Path of the project file to create
        #[arg(required = true)]
        file: PathBuf,

        /// Project name shown on reports and export file names
        #[arg(short, long)]
        name: Option<String>,

        /// Estimator running the takeoff
        #[arg(short, long, env = "LUMBERLY_ESTIMATOR", default_value = "")]
        estimator: String,

        /// Job or bid number
        #[arg(short, long, default_value = "")]
        job: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Check a project file without calculating
    Validate {
        /// Project file (.lbr) or bare project input JSON
        #[arg(required = true)]
        file: PathBuf,
    },

    /// Prompt for a single-room footprint and print its takeoff
    Quick,
}

/// Output format for the calc command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    /// Extension used when `--output` names a directory.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Table => "txt",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl Cli {
    /// Log level from the `-v` count.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// Errors are printed as JSON when the caller asked for JSON output.
    pub fn wants_json_errors(&self) -> bool {
        matches!(
            self.command,
            Commands::Calc {
                format: OutputFormat::Json,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_calc_defaults() {
        let cli = Cli::parse_from(["lumberly", "calc", "garage.lbr"]);
        match cli.command {
            Commands::Calc { file, format, output } => {
                assert_eq!(file, PathBuf::from("garage.lbr"));
                assert_eq!(format, OutputFormat::Table);
                assert!(output.is_none());
            }
            _ => panic!("Expected Calc command"),
        }
        assert!(!Cli::parse_from(["lumberly", "calc", "garage.lbr"]).wants_json_errors());
    }

    #[test]
    fn test_cli_parse_calc_csv() {
        let cli = Cli::parse_from(["lumberly", "calc", "garage.lbr", "-f", "csv", "-o", "out"]);
        match cli.command {
            Commands::Calc { format, output, .. } => {
                assert_eq!(format, OutputFormat::Csv);
                assert_eq!(output, Some(PathBuf::from("out")));
            }
            _ => panic!("Expected Calc command"),
        }
    }

    #[test]
    fn test_cli_json_errors() {
        let cli = Cli::parse_from(["lumberly", "calc", "garage.lbr", "--format", "json"]);
        assert!(cli.wants_json_errors());
    }

    #[test]
    fn test_cli_parse_new() {
        let cli = Cli::parse_from(["lumberly", "new", "deck.lbr", "--name", "Smith deck", "-e", "Pat"]);
        match cli.command {
            Commands::New { file, name, estimator, force, .. } => {
                assert_eq!(file, PathBuf::from("deck.lbr"));
                assert_eq!(name.as_deref(), Some("Smith deck"));
                assert_eq!(estimator, "Pat");
                assert!(!force);
            }
            _ => panic!("Expected New command"),
        }
    }

    #[test]
    fn test_cli_verbose_after_subcommand() {
        let cli = Cli::parse_from(["lumberly", "validate", "garage.lbr", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_cli_help() {
        Cli::command().debug_assert();
    }
}
