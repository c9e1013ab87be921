//! Command-line argument parsing for HealthBuddy
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// HealthBuddy - BMI guidance and supplement screening in the terminal
#[derive(Parser, Debug)]
#[command(name = "healthbuddy")]
#[command(author = "Jerome (Kubashen) Naidoo")]
#[command(version)]
#[command(about = "BMI classification, recommendations and supplement screening", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile to read and update (defaults to profile.default_uid)
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress all output except final result)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute BMI from weight and height and show guidance
    Bmi {
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,

        /// Height in centimeters
        #[arg(long)]
        height: f64,

        /// Store the measurements on the profile
        #[arg(long)]
        save: bool,
    },

    /// Classify a BMI value (non-numeric input is treated as unknown)
    Classify {
        #[arg(value_name = "BMI", allow_hyphen_values = true)]
        bmi: String,
    },

    /// Show exercise, diet and risk guidance for a BMI value
    Recommend {
        /// BMI value; the profile's BMI when omitted
        #[arg(value_name = "BMI", allow_hyphen_values = true)]
        bmi: Option<String>,
    },

    /// Show the exercise plan for a BMI value
    Exercises {
        /// BMI value; the profile's BMI when omitted
        #[arg(value_name = "BMI", allow_hyphen_values = true)]
        bmi: Option<String>,
    },

    /// View or edit the health profile
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Screen a recognized supplement against the profile's conditions
    Screen {
        /// Supplement label or name, e.g. "홍삼" or "Red ginseng"
        supplement: String,

        /// Image the recognition came from, kept in history
        #[arg(long)]
        image: Option<String>,

        /// Append the result to the history log
        #[arg(long)]
        record: bool,
    },

    /// Read a suitability verdict from a reasoning-endpoint reply
    Verdict {
        /// File holding the reply text ("-" for stdin)
        #[arg(value_name = "FILE")]
        reply: PathBuf,

        /// Supplement the verdict is about; records a history entry when given
        #[arg(long)]
        supplement: Option<String>,
    },

    /// Browse the analysis history
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },

    /// Display current configuration
    Config,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Show the profile and its BMI assessment
    Show,

    /// Update profile fields; BMI is recomputed from weight and height
    Set {
        #[arg(long)]
        weight: Option<f64>,

        #[arg(long)]
        height: Option<f64>,

        #[arg(long)]
        age: Option<f64>,

        /// male or female
        #[arg(long)]
        gender: Option<String>,

        /// low, moderate or high
        #[arg(long)]
        activity: Option<String>,

        /// Replace recorded conditions (repeatable)
        #[arg(long = "disease")]
        diseases: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// List entries, optionally filtered
    List {
        /// Case-insensitive supplement name search
        #[arg(long)]
        search: Option<String>,

        /// Only entries from this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
    },

    /// Remove all entries
    Clear,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Verbosity from flags, falling back to the configured default when none given
    pub fn verbosity_or(&self, configured: Verbosity) -> Verbosity {
        if self.quiet || self.verbose > 0 {
            self.verbosity()
        } else {
            configured
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Parse the configuration spelling
    pub fn from_config(value: &str) -> Option<Self> {
        match value {
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" => Some(Verbosity::Verbose),
            "very_verbose" => Some(Verbosity::VeryVerbose),
            _ => None,
        }
    }

    /// Check if should show status messages
    pub fn show_status(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if should show detailed events
    pub fn show_events(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }

    /// Check if should show internal lookups
    pub fn show_trace(&self) -> bool {
        matches!(self, Verbosity::VeryVerbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_verbosity_quiet() {
        let args = parse(&["healthbuddy", "-q", "config"]);
        assert_eq!(args.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_normal() {
        let args = parse(&["healthbuddy", "config"]);
        assert_eq!(args.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_very_verbose() {
        let args = parse(&["healthbuddy", "-vv", "config"]);
        assert_eq!(args.verbosity(), Verbosity::VeryVerbose);
    }

    #[test]
    fn test_verbosity_or_prefers_flags() {
        let args = parse(&["healthbuddy", "config"]);
        assert_eq!(args.verbosity_or(Verbosity::Verbose), Verbosity::Verbose);

        let args = parse(&["healthbuddy", "-q", "config"]);
        assert_eq!(args.verbosity_or(Verbosity::Verbose), Verbosity::Quiet);
    }

    #[test]
    fn test_bmi_command() {
        let args = parse(&["healthbuddy", "bmi", "--weight", "70", "--height", "175"]);
        match args.command {
            Commands::Bmi { weight, height, save } => {
                assert_eq!(weight, 70.0);
                assert_eq!(height, 175.0);
                assert!(!save);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_classify_accepts_sentinel_text() {
        let args = parse(&["healthbuddy", "classify", "N/A"]);
        assert!(matches!(args.command, Commands::Classify { ref bmi } if bmi == "N/A"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = parse(&["healthbuddy", "recommend", "24.1", "--json", "--user", "bob"]);
        assert!(args.json);
        assert_eq!(args.user.as_deref(), Some("bob"));
    }

    #[test]
    fn test_profile_set_repeatable_disease() {
        let args = parse(&[
            "healthbuddy", "profile", "set", "--disease", "gout", "--disease", "diabetes",
        ]);
        match args.command {
            Commands::Profile { action: ProfileCommand::Set { diseases, .. } } => {
                assert_eq!(diseases, vec!["gout".to_string(), "diabetes".to_string()]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_history_date_parsing() {
        let args = parse(&["healthbuddy", "history", "list", "--date", "2026-03-01"]);
        match args.command {
            Commands::History { action: HistoryCommand::List { date, search } } => {
                assert_eq!(date, chrono::NaiveDate::from_ymd_opt(2026, 3, 1));
                assert!(search.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Args::try_parse_from(["healthbuddy"]).is_err());
    }

    #[test]
    fn test_verbosity_methods() {
        assert!(!Verbosity::Quiet.show_status());
        assert!(Verbosity::Normal.show_status());

        assert!(!Verbosity::Normal.show_events());
        assert!(Verbosity::Verbose.show_events());

        assert!(!Verbosity::Verbose.show_trace());
        assert!(Verbosity::VeryVerbose.show_trace());
    }

    #[test]
    fn test_verbosity_from_config() {
        assert_eq!(Verbosity::from_config("verbose"), Some(Verbosity::Verbose));
        assert_eq!(Verbosity::from_config("loud"), None);
        assert_eq!(Verbosity::Quiet.as_str(), "quiet");
    }
}
