//! Command-line interface for `framehue`.
//!
//! # Examples
//!
//! ```bash
//! # Show the palette for the detected mode
//! framehue palette
//!
//! # Show the dark palette from a custom configuration
//! framehue --config colors.toml palette --mode dark
//!
//! # Replay a lifecycle script as JSON lines
//! framehue replay session.txt --json
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use framehue::Mode;

/// Fair, mode-aware window theme allocation.
///
/// Inspects palettes, resolves the display mode, and replays host window
/// lifecycle scripts against the allocator.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "framehue",
    author,
    version,
    about = "Fair, mode-aware window theme allocation"
)]
pub struct Cli {
    /// Path to a configuration file (TOML, JSON, or YAML)
    #[arg(long, short = 'c', global = true, env = "FRAMEHUE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Display mode
    ///
    /// `auto` resolves the mode from the stored preference, the terminal,
    /// the toolbar color, then the time of day
    #[arg(long, short = 'm', global = true, default_value = "auto")]
    pub mode: ModeArg,

    /// Host toolbar color used by `auto` detection (overrides the config)
    #[arg(long, global = true, env = "FRAMEHUE_TOOLBAR_COLOR")]
    pub toolbar_color: Option<String>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging (repeat for more)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the palette for the active mode
    Palette,

    /// Print the resolved display mode and the source that decided it
    ///
    /// With `--config`, a mode found by the terminal or toolbar source is
    /// saved as the stored preference for later runs
    Detect(DetectArgs),

    /// Replay a window lifecycle script
    Replay(ReplayArgs),
}

/// Arguments for the detect subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct DetectArgs {
    /// Do not save the detected mode to the configuration file
    #[arg(long)]
    pub no_save: bool,
}

/// Arguments for the replay subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ReplayArgs {
    /// Script file; `-` or omitted reads standard input
    pub file: Option<PathBuf>,
}

impl ReplayArgs {
    /// Returns the script path, or `None` for standard input.
    pub fn path(&self) -> Option<&PathBuf> {
        self.file.as_ref().filter(|p| p.as_os_str() != "-")
    }
}

/// Mode selection on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModeArg {
    /// Resolve through the detection chain
    #[default]
    Auto,
    Light,
    Dark,
}

impl ModeArg {
    /// Returns the forced mode, or `None` for `auto`.
    pub fn forced(self) -> Option<Mode> {
        match self {
            Self::Auto => None,
            Self::Light => Some(Mode::Light),
            Self::Dark => Some(Mode::Dark),
        }
    }
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Default log directive for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["framehue", "palette"]).unwrap();
        assert_eq!(cli.mode, ModeArg::Auto);
        assert!(!cli.json);
        assert_eq!(cli.log_level(), "warn");
        assert!(matches!(cli.command, Command::Palette));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["framehue", "palette", "--mode", "dark", "--json"]).unwrap();
        assert_eq!(cli.mode.forced(), Some(Mode::Dark));
        assert!(cli.json);
    }

    #[test]
    fn test_verbosity_count() {
        let cli = Cli::try_parse_from(["framehue", "-vv", "detect"]).unwrap();
        assert_eq!(cli.log_level(), "debug");
        let cli = Cli::try_parse_from(["framehue", "-vvvv", "detect"]).unwrap();
        assert_eq!(cli.log_level(), "trace");
    }

    #[test]
    fn test_replay_stdin_marker() {
        let cli = Cli::try_parse_from(["framehue", "replay", "-"]).unwrap();
        let Command::Replay(args) = cli.command else {
            panic!("expected replay");
        };
        assert!(args.path().is_none());

        let cli = Cli::try_parse_from(["framehue", "replay", "events.txt"]).unwrap();
        let Command::Replay(args) = cli.command else {
            panic!("expected replay");
        };
        assert_eq!(args.path().unwrap().to_str(), Some("events.txt"));
    }

    #[test]
    fn test_detect_flags() {
        let args = ["framehue", "detect", "--no-save", "--toolbar-color", "#121212"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Detect(args) = cli.command else {
            panic!("expected detect");
        };
        assert!(args.no_save);
        assert_eq!(cli.toolbar_color.as_deref(), Some("#121212"));
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["framehue", "--mode", "sepia", "palette"]).is_err());
    }
}
