#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! # Framehue CLI
//!
//! Host simulator and inspection tool for the `framehue` allocator.
//!
//! ## Usage
//!
//! ```bash
//! framehue palette --mode dark    # List the dark palette
//! framehue detect                 # Show the resolved mode
//! framehue replay session.txt     # Replay a lifecycle script
//! ```

pub mod cli;
pub mod script;

use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use framehue::{
    AllocError, Allocator, Color, Config, Coordinator, Detection, MigrationReport, Mode,
    ModeDetector, Palette, RecordingHost, ThemeIdentity, ThemePayload, WindowId,
};
use serde_json::json;
use tracing::{debug, info, warn};

pub use cli::{Cli, Command, DetectArgs, ModeArg, ReplayArgs};
pub use script::{EventParseError, HostEvent, parse_script};

/// Detection source reported when `--mode` forces the mode.
pub const FLAG_SOURCE: &str = "flag";

/// Loads the configuration named on the command line, or the default.
///
/// The result is the file as written; command-line overrides are applied
/// by [`run`] to a copy.
///
/// # Errors
/// Returns an error if the file cannot be read, parsed, or validated.
pub fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => Ok(Config::default()),
    }
}

/// Resolves the starting mode from the flag or the detection chain.
pub fn resolve_mode(arg: ModeArg, config: &Config) -> Detection {
    match arg.forced() {
        Some(mode) => Detection {
            mode,
            source: FLAG_SOURCE,
            persist: false,
        },
        None => ModeDetector::standard(config.preferred_mode, config.toolbar_color.clone())
            .resolve(),
    }
}

/// Saves a persistable detection as the stored preference in the
/// `--config` file. Returns true if the file was written.
///
/// # Errors
/// Returns an error if the configuration file cannot be written.
pub fn remember_detection(cli: &Cli, config: &mut Config, detection: Detection) -> Result<bool> {
    let Some(path) = cli.config.as_ref() else {
        return Ok(false);
    };
    if !detection.persist {
        return Ok(false);
    }
    config
        .remember_mode(detection.mode, path)
        .with_context(|| format!("failed to save configuration to {}", path.display()))
}

/// Runs the parsed command, writing results to `out`.
///
/// # Errors
/// Returns an error if configuration loading, script parsing, or writing
/// the output fails.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let mut saved = load_config(cli)?;
    let mut config = saved.clone();
    if let Some(toolbar) = &cli.toolbar_color {
        config.toolbar_color = Some(Color::from(toolbar.as_str()));
    }
    let detection = resolve_mode(cli.mode, &config);
    info!(mode = %detection.mode, source = detection.source, "Mode resolved");

    match &cli.command {
        Command::Palette => print_palette(&config, detection.mode, cli.json, out),
        Command::Detect(args) => {
            let stored = if args.no_save {
                false
            } else {
                remember_detection(cli, &mut saved, detection)?
            };
            print_detection(detection, stored, cli.json, out)
        }
        Command::Replay(args) => {
            let script = read_script(args)?;
            let events = parse_script(&script)?;
            debug!(events = events.len(), "Script parsed");
            replay(&config, detection.mode, &events, cli.json, out)
        }
    }
}

fn read_script(args: &ReplayArgs) -> Result<String> {
    if let Some(path) = args.path() {
        return fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()));
    }
    let mut script = String::new();
    io::stdin()
        .read_to_string(&mut script)
        .context("failed to read script from stdin")?;
    Ok(script)
}

fn print_palette<W: Write>(config: &Config, mode: Mode, json: bool, out: &mut W) -> Result<()> {
    let palette = Palette::build(&config.palette(), mode);
    if json {
        writeln!(out, "{}", serde_json::to_string(palette.current())?)?;
        return Ok(());
    }

    writeln!(out, "{mode} palette ({} themes)", palette.len())?;
    for d in palette.current() {
        writeln!(out, "  {:<9} {}", d.identity().to_string(), d.color())?;
    }
    Ok(())
}

fn print_detection<W: Write>(
    detection: Detection,
    stored: bool,
    json: bool,
    out: &mut W,
) -> Result<()> {
    if json {
        let value = json!({
            "mode": detection.mode,
            "source": detection.source,
            "stored": stored,
        });
        writeln!(out, "{value}")?;
    } else {
        writeln!(out, "{} ({})", detection.mode, detection.source)?;
    }
    Ok(())
}

/// Replays `events` against a fresh allocator in `mode`.
///
/// Every theme the coordinator applies is printed as it happens, followed
/// by a summary of the final allocation. A rejected `open` is reported and
/// the replay continues.
///
/// # Errors
/// Returns an error if writing the output fails.
pub fn replay<W: Write>(
    config: &Config,
    mode: Mode,
    events: &[HostEvent],
    json: bool,
    out: &mut W,
) -> Result<()> {
    let mut coordinator =
        Coordinator::new(Allocator::new(config.palette(), mode), RecordingHost::new());
    let mut reporter = Reporter { out, json };

    for event in events {
        match *event {
            HostEvent::Open(window) => {
                if let Err(err) = coordinator.on_window_created(window) {
                    warn!(window = %window, error = %err, "Open event rejected");
                    reporter.error(&err)?;
                }
            }
            HostEvent::Close(window) => {
                if let Some(identity) = coordinator.on_window_destroyed(window) {
                    reporter.release(window, identity)?;
                }
            }
            HostEvent::Mode(next) => {
                let report = coordinator.on_mode_changed(next);
                reporter.mode_change(&report)?;
            }
        }

        let applied = std::mem::take(&mut coordinator.host_mut().applied);
        for (window, payload) in &applied {
            let theme = coordinator
                .allocator()
                .assignment(*window)
                .map(framehue::ThemeDescriptor::identity);
            reporter.apply(*window, theme, coordinator.allocator().mode(), payload)?;
        }
    }

    reporter.summary(coordinator.allocator())
}

struct Reporter<'a, W> {
    out: &'a mut W,
    json: bool,
}

impl<W: Write> Reporter<'_, W> {
    fn apply(
        &mut self,
        window: WindowId,
        theme: Option<ThemeIdentity>,
        mode: Mode,
        payload: &ThemePayload,
    ) -> Result<()> {
        if self.json {
            let value = json!({
                "event": "apply",
                "window": window,
                "theme": theme,
                "mode": mode,
                "payload": payload,
            });
            writeln!(self.out, "{value}")?;
        } else {
            let theme = theme.map_or_else(|| "-".to_string(), |t| t.to_string());
            writeln!(
                self.out,
                "apply window={window} theme={theme} mode={mode} frame={}",
                payload.frame()
            )?;
        }
        Ok(())
    }

    fn release(&mut self, window: WindowId, theme: ThemeIdentity) -> Result<()> {
        if self.json {
            let value = json!({ "event": "release", "window": window, "theme": theme });
            writeln!(self.out, "{value}")?;
        } else {
            writeln!(self.out, "release window={window} theme={theme}")?;
        }
        Ok(())
    }

    fn mode_change(&mut self, report: &MigrationReport) -> Result<()> {
        if self.json {
            let value = json!({
                "event": "mode",
                "from": report.from,
                "to": report.to,
                "remapped": report.remapped.len(),
                "dropped": report.dropped.len(),
            });
            writeln!(self.out, "{value}")?;
        } else {
            writeln!(
                self.out,
                "mode {} -> {} remapped={} dropped={}",
                report.from,
                report.to,
                report.remapped.len(),
                report.dropped.len()
            )?;
        }
        for &(window, theme) in &report.dropped {
            if self.json {
                let value = json!({ "event": "drop", "window": window, "theme": theme });
                writeln!(self.out, "{value}")?;
            } else {
                writeln!(self.out, "drop window={window} theme={theme}")?;
            }
        }
        Ok(())
    }

    fn error(&mut self, err: &AllocError) -> Result<()> {
        if self.json {
            let value = json!({ "event": "error", "message": err.to_string() });
            writeln!(self.out, "{value}")?;
        } else {
            writeln!(self.out, "error: {err}")?;
        }
        Ok(())
    }

    fn summary(&mut self, allocator: &Allocator) -> Result<()> {
        if self.json {
            let value = json!({ "event": "summary", "snapshot": allocator.snapshot() });
            writeln!(self.out, "{value}")?;
            return Ok(());
        }

        writeln!(
            self.out,
            "summary mode={} windows={}",
            allocator.mode(),
            allocator.len()
        )?;
        for (window, d) in allocator.assignments() {
            writeln!(
                self.out,
                "  window={window} theme={} color={} usage={}",
                d.identity(),
                d.color(),
                d.usage()
            )?;
        }
        Ok(())
    }
}
