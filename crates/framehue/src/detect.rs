//! Display mode detection.
//!
//! The allocator needs a resolved [`Mode`] before its first palette is
//! built. [`ModeDetector`] asks a chain of [`ModeSource`]s in order and takes
//! the first answer; if none answers it falls back to [`Mode::Light`].
//!
//! The standard chain is: a stored preference, the terminal's `COLORFGBG`
//! variable, the host toolbar color's luminance, then a time-of-day guess
//! (dark from 20:00 through 06:59).
//!
//! Answers from the terminal and toolbar sources are worth remembering;
//! [`Detection::persist`] tells the caller to save them as the stored
//! preference for the next session.

use chrono::{Local, Timelike};
use tracing::{debug, trace};

use crate::color::Color;
use crate::mode::Mode;

/// Name reported when no source answered.
pub const FALLBACK_SOURCE: &str = "fallback";

/// One way of guessing the display mode.
pub trait ModeSource {
    /// Short name used in logs and [`Detection::source`].
    fn name(&self) -> &'static str;

    /// Returns the mode, or `None` if this source cannot tell.
    fn query(&self) -> Option<Mode>;

    /// Whether an answer from this source should become the stored preference.
    fn persist(&self) -> bool {
        true
    }
}

/// A previously stored preference.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredPreference(pub Option<Mode>);

impl ModeSource for StoredPreference {
    fn name(&self) -> &'static str {
        "stored"
    }

    fn query(&self) -> Option<Mode> {
        self.0
    }

    fn persist(&self) -> bool {
        false
    }
}

/// Reads the `COLORFGBG` convention (`"fg;bg"` or `"fg;default;bg"`).
#[derive(Debug, Clone, Default)]
pub struct ColorFgBg {
    value: Option<String>,
}

impl ColorFgBg {
    /// Uses the given variable value.
    pub fn new(value: Option<String>) -> Self {
        Self { value }
    }

    /// Reads `COLORFGBG` from the process environment.
    pub fn from_env() -> Self {
        Self::new(std::env::var("COLORFGBG").ok())
    }
}

impl ModeSource for ColorFgBg {
    fn name(&self) -> &'static str {
        "colorfgbg"
    }

    fn query(&self) -> Option<Mode> {
        let value = self.value.as_deref()?;
        let bg = value.rsplit(';').next()?.trim().parse::<u8>().ok()?;
        // ANSI 0-6 and 8 are dark backgrounds; 7 and the bright colors are light.
        match bg {
            0..=6 | 8 => Some(Mode::Dark),
            7 | 9..=15 => Some(Mode::Light),
            _ => None,
        }
    }
}

/// Reads the host toolbar color: dark when its luminance is below one half.
#[derive(Debug, Clone, Default)]
pub struct ToolbarLuminance {
    color: Option<Color>,
}

impl ToolbarLuminance {
    /// Luminance below this value means a dark toolbar.
    pub const THRESHOLD: f64 = 0.5;

    /// Uses the given toolbar color, if the host reported one.
    pub fn new(color: Option<Color>) -> Self {
        Self { color }
    }
}

impl ModeSource for ToolbarLuminance {
    fn name(&self) -> &'static str {
        "toolbar"
    }

    fn query(&self) -> Option<Mode> {
        let color = self.color.as_ref()?;
        let Some(luminance) = color.luminance() else {
            trace!(toolbar = %color, "Toolbar color is not a hex value");
            return None;
        };
        trace!(toolbar = %color, luminance, "Toolbar luminance");
        if luminance < Self::THRESHOLD {
            Some(Mode::Dark)
        } else {
            Some(Mode::Light)
        }
    }
}

/// Guesses from the local hour: dark in the evening and early morning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeOfDay {
    hour: Option<u32>,
}

impl TimeOfDay {
    /// Uses the current local time.
    pub fn now() -> Self {
        Self { hour: None }
    }

    /// Uses a fixed hour (0-23).
    pub fn at(hour: u32) -> Self {
        Self { hour: Some(hour) }
    }
}

impl ModeSource for TimeOfDay {
    fn name(&self) -> &'static str {
        "time-of-day"
    }

    fn query(&self) -> Option<Mode> {
        let hour = self.hour.unwrap_or_else(|| Local::now().hour());
        if hour >= 20 || hour <= 6 {
            Some(Mode::Dark)
        } else {
            Some(Mode::Light)
        }
    }

    fn persist(&self) -> bool {
        false
    }
}

/// Result of [`ModeDetector::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub mode: Mode,
    /// Name of the source that answered, or [`FALLBACK_SOURCE`].
    pub source: &'static str,
    /// True if the mode should be saved as the stored preference.
    pub persist: bool,
}

/// Ordered chain of mode sources.
#[derive(Default)]
pub struct ModeDetector {
    sources: Vec<Box<dyn ModeSource>>,
}

impl std::fmt::Debug for ModeDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("ModeDetector")
            .field("sources", &names)
            .finish()
    }
}

impl ModeDetector {
    /// Creates a detector with no sources; it always falls back.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard chain: stored preference, `COLORFGBG`, toolbar
    /// luminance, time of day.
    pub fn standard(preferred: Option<Mode>, toolbar: Option<Color>) -> Self {
        Self::new()
            .with_source(StoredPreference(preferred))
            .with_source(ColorFgBg::from_env())
            .with_source(ToolbarLuminance::new(toolbar))
            .with_source(TimeOfDay::now())
    }

    /// Appends a source to the chain.
    pub fn with_source(mut self, source: impl ModeSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Asks each source in turn and returns the first answer.
    pub fn resolve(&self) -> Detection {
        for source in &self.sources {
            trace!(detect.source = source.name(), "Querying mode source");
            if let Some(mode) = source.query() {
                debug!(detect.source = source.name(), detect.mode = %mode, "Mode detected");
                return Detection {
                    mode,
                    source: source.name(),
                    persist: source.persist(),
                };
            }
        }
        debug!("No mode source answered; using light");
        Detection {
            mode: Mode::Light,
            source: FALLBACK_SOURCE,
            persist: false,
        }
    }
}
