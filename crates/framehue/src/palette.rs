//! Mode-keyed palettes of theme descriptors.
//!
//! A [`PaletteConfig`] holds two ordered, equal-length color lists, one per
//! [`Mode`]. Position `i` in the light list and position `i` in the dark list
//! are the same theme seen in two modes; that position is the theme's
//! [`ThemeIdentity`]. A [`Palette`] is the live descriptor list built from one
//! of those lists, carrying per-theme usage and recency.
//!
//! # Example
//!
//! ```rust
//! use framehue::{Mode, Palette, PaletteConfig};
//!
//! let config = PaletteConfig::reference();
//! let palette = Palette::build(&config, Mode::Dark);
//! assert_eq!(palette.current().len(), 15);
//! assert!(palette.current().iter().all(|d| d.usage() == 0));
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{trace, warn};

use crate::color::Color;
use crate::mode::Mode;

/// Frame colors used in light mode.
pub const LIGHT_FRAME_COLORS: [&str; 15] = [
    "#B8103D", "#7A21C7", "#D6691A", "#1B5A96", "#8F0202", "#0A7A0A", "#2C1B47", "#B8226F",
    "#4A00B8", "#8B4513", "#2F4F4F", "#483D8B", "#8B008B", "#556B2F", "#8B4789",
];

/// Frame colors used in dark mode, positionally matched to [`LIGHT_FRAME_COLORS`].
pub const DARK_FRAME_COLORS: [&str; 15] = [
    "#FF4081", "#E040FB", "#FF9800", "#2196F3", "#F44336", "#4CAF50", "#9C27B0", "#FF5722",
    "#3F51B5", "#FF6F00", "#E91E63", "#009688", "#795548", "#607D8B", "#FFEB3B",
];

/// Stable key of a theme across both modes.
///
/// This is the theme's position in the configured color lists, so the
/// light and dark variants of one theme share it even though their colors
/// differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeIdentity(usize);

impl ThemeIdentity {
    /// Creates an identity for the given list position.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the list position.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ThemeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "theme#{}", self.0)
    }
}

/// One palette entry with live usage metadata.
///
/// `usage` is the number of windows currently holding this descriptor and
/// `last_used` a logical stamp of its most recent acquisition. Both are
/// written only by the [`Allocator`](crate::Allocator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeDescriptor {
    pub(crate) identity: ThemeIdentity,
    pub(crate) color: Color,
    pub(crate) mode: Mode,
    pub(crate) usage: u32,
    pub(crate) last_used: u64,
}

impl ThemeDescriptor {
    /// Returns the cross-mode identity.
    pub fn identity(&self) -> ThemeIdentity {
        self.identity
    }

    /// Returns the frame color.
    pub fn color(&self) -> &Color {
        &self.color
    }

    /// Returns the mode this descriptor belongs to.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns how many windows currently hold this descriptor.
    pub fn usage(&self) -> u32 {
        self.usage
    }

    /// Returns the logical stamp of the latest acquisition (or the build seed).
    pub fn last_used(&self) -> u64 {
        self.last_used
    }

    /// Ordering key used for selection: least used first, then least recent.
    pub fn selection_key(&self) -> (u32, u64) {
        (self.usage, self.last_used)
    }
}

/// The two ordered color lists, one per mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Light mode frame colors.
    #[serde(default)]
    pub light: Vec<Color>,

    /// Dark mode frame colors.
    #[serde(default)]
    pub dark: Vec<Color>,
}

impl PaletteConfig {
    /// Creates a configuration from two positionally matched lists.
    pub fn new(light: Vec<Color>, dark: Vec<Color>) -> Self {
        Self { light, dark }
    }

    /// Returns the built-in fifteen-color palette.
    pub fn reference() -> Self {
        Self {
            light: LIGHT_FRAME_COLORS.iter().map(|c| Color::from(*c)).collect(),
            dark: DARK_FRAME_COLORS.iter().map(|c| Color::from(*c)).collect(),
        }
    }

    /// Returns the color list for a mode.
    pub fn colors(&self, mode: Mode) -> &[Color] {
        match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        }
    }

    /// Returns the length of the longer list.
    ///
    /// Build seeds stay below this value.
    pub fn max_len(&self) -> usize {
        self.light.len().max(self.dark.len())
    }

    /// Validate that both lists are usable.
    ///
    /// A length mismatch is only logged: migration tolerates it by dropping
    /// windows whose theme has no counterpart.
    ///
    /// # Errors
    /// Returns `PaletteValidationError` if a list is empty, holds an invalid
    /// color, or repeats a color.
    pub fn validate(&self) -> Result<(), PaletteValidationError> {
        for mode in [Mode::Light, Mode::Dark] {
            let colors = self.colors(mode);
            if colors.is_empty() {
                return Err(PaletteValidationError::Empty(mode));
            }

            let mut seen = HashSet::with_capacity(colors.len());
            for (index, color) in colors.iter().enumerate() {
                let Some(hex) = color.to_hex() else {
                    return Err(PaletteValidationError::InvalidColor {
                        mode,
                        index,
                        value: color.0.clone(),
                    });
                };
                if !seen.insert(hex) {
                    return Err(PaletteValidationError::DuplicateColor {
                        mode,
                        value: color.0.clone(),
                    });
                }
            }
        }

        if self.light.len() != self.dark.len() {
            warn!(
                palette.light = self.light.len(),
                palette.dark = self.dark.len(),
                "Palette lists differ in length; unmatched windows will lose tracking on mode change"
            );
        }
        Ok(())
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self::reference()
    }
}

/// The active descriptor list for one mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    mode: Mode,
    descriptors: Vec<ThemeDescriptor>,
}

impl Palette {
    /// Builds fresh descriptors for `mode` from the configured color list.
    ///
    /// Every descriptor starts unused, seeded with its list position as
    /// `last_used`, so an untouched palette is picked in list order.
    pub fn build(config: &PaletteConfig, mode: Mode) -> Self {
        let descriptors: Vec<ThemeDescriptor> = config
            .colors(mode)
            .iter()
            .enumerate()
            .map(|(index, color)| ThemeDescriptor {
                identity: ThemeIdentity(index),
                color: color.clone(),
                mode,
                usage: 0,
                last_used: index as u64,
            })
            .collect();
        trace!(palette.mode = %mode, palette.len = descriptors.len(), "Palette built");
        Self { mode, descriptors }
    }

    /// Returns the mode of this palette.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the active descriptor list.
    pub fn current(&self) -> &[ThemeDescriptor] {
        &self.descriptors
    }

    /// Returns the descriptor with the given identity.
    pub fn get(&self, identity: ThemeIdentity) -> Option<&ThemeDescriptor> {
        self.descriptors.get(identity.0)
    }

    pub(crate) fn get_mut(&mut self, identity: ThemeIdentity) -> Option<&mut ThemeDescriptor> {
        self.descriptors.get_mut(identity.0)
    }

    /// Returns the number of descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if the palette has no descriptors.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Error validating palette color lists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaletteValidationError {
    #[error("{0} palette is empty")]
    Empty(Mode),
    #[error("Invalid color value '{value}' at {mode} palette position {index}")]
    InvalidColor {
        mode: Mode,
        index: usize,
        value: String,
    },
    #[error("Color '{value}' appears more than once in the {mode} palette")]
    DuplicateColor { mode: Mode, value: String },
}
