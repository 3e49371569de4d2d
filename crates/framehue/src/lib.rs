#![forbid(unsafe_code)]
// Allow these clippy lints for API ergonomics
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::use_self)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::new_without_default)]
#![allow(clippy::missing_fields_in_debug)]

//! # Framehue
//!
//! Fair, mode-aware color theme allocation for application windows.
//!
//! Every open window of a host application gets a frame color from a fixed
//! palette, chosen so that concurrently open windows look distinct:
//! - **Least used first**: a new window gets the theme held by the fewest
//!   windows, ties going to the theme acquired least recently
//! - **Two palettes**: one for light mode and one for dark mode, matched by
//!   position so every theme has a variant in each mode
//! - **Mode switches**: all live assignments move to the new palette at once,
//!   keeping usage and recency
//!
//! ## Quick Start
//!
//! ```rust
//! use framehue::{Allocator, Mode, PaletteConfig, WindowId};
//!
//! let mut alloc = Allocator::new(PaletteConfig::reference(), Mode::Light);
//!
//! let theme = alloc.acquire(WindowId(42)).unwrap();
//! println!("window 42 gets {}", theme.color());
//!
//! alloc.release(WindowId(42));
//! ```
//!
//! ## Host integration
//!
//! [`Coordinator`] maps host lifecycle events onto the allocator and pushes
//! [`ThemePayload`]s to a [`ThemeHost`]. [`ModeDetector`] resolves the
//! starting mode from a stored preference, the terminal, or the clock.

pub mod allocator;
pub mod color;
pub mod config;
pub mod detect;
pub mod host;
pub mod mode;
pub mod palette;
pub mod payload;

// Re-exports
pub use allocator::{
    AllocError, Allocator, AllocatorSnapshot, AssignmentEntry, MigrationReport, WindowId,
};
pub use color::Color;
pub use config::{Config, ConfigLoadError, ConfigSaveError};
pub use detect::{
    ColorFgBg, Detection, FALLBACK_SOURCE, ModeDetector, ModeSource, StoredPreference, TimeOfDay,
    ToolbarLuminance,
};
pub use host::{Coordinator, RecordingHost, ThemeHost};
pub use mode::{Mode, ParseModeError};
pub use palette::{
    DARK_FRAME_COLORS, LIGHT_FRAME_COLORS, Palette, PaletteConfig, PaletteValidationError,
    ThemeDescriptor, ThemeIdentity,
};
pub use payload::{ChromeColors, ThemePayload};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::allocator::{AllocError, Allocator, MigrationReport, WindowId};
    pub use crate::color::Color;
    pub use crate::config::Config;
    pub use crate::detect::{ModeDetector, ModeSource};
    pub use crate::host::{Coordinator, ThemeHost};
    pub use crate::mode::Mode;
    pub use crate::palette::{Palette, PaletteConfig, ThemeDescriptor, ThemeIdentity};
    pub use crate::payload::ThemePayload;
}
