//! Window-to-theme allocation.
//!
//! The [`Allocator`] owns the active [`Palette`] and the assignment table
//! mapping each tracked window to a [`ThemeIdentity`]. It hands out the
//! least-used, least-recently-used theme on [`acquire`](Allocator::acquire),
//! returns it on [`release`](Allocator::release), and remaps every live
//! assignment onto a freshly built palette on [`migrate`](Allocator::migrate).
//!
//! For every descriptor, `usage` equals the number of table entries holding
//! its identity. Every mutator keeps that true.
//!
//! # Example
//!
//! ```rust
//! use framehue::{Allocator, Mode, PaletteConfig, WindowId};
//!
//! let mut alloc = Allocator::new(PaletteConfig::reference(), Mode::Light);
//! let first = alloc.acquire(WindowId(1)).unwrap();
//! let second = alloc.acquire(WindowId(2)).unwrap();
//! assert_ne!(first.identity(), second.identity());
//!
//! let report = alloc.migrate(Mode::Dark);
//! assert_eq!(report.remapped.len(), 2);
//! assert_eq!(alloc.assignment(WindowId(1)).unwrap().identity(), first.identity());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::color::Color;
use crate::mode::Mode;
use crate::palette::{Palette, PaletteConfig, ThemeDescriptor, ThemeIdentity};

/// Host-assigned window identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for WindowId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Allocation state for one host process.
#[derive(Debug, Clone)]
pub struct Allocator {
    config: PaletteConfig,
    palette: Palette,
    assignments: BTreeMap<WindowId, ThemeIdentity>,
    clock: u64,
}

/// Outcome of a [`Allocator::migrate`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Mode the allocator migrated from.
    pub from: Mode,
    /// Mode the allocator migrated to.
    pub to: Mode,
    /// Windows that now hold the new-mode descriptor of their theme.
    pub remapped: Vec<(WindowId, ThemeIdentity)>,
    /// Windows whose theme has no counterpart in the new palette.
    ///
    /// These are no longer tracked; the host keeps showing the old theme
    /// until the window is themed again.
    pub dropped: Vec<(WindowId, ThemeIdentity)>,
}

impl MigrationReport {
    /// Returns true if every tracked window was remapped.
    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }

    /// Returns an [`AllocError::UnmatchedMigrationEntry`] per dropped window.
    pub fn errors(&self) -> impl Iterator<Item = AllocError> + '_ {
        self.dropped
            .iter()
            .map(|&(window, identity)| AllocError::UnmatchedMigrationEntry {
                window,
                identity,
                mode: self.to,
            })
    }
}

/// Serializable view of the allocation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocatorSnapshot {
    pub mode: Mode,
    pub themes: Vec<ThemeDescriptor>,
    pub assignments: Vec<AssignmentEntry>,
}

/// One row of the assignment table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentEntry {
    pub window: WindowId,
    pub identity: ThemeIdentity,
    pub color: Color,
}

impl Allocator {
    /// Creates an allocator with the palette for `mode` active.
    pub fn new(config: PaletteConfig, mode: Mode) -> Self {
        let palette = Palette::build(&config, mode);
        let clock = config.max_len() as u64;
        debug!(
            allocator.mode = %mode,
            allocator.palette_len = palette.len(),
            "Allocator created"
        );
        Self {
            config,
            palette,
            assignments: BTreeMap::new(),
            clock,
        }
    }

    /// Returns the active mode.
    pub fn mode(&self) -> Mode {
        self.palette.mode()
    }

    /// Returns the active palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Returns the color configuration.
    pub fn config(&self) -> &PaletteConfig {
        &self.config
    }

    /// Returns the number of tracked windows.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns true if no window is tracked.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Returns the descriptor currently held by `window`.
    pub fn assignment(&self, window: WindowId) -> Option<&ThemeDescriptor> {
        let identity = self.assignments.get(&window)?;
        self.palette.get(*identity)
    }

    /// Iterates tracked windows in ascending id order with their descriptors.
    pub fn assignments(&self) -> impl Iterator<Item = (WindowId, &ThemeDescriptor)> + '_ {
        self.assignments
            .iter()
            .filter_map(|(window, identity)| Some((*window, self.palette.get(*identity)?)))
    }

    /// Assigns the least-used, least-recently-used theme to `window`.
    ///
    /// # Errors
    /// Returns [`AllocError::DuplicateAssignment`] if `window` is already
    /// tracked (its existing assignment is kept), or
    /// [`AllocError::EmptyPalette`] if the active palette has no entries.
    pub fn acquire(&mut self, window: WindowId) -> Result<ThemeDescriptor, AllocError> {
        if let Some(&identity) = self.assignments.get(&window) {
            warn!(window = %window, theme = %identity, "Window already has a theme");
            return Err(AllocError::DuplicateAssignment { window, identity });
        }

        let mode = self.palette.mode();
        let identity = select(&self.palette).ok_or(AllocError::EmptyPalette { mode })?;

        self.clock += 1;
        let stamp = self.clock;
        let descriptor = self
            .palette
            .get_mut(identity)
            .ok_or(AllocError::EmptyPalette { mode })?;
        descriptor.usage += 1;
        descriptor.last_used = stamp;
        let acquired = descriptor.clone();
        self.assignments.insert(window, identity);

        debug!(
            window = %window,
            theme = %identity,
            color = %acquired.color(),
            usage = acquired.usage(),
            "Theme acquired"
        );
        Ok(acquired)
    }

    /// Stops tracking `window` and frees its theme.
    ///
    /// Returns the identity that was freed, or `None` if `window` was not
    /// tracked; releasing an unknown or already-released window is a no-op.
    pub fn release(&mut self, window: WindowId) -> Option<ThemeIdentity> {
        let Some(identity) = self.assignments.remove(&window) else {
            trace!(window = %window, "Release of untracked window ignored");
            return None;
        };

        if let Some(descriptor) = self.palette.get_mut(identity) {
            if descriptor.usage == 0 {
                warn!(
                    window = %window,
                    theme = %identity,
                    "Released theme had no recorded usage; keeping count at zero"
                );
            } else {
                descriptor.usage -= 1;
            }
            debug!(
                window = %window,
                theme = %identity,
                usage = descriptor.usage,
                "Theme released"
            );
        }
        Some(identity)
    }

    /// Replaces the active palette with the one for `mode`.
    ///
    /// The new palette is built in full before it is installed. Usage and
    /// recency are transplanted by identity from the old descriptors, and
    /// every tracked window keeps its identity. Windows whose identity has
    /// no counterpart in the new palette are dropped from tracking and
    /// listed in [`MigrationReport::dropped`].
    pub fn migrate(&mut self, mode: Mode) -> MigrationReport {
        let from = self.palette.mode();
        let mut next = Palette::build(&self.config, mode);

        for old in self.palette.current() {
            if let Some(new) = next.get_mut(old.identity) {
                new.usage = old.usage;
                new.last_used = old.last_used;
            }
        }

        let mut remapped = Vec::with_capacity(self.assignments.len());
        let mut dropped = Vec::new();
        self.assignments.retain(|&window, &mut identity| {
            if next.get(identity).is_some() {
                remapped.push((window, identity));
                true
            } else {
                dropped.push((window, identity));
                false
            }
        });

        for &(window, identity) in &dropped {
            warn!(
                window = %window,
                theme = %identity,
                mode = %mode,
                "No matching theme in new palette; window dropped from tracking"
            );
        }

        self.palette = next;
        info!(
            allocator.from = %from,
            allocator.to = %mode,
            remapped = remapped.len(),
            dropped = dropped.len(),
            "Palette migrated"
        );

        MigrationReport {
            from,
            to: mode,
            remapped,
            dropped,
        }
    }

    /// Returns a serializable copy of the allocation state.
    pub fn snapshot(&self) -> AllocatorSnapshot {
        AllocatorSnapshot {
            mode: self.palette.mode(),
            themes: self.palette.current().to_vec(),
            assignments: self
                .assignments()
                .map(|(window, d)| AssignmentEntry {
                    window,
                    identity: d.identity(),
                    color: d.color().clone(),
                })
                .collect(),
        }
    }
}

/// Picks the descriptor with the smallest `(usage, last_used)` key.
fn select(palette: &Palette) -> Option<ThemeIdentity> {
    let chosen = palette
        .current()
        .iter()
        .min_by_key(|d| d.selection_key())?;
    trace!(
        theme = %chosen.identity(),
        usage = chosen.usage(),
        last_used = chosen.last_used(),
        "Theme selected"
    );
    Some(chosen.identity())
}

/// Error raised by allocation operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    #[error("No themes available in the {mode} palette")]
    EmptyPalette { mode: Mode },
    #[error("Window {window} already holds {identity}")]
    DuplicateAssignment {
        window: WindowId,
        identity: ThemeIdentity,
    },
    #[error("Window {window} holds {identity}, which has no counterpart in the {mode} palette")]
    UnmatchedMigrationEntry {
        window: WindowId,
        identity: ThemeIdentity,
        mode: Mode,
    },
}
