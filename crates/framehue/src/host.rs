//! Wiring between host lifecycle events and the allocator.
//!
//! The host reports three events: a window was created, a window was
//! destroyed, the display mode changed. [`Coordinator`] turns each into the
//! matching [`Allocator`] call and, where a window's theme changed, asks the
//! [`ThemeHost`] to render the new [`ThemePayload`]. Events must be
//! delivered one at a time; each handler runs to completion.
//!
//! # Example
//!
//! ```rust
//! use framehue::{Allocator, Coordinator, Mode, PaletteConfig, ThemePayload, WindowId};
//!
//! let mut applied = Vec::new();
//! let host = |window: WindowId, payload: &ThemePayload| {
//!     applied.push((window, payload.frame().to_string()));
//! };
//! let mut coordinator =
//!     Coordinator::new(Allocator::new(PaletteConfig::reference(), Mode::Light), host);
//!
//! coordinator.on_window_created(WindowId(1)).unwrap();
//! coordinator.on_mode_changed(Mode::Dark);
//! drop(coordinator);
//!
//! assert_eq!(applied[0], (WindowId(1), "#B8103D".to_string()));
//! assert_eq!(applied[1], (WindowId(1), "#FF4081".to_string()));
//! ```

use tracing::{debug, warn};

use crate::allocator::{AllocError, Allocator, MigrationReport, WindowId};
use crate::mode::Mode;
use crate::palette::{ThemeDescriptor, ThemeIdentity};
use crate::payload::ThemePayload;

/// Receiver of theme updates.
///
/// The coordinator does not check that the host applied the payload.
pub trait ThemeHost {
    fn apply_theme(&mut self, window: WindowId, payload: &ThemePayload);
}

impl<F> ThemeHost for F
where
    F: FnMut(WindowId, &ThemePayload),
{
    fn apply_theme(&mut self, window: WindowId, payload: &ThemePayload) {
        self(window, payload);
    }
}

/// Host that records every payload it is asked to apply.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    /// Applied payloads, oldest first.
    pub applied: Vec<(WindowId, ThemePayload)>,
}

impl RecordingHost {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recent payload applied to `window`.
    pub fn last_for(&self, window: WindowId) -> Option<&ThemePayload> {
        self.applied
            .iter()
            .rev()
            .find(|(w, _)| *w == window)
            .map(|(_, payload)| payload)
    }
}

impl ThemeHost for RecordingHost {
    fn apply_theme(&mut self, window: WindowId, payload: &ThemePayload) {
        self.applied.push((window, payload.clone()));
    }
}

/// Drives an [`Allocator`] from host events.
#[derive(Debug)]
pub struct Coordinator<H> {
    allocator: Allocator,
    host: H,
}

impl<H: ThemeHost> Coordinator<H> {
    /// Creates a coordinator around an allocator and a host.
    pub fn new(allocator: Allocator, host: H) -> Self {
        Self { allocator, host }
    }

    /// Returns the allocator.
    pub fn allocator(&self) -> &Allocator {
        &self.allocator
    }

    /// Returns the host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the host mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Splits the coordinator back into its parts.
    pub fn into_parts(self) -> (Allocator, H) {
        (self.allocator, self.host)
    }

    /// Themes every window that was already open at startup, in order.
    ///
    /// Returns the number of windows themed. Windows that fail to acquire
    /// are logged and skipped.
    pub fn bootstrap<I>(&mut self, windows: I) -> usize
    where
        I: IntoIterator<Item = WindowId>,
    {
        let mut themed = 0;
        for window in windows {
            match self.on_window_created(window) {
                Ok(_) => themed += 1,
                Err(err) => warn!(window = %window, error = %err, "Bootstrap skipped window"),
            }
        }
        debug!(themed, "Bootstrap complete");
        themed
    }

    /// Handles a new window: acquire a theme and apply it.
    ///
    /// # Errors
    /// Propagates [`AllocError`] from [`Allocator::acquire`]; nothing is
    /// applied in that case.
    pub fn on_window_created(&mut self, window: WindowId) -> Result<ThemeDescriptor, AllocError> {
        let descriptor = self.allocator.acquire(window)?;
        self.host
            .apply_theme(window, &ThemePayload::for_descriptor(&descriptor));
        Ok(descriptor)
    }

    /// Handles a destroyed window. Unknown windows are ignored.
    pub fn on_window_destroyed(&mut self, window: WindowId) -> Option<ThemeIdentity> {
        self.allocator.release(window)
    }

    /// Handles a mode change: migrate and re-apply every remapped window.
    pub fn on_mode_changed(&mut self, mode: Mode) -> MigrationReport {
        let report = self.allocator.migrate(mode);
        let palette = self.allocator.palette();
        for &(window, identity) in &report.remapped {
            if let Some(descriptor) = palette.get(identity) {
                self.host
                    .apply_theme(window, &ThemePayload::for_descriptor(descriptor));
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteConfig;

    fn coordinator(mode: Mode) -> Coordinator<RecordingHost> {
        Coordinator::new(
            Allocator::new(PaletteConfig::reference(), mode),
            RecordingHost::new(),
        )
    }

    #[test]
    fn test_created_window_is_themed() {
        let mut c = coordinator(Mode::Light);
        let d = c.on_window_created(WindowId(3)).unwrap();
        let payload = c.host().last_for(WindowId(3)).unwrap();
        assert_eq!(payload.frame(), d.color().as_str());
        assert_eq!(payload.colors.tab_text, "#000000");
    }

    #[test]
    fn test_duplicate_create_applies_nothing() {
        let mut c = coordinator(Mode::Light);
        c.on_window_created(WindowId(3)).unwrap();
        assert!(c.on_window_created(WindowId(3)).is_err());
        assert_eq!(c.host().applied.len(), 1);
    }

    #[test]
    fn test_mode_change_reapplies_each_window() {
        let mut c = coordinator(Mode::Light);
        c.bootstrap([WindowId(1), WindowId(2)]);
        let report = c.on_mode_changed(Mode::Dark);

        assert_eq!(report.remapped.len(), 2);
        assert_eq!(c.host().applied.len(), 4);
        assert_eq!(c.host().last_for(WindowId(1)).unwrap().frame(), "#FF4081");
        assert_eq!(c.host().last_for(WindowId(2)).unwrap().frame(), "#E040FB");
        assert_eq!(
            c.host().last_for(WindowId(2)).unwrap().colors.tab_text,
            "#ffffff"
        );
    }

    #[test]
    fn test_destroyed_window_frees_theme() {
        let mut c = coordinator(Mode::Dark);
        let d = c.on_window_created(WindowId(5)).unwrap();
        assert_eq!(c.on_window_destroyed(WindowId(5)), Some(d.identity()));
        assert_eq!(c.on_window_destroyed(WindowId(5)), None);
        assert!(c.allocator().is_empty());
    }

    #[test]
    fn test_bootstrap_skips_duplicates() {
        let mut c = coordinator(Mode::Light);
        let themed = c.bootstrap([WindowId(1), WindowId(1), WindowId(2)]);
        assert_eq!(themed, 2);
        assert_eq!(c.allocator().len(), 2);
    }

    #[test]
    fn test_closure_host() {
        let mut frames = Vec::new();
        {
            let host = |_: WindowId, p: &ThemePayload| frames.push(p.frame().to_string());
            let mut c = Coordinator::new(
                Allocator::new(PaletteConfig::reference(), Mode::Light),
                host,
            );
            c.bootstrap([WindowId(1), WindowId(2)]);
        }
        assert_eq!(frames, vec!["#B8103D", "#7A21C7"]);
    }
}
