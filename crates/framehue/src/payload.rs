//! Color payloads handed to the host when a window is themed.
//!
//! A [`ThemePayload`] is what the host renders: the descriptor's frame color
//! plus a fixed set of chrome colors chosen for the descriptor's mode. Only
//! the frame slots vary between themes of the same mode.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::mode::Mode;
use crate::palette::ThemeDescriptor;

/// Payload for a single `apply_theme` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePayload {
    /// Chrome color slots.
    pub colors: ChromeColors,
}

/// Chrome color slots, as CSS color strings.
///
/// Slot names follow the host's theme manifest keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChromeColors {
    // ========================
    // Frame
    // ========================
    /// Window frame (tab strip) color; the theme's identifying color.
    pub frame: String,
    /// Frame color of unfocused windows.
    pub frame_inactive: String,

    // ========================
    // Buttons & icons
    // ========================
    pub button_background_active: String,
    pub button_background_hover: String,
    pub bookmark_text: String,
    pub icons: String,

    // ========================
    // New tab page
    // ========================
    pub ntp_background: String,
    pub ntp_text: String,

    // ========================
    // Popups
    // ========================
    pub popup: String,
    pub popup_border: String,
    pub popup_highlight: String,
    pub popup_highlight_text: String,
    pub popup_text: String,

    // ========================
    // Sidebar
    // ========================
    pub sidebar: String,
    pub sidebar_border: String,
    pub sidebar_highlight: String,
    pub sidebar_highlight_text: String,
    pub sidebar_text: String,

    // ========================
    // Tabs
    // ========================
    pub tab_background_separator: String,
    pub tab_background_text: String,
    pub tab_loading: String,
    pub tab_line: String,
    pub tab_text: String,

    // ========================
    // Toolbar & address field
    // ========================
    pub toolbar: String,
    pub toolbar_bottom_separator: String,
    pub toolbar_field: String,
    pub toolbar_field_border: String,
    pub toolbar_field_border_focus: String,
    pub toolbar_field_focus: String,
    pub toolbar_field_highlight: String,
    pub toolbar_field_highlight_text: String,
    pub toolbar_field_separator: String,
    pub toolbar_field_text: String,
    pub toolbar_field_text_focus: String,
    pub toolbar_top_separator: String,
    pub toolbar_vertical_separator: String,
}

impl ChromeColors {
    /// Chrome colors for a light-mode window with the given frame.
    pub fn light(frame: &Color) -> Self {
        let frame = frame.0.clone();
        Self {
            frame_inactive: frame.clone(),
            frame,
            button_background_active: "#e0e0e0".into(),
            button_background_hover: "#f0f0f0".into(),
            bookmark_text: "rgba(0, 0, 0, 0.8)".into(),
            icons: "rgba(0, 0, 0, 0.8)".into(),
            ntp_background: "#ffffff".into(),
            ntp_text: "rgba(0, 0, 0, 0.8)".into(),
            popup: "#ffffff".into(),
            popup_border: "#d0d0d0".into(),
            popup_highlight: "#e0e0e0".into(),
            popup_highlight_text: "black".into(),
            popup_text: "rgba(0, 0, 0, 0.8)".into(),
            sidebar: "#ffffff".into(),
            sidebar_border: "#d0d0d0".into(),
            sidebar_highlight: "#e0e0e0".into(),
            sidebar_highlight_text: "black".into(),
            sidebar_text: "rgba(0, 0, 0, 0.8)".into(),
            tab_background_separator: "transparent".into(),
            tab_background_text: "#000000".into(),
            tab_loading: "black".into(),
            tab_line: "rgba(0, 0, 0, 0.1)".into(),
            tab_text: "#000000".into(),
            toolbar: "rgba(248, 248, 248, 0.9)".into(),
            toolbar_bottom_separator: "#e0e0e0".into(),
            toolbar_field: "#ffffff".into(),
            toolbar_field_border: "transparent".into(),
            toolbar_field_border_focus: "#d0d0d0".into(),
            toolbar_field_focus: "#fafafa".into(),
            toolbar_field_highlight: "#e0e0e0".into(),
            toolbar_field_highlight_text: "black".into(),
            toolbar_field_separator: "#e0e0e0".into(),
            toolbar_field_text: "rgba(0, 0, 0, 0.8)".into(),
            toolbar_field_text_focus: "black".into(),
            toolbar_top_separator: "rgba(248, 248, 248, 0.0)".into(),
            toolbar_vertical_separator: "rgba(0, 0, 0, 0.1)".into(),
        }
    }

    /// Chrome colors for a dark-mode window with the given frame.
    pub fn dark(frame: &Color) -> Self {
        let frame = frame.0.clone();
        Self {
            frame_inactive: frame.clone(),
            frame,
            button_background_active: "#333333".into(),
            button_background_hover: "#282828".into(),
            bookmark_text: "rgba(255, 255, 255, 0.8)".into(),
            icons: "rgba(255, 255, 255, 0.8)".into(),
            ntp_background: "#000000".into(),
            ntp_text: "rgba(255, 255, 255, 0.8)".into(),
            popup: "#101010".into(),
            popup_border: "#303030".into(),
            popup_highlight: "#303030".into(),
            popup_highlight_text: "white".into(),
            popup_text: "rgba(255, 255, 255, 0.8)".into(),
            sidebar: "#101010".into(),
            sidebar_border: "#303030".into(),
            sidebar_highlight: "#303030".into(),
            sidebar_highlight_text: "white".into(),
            sidebar_text: "rgba(255, 255, 255, 0.8)".into(),
            tab_background_separator: "transparent".into(),
            tab_background_text: "#ffffff".into(),
            tab_loading: "white".into(),
            tab_line: "rgba(255, 255, 255, 0.05)".into(),
            tab_text: "#ffffff".into(),
            toolbar: "rgba(18, 18, 18, 0.8)".into(),
            toolbar_bottom_separator: "#101010".into(),
            toolbar_field: "#000000".into(),
            toolbar_field_border: "transparent".into(),
            toolbar_field_border_focus: "#303030".into(),
            toolbar_field_focus: "#111111".into(),
            toolbar_field_highlight: "#333333".into(),
            toolbar_field_highlight_text: "white".into(),
            toolbar_field_separator: "#101010".into(),
            toolbar_field_text: "rgba(255, 255, 255, 0.8)".into(),
            toolbar_field_text_focus: "white".into(),
            toolbar_top_separator: "rgba(18, 18, 18, 0.0)".into(),
            toolbar_vertical_separator: "rgba(255, 255, 255, 0.06)".into(),
        }
    }
}

impl ThemePayload {
    /// Builds the payload for a frame color in the given mode.
    pub fn new(frame: &Color, mode: Mode) -> Self {
        let colors = if mode.is_dark() {
            ChromeColors::dark(frame)
        } else {
            ChromeColors::light(frame)
        };
        Self { colors }
    }

    /// Builds the payload for a palette descriptor.
    pub fn for_descriptor(descriptor: &ThemeDescriptor) -> Self {
        Self::new(descriptor.color(), descriptor.mode())
    }

    /// Returns the frame color of this payload.
    pub fn frame(&self) -> &str {
        &self.colors.frame
    }

    /// Serialize this payload to JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
