//! Appearance types and the layered override lookup.
//!
//! A cell's effective appearance is resolved in three layers: cell-level
//! override if present, else row-level value, else the control default from
//! [`GridConfig`]. The resolution is a single explicit function so no caller
//! has to reimplement the fallback chain.

use serde::{Deserialize, Serialize};

/// Font description consumed by the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontStyle {
    pub family: String,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            family: "Arial".to_string(),
            size: 10.0,
            bold: false,
            italic: false,
        }
    }
}

/// Optional appearance overrides carried at row and cell granularity.
///
/// Colors are CSS-style hex strings; images are renderer-resolved keys, not
/// platform handles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    pub background: Option<String>,
    pub foreground: Option<String>,
    pub font: Option<FontStyle>,
    pub image: Option<String>,
}

impl Appearance {
    pub fn is_empty(&self) -> bool {
        self.background.is_none()
            && self.foreground.is_none()
            && self.font.is_none()
            && self.image.is_none()
    }
}

/// Control-level defaults and behavior configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Default cell background color.
    pub background: String,
    /// Default cell foreground color.
    pub foreground: String,
    /// Default cell font.
    pub font: FontStyle,
    /// Whether the header row is initially visible.
    pub header_visible: bool,
    /// chrono format string for period labels (header cells and the
    /// scrollbar label).
    pub date_format: String,
    /// Debounce delay, in logical time units, for editor re-layout.
    pub relayout_delay: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
            foreground: "#000000".to_string(),
            font: FontStyle {
                family: "Arial".to_string(),
                size: 10.0,
                bold: true,
                italic: false,
            },
            header_visible: false,
            date_format: "%b %Y".to_string(),
            relayout_delay: crate::debounce::DEFAULT_RELAYOUT_DELAY,
        }
    }
}

/// Two-level override resolution: cell override, else row value, else the
/// control default.
pub fn resolve<'a, T>(cell: Option<&'a T>, row: Option<&'a T>, default: &'a T) -> &'a T {
    cell.or(row).unwrap_or(default)
}
