//! Dimension column descriptor.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Style flags controlling how a column's cells are rendered.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ColumnFlags: u8 {
        /// Cell text is a boolean flag rendered as a checkbox.
        const CHECK = 1;
    }
}

/// A fixed, non-temporal column. Order within the grid is significant and
/// mutable via drag-reorder or programmatic swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    text: String,
    width: u32,
    moveable: bool,
    resizable: bool,
    flags: ColumnFlags,
}

impl Column {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            width: DEFAULT_COLUMN_WIDTH,
            moveable: false,
            resizable: true,
            flags: ColumnFlags::empty(),
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_moveable(mut self, moveable: bool) -> Self {
        self.moveable = moveable;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn with_flags(mut self, flags: ColumnFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub(crate) fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    pub fn is_moveable(&self) -> bool {
        self.moveable
    }

    pub fn set_moveable(&mut self, moveable: bool) {
        self.moveable = moveable;
    }

    pub fn is_resizable(&self) -> bool {
        self.resizable
    }

    pub fn flags(&self) -> ColumnFlags {
        self.flags
    }
}

/// Initial width for a column created without an explicit width.
pub const DEFAULT_COLUMN_WIDTH: u32 = 80;
