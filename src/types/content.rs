//! Typed cell content handed to the rendering surface.

use serde::{Deserialize, Serialize};

/// What a physical cell displays. Presentation (number formatting, checkbox
/// art) is the renderer's concern; the zero-suppression rule for period
/// cells is preserved here as [`CellContent::Blank`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellContent {
    /// A period cell whose value is exactly zero renders empty.
    Blank,
    /// Header or dimension-column text.
    Text(String),
    /// A checkbox flag (dimension column carrying [`super::ColumnFlags::CHECK`]).
    Check(bool),
    /// A non-zero period value.
    Number(f64),
}
