//! timegrid - headless time-series grid control core
//!
//! A virtualization-friendly tabular grid state engine: a fixed band of
//! dimension columns beside a wide, horizontally-scrollable band of
//! time-indexed numeric period columns, with:
//! - row/column selection with incremental repaint hints
//! - dimension-column drag-reorder with atomic column-and-cell swap
//! - a period-axis scrollbar carrying highlight ticks and an aggregated
//!   sparkline series
//! - layered cell/row/control appearance resolution
//!
//! Rendering is external: the core drives a platform surface through the
//! narrow [`GridSurface`] trait and is itself the single source of truth
//! for all grid state.
//!
//! # Usage
//!
//! ```ignore
//! use timegrid::{Column, GridConfig, TimeSeriesGrid};
//!
//! let mut grid = TimeSeriesGrid::new(Box::new(surface), GridConfig::default());
//! grid.insert_column(0, Column::new("Name").with_moveable(true))?;
//! grid.set_periods(&periods);
//! grid.set_item_count(100);
//! ```

// State modules
pub mod coords;
pub mod debounce;
pub mod error;
pub mod events;
pub mod index_cache;
pub mod scrollbar;
pub mod selection;
pub mod store;
pub mod types;

// Control modules
pub mod editor;
pub mod grid;
pub mod surface;

mod reorder;

// Re-export the main control and the types its API speaks
pub use editor::EditorHost;
pub use error::{GridError, Result};
pub use events::{EventCallback, EventCollector, GridEvent};
pub use grid::{PointerButton, TimeSeriesGrid};
pub use scrollbar::{AggregationMode, ScrollState};
pub use surface::{GridSurface, PreviewHandle};

pub use types::*;

/// Get the library version
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
