//! Inline editor placement host.
//!
//! The editor widget itself lives outside the core; what lives here is the
//! state the core is responsible for: which model cell an editor is bound
//! to, and a debounced re-layout so rapid viewport resizes settle into one
//! placement computation instead of a layout storm.

use crate::debounce::DebouncedTask;
use crate::error::{GridError, Result};
use crate::grid::TimeSeriesGrid;
use crate::types::{ModelCell, PixelRect};

/// Tracks the cell an inline editor is attached to and coalesces its
/// re-layout requests.
#[derive(Debug)]
pub struct EditorHost {
    cell: Option<ModelCell>,
    relayout: DebouncedTask,
}

impl EditorHost {
    /// `delay` is the debounce window in logical time units; the grid
    /// config default is 1500.
    pub fn new(delay: u64) -> Self {
        Self {
            cell: None,
            relayout: DebouncedTask::new(delay),
        }
    }

    /// Attaches the editor to a model cell. Any pending re-layout is
    /// cancelled; the caller lays out explicitly after binding.
    pub fn bind(&mut self, cell: ModelCell) {
        self.cell = Some(cell);
        self.relayout.cancel();
    }

    /// Detaches the editor.
    pub fn unbind(&mut self) {
        self.cell = None;
        self.relayout.cancel();
    }

    pub fn cell(&self) -> Option<ModelCell> {
        self.cell
    }

    /// Schedules a re-layout, cancelling and replacing any pending one.
    pub fn request_layout(&mut self, now: u64) {
        self.relayout.schedule(now);
    }

    pub fn is_layout_pending(&self) -> bool {
        self.relayout.is_pending()
    }

    /// Computes the editor placement rectangle immediately.
    ///
    /// # Errors
    /// [`GridError::InvalidState`] when no cell is bound;
    /// [`GridError::InvalidRange`] when the bound cell fell out of the
    /// grid's bounds.
    pub fn layout(&self, grid: &TimeSeriesGrid) -> Result<PixelRect> {
        let cell = self
            .cell
            .ok_or(GridError::InvalidState("editor has no bound cell"))?;
        let row = grid.item(cell.row)?;
        grid.cell_bounds(row.id(), cell.col)
    }

    /// Runs a pending re-layout if its deadline has elapsed, returning the
    /// new placement.
    ///
    /// # Errors
    /// Same as [`EditorHost::layout`].
    pub fn poll_layout(&mut self, now: u64, grid: &TimeSeriesGrid) -> Result<Option<PixelRect>> {
        if !self.relayout.fire_due(now) {
            return Ok(None);
        }
        self.layout(grid).map(Some)
    }
}
