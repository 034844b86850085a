//! Rendering-surface trait for pluggable platform implementations.
//!
//! This is the narrow seam between the grid state core and whatever draws
//! it. The surface holds only transient, derived display state; the grid
//! is always the source of truth. Implementations translate pixels to
//! physical cells, answer viewport queries, honor repaint and scroll
//! requests, mirror the scrollbar state, and host the transient
//! drag-preview image used by column reordering.

use crate::error::Result;
use crate::scrollbar::ScrollState;
use crate::types::{CellRect, PhysicalCell, PixelRect};

/// Opaque handle to a drag-preview image created by the surface.
///
/// Using a handle after [`GridSurface::release_column_preview`] is a
/// disposed-resource error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewHandle(pub u64);

/// Trait for rendering surfaces.
///
/// All coordinates crossing this boundary are physical: any header offset
/// is already applied by the caller via the coordinate mapper.
pub trait GridSurface {
    /// Physical cell under a pixel point, if any.
    fn cell_at(&self, x: f32, y: f32) -> Option<PhysicalCell>;

    /// Pixel rectangle of a physical cell.
    fn cell_rect(&self, cell: PhysicalCell) -> PixelRect;

    /// The currently visible physical cell rectangle (the rightmost column
    /// and bottom row may be only partially visible).
    fn visible_cells(&self) -> CellRect;

    /// Whether a physical cell is fully, not just partially, visible.
    fn is_cell_fully_visible(&self, cell: PhysicalCell) -> bool;

    /// Number of physical rows the viewport can show.
    fn visible_row_count(&self) -> usize;

    /// Viewport height in pixels (used to size the drag-preview strip).
    fn client_height(&self) -> f32;

    /// Average character width, used only to suggest initial period-column
    /// widths.
    fn approx_char_width(&self) -> f32 {
        8.0
    }

    /// Line height, used only to suggest initial row heights.
    fn line_height(&self) -> f32 {
        16.0
    }

    /// Requests a repaint of the whole grid.
    fn redraw_all(&mut self);

    /// Requests a repaint of a physical cell rectangle.
    fn redraw_cells(&mut self, rect: CellRect);

    /// Scrolls the viewport so the given physical cell is visible.
    fn scroll_to_cell(&mut self, cell: PhysicalCell);

    /// Mirrors the scrollbar display state onto the platform widget.
    fn sync_scrollbar(&mut self, scroll: &ScrollState);

    /// Suppresses or restores the surface's native pointer-move handling
    /// (resize/selection drags) while a column drag is in progress.
    fn set_pointer_suppressed(&mut self, suppressed: bool);

    /// Creates a translucent full-height preview image of a column strip.
    ///
    /// # Errors
    /// Surface-specific failure to allocate the image.
    fn create_column_preview(&mut self, strip: PixelRect) -> Result<PreviewHandle>;

    /// Repositions a preview image horizontally under the pointer.
    ///
    /// # Errors
    /// [`crate::GridError::Disposed`] when the handle was released.
    fn move_column_preview(&mut self, preview: PreviewHandle, x: f32) -> Result<()>;

    /// Releases a preview image and any transient overlay hosting it.
    ///
    /// # Errors
    /// [`crate::GridError::Disposed`] when the handle was already released.
    fn release_column_preview(&mut self, preview: PreviewHandle) -> Result<()>;
}
