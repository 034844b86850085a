//! Column drag-reorder gesture state.
//!
//! The machine has two states: idle and dragging. The grid decides when a
//! press starts a drag and whether a release commits or cancels; this type
//! owns the captured source column, the lazily-created preview image, and
//! the pointer-suppression side effects, so every exit path releases both.

use tracing::debug;

use crate::error::Result;
use crate::surface::{GridSurface, PreviewHandle};
use crate::types::PixelRect;

#[derive(Debug, Default)]
pub(crate) struct ColumnDrag {
    source: Option<usize>,
    preview: Option<PreviewHandle>,
}

impl ColumnDrag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<usize> {
        self.source
    }

    /// Idle → Dragging: captures the source column and suppresses the
    /// surface's native pointer-move handling so the gesture is not
    /// misread as a resize or selection drag.
    pub fn begin(&mut self, source: usize, surface: &mut dyn GridSurface) {
        debug!(source, "column drag start");
        self.source = Some(source);
        self.preview = None;
        surface.set_pointer_suppressed(true);
    }

    /// Pointer moved while dragging: creates the preview strip on first
    /// move, then repositions it under the pointer, clamped to
    /// `[0, max_x]` so it cannot be dragged past the last dimension
    /// column.
    pub fn update(
        &mut self,
        x: f32,
        strip: PixelRect,
        max_x: f32,
        surface: &mut dyn GridSurface,
    ) -> Result<()> {
        if self.source.is_none() {
            return Ok(());
        }
        let preview = match self.preview {
            Some(handle) => handle,
            None => {
                let handle = surface.create_column_preview(strip)?;
                self.preview = Some(handle);
                handle
            }
        };
        surface.move_column_preview(preview, x.clamp(0.0, max_x))
    }

    /// Dragging → Idle: releases the preview and restores native
    /// pointer-move handling, returning the captured source column. Used
    /// by both the commit and the cancel path; preview release failures
    /// are logged, never propagated; teardown must always complete.
    pub fn finish(&mut self, surface: &mut dyn GridSurface) -> Option<usize> {
        if let Some(preview) = self.preview.take() {
            if let Err(error) = surface.release_column_preview(preview) {
                debug!(%error, "drag preview release failed");
            }
        }
        surface.set_pointer_suppressed(false);
        self.source.take()
    }
}
