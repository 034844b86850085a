//! The time-series grid control core.
//!
//! `TimeSeriesGrid` owns all grid state (rows, dimension columns, the
//! period axis, selection, scrollbar state, and the drag-reorder gesture)
//! and drives the external rendering surface through
//! the [`GridSurface`] seam. All operations are synchronous and run to
//! completion on the caller's thread; listeners observe changes strictly in
//! arrival order.

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::coords::CoordinateMapper;
use crate::error::{GridError, Result};
use crate::events::{EventCallback, GridEvent};
use crate::index_cache::IndexCache;
use crate::reorder::ColumnDrag;
use crate::scrollbar::{aggregate, focus_scroll_position, AggregationMode, ScrollState};
use crate::selection::SelectionTracker;
use crate::store::{EntityStore, COLUMN_GROWTH, ROW_GROWTH};
use crate::surface::GridSurface;
use crate::types::{
    resolve, CellContent, CellRect, Column, ColumnFlags, FontStyle, GridConfig, ModelCell,
    PhysicalCell, PixelRect, Row, RowId,
};

/// Pointer button reported with press/release input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// The grid control: a fixed dimension-column band beside a horizontally
/// scrollable band of period columns, one row type, and a sparkline
/// scrollbar kept in sync with selection and viewport.
pub struct TimeSeriesGrid {
    surface: Box<dyn GridSurface>,
    config: GridConfig,
    mapper: CoordinateMapper,
    columns: EntityStore<Column>,
    items: EntityStore<Row>,
    periods: Vec<NaiveDate>,
    period_column: Column,
    scroll: ScrollState,
    scroll_mode: AggregationMode,
    selection: SelectionTracker,
    drag: ColumnDrag,
    index_cache: IndexCache,
    callbacks: Vec<EventCallback>,
    next_row_id: u64,
    disposed: bool,
}

impl TimeSeriesGrid {
    pub fn new(surface: Box<dyn GridSurface>, config: GridConfig) -> Self {
        let mapper = CoordinateMapper::new(config.header_visible);
        let mut grid = Self {
            surface,
            config,
            mapper,
            columns: EntityStore::new(COLUMN_GROWTH),
            items: EntityStore::new(ROW_GROWTH),
            periods: Vec::new(),
            period_column: Column::new("").with_resizable(false),
            scroll: ScrollState::new(),
            scroll_mode: AggregationMode::default(),
            selection: SelectionTracker::new(),
            drag: ColumnDrag::new(),
            index_cache: IndexCache::new(),
            callbacks: Vec::new(),
            next_row_id: 0,
            disposed: false,
        };
        grid.surface.sync_scrollbar(&grid.scroll);
        grid
    }

    // ------------------------------------------------------------------
    // Counts and basic queries
    // ------------------------------------------------------------------

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn period_count(&self) -> usize {
        self.periods.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total physical column width: dimension band plus period band.
    pub fn total_column_count(&self) -> usize {
        self.columns.len() + self.periods.len()
    }

    pub fn header_visible(&self) -> bool {
        self.mapper.header_visible()
    }

    pub fn periods(&self) -> &[NaiveDate] {
        &self.periods
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn aggregation_mode(&self) -> AggregationMode {
        self.scroll_mode
    }

    // ------------------------------------------------------------------
    // Rows
    // ------------------------------------------------------------------

    /// Position of a row by identity, using the amortized index cache.
    pub fn index_of(&self, id: RowId) -> Option<usize> {
        self.index_cache
            .find(self.items.as_slice(), |row| row.id() == id)
    }

    pub fn items(&self) -> &[Row] {
        self.items.as_slice()
    }

    /// # Errors
    /// [`GridError::InvalidRange`] when `index >= item_count`.
    pub fn item(&self, index: usize) -> Result<&Row> {
        self.items.get(index).ok_or(GridError::InvalidRange {
            index,
            len: self.items.len(),
        })
    }

    /// Row under a pixel point, if the point hits a data row.
    pub fn item_at_point(&self, x: f32, y: f32) -> Option<&Row> {
        let cell = self.surface.cell_at(x, y)?;
        let row = self.mapper.model_row(cell.row)?;
        self.items.get(row)
    }

    /// Grows or shrinks the row band to exactly `count` rows. Shrinking
    /// re-trims capacity and drops any selection on removed rows.
    pub fn set_item_count(&mut self, count: usize) {
        if self.disposed || count == self.items.len() {
            return;
        }
        if count > self.items.len() {
            while self.items.len() < count {
                let row = self.new_row();
                self.items.push(row);
            }
        } else {
            self.items.truncate_to(count);
            self.selection.clamp_rows(self.mapper.physical_row(count));
            self.refresh_selection_views(false);
        }
        self.surface.redraw_all();
    }

    /// Inserts a fresh row at `index`.
    ///
    /// # Errors
    /// [`GridError::InvalidRange`] when `index > item_count`.
    pub fn insert_item(&mut self, index: usize) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        let row = self.new_row();
        self.items.insert(index, row)?;
        self.selection
            .remap_row_inserted(self.mapper.physical_row(index));
        self.surface.redraw_all();
        Ok(())
    }

    /// Removes the inclusive row range `start..=end`.
    ///
    /// # Errors
    /// [`GridError::InvalidRange`] when `start > end` or `end >= item_count`.
    pub fn remove_range(&mut self, start: usize, end: usize) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        if start > end || end >= self.items.len() {
            return Err(GridError::InvalidRange {
                index: end,
                len: self.items.len(),
            });
        }
        for index in (start..=end).rev() {
            self.selection
                .remap_row_removed(self.mapper.physical_row(index));
        }
        self.items.remove_range(start, end)?;
        self.refresh_selection_views(false);
        self.surface.redraw_all();
        Ok(())
    }

    /// Removes the given row indices (duplicates tolerated).
    ///
    /// # Errors
    /// [`GridError::InvalidRange`] if any index is out of range; nothing is
    /// removed in that case.
    pub fn remove_indices(&mut self, indices: &[usize]) -> Result<()> {
        if self.disposed || indices.is_empty() {
            return Ok(());
        }
        let mut sorted: Vec<usize> = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        if let Some(&last) = sorted.last() {
            if last >= self.items.len() {
                return Err(GridError::InvalidRange {
                    index: last,
                    len: self.items.len(),
                });
            }
        }
        for &index in sorted.iter().rev() {
            self.selection
                .remap_row_removed(self.mapper.physical_row(index));
            self.items.remove(index)?;
        }
        self.refresh_selection_views(false);
        self.surface.redraw_all();
        Ok(())
    }

    /// Removes every row.
    pub fn remove_all(&mut self) {
        if self.disposed {
            return;
        }
        self.items.truncate_to(0);
        self.selection.clamp_rows(self.mapper.header_rows());
        self.index_cache.reset();
        self.refresh_selection_views(false);
        self.surface.redraw_all();
    }

    /// Resets one row's content and overrides without removing it.
    ///
    /// # Errors
    /// [`GridError::InvalidRange`] when `index >= item_count`.
    pub fn clear_item(&mut self, index: usize) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        let len = self.items.len();
        let row = self
            .items
            .get_mut(index)
            .ok_or(GridError::InvalidRange { index, len })?;
        row.clear();
        self.surface.redraw_all();
        Ok(())
    }

    /// Resets every row's content and overrides.
    pub fn clear_all(&mut self) {
        if self.disposed {
            return;
        }
        for row in self.items.iter_mut() {
            row.clear();
        }
        self.surface.redraw_all();
    }

    /// Applies a mutation to one row and requests a repaint.
    ///
    /// # Errors
    /// [`GridError::InvalidRange`] when `index >= item_count`.
    pub fn update_item(&mut self, index: usize, f: impl FnOnce(&mut Row)) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        let len = self.items.len();
        let row = self
            .items
            .get_mut(index)
            .ok_or(GridError::InvalidRange { index, len })?;
        f(row);
        self.surface.redraw_all();
        Ok(())
    }

    /// Sets one dimension-column text.
    ///
    /// # Errors
    /// [`GridError::InvalidRange`] for a bad row or column index.
    pub fn set_item_text(&mut self, index: usize, col: usize, text: &str) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        if col >= self.columns.len() {
            return Err(GridError::InvalidRange {
                index: col,
                len: self.columns.len(),
            });
        }
        let len = self.items.len();
        let row = self
            .items
            .get_mut(index)
            .ok_or(GridError::InvalidRange { index, len })?;
        if row.set_text(col, text) {
            self.surface.redraw_all();
        }
        Ok(())
    }

    /// Sets one period value.
    ///
    /// # Errors
    /// [`GridError::InvalidRange`] for a bad row or period index.
    pub fn set_item_value(&mut self, index: usize, period: usize, value: f64) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        if period >= self.periods.len() {
            return Err(GridError::InvalidRange {
                index: period,
                len: self.periods.len(),
            });
        }
        let len = self.items.len();
        let row = self
            .items
            .get_mut(index)
            .ok_or(GridError::InvalidRange { index, len })?;
        if row.set_value(period, value) {
            self.surface.redraw_all();
        }
        Ok(())
    }

    fn new_row(&mut self) -> Row {
        let id = RowId(self.next_row_id);
        self.next_row_id += 1;
        Row::new(id, self.columns.len(), self.periods.len())
    }

    // ------------------------------------------------------------------
    // Columns and periods
    // ------------------------------------------------------------------

    /// Column descriptor for a physical column index; every period index
    /// resolves to the shared period-column descriptor.
    ///
    /// # Errors
    /// [`GridError::InvalidRange`] when `index >= total_column_count`.
    pub fn column(&self, index: usize) -> Result<&Column> {
        if index < self.columns.len() {
            return self.columns.get(index).ok_or(GridError::InvalidRange {
                index,
                len: self.columns.len(),
            });
        }
        if index < self.total_column_count() {
            return Ok(&self.period_column);
        }
        Err(GridError::InvalidRange {
            index,
            len: self.total_column_count(),
        })
    }

    /// Inserts a dimension column, opening an empty cell in every row.
    ///
    /// # Errors
    /// [`GridError::InvalidRange`] when `index > column_count`.
    pub fn insert_column(&mut self, index: usize, column: Column) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        self.columns.insert(index, column)?;
        for row in self.items.iter_mut() {
            row.insert_column(index);
        }
        self.surface.redraw_all();
        Ok(())
    }

    /// Applies a mutation to a dimension column and requests a repaint.
    ///
    /// # Errors
    /// [`GridError::InvalidRange`] when `index >= column_count`.
    pub fn update_column(&mut self, index: usize, f: impl FnOnce(&mut Column)) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        let len = self.columns.len();
        let column = self
            .columns
            .get_mut(index)
            .ok_or(GridError::InvalidRange { index, len })?;
        f(column);
        self.surface.redraw_all();
        Ok(())
    }

    /// Sets a dimension column's width and notifies listeners.
    ///
    /// # Errors
    /// [`GridError::InvalidRange`] when `index >= column_count`.
    pub fn set_column_width(&mut self, index: usize, width: u32) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        let len = self.columns.len();
        let column = self
            .columns
            .get_mut(index)
            .ok_or(GridError::InvalidRange { index, len })?;
        column.set_width(width);
        self.emit(GridEvent::ColumnResized { index, width });
        self.surface.redraw_all();
        Ok(())
    }

    /// Whether a physical column can be resized by the user: period
    /// columns never are.
    pub fn is_column_resizable(&self, physical_col: usize) -> bool {
        let col = self.mapper.model_column(physical_col);
        self.columns
            .get(col)
            .is_some_and(|column| column.is_resizable())
    }

    /// Atomically exchanges two dimension columns and, for every row, the
    /// cell data at the two indices. A swap involving a non-moveable
    /// column is a silent no-op.
    ///
    /// # Errors
    /// [`GridError::InvalidRange`] when either index is outside the
    /// dimension band.
    pub fn swap_columns(&mut self, first: usize, second: usize) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        let len = self.columns.len();
        let both_moveable = {
            let a = self
                .columns
                .get(first)
                .ok_or(GridError::InvalidRange { index: first, len })?;
            let b = self
                .columns
                .get(second)
                .ok_or(GridError::InvalidRange { index: second, len })?;
            a.is_moveable() && b.is_moveable()
        };
        if !both_moveable {
            debug!(first, second, "column swap rejected: not moveable");
            return Ok(());
        }

        self.columns.swap(first, second)?;
        for row in self.items.iter_mut() {
            row.swap_columns(first, second);
        }
        debug!(first, second, "columns swapped");
        self.emit(GridEvent::ColumnMoved { index: first });
        self.emit(GridEvent::ColumnMoved { index: second });
        self.surface.redraw_all();
        Ok(())
    }

    /// Replaces the period axis. The sequence is copied, sorted ascending,
    /// and every row's value band is resized to match.
    pub fn set_periods(&mut self, periods: &[NaiveDate]) {
        if self.disposed {
            return;
        }
        let mut sorted = periods.to_vec();
        sorted.sort_unstable();
        self.periods = sorted;
        for row in self.items.iter_mut() {
            row.resize_periods(self.periods.len());
        }
        self.selection.clamp_cols(self.columns.len() + self.periods.len());
        self.scroll
            .set_maximum(1usize.max(self.periods.len().saturating_sub(1)));
        self.update_scroll_highlights();
        self.update_scroll_data();
        self.surface.sync_scrollbar(&self.scroll);
        self.surface.redraw_all();
    }

    /// Shows or hides the header row, remapping the physical selection so
    /// the model-space selection is unchanged.
    pub fn set_header_visible(&mut self, visible: bool) {
        if self.disposed || visible == self.mapper.header_visible() {
            return;
        }
        let delta: isize = if visible { 1 } else { -1 };
        self.mapper.set_header_visible(visible);
        self.selection.offset_rows(delta);
        self.surface.redraw_all();
    }

    /// Sets the chrono format string used for period labels.
    ///
    /// # Errors
    /// [`GridError::InvalidArgument`] for an empty format string.
    pub fn set_date_format(&mut self, format: &str) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        if format.is_empty() {
            return Err(GridError::InvalidArgument("empty date format"));
        }
        self.config.date_format = format.to_string();
        let label = self
            .periods
            .get(self.scroll.position())
            .map(|date| self.format_period(*date));
        self.scroll.set_label(label);
        self.surface.sync_scrollbar(&self.scroll);
        self.surface.redraw_all();
        Ok(())
    }

    /// Switches the scrollbar aggregation mode and recomputes immediately.
    pub fn set_aggregation_mode(&mut self, mode: AggregationMode) {
        if self.disposed {
            return;
        }
        self.scroll_mode = mode;
        self.update_scroll_data();
        self.surface.sync_scrollbar(&self.scroll);
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Selected model rows, unique and ascending.
    pub fn selection_indices(&self) -> Vec<usize> {
        self.selection
            .selected_model_rows(&self.mapper, self.items.len())
    }

    /// Identities of the selected rows.
    pub fn selected_items(&self) -> Vec<RowId> {
        self.selection_indices()
            .into_iter()
            .filter_map(|index| self.items.get(index).map(Row::id))
            .collect()
    }

    /// The focused cell in model coordinates, if it is inside the current
    /// bounds.
    pub fn focus_cell(&self) -> Option<ModelCell> {
        self.selection.focus_cell(
            &self.mapper,
            self.columns.len(),
            self.periods.len(),
            self.items.len(),
        )
    }

    pub fn deselect_all(&mut self) {
        if self.disposed {
            return;
        }
        self.selection.clear();
        self.refresh_selection_views(true);
    }

    /// Replaces the selection with full-width row selections for the given
    /// model rows; out-of-range indices are skipped.
    pub fn set_selection(&mut self, indices: &[usize]) {
        if self.disposed {
            return;
        }
        let width = self.total_column_count();
        let mut cells = Vec::new();
        for &index in indices {
            if index >= self.items.len() {
                continue;
            }
            let row = self.mapper.physical_row(index);
            for col in 0..width {
                cells.push(PhysicalCell::new(col, row));
            }
        }
        self.selection.set_cells(cells);
        self.refresh_selection_views(true);
    }

    /// Adds the given model rows to the selection (union with the current
    /// row selection).
    pub fn select(&mut self, indices: &[usize]) {
        if self.disposed {
            return;
        }
        let mut union = self.selection_indices();
        union.extend(indices.iter().copied());
        union.sort_unstable();
        union.dedup();
        self.set_selection(&union);
    }

    /// Selects a single model cell and focuses it.
    ///
    /// # Errors
    /// [`GridError::InvalidRange`] when the column or row is out of range.
    pub fn set_cell_selection(&mut self, col: usize, row: usize) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        if col >= self.total_column_count() {
            return Err(GridError::InvalidRange {
                index: col,
                len: self.total_column_count(),
            });
        }
        if row >= self.items.len() {
            return Err(GridError::InvalidRange {
                index: row,
                len: self.items.len(),
            });
        }
        let cell = self
            .mapper
            .physical_cell(ModelCell::new(col, row));
        self.selection.clear();
        self.selection.add_cell(cell);
        self.selection.set_focus(Some(cell));
        self.refresh_selection_views(true);
        Ok(())
    }

    /// Surface gesture input: a physical cell was selected and focused.
    pub fn cell_selected(&mut self, cell: PhysicalCell, extend: bool) {
        if self.disposed {
            return;
        }
        if !extend {
            self.selection.clear();
        }
        self.selection.add_cell(cell);
        self.selection.set_focus(Some(cell));
        self.refresh_selection_views(true);
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Scrolls the focused cell into view.
    pub fn show_selection(&mut self) {
        if self.disposed {
            return;
        }
        if let Some(cell) = self.selection.focus_physical() {
            self.surface.scroll_to_cell(cell);
        }
    }

    /// Scrolls a row into view, keeping the focused column if any.
    pub fn show_item(&mut self, id: RowId) {
        if self.disposed {
            return;
        }
        let Some(index) = self.index_of(id) else {
            return;
        };
        let col = self
            .selection
            .focus_physical()
            .map_or(0, |cell| cell.col);
        let row = self.mapper.physical_row(index);
        self.surface.scroll_to_cell(PhysicalCell::new(col, row));
    }

    /// Scrolls the period band to a date: the exact period if present,
    /// otherwise the insertion point in the sorted sequence.
    pub fn scroll_to(&mut self, date: NaiveDate) {
        if self.disposed || self.periods.is_empty() {
            return;
        }
        let index = match self.periods.binary_search(&date) {
            Ok(index) | Err(index) => index.min(self.periods.len() - 1),
        };
        self.scrollbar_moved(index);
    }

    // ------------------------------------------------------------------
    // Scrollbar synchronization
    // ------------------------------------------------------------------

    /// Scrollbar input: the user (or `scroll_to`) moved the thumb.
    pub fn scrollbar_moved(&mut self, position: usize) {
        if self.disposed || position >= self.periods.len() {
            return;
        }
        self.scroll.set_position(position);
        let label = self
            .periods
            .get(position)
            .map(|date| self.format_period(*date));
        self.scroll.set_label(label);

        let visible = self.visible_data_cells();
        let col = self.columns.len() + position;
        let limit = self
            .mapper
            .physical_row(self.items.len().saturating_sub(self.surface.visible_row_count()));
        let row = visible.row.min(limit);
        self.surface.scroll_to_cell(PhysicalCell::new(col, row));
        self.surface.sync_scrollbar(&self.scroll);
    }

    /// Viewport resize/scroll trigger: re-derives thumb size and enabled
    /// state from the fully-visible data columns.
    pub fn viewport_changed(&mut self) {
        if self.disposed {
            return;
        }
        let visible = self.visible_data_cells();
        self.scroll.sync_thumb(visible.width);
        self.surface.sync_scrollbar(&self.scroll);
    }

    /// The fully-visible physical data-cell rectangle: the surface's
    /// visible rectangle with a partially-visible rightmost column or
    /// bottom row trimmed off.
    fn visible_data_cells(&self) -> CellRect {
        let mut rect = self.surface.visible_cells();

        if rect.width > 0 && (self.mapper.header_visible() || rect.row < self.items.len()) {
            let probe_row = if self.mapper.header_visible() { 0 } else { rect.row };
            let last_col = PhysicalCell::new(rect.right() - 1, probe_row);
            if !self.surface.is_cell_fully_visible(last_col) {
                rect.width -= 1;
            }
        }

        if rect.height > 0 && (!self.columns.is_empty() || rect.col < self.periods.len()) {
            let probe_col = if self.columns.is_empty() { rect.col } else { 0 };
            let last_row = PhysicalCell::new(probe_col, rect.bottom() - 1);
            if !self.surface.is_cell_fully_visible(last_row) {
                rect.height -= 1;
            }
        }

        rect
    }

    /// Auto-scroll on focus: bring a focused period column back into the
    /// visible window with the minimal position delta.
    fn update_scroll_selection(&mut self) {
        let Some(focus) = self.selection.focus_physical() else {
            return;
        };
        let col = self.mapper.model_column(focus.col);
        if col < self.columns.len() {
            return;
        }
        let visible = self.visible_data_cells();
        if let Some(position) = focus_scroll_position(col, self.columns.len(), &visible) {
            self.scroll.set_position(position);
        }
    }

    fn update_scroll_highlights(&mut self) {
        let highlights = self
            .selection
            .selected_period_columns(&self.mapper, self.columns.len());
        self.scroll.set_highlights(highlights);
    }

    fn update_scroll_data(&mut self) {
        let focus_row = self
            .selection
            .focus_physical()
            .and_then(|cell| self.mapper.model_row(cell.row))
            .filter(|&row| row < self.items.len());
        let selected = self.selection_indices();
        let data = aggregate(
            self.scroll_mode,
            self.items.as_slice(),
            focus_row,
            &selected,
            self.periods.len(),
        );
        trace!(points = data.len(), mode = ?self.scroll_mode, "scroll data recomputed");
        self.scroll.set_data_points(data);
    }

    /// The shared recompute pipeline run after any selection or focus
    /// change: repaint only rows whose membership changed, then re-derive
    /// every piece of scrollbar state.
    fn refresh_selection_views(&mut self, notify: bool) {
        let rows = self.selection_indices();
        if let Some(changed) = self.selection.take_repaint_rows(rows.clone()) {
            self.repaint_rows(&changed);
        }
        self.update_scroll_selection();
        self.update_scroll_highlights();
        self.update_scroll_data();
        self.surface.sync_scrollbar(&self.scroll);
        if notify {
            self.emit(GridEvent::SelectionChanged {
                selected_rows: rows,
            });
        }
    }

    fn repaint_rows(&mut self, rows: &[usize]) {
        let width = self.visible_data_cells().width + self.columns.len() + 1;
        for &index in rows {
            let rect = CellRect::new(0, self.mapper.physical_row(index), width, 1);
            self.surface.redraw_cells(rect);
        }
    }

    // ------------------------------------------------------------------
    // Content, appearance, and bounds
    // ------------------------------------------------------------------

    /// Typed content of a physical cell, for the renderer.
    ///
    /// # Errors
    /// [`GridError::InvalidRange`] when the cell is outside the grid.
    pub fn content_at(&self, cell: PhysicalCell) -> Result<CellContent> {
        let col = self.mapper.model_column(cell.col);
        if col >= self.total_column_count() {
            return Err(GridError::InvalidRange {
                index: col,
                len: self.total_column_count(),
            });
        }

        if self.mapper.is_header_row(cell.row) {
            if let Some(column) = self.columns.get(col) {
                return Ok(CellContent::Text(column.text().to_string()));
            }
            let period = self
                .periods
                .get(col - self.columns.len())
                .ok_or(GridError::InvalidRange {
                    index: col,
                    len: self.total_column_count(),
                })?;
            return Ok(CellContent::Text(self.format_period(*period)));
        }

        let row_index = self
            .mapper
            .model_row(cell.row)
            .ok_or(GridError::InvalidRange {
                index: cell.row,
                len: self.mapper.physical_row(self.items.len()),
            })?;
        let row = self.item(row_index)?;

        if let Some(column) = self.columns.get(col) {
            let text = row.text(col).unwrap_or("");
            if column.flags().contains(ColumnFlags::CHECK) {
                return Ok(CellContent::Check(text.eq_ignore_ascii_case("true")));
            }
            return Ok(CellContent::Text(text.to_string()));
        }

        let value = row.value(col - self.columns.len());
        if value.abs() < f64::EPSILON {
            return Ok(CellContent::Blank);
        }
        Ok(CellContent::Number(value))
    }

    /// Effective background for a model cell: cell override, else row
    /// value, else the control default. Period cells use the row layer
    /// only.
    ///
    /// # Errors
    /// [`GridError::InvalidRange`] for a bad row index.
    pub fn effective_background(&self, row: usize, col: usize) -> Result<&str> {
        let item = self.item(row)?;
        let cell = self
            .dimension_cell_appearance(item, col)
            .and_then(|a| a.background.as_ref());
        Ok(resolve(cell, item.appearance().background.as_ref(), &self.config.background).as_str())
    }

    /// Effective foreground; see [`TimeSeriesGrid::effective_background`].
    ///
    /// # Errors
    /// [`GridError::InvalidRange`] for a bad row index.
    pub fn effective_foreground(&self, row: usize, col: usize) -> Result<&str> {
        let item = self.item(row)?;
        let cell = self
            .dimension_cell_appearance(item, col)
            .and_then(|a| a.foreground.as_ref());
        Ok(resolve(cell, item.appearance().foreground.as_ref(), &self.config.foreground).as_str())
    }

    /// Effective font; see [`TimeSeriesGrid::effective_background`].
    ///
    /// # Errors
    /// [`GridError::InvalidRange`] for a bad row index.
    pub fn effective_font(&self, row: usize, col: usize) -> Result<&FontStyle> {
        let item = self.item(row)?;
        let cell = self
            .dimension_cell_appearance(item, col)
            .and_then(|a| a.font.as_ref());
        Ok(resolve(cell, item.appearance().font.as_ref(), &self.config.font))
    }

    /// Effective image key, if any. There is no control-level default
    /// image.
    ///
    /// # Errors
    /// [`GridError::InvalidRange`] for a bad row index.
    pub fn effective_image(&self, row: usize, col: usize) -> Result<Option<&str>> {
        let item = self.item(row)?;
        let cell = self
            .dimension_cell_appearance(item, col)
            .and_then(|a| a.image.as_deref());
        Ok(cell.or(item.appearance().image.as_deref()))
    }

    fn dimension_cell_appearance<'a>(
        &self,
        item: &'a Row,
        col: usize,
    ) -> Option<&'a crate::types::Appearance> {
        if col < self.columns.len() {
            item.cell_appearance(col)
        } else {
            None
        }
    }

    /// Pixel bounds of one cell of a row, for hit-testing and editor
    /// placement.
    ///
    /// # Errors
    /// [`GridError::InvalidArgument`] when the row is not in the grid;
    /// [`GridError::InvalidRange`] for a bad column index.
    pub fn cell_bounds(&self, id: RowId, col: usize) -> Result<PixelRect> {
        let index = self
            .index_of(id)
            .ok_or(GridError::InvalidArgument("row is not in this grid"))?;
        if col >= self.total_column_count() {
            return Err(GridError::InvalidRange {
                index: col,
                len: self.total_column_count(),
            });
        }
        let cell = PhysicalCell::new(
            self.mapper.physical_column(col),
            self.mapper.physical_row(index),
        );
        Ok(self.surface.cell_rect(cell))
    }

    /// Pixel bounds of a row's dimension-column band.
    ///
    /// # Errors
    /// [`GridError::InvalidArgument`] when the row is not in the grid.
    pub fn item_bounds(&self, id: RowId) -> Result<PixelRect> {
        let index = self
            .index_of(id)
            .ok_or(GridError::InvalidArgument("row is not in this grid"))?;
        let row = self.mapper.physical_row(index);
        let mut bounds = PixelRect::default();
        for col in 0..self.columns.len() {
            let rect = self.surface.cell_rect(PhysicalCell::new(col, row));
            if col == 0 {
                bounds.x = rect.x;
                bounds.y = rect.y;
            }
            bounds.width += rect.width;
            bounds.height = bounds.height.max(rect.height);
        }
        Ok(bounds)
    }

    /// Suggested initial width for a physical column, in pixels.
    pub fn initial_column_width(&self, physical_col: usize) -> f32 {
        let col = self.mapper.model_column(physical_col);
        match self.columns.get(col) {
            Some(column) => column.width() as f32,
            None => self.surface.approx_char_width() * 8.0,
        }
    }

    /// Suggested initial row height, in pixels.
    pub fn initial_row_height(&self) -> f32 {
        self.surface.line_height() + 10.0
    }

    fn format_period(&self, date: NaiveDate) -> String {
        date.format(&self.config.date_format).to_string()
    }

    // ------------------------------------------------------------------
    // Pointer input and column reordering
    // ------------------------------------------------------------------

    /// Pointer press. A primary press on a movable dimension-column header
    /// cell arms the drag-reorder gesture.
    pub fn pointer_down(&mut self, x: f32, y: f32, button: PointerButton) {
        if self.disposed || button != PointerButton::Primary {
            return;
        }
        let Some(cell) = self.surface.cell_at(x, y) else {
            return;
        };
        if !self.mapper.is_header_row(cell.row) {
            return;
        }
        let col = self.mapper.model_column(cell.col);
        let moveable = self
            .columns
            .get(col)
            .is_some_and(Column::is_moveable);
        if !moveable {
            return;
        }
        self.drag.begin(col, self.surface.as_mut());
    }

    /// Pointer move. While dragging, positions the translucent column
    /// preview under the pointer, clamped to the dimension band.
    ///
    /// # Errors
    /// Surface failures creating or moving the preview image.
    pub fn pointer_move(&mut self, x: f32, _y: f32) -> Result<()> {
        if self.disposed || !self.drag.is_active() {
            return Ok(());
        }
        let Some(source) = self.drag.source() else {
            return Ok(());
        };
        let source_rect = self
            .surface
            .cell_rect(PhysicalCell::new(self.mapper.physical_column(source), 0));
        let strip = PixelRect::new(
            source_rect.x,
            0.0,
            source_rect.width,
            self.surface.client_height(),
        );
        let last_col = self.columns.len().saturating_sub(1);
        let max_x = self
            .surface
            .cell_rect(PhysicalCell::new(self.mapper.physical_column(last_col), 0))
            .x;
        self.drag.update(x, strip, max_x, self.surface.as_mut())
    }

    /// Pointer release. A primary release over a valid, different, movable
    /// dimension-column header commits the swap; anything else cancels.
    pub fn pointer_up(&mut self, x: f32, y: f32, button: PointerButton) {
        if self.disposed || !self.drag.is_active() {
            return;
        }
        let source = self.drag.finish(self.surface.as_mut());
        if button != PointerButton::Primary {
            return;
        }
        let Some(source) = source else {
            return;
        };
        let Some(cell) = self.surface.cell_at(x, y) else {
            debug!("column drag cancelled: released outside the grid");
            return;
        };
        if !self.mapper.is_header_row(cell.row) {
            debug!("column drag cancelled: released off the header row");
            return;
        }
        let target = self.mapper.model_column(cell.col);
        if target >= self.columns.len() || target == source {
            debug!(target, "column drag cancelled: invalid target");
            return;
        }
        // moveability is re-checked inside swap_columns; state may have
        // changed since the press
        let _ = self.swap_columns(source, target);
    }

    /// Pointer left the control or the drag source changed identity:
    /// cancels any drag in progress.
    pub fn pointer_exit(&mut self) {
        if self.disposed || !self.drag.is_active() {
            return;
        }
        debug!("column drag cancelled: pointer exit");
        let _ = self.drag.finish(self.surface.as_mut());
    }

    /// Whether a column drag gesture is currently active.
    pub fn is_dragging_column(&self) -> bool {
        self.drag.is_active()
    }

    // ------------------------------------------------------------------
    // Surface resize notifications
    // ------------------------------------------------------------------

    /// Surface input: a physical column was resized by the user.
    pub fn column_resized(&mut self, physical_col: usize, width: u32) {
        if self.disposed {
            return;
        }
        let col = self.mapper.model_column(physical_col);
        if col >= self.columns.len() {
            return;
        }
        if let Some(column) = self.columns.get_mut(col) {
            column.set_width(width);
        }
        self.emit(GridEvent::ColumnResized { index: col, width });
    }

    /// Surface input: a physical row was resized by the user.
    pub fn row_resized(&mut self, physical_row: usize, height: u32) {
        if self.disposed {
            return;
        }
        let Some(row) = self.mapper.model_row(physical_row) else {
            return;
        };
        if row < self.items.len() {
            self.emit(GridEvent::RowResized { index: row, height });
        }
    }

    // ------------------------------------------------------------------
    // Listeners and lifecycle
    // ------------------------------------------------------------------

    /// Registers a listener for grid events.
    pub fn on_event(&mut self, callback: EventCallback) {
        if self.disposed {
            return;
        }
        self.callbacks.push(callback);
    }

    fn emit(&mut self, event: GridEvent) {
        for callback in &mut self.callbacks {
            callback(&event);
        }
    }

    /// Releases all state and detaches all listeners. Every further
    /// mutation is an idempotent no-op; queries return empty defaults.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        debug!("grid disposed");
        if self.drag.is_active() {
            let _ = self.drag.finish(self.surface.as_mut());
        }
        self.callbacks.clear();
        self.items.clear();
        self.columns.clear();
        self.periods.clear();
        self.selection = SelectionTracker::new();
        self.index_cache.reset();
        self.disposed = true;
    }
}
