//! Selection tracking and the derived, stable selection views.
//!
//! The tracker owns the raw set of selected physical cells plus the
//! last-focused cell, and derives model-space views through the coordinate
//! mapper. Derivations are computed fresh on every query; nothing here
//! survives a mutation except the previous row selection kept for the
//! incremental repaint hint.

use std::collections::BTreeSet;

use crate::coords::CoordinateMapper;
use crate::types::{ModelCell, PhysicalCell};

/// Raw physical selection state and its derived views.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    cells: BTreeSet<PhysicalCell>,
    focus: Option<PhysicalCell>,
    last_row_selection: Vec<usize>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> impl Iterator<Item = PhysicalCell> + '_ {
        self.cells.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: PhysicalCell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.focus = None;
    }

    pub fn add_cell(&mut self, cell: PhysicalCell) {
        self.cells.insert(cell);
    }

    pub fn set_cells(&mut self, cells: impl IntoIterator<Item = PhysicalCell>) {
        self.cells = cells.into_iter().collect();
    }

    pub fn focus_physical(&self) -> Option<PhysicalCell> {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Option<PhysicalCell>) {
        self.focus = focus;
    }

    /// Selected model rows, unique and ascending. Header cells and rows
    /// beyond `item_count` are ignored.
    pub fn selected_model_rows(
        &self,
        mapper: &CoordinateMapper,
        item_count: usize,
    ) -> Vec<usize> {
        let mut rows = BTreeSet::new();
        for cell in &self.cells {
            if mapper.is_header_row(cell.row) {
                continue;
            }
            if let Some(row) = mapper.model_row(cell.row) {
                if row < item_count {
                    rows.insert(row);
                }
            }
        }
        rows.into_iter().collect()
    }

    /// Period indices with at least one selected non-header cell, unique
    /// and ascending. Used for scrollbar tick highlights.
    pub fn selected_period_columns(
        &self,
        mapper: &CoordinateMapper,
        column_count: usize,
    ) -> Vec<usize> {
        let mut columns = BTreeSet::new();
        for cell in &self.cells {
            if mapper.is_header_row(cell.row) {
                continue;
            }
            let col = mapper.model_column(cell.col);
            if col >= column_count {
                columns.insert(col - column_count);
            }
        }
        columns.into_iter().collect()
    }

    /// The last explicitly focused cell in model coordinates, or `None`
    /// when it lies outside the current bounds.
    pub fn focus_cell(
        &self,
        mapper: &CoordinateMapper,
        column_count: usize,
        period_count: usize,
        item_count: usize,
    ) -> Option<ModelCell> {
        let focus = self.focus?;
        let cell = mapper.model_cell(focus)?;
        if cell.col >= column_count + period_count || cell.row >= item_count {
            return None;
        }
        Some(cell)
    }

    /// Records `new_rows` as the current row selection and returns the rows
    /// whose membership changed (symmetric difference with the previous
    /// selection), the minimal set consumers need to repaint. Returns
    /// `None` when the row selection is unchanged.
    pub fn take_repaint_rows(&mut self, new_rows: Vec<usize>) -> Option<Vec<usize>> {
        if self.last_row_selection == new_rows {
            return None;
        }
        let diff = symmetric_difference(&self.last_row_selection, &new_rows);
        self.last_row_selection = new_rows;
        Some(diff)
    }

    pub fn last_row_selection(&self) -> &[usize] {
        &self.last_row_selection
    }

    /// Remaps the selection after a physical row was removed: cells on the
    /// row are dropped, cells below shift up by one. The focus follows the
    /// same rule.
    pub fn remap_row_removed(&mut self, physical_row: usize) {
        self.cells = self
            .cells
            .iter()
            .filter_map(|cell| match cell.row {
                row if row == physical_row => None,
                row if row > physical_row => {
                    Some(PhysicalCell::new(cell.col, row - 1))
                }
                _ => Some(*cell),
            })
            .collect();
        self.focus = self.focus.and_then(|cell| match cell.row {
            row if row == physical_row => None,
            row if row > physical_row => Some(PhysicalCell::new(cell.col, row - 1)),
            _ => Some(cell),
        });
    }

    /// Remaps the selection after a physical row was inserted: cells at or
    /// below the row shift down by one.
    pub fn remap_row_inserted(&mut self, physical_row: usize) {
        self.cells = self
            .cells
            .iter()
            .map(|cell| {
                if cell.row >= physical_row {
                    PhysicalCell::new(cell.col, cell.row + 1)
                } else {
                    *cell
                }
            })
            .collect();
        if let Some(cell) = self.focus {
            if cell.row >= physical_row {
                self.focus = Some(PhysicalCell::new(cell.col, cell.row + 1));
            }
        }
    }

    /// Drops cells (and focus) at physical rows `>= physical_row_count`.
    pub fn clamp_rows(&mut self, physical_row_count: usize) {
        self.cells.retain(|cell| cell.row < physical_row_count);
        if let Some(cell) = self.focus {
            if cell.row >= physical_row_count {
                self.focus = None;
            }
        }
    }

    /// Drops cells (and focus) at physical columns `>= physical_col_count`,
    /// used when the period axis shrinks.
    pub fn clamp_cols(&mut self, physical_col_count: usize) {
        self.cells.retain(|cell| cell.col < physical_col_count);
        if let Some(cell) = self.focus {
            if cell.col >= physical_col_count {
                self.focus = None;
            }
        }
    }

    /// Shifts every physical row by `delta` when the header row appears or
    /// disappears; cells pushed above row 0 are dropped.
    pub fn offset_rows(&mut self, delta: isize) {
        self.cells = self
            .cells
            .iter()
            .filter_map(|cell| {
                cell.row
                    .checked_add_signed(delta)
                    .map(|row| PhysicalCell::new(cell.col, row))
            })
            .collect();
        self.focus = self.focus.and_then(|cell| {
            cell.row
                .checked_add_signed(delta)
                .map(|row| PhysicalCell::new(cell.col, row))
        });
    }
}

/// Symmetric difference of two unique-ascending sequences, ascending.
fn symmetric_difference(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut out = Vec::new();
    let mut ia = a.iter().peekable();
    let mut ib = b.iter().peekable();
    loop {
        match (ia.peek(), ib.peek()) {
            (Some(&&x), Some(&&y)) if x == y => {
                ia.next();
                ib.next();
            }
            (Some(&&x), Some(&&y)) if x < y => {
                out.push(x);
                ia.next();
            }
            (Some(_), Some(_)) => {
                if let Some(&y) = ib.next() {
                    out.push(y);
                }
            }
            (Some(_), None) => {
                out.extend(ia.by_ref().copied());
            }
            (None, Some(_)) => {
                out.extend(ib.by_ref().copied());
            }
            (None, None) => break,
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn mapper(header: bool) -> CoordinateMapper {
        CoordinateMapper::new(header)
    }

    #[test]
    fn selected_rows_skip_header_and_dedupe() {
        let mut tracker = SelectionTracker::new();
        tracker.add_cell(PhysicalCell::new(0, 0)); // header
        tracker.add_cell(PhysicalCell::new(1, 2));
        tracker.add_cell(PhysicalCell::new(3, 2));
        tracker.add_cell(PhysicalCell::new(0, 4));

        let rows = tracker.selected_model_rows(&mapper(true), 10);
        assert_eq!(rows, vec![1, 3]);
    }

    #[test]
    fn selected_rows_ignore_out_of_bounds() {
        let mut tracker = SelectionTracker::new();
        tracker.add_cell(PhysicalCell::new(0, 1));
        tracker.add_cell(PhysicalCell::new(0, 9));
        let rows = tracker.selected_model_rows(&mapper(false), 5);
        assert_eq!(rows, vec![1]);
    }

    #[test]
    fn period_columns_exclude_dimension_band_and_header() {
        let mut tracker = SelectionTracker::new();
        tracker.add_cell(PhysicalCell::new(1, 0)); // header
        tracker.add_cell(PhysicalCell::new(1, 2)); // dimension col
        tracker.add_cell(PhysicalCell::new(4, 2));
        tracker.add_cell(PhysicalCell::new(4, 3));
        tracker.add_cell(PhysicalCell::new(6, 1));

        let cols = tracker.selected_period_columns(&mapper(true), 2);
        assert_eq!(cols, vec![2, 4]);
    }

    #[test]
    fn focus_cell_bounds_checked() {
        let mut tracker = SelectionTracker::new();
        let m = mapper(true);
        tracker.set_focus(Some(PhysicalCell::new(2, 3)));
        assert_eq!(
            tracker.focus_cell(&m, 2, 4, 10),
            Some(ModelCell::new(2, 2))
        );
        // header focus resolves to none
        tracker.set_focus(Some(PhysicalCell::new(2, 0)));
        assert_eq!(tracker.focus_cell(&m, 2, 4, 10), None);
        // column past the period band
        tracker.set_focus(Some(PhysicalCell::new(6, 3)));
        assert_eq!(tracker.focus_cell(&m, 2, 4, 10), None);
        // row past the item count
        tracker.set_focus(Some(PhysicalCell::new(1, 9)));
        assert_eq!(tracker.focus_cell(&m, 2, 4, 3), None);
    }

    #[test]
    fn repaint_diff_is_symmetric_difference() {
        let mut tracker = SelectionTracker::new();
        assert_eq!(tracker.take_repaint_rows(vec![1, 2, 3]), Some(vec![1, 2, 3]));
        assert_eq!(tracker.take_repaint_rows(vec![2, 3, 5]), Some(vec![1, 5]));
        assert_eq!(tracker.take_repaint_rows(vec![2, 3, 5]), None);
        assert_eq!(tracker.take_repaint_rows(vec![]), Some(vec![2, 3, 5]));
    }

    #[test]
    fn remap_after_removal_shifts_and_drops() {
        let mut tracker = SelectionTracker::new();
        tracker.add_cell(PhysicalCell::new(0, 1));
        tracker.add_cell(PhysicalCell::new(0, 2));
        tracker.add_cell(PhysicalCell::new(0, 5));
        tracker.set_focus(Some(PhysicalCell::new(0, 2)));

        tracker.remap_row_removed(2);
        let cells: Vec<_> = tracker.cells().collect();
        assert_eq!(
            cells,
            vec![PhysicalCell::new(0, 1), PhysicalCell::new(0, 4)]
        );
        assert_eq!(tracker.focus_physical(), None);
    }

    #[test]
    fn remap_after_insert_shifts_down() {
        let mut tracker = SelectionTracker::new();
        tracker.add_cell(PhysicalCell::new(0, 1));
        tracker.add_cell(PhysicalCell::new(0, 3));
        tracker.set_focus(Some(PhysicalCell::new(0, 3)));

        tracker.remap_row_inserted(2);
        let cells: Vec<_> = tracker.cells().collect();
        assert_eq!(
            cells,
            vec![PhysicalCell::new(0, 1), PhysicalCell::new(0, 4)]
        );
        assert_eq!(tracker.focus_physical(), Some(PhysicalCell::new(0, 4)));
    }

    #[test]
    fn offset_rows_drops_underflow() {
        let mut tracker = SelectionTracker::new();
        tracker.add_cell(PhysicalCell::new(0, 0));
        tracker.add_cell(PhysicalCell::new(0, 2));
        tracker.offset_rows(-1);
        let cells: Vec<_> = tracker.cells().collect();
        assert_eq!(cells, vec![PhysicalCell::new(0, 1)]);
    }

    #[test]
    fn symmetric_difference_merges_ascending() {
        assert_eq!(symmetric_difference(&[1, 3, 5], &[3, 4]), vec![1, 4, 5]);
        assert_eq!(symmetric_difference(&[], &[2]), vec![2]);
        assert_eq!(symmetric_difference(&[2], &[]), vec![2]);
        assert_eq!(symmetric_difference(&[], &[]), Vec::<usize>::new());
    }
}
