//! Row entity: one grid row with its per-column texts, per-period values,
//! and layered appearance overrides.
//!
//! Rows are created and destroyed only by the grid; callers address them by
//! position or by [`RowId`].

use serde::{Deserialize, Serialize};

use super::style::Appearance;

/// Stable identity of a row, independent of its current position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RowId(pub(crate) u64);

impl RowId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// One entity in the grid.
///
/// The per-cell vectors always have exactly the current dimension-column
/// count; a column-count change resizes them through
/// [`Row::resize_columns`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    id: RowId,
    texts: Vec<String>,
    values: Vec<f64>,
    appearance: Appearance,
    cell_appearance: Vec<Appearance>,
}

impl Row {
    pub(crate) fn new(id: RowId, column_count: usize, period_count: usize) -> Self {
        Self {
            id,
            texts: vec![String::new(); column_count],
            values: vec![0.0; period_count],
            appearance: Appearance::default(),
            cell_appearance: vec![Appearance::default(); column_count],
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    /// Text value for a dimension column, or `None` when the index is out
    /// of the column range.
    pub fn text(&self, col: usize) -> Option<&str> {
        self.texts.get(col).map(String::as_str)
    }

    /// Sets a dimension-column text. Returns whether anything changed;
    /// out-of-range indices are reported as unchanged.
    pub fn set_text(&mut self, col: usize, text: impl Into<String>) -> bool {
        let text = text.into();
        match self.texts.get_mut(col) {
            Some(slot) if *slot != text => {
                *slot = text;
                true
            }
            _ => false,
        }
    }

    /// Numeric value for a period index; absent indices read as `0.0`.
    pub fn value(&self, period: usize) -> f64 {
        self.values.get(period).copied().unwrap_or(0.0)
    }

    /// Sets a period value. Returns whether anything changed;
    /// out-of-range indices are reported as unchanged.
    pub fn set_value(&mut self, period: usize, value: f64) -> bool {
        match self.values.get_mut(period) {
            Some(slot) if (*slot - value).abs() > f64::EPSILON => {
                *slot = value;
                true
            }
            _ => false,
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Row-level appearance overrides.
    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn appearance_mut(&mut self) -> &mut Appearance {
        &mut self.appearance
    }

    /// Cell-level appearance overrides for a dimension column.
    pub fn cell_appearance(&self, col: usize) -> Option<&Appearance> {
        self.cell_appearance.get(col)
    }

    pub fn cell_appearance_mut(&mut self, col: usize) -> Option<&mut Appearance> {
        self.cell_appearance.get_mut(col)
    }

    /// Resets all content and overrides, keeping the allocated extents.
    pub(crate) fn clear(&mut self) {
        for text in &mut self.texts {
            text.clear();
        }
        for value in &mut self.values {
            *value = 0.0;
        }
        self.appearance = Appearance::default();
        for cell in &mut self.cell_appearance {
            *cell = Appearance::default();
        }
    }

    /// Exchanges the cell data of two dimension columns. Returns `false`
    /// (leaving the row untouched) when either index is out of range.
    pub(crate) fn swap_columns(&mut self, first: usize, second: usize) -> bool {
        let len = self.texts.len();
        if first >= len || second >= len {
            return false;
        }
        self.texts.swap(first, second);
        self.cell_appearance.swap(first, second);
        true
    }

    pub(crate) fn resize_columns(&mut self, count: usize) {
        self.texts.resize(count, String::new());
        self.cell_appearance.resize(count, Appearance::default());
    }

    /// Opens an empty cell where a dimension column was inserted.
    pub(crate) fn insert_column(&mut self, index: usize) {
        let index = index.min(self.texts.len());
        self.texts.insert(index, String::new());
        self.cell_appearance.insert(index, Appearance::default());
    }

    pub(crate) fn resize_periods(&mut self, count: usize) {
        self.values.resize(count, 0.0);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;

    fn row() -> Row {
        Row::new(RowId(1), 3, 4)
    }

    #[test]
    fn text_set_and_get() {
        let mut r = row();
        assert!(r.set_text(1, "hello"));
        assert_eq!(r.text(1), Some("hello"));
        // unchanged write reports false
        assert!(!r.set_text(1, "hello"));
        // out of range is a no-op
        assert!(!r.set_text(9, "x"));
        assert_eq!(r.text(9), None);
    }

    #[test]
    fn values_read_zero_out_of_range() {
        let mut r = row();
        assert!(r.set_value(2, 5.5));
        assert_eq!(r.value(2), 5.5);
        assert_eq!(r.value(99), 0.0);
        assert!(!r.set_value(99, 1.0));
    }

    #[test]
    fn swap_exchanges_text_and_overrides() {
        let mut r = row();
        r.set_text(0, "a");
        r.set_text(2, "c");
        r.cell_appearance_mut(0).unwrap().background = Some("#FF0000".to_string());

        assert!(r.swap_columns(0, 2));
        assert_eq!(r.text(0), Some("c"));
        assert_eq!(r.text(2), Some("a"));
        assert_eq!(
            r.cell_appearance(2).unwrap().background.as_deref(),
            Some("#FF0000")
        );
        assert!(r.cell_appearance(0).unwrap().background.is_none());
    }

    #[test]
    fn swap_out_of_range_is_untouched() {
        let mut r = row();
        r.set_text(0, "a");
        assert!(!r.swap_columns(0, 7));
        assert_eq!(r.text(0), Some("a"));
    }

    #[test]
    fn clear_resets_but_keeps_extents() {
        let mut r = row();
        r.set_text(0, "a");
        r.set_value(1, 2.0);
        r.appearance_mut().foreground = Some("#00FF00".to_string());
        r.clear();
        assert_eq!(r.text(0), Some(""));
        assert_eq!(r.value(1), 0.0);
        assert!(r.appearance().is_empty());
        assert_eq!(r.values().len(), 4);
    }

    #[test]
    fn resize_columns_preserves_existing_cells() {
        let mut r = row();
        r.set_text(2, "keep");
        r.resize_columns(5);
        assert_eq!(r.text(2), Some("keep"));
        assert_eq!(r.text(4), Some(""));
        r.resize_columns(2);
        assert_eq!(r.text(2), None);
    }
}
