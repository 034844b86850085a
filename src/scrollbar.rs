//! Horizontal period-axis scrollbar state.
//!
//! The external widget renders whatever this state says: thumb, position,
//! highlight ticks, an aggregated sparkline series, and a label for the
//! current period. The grid recomputes it on selection change, focus
//! change, period change, and viewport resize/scroll, and on nothing else.

use serde::{Deserialize, Serialize};

use crate::types::{CellRect, Row};

/// Which series the scrollbar sparkline aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AggregationMode {
    /// The focused row's values across all periods.
    #[default]
    FocusCell,
    /// The elementwise sum of values across all selected model rows.
    SelectedRows,
}

/// Scrollbar display state over the period axis.
///
/// Invariants `thumb ≤ maximum − minimum + 1` and
/// `position ∈ [minimum, maximum]` are maintained by the setters, which
/// clamp. This is the one sanctioned clamping site outside the store growth
/// and the index-cache sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    minimum: usize,
    maximum: usize,
    thumb: usize,
    position: usize,
    enabled: bool,
    highlights: Vec<usize>,
    data_points: Vec<f64>,
    label: Option<String>,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            minimum: 0,
            maximum: 1,
            thumb: 2,
            position: 0,
            enabled: true,
            highlights: Vec::new(),
            data_points: Vec::new(),
            label: None,
        }
    }
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn minimum(&self) -> usize {
        self.minimum
    }

    pub fn maximum(&self) -> usize {
        self.maximum
    }

    pub fn thumb(&self) -> usize {
        self.thumb
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn highlights(&self) -> &[usize] {
        &self.highlights
    }

    pub fn data_points(&self) -> &[f64] {
        &self.data_points
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Visible span of the scroll range: `maximum − minimum + 1`.
    fn span(&self) -> usize {
        self.maximum - self.minimum + 1
    }

    pub fn set_maximum(&mut self, maximum: usize) {
        self.maximum = maximum.max(self.minimum);
        self.position = self.position.clamp(self.minimum, self.maximum);
        self.thumb = self.thumb.min(self.span());
    }

    pub fn set_thumb(&mut self, thumb: usize) {
        self.thumb = thumb.clamp(1, self.span());
    }

    pub fn set_position(&mut self, position: usize) {
        self.position = position.clamp(self.minimum, self.maximum);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_highlights(&mut self, highlights: Vec<usize>) {
        self.highlights = highlights;
    }

    pub fn set_data_points(&mut self, data_points: Vec<f64>) {
        self.data_points = data_points;
    }

    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    /// Thumb sizing from the number of fully-visible period columns.
    ///
    /// A degenerate viewport (zero usable columns) disables the bar and
    /// parks the thumb at `maximum + 1` so it renders visually full.
    pub fn sync_thumb(&mut self, visible_period_columns: usize) {
        if visible_period_columns == 0 {
            self.thumb = self.maximum + 1;
            self.enabled = false;
        } else {
            self.set_thumb(visible_period_columns.max(1));
            self.enabled = true;
        }
    }
}

/// Aggregated sparkline series: one value per period index.
pub(crate) fn aggregate(
    mode: AggregationMode,
    rows: &[Row],
    focus_row: Option<usize>,
    selected_rows: &[usize],
    period_count: usize,
) -> Vec<f64> {
    let mut data = vec![0.0; period_count];
    match mode {
        AggregationMode::FocusCell => {
            if let Some(row) = focus_row.and_then(|index| rows.get(index)) {
                for (j, slot) in data.iter_mut().enumerate() {
                    *slot += row.value(j);
                }
            }
        }
        AggregationMode::SelectedRows => {
            for row in selected_rows.iter().filter_map(|&index| rows.get(index)) {
                for (j, slot) in data.iter_mut().enumerate() {
                    *slot += row.value(j);
                }
            }
        }
    }
    data
}

/// Scroll position that brings a focused period column back into the
/// visible window, or `None` when no adjustment is needed.
///
/// `visible` is the fully-visible physical data-cell rectangle; its left
/// edge sits at the first visible period column.
pub(crate) fn focus_scroll_position(
    focus_col: usize,
    column_count: usize,
    visible: &CellRect,
) -> Option<usize> {
    if focus_col < column_count {
        return None;
    }
    if focus_col < visible.col {
        return Some(focus_col - column_count);
    }
    if focus_col >= visible.right() {
        // minimal delta that makes the focus column the rightmost visible
        let target = visible.col + (focus_col - visible.right()) + 1;
        return Some(target.saturating_sub(column_count));
    }
    None
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation
)]
mod tests {
    use super::*;
    use crate::types::RowId;

    #[test]
    fn setters_clamp_to_invariants() {
        let mut s = ScrollState::new();
        s.set_maximum(10);
        s.set_position(99);
        assert_eq!(s.position(), 10);
        s.set_thumb(99);
        assert_eq!(s.thumb(), 11);
        s.set_thumb(0);
        assert_eq!(s.thumb(), 1);
        s.set_maximum(3);
        assert_eq!(s.position(), 3);
        assert!(s.thumb() <= 4);
    }

    #[test]
    fn degenerate_viewport_disables_with_full_thumb() {
        let mut s = ScrollState::new();
        s.set_maximum(11);
        s.sync_thumb(0);
        assert!(!s.is_enabled());
        assert_eq!(s.thumb(), 12);

        s.sync_thumb(5);
        assert!(s.is_enabled());
        assert_eq!(s.thumb(), 5);
    }

    fn rows_3x4() -> Vec<Row> {
        let mut rows = Vec::new();
        for (i, base) in [1.0, 10.0, 100.0].iter().enumerate() {
            let mut row = Row::new(RowId(i as u64), 1, 4);
            for j in 0..4 {
                row.set_value(j, base * (j as f64 + 1.0));
            }
            rows.push(row);
        }
        rows
    }

    #[test]
    fn aggregate_selected_rows_sums_elementwise() {
        let rows = rows_3x4();
        let data = aggregate(AggregationMode::SelectedRows, &rows, None, &[0, 2], 4);
        assert_eq!(data, vec![101.0, 202.0, 303.0, 404.0]);
    }

    #[test]
    fn aggregate_focus_cell_is_the_focused_series() {
        let rows = rows_3x4();
        let data = aggregate(AggregationMode::FocusCell, &rows, Some(1), &[], 4);
        assert_eq!(data, vec![10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn aggregate_without_focus_is_zero() {
        let rows = rows_3x4();
        let data = aggregate(AggregationMode::FocusCell, &rows, None, &[], 4);
        assert_eq!(data, vec![0.0; 4]);
    }

    #[test]
    fn focus_scroll_left_clamps_to_focus_period() {
        // 2 dimension columns, window shows physical cols 5..8
        let visible = CellRect::new(5, 0, 3, 10);
        assert_eq!(focus_scroll_position(3, 2, &visible), Some(1));
    }

    #[test]
    fn focus_scroll_right_clamps_minimally() {
        let visible = CellRect::new(5, 0, 3, 10);
        // focus one past the window: shift by exactly one
        assert_eq!(focus_scroll_position(8, 2, &visible), Some(4));
        assert_eq!(focus_scroll_position(10, 2, &visible), Some(6));
    }

    #[test]
    fn focus_inside_window_or_dimension_band_needs_no_scroll() {
        let visible = CellRect::new(5, 0, 3, 10);
        assert_eq!(focus_scroll_position(6, 2, &visible), None);
        assert_eq!(focus_scroll_position(1, 2, &visible), None);
    }
}
