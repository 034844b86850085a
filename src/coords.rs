//! Logical-to-physical coordinate mapping.
//!
//! The only state is header visibility; every component that touches rows or
//! columns routes through this mapper instead of computing header offsets on
//! its own.

use crate::types::{ModelCell, PhysicalCell};

/// Translates between model row/column indices (what the application sees)
/// and physical grid indices (what the rendering surface sees).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateMapper {
    header_visible: bool,
}

impl CoordinateMapper {
    pub fn new(header_visible: bool) -> Self {
        Self { header_visible }
    }

    pub fn header_visible(&self) -> bool {
        self.header_visible
    }

    pub fn set_header_visible(&mut self, visible: bool) {
        self.header_visible = visible;
    }

    /// Number of physical header rows (0 or 1).
    pub fn header_rows(&self) -> usize {
        usize::from(self.header_visible)
    }

    /// Whether a physical row is the header row.
    pub fn is_header_row(&self, physical_row: usize) -> bool {
        self.header_visible && physical_row == 0
    }

    /// Model row for a physical row; `None` for the header row.
    pub fn model_row(&self, physical_row: usize) -> Option<usize> {
        physical_row.checked_sub(self.header_rows())
    }

    /// Physical row for a model row.
    pub fn physical_row(&self, model_row: usize) -> usize {
        model_row + self.header_rows()
    }

    /// Column mapping is currently the identity: dimension and period
    /// columns occupy one contiguous numbering. Kept as an explicit seam so
    /// fixed-column support would change only this pair.
    pub fn model_column(&self, physical_col: usize) -> usize {
        physical_col
    }

    /// See [`CoordinateMapper::model_column`].
    pub fn physical_column(&self, model_col: usize) -> usize {
        model_col
    }

    /// Model cell for a physical cell; `None` for header cells.
    pub fn model_cell(&self, cell: PhysicalCell) -> Option<ModelCell> {
        self.model_row(cell.row)
            .map(|row| ModelCell::new(self.model_column(cell.col), row))
    }

    /// Physical cell for a model cell.
    pub fn physical_cell(&self, cell: ModelCell) -> PhysicalCell {
        PhysicalCell::new(self.physical_column(cell.col), self.physical_row(cell.row))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(true; "header visible")]
    #[test_case(false; "header hidden")]
    fn row_mapping_round_trips(header: bool) {
        let mapper = CoordinateMapper::new(header);
        for model in 0..50 {
            let physical = mapper.physical_row(model);
            assert_eq!(mapper.model_row(physical), Some(model));
        }
        for physical in mapper.header_rows()..50 {
            let model = mapper.model_row(physical).unwrap();
            assert_eq!(mapper.physical_row(model), physical);
        }
    }

    #[test]
    fn header_row_has_no_model_row() {
        let mapper = CoordinateMapper::new(true);
        assert_eq!(mapper.model_row(0), None);
        assert_eq!(mapper.model_row(1), Some(0));
        assert!(mapper.is_header_row(0));
        assert!(!mapper.is_header_row(1));
    }

    #[test]
    fn hidden_header_is_identity() {
        let mapper = CoordinateMapper::new(false);
        assert_eq!(mapper.model_row(0), Some(0));
        assert!(!mapper.is_header_row(0));
    }

    #[test_case(true; "header visible")]
    #[test_case(false; "header hidden")]
    fn column_mapping_is_identity(header: bool) {
        let mapper = CoordinateMapper::new(header);
        for col in 0..20 {
            assert_eq!(mapper.model_column(col), col);
            assert_eq!(mapper.physical_column(col), col);
        }
    }

    #[test]
    fn cell_mapping_round_trips() {
        let mapper = CoordinateMapper::new(true);
        let model = ModelCell::new(3, 7);
        let physical = mapper.physical_cell(model);
        assert_eq!(physical, PhysicalCell::new(3, 8));
        assert_eq!(mapper.model_cell(physical), Some(model));
        assert_eq!(mapper.model_cell(PhysicalCell::new(2, 0)), None);
    }
}
