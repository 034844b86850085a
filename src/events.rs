//! Event types for grid change notifications.
//!
//! Listeners registered on the grid receive these synchronously, in arrival
//! order, after the state change that produced them is complete.

use serde::{Deserialize, Serialize};

/// Events emitted by the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GridEvent {
    /// The set of selected model rows or the focus cell changed.
    SelectionChanged {
        /// Selected model rows, ascending.
        selected_rows: Vec<usize>,
    },

    /// A dimension column landed at a new position. A swap emits one event
    /// per affected column.
    ColumnMoved {
        /// Model index the column now occupies.
        index: usize,
    },

    /// A dimension column's width changed.
    ColumnResized { index: usize, width: u32 },

    /// A row's height changed on the surface.
    RowResized { index: usize, height: u32 },
}

/// Callback type for receiving grid events.
pub type EventCallback = Box<dyn FnMut(&GridEvent)>;

/// Simple event collector for testing.
#[derive(Default)]
pub struct EventCollector {
    events: Vec<GridEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: GridEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GridEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Filter to only SelectionChanged payloads.
    pub fn selection_changes(&self) -> Vec<&[usize]> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GridEvent::SelectionChanged { selected_rows } => {
                    Some(selected_rows.as_slice())
                }
                _ => None,
            })
            .collect()
    }

    /// Filter to only ColumnMoved indices.
    pub fn column_moves(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GridEvent::ColumnMoved { index } => Some(*index),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn collector_filters_by_kind() {
        let mut collector = EventCollector::new();
        collector.push(GridEvent::SelectionChanged {
            selected_rows: vec![0, 2],
        });
        collector.push(GridEvent::ColumnMoved { index: 1 });
        collector.push(GridEvent::ColumnMoved { index: 3 });

        assert_eq!(collector.len(), 3);
        assert_eq!(collector.selection_changes(), vec![&[0usize, 2][..]]);
        assert_eq!(collector.column_moves(), vec![1, 3]);
    }
}
