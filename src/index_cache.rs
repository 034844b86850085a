//! Amortized position lookup exploiting temporal locality.
//!
//! Repeated and neighboring lookups hit the cached index or its ±1
//! neighborhood; a miss falls back to a scan whose direction is chosen by
//! which half of the sequence the cached index lies in, bounding the
//! expected scan to half the sequence.

use std::cell::Cell;

/// Caches the index of the most recent successful lookup.
///
/// The cache is advisory only: every hit is verified against the predicate,
/// so a stale index after inserts or removals can never produce a wrong
/// answer, only a slower one.
#[derive(Debug, Default)]
pub struct IndexCache {
    last: Cell<Option<usize>>,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the first item matching `matches`, or `None` when absent.
    pub fn find<T>(&self, items: &[T], matches: impl Fn(&T) -> bool) -> Option<usize> {
        let count = items.len();
        if let Some(last) = self.last.get() {
            if last >= 1 && last + 1 < count {
                if items.get(last).is_some_and(&matches) {
                    return Some(last);
                }
                if items.get(last + 1).is_some_and(&matches) {
                    self.last.set(Some(last + 1));
                    return Some(last + 1);
                }
                if items.get(last - 1).is_some_and(&matches) {
                    self.last.set(Some(last - 1));
                    return Some(last - 1);
                }
            }
        }

        let scan_forward = self.last.get().unwrap_or(0) < count / 2;
        let found = if scan_forward {
            items.iter().position(&matches)
        } else {
            items.iter().rposition(&matches)
        };

        if let Some(index) = found {
            self.last.set(Some(index));
        }
        found
    }

    /// Forgets the cached position.
    pub fn reset(&self) {
        self.last.set(None);
    }
}
