//! Aggregate counts over the loaded page.

use crate::types::Todo;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TodoStats {
    pub fn from_items(items: &[Todo]) -> Self {
        let completed = items.iter().filter(|todo| todo.completed).count();
        Self {
            total: items.len(),
            completed,
            pending: items.len() - completed,
        }
    }

    /// Rounded completion percentage, `None` for an empty page.
    pub fn percent_complete(&self) -> Option<u8> {
        if self.total == 0 {
            return None;
        }
        let pct = (self.completed as f64 / self.total as f64 * 100.0).round();
        Some(pct as u8)
    }
}
