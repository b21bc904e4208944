use std::collections::VecDeque;

use serde_json::Value;

const HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub location: String,
    pub state: Value,
}

/// Session history of one browsing context: a list of entries and a cursor.
///
/// Pushing drops every entry ahead of the cursor. The oldest entry is evicted
/// once the list is full.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: VecDeque<HistoryEntry>,
    index: usize,
}

impl SessionHistory {
    pub fn new(initial_location: impl Into<String>) -> Self {
        let mut entries = VecDeque::with_capacity(HISTORY_CAPACITY);
        entries.push_back(HistoryEntry {
            location: initial_location.into(),
            state: Value::Null,
        });
        Self { entries, index: 0 }
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.index]
    }

    pub fn location(&self) -> &str {
        &self.current().location
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn push(&mut self, location: impl Into<String>, state: Value) {
        self.entries.truncate(self.index + 1);
        if self.entries.len() >= HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            location: location.into(),
            state,
        });
        self.index = self.entries.len() - 1;
    }

    /// Moves the cursor by `delta`. Returns `false` (and stays put) when the
    /// target is out of range or `delta` is zero.
    pub fn go(&mut self, delta: isize) -> bool {
        if delta == 0 {
            return false;
        }
        let Some(target) = self.index.checked_add_signed(delta) else {
            return false;
        };
        if target >= self.entries.len() {
            return false;
        }
        self.index = target;
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{HISTORY_CAPACITY, SessionHistory};

    #[test]
    fn push_after_back_discards_forward_entries() {
        let mut history = SessionHistory::new("/");
        history.push("/about", json!({}));
        history.push("/contact", json!({}));
        assert_eq!(history.len(), 3);

        assert!(history.go(-2));
        assert_eq!(history.location(), "/");
        assert!(history.can_go_forward());

        history.push("/contact", json!({}));
        assert_eq!(history.len(), 2);
        assert!(!history.can_go_forward());
        assert_eq!(history.location(), "/contact");
    }

    #[test]
    fn go_out_of_range_is_a_noop() {
        let mut history = SessionHistory::new("/");
        assert!(!history.go(-1));
        assert!(!history.go(1));
        assert!(!history.go(0));
        assert_eq!(history.index(), 0);
    }

    #[test]
    fn capacity_evicts_oldest_entry() {
        let mut history = SessionHistory::new("/0");
        for i in 1..=HISTORY_CAPACITY {
            history.push(format!("/{i}"), json!({}));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.entries().next().map(|e| e.location.as_str()), Some("/1"));
        assert_eq!(history.location(), format!("/{HISTORY_CAPACITY}"));
    }
}
