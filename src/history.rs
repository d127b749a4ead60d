use std::collections::VecDeque;

pub const HISTORY_CAPACITY: usize = 50;

/// Submitted input lines, newest first, capped at `capacity`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl HistoryLog {
    pub fn new(capacity: usize) -> Self {
        Self { entries: VecDeque::new(), capacity }
    }

    /// Rebuild from stored entries (already newest first). Extra entries past
    /// the capacity are dropped.
    pub fn from_entries(entries: Vec<String>, capacity: usize) -> Self {
        let mut log = Self { entries: entries.into(), capacity };
        log.entries.truncate(capacity);
        log
    }

    pub fn record(&mut self, line: &str) {
        self.entries.push_front(line.to_string());
        self.entries.truncate(self.capacity);
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

/// Position while browsing history with the arrow keys. `None` means the
/// input field holds a fresh line rather than a history entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryCursor {
    pos: Option<usize>,
}

impl HistoryCursor {
    pub fn position(&self) -> Option<usize> {
        self.pos
    }

    /// Step toward older entries, stopping at the oldest. Returns the text
    /// to put in the input field.
    pub fn older<'a>(&mut self, log: &'a HistoryLog) -> Option<&'a str> {
        if log.is_empty() {
            return None;
        }
        let next = match self.pos {
            None => 0,
            Some(p) => (p + 1).min(log.len() - 1),
        };
        self.pos = Some(next);
        log.get(next)
    }

    /// Step toward newer entries. Going past the newest clears the input
    /// (returns an empty line) and stops browsing.
    pub fn newer<'a>(&mut self, log: &'a HistoryLog) -> Option<&'a str> {
        match self.pos {
            None => None,
            Some(0) => {
                self.pos = None;
                Some("")
            }
            Some(p) => {
                self.pos = Some(p - 1);
                log.get(p - 1)
            }
        }
    }

    pub fn reset(&mut self) {
        self.pos = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_of(lines: &[&str]) -> HistoryLog {
        let mut log = HistoryLog::default();
        for l in lines {
            log.record(l);
        }
        log
    }

    #[test]
    fn newest_first() {
        let log = log_of(&["ls", "cd projects", "cat README.md"]);
        assert_eq!(log.iter().collect::<Vec<_>>(), vec!["cat README.md", "cd projects", "ls"]);
    }

    #[test]
    fn iterates_from_either_end() {
        let log = log_of(&["ls", "pwd"]);
        assert_eq!(log.iter().rev().collect::<Vec<_>>(), vec!["ls", "pwd"]);
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut log = HistoryLog::default();
        for i in 0..51 {
            log.record(&format!("echo {}", i));
        }
        assert_eq!(log.len(), 50);
        assert_eq!(log.get(0), Some("echo 50"));
        assert_eq!(log.get(49), Some("echo 1"));
        assert!(log.iter().all(|l| l != "echo 0"));
    }

    #[test]
    fn from_entries_truncates() {
        let stored: Vec<String> = (0..60).map(|i| i.to_string()).collect();
        let log = HistoryLog::from_entries(stored, 50);
        assert_eq!(log.len(), 50);
        assert_eq!(log.get(0), Some("0"));
    }

    #[test]
    fn cursor_walks_and_clamps() {
        let log = log_of(&["one", "two"]);
        let mut cur = HistoryCursor::default();
        assert_eq!(cur.older(&log), Some("two"));
        assert_eq!(cur.older(&log), Some("one"));
        assert_eq!(cur.older(&log), Some("one"));
        assert_eq!(cur.newer(&log), Some("two"));
        assert_eq!(cur.newer(&log), Some(""));
        assert_eq!(cur.position(), None);
        assert_eq!(cur.newer(&log), None);
    }

    #[test]
    fn cursor_on_empty_log() {
        let log = HistoryLog::default();
        let mut cur = HistoryCursor::default();
        assert_eq!(cur.older(&log), None);
        assert_eq!(cur.position(), None);
    }
}
