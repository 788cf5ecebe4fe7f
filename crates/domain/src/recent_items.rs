use serde::{Deserialize, Serialize};

/// How many fingerprints a feed remembers. Enough to survive a blogger
/// editing or deleting recent stories without re-delivering them.
pub const RECENT_ITEMS_CAPACITY: usize = 10;

/// Bounded per-feed memory of recently seen item fingerprints (link
/// URLs), most-recent first. Used purely to classify crawled items as
/// new or already seen, never for display.
///
/// Persisted as an ordered list of at most
/// [`RECENT_ITEMS_CAPACITY`] strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentItemWindow {
    fingerprints: Vec<String>,
}

impl RecentItemWindow {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_fingerprints(mut fingerprints: Vec<String>) -> Self {
        if fingerprints.len() > RECENT_ITEMS_CAPACITY {
            fingerprints.splice(RECENT_ITEMS_CAPACITY.., vec![]);
        }
        Self { fingerprints }
    }

    /// True iff `fingerprint` is absent from the window. No side
    /// effects: call [`RecentItemWindow::record`] exactly once per item
    /// actually accepted as new.
    pub fn is_new(&self, fingerprint: &str) -> bool {
        !self.fingerprints.iter().any(|f| f == fingerprint)
    }

    /// Inserts `fingerprint` at the front, evicting from the back once
    /// over capacity.
    pub fn record(&mut self, fingerprint: &str) {
        self.fingerprints.insert(0, fingerprint.to_string());
        if self.fingerprints.len() > RECENT_ITEMS_CAPACITY {
            self.fingerprints.splice(RECENT_ITEMS_CAPACITY.., vec![]);
        }
    }

    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }

    pub fn fingerprints(&self) -> &[String] {
        &self.fingerprints
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn an_empty_window_reports_everything_as_new() {
        let window = RecentItemWindow::new();
        assert!(window.is_new("https://example.com/a"));
    }

    #[test]
    fn recorded_fingerprints_are_no_longer_new() {
        let mut window = RecentItemWindow::new();
        window.record("https://example.com/a");
        assert!(!window.is_new("https://example.com/a"));
        assert!(window.is_new("https://example.com/b"));
    }

    #[test]
    fn is_new_has_no_side_effects() {
        let window = RecentItemWindow::new();
        assert!(window.is_new("https://example.com/a"));
        assert!(window.is_new("https://example.com/a"));
        assert_eq!(window.len(), 0);
    }

    #[test]
    fn it_never_exceeds_capacity_and_evicts_fifo() {
        let mut window = RecentItemWindow::new();
        for i in 0..15 {
            window.record(&format!("item-{}", i));
        }
        assert_eq!(window.len(), RECENT_ITEMS_CAPACITY);

        // The 10 most recent survive, the 5 oldest were evicted.
        for i in 5..15 {
            assert!(!window.is_new(&format!("item-{}", i)));
        }
        for i in 0..5 {
            assert!(window.is_new(&format!("item-{}", i)));
        }
        assert!(window.is_new("never-inserted"));
    }

    #[test]
    fn most_recent_fingerprint_is_first() {
        let mut window = RecentItemWindow::new();
        window.record("a");
        window.record("b");
        assert_eq!(window.fingerprints(), &["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn a_small_window_never_evicts() {
        let mut window = RecentItemWindow::new();
        for i in 0..9 {
            window.record(&format!("item-{}", i));
        }
        assert_eq!(window.len(), 9);
        for i in 0..9 {
            assert!(!window.is_new(&format!("item-{}", i)));
        }
    }

    #[test]
    fn persisted_lists_are_clamped_on_load() {
        let fingerprints = (0..12).map(|i| format!("item-{}", i)).collect();
        let window = RecentItemWindow::from_fingerprints(fingerprints);
        assert_eq!(window.len(), RECENT_ITEMS_CAPACITY);
        assert!(!window.is_new("item-0"));
        assert!(window.is_new("item-11"));
    }
}
