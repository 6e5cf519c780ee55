//! Event handler for file system events

use indexmap::IndexMap;
use notify::Event;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Maximum number of entries in the debounce map before forcing a cleanup
const MAX_DEBOUNCE_ENTRIES: usize = 10_000;

/// Debounces file system events and swallows the events generated by the
/// renamer's own create-then-delete sequence, so an applied rule does not
/// trigger another round of rule evaluation.
pub struct EventHandler {
    /// Recent events by path (IndexMap preserves insertion order for fair cleanup)
    recent: IndexMap<PathBuf, Instant>,

    /// Destination paths the renamer just created; their pending creation
    /// event belongs to us, not the user
    suppressed: IndexMap<PathBuf, Instant>,

    /// Debounce duration
    debounce: Duration,
}

impl EventHandler {
    /// Create a new event handler with the given debounce duration
    pub fn new(debounce_seconds: u64) -> Self {
        Self {
            recent: IndexMap::new(),
            suppressed: IndexMap::new(),
            debounce: Duration::from_secs(debounce_seconds),
        }
    }

    /// Check if an event should be processed (returns paths not recently seen)
    pub fn should_process(&mut self, event: &Event) -> Vec<PathBuf> {
        let now = Instant::now();
        let mut paths_to_process = Vec::new();

        for path in &event.paths {
            let should_process = self
                .recent
                .get(path)
                .map(|&last| now.duration_since(last) > self.debounce)
                .unwrap_or(true);

            if should_process {
                self.recent.insert(path.clone(), now);
                paths_to_process.push(path.clone());
            }
        }

        // If the map has grown too large, force a cleanup
        if self.recent.len() > MAX_DEBOUNCE_ENTRIES {
            self.cleanup();
        }

        paths_to_process
    }

    /// Mark a path as self-generated; its next event will be skipped
    pub fn suppress(&mut self, path: PathBuf) {
        self.suppressed.insert(path, Instant::now());
    }

    /// Consume a pending suppression for `path`, if one exists
    pub fn take_suppressed(&mut self, path: &Path) -> bool {
        self.suppressed.shift_remove(path).is_some()
    }

    /// Clean up old entries (call periodically)
    pub fn cleanup(&mut self) {
        let now = Instant::now();
        let threshold = self.debounce * 10; // Keep entries for 10x debounce period

        self.recent
            .retain(|_, &mut last| now.duration_since(last) < threshold);
        self.suppressed
            .retain(|_, &mut since| now.duration_since(since) < threshold);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::EventKind;

    fn create_event(path: &str) -> Event {
        Event {
            kind: EventKind::Create(notify::event::CreateKind::File),
            paths: vec![PathBuf::from(path)],
            attrs: Default::default(),
        }
    }

    #[test]
    fn test_debounce() {
        let mut handler = EventHandler::new(1);
        let event = create_event("/tmp/test.md");

        // First event should be processed
        let paths = handler.should_process(&event);
        assert_eq!(paths.len(), 1);

        // Immediate second event should be debounced
        let paths = handler.should_process(&event);
        assert_eq!(paths.len(), 0);
    }

    #[test]
    fn test_suppression_is_consumed_once() {
        let mut handler = EventHandler::new(1);
        handler.suppress(PathBuf::from("/tmp/new.md"));

        assert!(handler.take_suppressed(Path::new("/tmp/new.md")));
        // The suppression is one-shot; a later event for the same path is real
        assert!(!handler.take_suppressed(Path::new("/tmp/new.md")));
    }

    #[test]
    fn test_unsuppressed_path_is_not_skipped() {
        let mut handler = EventHandler::new(1);
        assert!(!handler.take_suppressed(Path::new("/tmp/other.md")));
    }
}
