//! Window focus tracking

/// Whether the client window currently has input focus.
///
/// Owned by a single engine instance; windows or accounts running side by
/// side each get their own tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusTracker {
    focused: bool,
}

impl FocusTracker {
    /// Starts unfocused
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_focus(focused: bool) -> Self {
        Self { focused }
    }

    pub fn set(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn get(&self) -> bool {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_defaults_to_unfocused() {
        assert!(!FocusTracker::new().get());
    }

    #[test]
    fn test_focus_overwrite_is_idempotent() {
        let mut tracker = FocusTracker::new();
        tracker.set(true);
        let once = tracker;
        tracker.set(true);
        assert_eq!(tracker, once);
        assert!(tracker.get());

        tracker.set(false);
        assert!(!tracker.get());
    }
}
