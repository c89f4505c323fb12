use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);

/// The free-text query as typed versus as applied.
///
/// Each keystroke replaces the pending value; it is promoted to the applied
/// value once it has been stable for the debounce interval. Superseded values
/// are overwritten, never queued.
#[derive(Debug, Clone)]
pub struct DeferredQuery {
    pending: String,
    applied: String,
    changed_at: Option<Instant>,
    debounce: Duration,
}

impl DeferredQuery {
    pub fn new(initial: &str, debounce: Duration) -> Self {
        Self {
            pending: initial.to_string(),
            applied: initial.to_string(),
            changed_at: None,
            debounce,
        }
    }

    /// Record a new typed value.
    pub fn set(&mut self, query: &str, now: Instant) {
        if self.pending == query {
            return;
        }
        self.pending = query.to_string();
        self.changed_at = Some(now);
    }

    /// Apply the typed value immediately, e.g. when the input loses focus.
    pub fn flush(&mut self) -> bool {
        self.changed_at = None;
        if self.applied == self.pending {
            return false;
        }
        self.applied = self.pending.clone();
        true
    }

    /// Promote the pending value if it has settled. Returns true when the
    /// applied value changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.changed_at {
            Some(at) if now.saturating_duration_since(at) >= self.debounce => self.flush(),
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.changed_at.is_some()
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn applied(&self) -> &str {
        &self.applied
    }
}

impl Default for DeferredQuery {
    fn default() -> Self {
        Self::new("", DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lags_until_debounce() {
        let start = Instant::now();
        let mut query = DeferredQuery::new("", Duration::from_millis(100));

        query.set("c", start);
        assert_eq!(query.applied(), "");
        assert!(!query.poll(start + Duration::from_millis(50)));
        assert_eq!(query.applied(), "");

        assert!(query.poll(start + Duration::from_millis(100)));
        assert_eq!(query.applied(), "c");
        assert!(!query.is_pending());
    }

    #[test]
    fn test_superseded_values_overwritten() {
        let start = Instant::now();
        let mut query = DeferredQuery::new("", Duration::from_millis(100));

        query.set("c", start);
        query.set("cr", start + Duration::from_millis(60));
        query.set("cry", start + Duration::from_millis(120));

        // "cry" was typed 60ms ago, not settled yet
        assert!(!query.poll(start + Duration::from_millis(180)));
        assert!(query.poll(start + Duration::from_millis(220)));
        assert_eq!(query.applied(), "cry");
    }

    #[test]
    fn test_flush_applies_immediately() {
        let mut query = DeferredQuery::default();
        query.set("abc", Instant::now());
        assert!(query.flush());
        assert_eq!(query.applied(), "abc");
        assert!(!query.flush());
    }

    #[test]
    fn test_typing_back_to_applied_value() {
        let start = Instant::now();
        let mut query = DeferredQuery::new("abc", Duration::from_millis(10));
        query.set("ab", start);
        query.set("abc", start + Duration::from_millis(5));
        // Pending is back to the applied value: nothing to recompute
        assert!(!query.poll(start + Duration::from_millis(50)));
        assert_eq!(query.applied(), "abc");
    }

    #[test]
    fn test_zero_debounce() {
        let start = Instant::now();
        let mut query = DeferredQuery::new("", Duration::ZERO);
        query.set("x", start);
        assert!(query.poll(start));
        assert_eq!(query.applied(), "x");
    }
}
