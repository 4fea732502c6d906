//! Copy-and-merge accumulation.
//!
//! While active, successive plain-text captures are folded into one buffer
//! instead of producing one snapshot each. The accumulator is a pure state
//! machine; the capture loop owns the single instance and decides when a
//! capture qualifies for absorption (text-only captures do, image and
//! file-list captures always emit standalone snapshots).

/// `Idle -> Accumulating -> Idle`, with `Accumulating` re-entrant.
#[derive(Debug, Default)]
pub struct MergeAccumulator {
    active: bool,
    buffer: String,
}

impl MergeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Begin accumulating. Clears any leftover buffer from a previous
    /// session. Enabling while already active is a no-op so that a stray
    /// repeated toggle cannot discard text absorbed so far.
    pub fn enable(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        self.buffer.clear();
    }

    /// Fold one text capture into the buffer. Returns `true` when the text
    /// was absorbed (the caller must then suppress the standalone snapshot
    /// for that cycle) and `false` when the accumulator is idle.
    pub fn absorb(&mut self, text: &str, separator: &str) -> bool {
        if !self.active {
            return false;
        }
        if !self.buffer.is_empty() {
            self.buffer.push_str(separator);
        }
        self.buffer.push_str(text);
        true
    }

    /// End the session and hand back the accumulated text. A session that
    /// absorbed nothing yields `None`; the caller emits no snapshot for it.
    pub fn commit(&mut self) -> Option<String> {
        if !self.active {
            return None;
        }
        self.active = false;
        if self.buffer.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_accumulator_absorbs_nothing() {
        let mut acc = MergeAccumulator::new();
        assert!(!acc.absorb("foo", "\n"));
        assert_eq!(acc.commit(), None);
    }

    #[test]
    fn accumulates_with_separator_between_entries() {
        let mut acc = MergeAccumulator::new();
        acc.enable();
        assert!(acc.absorb("foo", "\n"));
        assert!(acc.absorb("bar", "\n"));
        assert_eq!(acc.commit(), Some("foo\nbar".to_string()));
        assert!(!acc.is_active());
    }

    #[test]
    fn single_entry_has_no_separator() {
        let mut acc = MergeAccumulator::new();
        acc.enable();
        assert!(acc.absorb("solo", " "));
        assert_eq!(acc.commit(), Some("solo".to_string()));
    }

    #[test]
    fn commit_without_absorbed_text_yields_none() {
        let mut acc = MergeAccumulator::new();
        acc.enable();
        assert!(acc.is_active());
        assert_eq!(acc.commit(), None);
        assert!(!acc.is_active());
    }

    #[test]
    fn enable_while_active_keeps_buffer() {
        let mut acc = MergeAccumulator::new();
        acc.enable();
        acc.absorb("kept", "\n");
        acc.enable();
        assert_eq!(acc.commit(), Some("kept".to_string()));
    }

    #[test]
    fn new_session_starts_clean() {
        let mut acc = MergeAccumulator::new();
        acc.enable();
        acc.absorb("first", "\n");
        assert_eq!(acc.commit(), Some("first".to_string()));
        acc.enable();
        acc.absorb("second", "\n");
        assert_eq!(acc.commit(), Some("second".to_string()));
    }

    #[test]
    fn separator_is_read_per_absorb() {
        let mut acc = MergeAccumulator::new();
        acc.enable();
        acc.absorb("a", "\n");
        acc.absorb("b", " ");
        acc.absorb("c", "\n");
        assert_eq!(acc.commit(), Some("a b\nc".to_string()));
    }
}
