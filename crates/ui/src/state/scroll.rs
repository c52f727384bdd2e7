/// Transcript scroll position, counted in lines above the bottom.
///
/// Any change to the transcript revision or the pending flag snaps the view
/// back to the newest entry.
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    back: usize,
    max_back: usize,
    seen_revision: u64,
    seen_pending: bool,
}

/// Lines moved by PageUp/PageDown
pub const PAGE_LINES: usize = 10;

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn back(&self) -> usize {
        self.back
    }

    pub fn is_at_bottom(&self) -> bool {
        self.back == 0
    }

    /// Follow the newest entry if the transcript changed since the last draw.
    pub fn observe(&mut self, revision: u64, pending: bool) {
        if revision != self.seen_revision || pending != self.seen_pending {
            self.seen_revision = revision;
            self.seen_pending = pending;
            self.back = 0;
        }
    }

    /// Record the scroll limit reported by the last render
    pub fn set_max_back(&mut self, max_back: usize) {
        self.max_back = max_back;
        self.back = self.back.min(max_back);
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.back = self.back.saturating_add(lines).min(self.max_back);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.back = self.back.saturating_sub(lines);
    }

    pub fn scroll_home(&mut self) {
        self.back = self.max_back;
    }

    pub fn scroll_end(&mut self) {
        self.back = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_is_bounded() {
        let mut scroll = ScrollState::new();
        scroll.set_max_back(15);
        scroll.scroll_up(PAGE_LINES);
        scroll.scroll_up(PAGE_LINES);
        assert_eq!(scroll.back(), 15);
        scroll.scroll_down(100);
        assert!(scroll.is_at_bottom());
        scroll.scroll_home();
        assert_eq!(scroll.back(), 15);
    }

    #[test]
    fn test_new_revision_snaps_to_bottom() {
        let mut scroll = ScrollState::new();
        scroll.observe(1, false);
        scroll.set_max_back(20);
        scroll.scroll_up(5);

        scroll.observe(1, false);
        assert_eq!(scroll.back(), 5);

        scroll.observe(2, true);
        assert!(scroll.is_at_bottom());

        scroll.scroll_up(5);
        scroll.observe(2, false);
        assert!(scroll.is_at_bottom());
    }

    #[test]
    fn test_shrinking_content_clamps() {
        let mut scroll = ScrollState::new();
        scroll.set_max_back(20);
        scroll.scroll_home();
        scroll.set_max_back(4);
        assert_eq!(scroll.back(), 4);
    }
}
