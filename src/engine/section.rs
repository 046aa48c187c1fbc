//! Scroll offset to active section.
//!
//! Every section is exactly one viewport tall and scrolling snaps to
//! section boundaries, so the active section is the one whose top edge
//! is nearest the scroll offset.

use serde::Serialize;

/// Index of the section whose top edge is closest to `scroll_offset`.
///
/// Ties round up (`1.5` viewports selects section 2). The result is
/// clamped into `[0, section_count)`; degenerate input (non-positive or
/// NaN viewport, negative offset, no sections) selects section 0.
pub fn active_section(scroll_offset: f64, viewport_height: f64, section_count: usize) -> usize {
    if section_count == 0 || !(viewport_height > 0.0) || !(scroll_offset > 0.0) {
        return 0;
    }
    let raw = (scroll_offset / viewport_height).round();
    let last = section_count - 1;
    if raw >= last as f64 {
        last
    } else {
        raw as usize
    }
}

/// Scroll offset at which section `index` sits flush with the viewport top.
pub fn scroll_target(index: usize, viewport_height: f64) -> f64 {
    index as f64 * viewport_height.max(0.0)
}

/// Request for a smooth scroll to a section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollCommand {
    pub index: usize,
    pub offset: f64,
}

/// Remembers the last active section so observers hear about each change once.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionTracker {
    section_count: usize,
    active: usize,
    pending: Option<usize>,
}

impl SectionTracker {
    pub fn new(section_count: usize) -> Self {
        Self {
            section_count,
            active: 0,
            pending: None,
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn section_count(&self) -> usize {
        self.section_count
    }

    /// Target of an in-flight smooth scroll, if any.
    pub fn pending(&self) -> Option<usize> {
        self.pending
    }

    /// Feed a scroll notification. Returns the new index only when it changed.
    pub fn observe(&mut self, scroll_offset: f64, viewport_height: f64) -> Option<usize> {
        let index = active_section(scroll_offset, viewport_height, self.section_count);
        if self.pending == Some(index) {
            self.pending = None;
        }
        if index == self.active {
            return None;
        }
        self.active = index;
        Some(index)
    }

    /// Ask for a smooth scroll to `index` (clamped).
    ///
    /// Returns `None` when already resting on that section or when a
    /// transition to it is still running, so repeated clicks are no-ops.
    pub fn scroll_to(&mut self, index: usize, viewport_height: f64) -> Option<ScrollCommand> {
        let index = index.min(self.section_count.saturating_sub(1));
        let resting_here = self.pending.is_none() && self.active == index;
        if resting_here || self.pending == Some(index) {
            return None;
        }
        self.pending = Some(index);
        Some(ScrollCommand {
            index,
            offset: scroll_target(index, viewport_height),
        })
    }

    /// The host reports that the smooth scroll finished (or was interrupted).
    pub fn settle(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_section() {
        assert_eq!(active_section(1190.0, 800.0, 6), 1);
        assert_eq!(active_section(0.0, 800.0, 6), 0);
        assert_eq!(active_section(399.0, 800.0, 6), 0);
        assert_eq!(active_section(1600.0, 800.0, 6), 2);
    }

    #[test]
    fn ties_round_up() {
        assert_eq!(active_section(400.0, 800.0, 6), 1);
        assert_eq!(active_section(1200.0, 800.0, 6), 2);
    }

    #[test]
    fn clamps_out_of_range() {
        assert_eq!(active_section(100_000.0, 800.0, 6), 5);
        assert_eq!(active_section(-50.0, 800.0, 6), 0);
        assert_eq!(active_section(f64::NAN, 800.0, 6), 0);
        assert_eq!(active_section(500.0, 0.0, 6), 0);
        assert_eq!(active_section(500.0, 800.0, 0), 0);
    }

    #[test]
    fn observe_fires_once_per_change() {
        let mut t = SectionTracker::new(6);
        assert_eq!(t.observe(10.0, 800.0), None);
        assert_eq!(t.observe(700.0, 800.0), Some(1));
        assert_eq!(t.observe(790.0, 800.0), None);
        assert_eq!(t.observe(820.0, 800.0), None);
        assert_eq!(t.observe(1700.0, 800.0), Some(2));
        assert_eq!(t.observe(0.0, 800.0), Some(0));
        assert_eq!(t.active(), 0);
    }

    #[test]
    fn scroll_to_is_idempotent() {
        let mut t = SectionTracker::new(6);
        let cmd = t.scroll_to(3, 800.0).unwrap();
        assert_eq!(cmd, ScrollCommand { index: 3, offset: 2400.0 });
        assert_eq!(t.scroll_to(3, 800.0), None);

        t.observe(1600.0, 800.0);
        t.observe(2400.0, 800.0);
        assert_eq!(t.pending(), None);
        assert_eq!(t.scroll_to(3, 800.0), None);
    }

    #[test]
    fn scroll_to_current_section_is_noop() {
        let mut t = SectionTracker::new(6);
        assert_eq!(t.scroll_to(0, 800.0), None);
    }

    #[test]
    fn scroll_to_clamps_index() {
        let mut t = SectionTracker::new(4);
        let cmd = t.scroll_to(99, 500.0).unwrap();
        assert_eq!(cmd.index, 3);
        assert_eq!(cmd.offset, 1500.0);
    }

    #[test]
    fn retarget_while_pending() {
        let mut t = SectionTracker::new(6);
        t.scroll_to(4, 800.0).unwrap();
        let cmd = t.scroll_to(0, 800.0);
        assert_eq!(cmd.map(|c| c.index), Some(0));
        t.settle();
        assert_eq!(t.scroll_to(0, 800.0), None);
    }
}
