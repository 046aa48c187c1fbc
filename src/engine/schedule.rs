//! Cancellable timers, at most one per purpose.

use std::collections::BTreeMap;

use serde::Serialize;

/// What a timer is for. One live timer per purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPurpose {
    /// Auto-advance of the intro photo gallery.
    GalleryAdvance,
    /// One character of the section phrase typewriter.
    PhraseTypewriter,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Armed {
    deadline_ms: u64,
    period_ms: u64,
}

#[derive(Debug, Default, Clone)]
pub struct Scheduler {
    timers: BTreeMap<TimerPurpose, Armed>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a repeating timer, replacing any timer of the same purpose.
    pub fn arm_every(&mut self, purpose: TimerPurpose, now_ms: u64, period_ms: u64) {
        let period_ms = period_ms.max(1);
        let armed = Armed {
            deadline_ms: now_ms.saturating_add(period_ms),
            period_ms,
        };
        if self.timers.insert(purpose, armed).is_some() {
            log::debug!("timer {purpose:?} re-armed, previous one cancelled");
        }
    }

    /// Cancel a timer. Returns whether one was live.
    pub fn cancel(&mut self, purpose: TimerPurpose) -> bool {
        self.timers.remove(&purpose).is_some()
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_armed(&self, purpose: TimerPurpose) -> bool {
        self.timers.contains_key(&purpose)
    }

    pub fn armed_count(&self) -> usize {
        self.timers.len()
    }

    /// Fire every timer whose deadline has passed.
    ///
    /// A timer fires once per call even if several periods elapsed, then
    /// re-arms from `now_ms`. Timers stay armed until cancelled.
    pub fn due(&mut self, now_ms: u64) -> Vec<TimerPurpose> {
        let mut fired = Vec::new();
        for (purpose, armed) in self.timers.iter_mut() {
            if armed.deadline_ms <= now_ms {
                fired.push(*purpose);
                armed.deadline_ms = now_ms.saturating_add(armed.period_ms);
            }
        }
        fired
    }
}
