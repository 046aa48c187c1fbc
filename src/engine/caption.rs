//! Playback clock to active caption line, with a typed-out partial reveal.
//!
//! Everything here is a pure function of `(clock, captions)`. There is no
//! retained typing state, so seeking backward or looping the track simply
//! re-derives the earlier line and un-reveals its text.

use serde::Serialize;

use crate::story::{CaptionLine, Settings};

/// Timing constants for caption reveal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionTiming {
    /// Fraction of the window by which the text is fully typed.
    pub reveal_fraction: f64,
    /// Window length of the last line, which has no successor.
    pub final_window_secs: f64,
}

impl Default for CaptionTiming {
    fn default() -> Self {
        Self {
            reveal_fraction: 0.8,
            final_window_secs: 5.0,
        }
    }
}

impl From<&Settings> for CaptionTiming {
    fn from(s: &Settings) -> Self {
        Self {
            reveal_fraction: s.reveal_fraction,
            final_window_secs: s.final_window_secs,
        }
    }
}

/// What the caption overlay shows at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionFrame<'a> {
    /// Active line, `None` before the first timestamp.
    pub index: Option<usize>,
    /// Typed-out prefix of the active line; empty when nothing is active.
    pub revealed: &'a str,
    /// Reveal progress in `[0, 1]`.
    pub progress: f64,
}

impl CaptionFrame<'_> {
    const NONE: CaptionFrame<'static> = CaptionFrame {
        index: None,
        revealed: "",
        progress: 0.0,
    };

    /// Signed index with `-1` meaning "no line yet", for JS and CLI output.
    pub fn index_or_minus_one(&self) -> i64 {
        self.index.map_or(-1, |i| i as i64)
    }

    pub fn is_visible(&self) -> bool {
        self.index.is_some()
    }
}

/// Time span during which one line is active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CaptionWindow {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    /// Instant the text finishes typing.
    pub reveal_end: f64,
}

impl CaptionWindow {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Largest `i` with `captions[i].timestamp <= clock`.
///
/// Among equal timestamps the last one wins. Negative or NaN clocks, and
/// clocks before the first line, have no active line.
pub fn active_index(clock: f64, captions: &[CaptionLine]) -> Option<usize> {
    if !(clock >= 0.0) {
        return None;
    }
    let qualifying = captions.partition_point(|line| line.timestamp <= clock);
    qualifying.checked_sub(1)
}

/// Window of line `index`, which must be in range.
pub fn window(index: usize, captions: &[CaptionLine], timing: CaptionTiming) -> CaptionWindow {
    let start = captions[index].timestamp;
    let end = captions
        .get(index + 1)
        .map_or(start + timing.final_window_secs, |next| next.timestamp);
    let reveal_end = start + (end - start).max(0.0) * timing.reveal_fraction.max(0.0);
    CaptionWindow {
        index,
        start,
        end,
        reveal_end,
    }
}

/// Every line's window, in order.
pub fn caption_windows(captions: &[CaptionLine], timing: CaptionTiming) -> Vec<CaptionWindow> {
    (0..captions.len())
        .map(|i| window(i, captions, timing))
        .collect()
}

/// Fraction of a window's text typed at `clock`.
///
/// Zero-length (or negative) reveal spans reveal fully at once.
pub fn reveal_progress(clock: f64, window: &CaptionWindow, timing: CaptionTiming) -> f64 {
    let span = window.duration() * timing.reveal_fraction;
    if !(span > 0.0) {
        return 1.0;
    }
    ((clock - window.start) / span).clamp(0.0, 1.0)
}

/// First `floor(char_count * progress)` characters of `text`.
pub fn revealed_prefix(text: &str, progress: f64) -> &str {
    let total = text.chars().count();
    let count = ((total as f64) * progress.clamp(0.0, 1.0)).floor() as usize;
    match text.char_indices().nth(count) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

/// Active line and its revealed text at `clock`.
pub fn active_caption<'a>(
    clock: f64,
    captions: &'a [CaptionLine],
    timing: CaptionTiming,
) -> CaptionFrame<'a> {
    let Some(index) = active_index(clock, captions) else {
        return CaptionFrame::NONE;
    };
    let w = window(index, captions, timing);
    let progress = reveal_progress(clock, &w, timing);
    CaptionFrame {
        index: Some(index),
        revealed: revealed_prefix(&captions[index].text, progress),
        progress,
    }
}

/// [`active_caption`] with the default 0.8 reveal fraction and 5 s final window.
pub fn active_caption_default(clock: f64, captions: &[CaptionLine]) -> CaptionFrame<'_> {
    active_caption(clock, captions, CaptionTiming::default())
}
