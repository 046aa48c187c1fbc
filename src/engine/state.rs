//! UI state as one snapshot plus a pure transition function.
//!
//! `reduce` never touches the audio element, the scroll container, or
//! timers. It returns [`Effect`]s and the host (see `driver`) performs them.

use serde::Serialize;

use super::caption::{active_caption, CaptionFrame, CaptionTiming};
use super::schedule::TimerPurpose;
use super::section::{ScrollCommand, SectionTracker};
use super::typewriter::typed_prefix;
use crate::story::{Layout, Storybook, Theme};

/// Static facts about the story the reducer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryContext {
    pub section_count: usize,
    pub gallery_len: usize,
    pub gallery_interval_ms: Option<u64>,
    pub typewriter_interval_ms: u64,
    /// Character count of each section's phrase.
    pub phrase_lengths: Vec<usize>,
}

impl StoryContext {
    pub fn from_storybook(story: &Storybook) -> Self {
        Self {
            section_count: story.milestones.len(),
            gallery_len: story.gallery.len(),
            gallery_interval_ms: story.settings.gallery_interval_ms,
            typewriter_interval_ms: story.settings.typewriter_interval_ms,
            phrase_lengths: story
                .milestones
                .iter()
                .map(|m| m.phrase.chars().count())
                .collect(),
        }
    }

    pub fn layout_at(&self, index: usize) -> Layout {
        Layout::at(index, self.section_count)
    }
}

/// Pointer position as a percentage of the viewport, for the seasonal glow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Default for Pointer {
    fn default() -> Self {
        Self { x: 50.0, y: 50.0 }
    }
}

impl Pointer {
    pub fn from_client(x: f64, y: f64, width: f64, height: f64) -> Self {
        fn percent(v: f64, extent: f64) -> f64 {
            if extent > 0.0 && v.is_finite() {
                (v / extent * 100.0).clamp(0.0, 100.0)
            } else {
                50.0
            }
        }
        Self {
            x: percent(x, width),
            y: percent(y, height),
        }
    }
}

/// Named things that happen to the story.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Scrolled { offset: f64, viewport: f64 },
    NavigateTo { index: usize, viewport: f64 },
    ScrollSettled,
    TogglePlay,
    PlaybackRejected,
    PlaybackEnded,
    ClockTick(f64),
    /// Butterfly on the cover: open the book and start the music.
    OpenBook,
    CloseBook,
    AdvanceGallery,
    TimerFired(TimerPurpose),
    PointerMoved { x: f64, y: f64, width: f64, height: f64 },
}

/// Work for the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Play,
    Pause,
    ScrollTo(ScrollCommand),
    SectionChanged(usize),
    ArmTimer { purpose: TimerPurpose, period_ms: u64 },
    CancelTimer(TimerPurpose),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoryState {
    pub sections: SectionTracker,
    pub playing: bool,
    pub book_opened: bool,
    pub gallery_index: usize,
    pub clock: f64,
    pub pointer: Pointer,
    /// Characters of the active section's phrase typed so far.
    pub phrase_chars: usize,
}

/// Result of one reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: StoryState,
    pub effects: Vec<Effect>,
}

impl StoryState {
    pub fn new(ctx: &StoryContext) -> Self {
        Self {
            sections: SectionTracker::new(ctx.section_count),
            playing: false,
            book_opened: false,
            gallery_index: 0,
            clock: 0.0,
            pointer: Pointer::default(),
            phrase_chars: 0,
        }
    }

    pub fn active_section(&self) -> usize {
        self.sections.active()
    }

    pub fn layout(&self, ctx: &StoryContext) -> Layout {
        ctx.layout_at(self.active_section())
    }

    /// The phrase typewriter shows on memory and finale sections while the music is off.
    pub fn shows_phrase(&self, ctx: &StoryContext) -> bool {
        !self.playing && self.layout(ctx).shows_phrase()
    }

    /// Caption overlay content; `None` hides the overlay entirely.
    pub fn caption<'a>(&self, story: &'a Storybook) -> Option<CaptionFrame<'a>> {
        if !self.playing {
            return None;
        }
        let timing = CaptionTiming::from(&story.settings);
        Some(active_caption(self.clock, &story.captions, timing)).filter(CaptionFrame::is_visible)
    }

    /// Typed part of the active section's phrase; `None` while it is hidden.
    pub fn phrase<'a>(&self, story: &'a Storybook) -> Option<&'a str> {
        let index = self.active_section();
        if self.playing || !story.layout_at(index).shows_phrase() {
            return None;
        }
        let m = story.milestones.get(index)?;
        Some(typed_prefix(&m.phrase, self.phrase_chars))
    }

    pub fn theme<'a>(&self, story: &'a Storybook) -> Option<&'a Theme> {
        story.theme_at(self.active_section())
    }

    pub fn reduce(&self, event: Event, ctx: &StoryContext) -> Transition {
        let mut next = self.clone();
        let mut effects = Vec::new();

        match event {
            Event::Scrolled { offset, viewport } => {
                if let Some(index) = next.sections.observe(offset, viewport) {
                    log::debug!("section {} -> {index}", self.active_section());
                    effects.push(Effect::SectionChanged(index));
                    next.phrase_chars = 0;
                    next.sync_timers(self, ctx, &mut effects);
                }
            }
            Event::NavigateTo { index, viewport } => {
                if let Some(cmd) = next.sections.scroll_to(index, viewport) {
                    effects.push(Effect::ScrollTo(cmd));
                }
            }
            Event::ScrollSettled => next.sections.settle(),
            Event::TogglePlay => {
                if next.playing {
                    next.playing = false;
                    next.phrase_chars = 0;
                    effects.push(Effect::Pause);
                } else {
                    next.playing = true;
                    next.phrase_chars = 0;
                    effects.push(Effect::Play);
                }
                next.sync_timers(self, ctx, &mut effects);
            }
            Event::PlaybackRejected => {
                // Intent stays "playing"; the next gesture retries.
                log::debug!("playback rejected; keeping play intent");
            }
            Event::PlaybackEnded => {
                next.playing = false;
                next.phrase_chars = 0;
                next.sync_timers(self, ctx, &mut effects);
            }
            Event::ClockTick(secs) => {
                next.clock = if secs > 0.0 { secs } else { 0.0 };
            }
            Event::OpenBook => {
                next.book_opened = true;
                if !next.playing {
                    next.playing = true;
                    next.phrase_chars = 0;
                    effects.push(Effect::Play);
                }
                next.sync_timers(self, ctx, &mut effects);
            }
            Event::CloseBook => {
                next.book_opened = false;
                next.sync_timers(self, ctx, &mut effects);
            }
            Event::AdvanceGallery => next.advance_gallery(ctx),
            Event::TimerFired(TimerPurpose::GalleryAdvance) => {
                if next.gallery_running(ctx) {
                    next.advance_gallery(ctx);
                }
            }
            Event::TimerFired(TimerPurpose::PhraseTypewriter) => {
                let len = ctx
                    .phrase_lengths
                    .get(next.active_section())
                    .copied()
                    .unwrap_or(0);
                if next.shows_phrase(ctx) && next.phrase_chars < len {
                    next.phrase_chars += 1;
                }
                if next.phrase_chars >= len {
                    effects.push(Effect::CancelTimer(TimerPurpose::PhraseTypewriter));
                }
            }
            Event::PointerMoved {
                x,
                y,
                width,
                height,
            } => next.pointer = Pointer::from_client(x, y, width, height),
        }

        Transition {
            state: next,
            effects,
        }
    }

    fn advance_gallery(&mut self, ctx: &StoryContext) {
        if ctx.gallery_len > 0 {
            self.gallery_index = (self.gallery_index + 1) % ctx.gallery_len;
        }
    }

    fn gallery_running(&self, ctx: &StoryContext) -> bool {
        ctx.gallery_interval_ms.is_some()
            && self.book_opened
            && self.layout(ctx) == Layout::Intro
    }

    /// Arm or cancel timers whose owning state changed between `prev` and `self`.
    fn sync_timers(&self, prev: &StoryState, ctx: &StoryContext, effects: &mut Vec<Effect>) {
        let section_changed = prev.active_section() != self.active_section();

        match (prev.gallery_running(ctx), self.gallery_running(ctx)) {
            (false, true) => effects.push(Effect::ArmTimer {
                purpose: TimerPurpose::GalleryAdvance,
                period_ms: ctx.gallery_interval_ms.unwrap_or_default(),
            }),
            (true, false) => effects.push(Effect::CancelTimer(TimerPurpose::GalleryAdvance)),
            _ => {}
        }

        let was = prev.shows_phrase(ctx);
        let now = self.shows_phrase(ctx);
        if now && (!was || section_changed) {
            effects.push(Effect::ArmTimer {
                purpose: TimerPurpose::PhraseTypewriter,
                period_ms: ctx.typewriter_interval_ms,
            });
        } else if was && !now {
            effects.push(Effect::CancelTimer(TimerPurpose::PhraseTypewriter));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::testing::sample_story;

    fn ctx() -> StoryContext {
        let mut story = sample_story();
        story.settings.gallery_interval_ms = Some(4_000);
        StoryContext::from_storybook(&story)
    }

    fn run(state: &StoryState, events: &[Event], ctx: &StoryContext) -> (StoryState, Vec<Effect>) {
        let mut s = state.clone();
        let mut all = Vec::new();
        for e in events {
            let t = s.reduce(*e, ctx);
            s = t.state;
            all.extend(t.effects);
        }
        (s, all)
    }

    fn scrolled(offset: f64) -> Event {
        Event::Scrolled {
            offset,
            viewport: 800.0,
        }
    }

    #[test]
    fn reduce_does_not_mutate_input() {
        let ctx = ctx();
        let s = StoryState::new(&ctx);
        let before = s.clone();
        let _ = s.reduce(Event::TogglePlay, &ctx);
        assert_eq!(s, before);
    }

    #[test]
    fn section_change_reported_once() {
        let ctx = ctx();
        let (s, effects) = run(
            &StoryState::new(&ctx),
            &[scrolled(1190.0), scrolled(1000.0), scrolled(900.0)],
            &ctx,
        );
        assert_eq!(s.active_section(), 1);
        let changes: Vec<_> = effects
            .iter()
            .filter(|e| matches!(e, Effect::SectionChanged(_)))
            .collect();
        assert_eq!(changes, vec![&Effect::SectionChanged(1)]);
    }

    #[test]
    fn open_book_starts_music_and_gallery() {
        let ctx = ctx();
        let t = StoryState::new(&ctx).reduce(Event::OpenBook, &ctx);
        assert!(t.state.book_opened);
        assert!(t.state.playing);
        assert!(t.effects.contains(&Effect::Play));
        assert!(t.effects.contains(&Effect::ArmTimer {
            purpose: TimerPurpose::GalleryAdvance,
            period_ms: 4_000
        }));

        // Opening again while playing does not toggle the music off.
        let t2 = t.state.reduce(Event::OpenBook, &ctx);
        assert!(t2.state.playing);
        assert!(t2.effects.is_empty());
    }

    #[test]
    fn leaving_intro_or_closing_book_cancels_gallery() {
        let ctx = ctx();
        let (s, _) = run(&StoryState::new(&ctx), &[Event::OpenBook], &ctx);
        let t = s.reduce(scrolled(800.0), &ctx);
        assert!(t
            .effects
            .contains(&Effect::CancelTimer(TimerPurpose::GalleryAdvance)));

        let t = s.reduce(Event::CloseBook, &ctx);
        assert_eq!(
            t.effects,
            vec![Effect::CancelTimer(TimerPurpose::GalleryAdvance)]
        );
    }

    #[test]
    fn gallery_wraps() {
        let ctx = ctx();
        let (s, _) = run(
            &StoryState::new(&ctx),
            &[Event::AdvanceGallery, Event::AdvanceGallery, Event::AdvanceGallery],
            &ctx,
        );
        assert_eq!(s.gallery_index, 0);
    }

    #[test]
    fn stale_gallery_timer_is_ignored() {
        let ctx = ctx();
        let s = StoryState::new(&ctx);
        let t = s.reduce(Event::TimerFired(TimerPurpose::GalleryAdvance), &ctx);
        assert_eq!(t.state.gallery_index, 0);
    }

    #[test]
    fn rejected_playback_keeps_intent() {
        let ctx = ctx();
        let (s, _) = run(
            &StoryState::new(&ctx),
            &[Event::TogglePlay, Event::PlaybackRejected],
            &ctx,
        );
        assert!(s.playing);
    }

    #[test]
    fn phrase_typewriter_follows_music_and_section() {
        let ctx = ctx();
        // Section 2 is a memory section.
        let (s, effects) = run(&StoryState::new(&ctx), &[scrolled(1600.0)], &ctx);
        assert!(s.shows_phrase(&ctx));
        assert!(effects.contains(&Effect::ArmTimer {
            purpose: TimerPurpose::PhraseTypewriter,
            period_ms: 60
        }));

        let (s, _) = run(
            &s,
            &[
                Event::TimerFired(TimerPurpose::PhraseTypewriter),
                Event::TimerFired(TimerPurpose::PhraseTypewriter),
            ],
            &ctx,
        );
        assert_eq!(s.phrase_chars, 2);

        let t = s.reduce(Event::TogglePlay, &ctx);
        assert!(!t.state.shows_phrase(&ctx));
        assert_eq!(t.state.phrase_chars, 0);
        assert!(t
            .effects
            .contains(&Effect::CancelTimer(TimerPurpose::PhraseTypewriter)));

        let t = t.state.reduce(Event::PlaybackEnded, &ctx);
        assert_eq!(t.state.phrase_chars, 0);
        assert!(t.effects.contains(&Effect::ArmTimer {
            purpose: TimerPurpose::PhraseTypewriter,
            period_ms: 60
        }));
    }

    #[test]
    fn opening_book_clears_typed_phrase() {
        let ctx = ctx();
        let mut s = StoryState::new(&ctx);
        s.phrase_chars = 5;
        let t = s.reduce(Event::OpenBook, &ctx);
        assert!(t.state.playing);
        assert_eq!(t.state.phrase_chars, 0);
    }

    #[test]
    fn phrase_timer_cancels_when_done() {
        let ctx = ctx();
        let (mut s, _) = run(&StoryState::new(&ctx), &[scrolled(1600.0)], &ctx);
        let len = ctx.phrase_lengths[2];
        let mut cancelled = false;
        for _ in 0..len {
            let t = s.reduce(Event::TimerFired(TimerPurpose::PhraseTypewriter), &ctx);
            cancelled = t
                .effects
                .contains(&Effect::CancelTimer(TimerPurpose::PhraseTypewriter));
            s = t.state;
        }
        assert_eq!(s.phrase_chars, len);
        assert!(cancelled);
    }

    #[test]
    fn navigate_is_idempotent() {
        let ctx = ctx();
        let s = StoryState::new(&ctx);
        let t = s.reduce(
            Event::NavigateTo {
                index: 5,
                viewport: 800.0,
            },
            &ctx,
        );
        assert_eq!(
            t.effects,
            vec![Effect::ScrollTo(ScrollCommand {
                index: 5,
                offset: 4000.0
            })]
        );
        let t2 = t.state.reduce(
            Event::NavigateTo {
                index: 5,
                viewport: 800.0,
            },
            &ctx,
        );
        assert!(t2.effects.is_empty());
    }

    #[test]
    fn caption_hidden_unless_playing() {
        let story = sample_story();
        let ctx = StoryContext::from_storybook(&story);
        let (s, _) = run(&StoryState::new(&ctx), &[Event::ClockTick(4.0)], &ctx);
        assert!(s.caption(&story).is_none());

        let (s, _) = run(&s, &[Event::TogglePlay], &ctx);
        let frame = s.caption(&story).unwrap();
        assert_eq!(frame.index, Some(1));

        let (s, _) = run(&s, &[Event::ClockTick(0.1)], &ctx);
        assert!(s.caption(&story).is_none(), "before the first line");
    }

    #[test]
    fn pointer_is_percent_of_viewport() {
        let ctx = ctx();
        let t = StoryState::new(&ctx).reduce(
            Event::PointerMoved {
                x: 200.0,
                y: 600.0,
                width: 800.0,
                height: 800.0,
            },
            &ctx,
        );
        assert_eq!(t.state.pointer, Pointer { x: 25.0, y: 75.0 });
    }

    #[test]
    fn negative_clock_clamps() {
        let ctx = ctx();
        let t = StoryState::new(&ctx).reduce(Event::ClockTick(-4.0), &ctx);
        assert_eq!(t.state.clock, 0.0);
    }
}
