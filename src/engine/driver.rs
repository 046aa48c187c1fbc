//! Runs the reducer against real collaborators: the audio sink, the timer
//! scheduler, and the listener registry.

use super::listeners::{ListenerGuard, ListenerKind, ListenerRegistry};
use super::playback::{AudioSink, PlayOutcome, PlaybackCoordinator};
use super::schedule::Scheduler;
use super::state::{Effect, Event, StoryContext, StoryState};
use crate::story::Storybook;

/// Effects the driver cannot perform itself and hands back to the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostAction {
    ScrollTo { index: usize, offset: f64 },
    SectionChanged(usize),
}

pub struct StoryDriver<S> {
    ctx: StoryContext,
    state: StoryState,
    playback: PlaybackCoordinator<S>,
    scheduler: Scheduler,
    registry: ListenerRegistry,
    guards: Vec<ListenerGuard>,
}

impl<S: AudioSink> StoryDriver<S> {
    pub fn new(story: &Storybook, sink: S) -> Self {
        let ctx = StoryContext::from_storybook(story);
        let state = StoryState::new(&ctx);
        Self {
            ctx,
            state,
            playback: PlaybackCoordinator::new(sink),
            scheduler: Scheduler::new(),
            registry: ListenerRegistry::new(),
            guards: Vec::new(),
        }
    }

    pub fn state(&self) -> &StoryState {
        &self.state
    }

    pub fn context(&self) -> &StoryContext {
        &self.ctx
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.registry
    }

    pub fn playback(&self) -> &PlaybackCoordinator<S> {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut PlaybackCoordinator<S> {
        &mut self.playback
    }

    /// Subscribe to host notifications. Re-mounting replaces the old subscriptions.
    pub fn mount(&mut self) {
        self.guards.clear();
        self.guards = [
            ListenerKind::Scroll,
            ListenerKind::TimeUpdate,
            ListenerKind::Ended,
            ListenerKind::PointerMove,
        ]
        .into_iter()
        .map(|kind| self.registry.attach(kind))
        .collect();
    }

    /// Drop subscriptions and every live timer.
    pub fn unmount(&mut self) {
        self.guards.clear();
        self.scheduler.cancel_all();
    }

    pub fn is_mounted(&self) -> bool {
        !self.guards.is_empty()
    }

    /// Feed one event and perform its effects.
    pub fn dispatch(&mut self, event: Event, now_ms: u64) -> Vec<HostAction> {
        let mut actions = Vec::new();
        let mut queue = vec![event];
        while let Some(event) = queue.pop() {
            if matches!(event, Event::PlaybackEnded) {
                self.playback.ended();
            }
            let transition = self.state.reduce(event, &self.ctx);
            self.state = transition.state;
            for effect in transition.effects {
                match effect {
                    Effect::Play => {
                        if let PlayOutcome::Rejected(_) = self.playback.play() {
                            queue.push(Event::PlaybackRejected);
                        }
                    }
                    Effect::Pause => {
                        if self.playback.is_playing() {
                            self.playback.toggle();
                        }
                    }
                    Effect::ScrollTo(cmd) => actions.push(HostAction::ScrollTo {
                        index: cmd.index,
                        offset: cmd.offset,
                    }),
                    Effect::SectionChanged(i) => actions.push(HostAction::SectionChanged(i)),
                    Effect::ArmTimer { purpose, period_ms } => {
                        self.scheduler.arm_every(purpose, now_ms, period_ms)
                    }
                    Effect::CancelTimer(purpose) => {
                        self.scheduler.cancel(purpose);
                    }
                }
            }
        }
        actions
    }

    /// Pull the clock from the sink and fire due timers.
    pub fn tick(&mut self, now_ms: u64) -> Vec<HostAction> {
        let clock = self.playback.clock();
        let mut actions = self.dispatch(Event::ClockTick(clock), now_ms);
        for purpose in self.scheduler.due(now_ms) {
            actions.extend(self.dispatch(Event::TimerFired(purpose), now_ms));
        }
        actions
    }

    /// The audio element reported the end of the track.
    pub fn ended(&mut self, now_ms: u64) -> Vec<HostAction> {
        self.dispatch(Event::PlaybackEnded, now_ms)
    }
}
