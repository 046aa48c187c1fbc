//! The story engine: pure trackers plus the state machine that ties them
//! to playback, timers, and listeners.
//!
//! - `section` — scroll offset to active section, smooth-scroll commands
//! - `caption` — playback clock to active caption and typed reveal
//! - `typewriter` — fixed-cadence phrase typing
//! - `encounter` — staged zoom of the encounter map
//! - `playback` — play/pause intent over an audio sink
//! - `schedule` — one cancellable timer per purpose
//! - `listeners` — scoped listener registration
//! - `state` — snapshot + reducer
//! - `driver` — applies reducer effects to real collaborators

pub mod caption;
pub mod driver;
pub mod encounter;
pub mod listeners;
pub mod playback;
pub mod schedule;
pub mod section;
pub mod state;
pub mod typewriter;

pub use caption::{
    active_caption, active_caption_default, active_index, caption_windows, CaptionFrame,
    CaptionTiming, CaptionWindow,
};
pub use driver::{HostAction, StoryDriver};
pub use playback::{AudioSink, PlayOutcome, PlaybackCoordinator, PlaybackError};
pub use schedule::{Scheduler, TimerPurpose};
pub use section::{active_section, scroll_target, ScrollCommand, SectionTracker};
pub use state::{Effect, Event, StoryContext, StoryState};
pub use typewriter::typewriter_reveal;
