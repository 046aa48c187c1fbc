//! Play/pause intent over an external audio primitive.
//!
//! The platform may refuse to start audio (autoplay policies). The user's
//! request still wins in the UI: a refused `play()` is logged, not retried,
//! and the coordinator keeps reporting "playing" until the next gesture.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlaybackError {
    #[error("playback blocked by the platform: {0}")]
    Blocked(String),
}

/// Audio element the story plays through.
pub trait AudioSink {
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    /// Seconds since the start of the current play cycle.
    fn current_time(&self) -> f64;
}

/// Outcome of a play request, for callers that want to surface it.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayOutcome {
    Started,
    Paused,
    /// Intent recorded as playing, but the sink refused.
    Rejected(PlaybackError),
}

pub struct PlaybackCoordinator<S> {
    sink: S,
    playing: bool,
}

impl<S: AudioSink> PlaybackCoordinator<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            playing: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Non-negative playback clock read from the sink.
    pub fn clock(&self) -> f64 {
        let t = self.sink.current_time();
        if t > 0.0 {
            t
        } else {
            0.0
        }
    }

    pub fn toggle(&mut self) -> PlayOutcome {
        if self.playing {
            self.sink.pause();
            self.playing = false;
            return PlayOutcome::Paused;
        }
        self.play()
    }

    /// Start playback unless the user already asked for it.
    pub fn play(&mut self) -> PlayOutcome {
        if self.playing {
            return PlayOutcome::Started;
        }
        let outcome = match self.sink.play() {
            Ok(()) => PlayOutcome::Started,
            Err(e) => {
                log::warn!("audio playback blocked: {e}");
                PlayOutcome::Rejected(e)
            }
        };
        self.playing = true;
        outcome
    }

    /// The sink reported the end of the track.
    pub fn ended(&mut self) {
        self.playing = false;
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// In-memory sink that can be told to refuse `play()`.
    #[derive(Default)]
    pub(crate) struct FakeSink {
        pub time: f64,
        pub block: bool,
        pub plays: usize,
        pub pauses: usize,
    }

    impl AudioSink for FakeSink {
        fn play(&mut self) -> Result<(), PlaybackError> {
            self.plays += 1;
            if self.block {
                Err(PlaybackError::Blocked("NotAllowedError".into()))
            } else {
                Ok(())
            }
        }

        fn pause(&mut self) {
            self.pauses += 1;
        }

        fn current_time(&self) -> f64 {
            self.time
        }
    }

    #[test]
    fn toggle_flips_intent() {
        let mut p = PlaybackCoordinator::new(FakeSink::default());
        assert_eq!(p.toggle(), PlayOutcome::Started);
        assert!(p.is_playing());
        assert_eq!(p.toggle(), PlayOutcome::Paused);
        assert!(!p.is_playing());
        assert_eq!(p.sink().plays, 1);
        assert_eq!(p.sink().pauses, 1);
    }

    #[test]
    fn blocked_play_keeps_intent() {
        let mut p = PlaybackCoordinator::new(FakeSink {
            block: true,
            ..Default::default()
        });
        assert!(matches!(p.toggle(), PlayOutcome::Rejected(PlaybackError::Blocked(_))));
        assert!(p.is_playing());
        assert_eq!(p.sink().plays, 1, "no automatic retry");

        // Next gesture pauses, the one after tries again.
        p.sink_mut().block = false;
        assert_eq!(p.toggle(), PlayOutcome::Paused);
        assert_eq!(p.toggle(), PlayOutcome::Started);
        assert_eq!(p.sink().plays, 2);
    }

    #[test]
    fn ended_clears_intent() {
        let mut p = PlaybackCoordinator::new(FakeSink::default());
        p.toggle();
        p.ended();
        assert!(!p.is_playing());
    }

    #[test]
    fn clock_never_negative() {
        let mut p = PlaybackCoordinator::new(FakeSink::default());
        p.sink_mut().time = -0.2;
        assert_eq!(p.clock(), 0.0);
        p.sink_mut().time = 12.5;
        assert_eq!(p.clock(), 12.5);
    }
}
