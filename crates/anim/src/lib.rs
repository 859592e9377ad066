#![warn(missing_docs)]
//! Touch-triggered animation cue selection and playback tracking.
//!
//! A [`CuePlayer`] reacts to touches by picking a random cue (avoiding
//! an immediate repeat) and asking the backing animation capability to
//! play it. Playback is tracked by per-tick polling with bounded waits:
//! the machine tolerates backend transition latency but always returns
//! to idle, even when the backend never reports the cue as active.

use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum draws used to avoid repeating the previous cue.
const MAX_RESELECT_ATTEMPTS: u32 = 10;

/// Polls to wait for the backend to report the requested cue active.
const MAX_ENTRY_POLLS: u32 = 60;

/// Ordered, non-empty set of animation cue names.
///
/// Mutable only by configuration, never at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CueSet {
    cues: Vec<String>,
}

impl CueSet {
    /// Build a cue set; `None` when `cues` is empty.
    pub fn new(cues: Vec<String>) -> Option<Self> {
        if cues.is_empty() {
            None
        } else {
            Some(Self { cues })
        }
    }

    /// Number of cues.
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// Always false; empty sets cannot be constructed.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Cue name at `index`.
    pub fn get(&self, index: usize) -> &str {
        &self.cues[index]
    }
}

/// Playback interface the host's animation subsystem implements.
pub trait AnimationBackend {
    /// Request playback of `cue` from its start.
    fn play(&mut self, cue: &str);
    /// Name of the state the backend currently reports active.
    fn active_cue(&self) -> Option<&str>;
    /// Normalized progress of the active state (>= 1.0 means complete).
    fn progress(&self) -> f32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayPhase {
    /// Waiting for the backend to report the cue as the active state.
    AwaitingEntry { polls: u32 },
    /// Cue entered (or entry wait expired); waiting for completion.
    AwaitingCompletion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlaybackState {
    Idle,
    Playing { cue_index: usize, phase: PlayPhase },
}

/// How a touch request resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TouchOutcome {
    /// A cue was chosen and playback requested.
    Started {
        /// The chosen cue name.
        cue: String,
    },
    /// A cue is already playing; the touch was dropped, not queued.
    Busy,
    /// No cue set configured or no backend available; the touch is a
    /// recorded signal only.
    NothingToAnimate,
}

/// Idle -> Playing(cue) -> Idle state machine for one touchable entity.
pub struct CuePlayer<R: Rng = StdRng> {
    cues: Option<CueSet>,
    rng: R,
    last_index: Option<usize>,
    state: PlaybackState,
}

impl<R: Rng> CuePlayer<R> {
    /// Create a player over `cues`, drawing cue indices from `rng`.
    pub fn new(cues: Option<CueSet>, rng: R) -> Self {
        Self {
            cues,
            rng,
            last_index: None,
            state: PlaybackState::Idle,
        }
    }

    /// Whether a cue is currently playing.
    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing { .. })
    }

    /// Name of the cue currently playing, if any.
    pub fn current_cue(&self) -> Option<&str> {
        match (&self.state, &self.cues) {
            (PlaybackState::Playing { cue_index, .. }, Some(cues)) => Some(cues.get(*cue_index)),
            _ => None,
        }
    }

    /// Index of the most recently chosen cue, if any.
    pub fn last_index(&self) -> Option<usize> {
        self.last_index
    }

    /// Handle a touch: pick a cue and request playback.
    ///
    /// A touch while playing is dropped. With no cue set or no backend
    /// the touch degrades to a logged no-op signal.
    pub fn touch(&mut self, backend: Option<&mut dyn AnimationBackend>) -> TouchOutcome {
        if self.is_playing() {
            debug!("touch dropped, cue already playing");
            return TouchOutcome::Busy;
        }

        let Some(cues) = &self.cues else {
            debug!("touch recorded, no cue set configured");
            return TouchOutcome::NothingToAnimate;
        };

        let cue_index = if cues.len() == 1 {
            0
        } else {
            // Redraw on an immediate repeat; the attempt cap accepts a
            // repeat rather than looping unbounded
            let mut attempts = 0;
            loop {
                let candidate = self.rng.gen_range(0..cues.len());
                attempts += 1;
                if Some(candidate) != self.last_index || attempts >= MAX_RESELECT_ATTEMPTS {
                    break candidate;
                }
            }
        };

        // Recorded even when nothing plays; the next selection avoids it
        self.last_index = Some(cue_index);
        let cue = cues.get(cue_index).to_owned();

        let Some(backend) = backend else {
            debug!(cue, "touch recorded, no animation backend");
            return TouchOutcome::NothingToAnimate;
        };

        debug!(cue, "playing cue");
        backend.play(&cue);
        self.state = PlaybackState::Playing {
            cue_index,
            phase: PlayPhase::AwaitingEntry { polls: 0 },
        };
        TouchOutcome::Started { cue }
    }

    /// Advance playback tracking by one poll.
    ///
    /// Waits up to 60 polls for the backend to enter the requested
    /// state (proceeding anyway if it never does), then until reported
    /// progress reaches 1.0 while the cue stays active. Returns true on
    /// the poll that transitions back to idle.
    pub fn poll(&mut self, backend: &dyn AnimationBackend) -> bool {
        let PlaybackState::Playing { cue_index, phase } = self.state else {
            return false;
        };
        let Some(cues) = self.cues.as_ref() else {
            // Playing without a cue set cannot be reached through touch;
            // fail open to idle instead of panicking
            self.state = PlaybackState::Idle;
            return true;
        };
        let cue = cues.get(cue_index);

        let mut phase = phase;
        if let PlayPhase::AwaitingEntry { polls } = phase {
            if backend.active_cue() == Some(cue) {
                phase = PlayPhase::AwaitingCompletion;
            } else if polls + 1 >= MAX_ENTRY_POLLS {
                // Never entered; fail open rather than waiting forever
                debug!(cue, "cue never reported active, proceeding");
                phase = PlayPhase::AwaitingCompletion;
            } else {
                self.state = PlaybackState::Playing {
                    cue_index,
                    phase: PlayPhase::AwaitingEntry { polls: polls + 1 },
                };
                return false;
            }
        }

        // Completion: the cue finished its first pass, or the backend
        // left the state (including never having entered it)
        if backend.active_cue() != Some(cue) || backend.progress() >= 1.0 {
            debug!(cue, "cue complete, returning to idle");
            self.state = PlaybackState::Idle;
            return true;
        }

        self.state = PlaybackState::Playing { cue_index, phase };
        false
    }
}

impl<R: Rng> std::fmt::Debug for CuePlayer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CuePlayer")
            .field("state", &self.state)
            .field("last_index", &self.last_index)
            .finish()
    }
}
