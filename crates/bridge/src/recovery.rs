//! # Recovery Escalation Ladder
//!
//! Small state machine deciding which recovery action to take for a given
//! trigger. Each rung keeps its own last-fired timestamp; a repeated trigger
//! inside the cooldown window escalates to the next rung instead of
//! re-running the same action, and exhausting the ladder reports
//! unrecoverable playback. The current time is injected so the cooldown
//! logic is testable without the surrounding adapter.

use std::time::{Duration, Instant};

use tracing::debug;

/// Classification of an incoming recovery request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryTrigger {
    /// Element-observed or engine-observed decode failure.
    Decoding,
    /// Suspected audio codec mismatch.
    AudioCodec,
    /// Direct reload request (track watchdog, which rate-limits itself
    /// through its one-shot episode state).
    Reload,
}

/// Action selected by the ladder for one trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Tear down and rebuild playback on the current source, preserving
    /// selected tracks. The lightest recovery.
    Reattach,
    /// Swap the audio codec on the engine, then reattach.
    SwapCodecAndReattach,
    /// Both rungs fired inside their cooldown windows; stop retrying.
    GiveUp,
}

/// Per-handler escalation ladder with one timer per recovery class.
///
/// The two timers are independent: stamping one never resets the other.
#[derive(Debug)]
pub struct RecoveryLadder {
    cooldown: Duration,
    decoding_last: Option<Instant>,
    audio_codec_last: Option<Instant>,
}

impl RecoveryLadder {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            decoding_last: None,
            audio_codec_last: None,
        }
    }

    /// Decide the action for `trigger` at time `now`, stamping the timer of
    /// whichever rung fires.
    ///
    /// `Reload` triggers bypass the ladder entirely and touch neither timer.
    pub fn decide(&mut self, trigger: RecoveryTrigger, now: Instant) -> RecoveryAction {
        if trigger == RecoveryTrigger::Reload {
            return RecoveryAction::Reattach;
        }

        if Self::rung_ready(self.decoding_last, now, self.cooldown) {
            self.decoding_last = Some(now);
            debug!(?trigger, "recovery ladder: reattach rung");
            RecoveryAction::Reattach
        } else if Self::rung_ready(self.audio_codec_last, now, self.cooldown) {
            self.audio_codec_last = Some(now);
            debug!(?trigger, "recovery ladder: audio codec rung");
            RecoveryAction::SwapCodecAndReattach
        } else {
            debug!(?trigger, "recovery ladder exhausted");
            RecoveryAction::GiveUp
        }
    }

    fn rung_ready(last: Option<Instant>, now: Instant, cooldown: Duration) -> bool {
        match last {
            None => true,
            // Triggers spaced exactly one cooldown apart stay on this rung.
            Some(last) => now.duration_since(last) >= cooldown,
        }
    }
}
