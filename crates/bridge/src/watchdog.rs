//! # Track Availability Watchdog
//!
//! Detects that a newly created buffer is missing an audio or video track
//! and fires exactly one recovery per track-gap episode, once playback has
//! advanced past the point where the missing track reappeared.
//!
//! One state machine per media type, independent of the other:
//!
//! ```text
//! Tracking --buffer created, track absent--> GapDetected
//! GapDetected --first parsed fragment of the type--> AwaitingTarget(sn)
//! AwaitingTarget(sn) --changed fragment with sn' >= sn--> Tracking (fire)
//! ```
//!
//! Initial segments may legitimately carry only one track kind (audio-only
//! or video-only lead-in); waiting for observed progress past the first
//! post-gap fragment avoids false-positive recovery. Correctness depends on
//! the engine delivering buffer-created before fragment-parsed before
//! fragment-changed for a given media type.

use engine_api::{FragmentInfo, MediaType, TrackSet};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GapState {
    /// No gap known.
    Tracking,
    /// Buffer was created without this track; no target recorded yet.
    GapDetected,
    /// Recovery fires once a changed fragment reaches this sequence number.
    AwaitingTarget(u64),
}

/// Per-handler watchdog holding one gap episode per media type.
#[derive(Debug)]
pub struct TrackWatchdog {
    audio: GapState,
    video: GapState,
}

impl Default for TrackWatchdog {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackWatchdog {
    pub fn new() -> Self {
        Self {
            audio: GapState::Tracking,
            video: GapState::Tracking,
        }
    }

    fn state_mut(&mut self, media_type: MediaType) -> &mut GapState {
        match media_type {
            MediaType::Audio => &mut self.audio,
            MediaType::Video => &mut self.video,
        }
    }

    /// Inspect the track set of a newly created buffer and open a gap
    /// episode for each media type it omits.
    pub fn on_buffer_created(&mut self, tracks: &TrackSet) {
        for media_type in [MediaType::Audio, MediaType::Video] {
            let state = self.state_mut(media_type);
            if !tracks.contains(media_type) && *state == GapState::Tracking {
                debug!(media_type = media_type.as_str(), "track missing at buffer creation");
                *state = GapState::GapDetected;
            }
        }
    }

    /// Record the recovery target from the first parsed fragment of a type
    /// with an open gap. First seen wins; later fragments never overwrite a
    /// pending target.
    pub fn on_fragment_parsed(&mut self, frag: &FragmentInfo) {
        let state = self.state_mut(frag.media_type);
        if *state == GapState::GapDetected {
            debug!(
                media_type = frag.media_type.as_str(),
                sn = frag.sn,
                "missing track reappeared, recovery target recorded"
            );
            *state = GapState::AwaitingTarget(frag.sn);
        }
    }

    /// Advance on a changed fragment. Returns `true` exactly once per
    /// episode, when playback reaches or passes the recorded target; the
    /// episode is reset before returning.
    pub fn on_fragment_changed(&mut self, frag: &FragmentInfo) -> bool {
        let state = self.state_mut(frag.media_type);
        if let GapState::AwaitingTarget(target) = *state {
            if frag.sn >= target {
                info!(
                    media_type = frag.media_type.as_str(),
                    sn = frag.sn,
                    target_sn = target,
                    "track gap closed, requesting recovery"
                );
                *state = GapState::Tracking;
                return true;
            }
        }
        false
    }
}
