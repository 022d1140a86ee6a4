//! # Engine Handler
//!
//! Per-source lifecycle around one engine instance: bridges every engine
//! event onto the host bus, monitors element-level errors, routes fatal
//! engine errors and watchdog firings into the recovery ladder, and owns
//! idempotent teardown.
//!
//! The host delivers events by calling [`EngineHandler::on_engine_event`]
//! and [`EngineHandler::on_element_error`] from its single event-processing
//! thread; nothing here blocks or spawns.

use std::time::Instant;

use engine_api::{EngineErrorKind, EngineEvent, EngineFactory, ErrorData, StreamingEngine};
use tracing::{debug, error, info};

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::host::{ElementErrorCode, PlaybackTarget};
use crate::recovery::{RecoveryAction, RecoveryLadder, RecoveryTrigger};
use crate::source::MediaSource;
use crate::watchdog::TrackWatchdog;

/// Handler instance returned to the host for one selected source.
#[derive(Debug)]
pub struct EngineHandler<E: StreamingEngine, T: PlaybackTarget> {
    engine: E,
    target: T,
    ladder: RecoveryLadder,
    watchdog: TrackWatchdog,
    disposed: bool,
}

impl<E: StreamingEngine, T: PlaybackTarget> EngineHandler<E, T> {
    /// Construct the engine from the factory, attach it to the element, and
    /// begin loading the source.
    pub(crate) fn attach<F>(
        factory: &F,
        source: MediaSource,
        target: T,
        config: BridgeConfig,
    ) -> Result<Self, BridgeError>
    where
        F: EngineFactory<Engine = E>,
    {
        let mut engine = factory.create()?;
        engine.attach_media();
        engine.load_source(&source.src);
        info!(src = %source.src, "engine attached, loading source");
        Ok(Self {
            engine,
            target,
            ladder: RecoveryLadder::new(config.recovery_cooldown),
            watchdog: TrackWatchdog::new(),
            disposed: false,
        })
    }

    /// Deliver one engine event.
    ///
    /// The event is first re-published verbatim on the host bus, then fed to
    /// the error router and the track watchdog. Events of a given media type
    /// must arrive in the engine's pipeline order (buffer-created, then
    /// fragment-parsed, then fragment-changed).
    pub fn on_engine_event(&mut self, event: EngineEvent) {
        if self.disposed {
            return;
        }
        self.target.trigger(&event);

        match &event {
            EngineEvent::Error(data) if data.fatal => self.on_fatal_error(data),
            EngineEvent::LevelLoaded(info) => {
                // Liveness is observed but deliberately does not feed into
                // the reported duration.
                debug!(live = info.live, total_duration = info.total_duration, "level loaded");
            }
            EngineEvent::BufferCreated(tracks) => self.watchdog.on_buffer_created(tracks),
            EngineEvent::FragParsed(frag) => self.watchdog.on_fragment_parsed(frag),
            EngineEvent::FragChanged(frag) => {
                if self.watchdog.on_fragment_changed(frag) {
                    self.recover(RecoveryTrigger::Reload);
                }
            }
            _ => {}
        }
    }

    /// Deliver a native "error" condition from the playback element.
    ///
    /// Reads the element's error object; absent means no-op. Decode failures
    /// enter the recovery ladder, anything else is unrecoverable.
    pub fn on_element_error(&mut self) {
        if self.disposed {
            return;
        }
        let Some(element_error) = self.target.element_error() else {
            return;
        };
        if element_error.code == ElementErrorCode::Decode {
            self.recover(RecoveryTrigger::Decoding);
        } else {
            self.report_unrecoverable();
        }
    }

    /// The element's reported duration, or 0 when unknown.
    pub fn duration(&self) -> f64 {
        self.target.media_duration().unwrap_or(0.0)
    }

    /// Release the engine's resources. Idempotent: event deliveries become
    /// no-ops before the engine is torn down, and a second call does
    /// nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.engine.destroy();
        debug!("engine handler disposed");
    }

    fn on_fatal_error(&mut self, data: &ErrorData) {
        match data.kind {
            EngineErrorKind::Network => {
                // The engine manages its own retry backoff; no cooldown and
                // no recovery timers involved.
                info!("fatal network error, restarting engine load");
                self.engine.restart_load();
            }
            EngineErrorKind::Media => self.recover(RecoveryTrigger::Decoding),
            EngineErrorKind::Other => self.report_unrecoverable(),
        }
    }

    fn recover(&mut self, trigger: RecoveryTrigger) {
        match self.ladder.decide(trigger, Instant::now()) {
            RecoveryAction::Reattach => {
                info!(?trigger, "recovering: reattaching current source");
                self.target.reattach_source();
            }
            RecoveryAction::SwapCodecAndReattach => {
                info!(?trigger, "recovering: swapping audio codec and reattaching");
                self.engine.swap_audio_codec();
                self.target.reattach_source();
            }
            RecoveryAction::GiveUp => self.report_unrecoverable(),
        }
    }

    fn report_unrecoverable(&self) {
        error!("error loading media: file could not be played");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ElementError;
    use crate::init_test_tracing;
    use crate::test_utils::{EngineCalls, MockEngine, MockFactory, RecordingTarget, TargetState};
    use engine_api::{FragmentInfo, LevelInfo, MediaType, TrackSet};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    type TestHandler = EngineHandler<MockEngine, RecordingTarget>;

    fn handler() -> (TestHandler, Rc<RefCell<EngineCalls>>, Rc<RefCell<TargetState>>) {
        handler_with_config(BridgeConfig::default())
    }

    fn handler_with_config(
        config: BridgeConfig,
    ) -> (TestHandler, Rc<RefCell<EngineCalls>>, Rc<RefCell<TargetState>>) {
        let factory = MockFactory::supported();
        let calls = factory.calls();
        let target = RecordingTarget::new();
        let state = target.state();
        let handler = EngineHandler::attach(
            &factory,
            MediaSource::new("https://example.com/live.m3u8"),
            target,
            config,
        )
        .unwrap();
        (handler, calls, state)
    }

    fn fatal(kind: EngineErrorKind) -> EngineEvent {
        EngineEvent::Error(ErrorData { fatal: true, kind })
    }

    fn frag(media_type: MediaType, sn: u64) -> FragmentInfo {
        FragmentInfo { media_type, sn }
    }

    #[test]
    fn attach_wires_engine_and_starts_loading() {
        let (_handler, calls, _state) = handler();
        let calls = calls.borrow();
        assert_eq!(calls.attach_media, 1);
        assert_eq!(calls.load_source, vec!["https://example.com/live.m3u8"]);
    }

    #[test]
    fn every_event_is_re_emitted_verbatim() {
        let (mut handler, _calls, state) = handler();
        let events = vec![
            EngineEvent::MediaAttached,
            EngineEvent::ManifestLoading {
                url: "https://example.com/live.m3u8".into(),
            },
            EngineEvent::ManifestParsed { level_count: 3 },
            EngineEvent::LevelLoaded(LevelInfo {
                live: true,
                total_duration: 120.0,
            }),
            EngineEvent::BufferCreated(TrackSet::both()),
            EngineEvent::FragParsed(frag(MediaType::Video, 1)),
            EngineEvent::FragChanged(frag(MediaType::Video, 1)),
            EngineEvent::AudioCodecSwapped,
            EngineEvent::Error(ErrorData {
                fatal: false,
                kind: EngineErrorKind::Media,
            }),
            EngineEvent::MediaDetached,
            EngineEvent::Destroying,
        ];
        for event in &events {
            handler.on_engine_event(event.clone());
        }
        assert_eq!(state.borrow().triggered, events);
    }

    #[test]
    fn non_fatal_errors_are_only_re_emitted() {
        let (mut handler, calls, state) = handler();
        handler.on_engine_event(EngineEvent::Error(ErrorData {
            fatal: false,
            kind: EngineErrorKind::Network,
        }));
        assert_eq!(calls.borrow().restart_load, 0);
        assert_eq!(state.borrow().reattach_count, 0);
        assert_eq!(state.borrow().triggered.len(), 1);
    }

    #[test]
    fn fatal_network_error_restarts_load_without_touching_timers() {
        let (mut handler, calls, state) = handler();
        handler.on_engine_event(fatal(EngineErrorKind::Network));
        handler.on_engine_event(fatal(EngineErrorKind::Network));
        assert_eq!(calls.borrow().restart_load, 2);
        assert_eq!(state.borrow().reattach_count, 0);

        // Timers untouched: an immediate media error still lands on the
        // first rung.
        handler.on_engine_event(fatal(EngineErrorKind::Media));
        assert_eq!(state.borrow().reattach_count, 1);
        assert_eq!(calls.borrow().swap_audio_codec, 0);
    }

    #[test]
    fn fatal_media_errors_escalate_through_ladder() {
        let (mut handler, calls, state) = handler();
        handler.on_engine_event(fatal(EngineErrorKind::Media));
        assert_eq!(state.borrow().reattach_count, 1);
        assert_eq!(calls.borrow().swap_audio_codec, 0);

        handler.on_engine_event(fatal(EngineErrorKind::Media));
        assert_eq!(state.borrow().reattach_count, 2);
        assert_eq!(calls.borrow().swap_audio_codec, 1);

        // Third trigger inside the window: give up, no further action.
        handler.on_engine_event(fatal(EngineErrorKind::Media));
        assert_eq!(state.borrow().reattach_count, 2);
        assert_eq!(calls.borrow().swap_audio_codec, 1);
        assert_eq!(calls.borrow().restart_load, 0);
    }

    #[test]
    fn collapsed_recovery_never_calls_engine_media_recovery() {
        let (mut handler, calls, _state) = handler();
        handler.on_engine_event(fatal(EngineErrorKind::Media));
        handler.on_engine_event(fatal(EngineErrorKind::Media));
        assert_eq!(calls.borrow().recover_media_error, 0);
    }

    #[test]
    fn fatal_other_error_is_unrecoverable() {
        let (mut handler, calls, state) = handler();
        handler.on_engine_event(fatal(EngineErrorKind::Other));
        assert_eq!(state.borrow().reattach_count, 0);
        assert_eq!(calls.borrow().restart_load, 0);
        assert_eq!(calls.borrow().swap_audio_codec, 0);
    }

    #[test]
    fn element_decode_error_enters_ladder() {
        let (mut handler, _calls, state) = handler();
        state.borrow_mut().element_error = Some(ElementError {
            code: ElementErrorCode::Decode,
        });
        handler.on_element_error();
        assert_eq!(state.borrow().reattach_count, 1);
    }

    #[test]
    fn other_element_errors_take_no_recovery_action() {
        let (mut handler, calls, state) = handler();
        state.borrow_mut().element_error = Some(ElementError {
            code: ElementErrorCode::SrcNotSupported,
        });
        handler.on_element_error();
        assert_eq!(state.borrow().reattach_count, 0);
        assert_eq!(calls.borrow().swap_audio_codec, 0);
    }

    #[test]
    fn absent_element_error_is_a_no_op() {
        let (mut handler, _calls, state) = handler();
        handler.on_element_error();
        assert_eq!(state.borrow().reattach_count, 0);
        assert!(state.borrow().triggered.is_empty());
    }

    #[test]
    fn track_gap_fires_one_reload_recovery() {
        init_test_tracing!();
        let (mut handler, calls, state) = handler();
        handler.on_engine_event(EngineEvent::BufferCreated(TrackSet {
            audio: true,
            video: false,
        }));
        handler.on_engine_event(EngineEvent::FragParsed(frag(MediaType::Video, 5)));
        handler.on_engine_event(EngineEvent::FragChanged(frag(MediaType::Video, 4)));
        assert_eq!(state.borrow().reattach_count, 0);

        handler.on_engine_event(EngineEvent::FragChanged(frag(MediaType::Video, 5)));
        assert_eq!(state.borrow().reattach_count, 1);

        // Episode over: later changed fragments fire nothing further.
        handler.on_engine_event(EngineEvent::FragChanged(frag(MediaType::Video, 6)));
        assert_eq!(state.borrow().reattach_count, 1);

        // The reload path bypassed the ladder, so an immediate decode error
        // still lands on the first rung.
        state.borrow_mut().element_error = Some(ElementError {
            code: ElementErrorCode::Decode,
        });
        handler.on_element_error();
        assert_eq!(state.borrow().reattach_count, 2);
        assert_eq!(calls.borrow().swap_audio_codec, 0);
    }

    #[test]
    fn duration_defaults_to_zero_and_ignores_liveness() {
        let (mut handler, _calls, state) = handler();
        assert_eq!(handler.duration(), 0.0);

        handler.on_engine_event(EngineEvent::LevelLoaded(LevelInfo {
            live: true,
            total_duration: 3600.0,
        }));
        assert_eq!(handler.duration(), 0.0);

        state.borrow_mut().duration = Some(42.5);
        assert_eq!(handler.duration(), 42.5);
    }

    #[test]
    fn dispose_is_idempotent() {
        let (mut handler, calls, _state) = handler();
        handler.dispose();
        handler.dispose();
        assert_eq!(calls.borrow().destroy, 1);
    }

    #[test]
    fn events_after_dispose_are_ignored() {
        let (mut handler, calls, state) = handler();
        handler.dispose();
        handler.on_engine_event(fatal(EngineErrorKind::Media));
        state.borrow_mut().element_error = Some(ElementError {
            code: ElementErrorCode::Decode,
        });
        handler.on_element_error();
        assert!(state.borrow().triggered.is_empty());
        assert_eq!(state.borrow().reattach_count, 0);
        assert_eq!(calls.borrow().swap_audio_codec, 0);
    }

    #[test]
    fn custom_cooldown_is_respected() {
        let (mut handler, calls, state) = handler_with_config(
            BridgeConfig::builder()
                .with_recovery_cooldown(Duration::ZERO)
                .build(),
        );
        // With a zero window every trigger stays on the first rung.
        handler.on_engine_event(fatal(EngineErrorKind::Media));
        handler.on_engine_event(fatal(EngineErrorKind::Media));
        handler.on_engine_event(fatal(EngineErrorKind::Media));
        assert_eq!(state.borrow().reattach_count, 3);
        assert_eq!(calls.borrow().swap_audio_codec, 0);
    }
}
