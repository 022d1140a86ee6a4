//! Shared test doubles for the bridge: a recording engine, a recording
//! playback target, and a factory producing them.

use std::cell::RefCell;
use std::rc::Rc;

use engine_api::{EngineError, EngineEvent, EngineFactory, StreamingEngine};

use crate::host::{ElementError, PlaybackTarget};

/// Macro to initialize tracing for tests
///
/// Usage:
/// - `init_test_tracing!()` - uses DEBUG level (default)
/// - `init_test_tracing!(INFO)` - uses specified level
#[macro_export]
macro_rules! init_test_tracing {
    () => {
        init_test_tracing!(DEBUG);
    };
    ($level:ident) => {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::$level)
            .with_test_writer()
            .try_init();
    };
}

// Re-export the macro
pub use crate::init_test_tracing;

/// Call counters for every engine operation.
#[derive(Debug, Default)]
pub struct EngineCalls {
    pub attach_media: usize,
    pub load_source: Vec<String>,
    pub restart_load: usize,
    pub recover_media_error: usize,
    pub swap_audio_codec: usize,
    pub destroy: usize,
}

/// Engine double recording every call into a shared [`EngineCalls`].
#[derive(Debug)]
pub struct MockEngine {
    calls: Rc<RefCell<EngineCalls>>,
}

impl StreamingEngine for MockEngine {
    fn attach_media(&mut self) {
        self.calls.borrow_mut().attach_media += 1;
    }

    fn load_source(&mut self, url: &str) {
        self.calls.borrow_mut().load_source.push(url.to_owned());
    }

    fn restart_load(&mut self) {
        self.calls.borrow_mut().restart_load += 1;
    }

    fn recover_media_error(&mut self) {
        self.calls.borrow_mut().recover_media_error += 1;
    }

    fn swap_audio_codec(&mut self) {
        self.calls.borrow_mut().swap_audio_codec += 1;
    }

    fn destroy(&mut self) {
        self.calls.borrow_mut().destroy += 1;
    }
}

/// Factory double. Engines it creates all record into the same shared
/// [`EngineCalls`], so tests keep observing after the engine moves into a
/// handler.
#[derive(Debug)]
pub struct MockFactory {
    supported: bool,
    calls: Rc<RefCell<EngineCalls>>,
}

impl MockFactory {
    pub fn supported() -> Self {
        Self {
            supported: true,
            calls: Rc::default(),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            supported: false,
            calls: Rc::default(),
        }
    }

    pub fn calls(&self) -> Rc<RefCell<EngineCalls>> {
        Rc::clone(&self.calls)
    }
}

impl EngineFactory for MockFactory {
    type Engine = MockEngine;

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn create(&self) -> Result<MockEngine, EngineError> {
        if !self.supported {
            return Err(EngineError::Unsupported);
        }
        Ok(MockEngine {
            calls: Rc::clone(&self.calls),
        })
    }
}

/// Observable state of a [`RecordingTarget`].
#[derive(Debug, Default)]
pub struct TargetState {
    /// Events re-published on the host bus, verbatim.
    pub triggered: Vec<EngineEvent>,
    pub reattach_count: usize,
    /// Scripted element error returned by `element_error`.
    pub element_error: Option<ElementError>,
    /// Scripted element duration.
    pub duration: Option<f64>,
}

/// Playback target double recording into a shared [`TargetState`].
#[derive(Debug, Default)]
pub struct RecordingTarget {
    state: Rc<RefCell<TargetState>>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Rc<RefCell<TargetState>> {
        Rc::clone(&self.state)
    }
}

impl PlaybackTarget for RecordingTarget {
    fn trigger(&mut self, event: &EngineEvent) {
        self.state.borrow_mut().triggered.push(event.clone());
    }

    fn reattach_source(&mut self) {
        self.state.borrow_mut().reattach_count += 1;
    }

    fn element_error(&self) -> Option<ElementError> {
        self.state.borrow().element_error
    }

    fn media_duration(&self) -> Option<f64> {
        self.state.borrow().duration
    }
}
