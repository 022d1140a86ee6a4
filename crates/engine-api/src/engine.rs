//! # Streaming Engine Traits
//!
//! Operations the bridge invokes on a running engine instance, and the
//! factory seam through which a concrete engine (bound to its own
//! configuration) is injected into handler registration.

use crate::EngineError;

/// Operations exposed by a constructed streaming engine.
///
/// The engine is attached to exactly one playback element at a time and
/// drives its own fetch/demux pipeline; these entry points only steer it.
pub trait StreamingEngine {
    /// Bind the engine's output to the playback element.
    fn attach_media(&mut self);

    /// Begin loading the manifest at `url` and feeding the buffer.
    fn load_source(&mut self, url: &str);

    /// Restart the loading pipeline after a fatal network error. The engine
    /// applies its own retry backoff internally.
    fn restart_load(&mut self);

    /// Ask the engine to recover from a media (demux/append) error in place.
    fn recover_media_error(&mut self);

    /// Switch to the alternate audio codec interpretation before the next
    /// recovery attempt.
    fn swap_audio_codec(&mut self);

    /// Release all internal resources. The instance must not be used
    /// afterwards.
    fn destroy(&mut self);
}

/// Constructor injection seam for the streaming engine.
///
/// A factory is bound to caller-supplied engine configuration at creation;
/// `create` builds a fresh engine instance per handled source.
pub trait EngineFactory {
    type Engine: StreamingEngine;

    /// Capability probe: whether the engine can run in this environment at
    /// all. Registration is declined when this reports `false`.
    fn is_supported(&self) -> bool;

    /// Construct a new engine instance.
    fn create(&self) -> Result<Self::Engine, EngineError>;
}
