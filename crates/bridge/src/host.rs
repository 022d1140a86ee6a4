//! # Host Framework Seam
//!
//! The thin binding between the bridge and the playback framework hosting
//! it: the per-element [`PlaybackTarget`] surface the handler drives, the
//! [`HostBinding`] registration hook, and the element-level error codes the
//! error monitor classifies.

use engine_api::{EngineEvent, EngineFactory};
use tracing::warn;

use crate::config::BridgeConfig;
use crate::source::HlsSourceHandler;

/// Error codes surfaced by the playback element itself, a channel distinct
/// from engine-level errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementErrorCode {
    Aborted,
    Network,
    Decode,
    SrcNotSupported,
}

/// The playback element's current error object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementError {
    pub code: ElementErrorCode,
}

/// Per-element surface of the host framework.
///
/// All methods are infallible by contract: failures inside the host's own
/// event listeners are the host's concern and must not propagate back into
/// the bridge.
pub trait PlaybackTarget {
    /// Publish an engine event verbatim on the host's event bus.
    fn trigger(&mut self, event: &EngineEvent);

    /// Tear down and rebuild playback on the current source, preserving
    /// selected tracks. The bridge's recovery state machine is the sole
    /// caller and is serialized through its own `&mut self`.
    fn reattach_source(&mut self);

    /// Read the element's current error, if any.
    fn element_error(&self) -> Option<ElementError>;

    /// The element's reported duration in seconds, if known.
    fn media_duration(&self) -> Option<f64>;
}

/// Registration hook of the host framework.
pub trait HostBinding<F: EngineFactory> {
    /// Register a source handler at the given selection priority
    /// (lower is consulted first).
    fn register_source_handler(&mut self, handler: HlsSourceHandler<F>, priority: u8);
}

/// Probe engine support and register the source handler with the host.
///
/// Returns whether registration happened. Declines (with a warning) when the
/// engine factory reports the environment unsupported.
pub fn register<F, B>(binding: &mut B, factory: F, config: BridgeConfig) -> bool
where
    F: EngineFactory,
    B: HostBinding<F>,
{
    if !factory.is_supported() {
        warn!("streaming engine is not supported here, source handler not registered");
        return false;
    }
    binding.register_source_handler(HlsSourceHandler::new(factory, config), 0);
    true
}
