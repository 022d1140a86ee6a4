//! # Engine API
//!
//! This crate defines the contract between the adaptive streaming engine and
//! the playback bridge built on top of it. It carries the engine's fixed
//! event vocabulary with typed payloads, the operations the bridge may invoke
//! on a running engine, and the factory seam through which an engine
//! implementation is injected.
//!
//! The engine itself (manifest fetching, segment demuxing, buffer feeding) is
//! an external collaborator; nothing in this crate performs I/O.

use thiserror::Error;

pub mod engine;
pub mod events;

/// Re-export key traits and types
pub use engine::{EngineFactory, StreamingEngine};
pub use events::{
    EngineErrorKind, EngineEvent, ErrorData, FragmentInfo, LevelInfo, MediaType, TrackSet,
};

/// Errors surfaced while probing for or constructing an engine instance.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("streaming engine is not supported in this environment")]
    Unsupported,

    #[error("failed to construct streaming engine: {0}")]
    Construction(String),
}
