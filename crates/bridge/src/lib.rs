//! # HLS Bridge
//!
//! This crate adapts an adaptive-bitrate streaming engine to a generic
//! media-playback framework. It translates the engine's events onto the
//! framework's event bus and recovers playback from transient decode and
//! track errors without user-visible interruption.
//!
//! ## Components
//!
//! - [`HlsSourceHandler`]: the source-handler contract the host framework
//!   selects handlers through (`can_handle` / `can_play_type` / `handle`)
//! - [`EngineHandler`]: per-source lifecycle; bridges engine events to the
//!   host, monitors element errors, and drives recovery
//! - [`RecoveryLadder`]: the escalation state machine behind recovery
//! - [`TrackWatchdog`]: detects missing audio/video tracks and fires one
//!   recovery per track-gap episode
//!
//! The engine itself is injected through [`engine_api::EngineFactory`];
//! the host side is reached through the [`PlaybackTarget`] and
//! [`HostBinding`] traits. Everything runs on the host's single
//! event-processing thread; no component blocks.

pub mod config;
pub mod error;
pub mod handler;
pub mod host;
pub mod recovery;
pub mod source;
pub mod test_utils;
pub mod watchdog;

/// Re-export key traits and types
pub use config::{BridgeConfig, BridgeConfigBuilder, DEFAULT_RECOVERY_COOLDOWN};
pub use error::BridgeError;
pub use handler::EngineHandler;
pub use host::{ElementError, ElementErrorCode, HostBinding, PlaybackTarget, register};
pub use recovery::{RecoveryAction, RecoveryLadder, RecoveryTrigger};
pub use source::{HlsSourceHandler, MediaSource, SourceSupport};
pub use watchdog::TrackWatchdog;

pub use engine_api;
