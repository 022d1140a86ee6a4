//! # Source Handler
//!
//! The source-handler contract the host framework selects handlers through.
//! `can_handle` sniffs the source's MIME type and URL the same way the host
//! asks native handlers; `handle` wires up a fresh engine-backed handler for
//! a selected source.

use engine_api::EngineFactory;
use tracing::debug;
use url::Url;

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::handler::EngineHandler;
use crate::host::PlaybackTarget;

const HLS_MIME_TYPES: [&str; 2] = ["application/x-mpegurl", "application/vnd.apple.mpegurl"];

/// A playback source as presented by the host framework.
#[derive(Debug, Clone)]
pub struct MediaSource {
    /// Source URL.
    pub src: String,
    /// MIME type advertised alongside the URL, if any.
    pub mime_type: Option<String>,
    /// Set when the source explicitly opts out of this handler.
    pub opt_out: bool,
}

impl MediaSource {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            mime_type: None,
            opt_out: false,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_opt_out(mut self) -> Self {
        self.opt_out = true;
        self
    }
}

/// Handler support level reported to the host's source selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSupport {
    /// MIME type identifies the stream definitively.
    Definite,
    /// URL shape suggests the stream; MIME type is unrelated or missing.
    Possible,
    /// Not a stream this handler plays.
    None,
}

/// Source handler backed by an injected engine factory.
#[derive(Debug)]
pub struct HlsSourceHandler<F> {
    factory: F,
    config: BridgeConfig,
}

impl<F: EngineFactory> HlsSourceHandler<F> {
    pub fn new(factory: F, config: BridgeConfig) -> Self {
        Self { factory, config }
    }

    /// Support level for a concrete source. Opt-out wins over everything,
    /// including a matching URL.
    pub fn can_handle(&self, source: &MediaSource) -> SourceSupport {
        if source.opt_out {
            return SourceSupport::None;
        }
        if let Some(mime) = &source.mime_type {
            if Self::is_hls_mime(mime) {
                return SourceSupport::Definite;
            }
        }
        if Self::looks_like_playlist_url(&source.src) {
            return SourceSupport::Possible;
        }
        SourceSupport::None
    }

    /// Support level for a bare MIME type, with no URL to fall back on.
    pub fn can_play_type(&self, mime_type: &str) -> SourceSupport {
        if Self::is_hls_mime(mime_type) {
            SourceSupport::Definite
        } else {
            SourceSupport::None
        }
    }

    /// Construct the engine-backed handler for a selected source: builds the
    /// engine, attaches it to the target, and starts loading.
    pub fn handle<T: PlaybackTarget>(
        &self,
        source: MediaSource,
        target: T,
    ) -> Result<EngineHandler<F::Engine, T>, BridgeError> {
        if self.can_handle(&source) == SourceSupport::None {
            return Err(BridgeError::UnsupportedSource(source.src));
        }
        debug!(src = %source.src, "handling source");
        EngineHandler::attach(&self.factory, source, target, self.config.clone())
    }

    fn is_hls_mime(mime_type: &str) -> bool {
        HLS_MIME_TYPES
            .iter()
            .any(|known| mime_type.eq_ignore_ascii_case(known))
    }

    /// URL sniffing for the `Possible` tier: a `.m3u8` path component,
    /// case-insensitive. Relative URLs fall back to a substring check.
    fn looks_like_playlist_url(src: &str) -> bool {
        match Url::parse(src) {
            Ok(url) => url.path().to_ascii_lowercase().ends_with(".m3u8"),
            Err(_) => src.to_ascii_lowercase().contains(".m3u8"),
        }
    }
}
