//! # Engine Event Vocabulary
//!
//! The fixed enumeration of events the streaming engine emits, with their
//! typed payloads. The bridge subscribes to every member of this vocabulary
//! and re-publishes each one verbatim on the host framework's event bus, so
//! the enumeration is closed: downstream consumers can rely on `name()`
//! values staying stable.

/// Media track kind carried by fragment and track-set payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Audio,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Audio => "audio",
            MediaType::Video => "video",
        }
    }
}

/// Which media tracks a newly created buffer actually contains.
///
/// Reported once per buffer-creation; initial segments of a stream may
/// legitimately carry only one track kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackSet {
    pub audio: bool,
    pub video: bool,
}

impl TrackSet {
    pub fn both() -> Self {
        Self {
            audio: true,
            video: true,
        }
    }

    pub fn contains(&self, media_type: MediaType) -> bool {
        match media_type {
            MediaType::Audio => self.audio,
            MediaType::Video => self.video,
        }
    }
}

/// A parsed or activated fragment, identified by its sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentInfo {
    pub media_type: MediaType,
    /// Sequence number establishing playback order.
    pub sn: u64,
}

/// Details reported when a quality level's playlist has been loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelInfo {
    /// Whether the underlying playlist is live (no end-list yet).
    pub live: bool,
    /// Total duration of the level in seconds, as reported by the playlist.
    pub total_duration: f64,
}

/// The engine's own error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineErrorKind {
    /// Manifest/segment fetching failed; the engine manages its own retry
    /// backoff once loading is restarted.
    Network,
    /// Demuxing or buffer-append failed.
    Media,
    /// Anything outside the two recoverable classes.
    Other,
}

/// Payload of an engine error event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorData {
    /// Fatal errors halt playback unless explicitly recovered.
    pub fatal: bool,
    pub kind: EngineErrorKind,
}

/// The closed set of events the engine can emit.
///
/// Delivery-order precondition: for a given media type the engine produces
/// `BufferCreated` before `FragParsed` before `FragChanged`; consumers must
/// not reorder or buffer deliveries.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    MediaAttached,
    MediaDetached,
    ManifestLoading { url: String },
    ManifestParsed { level_count: usize },
    LevelLoaded(LevelInfo),
    BufferCreated(TrackSet),
    FragParsed(FragmentInfo),
    FragChanged(FragmentInfo),
    AudioCodecSwapped,
    Error(ErrorData),
    Destroying,
}

impl EngineEvent {
    /// Wire-style event name, used when re-publishing on the host event bus.
    pub fn name(&self) -> &'static str {
        match self {
            EngineEvent::MediaAttached => "hlsMediaAttached",
            EngineEvent::MediaDetached => "hlsMediaDetached",
            EngineEvent::ManifestLoading { .. } => "hlsManifestLoading",
            EngineEvent::ManifestParsed { .. } => "hlsManifestParsed",
            EngineEvent::LevelLoaded(_) => "hlsLevelLoaded",
            EngineEvent::BufferCreated(_) => "hlsBufferCreated",
            EngineEvent::FragParsed(_) => "hlsFragParsed",
            EngineEvent::FragChanged(_) => "hlsFragChanged",
            EngineEvent::AudioCodecSwapped => "hlsAudioCodecSwapped",
            EngineEvent::Error(_) => "hlsError",
            EngineEvent::Destroying => "hlsDestroying",
        }
    }
}
