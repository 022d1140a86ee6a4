use engine_api::EngineError;

// Custom error type for bridge operations
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("streaming engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("source cannot be handled: {0}")]
    UnsupportedSource(String),
}
