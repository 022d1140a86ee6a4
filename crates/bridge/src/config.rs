//! Bridge configuration and its builder.

use std::time::Duration;

/// Cooldown window within which a repeated recovery trigger of the same
/// class escalates instead of re-running the same action.
pub const DEFAULT_RECOVERY_COOLDOWN: Duration = Duration::from_millis(2000);

/// Configurable options for the bridge.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Cooldown applied per recovery class by the escalation ladder.
    pub recovery_cooldown: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            recovery_cooldown: DEFAULT_RECOVERY_COOLDOWN,
        }
    }
}

impl BridgeConfig {
    pub fn builder() -> BridgeConfigBuilder {
        BridgeConfigBuilder::new()
    }
}

/// Builder for [`BridgeConfig`].
#[derive(Debug, Default)]
pub struct BridgeConfigBuilder {
    config: BridgeConfig,
}

impl BridgeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-class recovery cooldown window.
    pub fn with_recovery_cooldown(mut self, cooldown: Duration) -> Self {
        self.config.recovery_cooldown = cooldown;
        self
    }

    pub fn build(self) -> BridgeConfig {
        self.config
    }
}
