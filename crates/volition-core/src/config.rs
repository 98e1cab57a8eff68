use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Top-level configuration for the Volition pipeline.
///
/// Loaded from `~/.volition/config.toml` by default. Each section corresponds
/// to one pipeline stage or cross-cutting concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolitionConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub intent: IntentConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub suggest: SuggestConfig,
    #[serde(default)]
    pub executor: ExecutorConfig,
}

impl Default for VolitionConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            intent: IntentConfig::default(),
            extract: ExtractConfig::default(),
            suggest: SuggestConfig::default(),
            executor: ExecutorConfig::default(),
        }
    }
}

impl VolitionConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: VolitionConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Intent classification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentConfig {
    /// Minimum primary-tier confidence before degrading to the keyword
    /// fallback.
    pub fallback_threshold: f32,
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            fallback_threshold: 0.6,
        }
    }
}

/// Entity extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Minimum value (KRW) for bare `N원` amounts. Suppresses noise like
    /// apartment numbers or list indices read as money.
    pub min_bare_amount: i64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            min_bare_amount: 1_000,
        }
    }
}

/// Action suggestion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    /// Urgency level (1-5) at or above which a forced urgent notification
    /// action is appended to every suggestion set.
    pub urgent_threshold: u8,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self { urgent_threshold: 4 }
    }
}

/// Action executor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Whether to show a rationale when re-requesting a denied permission.
    pub show_permission_rationale: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            show_permission_rationale: true,
        }
    }
}
