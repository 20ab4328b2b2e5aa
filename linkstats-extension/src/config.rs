//! Extension configuration, read from `linkstats.toml`.

use crate::error::ExtensionResult;
use linkstats_model::{Scope, Trigger};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Default text of the readiness-exempt notice provider.
pub const DEFAULT_NOTICE_TEXT: &str =
    "The account link service isn't ready yet, no data is available.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionConfig {
    /// Shown by the notice provider, whether or not the service is ready.
    #[serde(default = "default_notice_text")]
    pub notice_text: String,
    /// Host events on which providers are queried.
    #[serde(default = "default_triggers")]
    pub triggers: Vec<Trigger>,
}

fn default_notice_text() -> String {
    DEFAULT_NOTICE_TEXT.to_string()
}

fn default_triggers() -> Vec<Trigger> {
    Trigger::ALL.to_vec()
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            notice_text: default_notice_text(),
            triggers: default_triggers(),
        }
    }
}

impl ExtensionConfig {
    pub fn parse(contents: &str) -> ExtensionResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads config from `path`.
    /// Falls back to defaults with a warning on read or parse errors.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No config file found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    info!("Loaded extension config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse config file {:?}: {}. Falling back to defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn is_enabled(&self, trigger: Trigger) -> bool {
        self.triggers.contains(&trigger)
    }

    /// The scope to evaluate for `trigger`, or `None` when the trigger is off.
    pub fn scope_for(&self, trigger: Trigger) -> Option<Scope> {
        self.is_enabled(trigger).then(|| trigger.scope())
    }
}
