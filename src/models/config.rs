use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::InputError;

/// Tolerances above this stop meaning "the same color" in practice.
pub const MAX_TOLERANCE: u8 = 50;

/// Drawing configuration loaded from draw.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DrawConfig {
    /// Per-channel tolerance when matching image pixels against selected
    /// colors (0-50)
    #[serde(default = "default_match_tolerance")]
    pub match_tolerance: u8,

    /// Per-channel tolerance when verifying drawn pixels on screen;
    /// defaults to `match_tolerance` when omitted
    #[serde(default)]
    pub verify_tolerance: Option<u8>,

    /// Seconds to wait after each drawing action before verifying
    #[serde(default = "default_action_delay")]
    pub action_delay_secs: f64,

    /// Whether to click once before the drag, for canvases that need
    /// focus before they accept strokes
    #[serde(default = "default_priming_click")]
    pub priming_click: bool,

    /// Perceptual neighborhood radius for color grouping
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
}

fn default_match_tolerance() -> u8 {
    10
}

fn default_action_delay() -> f64 {
    0.05
}

fn default_priming_click() -> bool {
    true
}

fn default_sensitivity() -> f32 {
    color_cluster::cluster::DEFAULT_RADIUS
}

impl DrawConfig {
    /// Load configuration from a YAML file, falling back to defaults when
    /// the file is missing or malformed.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse configuration from a YAML string, strictly.
    pub fn from_yaml(content: &str) -> Result<Self, InputError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// The tolerance used for on-screen verification.
    pub fn effective_verify_tolerance(&self) -> u8 {
        self.verify_tolerance.unwrap_or(self.match_tolerance)
    }

    pub fn action_delay(&self) -> Duration {
        Duration::from_secs_f64(self.action_delay_secs.max(0.0))
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.match_tolerance > MAX_TOLERANCE {
            return Err(InputError::ToleranceOutOfRange(self.match_tolerance));
        }
        if let Some(verify) = self.verify_tolerance {
            if verify > MAX_TOLERANCE {
                return Err(InputError::ToleranceOutOfRange(verify));
            }
        }
        if self.action_delay_secs < 0.0 {
            return Err(InputError::NegativeDelay(self.action_delay_secs));
        }
        Ok(())
    }
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            match_tolerance: default_match_tolerance(),
            verify_tolerance: None,
            action_delay_secs: default_action_delay(),
            priming_click: default_priming_click(),
            sensitivity: default_sensitivity(),
        }
    }
}
