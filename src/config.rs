//! Configuration management for the posture tracker

use crate::{
    constants::{
        DEFAULT_BAD_TIME_LIMIT_SECS, DEFAULT_FPS, DEFAULT_GOOD_TIME_LIMIT_SECS, DEFAULT_MIN_VISIBILITY,
        DEFAULT_NECK_LIMIT_DEG, DEFAULT_TORSO_LIMIT_DEG,
    },
    filters::create_filter,
    tracker::{MajorityPolicy, TrackerConfig},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Angle limits
    pub thresholds: ThresholdConfig,

    /// Frame rate and alert durations
    pub timing: TimingConfig,

    /// Alert behavior
    pub alerts: AlertConfig,

    /// Frame classification settings
    pub classification: ClassificationConfig,
}

/// Angle limits in degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Neck inclination above which a frame is bad
    pub neck_limit_deg: f64,

    /// Torso inclination above which a frame is bad
    pub torso_limit_deg: f64,
}

/// Timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Expected frames per second of the input
    pub frame_rate: f64,

    /// Seconds of bad posture before a bad alert
    pub bad_time_limit_secs: f64,

    /// Seconds of good posture before a good alert
    pub good_time_limit_secs: f64,
}

/// Alert configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Restart counting after every alert
    pub reset_counters_on_alert: bool,
}

/// Classification configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Recent-frame window for the posture label (0 = whole session)
    pub majority_window: usize,

    /// Minimum landmark visibility for a frame to count
    pub min_visibility: f64,

    /// Angle smoothing filter spec
    pub filter: String,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            neck_limit_deg: DEFAULT_NECK_LIMIT_DEG,
            torso_limit_deg: DEFAULT_TORSO_LIMIT_DEG,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FPS,
            bad_time_limit_secs: DEFAULT_BAD_TIME_LIMIT_SECS,
            good_time_limit_secs: DEFAULT_GOOD_TIME_LIMIT_SECS,
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            reset_counters_on_alert: true,
        }
    }
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            majority_window: 0,
            min_visibility: DEFAULT_MIN_VISIBILITY,
            filter: "none".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Tracker settings derived from this configuration
    #[must_use]
    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            neck_limit_deg: self.thresholds.neck_limit_deg,
            torso_limit_deg: self.thresholds.torso_limit_deg,
            frame_rate: self.timing.frame_rate,
            bad_time_limit_secs: self.timing.bad_time_limit_secs,
            good_time_limit_secs: self.timing.good_time_limit_secs,
            reset_counters_on_alert: self.alerts.reset_counters_on_alert,
            majority: match self.classification.majority_window {
                0 => MajorityPolicy::Cumulative,
                n => MajorityPolicy::Window(n),
            },
        }
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> Result<()> {
        self.tracker_config().validate()?;

        if !(0.0..=1.0).contains(&self.classification.min_visibility) {
            return Err(Error::ConfigError(
                "Minimum visibility must be between 0.0 and 1.0".to_string(),
            ));
        }

        create_filter(&self.classification.filter)?;

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Posture Tracker Configuration

# Angle limits (degrees)
thresholds:
  neck_limit_deg: 40.0
  torso_limit_deg: 10.0

# Frame rate and alert durations (seconds)
timing:
  frame_rate: 30.0
  bad_time_limit_secs: 180.0
  good_time_limit_secs: 180.0

# Alert behavior
alerts:
  reset_counters_on_alert: true

# Frame classification
classification:
  majority_window: 0
  min_visibility: 0.5
  filter: "none"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_matches_defaults() {
        let parsed = Config::from_yaml(EXAMPLE_CONFIG).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed = Config::from_yaml("timing:\n  frame_rate: 15.0\n").unwrap();
        assert_eq!(parsed.timing.frame_rate, 15.0);
        assert_eq!(parsed.timing.bad_time_limit_secs, DEFAULT_BAD_TIME_LIMIT_SECS);
        assert_eq!(parsed.thresholds, ThresholdConfig::default());
    }

    #[test]
    fn test_majority_window_mapping() {
        let mut config = Config::default();
        assert_eq!(config.tracker_config().majority, MajorityPolicy::Cumulative);

        config.classification.majority_window = 90;
        assert_eq!(config.tracker_config().majority, MajorityPolicy::Window(90));
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.timing.frame_rate = 0.0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfiguration(_))));

        let mut config = Config::default();
        config.classification.min_visibility = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.classification.filter = "bogus".to_string();
        assert!(matches!(config.validate(), Err(Error::FilterError(_))));
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            Config::from_yaml("timing: [1, 2"),
            Err(Error::ConfigError(_))
        ));
    }
}
