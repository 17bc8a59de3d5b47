use config::{Config, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::WheelError;

/// Tuning parameters for a [`TimeWheel`](crate::TimeWheel).
///
/// All three values must be positive. The defaults give a wheel that covers
/// six seconds per rotation at a 100ms resolution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Period of one tick, in milliseconds.
    pub tick_duration_ms: u64,
    /// Number of slots in the wheel.
    pub wheel_size: usize,
    /// Number of dispatch workers executing fired tasks.
    pub task_pool_size: usize,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            tick_duration_ms: 100,
            wheel_size: 60,
            task_pool_size: 10,
        }
    }
}

impl WheelConfig {
    /// Resolve the `timewheel` section of a loaded config. A missing section
    /// falls back to the defaults; present values are validated.
    pub fn from_config(config: &Config) -> Result<Self, WheelError> {
        let resolved = match config.get::<WheelConfig>("timewheel") {
            Ok(parsed) => parsed,
            Err(config::ConfigError::NotFound(_)) => WheelConfig::default(),
            Err(e) => return Err(WheelError::InvalidConfig(e.to_string())),
        };
        resolved.validate()?;
        Ok(resolved)
    }

    pub(crate) fn validate(&self) -> Result<(), WheelError> {
        if self.tick_duration_ms == 0 {
            return Err(WheelError::InvalidConfig(
                "tick_duration_ms must be positive".into(),
            ));
        }
        if self.wheel_size == 0 {
            return Err(WheelError::InvalidConfig(
                "wheel_size must be positive".into(),
            ));
        }
        if self.task_pool_size == 0 {
            return Err(WheelError::InvalidConfig(
                "task_pool_size must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Tick period as a [`Duration`].
    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_duration_ms)
    }
}

/// Load config from a specific TOML file
pub fn load_toml_config<P: AsRef<Path>>(path: P) -> Result<Config, Box<dyn std::error::Error>> {
    let config = Config::builder()
        .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
        .add_source(config::Environment::with_prefix("APP").separator("_"))
        .build()?;
    Ok(config)
}

/// Load config from a specific YAML file
pub fn load_yaml_config<P: AsRef<Path>>(path: P) -> Result<Config, Box<dyn std::error::Error>> {
    let config = Config::builder()
        .add_source(File::from(path.as_ref()).format(FileFormat::Yaml))
        .add_source(config::Environment::with_prefix("APP").separator("_"))
        .build()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_tuning() {
        let config = WheelConfig::default();
        assert_eq!(config.tick_duration_ms, 100);
        assert_eq!(config.wheel_size, 60);
        assert_eq!(config.task_pool_size, 10);
        assert_eq!(config.tick_duration(), Duration::from_millis(100));
    }

    #[test]
    fn missing_section_falls_back_to_defaults() {
        let source = Config::builder().build().expect("empty config");
        let config = WheelConfig::from_config(&source).expect("defaults");
        assert_eq!(config, WheelConfig::default());
    }

    #[test]
    fn section_values_override_defaults() {
        let source = Config::builder()
            .set_override("timewheel.tick_duration_ms", 50)
            .expect("override")
            .set_override("timewheel.wheel_size", 12)
            .expect("override")
            .build()
            .expect("config");

        let config = WheelConfig::from_config(&source).expect("resolved");
        assert_eq!(config.tick_duration_ms, 50);
        assert_eq!(config.wheel_size, 12);
        // Untouched key keeps its default.
        assert_eq!(config.task_pool_size, 10);
    }

    #[test]
    fn zero_values_are_rejected() {
        let config = WheelConfig {
            tick_duration_ms: 0,
            ..WheelConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(WheelError::InvalidConfig(_))
        ));

        let config = WheelConfig {
            wheel_size: 0,
            ..WheelConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(WheelError::InvalidConfig(_))
        ));

        let config = WheelConfig {
            task_pool_size: 0,
            ..WheelConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(WheelError::InvalidConfig(_))
        ));
    }
}
