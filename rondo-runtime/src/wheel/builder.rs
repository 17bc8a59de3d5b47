use config::Config;
use std::time::Duration;

use super::engine::TimeWheel;
use crate::config::{load_toml_config, load_yaml_config, WheelConfig};
use crate::error::WheelError;

/// Builder for a [`TimeWheel`].
///
/// Tuning comes either from the setter methods or from a config source
/// (`from_toml`, `from_yaml`, `with_config`), whose `timewheel` section is
/// resolved at [`build`](Self::build) time. When a source is supplied it
/// defines the tuning and the setters are ignored.
///
/// # Example
///
/// ```rust
/// use rondo_runtime::TimeWheelBuilder;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let wheel = TimeWheelBuilder::new()
///     .tick_duration(Duration::from_millis(100))
///     .wheel_size(10)
///     .pool_size(5)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct TimeWheelBuilder {
    config: WheelConfig,
    source: Option<Config>,
}

impl Default for TimeWheelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeWheelBuilder {
    /// Start from the default tuning (100ms ticks, 60 slots, 10 workers).
    pub fn new() -> Self {
        Self {
            config: WheelConfig::default(),
            source: None,
        }
    }

    /// Create with TOML config file
    ///
    /// # Panics
    ///
    /// Panics if the config file cannot be loaded or parsed.
    /// This is intentional as configuration errors should be caught early
    /// during setup.
    pub fn from_toml(path: &str) -> Self {
        let config = load_toml_config(path)
            .unwrap_or_else(|e| panic!("Failed to load TOML config from '{}': {}", path, e));
        Self::with_config(config)
    }

    /// Create with YAML config file
    ///
    /// # Panics
    ///
    /// Panics if the config file cannot be loaded or parsed.
    /// This is intentional as configuration errors should be caught early
    /// during setup.
    pub fn from_yaml(path: &str) -> Self {
        let config = load_yaml_config(path)
            .unwrap_or_else(|e| panic!("Failed to load YAML config from '{}': {}", path, e));
        Self::with_config(config)
    }

    /// Create with custom config
    pub fn with_config(config: Config) -> Self {
        Self {
            config: WheelConfig::default(),
            source: Some(config),
        }
    }

    /// Period of one tick. Sub-millisecond fractions are truncated.
    pub fn tick_duration(mut self, period: Duration) -> Self {
        self.config.tick_duration_ms = period.as_millis() as u64;
        self
    }

    /// Number of slots in the wheel.
    pub fn wheel_size(mut self, slots: usize) -> Self {
        self.config.wheel_size = slots;
        self
    }

    /// Number of dispatch workers.
    pub fn pool_size(mut self, workers: usize) -> Self {
        self.config.task_pool_size = workers;
        self
    }

    /// Resolve the configuration and construct the wheel (stopped).
    pub fn build(self) -> Result<TimeWheel, WheelError> {
        let config = match self.source {
            Some(source) => WheelConfig::from_config(&source)?,
            None => self.config,
        };
        TimeWheel::new(config)
    }
}
