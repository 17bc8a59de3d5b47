//! Rondo Runtime - Hashed-timing-wheel delayed task execution
//!
//! This crate provides the scheduling engine: the bucket array, the
//! delay-to-slot mapping, the tick clock and the dispatch pool that runs
//! fired tasks.

mod config;
mod dispatch;
mod error;
mod task;
mod wheel;

// Re-export public API
pub use config::{load_toml_config, load_yaml_config, WheelConfig};
pub use error::WheelError;
pub use task::{ActionTask, DelayedTask};
pub use wheel::{TimeWheel, TimeWheelBuilder, WheelStatus};
