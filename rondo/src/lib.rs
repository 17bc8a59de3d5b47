//! # Rondo - Hashed-Timing-Wheel Task Scheduling for Rust
//!
//! Rondo runs a task once, approximately when its requested delay elapses,
//! without a timer per task. Delays hash onto a circular array of buckets;
//! a single tick clock drains one bucket per period and a fixed pool of
//! workers executes whatever fired.
//!
//! ## Features
//!
//! - **O(1) scheduling**: a submit is one slot computation and one append
//! - **O(1) ticking**: each tick drains exactly one bucket
//! - **Failure isolation**: a panicking task is logged and contained; the
//!   wheel and its siblings keep going
//! - **Immediate lane**: negative delays bypass the wheel entirely
//! - **Graceful shutdown**: tick clock first, then the workers, each with a
//!   bounded grace period
//! - **Config support**: tuning via TOML/YAML files or `APP_`-prefixed
//!   environment variables
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rondo::{ActionTask, TimeWheelBuilder};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let wheel = TimeWheelBuilder::new()
//!         .tick_duration(Duration::from_millis(100))
//!         .wheel_size(60)
//!         .pool_size(10)
//!         .build()?;
//!     wheel.start()?;
//!
//!     wheel.submit(ActionTask::new(500, || {
//!         println!("about half a second later");
//!     }))?;
//!
//!     tokio::time::sleep(Duration::from_secs(1)).await;
//!     wheel.stop().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! Create `config/application.toml`:
//!
//! ```toml
//! [timewheel]
//! tick_duration_ms = 100
//! wheel_size = 60
//! task_pool_size = 10
//! ```
//!
//! and build from it:
//!
//! ```rust,no_run
//! use rondo::TimeWheelBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let wheel = TimeWheelBuilder::from_toml("config/application.toml").build()?;
//! # Ok(())
//! # }
//! ```
//!
//! You can also use environment variables with `APP_` prefix:
//!
//! ```bash
//! export APP_TIMEWHEEL_TICK_DURATION_MS=50
//! ```
//!
//! ## Resolution and horizon
//!
//! Timing resolution is bounded below by the tick period: a task fires on
//! the tick its slot comes up, so up to one tick later than requested. The
//! wheel covers a single rotation (`tick_duration * wheel_size`); a delay
//! beyond that horizon wraps and fires early, which `submit` logs at `warn`
//! level.

// Re-export core types
pub use rondo_runtime::{
    load_toml_config, load_yaml_config, ActionTask, DelayedTask, TimeWheel, TimeWheelBuilder,
    WheelConfig, WheelError, WheelStatus,
};

// Make the runtime crate available under its own name as well
pub use rondo_runtime;
