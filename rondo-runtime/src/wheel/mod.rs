mod bucket;
mod builder;
mod engine;
mod ticker;

pub use builder::TimeWheelBuilder;
pub use engine::{TimeWheel, WheelStatus};
