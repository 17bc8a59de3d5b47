use thiserror::Error;

/// Errors surfaced by the scheduling engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WheelError {
    /// `submit` was called while the wheel is not running. The task was not
    /// enqueued; the caller may start the wheel and retry.
    #[error("time wheel is not running")]
    NotRunning,

    /// `start` was called on a wheel that has already been stopped. A
    /// stopped wheel cannot be restarted; construct a new one.
    #[error("time wheel has been stopped and cannot be restarted")]
    AlreadyStopped,

    /// A tuning value failed validation at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
