/// A unit of work plus the delay it asked for.
///
/// The action is opaque to the engine: it takes no input and the engine
/// observes no output. Construction has no side effects; everything the task
/// does happens when [`execute`](DelayedTask::execute) runs on a dispatch
/// worker.
pub trait DelayedTask: Send {
    /// Run the task's action.
    fn execute(&self);

    /// Requested delay before execution, in milliseconds. A negative value
    /// requests immediate execution.
    fn delay_ms(&self) -> i64;
}

/// A [`DelayedTask`] backed by a closure.
///
/// # Example
///
/// ```rust
/// use rondo_runtime::{ActionTask, DelayedTask};
///
/// let task = ActionTask::new(500, || println!("half a second later"));
/// assert_eq!(task.delay_ms(), 500);
/// ```
pub struct ActionTask<F> {
    delay_ms: i64,
    action: F,
}

impl<F> ActionTask<F>
where
    F: Fn() + Send,
{
    pub fn new(delay_ms: i64, action: F) -> Self {
        Self { delay_ms, action }
    }
}

impl<F> DelayedTask for ActionTask<F>
where
    F: Fn() + Send,
{
    fn execute(&self) {
        (self.action)();
    }

    fn delay_ms(&self) -> i64 {
        self.delay_ms
    }
}
