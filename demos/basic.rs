use rondo::{ActionTask, TimeWheelBuilder};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rondo_runtime=debug".into()),
        )
        .init();

    let wheel = TimeWheelBuilder::new()
        .tick_duration(Duration::from_millis(100))
        .wheel_size(10)
        .pool_size(4)
        .build()?;
    wheel.start()?;

    for delay in [250_i64, 500, 750, 1_000] {
        wheel.submit(ActionTask::new(delay, move || {
            println!("fired after ~{delay}ms");
        }))?;
    }

    // Negative delays never touch the wheel.
    wheel.submit(ActionTask::new(-1, || {
        println!("fired immediately");
    }))?;

    tokio::time::sleep(Duration::from_millis(1_500)).await;

    println!("status before shutdown: {:?}", wheel.status());
    wheel.stop().await;
    Ok(())
}
