use rondo::{ActionTask, TimeWheelBuilder};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    // Tuning comes from the [timewheel] section; any APP_-prefixed
    // environment variable overrides the file.
    let wheel = TimeWheelBuilder::from_toml("demos/application.toml").build()?;
    wheel.start()?;

    println!(
        "wheel from config: tick={:?}, slots={}, workers={}",
        wheel.tick_duration(),
        wheel.wheel_size(),
        wheel.pool_size()
    );

    wheel.submit(ActionTask::new(600, || {
        println!("configured wheel fired");
    }))?;

    tokio::time::sleep(Duration::from_secs(1)).await;
    wheel.stop().await;
    Ok(())
}
