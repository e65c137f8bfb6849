//! Keeps a local mirror of the tracker in step with the server and logs a
//! daily summary.

use tokio::time::{interval, MissedTickBehavior};

use puppy_tracker::{
    client::{PollHandle, SyncClient},
    telemetry, ClientConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing("info,puppy_tracker=debug");

    let config = ClientConfig::from_env().map_err(|e| {
        tracing::error!("Configuration error: {}", e);
        e
    })?;

    let client = SyncClient::connect(&config).await?;
    tracing::info!(
        api = client.api().base_url(),
        mirror = %config.mirror_dir.display(),
        "Sync agent started"
    );

    let poller = PollHandle::spawn(client.clone(), config.sync_interval, config.health_interval);

    let mut report = interval(config.health_interval);
    report.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    tracing::error!("Failed to listen for ctrl-c: {}", e);
                }
                break;
            }
            _ = report.tick() => {
                let summary = client.summary(client.today()).await;
                let connection = client.connection().await;
                tracing::info!(
                    ?connection,
                    summary = %serde_json::to_string(&summary)?,
                    "Daily summary"
                );
            }
        }
    }

    poller.stop().await;
    tracing::info!("Sync agent stopped");
    Ok(())
}
