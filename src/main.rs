use anyhow::{Context, Result};
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use courier_zone_briefing::{BriefingConfig, ZoneBriefing};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courier_zone_briefing=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting courier zone briefing server");

    let config = BriefingConfig::from_env().context("Failed to load configuration")?;
    let briefing = ZoneBriefing::new(&config)?;
    let server = briefing.serve(rmcp::transport::stdio()).await?;
    server.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
