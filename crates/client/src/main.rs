//! readyview - situational-awareness display client.
//!
//! Connects to the push channel, runs the dispatch loop, and logs each
//! selected view. The real rendering layer consumes the same watch
//! channel; the log renderer here stands in for it.

use anyhow::Result;
use readyview_client::{Config, Dispatcher, PushChannel, View};
use readyview_shared::Category;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("readyview_client=debug")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!("connecting to {}", config.channel_url);

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let _channel = PushChannel::connect(config.channel_url.as_str(), events_tx);

    let (dispatcher, mut views) = Dispatcher::with_receiver();
    tokio::spawn(async move {
        loop {
            {
                let view = views.borrow_and_update();
                render(&view);
            }
            if views.changed().await.is_err() {
                break;
            }
        }
    });

    dispatcher.run(events_rx).await;
    Ok(())
}

fn render(view: &View) {
    match view {
        View::Alert { magnitude, place } => {
            tracing::info!(
                "ALERT: earthquake with magnitude {} recorded near {}",
                magnitude,
                place
            );
        }
        View::Inventory { snapshot } => {
            let stocked: Vec<&str> = Category::ALL
                .iter()
                .filter(|c| snapshot.stocked(**c))
                .map(|c| c.as_str())
                .collect();
            tracing::info!(
                "inventory: {}/{} stocked [{}]",
                stocked.len(),
                Category::ALL.len(),
                stocked.join(", ")
            );
        }
    }
}
