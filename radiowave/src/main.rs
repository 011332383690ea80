//! Headless Radiowave application
//!
//! The platform frontends (mobile UI, notification presenter) are separate
//! deliverables; this binary wires the shared core together for servers and
//! debugging: it loads the station configuration and follows the station's
//! now-playing feed, logging every change until interrupted.
//!
//! Usage:
//! ```bash
//! radiowave [station-preset]
//! ```

use radioconfig::get_config;
use radiocore::MetadataRefresher;
use radiometa::{MetadataClient, StreamInfo};
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = get_config();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.get_log_min_level().to_lowercase()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(preset) = std::env::args().nth(1) {
        config.select_station(&preset)?;
    }

    let station = config.get_station_name();
    let stream_url = config.get_stream_url()?;
    let info_url = config.get_info_url()?;
    info!(station, stream_url, info_url, "Radiowave starting");

    let client = MetadataClient::new(&info_url)?;
    let (info_tx, mut info_rx) = watch::channel(StreamInfo::empty());
    let refresher = MetadataRefresher::spawn(
        client,
        Duration::from_secs(config.get_info_poll_secs()),
        info_tx,
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                break;
            }
            changed = info_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let now_playing = info_rx.borrow().clone();
                if !now_playing.is_empty() {
                    info!(%now_playing, station, "Now playing");
                }
            }
        }
    }

    refresher.cancel();
    Ok(())
}
