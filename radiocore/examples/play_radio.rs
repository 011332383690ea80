//! Demo of the playback service wired to a scripted engine
//!
//! The real media engine lives in the platform layer; here a small scripted
//! stand-in emits the lifecycle an HLS engine would, so the demo can show
//! state transitions and now-playing updates end to end.
//!
//! Run with:
//! ```bash
//! RUST_LOG=debug cargo run --example play_radio
//! ```

use async_trait::async_trait;
use radiocore::{
    AudioEngine, AudioTrackFormat, EngineEvent, PlaybackService, Result, TrackSelection,
};
use radiometa::MetadataClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

/// Scripted engine: acknowledges commands by emitting the matching events
struct ScriptedEngine {
    events: mpsc::Sender<EngineEvent>,
}

#[async_trait]
impl AudioEngine for ScriptedEngine {
    async fn load(&self, url: &str) -> Result<()> {
        info!(url, "Engine loading stream");
        let events = self.events.clone();
        tokio::spawn(async move {
            let _ = events.send(EngineEvent::Buffering).await;
            tokio::time::sleep(Duration::from_millis(500)).await;
            let _ = events
                .send(EngineEvent::Ready {
                    play_when_ready: true,
                })
                .await;
        });
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        info!("Engine stopping");
        let _ = self.events.send(EngineEvent::Idle).await;
        Ok(())
    }

    async fn audio_tracks(&self) -> Vec<AudioTrackFormat> {
        vec![
            AudioTrackFormat { bitrate: 64_000 },
            AudioTrackFormat { bitrate: 128_000 },
            AudioTrackFormat { bitrate: 256_000 },
        ]
    }

    async fn select_track(&self, selection: TrackSelection) -> Result<()> {
        info!(?selection, "Engine track selection");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let (events_tx, events_rx) = mpsc::channel(16);
    let engine = Arc::new(ScriptedEngine {
        events: events_tx.clone(),
    });

    let metadata = MetadataClient::new("https://radio.example.com/now_playing.txt")?;
    let service = PlaybackService::spawn(engine, events_rx, metadata, None);

    let mut states = service.subscribe_state();
    let mut now_playing = service.subscribe_stream_info();

    tokio::spawn(async move {
        while states.changed().await.is_ok() {
            info!(state = states.borrow().label(), "State changed");
        }
    });
    tokio::spawn(async move {
        while now_playing.changed().await.is_ok() {
            let info = now_playing.borrow().clone();
            if !info.is_empty() {
                info!(%info, "Now playing");
            }
        }
    });

    service.play("https://radio.example.com/live.m3u8").await?;

    let tracks = service.tracks_metadata().await?;
    info!(?tracks, "Selectable tracks");

    tokio::time::sleep(Duration::from_secs(12)).await;
    service.stop().await?;
    tokio::time::sleep(Duration::from_secs(1)).await;
    service.shutdown().await?;

    Ok(())
}
