//! Playback core for Radiowave
//!
//! This crate glues an external audio playback engine to observers through a
//! small reactive state machine:
//!
//! - [`AudioEngine`] is the narrow trait surface the platform player engine
//!   implements; its lifecycle notifications arrive as [`EngineEvent`]s.
//! - [`PlaybackService`] owns a background worker that serializes engine
//!   events and caller commands, maintains the current [`PlaybackState`], and
//!   while playing runs a periodic now-playing refresh through
//!   [`radiometa::MetadataClient`].
//! - Observers subscribe through `tokio::sync::watch` channels, which keep
//!   the last value so late subscribers see the current state immediately.
//!
//! # State machine
//!
//! Transitions are driven solely by engine notifications, never by direct
//! mutation:
//!
//! - buffering → `Buffering` (refresh cancelled, now-playing cleared)
//! - ready with play intent → `Playing` (refresh started)
//! - ready without play intent, ended, idle → `Stopped` (refresh cancelled,
//!   now-playing cleared)
//! - playback error → `Error` (refresh cancelled, now-playing cleared)
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use radiocore::{AudioEngine, PlaybackService};
//! use radiometa::MetadataClient;
//! use tokio::sync::mpsc;
//!
//! # async fn run(engine: Arc<dyn AudioEngine>, events: mpsc::Receiver<radiocore::EngineEvent>) -> radiocore::Result<()> {
//! let metadata = MetadataClient::new("https://radio.example.com/now_playing.txt")?;
//! let service = PlaybackService::spawn(engine, events, metadata, None);
//!
//! let mut states = service.subscribe_state();
//! let mut now_playing = service.subscribe_stream_info();
//!
//! service.play("https://radio.example.com/live.m3u8").await?;
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod refresh;
pub mod service;
pub mod state;
pub mod tracks;

// Re-exports
pub use engine::{AudioEngine, AudioTrackFormat, EngineEvent, EngineHandle, TrackSelection};
pub use error::{Error, Result};
pub use refresh::{MetadataRefresher, DEFAULT_REFRESH_INTERVAL};
pub use service::{PlaybackCommand, PlaybackService};
pub use state::PlaybackState;
pub use tracks::{TracksMetadata, ADAPTIVE_TRACK_ID};
