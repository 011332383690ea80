//! Narrow interface to the external playback engine
//!
//! The actual media engine (platform player, vendor SDK) lives outside this
//! crate. It is consumed through [`AudioEngine`] for commands and through an
//! mpsc channel of [`EngineEvent`]s for lifecycle notifications, which is all
//! the state machine needs.

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Lifecycle notifications emitted by the playback engine
///
/// Events must arrive in the order the engine produced them; the playback
/// worker consumes them serially from a single channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The engine started buffering the stream
    Buffering,
    /// The engine has enough data to start; `play_when_ready` is the play
    /// intent flag at that moment
    Ready { play_when_ready: bool },
    /// Playback reached the end of the stream
    Ended,
    /// The engine was reset to idle
    Idle,
    /// Playback failed
    Error { message: String },
}

/// One selectable audio rendition of the live stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioTrackFormat {
    /// Bitrate in bits per second, as advertised by the HLS playlist
    pub bitrate: u32,
}

impl AudioTrackFormat {
    /// Bitrate in kbps, the unit shown to users
    pub fn bitrate_kbps(&self) -> u32 {
        self.bitrate / 1000
    }
}

/// Track selection applied to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackSelection {
    /// Let the engine pick renditions adaptively
    Adaptive,
    /// Pin playback to the rendition at this index
    Fixed(usize),
}

/// Trait surface of the external playback engine
///
/// Implementations wrap the platform media player. All methods are commands;
/// state feedback comes back asynchronously as [`EngineEvent`]s on the
/// channel handed to [`crate::PlaybackService::spawn`].
#[async_trait]
pub trait AudioEngine: Send + Sync {
    /// Stop playback, clear the loaded source, prepare the HLS stream at
    /// `url` and set the play intent
    async fn load(&self, url: &str) -> Result<()>;

    /// Stop playback and clear the loaded source
    async fn stop(&self) -> Result<()>;

    /// Currently selectable audio renditions, in playlist order
    ///
    /// Empty until the engine has parsed the master playlist.
    async fn audio_tracks(&self) -> Vec<AudioTrackFormat>;

    /// Apply a track selection override
    async fn select_track(&self, selection: TrackSelection) -> Result<()>;
}

/// Shared handle to the active engine, carried by
/// [`crate::PlaybackState::Playing`]
#[derive(Clone)]
pub struct EngineHandle(Arc<dyn AudioEngine>);

impl EngineHandle {
    /// Wrap an engine reference
    pub fn new(engine: Arc<dyn AudioEngine>) -> Self {
        Self(engine)
    }
}

impl Deref for EngineHandle {
    type Target = dyn AudioEngine;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EngineHandle")
    }
}
