//! Playback service worker
//!
//! The worker is the single owner of playback state. Engine notifications
//! and caller commands are serialized through one `tokio::select!` loop, so
//! no locking is needed around the state machine. Observers receive state
//! and now-playing updates through watch channels with last-value replay.

use crate::engine::{AudioEngine, EngineEvent, EngineHandle, TrackSelection};
use crate::error::{Error, Result};
use crate::refresh::{MetadataRefresher, DEFAULT_REFRESH_INTERVAL};
use crate::state::PlaybackState;
use crate::tracks::{TracksMetadata, ADAPTIVE_TRACK_ID};
use radiometa::{MetadataClient, StreamInfo};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Commands sent to the playback worker
#[derive(Debug)]
pub enum PlaybackCommand {
    /// Load and play the stream at this URL
    Play { url: String },
    /// Stop playback and clear the loaded source
    Stop,
    /// Select an audio track; [`ADAPTIVE_TRACK_ID`] restores adaptive mode
    SelectTrack { id: i32 },
    /// Snapshot the selectable tracks
    TracksMetadata {
        reply: oneshot::Sender<TracksMetadata>,
    },
    /// Stop the worker
    Shutdown,
}

/// Handle to the playback worker task
///
/// Cheap to clone is not needed here; the service is the single entry point
/// callers keep for the lifetime of the app. Subscriptions obtained from it
/// stay valid until [`PlaybackService::shutdown`].
pub struct PlaybackService {
    command_tx: mpsc::Sender<PlaybackCommand>,
    state_rx: watch::Receiver<PlaybackState>,
    info_rx: watch::Receiver<StreamInfo>,
    join_handle: JoinHandle<()>,
}

impl PlaybackService {
    /// Spawn the playback worker
    ///
    /// # Arguments
    ///
    /// * `engine` - the platform playback engine behind its trait surface
    /// * `engine_events` - channel the engine posts its notifications to
    /// * `metadata` - client for the now-playing endpoint
    /// * `refresh_interval` - now-playing poll interval, default 5 s
    pub fn spawn(
        engine: Arc<dyn AudioEngine>,
        mut engine_events: mpsc::Receiver<EngineEvent>,
        metadata: MetadataClient,
        refresh_interval: Option<Duration>,
    ) -> Self {
        let (command_tx, mut command_rx) = mpsc::channel(32);
        let (state_tx, state_rx) = watch::channel(PlaybackState::Stopped);
        let (info_tx, info_rx) = watch::channel(StreamInfo::empty());

        let join_handle = tokio::spawn(async move {
            info!("Starting playback worker");

            let mut state = WorkerState {
                engine,
                metadata,
                refresh_interval: refresh_interval.unwrap_or(DEFAULT_REFRESH_INTERVAL),
                state_tx,
                info_tx,
                refresher: None,
                selected_track: ADAPTIVE_TRACK_ID,
                shutdown: false,
            };

            loop {
                tokio::select! {
                    event = engine_events.recv() => match event {
                        Some(event) => state.handle_engine_event(event),
                        // Engine gone, nothing left to react to
                        None => break,
                    },
                    cmd = command_rx.recv() => match cmd {
                        Some(cmd) => {
                            if let Err(err) = state.handle_command(cmd).await {
                                error!("Playback command error: {err:?}");
                                state.enter_error();
                            }
                            if state.shutdown {
                                break;
                            }
                        }
                        // Command channel closed, terminate
                        None => break,
                    },
                }
            }

            state.stop_refresh();
            info!("Playback worker stopped");
        });

        Self {
            command_tx,
            state_rx,
            info_rx,
            join_handle,
        }
    }

    /// Request playback of the stream at `url`
    pub async fn play(&self, url: impl Into<String>) -> Result<()> {
        self.send(PlaybackCommand::Play { url: url.into() }).await
    }

    /// Stop playback
    ///
    /// The state change to Stopped arrives through the engine's own idle
    /// notification, like every other transition.
    pub async fn stop(&self) -> Result<()> {
        self.send(PlaybackCommand::Stop).await
    }

    /// Select an audio track by id
    pub async fn select_track(&self, id: i32) -> Result<()> {
        self.send(PlaybackCommand::SelectTrack { id }).await
    }

    /// Snapshot the selectable tracks, rebuilt from the engine on demand
    pub async fn tracks_metadata(&self) -> Result<TracksMetadata> {
        let (reply, rx) = oneshot::channel();
        self.send(PlaybackCommand::TracksMetadata { reply }).await?;
        rx.await.map_err(|_| Error::WorkerStopped)
    }

    /// Subscribe to playback state changes
    ///
    /// The receiver replays the current state to late subscribers.
    pub fn subscribe_state(&self) -> watch::Receiver<PlaybackState> {
        self.state_rx.clone()
    }

    /// Subscribe to now-playing updates
    pub fn subscribe_stream_info(&self) -> watch::Receiver<StreamInfo> {
        self.info_rx.clone()
    }

    /// Current playback state
    pub fn state(&self) -> PlaybackState {
        self.state_rx.borrow().clone()
    }

    /// Last published now-playing record
    pub fn stream_info(&self) -> StreamInfo {
        self.info_rx.borrow().clone()
    }

    /// Stop the worker and wait for it to finish
    pub async fn shutdown(self) -> Result<()> {
        // A closed channel means the worker already exited
        let _ = self.command_tx.send(PlaybackCommand::Shutdown).await;
        self.join_handle.await.map_err(|_| Error::WorkerStopped)
    }

    async fn send(&self, cmd: PlaybackCommand) -> Result<()> {
        self.command_tx
            .send(cmd)
            .await
            .map_err(|_| Error::WorkerStopped)
    }
}

/// State owned by the worker task
struct WorkerState {
    engine: Arc<dyn AudioEngine>,
    metadata: MetadataClient,
    refresh_interval: Duration,
    state_tx: watch::Sender<PlaybackState>,
    info_tx: watch::Sender<StreamInfo>,
    refresher: Option<MetadataRefresher>,
    selected_track: i32,
    shutdown: bool,
}

impl WorkerState {
    /// React to an engine lifecycle notification
    ///
    /// This is the whole state machine: every arm cancels or starts the
    /// refresh task so that it runs exactly while the state is Playing.
    fn handle_engine_event(&mut self, event: EngineEvent) {
        debug!(event = ?event, "Engine event");
        match event {
            EngineEvent::Buffering => {
                self.stop_refresh();
                self.clear_info();
                self.set_state(PlaybackState::Buffering);
            }
            EngineEvent::Ready {
                play_when_ready: true,
            } => {
                self.set_state(PlaybackState::Playing(EngineHandle::new(
                    self.engine.clone(),
                )));
                self.start_refresh();
            }
            EngineEvent::Ready {
                play_when_ready: false,
            }
            | EngineEvent::Ended
            | EngineEvent::Idle => {
                self.stop_refresh();
                self.clear_info();
                self.set_state(PlaybackState::Stopped);
            }
            EngineEvent::Error { message } => {
                warn!(message, "Engine reported a playback error");
                self.enter_error();
            }
        }
    }

    async fn handle_command(&mut self, cmd: PlaybackCommand) -> Result<()> {
        match cmd {
            PlaybackCommand::Play { url } => {
                info!(url, "Playback requested");
                self.engine.load(&url).await?;
            }
            PlaybackCommand::Stop => {
                info!("Stop requested");
                self.engine.stop().await?;
            }
            PlaybackCommand::SelectTrack { id } => {
                let selection = if id == ADAPTIVE_TRACK_ID {
                    TrackSelection::Adaptive
                } else {
                    match usize::try_from(id) {
                        Ok(index) => TrackSelection::Fixed(index),
                        Err(_) => {
                            warn!(id, "Ignoring invalid track id");
                            return Ok(());
                        }
                    }
                };
                info!(id, "Track selection");
                self.engine.select_track(selection).await?;
                self.selected_track = id;
            }
            PlaybackCommand::TracksMetadata { reply } => {
                let formats = self.engine.audio_tracks().await;
                let snapshot = TracksMetadata::from_formats(&formats, self.selected_track);
                // Caller may have given up waiting, that is fine
                let _ = reply.send(snapshot);
            }
            PlaybackCommand::Shutdown => {
                self.shutdown = true;
            }
        }
        Ok(())
    }

    fn enter_error(&mut self) {
        self.stop_refresh();
        self.clear_info();
        self.set_state(PlaybackState::Error);
    }

    /// Start the refresh task, replacing any previous one
    ///
    /// Cancel-before-spawn keeps the invariant of at most one refresher per
    /// Playing session even if the engine reports Ready twice.
    fn start_refresh(&mut self) {
        self.stop_refresh();
        self.refresher = Some(MetadataRefresher::spawn(
            self.metadata.clone(),
            self.refresh_interval,
            self.info_tx.clone(),
        ));
    }

    fn stop_refresh(&mut self) {
        if let Some(refresher) = self.refresher.take() {
            refresher.cancel();
        }
    }

    fn clear_info(&self) {
        self.info_tx.send_replace(StreamInfo::empty());
    }

    fn set_state(&self, next: PlaybackState) {
        debug!(state = next.label(), "Playback state");
        self.state_tx.send_replace(next);
    }
}
