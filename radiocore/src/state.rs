//! Playback state value

use crate::engine::EngineHandle;

/// Current state of the playback session
///
/// Exactly one value is active at any time. Transitions happen only inside
/// the playback worker, driven by [`crate::EngineEvent`]s; callers observe
/// the state through a watch channel and never set it directly.
#[derive(Debug, Clone, Default)]
pub enum PlaybackState {
    /// The engine is buffering the stream
    Buffering,
    /// The stream is playing; the handle reaches the active engine
    Playing(EngineHandle),
    /// Nothing is playing
    #[default]
    Stopped,
    /// Playback failed
    Error,
}

impl PlaybackState {
    /// True while the stream is audible
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing(_))
    }

    /// True in the terminal error state
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Buffering => "buffering",
            Self::Playing(_) => "playing",
            Self::Stopped => "stopped",
            Self::Error => "error",
        }
    }
}
