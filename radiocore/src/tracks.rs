//! Audio track metadata for the quality selector

use crate::engine::AudioTrackFormat;
use std::collections::BTreeMap;

/// Identifier of the adaptive pseudo-track
///
/// Selecting it clears any fixed-rendition override and lets the engine
/// choose bitrates on its own.
pub const ADAPTIVE_TRACK_ID: i32 = -1;

/// Snapshot of the selectable audio tracks of the live stream
///
/// Maps track identifiers to bitrates in kbps, always including the adaptive
/// pseudo-track with bitrate 0. Rebuilt on demand from the engine's current
/// renditions; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracksMetadata {
    /// Track id → bitrate in kbps; id [`ADAPTIVE_TRACK_ID`] maps to 0
    pub tracks: BTreeMap<i32, u32>,
    /// Currently selected track id
    pub selected: i32,
}

impl TracksMetadata {
    /// Snapshot with only the adaptive pseudo-track
    pub fn adaptive() -> Self {
        Self::from_formats(&[], ADAPTIVE_TRACK_ID)
    }

    /// Build a snapshot from the engine's current renditions
    pub fn from_formats(formats: &[AudioTrackFormat], selected: i32) -> Self {
        let mut tracks = BTreeMap::new();
        tracks.insert(ADAPTIVE_TRACK_ID, 0);
        for (index, format) in formats.iter().enumerate() {
            tracks.insert(index as i32, format.bitrate_kbps());
        }
        Self { tracks, selected }
    }

    /// Number of concrete renditions, the adaptive entry excluded
    pub fn rendition_count(&self) -> usize {
        self.tracks.len() - 1
    }

    /// True when the adaptive pseudo-track is selected
    pub fn is_adaptive(&self) -> bool {
        self.selected == ADAPTIVE_TRACK_ID
    }
}

impl Default for TracksMetadata {
    fn default() -> Self {
        Self::adaptive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adaptive_snapshot() {
        let meta = TracksMetadata::adaptive();
        assert_eq!(meta.tracks.len(), 1);
        assert_eq!(meta.tracks[&ADAPTIVE_TRACK_ID], 0);
        assert!(meta.is_adaptive());
        assert_eq!(meta.rendition_count(), 0);
    }

    #[test]
    fn from_engine_formats() {
        let formats = [
            AudioTrackFormat { bitrate: 64_000 },
            AudioTrackFormat { bitrate: 128_000 },
            AudioTrackFormat { bitrate: 256_000 },
        ];
        let meta = TracksMetadata::from_formats(&formats, 1);

        assert_eq!(meta.rendition_count(), 3);
        assert_eq!(meta.tracks[&0], 64);
        assert_eq!(meta.tracks[&1], 128);
        assert_eq!(meta.tracks[&2], 256);
        assert_eq!(meta.tracks[&ADAPTIVE_TRACK_ID], 0);
        assert_eq!(meta.selected, 1);
        assert!(!meta.is_adaptive());
    }
}
