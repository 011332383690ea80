//! Now-playing value types

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Delimiter between artist and title in the now-playing text
pub const DELIMITER: &str = " - ";

/// Immutable now-playing record parsed from the station's text endpoint
///
/// # Example
///
/// ```
/// use radiometa::StreamInfo;
///
/// let info = StreamInfo::parse("Adele - Hello");
/// assert_eq!(info.artist, "Adele");
/// assert_eq!(info.title, "Hello");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamInfo {
    /// Performer, the text before the first `" - "`
    pub artist: String,
    /// Track title, the text after the first `" - "`
    pub title: String,
}

impl StreamInfo {
    /// Create a record from explicit fields
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
        }
    }

    /// The empty record, shown whenever nothing is playing
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when both fields are empty
    pub fn is_empty(&self) -> bool {
        self.artist.is_empty() && self.title.is_empty()
    }

    /// Parse a raw `"<artist> - <title>"` line
    ///
    /// Splits at the first occurrence of [`DELIMITER`] only, so titles may
    /// contain the delimiter themselves. Input without a delimiter degrades
    /// to an artist-only record and logs a warning; this never fails.
    pub fn parse(raw: &str) -> Self {
        match raw.find(DELIMITER) {
            Some(idx) => Self {
                artist: raw[..idx].to_string(),
                title: raw[idx + DELIMITER.len()..].to_string(),
            },
            None => {
                if !raw.is_empty() {
                    warn!(raw, "Now-playing text has no delimiter, keeping it as artist");
                }
                Self {
                    artist: raw.to_string(),
                    title: String::new(),
                }
            }
        }
    }
}

impl fmt::Display for StreamInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.title.is_empty() {
            write!(f, "{}", self.artist)
        } else {
            write!(f, "{}{}{}", self.artist, DELIMITER, self.title)
        }
    }
}
