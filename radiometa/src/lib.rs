//! Now-playing metadata support for Radiowave
//!
//! This crate provides the two leaf pieces of the Radiowave now-playing
//! pipeline:
//!
//! - **Parser**: [`StreamInfo`] and its `"<artist> - <title>"` text parser
//! - **HTTP client**: [`MetadataClient`] fetching the plain-text now-playing
//!   endpoint exposed by the station's streaming infrastructure
//!
//! # Wire format
//!
//! The endpoint returns a single UTF-8 line such as `Adele - Hello`. The
//! delimiter is the first occurrence of `" - "`; the title may itself contain
//! the delimiter (`Adele - Hello - 25` has title `Hello - 25`). Input without
//! a delimiter degrades to an artist-only value rather than failing.
//!
//! # Example
//!
//! ```no_run
//! use radiometa::MetadataClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MetadataClient::new("https://radio.example.com/now_playing.txt")?;
//!     let info = client.fetch_stream_info().await?;
//!     println!("Now playing: {} - {}", info.artist, info.title);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod models;

// Re-exports
pub use client::{ClientBuilder, MetadataClient};
pub use error::{Error, Result};
pub use models::StreamInfo;
