//! Periodic now-playing refresh task
//!
//! While the stream is playing, a background task polls the station's
//! now-playing endpoint at a fixed interval and publishes parsed values to a
//! watch channel. The task exists only during a Playing session; the playback
//! worker cancels it on every transition away from Playing.

use radiometa::{MetadataClient, StreamInfo};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Default interval between now-playing fetches
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// Handle to the spawned refresh task
///
/// Dropping the handle aborts the task, so the worker can never leak a
/// refresher across play/stop cycles.
pub struct MetadataRefresher {
    join_handle: JoinHandle<()>,
}

impl MetadataRefresher {
    /// Spawn the refresh loop
    ///
    /// The first fetch happens immediately, then every `interval`. Fetch
    /// failures are logged and the previously published value stays in
    /// place; there is no backoff beyond the fixed interval.
    pub fn spawn(
        client: MetadataClient,
        interval: Duration,
        info_tx: watch::Sender<StreamInfo>,
    ) -> Self {
        let join_handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                debug!(url = %client.info_url(), "Fetching now-playing info");
                match client.fetch_stream_info().await {
                    Ok(info) => {
                        info_tx.send_replace(info);
                    }
                    Err(err) => {
                        warn!(error = %err, "Unable to fetch now-playing info");
                    }
                }
            }
        });

        Self { join_handle }
    }

    /// Abort the task
    ///
    /// Cancellation is synchronous from the caller's point of view: the next
    /// scheduled tick never runs and an in-flight request is abandoned, not
    /// awaited.
    pub fn cancel(&self) {
        self.join_handle.abort();
    }

    /// True once the task has fully stopped
    pub fn is_finished(&self) -> bool {
        self.join_handle.is_finished()
    }
}

impl Drop for MetadataRefresher {
    fn drop(&mut self) {
        self.join_handle.abort();
    }
}
