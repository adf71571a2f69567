use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::core::{Result, StrataError};

use super::{ConfigResolver, file_watcher::FileWatcher};

/// Handle to an active file watch.
///
/// The watch task runs until the handle is cancelled or dropped, so
/// callers control the subscription lifecycle explicitly.
pub struct WatchHandle {
    task: JoinHandle<()>,
}

impl WatchHandle {
    /// Stops the watch task.
    pub fn cancel(self) {
        self.task.abort();
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl ConfigResolver {
    /// Starts monitoring the local configuration file for changes.
    ///
    /// Events are debounced, then the file layer is reloaded, one
    /// notification line is logged per change event, and per-key change
    /// events are broadcast to subscribers. Reload failures are logged and
    /// leave the previous file layer in place.
    ///
    /// # Errors
    /// Returns error if the file watcher cannot be initialized or the
    /// configuration file cannot be watched.
    pub fn watch_file(&self) -> Result<WatchHandle> {
        let (mut watcher, mut event_rx) = FileWatcher::new().map_err(StrataError::watch)?;
        watcher.watch(self.file_path()).map_err(StrataError::watch)?;

        let resolver = self.clone();

        let task = tokio::spawn(async move {
            // Moved in so the notify watcher lives as long as the task.
            let _watcher = watcher;

            let debounce = Duration::from_millis(500);
            let sleep = tokio::time::sleep(debounce);
            tokio::pin!(sleep);

            let mut pending = false;

            loop {
                tokio::select! {
                    Some(event) = event_rx.recv() => {
                        debug!(
                            path = %event.path.display(),
                            kind = ?event.kind,
                            "file event received, debouncing reload"
                        );
                        pending = true;
                        sleep.as_mut().reset(tokio::time::Instant::now() + debounce);
                    }

                    _ = &mut sleep, if pending => {
                        pending = false;

                        match resolver.reload_file() {
                            Ok(changes) => {
                                info!(
                                    "Config file changed: {} ({} keys updated)",
                                    resolver.file_path().display(),
                                    changes.len()
                                );
                            }
                            Err(e) => warn!("failed to reload config file: {e}"),
                        }
                    }

                    else => break,
                }
            }
        });

        Ok(WatchHandle { task })
    }
}
