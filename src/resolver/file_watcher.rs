use std::path::{Path, PathBuf};

use notify::{Event, EventKind, RecommendedWatcher, Watcher, recommended_watcher};
use tokio::sync::mpsc;

/// Represents a file system event for the watched file.
#[derive(Debug, Clone)]
pub struct FileEvent {
    /// The path of the file that changed
    pub path: PathBuf,
    /// The type of change that occurred
    pub kind: FileEventKind,
}

/// The type of file system change that occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum FileEventKind {
    /// File was modified
    Modified,
    /// File was created
    Created,
    /// File was removed
    Removed,
}

/// Cross-platform file system watcher for the local configuration file.
///
/// Provides an async interface over the notify crate, converting its
/// callback-style events into a Tokio channel.
pub struct FileWatcher {
    watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Creates a new file watcher and returns the watcher and event receiver.
    ///
    /// Uses an unbounded channel since file events are infrequent but bursty.
    ///
    /// # Errors
    /// Returns error if the underlying file system watcher cannot be initialized.
    pub fn new() -> Result<(Self, mpsc::UnboundedReceiver<FileEvent>), notify::Error> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let watcher = recommended_watcher(move |res: notify::Result<Event>| {
            let Ok(event) = res else {
                return;
            };

            let kind = match event.kind {
                EventKind::Create(_) => FileEventKind::Created,
                EventKind::Modify(_) => FileEventKind::Modified,
                EventKind::Remove(_) => FileEventKind::Removed,
                _ => return,
            };

            for path in event.paths {
                let _ = event_tx.send(FileEvent {
                    path,
                    kind: kind.clone(),
                });
            }
        })?;

        Ok((Self { watcher }, event_rx))
    }

    /// Begins monitoring a single file for changes.
    ///
    /// The path is canonicalized to handle symlinks and relative paths.
    ///
    /// # Errors
    /// Returns error if the path cannot be canonicalized or the watcher
    /// fails to monitor it.
    pub fn watch(&mut self, path: impl AsRef<Path>) -> Result<(), notify::Error> {
        let canonical = path.as_ref().canonicalize()?;

        self.watcher
            .watch(&canonical, notify::RecursiveMode::NonRecursive)
    }
}
