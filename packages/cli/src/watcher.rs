use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatcherError {
    #[error("Failed to create watcher: {0}")]
    CreateError(#[from] notify::Error),

    #[error("Cannot watch {0}: not a file")]
    NotAFile(PathBuf),
}

pub type WatcherResult<T> = Result<T, WatcherError>;

/// Watches one document for writes.
///
/// Editors often save by writing a temp file and renaming it over the
/// original, so the parent directory is watched and events are filtered down
/// to the document's path.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<Event>>,
    path: PathBuf,
}

impl FileWatcher {
    pub fn new(path: &Path) -> WatcherResult<Self> {
        if !path.is_file() {
            return Err(WatcherError::NotAFile(path.to_path_buf()));
        }

        let path = path
            .canonicalize()
            .map_err(|e| WatcherError::CreateError(notify::Error::io(e)))?;
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| WatcherError::NotAFile(path.clone()))?;

        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Block until the document is written. `None` once the watcher stops.
    pub fn next_change(&self) -> Option<Event> {
        loop {
            match self.receiver.recv() {
                Ok(Ok(event)) if self.is_change(&event) => return Some(event),
                Ok(Ok(_)) => continue,
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "Watch error");
                    continue;
                }
                Err(_) => return None,
            }
        }
    }

    fn is_change(&self, event: &Event) -> bool {
        matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
            && event.paths.iter().any(|p| p == &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_file_watcher() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("drawing.svg");
        fs::write(&file, "<svg/>").unwrap();

        let watcher = FileWatcher::new(&file).unwrap();

        let target = file.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            fs::write(target, "<svg><rect/></svg>").unwrap();
        });

        // Wait for event
        let event = watcher.next_change();
        assert!(event.is_some());
    }

    #[test]
    fn test_rejects_directories() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            FileWatcher::new(temp_dir.path()),
            Err(WatcherError::NotAFile(_))
        ));
    }
}
