//! Rotation status file watcher for hot reload.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::RotationsConfig;
use crate::rotation::{SharedStatusTable, StatusTable};

/// A watcher that monitors a rotation status document for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<RotationsConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for validated documents.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RotationsConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    ///
    /// The parent directory is watched so that a file replaced by rename
    /// keeps being followed. The returned watcher must be kept alive for as
    /// long as updates are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();
        let dir = watch_dir(&self.path);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if is_change_to(&event, &path) {
                        reload(&path, &tx);
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, dir = ?dir, "Rotation status watcher started");
        Ok(watcher)
    }
}

/// Directory containing `path`; `.` for a bare file name.
fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// True for a modify/create event naming the same file as `path`.
fn is_change_to(event: &Event, path: &Path) -> bool {
    if !(event.kind.is_modify() || event.kind.is_create()) {
        return false;
    }
    match path.file_name() {
        Some(name) => event.paths.iter().any(|p| p.file_name() == Some(name)),
        None => false,
    }
}

/// Load the document at `path` and forward it; a bad document is logged and dropped.
fn reload(path: &Path, tx: &mpsc::UnboundedSender<RotationsConfig>) -> bool {
    tracing::info!(path = ?path, "Rotation status file change detected, reloading");
    match load_config(path) {
        Ok(config) => tx.send(config).is_ok(),
        Err(e) => {
            tracing::error!(
                error = %e,
                "Failed to reload rotation statuses. Keeping current table."
            );
            false
        }
    }
}

/// Apply reloaded documents to `shared` until `shutdown` completes or the
/// update channel closes. Returns the number of documents applied.
pub async fn follow_updates(
    shared: &SharedStatusTable,
    updates: &mut mpsc::UnboundedReceiver<RotationsConfig>,
    shutdown: impl Future<Output = ()>,
) -> usize {
    tokio::pin!(shutdown);
    let mut applied = 0;

    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(config) = update else { break };
                let changes = shared.replace(StatusTable::from_config(&config));
                if changes.is_empty() {
                    tracing::debug!("Rotation status document reloaded without changes");
                }
                applied += 1;
            }
            _ = &mut shutdown => break,
        }
    }

    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RotationEntry;
    use crate::rotation::RotationStatus;
    use notify::event::{CreateKind, DataChange, ModifyKind, RemoveKind, RenameMode};
    use notify::EventKind;
    use std::fs;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "rotation-status-{}-{}.toml",
            name,
            std::process::id()
        ));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_reload_forwards_valid_document() {
        let path = temp_file(
            "watcher-valid",
            "[[rotations]]\nname = \"r1\"\nstatus = \"OUT\"\n",
        );
        let (watcher, mut rx) = ConfigWatcher::new(&path);

        assert!(reload(&path, &watcher.update_tx));
        let config = rx.try_recv().unwrap();
        assert_eq!(config.rotations[0].status, RotationStatus::Out);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_reload_drops_invalid_document() {
        let path = temp_file(
            "watcher-invalid",
            "[[rotations]]\nname = \"r1\"\nstatus = \"DOWN\"\n",
        );
        let (watcher, mut rx) = ConfigWatcher::new(&path);

        assert!(!reload(&path, &watcher.update_tx));
        assert!(rx.try_recv().is_err());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_watch_dir() {
        assert_eq!(
            watch_dir(Path::new("/etc/rotations/status.toml")),
            PathBuf::from("/etc/rotations")
        );
        assert_eq!(watch_dir(Path::new("status.toml")), PathBuf::from("."));
    }

    #[test]
    fn test_change_filter_follows_rename_replace() {
        let path = Path::new("/etc/rotations/status.toml");

        let written = Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content)))
            .add_path(PathBuf::from("/etc/rotations/status.toml"));
        assert!(is_change_to(&written, path));

        // editor writes a temp file, then renames it over the document
        let renamed = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Both)))
            .add_path(PathBuf::from("/etc/rotations/.status.toml.swp"))
            .add_path(PathBuf::from("/etc/rotations/status.toml"));
        assert!(is_change_to(&renamed, path));

        let created = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/etc/rotations/status.toml"));
        assert!(is_change_to(&created, path));
    }

    #[test]
    fn test_change_filter_ignores_other_events() {
        let path = Path::new("/etc/rotations/status.toml");

        let sibling = Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content)))
            .add_path(PathBuf::from("/etc/rotations/other.toml"));
        assert!(!is_change_to(&sibling, path));

        let removed = Event::new(EventKind::Remove(RemoveKind::File))
            .add_path(PathBuf::from("/etc/rotations/status.toml"));
        assert!(!is_change_to(&removed, path));
    }

    fn document(status: RotationStatus) -> RotationsConfig {
        RotationsConfig {
            rotations: vec![RotationEntry::new("r1", status)],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_follow_updates_until_shutdown() {
        let shared = SharedStatusTable::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();

        tx.send(document(RotationStatus::In)).unwrap();
        tx.send(document(RotationStatus::Out)).unwrap();

        let task = async {
            follow_updates(&shared, &mut rx, async {
                let _ = stop_rx.await;
            })
            .await
        };
        let stop = async {
            // let both queued documents be applied first
            tokio::task::yield_now().await;
            stop_tx.send(()).unwrap();
        };
        let (applied, ()) = tokio::join!(task, stop);

        assert_eq!(applied, 2);
        assert_eq!(shared.load().status_of("r1"), Some(RotationStatus::Out));
    }

    #[tokio::test]
    async fn test_follow_updates_stops_when_channel_closes() {
        let shared = SharedStatusTable::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        tx.send(document(RotationStatus::Unknown)).unwrap();
        drop(tx);

        let applied = follow_updates(&shared, &mut rx, std::future::pending()).await;

        assert_eq!(applied, 1);
        assert_eq!(shared.load().status_of("r1"), Some(RotationStatus::Unknown));
    }
}
