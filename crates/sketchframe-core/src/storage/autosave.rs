//! Debounced project autosave.
//!
//! Every change restarts the debounce window; the snapshot is written once
//! the window passes without further changes. Writing a state identical to
//! the last saved one is skipped.

use super::{ProjectSnapshot, Storage, StorageError, StorageResult};
use crate::scheduler::{Duration, Instant};
use std::sync::Arc;

/// Default debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// Id used when the manager has not been pointed at a project.
pub const DEFAULT_PROJECT_ID: &str = "untitled";

/// Key under which the most recently saved project is mirrored.
pub const LAST_PROJECT_KEY: &str = "__last_project__";

pub struct AutoSaveManager<S: Storage> {
    storage: Arc<S>,
    debounce: Duration,
    project_id: String,
    pending: Option<ProjectSnapshot>,
    deadline: Option<Instant>,
    /// Serialized form of the last write, for skipping identical saves.
    last_saved: Option<String>,
}

impl<S: Storage> AutoSaveManager<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            project_id: DEFAULT_PROJECT_ID.to_string(),
            pending: None,
            deadline: None,
            last_saved: None,
        }
    }

    pub fn set_debounce(&mut self, debounce: Duration) {
        self.debounce = debounce;
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn set_project_id(&mut self, id: impl Into<String>) {
        self.project_id = id.into();
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Whether a change is waiting to be written.
    pub fn is_dirty(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending change becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Record the latest state and restart the debounce window.
    pub fn notify_changed(&mut self, snapshot: ProjectSnapshot, now: Instant) {
        self.pending = Some(snapshot);
        self.deadline = Some(now + self.debounce);
    }

    pub fn should_flush(&self, now: Instant) -> bool {
        self.pending.is_some() && self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Write the pending state if the debounce window has elapsed.
    /// Returns true if a write happened.
    pub async fn maybe_flush(&mut self, now: Instant) -> StorageResult<bool> {
        if !self.should_flush(now) {
            return Ok(false);
        }
        self.flush().await
    }

    /// Write the pending state now, ignoring the debounce window.
    /// Returns true if a write happened.
    pub async fn flush(&mut self) -> StorageResult<bool> {
        let deadline = self.deadline.take();
        let Some(snapshot) = self.pending.take() else {
            return Ok(false);
        };
        let json = snapshot
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        if self.last_saved.as_deref() == Some(json.as_str()) {
            log::debug!("autosave skipped, {} unchanged", self.project_id);
            return Ok(false);
        }

        if let Err(e) = self.save_both(&snapshot).await {
            // Keep the change due so the next flush retries it.
            self.pending = Some(snapshot);
            self.deadline = deadline;
            return Err(e);
        }
        log::debug!("autosaved {} ({} bytes)", self.project_id, json.len());
        self.last_saved = Some(json);
        Ok(true)
    }

    async fn save_both(&self, snapshot: &ProjectSnapshot) -> StorageResult<()> {
        self.storage.save(&self.project_id, snapshot).await?;
        self.storage.save(LAST_PROJECT_KEY, snapshot).await
    }

    /// Load a project and make it the autosave target.
    pub async fn load(&mut self, id: &str) -> StorageResult<ProjectSnapshot> {
        let snapshot = self.storage.load(id).await?;
        self.adopt(id, &snapshot);
        log::info!("loaded project {id}");
        Ok(snapshot)
    }

    /// Load the most recently saved project, if there is one.
    pub async fn load_last(&mut self) -> Option<ProjectSnapshot> {
        match self.storage.load(LAST_PROJECT_KEY).await {
            Ok(snapshot) => {
                let id = self.project_id.clone();
                self.adopt(&id, &snapshot);
                Some(snapshot)
            }
            Err(StorageError::NotFound(_)) => None,
            Err(e) => {
                log::warn!("could not restore last project: {e}");
                None
            }
        }
    }

    fn adopt(&mut self, id: &str, snapshot: &ProjectSnapshot) {
        self.project_id = id.to_string();
        self.pending = None;
        self.deadline = None;
        self.last_saved = snapshot.to_json().ok();
    }

    pub async fn delete(&self, id: &str) -> StorageResult<()> {
        self.storage.delete(id).await
    }

    /// Saved project ids, without the last-project mirror.
    pub async fn list_projects(&self) -> StorageResult<Vec<String>> {
        let mut ids = self.storage.list().await?;
        ids.retain(|id| id != LAST_PROJECT_KEY);
        Ok(ids)
    }

    pub async fn exists(&self, id: &str) -> StorageResult<bool> {
        self.storage.exists(id).await
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

/// Storage used when the host does not pick one.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = super::FileStorage;

#[cfg(target_arch = "wasm32")]
pub type PlatformStorage = super::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage() -> StorageResult<Arc<PlatformStorage>> {
    Ok(Arc::new(super::FileStorage::default_location()?))
}

#[cfg(target_arch = "wasm32")]
pub fn create_default_storage() -> StorageResult<Arc<PlatformStorage>> {
    Ok(Arc::new(super::MemoryStorage::new()))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::storage::{BoxFuture, MemoryStorage, block_on};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn snapshot(frame_counter: u32) -> ProjectSnapshot {
        let mut s = ProjectSnapshot::default();
        s.shapes_data.frame_counter = frame_counter;
        s
    }

    #[test]
    fn test_debounce_restarts_on_change() {
        let storage = Arc::new(MemoryStorage::new());
        let mut manager = AutoSaveManager::new(storage.clone());
        let t0 = Instant::now();

        manager.notify_changed(snapshot(1), t0);
        manager.notify_changed(snapshot(2), t0 + Duration::from_millis(600));
        assert!(!block_on(manager.maybe_flush(t0 + Duration::from_millis(1200))).unwrap());
        assert!(manager.is_dirty());

        assert!(block_on(manager.maybe_flush(t0 + Duration::from_millis(1600))).unwrap());
        assert!(!manager.is_dirty());
        let saved = block_on(storage.load(DEFAULT_PROJECT_ID)).unwrap();
        assert_eq!(saved.shapes_data.frame_counter, 2);
    }

    #[test]
    fn test_identical_state_is_not_rewritten() {
        let storage = Arc::new(MemoryStorage::new());
        let mut manager = AutoSaveManager::new(storage);
        manager.notify_changed(snapshot(3), Instant::now());
        assert!(block_on(manager.flush()).unwrap());

        manager.notify_changed(snapshot(3), Instant::now());
        assert!(!block_on(manager.flush()).unwrap());
        assert!(!manager.is_dirty());

        manager.notify_changed(snapshot(4), Instant::now());
        assert!(block_on(manager.flush()).unwrap());
    }

    #[test]
    fn test_flush_without_changes() {
        let mut manager = AutoSaveManager::new(Arc::new(MemoryStorage::new()));
        assert!(!block_on(manager.flush()).unwrap());
        assert!(!manager.should_flush(Instant::now()));
    }

    #[test]
    fn test_load_last_and_list() {
        let storage = Arc::new(MemoryStorage::new());
        let mut manager = AutoSaveManager::new(storage);
        manager.set_project_id("board");
        manager.notify_changed(snapshot(5), Instant::now());
        block_on(manager.flush()).unwrap();

        let mut restored = AutoSaveManager::new(manager.storage().clone());
        let loaded = block_on(restored.load_last()).unwrap();
        assert_eq!(loaded.shapes_data.frame_counter, 5);

        // Loaded state counts as saved.
        restored.notify_changed(loaded, Instant::now());
        assert!(!block_on(restored.flush()).unwrap());

        assert_eq!(block_on(manager.list_projects()).unwrap(), vec!["board"]);
    }

    #[test]
    fn test_load_sets_target() {
        let storage = Arc::new(MemoryStorage::new());
        block_on(storage.save("other", &snapshot(1))).unwrap();
        let mut manager = AutoSaveManager::new(storage);
        block_on(manager.load("other")).unwrap();
        assert_eq!(manager.project_id(), "other");
        assert!(block_on(manager.load("missing")).is_err());
    }

    /// Memory storage whose first `failures` saves report a full disk.
    struct FlakyStorage {
        inner: MemoryStorage,
        failures: AtomicUsize,
        attempts: AtomicUsize,
    }

    impl FlakyStorage {
        fn new(failures: usize) -> Self {
            Self {
                inner: MemoryStorage::new(),
                failures: AtomicUsize::new(failures),
                attempts: AtomicUsize::new(0),
            }
        }
    }

    impl Storage for FlakyStorage {
        fn save(&self, id: &str, project: &ProjectSnapshot) -> BoxFuture<'_, StorageResult<()>> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            let failing = self
                .failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if failing {
                return Box::pin(async { Err(StorageError::Io("disk full".into())) });
            }
            self.inner.save(id, project)
        }

        fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<ProjectSnapshot>> {
            self.inner.load(id)
        }

        fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
            self.inner.delete(id)
        }

        fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
            self.inner.list()
        }

        fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
            self.inner.exists(id)
        }
    }

    #[test]
    fn test_failed_write_stays_pending() {
        let storage = Arc::new(FlakyStorage::new(usize::MAX));
        let mut manager = AutoSaveManager::new(storage.clone());
        manager.notify_changed(snapshot(1), Instant::now());
        assert!(block_on(manager.flush()).is_err());
        assert!(manager.is_dirty());
        assert!(block_on(manager.flush()).is_err());
        assert_eq!(storage.attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failed_autosave_is_retried_when_due() {
        let storage = Arc::new(FlakyStorage::new(1));
        let mut manager = AutoSaveManager::new(storage.clone());
        let t0 = Instant::now();
        manager.notify_changed(snapshot(7), t0);

        assert!(block_on(manager.maybe_flush(t0 + Duration::from_secs(2))).is_err());
        assert!(manager.is_dirty());
        assert!(manager.should_flush(t0 + Duration::from_secs(2)));

        assert!(block_on(manager.maybe_flush(t0 + Duration::from_secs(60))).unwrap());
        assert!(!manager.is_dirty());
        assert_eq!(manager.deadline(), None);
        // One failed write, then the project and its last-project mirror.
        assert_eq!(storage.attempts.load(Ordering::SeqCst), 3);
        let saved = block_on(storage.load(DEFAULT_PROJECT_ID)).unwrap();
        assert_eq!(saved.shapes_data.frame_counter, 7);
    }
}
