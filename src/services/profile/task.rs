use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::models::theme_profile::ThemeProfile;
use crate::services::database::Database;

use super::store::ThemeProfileStore;

/// Outcome delivered by a background write.
pub type WriteResult = Result<i64, String>;

/// A store write running on a worker thread.
///
/// The worker opens its own connection to the database file, so the caller's
/// connection stays usable meanwhile. The outcome arrives once on a channel;
/// poll it from a UI loop with [`try_result`](Self::try_result) or block with
/// [`wait`](Self::wait). There is no cancellation.
pub struct ProfileWriteTask {
    rx: Receiver<WriteResult>,
    finished: Option<WriteResult>,
}

impl ProfileWriteTask {
    /// Inserts `profile`; resolves to the new row id.
    pub fn spawn_insert(db_path: &str, profile: ThemeProfile) -> Self {
        Self::spawn(db_path, move |store| {
            store.insert(&profile).map_err(|err| err.to_string())
        })
    }

    /// Deletes one profile; resolves to the deleted id.
    pub fn spawn_delete(db_path: &str, id: i64) -> Self {
        Self::spawn(db_path, move |store| {
            store.delete(id).map(|_| id).map_err(|err| err.to_string())
        })
    }

    /// Deletes every profile; resolves to the number of rows removed.
    pub fn spawn_delete_all(db_path: &str) -> Self {
        Self::spawn(db_path, |store| {
            store
                .delete_all()
                .map(|removed| removed as i64)
                .map_err(|err| err.to_string())
        })
    }

    fn spawn<F>(db_path: &str, write: F) -> Self
    where
        F: FnOnce(&ThemeProfileStore) -> WriteResult + Send + 'static,
    {
        let db_path = db_path.to_string();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = (|| -> WriteResult {
                let db = Database::open(&db_path).map_err(|err| format!("{:#}", err))?;
                let store = ThemeProfileStore::new(db.connection());
                write(&store)
            })();

            if let Err(err) = &result {
                log::warn!("Background theme profile write failed: {}", err);
            }
            let _ = tx.send(result);
        });

        Self { rx, finished: None }
    }

    /// Returns the outcome once the worker is done, `None` while it runs.
    pub fn try_result(&mut self) -> Option<&WriteResult> {
        if self.finished.is_none() {
            match self.rx.try_recv() {
                Ok(result) => self.finished = Some(result),
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    self.finished = Some(Err("Background write stopped unexpectedly".to_string()));
                }
            }
        }
        self.finished.as_ref()
    }

    /// Blocks until the worker reports.
    pub fn wait(mut self) -> WriteResult {
        if let Some(result) = self.finished.take() {
            return result;
        }
        self.rx
            .recv()
            .unwrap_or_else(|_| Err("Background write stopped unexpectedly".to_string()))
    }
}
