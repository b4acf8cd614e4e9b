// Preference service
// Persisted key/value options with scoped change subscriptions

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, Weak};

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::preferences::PreferenceKey;

#[derive(Default)]
struct Registry {
    next_id: u64,
    senders: Vec<(u64, Sender<PreferenceKey>)>,
}

/// Fan-out of preference change notifications.
///
/// Subscribers receive changed keys on their own channel and drain them when
/// convenient, so a change never re-enters the code that made it.
#[derive(Clone, Default)]
pub struct PreferenceListeners {
    inner: Arc<Mutex<Registry>>,
}

impl std::fmt::Debug for PreferenceListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceListeners")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl PreferenceListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber. It stays registered until the returned
    /// subscription is dropped.
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        let id = match self.inner.lock() {
            Ok(mut registry) => {
                registry.next_id += 1;
                let id = registry.next_id;
                registry.senders.push((id, tx));
                id
            }
            Err(_) => {
                log::warn!("Preference listener registry poisoned; subscription is inert");
                0
            }
        };

        Subscription {
            id,
            rx,
            registry: Arc::downgrade(&self.inner),
        }
    }

    pub fn notify(&self, key: PreferenceKey) {
        if let Ok(mut registry) = self.inner.lock() {
            registry.senders.retain(|(_, tx)| tx.send(key).is_ok());
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .map(|registry| registry.senders.len())
            .unwrap_or(0)
    }
}

/// A live registration; dropping it unregisters.
pub struct Subscription {
    id: u64,
    rx: Receiver<PreferenceKey>,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Takes every change received so far.
    pub fn drain(&self) -> Vec<PreferenceKey> {
        self.rx.try_iter().collect()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut registry) = registry.lock() {
                registry.senders.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

pub struct PreferenceService<'a> {
    conn: &'a Connection,
    listeners: Option<&'a PreferenceListeners>,
}

impl<'a> PreferenceService<'a> {
    /// A service whose writes notify nobody.
    pub fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            listeners: None,
        }
    }

    pub fn with_listeners(conn: &'a Connection, listeners: &'a PreferenceListeners) -> Self {
        Self {
            conn,
            listeners: Some(listeners),
        }
    }

    pub fn get(&self, key: PreferenceKey) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key.as_str()],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read preference {}", key))
    }

    pub fn get_or(&self, key: PreferenceKey, default: &str) -> Result<String> {
        Ok(self.get(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// Stores a value and notifies subscribers when it changed.
    pub fn set(&self, key: PreferenceKey, value: &str) -> Result<()> {
        let previous = self.get(key)?;
        self.set_quiet(key, value)?;
        if previous.as_deref() != Some(value) {
            self.notify(key);
        }
        Ok(())
    }

    /// Stores a value without notifying subscribers.
    pub fn set_quiet(&self, key: PreferenceKey, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO preferences (key, value, updated_at)
                 VALUES (?1, ?2, CURRENT_TIMESTAMP)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                     updated_at = CURRENT_TIMESTAMP",
                params![key.as_str(), value],
            )
            .with_context(|| format!("Failed to write preference {}", key))?;
        Ok(())
    }

    /// Removes a value; subscribers hear about it if something was removed.
    pub fn remove(&self, key: PreferenceKey) -> Result<bool> {
        let removed = self
            .conn
            .execute(
                "DELETE FROM preferences WHERE key = ?1",
                params![key.as_str()],
            )
            .with_context(|| format!("Failed to remove preference {}", key))?;

        if removed > 0 {
            self.notify(key);
        }
        Ok(removed > 0)
    }

    /// Removes several keys in one transaction, then notifies for each
    /// removed key.
    pub fn remove_all(&self, keys: &[PreferenceKey]) -> Result<usize> {
        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to start preference transaction")?;

        let mut removed_keys = Vec::new();
        for key in keys {
            let removed = tx
                .execute(
                    "DELETE FROM preferences WHERE key = ?1",
                    params![key.as_str()],
                )
                .with_context(|| format!("Failed to remove preference {}", key))?;
            if removed > 0 {
                removed_keys.push(*key);
            }
        }
        tx.commit().context("Failed to commit preference removal")?;

        for key in &removed_keys {
            self.notify(*key);
        }
        Ok(removed_keys.len())
    }

    fn notify(&self, key: PreferenceKey) {
        if let Some(listeners) = self.listeners {
            listeners.notify(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::database::Database;

    fn setup_test_db() -> Database {
        Database::open(":memory:").unwrap()
    }

    #[test]
    fn test_get_missing_is_none() {
        let db = setup_test_db();
        let prefs = PreferenceService::new(db.connection());
        assert_eq!(prefs.get(PreferenceKey::Font).unwrap(), None);
        assert_eq!(prefs.get_or(PreferenceKey::Font, "1").unwrap(), "1");
    }

    #[test]
    fn test_set_and_overwrite() {
        let db = setup_test_db();
        let prefs = PreferenceService::new(db.connection());

        prefs.set(PreferenceKey::Font, "3").unwrap();
        prefs.set(PreferenceKey::Font, "4").unwrap();
        assert_eq!(prefs.get(PreferenceKey::Font).unwrap().as_deref(), Some("4"));
    }

    #[test]
    fn test_set_notifies_subscriber() {
        let db = setup_test_db();
        let listeners = PreferenceListeners::new();
        let prefs = PreferenceService::with_listeners(db.connection(), &listeners);
        let subscription = listeners.subscribe();

        prefs.set(PreferenceKey::ThemeSwitch, "2").unwrap();
        // Same value again is not a change
        prefs.set(PreferenceKey::ThemeSwitch, "2").unwrap();
        prefs.set_quiet(PreferenceKey::Font, "2").unwrap();

        assert_eq!(subscription.drain(), vec![PreferenceKey::ThemeSwitch]);
        assert!(subscription.drain().is_empty());
    }

    #[test]
    fn test_dropped_subscription_unregisters() {
        let listeners = PreferenceListeners::new();
        let first = listeners.subscribe();
        let second = listeners.subscribe();
        assert_eq!(listeners.subscriber_count(), 2);

        drop(first);
        assert_eq!(listeners.subscriber_count(), 1);

        listeners.notify(PreferenceKey::Font);
        assert_eq!(second.drain(), vec![PreferenceKey::Font]);
    }

    #[test]
    fn test_remove_notifies_only_when_present() {
        let db = setup_test_db();
        let listeners = PreferenceListeners::new();
        let prefs = PreferenceService::with_listeners(db.connection(), &listeners);
        prefs.set_quiet(PreferenceKey::NavbarStyle, "com.android.theme.navbar.asus").unwrap();
        let subscription = listeners.subscribe();

        assert!(prefs.remove(PreferenceKey::NavbarStyle).unwrap());
        assert!(!prefs.remove(PreferenceKey::NavbarStyle).unwrap());
        assert_eq!(subscription.drain(), vec![PreferenceKey::NavbarStyle]);
    }

    #[test]
    fn test_remove_all() {
        let db = setup_test_db();
        let listeners = PreferenceListeners::new();
        let prefs = PreferenceService::with_listeners(db.connection(), &listeners);
        prefs.set_quiet(PreferenceKey::Font, "2").unwrap();
        prefs.set_quiet(PreferenceKey::ThemeSwitch, "3").unwrap();
        prefs.set_quiet(PreferenceKey::AccentColor, "#ff00ff00").unwrap();
        let subscription = listeners.subscribe();

        let removed = prefs
            .remove_all(&[PreferenceKey::Font, PreferenceKey::ThemeSwitch, PreferenceKey::IconShape])
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(
            subscription.drain(),
            vec![PreferenceKey::Font, PreferenceKey::ThemeSwitch]
        );
        assert!(prefs.get(PreferenceKey::AccentColor).unwrap().is_some());
    }
}
