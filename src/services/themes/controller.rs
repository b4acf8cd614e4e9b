use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDateTime;

use crate::models::overlay::{
    list_value_for_position, position_for_list_value, AccentColor, OverlayCategory, ThemeSwitch,
};
use crate::models::preferences::PreferenceKey;
use crate::models::settings::AppConfig;
use crate::services::backup::{BackupAvailability, BackupError, ThemeBackupService};
use crate::services::database::Database;
use crate::services::overlay::{
    apply_list_value, apply_overlay, apply_theme_switch, current_theme_switch, enabled_overlay,
    overlay_position, OverlayManager,
};
use crate::services::preferences::{PreferenceListeners, PreferenceService, Subscription};
use crate::services::schedule::ScheduleService;

const DEFAULT_PACKAGE: &str = "default";
const DEFAULT_LIST_VALUE: &str = "1";

/// Keeps the controller listening for preference changes while a restore
/// flow runs elsewhere. Listening may stop on pause once every guard is gone.
#[derive(Debug)]
pub struct RestoreFlowGuard {
    _token: Arc<()>,
}

/// State and actions behind the themes settings screen.
///
/// Selections are written as preferences; the controller turns preference
/// changes into overlay calls while it is subscribed (between `resume` and
/// `pause`).
pub struct ThemesController<M: OverlayManager> {
    db: Database,
    storage_available: bool,
    manager: M,
    config: AppConfig,
    listeners: PreferenceListeners,
    subscription: Option<Subscription>,
    restore_flow: Arc<()>,
}

impl<M: OverlayManager> ThemesController<M> {
    /// Opens the database named by `config`.
    ///
    /// When the file cannot be opened, preferences fall back to an in-memory
    /// database and backup/restore stay disabled for the session.
    pub fn open(config: AppConfig, manager: M) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create data directory {:?}: {}", parent, err);
            }
        }

        let path = config.database_path.to_string_lossy().to_string();
        let (db, storage_available) = match Database::open(&path) {
            Ok(db) => (db, true),
            Err(err) => {
                log::warn!(
                    "Theme database unavailable ({:#}); backup and restore are disabled",
                    err
                );
                let fallback = Database::open(":memory:")
                    .context("Failed to open fallback preference database")?;
                (fallback, false)
            }
        };

        Ok(Self::with_database(db, storage_available, manager, config))
    }

    pub fn with_database(
        db: Database,
        storage_available: bool,
        manager: M,
        config: AppConfig,
    ) -> Self {
        Self {
            db,
            storage_available,
            manager,
            config,
            listeners: PreferenceListeners::new(),
            subscription: None,
            restore_flow: Arc::new(()),
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn manager(&self) -> &M {
        &self.manager
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn storage_available(&self) -> bool {
        self.storage_available
    }

    pub fn preferences(&self) -> PreferenceService<'_> {
        PreferenceService::with_listeners(self.db.connection(), &self.listeners)
    }

    pub fn schedule(&self) -> ScheduleService<'_> {
        ScheduleService::new(self.preferences())
    }

    pub fn backups(&self) -> Result<ThemeBackupService<'_, M>, BackupError> {
        if !self.storage_available {
            return Err(BackupError::Unavailable(
                "the theme database could not be opened".to_string(),
            ));
        }
        Ok(ThemeBackupService::new(
            &self.db,
            &self.manager,
            self.config.backup_limit,
        ))
    }

    /// Which of backup/restore to offer right now.
    pub fn availability(&self) -> BackupAvailability {
        let limit = self.config.backup_limit;
        match self.backups().and_then(|service| service.availability()) {
            Ok(availability) => availability,
            Err(err) => {
                log::warn!("Theme backups unavailable: {}", err);
                BackupAvailability::unavailable(limit)
            }
        }
    }

    /// Records the overlay state the device is in as preference values.
    ///
    /// Writes are quiet so nothing is re-applied.
    pub fn sync_from_overlays(&self) -> Result<()> {
        let prefs = self.preferences();

        for key in [PreferenceKey::AccentOverlay, PreferenceKey::NavbarStyle] {
            if let Some(category) = key.category() {
                if let Some(package) = enabled_overlay(&self.manager, category) {
                    prefs.set_quiet(key, package)?;
                }
            }
        }

        for category in [
            OverlayCategory::Font,
            OverlayCategory::AdaptiveIconShape,
            OverlayCategory::IconShape,
            OverlayCategory::StatusbarIcons,
        ] {
            let value = list_value_for_position(overlay_position(&self.manager, category));
            prefs.set_quiet(PreferenceKey::for_category(category), &value)?;
        }

        let switch = current_theme_switch(&self.manager);
        prefs.set_quiet(PreferenceKey::ThemeSwitch, switch.value())?;

        log::debug!("Synced theme preferences from overlay state ({})", switch);
        Ok(())
    }

    /// Starts listening for preference changes.
    pub fn resume(&mut self) {
        if self.subscription.is_none() {
            self.subscription = Some(self.listeners.subscribe());
        }
    }

    /// Applies anything pending, then stops listening unless a restore flow
    /// still holds a guard.
    pub fn pause(&mut self) {
        if let Err(err) = self.process_changes() {
            log::warn!("Failed to apply theme change before pausing: {:#}", err);
        }

        if Arc::strong_count(&self.restore_flow) > 1 {
            log::debug!("Restore flow active, keeping preference listener");
            return;
        }
        self.subscription = None;
    }

    pub fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }

    /// Hands out a guard that keeps the listener alive across `pause`.
    pub fn begin_restore_flow(&self) -> RestoreFlowGuard {
        RestoreFlowGuard {
            _token: Arc::clone(&self.restore_flow),
        }
    }

    /// Applies every change received since the last call.
    ///
    /// Each key is attempted even when an earlier one fails; the failures
    /// are reported together once all keys have been tried.
    pub fn process_changes(&self) -> Result<Vec<PreferenceKey>> {
        let Some(subscription) = &self.subscription else {
            return Ok(Vec::new());
        };

        let mut seen = Vec::new();
        let mut applied = Vec::new();
        let mut failures = Vec::new();
        for key in subscription.drain() {
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);

            match self.handle_change(key) {
                Ok(()) => applied.push(key),
                Err(err) => {
                    log::warn!("Failed to apply {}: {:#}", key, err);
                    failures.push(format!("{}: {:#}", key, err));
                }
            }
        }

        if !failures.is_empty() {
            return Err(anyhow!(
                "{} theme change(s) failed: {}",
                failures.len(),
                failures.join("; ")
            ));
        }
        Ok(applied)
    }

    /// Applies the stored value of one preference through the overlay service.
    pub fn handle_change(&self, key: PreferenceKey) -> Result<()> {
        let prefs = self.preferences();

        if let Some(category) = key.category() {
            if key.stores_package() {
                let value = prefs.get_or(key, DEFAULT_PACKAGE)?;
                let target = (value != DEFAULT_PACKAGE).then_some(value.as_str());
                return apply_overlay(&self.manager, category, target);
            }

            let value = prefs.get_or(key, DEFAULT_LIST_VALUE)?;
            return apply_list_value(&self.manager, category, &value);
        }

        match key {
            PreferenceKey::ThemeSwitch => {
                let value = prefs.get_or(key, ThemeSwitch::Light.value())?;
                let switch = ThemeSwitch::from_value(&value)
                    .ok_or_else(|| anyhow!("Unknown theme switch value '{}'", value))?;
                apply_theme_switch(&self.manager, switch)
            }
            _ => {
                log::debug!("No overlay action for {}", key);
                Ok(())
            }
        }
    }

    /// Stores a user selection after checking it fits the key.
    pub fn select(&self, key: PreferenceKey, value: &str) -> Result<()> {
        match key.category() {
            Some(category) if key.stores_package() => {
                if value != DEFAULT_PACKAGE && !category.contains(value) {
                    return Err(anyhow!("{} is not a {} overlay", value, category.name()));
                }
            }
            Some(category) => {
                position_for_list_value(category, value).map_err(|e| anyhow!(e))?;
            }
            None if key == PreferenceKey::ThemeSwitch => {
                ThemeSwitch::from_value(value)
                    .ok_or_else(|| anyhow!("Unknown theme switch value '{}'", value))?;
            }
            None => return Err(anyhow!("{} is not a theme selection", key)),
        }

        self.preferences().set(key, value)
    }

    /// Clears every theme selection. Subscribers then apply the defaults.
    pub fn reset(&self) -> Result<usize> {
        let removed = self.preferences().remove_all(&PreferenceKey::theme_keys())?;
        log::info!("Reset {} theme preference(s)", removed);
        Ok(removed)
    }

    pub fn accent_color(&self) -> Result<AccentColor> {
        match self.preferences().get(PreferenceKey::AccentColor)? {
            Some(hex) => AccentColor::from_hex(&hex).map_err(|e| anyhow!(e)),
            None => Ok(self.config.default_accent_color),
        }
    }

    pub fn set_accent_color(&self, color: AccentColor) -> Result<()> {
        self.preferences()
            .set(PreferenceKey::AccentColor, &color.to_hex())
    }

    pub fn accent_summary(&self) -> Result<String> {
        Ok(self.accent_color()?.summary())
    }

    /// Name of the active overlay in `category`, or "Default".
    pub fn overlay_summary(&self, category: OverlayCategory) -> &'static str {
        category.display_name(overlay_position(&self.manager, category))
    }

    pub fn schedule_summary(&self, now: NaiveDateTime) -> Result<String> {
        Ok(self.schedule().load()?.summary(now))
    }
}
