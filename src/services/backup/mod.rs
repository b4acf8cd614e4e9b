// Theme backup service
// Captures the current overlay selection as a profile and restores it later

mod error;

use std::fs;
use std::path::Path;

pub use error::BackupError;

use crate::models::overlay::{list_value_for_position, OverlayCategory, ThemeSwitch};
use crate::models::preferences::PreferenceKey;
use crate::models::theme_profile::ThemeProfile;
use crate::services::database::Database;
use crate::services::overlay::{
    apply_overlay, apply_theme_switch, current_dark_variant, current_theme_switch,
    enabled_overlay, OverlayManager,
};
use crate::services::preferences::PreferenceService;
use crate::services::profile::{ProfileWriteTask, ThemeProfileStore};

/// Whether the backup and restore actions should be offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackupAvailability {
    pub can_backup: bool,
    pub can_restore: bool,
    pub count: usize,
    pub limit: usize,
}

impl BackupAvailability {
    pub fn new(count: usize, limit: usize) -> Self {
        Self {
            can_backup: count < limit,
            can_restore: count > 0,
            count,
            limit,
        }
    }

    /// Both actions off, used when the database could not be opened.
    pub fn unavailable(limit: usize) -> Self {
        Self {
            can_backup: false,
            can_restore: false,
            count: 0,
            limit,
        }
    }

    pub fn backup_summary(&self) -> &'static str {
        if self.count >= self.limit {
            "Backup limit reached, delete a theme to make room"
        } else {
            "Save the current theme"
        }
    }

    pub fn restore_summary(&self) -> &'static str {
        if self.count == 0 {
            "No saved themes"
        } else {
            "Restore a saved theme"
        }
    }
}

/// Categories stored in a profile, paired with their field.
fn profile_fields(profile: &ThemeProfile) -> [(OverlayCategory, &str); 5] {
    [
        (OverlayCategory::AdaptiveIconShape, profile.adaptive_icon_shape.as_str()),
        (OverlayCategory::Font, profile.font.as_str()),
        (OverlayCategory::IconShape, profile.icon_shape.as_str()),
        (OverlayCategory::StatusbarIcons, profile.statusbar_icons.as_str()),
        (OverlayCategory::NavbarStyle, profile.navbar_style.as_str()),
    ]
}

pub struct ThemeBackupService<'a, M: OverlayManager + ?Sized> {
    db: &'a Database,
    manager: &'a M,
    limit: usize,
}

impl<'a, M: OverlayManager + ?Sized> ThemeBackupService<'a, M> {
    pub fn new(db: &'a Database, manager: &'a M, limit: usize) -> Self {
        Self { db, manager, limit }
    }

    fn store(&self) -> ThemeProfileStore<'a> {
        ThemeProfileStore::new(self.db.connection())
    }

    pub fn availability(&self) -> Result<BackupAvailability, BackupError> {
        let count = self.store().count()?;
        Ok(BackupAvailability::new(count, self.limit))
    }

    /// Snapshot of the current overlay state under the given name.
    pub fn capture(&self, name: &str, wallpaper: &str) -> ThemeProfile {
        let token = |category| enabled_overlay(self.manager, category).unwrap_or_default();

        ThemeProfile {
            id: None,
            theme_name: name.trim().to_string(),
            day_or_night: self.manager.night_mode().as_str().to_string(),
            night_color: current_dark_variant(self.manager)
                .unwrap_or_default()
                .to_string(),
            theme_switch: current_theme_switch(self.manager).value().to_string(),
            adaptive_icon_shape: token(OverlayCategory::AdaptiveIconShape).to_string(),
            font: token(OverlayCategory::Font).to_string(),
            icon_shape: token(OverlayCategory::IconShape).to_string(),
            statusbar_icons: token(OverlayCategory::StatusbarIcons).to_string(),
            wallpaper: wallpaper.to_string(),
            navbar_style: token(OverlayCategory::NavbarStyle).to_string(),
        }
    }

    fn check_room(&self) -> Result<(), BackupError> {
        if !self.availability()?.can_backup {
            return Err(BackupError::LimitReached(self.limit));
        }
        Ok(())
    }

    fn insert_checked(&self, profile: &ThemeProfile) -> Result<i64, BackupError> {
        self.check_room()?;
        profile.validate()?;
        Ok(self.store().insert(profile)?)
    }

    /// Captures and stores the current theme. Refused once the limit is hit.
    pub fn backup(&self, name: &str, wallpaper: &str) -> Result<i64, BackupError> {
        let profile = self.capture(name, wallpaper);
        self.insert_checked(&profile)
    }

    /// Like [`backup`](Self::backup) but the insert runs on a worker thread.
    ///
    /// Gating and validation happen before the worker starts.
    pub fn backup_in_background(
        &self,
        name: &str,
        wallpaper: &str,
    ) -> Result<ProfileWriteTask, BackupError> {
        if self.db.path() == ":memory:" {
            return Err(BackupError::Unavailable(
                "background writes need a database file".to_string(),
            ));
        }

        let profile = self.capture(name, wallpaper);
        self.check_room()?;
        profile.validate()?;
        Ok(ProfileWriteTask::spawn_insert(self.db.path(), profile))
    }

    pub fn list(&self) -> Result<Vec<ThemeProfile>, BackupError> {
        Ok(self.store().get_all()?)
    }

    pub fn delete(&self, id: i64) -> Result<(), BackupError> {
        Ok(self.store().delete(id)?)
    }

    /// Applies a stored profile. The row itself is left untouched.
    pub fn restore(&self, id: i64) -> Result<ThemeProfile, BackupError> {
        let profile = self.store().get_by_id(id)?;
        self.apply_profile(&profile)?;
        log::info!("Restored theme profile '{}' (#{})", profile.theme_name, id);
        Ok(profile)
    }

    fn apply_profile(&self, profile: &ThemeProfile) -> Result<(), BackupError> {
        let prefs = PreferenceService::new(self.db.connection());

        let switch = ThemeSwitch::from_value(&profile.theme_switch).unwrap_or_else(|| {
            let fallback = ThemeSwitch::from_dark_variant(&profile.night_color).unwrap_or(
                if profile.is_night() {
                    ThemeSwitch::Dark
                } else {
                    ThemeSwitch::Light
                },
            );
            log::warn!(
                "Profile '{}' has unknown theme switch '{}', falling back to {}",
                profile.theme_name,
                profile.theme_switch,
                fallback
            );
            fallback
        });
        apply_theme_switch(self.manager, switch)?;
        prefs.set_quiet(PreferenceKey::ThemeSwitch, switch.value())?;

        for (category, token) in profile_fields(profile) {
            let target = if token.is_empty() {
                None
            } else {
                match category.find(token) {
                    Some(package) => Some(package),
                    None => {
                        log::warn!(
                            "Skipping unknown {} overlay '{}' in profile '{}'",
                            category.name(),
                            token,
                            profile.theme_name
                        );
                        continue;
                    }
                }
            };

            apply_overlay(self.manager, category, target)?;

            let key = PreferenceKey::for_category(category);
            let value = if key.stores_package() {
                target.unwrap_or("default").to_string()
            } else {
                let position =
                    target.and_then(|p| category.packages().iter().position(|c| *c == p));
                list_value_for_position(position)
            };
            prefs.set_quiet(key, &value)?;
        }

        Ok(())
    }

    /// Writes a stored profile to a TOML file.
    pub fn export_profile(&self, id: i64, path: &Path) -> Result<(), BackupError> {
        let profile = self.store().get_by_id(id)?;
        let content = toml::to_string_pretty(&profile)?;
        fs::write(path, content)?;
        log::info!("Exported theme profile #{} to {:?}", id, path);
        Ok(())
    }

    /// Reads a TOML profile file and stores it as a new profile.
    pub fn import_profile(&self, path: &Path) -> Result<i64, BackupError> {
        let content = fs::read_to_string(path)?;
        let mut profile: ThemeProfile = toml::from_str(&content)?;
        profile.id = None;
        let id = self.insert_checked(&profile)?;
        log::info!("Imported theme profile '{}' from {:?}", profile.theme_name, path);
        Ok(id)
    }
}
