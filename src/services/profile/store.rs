use rusqlite::{params, Connection, OptionalExtension};

use crate::models::theme_profile::ThemeProfile;

use super::error::{ProfileStoreError, StoreResult};
use super::mapper::{row_to_profile, PROFILE_COLUMNS};

/// CRUD access to the `themes` table.
///
/// The row cap is the caller's business; the store accepts every insert the
/// database accepts. Rows are never updated in place.
pub struct ThemeProfileStore<'a> {
    conn: &'a Connection,
}

impl<'a> ThemeProfileStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Append a profile and return its freshly assigned id.
    ///
    /// Any `id` already on `profile` is ignored.
    pub fn insert(&self, profile: &ThemeProfile) -> StoreResult<i64> {
        self.conn.execute(
            "INSERT INTO themes (theme_name, theme_day_or_night, theme_night_color,
             theme_switch, adaptive_icon_shape, theme_font, theme_icon_shape,
             theme_sb_icons, theme_wp, theme_navbar_style)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                profile.theme_name,
                profile.day_or_night,
                profile.night_color,
                profile.theme_switch,
                profile.adaptive_icon_shape,
                profile.font,
                profile.icon_shape,
                profile.statusbar_icons,
                profile.wallpaper,
                profile.navbar_style,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        log::info!("Stored theme profile '{}' as #{}", profile.theme_name, id);
        Ok(id)
    }

    /// All profiles in insertion order.
    pub fn get_all(&self) -> StoreResult<Vec<ThemeProfile>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM themes ORDER BY id ASC", PROFILE_COLUMNS))?;

        let profiles = stmt
            .query_map([], row_to_profile)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(profiles)
    }

    pub fn get_by_id(&self, id: i64) -> StoreResult<ThemeProfile> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM themes WHERE id = ?1", PROFILE_COLUMNS),
                params![id],
                row_to_profile,
            )
            .optional()?
            .ok_or(ProfileStoreError::NotFound(id))
    }

    /// Oldest profile carrying this name, if any.
    pub fn get_by_name(&self, name: &str) -> StoreResult<Option<ThemeProfile>> {
        let profile = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM themes WHERE theme_name = ?1 ORDER BY id ASC LIMIT 1",
                    PROFILE_COLUMNS
                ),
                params![name],
                row_to_profile,
            )
            .optional()?;

        Ok(profile)
    }

    /// Remove one profile. Missing ids report `NotFound` and change nothing.
    pub fn delete(&self, id: i64) -> StoreResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM themes WHERE id = ?1", params![id])?;

        if removed == 0 {
            return Err(ProfileStoreError::NotFound(id));
        }

        log::info!("Deleted theme profile #{}", id);
        Ok(())
    }

    /// Remove every profile, returning how many rows went.
    pub fn delete_all(&self) -> StoreResult<usize> {
        let removed = self.conn.execute("DELETE FROM themes", [])?;
        log::info!("Deleted all {} theme profile(s)", removed);
        Ok(removed)
    }

    pub fn count(&self) -> StoreResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM themes", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
