use crate::models::theme_profile::ThemeProfile;
use rusqlite::Row;

/// Column list matching `row_to_profile`'s positions.
pub const PROFILE_COLUMNS: &str = "id, theme_name, theme_day_or_night, theme_night_color, \
     theme_switch, adaptive_icon_shape, theme_font, theme_icon_shape, theme_sb_icons, \
     theme_wp, theme_navbar_style";

pub fn row_to_profile(row: &Row) -> Result<ThemeProfile, rusqlite::Error> {
    Ok(ThemeProfile {
        id: Some(row.get(0)?),
        theme_name: row.get(1)?,
        day_or_night: row.get(2)?,
        night_color: row.get(3)?,
        theme_switch: row.get(4)?,
        adaptive_icon_shape: row.get(5)?,
        font: row.get(6)?,
        icon_shape: row.get(7)?,
        statusbar_icons: row.get(8)?,
        wallpaper: row.get(9)?,
        navbar_style: row.get(10)?,
    })
}
