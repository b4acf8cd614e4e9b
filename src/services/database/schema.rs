use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_themes_table(conn)?;
    run_themes_migrations(conn)?;
    create_preferences_table(conn)?;
    Ok(())
}

fn create_themes_table(conn: &Connection) -> Result<()> {
    // AUTOINCREMENT keeps ids monotonic even after the newest row is deleted
    conn.execute(
        "CREATE TABLE IF NOT EXISTS themes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            theme_name TEXT NOT NULL,
            theme_day_or_night TEXT NOT NULL DEFAULT 'day',
            theme_night_color TEXT NOT NULL DEFAULT '',
            theme_switch TEXT NOT NULL DEFAULT '1',
            adaptive_icon_shape TEXT NOT NULL DEFAULT '',
            theme_font TEXT NOT NULL DEFAULT '',
            theme_icon_shape TEXT NOT NULL DEFAULT '',
            theme_sb_icons TEXT NOT NULL DEFAULT '',
            theme_wp TEXT NOT NULL DEFAULT '',
            theme_navbar_style TEXT NOT NULL DEFAULT ''
        )",
        [],
    )
    .context("Failed to create themes table")?;

    Ok(())
}

fn run_themes_migrations(conn: &Connection) -> Result<()> {
    migrations::ensure_column(
        conn,
        "themes",
        "theme_icon_shape",
        "ALTER TABLE themes ADD COLUMN theme_icon_shape TEXT NOT NULL DEFAULT ''",
    )?;

    migrations::ensure_column(
        conn,
        "themes",
        "theme_navbar_style",
        "ALTER TABLE themes ADD COLUMN theme_navbar_style TEXT NOT NULL DEFAULT ''",
    )?;

    Ok(())
}

fn create_preferences_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS preferences (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create preferences table")?;

    Ok(())
}
