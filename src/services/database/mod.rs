// Database service module
// SQLite connection and schema management for the themes store

mod connection;
mod migrations;
mod schema;

pub use connection::Database;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use std::path::Path;

    fn table_exists(db: &Database, name: &str) -> bool {
        let count: i64 = db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [name],
                |row| row.get(0),
            )
            .unwrap();
        count == 1
    }

    #[test]
    fn test_new_database_in_memory() {
        let result = Database::new(":memory:");
        assert!(result.is_ok(), "Should create in-memory database");
    }

    #[test]
    fn test_new_database_with_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("themes.db");
        let db_path_str = db_path.to_str().unwrap();

        let db = Database::new(db_path_str).unwrap();
        assert!(Path::new(db_path_str).exists(), "Database file should exist");
        assert_eq!(db.path(), db_path_str);
    }

    #[test]
    fn test_open_creates_tables() {
        let db = Database::open(":memory:").unwrap();
        assert!(table_exists(&db, "themes"));
        assert!(table_exists(&db, "preferences"));
    }

    #[test]
    fn test_initialize_schema_is_idempotent() {
        let db = Database::open(":memory:").unwrap();
        assert!(db.initialize_schema().is_ok());
        assert!(db.initialize_schema().is_ok());
    }

    #[test]
    fn test_open_fails_for_unwritable_location() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("missing").join("themes.db");
        assert!(Database::open(db_path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_migrates_legacy_themes_table() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("legacy.db");

        {
            let conn = Connection::open(&db_path).unwrap();
            conn.execute(
                "CREATE TABLE themes (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    theme_name TEXT NOT NULL,
                    theme_day_or_night TEXT NOT NULL DEFAULT 'day',
                    theme_night_color TEXT NOT NULL DEFAULT '',
                    theme_switch TEXT NOT NULL DEFAULT '1',
                    adaptive_icon_shape TEXT NOT NULL DEFAULT '',
                    theme_font TEXT NOT NULL DEFAULT '',
                    theme_sb_icons TEXT NOT NULL DEFAULT '',
                    theme_wp TEXT NOT NULL DEFAULT ''
                )",
                [],
            )
            .unwrap();
            conn.execute("INSERT INTO themes (theme_name) VALUES ('Old')", [])
                .unwrap();
        }

        let db = Database::open(db_path.to_str().unwrap()).unwrap();
        assert!(migrations::column_exists(db.connection(), "themes", "theme_icon_shape").unwrap());
        assert!(
            migrations::column_exists(db.connection(), "themes", "theme_navbar_style").unwrap()
        );

        let navbar: String = db
            .connection()
            .query_row(
                "SELECT theme_navbar_style FROM themes WHERE theme_name = 'Old'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(navbar, "");
    }

    #[test]
    fn test_themes_table_holds_only_profile_columns() {
        let db = Database::open(":memory:").unwrap();

        let mut stmt = db
            .connection()
            .prepare("SELECT name FROM pragma_table_info('themes') ORDER BY cid")
            .unwrap();
        let columns: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            columns,
            vec![
                "id",
                "theme_name",
                "theme_day_or_night",
                "theme_night_color",
                "theme_switch",
                "adaptive_icon_shape",
                "theme_font",
                "theme_icon_shape",
                "theme_sb_icons",
                "theme_wp",
                "theme_navbar_style",
            ]
        );
    }
}
