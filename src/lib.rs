// Overlay Themes Library
// Theme backups, overlay selection and scheduled theme switching

pub mod models;
pub mod services;

pub use models::overlay::{AccentColor, OverlayCategory, ThemeSwitch};
pub use models::theme_profile::ThemeProfile;
pub use services::database::Database;
pub use services::overlay::{InMemoryOverlayManager, OverlayManager};
pub use services::profile::{ProfileStoreError, ThemeProfileStore};
pub use services::themes::ThemesController;
