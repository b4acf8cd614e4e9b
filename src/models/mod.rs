// Module exports for models

pub mod overlay;
pub mod preferences;
pub mod schedule;
pub mod settings;
pub mod theme_profile;
