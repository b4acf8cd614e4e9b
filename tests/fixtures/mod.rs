// Test fixtures - reusable test data
// Provides consistent profiles and overlay states across test files

#![allow(dead_code)]

use overlay_themes::models::theme_profile::ThemeProfile;
use overlay_themes::{InMemoryOverlayManager, OverlayManager, ThemeSwitch};

pub const TEAL: &str = "com.accents.teal";
pub const UBUNTU: &str = "com.android.theme.font.ubuntu";
pub const SQUIRCLE: &str = "com.android.theme.icon.squircle";
pub const ASUS_NAVBAR: &str = "com.android.theme.navbar.asus";

/// Sample profiles for testing
pub mod profiles {
    use super::*;

    /// The profile from the store walkthrough: day mode, light theme, ubuntu font
    pub fn dark_blue() -> ThemeProfile {
        ThemeProfile {
            font: UBUNTU.to_string(),
            ..ThemeProfile::new("DarkBlue")
        }
    }

    /// Night mode with the pitch black variant and every field set
    pub fn midnight() -> ThemeProfile {
        ThemeProfile {
            id: None,
            theme_name: "Midnight".to_string(),
            day_or_night: "night".to_string(),
            night_color: overlay_themes::models::overlay::PITCH_BLACK.to_string(),
            theme_switch: ThemeSwitch::PitchBlack.value().to_string(),
            adaptive_icon_shape: SQUIRCLE.to_string(),
            font: UBUNTU.to_string(),
            icon_shape: String::new(),
            statusbar_icons: String::new(),
            wallpaper: "/sdcard/wallpapers/stars.png".to_string(),
            navbar_style: ASUS_NAVBAR.to_string(),
        }
    }

    /// `count` minimal profiles named `Theme 1`, `Theme 2`, ...
    pub fn numbered(count: usize) -> Vec<ThemeProfile> {
        (1..=count)
            .map(|n| ThemeProfile::new(format!("Theme {}", n)))
            .collect()
    }
}

/// Overlay managers preloaded with a known state
pub mod devices {
    use super::*;

    /// A device running a customised night theme
    pub fn customised() -> InMemoryOverlayManager {
        let manager = InMemoryOverlayManager::new();
        overlay_themes::services::overlay::apply_theme_switch(&manager, ThemeSwitch::SolarizedDark)
            .unwrap();
        manager.set_enabled(TEAL, true).unwrap();
        manager.set_enabled(UBUNTU, true).unwrap();
        manager.set_enabled(SQUIRCLE, true).unwrap();
        manager
    }
}
