// Preference keys
// The fixed set of named options the themes screen persists

use crate::models::overlay::OverlayCategory;

/// A named theme option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    AccentOverlay,
    NavbarStyle,
    Font,
    AdaptiveIconShape,
    IconShape,
    StatusbarIcons,
    ThemeSwitch,
    AccentColor,
    Schedule,
    ScheduleStartTime,
    ScheduleStartTheme,
    ScheduleEndTime,
    ScheduleEndTheme,
}

impl PreferenceKey {
    pub fn all() -> [PreferenceKey; 13] {
        [
            Self::AccentOverlay,
            Self::NavbarStyle,
            Self::Font,
            Self::AdaptiveIconShape,
            Self::IconShape,
            Self::StatusbarIcons,
            Self::ThemeSwitch,
            Self::AccentColor,
            Self::Schedule,
            Self::ScheduleStartTime,
            Self::ScheduleStartTheme,
            Self::ScheduleEndTime,
            Self::ScheduleEndTheme,
        ]
    }

    /// Keys cleared by a theme reset.
    pub fn theme_keys() -> [PreferenceKey; 7] {
        [
            Self::AccentOverlay,
            Self::NavbarStyle,
            Self::Font,
            Self::AdaptiveIconShape,
            Self::IconShape,
            Self::StatusbarIcons,
            Self::ThemeSwitch,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccentOverlay => "theme_accent_color",
            Self::NavbarStyle => "theme_navbar_style",
            Self::Font => "font_picker",
            // Persisted spelling, kept so existing databases keep working
            Self::AdaptiveIconShape => "adapative_icon_shape",
            Self::IconShape => "icon_shape",
            Self::StatusbarIcons => "statusbar_icons",
            Self::ThemeSwitch => "theme_switch",
            Self::AccentColor => "accent_color",
            Self::Schedule => "theme_schedule",
            Self::ScheduleStartTime => "theme_schedule_start_time",
            Self::ScheduleStartTheme => "theme_schedule_start_theme",
            Self::ScheduleEndTime => "theme_schedule_end_time",
            Self::ScheduleEndTheme => "theme_schedule_end_theme",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().into_iter().find(|k| k.as_str() == key)
    }

    /// The overlay category a key selects, if it is an overlay key.
    pub fn category(&self) -> Option<OverlayCategory> {
        match self {
            Self::AccentOverlay => Some(OverlayCategory::Accent),
            Self::NavbarStyle => Some(OverlayCategory::NavbarStyle),
            Self::Font => Some(OverlayCategory::Font),
            Self::AdaptiveIconShape => Some(OverlayCategory::AdaptiveIconShape),
            Self::IconShape => Some(OverlayCategory::IconShape),
            Self::StatusbarIcons => Some(OverlayCategory::StatusbarIcons),
            _ => None,
        }
    }

    /// Whether the key stores a package name (`true`) or a list position (`false`).
    ///
    /// Only meaningful for overlay keys.
    pub fn stores_package(&self) -> bool {
        matches!(self, Self::AccentOverlay | Self::NavbarStyle)
    }

    pub fn for_category(category: OverlayCategory) -> PreferenceKey {
        match category {
            OverlayCategory::Accent => Self::AccentOverlay,
            OverlayCategory::NavbarStyle => Self::NavbarStyle,
            OverlayCategory::Font => Self::Font,
            OverlayCategory::AdaptiveIconShape => Self::AdaptiveIconShape,
            OverlayCategory::IconShape => Self::IconShape,
            OverlayCategory::StatusbarIcons => Self::StatusbarIcons,
        }
    }
}

impl std::fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
