//! Theme profile model.
//!
//! A profile is a named snapshot of the overlay selections that were active
//! when the user backed up their theme. Every field except `id` is a plain
//! string token; nothing here checks that the referenced overlays still exist
//! on the device.

use serde::{Deserialize, Serialize};

/// Maximum length of a profile name.
pub const MAX_NAME_LEN: usize = 50;

/// A stored theme profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeProfile {
    /// Row id assigned by the store (`None` until inserted)
    #[serde(skip)]
    pub id: Option<i64>,
    /// User supplied label
    pub theme_name: String,
    /// `"day"` or `"night"`
    pub day_or_night: String,
    /// Active dark variant overlay, empty when none
    #[serde(default)]
    pub night_color: String,
    /// Base theme switch value, `"1"` through `"6"`
    pub theme_switch: String,
    #[serde(default)]
    pub adaptive_icon_shape: String,
    #[serde(default)]
    pub font: String,
    #[serde(default)]
    pub icon_shape: String,
    #[serde(default)]
    pub statusbar_icons: String,
    #[serde(default)]
    pub wallpaper: String,
    #[serde(default)]
    pub navbar_style: String,
}

impl ThemeProfile {
    /// Creates an unsaved profile in day mode with the light theme and
    /// platform defaults everywhere.
    pub fn new(theme_name: impl Into<String>) -> Self {
        Self {
            id: None,
            theme_name: theme_name.into(),
            day_or_night: "day".to_string(),
            night_color: String::new(),
            theme_switch: "1".to_string(),
            adaptive_icon_shape: String::new(),
            font: String::new(),
            icon_shape: String::new(),
            statusbar_icons: String::new(),
            wallpaper: String::new(),
            navbar_style: String::new(),
        }
    }

    /// Returns a copy carrying the given id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Validate the profile before it is handed to the store.
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        let name = self.theme_name.trim();
        if name.is_empty() {
            return Err(ProfileValidationError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(ProfileValidationError::NameTooLong);
        }
        if self.day_or_night != "day" && self.day_or_night != "night" {
            return Err(ProfileValidationError::InvalidDayOrNight(
                self.day_or_night.clone(),
            ));
        }
        Ok(())
    }

    pub fn is_night(&self) -> bool {
        self.day_or_night == "night"
    }
}

/// Validation errors for ThemeProfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    EmptyName,
    NameTooLong,
    InvalidDayOrNight(String),
}

impl std::fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Theme name cannot be empty"),
            Self::NameTooLong => {
                write!(f, "Theme name must be {} characters or less", MAX_NAME_LEN)
            }
            Self::InvalidDayOrNight(value) => {
                write!(f, "Mode must be 'day' or 'night', got '{}'", value)
            }
        }
    }
}

impl std::error::Error for ProfileValidationError {}
