//! Overlay catalogue and base theme model.
//!
//! An overlay is a platform package that replaces resources (colours, fonts,
//! icon shapes) while enabled. Overlays are grouped into categories; within a
//! category at most one overlay is expected to be active at a time.

use serde::{Deserialize, Serialize};

pub const PITCH_BLACK: &str = "com.android.theme.pitchblack.system";
pub const SOLARIZED_DARK: &str = "com.android.theme.solarizeddark.system";
pub const CHOCO_X: &str = "com.android.theme.chocox.system";
pub const BAKED_GREEN: &str = "com.android.theme.bakedgreen.system";

/// All dark variant overlays, in the order their switch values are assigned.
pub const DARK_VARIANTS: [&str; 4] = [PITCH_BLACK, SOLARIZED_DARK, CHOCO_X, BAKED_GREEN];

const ACCENTS: &[&str] = &[
    "com.accents.red",
    "com.accents.pink",
    "com.accents.purple",
    "com.accents.deeppurple",
    "com.accents.indigo",
    "com.accents.blue",
    "com.accents.lightblue",
    "com.accents.cyan",
    "com.accents.teal",
    "com.accents.green",
    "com.accents.lightgreen",
    "com.accents.lime",
    "com.accents.yellow",
    "com.accents.amber",
    "com.accents.orange",
    "com.accents.deeporange",
    "com.accents.brown",
    "com.accents.grey",
    "com.accents.bluegrey",
    "com.accents.black",
    "com.accents.white",
];

const NAVBAR_STYLES: &[&str] = &[
    "com.android.theme.navbar.asus",
    "com.android.theme.navbar.oneplus",
    "com.android.theme.navbar.oneui",
    "com.android.theme.navbar.tecno",
];

const FONTS: &[&str] = &[
    "com.android.theme.font.notoserifsource",
    "com.android.theme.font.cagliostrosource",
    "com.android.theme.font.lgsmartgothicsource",
    "com.android.theme.font.rosemarysource",
    "com.android.theme.font.sonysketchsource",
    "com.android.theme.font.googlesans",
    "com.android.theme.font.slateforoneplus",
    "com.android.theme.font.samsungone",
    "com.android.theme.font.firasans",
    "com.android.theme.font.ubuntu",
];

const ADAPTIVE_ICON_SHAPES: &[&str] = &[
    "com.android.theme.icon.teardrop",
    "com.android.theme.icon.squircle",
    "com.android.theme.icon.roundedrect",
    "com.android.theme.icon.cylinder",
    "com.android.theme.icon.hexagon",
];

const ICON_SHAPES: &[&str] = &[
    "com.android.theme.icon_shape.pebble",
    "com.android.theme.icon_shape.taperedrect",
    "com.android.theme.icon_shape.vessel",
];

const STATUSBAR_ICONS: &[&str] = &[
    "com.android.theme.icon_pack.filled.android",
    "com.android.theme.icon_pack.rounded.android",
    "com.android.theme.icon_pack.circular.android",
];

const ACCENT_NAMES: &[&str] = &[
    "Red", "Pink", "Purple", "Deep purple", "Indigo", "Blue", "Light blue", "Cyan", "Teal",
    "Green", "Light green", "Lime", "Yellow", "Amber", "Orange", "Deep orange", "Brown",
    "Grey", "Blue grey", "Black", "White",
];

const NAVBAR_STYLE_NAMES: &[&str] = &["Asus", "OnePlus", "OneUI", "Tecno"];

const FONT_NAMES: &[&str] = &[
    "Noto Serif", "Cagliostro", "LG Smart Gothic", "Rosemary", "Sony Sketch", "Google Sans",
    "Slate", "Samsung One", "Fira Sans", "Ubuntu",
];

const ADAPTIVE_ICON_SHAPE_NAMES: &[&str] =
    &["Teardrop", "Squircle", "Rounded rectangle", "Cylinder", "Hexagon"];

const ICON_SHAPE_NAMES: &[&str] = &["Pebble", "Tapered rectangle", "Vessel"];

const STATUSBAR_ICON_NAMES: &[&str] = &["Filled", "Rounded", "Circular"];

/// A group of mutually exclusive overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverlayCategory {
    Accent,
    NavbarStyle,
    Font,
    AdaptiveIconShape,
    IconShape,
    StatusbarIcons,
}

impl OverlayCategory {
    pub fn all() -> [OverlayCategory; 6] {
        [
            Self::Accent,
            Self::NavbarStyle,
            Self::Font,
            Self::AdaptiveIconShape,
            Self::IconShape,
            Self::StatusbarIcons,
        ]
    }

    /// Overlay packages for this category in catalogue order.
    pub fn packages(&self) -> &'static [&'static str] {
        match self {
            Self::Accent => ACCENTS,
            Self::NavbarStyle => NAVBAR_STYLES,
            Self::Font => FONTS,
            Self::AdaptiveIconShape => ADAPTIVE_ICON_SHAPES,
            Self::IconShape => ICON_SHAPES,
            Self::StatusbarIcons => STATUSBAR_ICONS,
        }
    }

    /// Display names, parallel to [`packages`](Self::packages).
    pub fn display_names(&self) -> &'static [&'static str] {
        match self {
            Self::Accent => ACCENT_NAMES,
            Self::NavbarStyle => NAVBAR_STYLE_NAMES,
            Self::Font => FONT_NAMES,
            Self::AdaptiveIconShape => ADAPTIVE_ICON_SHAPE_NAMES,
            Self::IconShape => ICON_SHAPE_NAMES,
            Self::StatusbarIcons => STATUSBAR_ICON_NAMES,
        }
    }

    /// Name shown for a catalogue position; `None` reads as "Default".
    pub fn display_name(&self, position: Option<usize>) -> &'static str {
        position
            .and_then(|index| self.display_names().get(index).copied())
            .unwrap_or("Default")
    }

    pub fn contains(&self, package: &str) -> bool {
        self.packages().contains(&package)
    }

    /// Looks up the catalogue's own `'static` copy of a package name.
    pub fn find(&self, package: &str) -> Option<&'static str> {
        self.packages().iter().copied().find(|p| *p == package)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Accent => "accent",
            Self::NavbarStyle => "navbar style",
            Self::Font => "font",
            Self::AdaptiveIconShape => "adaptive icon shape",
            Self::IconShape => "icon shape",
            Self::StatusbarIcons => "status bar icons",
        }
    }
}

/// Converts a catalogue position into a list preference value.
///
/// `"1"` is reserved for the platform default, so entry `n` is stored as `n + 2`.
pub fn list_value_for_position(position: Option<usize>) -> String {
    match position {
        Some(index) => (index + 2).to_string(),
        None => "1".to_string(),
    }
}

/// Converts a list preference value into a catalogue position.
///
/// Returns `Ok(None)` for the default entry and an error for values that are
/// not numbers or fall outside the catalogue.
pub fn position_for_list_value(
    category: OverlayCategory,
    value: &str,
) -> Result<Option<usize>, String> {
    let value: usize = value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid {} value '{}'", category.name(), value))?;

    match value {
        0 => Err(format!("Invalid {} value '0'", category.name())),
        1 => Ok(None),
        n if n - 2 < category.packages().len() => Ok(Some(n - 2)),
        n => Err(format!("{} value {} is out of range", category.name(), n)),
    }
}

/// Platform night mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NightMode {
    No,
    Yes,
}

impl NightMode {
    /// Token stored in profiles.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::No => "day",
            Self::Yes => "night",
        }
    }

    pub fn from_token(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" => Some(Self::No),
            "night" => Some(Self::Yes),
            _ => None,
        }
    }
}

/// The six base theme choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeSwitch {
    Light,
    Dark,
    PitchBlack,
    SolarizedDark,
    ChocoX,
    BakedGreen,
}

impl ThemeSwitch {
    pub fn all() -> [ThemeSwitch; 6] {
        [
            Self::Light,
            Self::Dark,
            Self::PitchBlack,
            Self::SolarizedDark,
            Self::ChocoX,
            Self::BakedGreen,
        ]
    }

    /// Preference value, `"1"` through `"6"`.
    pub fn value(&self) -> &'static str {
        match self {
            Self::Light => "1",
            Self::Dark => "2",
            Self::PitchBlack => "3",
            Self::SolarizedDark => "4",
            Self::ChocoX => "5",
            Self::BakedGreen => "6",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value.trim() {
            "1" => Some(Self::Light),
            "2" => Some(Self::Dark),
            "3" => Some(Self::PitchBlack),
            "4" => Some(Self::SolarizedDark),
            "5" => Some(Self::ChocoX),
            "6" => Some(Self::BakedGreen),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::PitchBlack => "Pitch black",
            Self::SolarizedDark => "Solarized dark",
            Self::ChocoX => "Choco-X",
            Self::BakedGreen => "Baked green",
        }
    }

    pub fn night_mode(&self) -> NightMode {
        match self {
            Self::Light => NightMode::No,
            _ => NightMode::Yes,
        }
    }

    /// The dark variant overlay this switch enables, if any.
    pub fn dark_variant(&self) -> Option<&'static str> {
        match self {
            Self::PitchBlack => Some(PITCH_BLACK),
            Self::SolarizedDark => Some(SOLARIZED_DARK),
            Self::ChocoX => Some(CHOCO_X),
            Self::BakedGreen => Some(BAKED_GREEN),
            Self::Light | Self::Dark => None,
        }
    }

    pub fn from_dark_variant(package: &str) -> Option<Self> {
        match package {
            PITCH_BLACK => Some(Self::PitchBlack),
            SOLARIZED_DARK => Some(Self::SolarizedDark),
            CHOCO_X => Some(Self::ChocoX),
            BAKED_GREEN => Some(Self::BakedGreen),
            _ => None,
        }
    }
}

impl std::fmt::Display for ThemeSwitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Custom accent colour stored as 32-bit ARGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccentColor(pub u32);

impl AccentColor {
    pub const DEFAULT: AccentColor = AccentColor(0xff1a_73e8);

    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }

    /// `#aarrggbb`, lower case.
    pub fn to_hex(&self) -> String {
        format!("#{:08x}", self.0)
    }

    /// Parses `#rrggbb` (opaque) or `#aarrggbb`.
    pub fn from_hex(hex: &str) -> Result<Self, String> {
        let digits = hex.trim().trim_start_matches('#');
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| format!("Invalid colour '{}'", hex))?;

        match digits.len() {
            6 => Ok(AccentColor(0xff00_0000 | value)),
            8 => Ok(AccentColor(value)),
            _ => Err(format!("Colour '{}' must have 6 or 8 hex digits", hex)),
        }
    }

    pub fn summary(&self) -> String {
        if self.is_default() {
            "Default".to_string()
        } else {
            self.to_hex()
        }
    }
}

impl Default for AccentColor {
    fn default() -> Self {
        Self::DEFAULT
    }
}
