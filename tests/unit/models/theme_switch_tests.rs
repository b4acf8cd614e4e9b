// Unit tests for the base theme switch values
// Covers the stored list values and their overlay mapping

use overlay_themes::models::overlay::{
    NightMode, ThemeSwitch, BAKED_GREEN, CHOCO_X, PITCH_BLACK, SOLARIZED_DARK,
};
use test_case::test_case;

#[test_case(ThemeSwitch::Light, "1" ; "light")]
#[test_case(ThemeSwitch::Dark, "2" ; "dark")]
#[test_case(ThemeSwitch::PitchBlack, "3" ; "pitch black")]
#[test_case(ThemeSwitch::SolarizedDark, "4" ; "solarized dark")]
#[test_case(ThemeSwitch::ChocoX, "5" ; "choco x")]
#[test_case(ThemeSwitch::BakedGreen, "6" ; "baked green")]
fn test_value_matches_list_entry(switch: ThemeSwitch, value: &str) {
    assert_eq!(switch.value(), value);
    assert_eq!(ThemeSwitch::from_value(value), Some(switch));
}

#[test_case("0")]
#[test_case("7")]
#[test_case("")]
#[test_case("dark")]
fn test_unknown_values_rejected(value: &str) {
    assert_eq!(ThemeSwitch::from_value(value), None);
}

#[test_case(ThemeSwitch::Light, NightMode::No, None)]
#[test_case(ThemeSwitch::Dark, NightMode::Yes, None)]
#[test_case(ThemeSwitch::PitchBlack, NightMode::Yes, Some(PITCH_BLACK))]
#[test_case(ThemeSwitch::SolarizedDark, NightMode::Yes, Some(SOLARIZED_DARK))]
#[test_case(ThemeSwitch::ChocoX, NightMode::Yes, Some(CHOCO_X))]
#[test_case(ThemeSwitch::BakedGreen, NightMode::Yes, Some(BAKED_GREEN))]
fn test_overlay_mapping(switch: ThemeSwitch, mode: NightMode, variant: Option<&str>) {
    assert_eq!(switch.night_mode(), mode);
    assert_eq!(switch.dark_variant(), variant);
    if let Some(package) = variant {
        assert_eq!(ThemeSwitch::from_dark_variant(package), Some(switch));
    }
}

#[test]
fn test_all_is_in_value_order() {
    let values: Vec<&str> = ThemeSwitch::all().iter().map(|s| s.value()).collect();
    assert_eq!(values, vec!["1", "2", "3", "4", "5", "6"]);
}
