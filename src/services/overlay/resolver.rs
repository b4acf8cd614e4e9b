//! Overlay state resolution and application.
//!
//! Resolution picks the first enabled overlay in catalogue order. Several
//! overlays of one category can end up enabled at once (another tool changed
//! them, or an apply was interrupted); that case is logged, and the next apply
//! for the category clears all of them.

use anyhow::{anyhow, Context, Result};

use crate::models::overlay::{
    position_for_list_value, OverlayCategory, ThemeSwitch, BAKED_GREEN, CHOCO_X, DARK_VARIANTS,
    PITCH_BLACK, SOLARIZED_DARK,
};

use super::manager::OverlayManager;

fn enabled_in<M: OverlayManager + ?Sized>(
    manager: &M,
    packages: &[&'static str],
) -> Vec<&'static str> {
    packages
        .iter()
        .copied()
        .filter(|package| manager.is_enabled(package))
        .collect()
}

/// The active overlay of a category, `None` for the platform default.
pub fn enabled_overlay<M: OverlayManager + ?Sized>(
    manager: &M,
    category: OverlayCategory,
) -> Option<&'static str> {
    let enabled = enabled_in(manager, category.packages());
    if enabled.len() > 1 {
        log::warn!(
            "{} overlays enabled for {}: {:?}; using {}",
            enabled.len(),
            category.name(),
            enabled,
            enabled[0]
        );
    }
    enabled.first().copied()
}

/// Catalogue position of the active overlay of a category.
pub fn overlay_position<M: OverlayManager + ?Sized>(
    manager: &M,
    category: OverlayCategory,
) -> Option<usize> {
    let package = enabled_overlay(manager, category)?;
    category.packages().iter().position(|p| *p == package)
}

/// The active dark variant overlay, checked newest variant first.
pub fn current_dark_variant<M: OverlayManager + ?Sized>(manager: &M) -> Option<&'static str> {
    [BAKED_GREEN, CHOCO_X, SOLARIZED_DARK, PITCH_BLACK]
        .into_iter()
        .find(|package| manager.is_enabled(package))
}

/// Derives the base theme from the dark variant overlays and night mode.
pub fn current_theme_switch<M: OverlayManager + ?Sized>(manager: &M) -> ThemeSwitch {
    if let Some(switch) = current_dark_variant(manager).and_then(ThemeSwitch::from_dark_variant) {
        return switch;
    }

    match manager.night_mode() {
        crate::models::overlay::NightMode::Yes => ThemeSwitch::Dark,
        crate::models::overlay::NightMode::No => ThemeSwitch::Light,
    }
}

/// Makes `target` the only enabled overlay of `category`.
///
/// `None` restores the platform default by disabling every overlay of the
/// category.
pub fn apply_overlay<M: OverlayManager + ?Sized>(
    manager: &M,
    category: OverlayCategory,
    target: Option<&str>,
) -> Result<()> {
    if let Some(package) = target {
        if !category.contains(package) {
            return Err(anyhow!(
                "{} is not a {} overlay",
                package,
                category.name()
            ));
        }
    }

    for package in enabled_in(manager, category.packages()) {
        if Some(package) == target {
            continue;
        }
        manager
            .set_enabled(package, false)
            .with_context(|| format!("Failed to disable overlay {}", package))?;
    }

    if let Some(package) = target {
        if !manager.is_enabled(package) {
            manager
                .set_enabled(package, true)
                .with_context(|| format!("Failed to enable overlay {}", package))?;
        }
        log::info!("Applied {} overlay {}", category.name(), package);
    } else {
        log::info!("Restored default {}", category.name());
    }

    Ok(())
}

/// Applies a list preference value (`"1"` = default, `n` = entry `n - 2`).
pub fn apply_list_value<M: OverlayManager + ?Sized>(
    manager: &M,
    category: OverlayCategory,
    value: &str,
) -> Result<()> {
    let position = position_for_list_value(category, value).map_err(|e| anyhow!(e))?;
    let target = position.map(|index| category.packages()[index]);
    apply_overlay(manager, category, target)
}

/// Switches night mode and enables exactly the dark variant for `switch`.
pub fn apply_theme_switch<M: OverlayManager + ?Sized>(
    manager: &M,
    switch: ThemeSwitch,
) -> Result<()> {
    manager
        .set_night_mode(switch.night_mode())
        .context("Failed to change night mode")?;

    let wanted = switch.dark_variant();
    for package in DARK_VARIANTS {
        let enable = Some(package) == wanted;
        if manager.is_enabled(package) != enable {
            manager.set_enabled(package, enable).with_context(|| {
                format!(
                    "Failed to {} dark variant {}",
                    if enable { "enable" } else { "disable" },
                    package
                )
            })?;
        }
    }

    log::info!("Applied base theme {}", switch);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::overlay::NightMode;
    use crate::services::overlay::{InMemoryOverlayManager, MockOverlayManager};
    use mockall::predicate::eq;

    const RED: &str = "com.accents.red";
    const BLUE: &str = "com.accents.blue";

    #[test]
    fn test_default_when_nothing_enabled() {
        let manager = InMemoryOverlayManager::new();
        assert_eq!(enabled_overlay(&manager, OverlayCategory::Accent), None);
        assert_eq!(overlay_position(&manager, OverlayCategory::Accent), None);
    }

    #[test]
    fn test_first_match_wins_when_ambiguous() {
        let manager = InMemoryOverlayManager::new();
        manager.set_enabled(BLUE, true).unwrap();
        manager.set_enabled(RED, true).unwrap();

        // Red precedes blue in the catalogue
        assert_eq!(enabled_overlay(&manager, OverlayCategory::Accent), Some(RED));
        assert_eq!(overlay_position(&manager, OverlayCategory::Accent), Some(0));
    }

    #[test]
    fn test_apply_overlay_leaves_single_enabled() {
        let manager = InMemoryOverlayManager::new();
        manager.set_enabled(BLUE, true).unwrap();
        manager.set_enabled(RED, true).unwrap();

        apply_overlay(&manager, OverlayCategory::Accent, Some("com.accents.teal")).unwrap();
        assert_eq!(manager.enabled_packages(), vec!["com.accents.teal".to_string()]);
    }

    #[test]
    fn test_apply_overlay_default_clears_category_only() {
        let manager = InMemoryOverlayManager::new();
        manager.set_enabled(RED, true).unwrap();
        manager.set_enabled("com.android.theme.font.ubuntu", true).unwrap();

        apply_overlay(&manager, OverlayCategory::Accent, None).unwrap();
        assert_eq!(
            manager.enabled_packages(),
            vec!["com.android.theme.font.ubuntu".to_string()]
        );
    }

    #[test]
    fn test_apply_overlay_rejects_foreign_package() {
        let manager = InMemoryOverlayManager::new();
        let result = apply_overlay(
            &manager,
            OverlayCategory::Accent,
            Some("com.android.theme.font.ubuntu"),
        );
        assert!(result.is_err());
        assert!(manager.enabled_packages().is_empty());
    }

    #[test]
    fn test_apply_list_value() {
        let manager = InMemoryOverlayManager::new();
        apply_list_value(&manager, OverlayCategory::Font, "2").unwrap();
        assert_eq!(
            enabled_overlay(&manager, OverlayCategory::Font),
            Some(OverlayCategory::Font.packages()[0])
        );

        apply_list_value(&manager, OverlayCategory::Font, "1").unwrap();
        assert_eq!(enabled_overlay(&manager, OverlayCategory::Font), None);

        assert!(apply_list_value(&manager, OverlayCategory::Font, "99").is_err());
    }

    #[test]
    fn test_theme_switch_detection() {
        let manager = InMemoryOverlayManager::new();
        assert_eq!(current_theme_switch(&manager), ThemeSwitch::Light);

        manager.set_night_mode(NightMode::Yes).unwrap();
        assert_eq!(current_theme_switch(&manager), ThemeSwitch::Dark);

        manager.set_enabled(PITCH_BLACK, true).unwrap();
        assert_eq!(current_theme_switch(&manager), ThemeSwitch::PitchBlack);

        manager.set_enabled(BAKED_GREEN, true).unwrap();
        assert_eq!(current_theme_switch(&manager), ThemeSwitch::BakedGreen);
    }

    #[test]
    fn test_apply_theme_switch_enables_one_variant() {
        let manager = InMemoryOverlayManager::new();
        manager.set_enabled(PITCH_BLACK, true).unwrap();

        apply_theme_switch(&manager, ThemeSwitch::SolarizedDark).unwrap();
        assert_eq!(manager.enabled_packages(), vec![SOLARIZED_DARK.to_string()]);
        assert_eq!(manager.night_mode(), NightMode::Yes);
        assert_eq!(current_theme_switch(&manager), ThemeSwitch::SolarizedDark);

        apply_theme_switch(&manager, ThemeSwitch::Light).unwrap();
        assert!(manager.enabled_packages().is_empty());
        assert_eq!(manager.night_mode(), NightMode::No);
    }

    #[test]
    fn test_apply_overlay_propagates_platform_failure() {
        let mut manager = MockOverlayManager::new();
        manager.expect_is_enabled().return_const(false);
        manager
            .expect_set_enabled()
            .with(eq(RED), eq(true))
            .times(1)
            .returning(|_, _| Err(anyhow!("service unavailable")));

        let err = apply_overlay(&manager, OverlayCategory::Accent, Some(RED)).unwrap_err();
        assert!(format!("{:#}", err).contains("service unavailable"));
    }

    #[test]
    fn test_apply_overlay_skips_already_enabled_target() {
        let mut manager = MockOverlayManager::new();
        manager
            .expect_is_enabled()
            .returning(|package| package == RED);
        manager.expect_set_enabled().never();

        apply_overlay(&manager, OverlayCategory::Accent, Some(RED)).unwrap();
    }
}
