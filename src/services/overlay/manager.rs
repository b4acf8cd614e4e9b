use std::collections::HashSet;
use std::sync::Mutex;

use anyhow::{anyhow, Result};

use crate::models::overlay::NightMode;

/// Access to the platform overlay service.
///
/// The host supplies the real implementation; enabling an overlay is
/// expected to take effect asynchronously on the device.
#[cfg_attr(test, mockall::automock)]
pub trait OverlayManager {
    fn is_enabled(&self, package: &str) -> bool;

    fn set_enabled(&self, package: &str, enabled: bool) -> Result<()>;

    fn night_mode(&self) -> NightMode;

    fn set_night_mode(&self, mode: NightMode) -> Result<()>;
}

#[derive(Debug)]
struct OverlayState {
    enabled: HashSet<String>,
    night_mode: NightMode,
}

/// Map-backed overlay manager for hosts without a platform service and for tests.
#[derive(Debug)]
pub struct InMemoryOverlayManager {
    state: Mutex<OverlayState>,
    installed: Option<HashSet<String>>,
}

impl Default for InMemoryOverlayManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryOverlayManager {
    /// Every package is considered installed.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(OverlayState {
                enabled: HashSet::new(),
                night_mode: NightMode::No,
            }),
            installed: None,
        }
    }

    /// Only the given packages can be enabled; others fail like a missing
    /// package would on a device.
    pub fn with_installed<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            installed: Some(packages.into_iter().map(Into::into).collect()),
            ..Self::new()
        }
    }

    /// Currently enabled packages, sorted.
    pub fn enabled_packages(&self) -> Vec<String> {
        let mut enabled: Vec<String> = self
            .state
            .lock()
            .map(|state| state.enabled.iter().cloned().collect())
            .unwrap_or_default();
        enabled.sort();
        enabled
    }
}

impl OverlayManager for InMemoryOverlayManager {
    fn is_enabled(&self, package: &str) -> bool {
        self.state
            .lock()
            .map(|state| state.enabled.contains(package))
            .unwrap_or(false)
    }

    fn set_enabled(&self, package: &str, enabled: bool) -> Result<()> {
        if enabled {
            if let Some(installed) = &self.installed {
                if !installed.contains(package) {
                    return Err(anyhow!("Overlay {} is not installed", package));
                }
            }
        }

        let mut state = self
            .state
            .lock()
            .map_err(|_| anyhow!("Overlay state lock poisoned"))?;
        if enabled {
            state.enabled.insert(package.to_string());
        } else {
            state.enabled.remove(package);
        }
        Ok(())
    }

    fn night_mode(&self) -> NightMode {
        self.state
            .lock()
            .map(|state| state.night_mode)
            .unwrap_or(NightMode::No)
    }

    fn set_night_mode(&self, mode: NightMode) -> Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| anyhow!("Overlay state lock poisoned"))?;
        state.night_mode = mode;
        Ok(())
    }
}
