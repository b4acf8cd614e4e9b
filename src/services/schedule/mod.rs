// Schedule service
// Persists the day/night schedule and applies the theme that is due

use anyhow::{anyhow, Context, Result};
use chrono::NaiveTime;

use crate::models::overlay::ThemeSwitch;
use crate::models::preferences::PreferenceKey;
use crate::models::schedule::ThemeSchedule;
use crate::services::overlay::{apply_theme_switch, current_theme_switch, OverlayManager};
use crate::services::preferences::PreferenceService;

const SCHEDULE_OFF: &str = "1";
const SCHEDULE_ON: &str = "2";
const TIME_FORMAT: &str = "%H:%M";

pub struct ScheduleService<'a> {
    prefs: PreferenceService<'a>,
}

impl<'a> ScheduleService<'a> {
    pub fn new(prefs: PreferenceService<'a>) -> Self {
        Self { prefs }
    }

    /// Reads the stored schedule; unset fields take their defaults.
    pub fn load(&self) -> Result<ThemeSchedule> {
        let defaults = ThemeSchedule::default();

        let enabled = self.prefs.get_or(PreferenceKey::Schedule, SCHEDULE_OFF)? != SCHEDULE_OFF;
        let start = self.load_time(PreferenceKey::ScheduleStartTime, defaults.start)?;
        let end = self.load_time(PreferenceKey::ScheduleEndTime, defaults.end)?;
        let start_theme = self.load_theme(PreferenceKey::ScheduleStartTheme, defaults.start_theme)?;
        let end_theme = self.load_theme(PreferenceKey::ScheduleEndTheme, defaults.end_theme)?;

        Ok(ThemeSchedule {
            enabled,
            start,
            start_theme,
            end,
            end_theme,
        })
    }

    fn load_time(&self, key: PreferenceKey, default: NaiveTime) -> Result<NaiveTime> {
        match self.prefs.get(key)? {
            Some(value) => NaiveTime::parse_from_str(&value, TIME_FORMAT)
                .with_context(|| format!("Invalid time '{}' stored for {}", value, key)),
            None => Ok(default),
        }
    }

    fn load_theme(&self, key: PreferenceKey, default: ThemeSwitch) -> Result<ThemeSwitch> {
        match self.prefs.get(key)? {
            Some(value) => ThemeSwitch::from_value(&value)
                .ok_or_else(|| anyhow!("Invalid theme '{}' stored for {}", value, key)),
            None => Ok(default),
        }
    }

    pub fn save(&self, schedule: &ThemeSchedule) -> Result<()> {
        schedule.validate().map_err(|e| anyhow!(e))?;

        let start = schedule.start.format(TIME_FORMAT).to_string();
        let end = schedule.end.format(TIME_FORMAT).to_string();
        self.prefs.set(PreferenceKey::ScheduleStartTime, &start)?;
        self.prefs
            .set(PreferenceKey::ScheduleStartTheme, schedule.start_theme.value())?;
        self.prefs.set(PreferenceKey::ScheduleEndTime, &end)?;
        self.prefs
            .set(PreferenceKey::ScheduleEndTheme, schedule.end_theme.value())?;
        self.prefs.set(
            PreferenceKey::Schedule,
            if schedule.enabled { SCHEDULE_ON } else { SCHEDULE_OFF },
        )?;

        log::info!(
            "Saved theme schedule: {} at {}, {} at {} ({})",
            schedule.start_theme,
            start,
            schedule.end_theme,
            end,
            if schedule.enabled { "on" } else { "off" }
        );
        Ok(())
    }

    /// Turns scheduling off, keeping the configured times.
    pub fn disable(&self) -> Result<()> {
        self.prefs.set(PreferenceKey::Schedule, SCHEDULE_OFF)
    }

    /// Applies the scheduled theme for `now` if it is not already active.
    ///
    /// Returns the theme that was applied, `None` when nothing changed.
    pub fn apply_due<M: OverlayManager + ?Sized>(
        &self,
        manager: &M,
        now: NaiveTime,
    ) -> Result<Option<ThemeSwitch>> {
        let schedule = self.load()?;
        let Some(due) = schedule.theme_at(now) else {
            return Ok(None);
        };

        if current_theme_switch(manager) == due {
            return Ok(None);
        }

        apply_theme_switch(manager, due)?;
        self.prefs.set_quiet(PreferenceKey::ThemeSwitch, due.value())?;
        log::info!("Scheduled switch to {} at {}", due, now.format(TIME_FORMAT));
        Ok(Some(due))
    }
}
