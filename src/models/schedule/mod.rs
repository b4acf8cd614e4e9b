//! Day/night theme schedule.
//!
//! A schedule switches to `start_theme` at `start` and back to `end_theme` at
//! `end` every day. The window may wrap past midnight. Delivering the actual
//! wake-ups is left to the host; this type only answers "which theme should be
//! active now" and "when is the next switch".

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::models::overlay::ThemeSwitch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSchedule {
    pub enabled: bool,
    pub start: NaiveTime,
    pub start_theme: ThemeSwitch,
    pub end: NaiveTime,
    pub end_theme: ThemeSwitch,
}

impl Default for ThemeSchedule {
    fn default() -> Self {
        Self {
            enabled: false,
            start: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or(NaiveTime::MIN),
            start_theme: ThemeSwitch::Dark,
            end: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or(NaiveTime::MIN),
            end_theme: ThemeSwitch::Light,
        }
    }
}

impl ThemeSchedule {
    pub fn new(
        start: NaiveTime,
        start_theme: ThemeSwitch,
        end: NaiveTime,
        end_theme: ThemeSwitch,
    ) -> Self {
        Self {
            enabled: true,
            start,
            start_theme,
            end,
            end_theme,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.start == self.end {
            return Err("Schedule start and end times must differ".to_string());
        }
        if self.start_theme == self.end_theme {
            return Err("Schedule start and end themes must differ".to_string());
        }
        Ok(())
    }

    /// Whether `time` falls inside the start..end window.
    pub fn in_start_window(&self, time: NaiveTime) -> bool {
        if self.start < self.end {
            time >= self.start && time < self.end
        } else {
            time >= self.start || time < self.end
        }
    }

    /// The theme that should be active at `time`, `None` when disabled.
    pub fn theme_at(&self, time: NaiveTime) -> Option<ThemeSwitch> {
        if !self.enabled {
            return None;
        }
        if self.in_start_window(time) {
            Some(self.start_theme)
        } else {
            Some(self.end_theme)
        }
    }

    /// The next switch strictly after `now`.
    pub fn next_transition(&self, now: NaiveDateTime) -> Option<(NaiveDateTime, ThemeSwitch)> {
        if !self.enabled {
            return None;
        }

        let next_start = next_occurrence(now, self.start);
        let next_end = next_occurrence(now, self.end);

        if next_start <= next_end {
            Some((next_start, self.start_theme))
        } else {
            Some((next_end, self.end_theme))
        }
    }

    pub fn summary(&self, now: NaiveDateTime) -> String {
        match self.next_transition(now) {
            None => "Scheduled theme switching is off".to_string(),
            Some((at, theme)) => {
                let day = if at.date() == now.date() {
                    "today"
                } else {
                    "tomorrow"
                };
                format!("{} {} at {}", theme, day, at.format("%H:%M"))
            }
        }
    }
}

fn next_occurrence(now: NaiveDateTime, time: NaiveTime) -> NaiveDateTime {
    let today = now.date().and_time(time);
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}
