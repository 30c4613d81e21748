//! Day/night resolution
//!
//! Decides whether the night theme applies right now:
//!
//! - **[`ThemeMode`]**: how the active theme is selected overall
//! - **[`NightVariant`]**: which signal drives `Auto` mode
//! - **[`SystemProbe`]**: host-supplied inputs (system dark flag,
//!   power-save state, custom night window)
//! - **[`NightResolver`]**: the decision itself plus the next
//!   transition instant for host-side scheduling
//!
//! The default night window is 19:00 to 06:00 and wraps midnight.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// How the engine selects the active theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    /// Always the day theme.
    Day,
    /// Always the night theme.
    Night,
    /// Day or night per the configured [`NightVariant`].
    Auto,
    /// Host-defined selection; night only when the host says so.
    Custom,
    /// Follow the platform dark-mode flag.
    System,
    /// Dynamic selection disabled.
    Disable,
    /// Driven by a remote theme payload.
    Remote,
    /// Inherit the application scope's selection.
    #[default]
    App,
}

/// The signal that drives [`ThemeMode::Auto`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NightVariant {
    /// The wall-clock night window.
    Auto,
    /// The platform dark-mode flag.
    #[default]
    System,
    /// Power-save mode.
    Battery,
    /// Host override; `false` until the host supplies one.
    Custom,
}

/// Host inputs the resolver reads.
///
/// The engine never touches platform APIs itself; hosts implement this
/// seam and the resolver stays deterministic under test.
pub trait SystemProbe {
    /// Whether the platform reports dark mode.
    fn is_system_night_mode(&self) -> bool;

    /// Whether the platform reports power-save mode.
    fn is_power_save_mode(&self) -> bool;

    /// Start of the wall-clock night window.
    fn night_time_start(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(19, 0, 0).expect("19:00 is a valid time")
    }

    /// End of the wall-clock night window.
    fn night_time_end(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(6, 0, 0).expect("06:00 is a valid time")
    }

    /// Host override for the `Custom` variant.
    fn is_custom_night(&self) -> bool {
        false
    }
}

/// Fixed probe values for tests and hosts without platform signals.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedProbe {
    pub system_night: bool,
    pub power_save: bool,
    pub custom_night: bool,
}

impl SystemProbe for FixedProbe {
    fn is_system_night_mode(&self) -> bool {
        self.system_night
    }

    fn is_power_save_mode(&self) -> bool {
        self.power_save
    }

    fn is_custom_night(&self) -> bool {
        self.custom_night
    }
}

/// Resolves a mode/variant pair against probe inputs and a clock.
pub struct NightResolver<'a> {
    probe: &'a dyn SystemProbe,
}

impl<'a> NightResolver<'a> {
    pub fn new(probe: &'a dyn SystemProbe) -> Self {
        Self { probe }
    }

    /// Whether the night theme applies at `now`.
    pub fn resolve(&self, mode: ThemeMode, variant: NightVariant, now: NaiveTime) -> bool {
        match mode {
            ThemeMode::Night => true,
            ThemeMode::Day => false,
            ThemeMode::Custom => self.probe.is_custom_night(),
            ThemeMode::System => self.probe.is_system_night_mode(),
            ThemeMode::Auto => match variant {
                NightVariant::Auto => self.in_night_window(now),
                NightVariant::System => self.probe.is_system_night_mode(),
                NightVariant::Battery => self.probe.is_power_save_mode(),
                NightVariant::Custom => self.probe.is_custom_night(),
            },
            ThemeMode::Disable | ThemeMode::Remote | ThemeMode::App => false,
        }
    }

    /// Whether `now` falls inside the night window.
    ///
    /// The window wraps midnight when `start > end`; membership is
    /// `now >= start || now < end`.
    pub fn in_night_window(&self, now: NaiveTime) -> bool {
        let start = self.probe.night_time_start();
        let end = self.probe.night_time_end();
        if start <= end {
            now >= start && now < end
        } else {
            now >= start || now < end
        }
    }

    /// The next instant the day/night answer flips, for host-side
    /// scheduling.
    ///
    /// Returns today's boundary if it is still ahead of `now`,
    /// otherwise tomorrow's.
    pub fn next_transition(&self, now: NaiveDateTime, is_night: bool) -> NaiveDateTime {
        let target = if is_night {
            self.probe.night_time_end()
        } else {
            self.probe.night_time_start()
        };
        let mut candidate = now.date().and_time(target);
        if candidate <= now {
            candidate += Duration::days(1);
        }
        candidate
    }
}
