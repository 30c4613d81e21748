//! Change classification
//!
//! A [`ChangeDelta`] records which axes of host state changed since the
//! last notification. The broker reduces it to two derived booleans:
//! `context_rebuild` (any configuration axis moved) and `recreate`
//! (the change invalidates inflated UI, not just colors).

/// Which axes changed since the last notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangeDelta {
    pub locale: bool,
    pub font_scale: bool,
    pub orientation: bool,
    pub ui_mode: bool,
    pub density: bool,
    /// Theme or palette colors changed.
    pub colors: bool,
    /// Power-save mode toggled.
    pub power_save: bool,
    /// The new power-save state, meaningful only when `power_save`.
    pub power_save_enabled: bool,
    /// Navigation bar theming toggled.
    pub navigation_bar: bool,
}

impl ChangeDelta {
    /// A colors-only change.
    pub const fn colors() -> Self {
        Self {
            colors: true,
            locale: false,
            font_scale: false,
            orientation: false,
            ui_mode: false,
            density: false,
            power_save: false,
            power_save_enabled: false,
            navigation_bar: false,
        }
    }

    /// A power-save toggle carrying the new state.
    pub const fn power_save(enabled: bool) -> Self {
        Self {
            power_save: true,
            power_save_enabled: enabled,
            locale: false,
            font_scale: false,
            orientation: false,
            ui_mode: false,
            density: false,
            colors: false,
            navigation_bar: false,
        }
    }

    /// A navigation-bar-only change.
    pub const fn navigation_bar() -> Self {
        Self {
            navigation_bar: true,
            locale: false,
            font_scale: false,
            orientation: false,
            ui_mode: false,
            density: false,
            colors: false,
            power_save: false,
            power_save_enabled: false,
        }
    }

    /// Whether the host context must be rebuilt (any configuration
    /// axis moved).
    pub const fn context_rebuild(&self) -> bool {
        self.locale || self.font_scale || self.orientation || self.ui_mode || self.density
    }

    /// Whether inflated UI must be recreated rather than recolored.
    pub const fn recreate(&self) -> bool {
        self.locale || self.ui_mode
    }

    /// Whether the delta triggers any callback at all.
    pub const fn is_empty(&self) -> bool {
        !(self.context_rebuild() || self.colors || self.power_save || self.navigation_bar)
    }
}
