//! Color roles addressed by the theme and palette layers

use serde::{Deserialize, Serialize};

/// A named color slot in a resolved theme.
///
/// The set is closed: every role a consumer can ask for resolves to a
/// concrete color, so lookups cannot miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRole {
    Background,
    Surface,
    Primary,
    PrimaryDark,
    Accent,
    AccentDark,
    TintBackground,
    TintSurface,
    TintPrimary,
    TintPrimaryDark,
    TintAccent,
    TintAccentDark,
    TextPrimary,
    TextSecondary,
    TextPrimaryInverse,
    TextSecondaryInverse,
}

impl ColorRole {
    /// Every role, in resolution order.
    pub const ALL: [ColorRole; 16] = [
        ColorRole::Background,
        ColorRole::Surface,
        ColorRole::Primary,
        ColorRole::PrimaryDark,
        ColorRole::Accent,
        ColorRole::AccentDark,
        ColorRole::TintBackground,
        ColorRole::TintSurface,
        ColorRole::TintPrimary,
        ColorRole::TintPrimaryDark,
        ColorRole::TintAccent,
        ColorRole::TintAccentDark,
        ColorRole::TextPrimary,
        ColorRole::TextSecondary,
        ColorRole::TextPrimaryInverse,
        ColorRole::TextSecondaryInverse,
    ];

    /// The tint counterpart of a base role, if it has one.
    pub const fn tint(self) -> Option<ColorRole> {
        match self {
            ColorRole::Background => Some(ColorRole::TintBackground),
            ColorRole::Surface => Some(ColorRole::TintSurface),
            ColorRole::Primary => Some(ColorRole::TintPrimary),
            ColorRole::PrimaryDark => Some(ColorRole::TintPrimaryDark),
            ColorRole::Accent => Some(ColorRole::TintAccent),
            ColorRole::AccentDark => Some(ColorRole::TintAccentDark),
            _ => None,
        }
    }
}
