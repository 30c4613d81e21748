//! Theme values and per-role resolution
//!
//! [`AppTheme`] is the serializable theme a host configures: every
//! color slot is a [`TokenColor`] so `Auto` survives persistence.
//! [`AppTheme::resolve`] layers a theme over a wider-scope default and
//! derives every `Auto` slot, producing a [`ResolvedTheme`] whose
//! colors are all concrete.

use serde::{Deserialize, Serialize};
use tinge_core::{Color, TokenColor};

use crate::error::ThemeError;
use crate::night::ThemeMode;
use crate::roles::ColorRole;

// ========== Constants ==========

/// Shift factor used to derive dark variants of primary/accent.
pub const DARK_SHIFT_FACTOR: f32 = 0.863;

/// Lighten factor used to derive a surface color from the background.
pub const SURFACE_SHIFT_FACTOR: f32 = 0.92;

/// Alpha factor applied to a derived secondary text color.
const SECONDARY_TEXT_ALPHA: f32 = 0.54;

/// Default minimum contrast ratio for background-aware correction.
pub const DEFAULT_CONTRAST_RATIO: f32 = 2.0;

/// Default font scale, percent.
pub const DEFAULT_FONT_SCALE: u8 = 100;

/// Default corner radius, density-independent pixels.
pub const DEFAULT_CORNER_RADIUS: u8 = 2;

// ========== Background awareness ==========

/// Whether colors are corrected for legibility against the background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundAware {
    Enable,
    Disable,
    /// Inherit from the wider scope.
    #[default]
    Auto,
}

// ========== AppTheme ==========

/// A serializable theme value.
///
/// Color slots default to [`TokenColor::Auto`]; resolution derives
/// them from the wider scope or from sibling colors. Round-trips
/// losslessly through serde_json, `Auto` markers included.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppTheme {
    pub background: TokenColor,
    pub surface: TokenColor,
    pub primary: TokenColor,
    pub primary_dark: TokenColor,
    pub accent: TokenColor,
    pub accent_dark: TokenColor,
    pub tint_background: TokenColor,
    pub tint_surface: TokenColor,
    pub tint_primary: TokenColor,
    pub tint_primary_dark: TokenColor,
    pub tint_accent: TokenColor,
    pub tint_accent_dark: TokenColor,
    pub text_primary: TokenColor,
    pub text_secondary: TokenColor,
    pub text_primary_inverse: TokenColor,
    pub text_secondary_inverse: TokenColor,
    pub font_scale: u8,
    pub corner_radius: u8,
    pub background_aware: BackgroundAware,
    pub contrast_ratio: f32,
    pub style: ThemeMode,
    pub version: u8,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self {
            background: TokenColor::Auto,
            surface: TokenColor::Auto,
            primary: TokenColor::Auto,
            primary_dark: TokenColor::Auto,
            accent: TokenColor::Auto,
            accent_dark: TokenColor::Auto,
            tint_background: TokenColor::Auto,
            tint_surface: TokenColor::Auto,
            tint_primary: TokenColor::Auto,
            tint_primary_dark: TokenColor::Auto,
            tint_accent: TokenColor::Auto,
            tint_accent_dark: TokenColor::Auto,
            text_primary: TokenColor::Auto,
            text_secondary: TokenColor::Auto,
            text_primary_inverse: TokenColor::Auto,
            text_secondary_inverse: TokenColor::Auto,
            font_scale: DEFAULT_FONT_SCALE,
            corner_radius: DEFAULT_CORNER_RADIUS,
            background_aware: BackgroundAware::Auto,
            contrast_ratio: DEFAULT_CONTRAST_RATIO,
            style: ThemeMode::App,
            version: 1,
        }
    }
}

impl AppTheme {
    /// A fully-specified light theme used as the outermost fallback.
    pub fn fallback() -> Self {
        Self {
            background: Color::rgb(0xFA, 0xFA, 0xFA).into(),
            primary: Color::rgb(0x3F, 0x51, 0xB5).into(),
            primary_dark: Color::rgb(0x30, 0x3F, 0x9F).into(),
            accent: Color::rgb(0xE9, 0x1E, 0x63).into(),
            background_aware: BackgroundAware::Enable,
            ..Self::default()
        }
    }

    /// Layers this theme over a wider-scope default and derives every
    /// remaining `Auto` slot.
    ///
    /// Fails with [`ThemeError::NotConfigured`] only when neither
    /// theme carries a concrete background; every other slot has a
    /// derivation rule.
    pub fn resolve(&self, defaults: &AppTheme) -> Result<ResolvedTheme, ThemeError> {
        let background = self
            .background
            .or(defaults.background)
            .concrete()
            .ok_or(ThemeError::NotConfigured)?;
        let surface = self
            .surface
            .or(defaults.surface)
            .unwrap_or_else(|| background.lighten(SURFACE_SHIFT_FACTOR));
        let primary = self.primary.or(defaults.primary).unwrap_or(background);
        let accent = self.accent.or(defaults.accent).unwrap_or(background);
        let primary_dark = self
            .primary_dark
            .or(defaults.primary_dark)
            .unwrap_or_else(|| generate_dark_color(primary));
        let accent_dark = self
            .accent_dark
            .or(defaults.accent_dark)
            .unwrap_or_else(|| generate_dark_color(accent));

        let text_primary = self
            .text_primary
            .or(defaults.text_primary)
            .unwrap_or_else(|| background.tint_color());
        let text_secondary = self
            .text_secondary
            .or(defaults.text_secondary)
            .unwrap_or_else(|| text_primary.adjust_alpha(SECONDARY_TEXT_ALPHA));
        let text_primary_inverse = self
            .text_primary_inverse
            .or(defaults.text_primary_inverse)
            .unwrap_or_else(|| text_primary.tint_color());
        let text_secondary_inverse = self
            .text_secondary_inverse
            .or(defaults.text_secondary_inverse)
            .unwrap_or_else(|| text_primary_inverse.adjust_alpha(SECONDARY_TEXT_ALPHA));

        let tint = |slot: TokenColor, default: TokenColor, base: Color| {
            slot.or(default).unwrap_or_else(|| base.tint_color())
        };
        let background_aware = match self.background_aware {
            BackgroundAware::Auto => match defaults.background_aware {
                BackgroundAware::Disable => false,
                BackgroundAware::Enable | BackgroundAware::Auto => true,
            },
            BackgroundAware::Enable => true,
            BackgroundAware::Disable => false,
        };

        Ok(ResolvedTheme {
            background,
            surface,
            primary,
            primary_dark,
            accent,
            accent_dark,
            tint_background: tint(self.tint_background, defaults.tint_background, background),
            tint_surface: tint(self.tint_surface, defaults.tint_surface, surface),
            tint_primary: tint(self.tint_primary, defaults.tint_primary, primary),
            tint_primary_dark: tint(
                self.tint_primary_dark,
                defaults.tint_primary_dark,
                primary_dark,
            ),
            tint_accent: tint(self.tint_accent, defaults.tint_accent, accent),
            tint_accent_dark: tint(self.tint_accent_dark, defaults.tint_accent_dark, accent_dark),
            text_primary,
            text_secondary,
            text_primary_inverse,
            text_secondary_inverse,
            font_scale: self.font_scale,
            corner_radius: self.corner_radius,
            background_aware,
            contrast_ratio: self.contrast_ratio,
        })
    }
}

/// Derives the dark variant of a brand color by scaling its lightness
/// down, regardless of the color's own polarity.
pub fn generate_dark_color(color: Color) -> Color {
    color.darken(DARK_SHIFT_FACTOR)
}

// ========== ResolvedTheme ==========

/// A theme with every slot concrete, ready for rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedTheme {
    pub background: Color,
    pub surface: Color,
    pub primary: Color,
    pub primary_dark: Color,
    pub accent: Color,
    pub accent_dark: Color,
    pub tint_background: Color,
    pub tint_surface: Color,
    pub tint_primary: Color,
    pub tint_primary_dark: Color,
    pub tint_accent: Color,
    pub tint_accent_dark: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_primary_inverse: Color,
    pub text_secondary_inverse: Color,
    pub font_scale: u8,
    pub corner_radius: u8,
    pub background_aware: bool,
    pub contrast_ratio: f32,
}

impl ResolvedTheme {
    /// The color for a role. Total over [`ColorRole`].
    pub fn color(&self, role: ColorRole) -> Color {
        match role {
            ColorRole::Background => self.background,
            ColorRole::Surface => self.surface,
            ColorRole::Primary => self.primary,
            ColorRole::PrimaryDark => self.primary_dark,
            ColorRole::Accent => self.accent,
            ColorRole::AccentDark => self.accent_dark,
            ColorRole::TintBackground => self.tint_background,
            ColorRole::TintSurface => self.tint_surface,
            ColorRole::TintPrimary => self.tint_primary,
            ColorRole::TintPrimaryDark => self.tint_primary_dark,
            ColorRole::TintAccent => self.tint_accent,
            ColorRole::TintAccentDark => self.tint_accent_dark,
            ColorRole::TextPrimary => self.text_primary,
            ColorRole::TextSecondary => self.text_secondary,
            ColorRole::TextPrimaryInverse => self.text_primary_inverse,
            ColorRole::TextSecondaryInverse => self.text_secondary_inverse,
        }
    }

    /// Whether this is a dark theme, judged by its background.
    pub fn is_dark(&self) -> bool {
        self.background.is_dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_round_trip_preserves_auto_markers() {
        let theme = AppTheme {
            background: Color::rgb(0x12, 0x12, 0x12).into(),
            primary: TokenColor::Auto,
            accent: TokenColor::Unset,
            font_scale: 115,
            background_aware: BackgroundAware::Disable,
            style: ThemeMode::Auto,
            ..AppTheme::default()
        };
        let json = serde_json::to_string(&theme).unwrap();
        let back: AppTheme = serde_json::from_str(&json).unwrap();
        assert_eq!(back, theme);
    }

    #[test]
    fn decode_tolerates_missing_fields() {
        let theme: AppTheme = serde_json::from_str(r##"{"background":"#FF202020"}"##).unwrap();
        assert_eq!(
            theme.background,
            TokenColor::Concrete(Color::rgb(0x20, 0x20, 0x20))
        );
        assert_eq!(theme.primary, TokenColor::Auto);
        assert_eq!(theme.font_scale, DEFAULT_FONT_SCALE);
    }

    #[test]
    fn resolve_without_any_background_fails_closed() {
        let error = AppTheme::default().resolve(&AppTheme::default());
        assert!(matches!(error, Err(ThemeError::NotConfigured)));
    }

    #[test]
    fn resolve_layers_theme_over_defaults() {
        let defaults = AppTheme::fallback();
        let theme = AppTheme {
            primary: Color::rgb(0x00, 0x96, 0x88).into(),
            ..AppTheme::default()
        };
        let resolved = theme.resolve(&defaults).unwrap();

        // Explicit slot wins; unset slots come from the defaults.
        assert_eq!(resolved.primary, Color::rgb(0x00, 0x96, 0x88));
        assert_eq!(resolved.background, Color::rgb(0xFA, 0xFA, 0xFA));
        assert_eq!(resolved.accent, Color::rgb(0xE9, 0x1E, 0x63));
    }

    #[test]
    fn auto_slots_are_derived_from_siblings() {
        let theme = AppTheme {
            background: Color::rgb(0x12, 0x12, 0x12).into(),
            primary: Color::rgb(0x3F, 0x51, 0xB5).into(),
            ..AppTheme::default()
        };
        let resolved = theme.resolve(&AppTheme::default()).unwrap();

        assert_eq!(
            resolved.primary_dark,
            generate_dark_color(Color::rgb(0x3F, 0x51, 0xB5))
        );
        // Dark background tints white.
        assert_eq!(resolved.tint_background, Color::WHITE);
        assert_eq!(resolved.text_primary, Color::WHITE);
        assert_eq!(resolved.text_primary_inverse, Color::BLACK);
        // Secondary text keeps the hue, drops the alpha.
        assert!(resolved.text_secondary.alpha() < 0xFF);
        // Accent falls back to the background when nothing supplies it.
        assert_eq!(resolved.accent, resolved.background);
        assert_eq!(resolved.accent_dark, generate_dark_color(resolved.accent));
        assert!(resolved.is_dark());
    }

    #[test]
    fn accent_dark_is_derived_like_primary_dark() {
        let accent = Color::rgb(0xE9, 0x1E, 0x63);
        let theme = AppTheme {
            background: Color::WHITE.into(),
            accent: accent.into(),
            ..AppTheme::default()
        };
        let resolved = theme.resolve(&AppTheme::default()).unwrap();

        // The dark variant is shifted, never the accent passed through.
        assert_eq!(resolved.accent_dark, generate_dark_color(accent));
        assert_ne!(resolved.accent_dark, accent);
    }

    #[test]
    fn dark_variants_of_light_colors_are_darker() {
        let light_brand = Color::rgb(0xE8, 0xEA, 0xF6);
        let dark_brand = Color::rgb(0x30, 0x3F, 0x9F);

        for brand in [light_brand, dark_brand] {
            let (_, _, before) = brand.to_hsl();
            let (_, _, after) = generate_dark_color(brand).to_hsl();
            assert!(after < before, "dark variant of {brand} got lighter");
        }
    }

    #[test]
    fn background_aware_inherits_through_auto() {
        let defaults = AppTheme {
            background: Color::WHITE.into(),
            background_aware: BackgroundAware::Disable,
            ..AppTheme::default()
        };
        let theme = AppTheme::default();
        assert!(!theme.resolve(&defaults).unwrap().background_aware);

        let theme = AppTheme {
            background_aware: BackgroundAware::Enable,
            ..AppTheme::default()
        };
        assert!(theme.resolve(&defaults).unwrap().background_aware);
    }

    #[test]
    fn color_lookup_is_total() {
        let resolved = AppTheme::fallback().resolve(&AppTheme::fallback()).unwrap();
        for role in ColorRole::ALL {
            // Every role yields a concrete color; none can panic.
            let _ = resolved.color(role);
        }
    }
}
