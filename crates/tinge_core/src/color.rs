//! Packed ARGB color and pure colorimetric math
//!
//! All functions here are stateless. Darken/lighten operate on HSL
//! lightness so shades stay perceptually even across hues; contrast
//! uses the WCAG relative-luminance ratio.

use std::fmt;
use std::str::FromStr;

/// Maximum adjustment passes for [`Color::contrast_color`] before the
/// best achieved value is returned as-is.
const CONTRAST_STEPS: u32 = 24;

/// Per-step lightness factor used while searching for a contrasting
/// shade.
const CONTRAST_STEP_FACTOR: f32 = 0.9;

/// A packed 32-bit ARGB color (`0xAARRGGBB`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const TRANSPARENT: Color = Color(0x0000_0000);

    /// Create an opaque color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(0xFF, r, g, b)
    }

    /// Create a color from 8-bit channels.
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Create a color from a packed `0xAARRGGBB` value.
    pub const fn from_argb(value: u32) -> Self {
        Self(value)
    }

    /// The packed `0xAARRGGBB` value.
    pub const fn to_argb(self) -> u32 {
        self.0
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    // ========== Polarity & Luminance ==========

    /// Whether this color reads as dark.
    ///
    /// Uses the ITU-R BT.601 brightness weighting with a mid-point
    /// threshold, ignoring alpha.
    pub fn is_dark(self) -> bool {
        let brightness = (299 * self.red() as u32
            + 587 * self.green() as u32
            + 114 * self.blue() as u32) as f32
            / (1000.0 * 255.0);
        brightness < 0.5
    }

    /// WCAG relative luminance in `[0, 1]`, ignoring alpha.
    pub fn luminance(self) -> f32 {
        fn channel(value: u8) -> f32 {
            let c = value as f32 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * channel(self.red()) + 0.7152 * channel(self.green()) + 0.0722 * channel(self.blue())
    }

    /// WCAG contrast ratio between two colors.
    ///
    /// Symmetric in its arguments and always `>= 1.0`.
    pub fn contrast_ratio(self, other: Color) -> f32 {
        let a = self.luminance() + 0.05;
        let b = other.luminance() + 0.05;
        if a > b {
            a / b
        } else {
            b / a
        }
    }

    // ========== Shade Generation ==========

    /// Move this color toward black by scaling HSL lightness by
    /// `factor`.
    ///
    /// `factor` is in `(0, 1]`; `1.0` leaves the color unchanged and
    /// smaller values shift further. Alpha is preserved.
    pub fn darken(self, factor: f32) -> Color {
        let (h, s, l) = self.to_hsl();
        Self::from_hsl(h, s, l * factor.clamp(0.0, 1.0), self.alpha())
    }

    /// Move this color toward white by scaling the HSL lightness gap
    /// to `1.0` by `factor`.
    ///
    /// Same factor semantics as [`Color::darken`]. Alpha is preserved.
    pub fn lighten(self, factor: f32) -> Color {
        let (h, s, l) = self.to_hsl();
        Self::from_hsl(h, s, 1.0 - (1.0 - l) * factor.clamp(0.0, 1.0), self.alpha())
    }

    /// Darken a dark color or lighten a light one, generating a shade
    /// of the same polarity.
    pub fn shift(self, dark_factor: f32, light_factor: f32) -> Color {
        if self.is_dark() {
            self.darken(dark_factor)
        } else {
            self.lighten(light_factor)
        }
    }

    // ========== Alpha ==========

    /// Scale the alpha channel by `factor` in `[0, 1]`.
    pub fn adjust_alpha(self, factor: f32) -> Color {
        let alpha = (self.alpha() as f32 * factor.clamp(0.0, 1.0)).round() as u8;
        self.set_alpha(alpha)
    }

    /// Replace the alpha channel.
    pub const fn set_alpha(self, alpha: u8) -> Color {
        Self(((alpha as u32) << 24) | (self.0 & 0x00FF_FFFF))
    }

    // ========== Contrast Correction ==========

    /// Adjust this color until it reaches `min_ratio` against
    /// `background`, or return the best shade achieved within the step
    /// budget.
    ///
    /// The adjustment direction is chosen by the background's
    /// polarity: light backgrounds push the color darker, dark
    /// backgrounds push it lighter. Never fails; a visually imperfect
    /// color beats no color.
    pub fn contrast_color(self, background: Color, min_ratio: f32) -> Color {
        let mut best = self;
        let mut best_ratio = self.contrast_ratio(background);
        let mut current = self;

        for _ in 0..CONTRAST_STEPS {
            if best_ratio >= min_ratio {
                break;
            }

            current = if background.is_dark() {
                current.lighten(CONTRAST_STEP_FACTOR)
            } else {
                current.darken(CONTRAST_STEP_FACTOR)
            };

            let ratio = current.contrast_ratio(background);
            if ratio > best_ratio {
                best = current;
                best_ratio = ratio;
            }
        }

        best
    }

    /// Black or white, whichever contrasts more against this color.
    ///
    /// The safe default for foreground content drawn on top of this
    /// color.
    pub fn tint_color(self) -> Color {
        if Color::BLACK.contrast_ratio(self) >= Color::WHITE.contrast_ratio(self) {
            Color::BLACK
        } else {
            Color::WHITE
        }
    }

    // ========== HSL ==========

    /// Convert to `(hue, saturation, lightness)` with hue in degrees.
    pub fn to_hsl(self) -> (f32, f32, f32) {
        let r = self.red() as f32 / 255.0;
        let g = self.green() as f32 / 255.0;
        let b = self.blue() as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let l = (max + min) / 2.0;

        if delta == 0.0 {
            return (0.0, 0.0, l);
        }

        let s = delta / (1.0 - (2.0 * l - 1.0).abs());
        let h = if max == r {
            60.0 * (((g - b) / delta).rem_euclid(6.0))
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        (h, s, l)
    }

    /// Build a color from HSL components and an explicit alpha.
    pub fn from_hsl(h: f32, s: f32, l: f32, alpha: u8) -> Color {
        let l = l.clamp(0.0, 1.0);
        let s = s.clamp(0.0, 1.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h_prime = h.rem_euclid(360.0) / 60.0;
        let x = c * (1.0 - (h_prime.rem_euclid(2.0) - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h_prime as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Color::argb(
            alpha,
            ((r + m) * 255.0).round() as u8,
            ((g + m) * 255.0).round() as u8,
            ((b + m) * 255.0).round() as u8,
        )
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

/// Error returned when a color string cannot be parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseColorError;

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected #RRGGBB or #AARRGGBB")
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse `#RRGGBB` (opaque) or `#AARRGGBB`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').ok_or(ParseColorError)?;
        let value = u32::from_str_radix(hex, 16).map_err(|_| ParseColorError)?;

        match hex.len() {
            6 => Ok(Color(0xFF00_0000 | value)),
            8 => Ok(Color(value)),
            _ => Err(ParseColorError),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_accessors_round_trip() {
        let color = Color::argb(0x80, 0x12, 0x34, 0x56);
        assert_eq!(color.alpha(), 0x80);
        assert_eq!(color.red(), 0x12);
        assert_eq!(color.green(), 0x34);
        assert_eq!(color.blue(), 0x56);
        assert_eq!(Color::from_argb(color.to_argb()), color);
    }

    #[test]
    fn polarity_of_extremes() {
        assert!(Color::BLACK.is_dark());
        assert!(!Color::WHITE.is_dark());
        assert!(Color::from_argb(0xFF20_2020).is_dark());
        assert!(!Color::from_argb(0xFFEE_EEEE).is_dark());
    }

    #[test]
    fn contrast_ratio_is_symmetric_and_bounded() {
        let a = Color::rgb(0x3F, 0x51, 0xB5);
        let b = Color::rgb(0xEE, 0xEE, 0xEE);
        let forward = a.contrast_ratio(b);
        let backward = b.contrast_ratio(a);

        assert!((forward - backward).abs() < 1e-6);
        assert!(forward >= 1.0);
        assert!((Color::BLACK.contrast_ratio(Color::WHITE) - 21.0).abs() < 0.1);
        assert!((Color::WHITE.contrast_ratio(Color::WHITE) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn darken_and_lighten_move_lightness() {
        let base = Color::rgb(0x80, 0x80, 0x80);
        let darker = base.darken(0.5);
        let lighter = base.lighten(0.5);

        assert!(darker.to_hsl().2 < base.to_hsl().2);
        assert!(lighter.to_hsl().2 > base.to_hsl().2);
        // A factor of 1.0 is the identity.
        assert_eq!(base.darken(1.0), base);
        assert_eq!(base.lighten(1.0), base);
    }

    #[test]
    fn shift_follows_the_color_polarity() {
        let dark = Color::rgb(0x20, 0x20, 0x20);
        let light = Color::rgb(0xEE, 0xEE, 0xEE);

        assert_eq!(dark.shift(0.8, 0.6), dark.darken(0.8));
        assert_eq!(light.shift(0.8, 0.6), light.lighten(0.6));
    }

    #[test]
    fn shade_operations_preserve_alpha() {
        let translucent = Color::argb(0x40, 0x20, 0x60, 0xA0);
        assert_eq!(translucent.darken(0.8).alpha(), 0x40);
        assert_eq!(translucent.lighten(0.8).alpha(), 0x40);
    }

    #[test]
    fn alpha_adjustments() {
        let color = Color::rgb(0x10, 0x20, 0x30);
        assert_eq!(color.adjust_alpha(0.5).alpha(), 0x80);
        assert_eq!(color.set_alpha(0x33).alpha(), 0x33);
        assert_eq!(color.set_alpha(0x33).red(), 0x10);
    }

    #[test]
    fn contrast_color_never_reduces_contrast() {
        let backgrounds = [
            Color::WHITE,
            Color::BLACK,
            Color::rgb(0x30, 0x3F, 0x9F),
            Color::rgb(0xFA, 0xFA, 0xFA),
        ];
        let candidates = [
            Color::rgb(0xE9, 0x1E, 0x63),
            Color::rgb(0xDD, 0xDD, 0xDD),
            Color::rgb(0x22, 0x22, 0x22),
        ];

        for background in backgrounds {
            for candidate in candidates {
                let before = candidate.contrast_ratio(background);
                let after = candidate.contrast_color(background, 4.5).contrast_ratio(background);
                assert!(
                    after >= before - 1e-6,
                    "bg={background} fg={candidate}: {after} < {before}"
                );
            }
        }
    }

    #[test]
    fn contrast_color_degrades_gracefully() {
        // Mid-gray on mid-gray can never reach an extreme ratio;
        // the call must still return the best shade it found.
        let background = Color::rgb(0x80, 0x80, 0x80);
        let result = Color::rgb(0x80, 0x80, 0x80).contrast_color(background, 21.0);
        assert!(result.contrast_ratio(background) > 1.0);
    }

    #[test]
    fn tint_color_picks_the_stronger_extreme() {
        assert_eq!(Color::WHITE.tint_color(), Color::BLACK);
        assert_eq!(Color::BLACK.tint_color(), Color::WHITE);
        assert_eq!(Color::from_argb(0xFF20_2020).tint_color(), Color::WHITE);
        assert_eq!(Color::from_argb(0xFFEE_EEEE).tint_color(), Color::BLACK);
    }

    #[test]
    fn hsl_round_trip_is_close() {
        for argb in [0xFF3F_51B5u32, 0xFFE9_1E63, 0xFF40_A02B, 0xFF12_3456] {
            let color = Color::from_argb(argb);
            let (h, s, l) = color.to_hsl();
            let round = Color::from_hsl(h, s, l, color.alpha());

            assert!((round.red() as i32 - color.red() as i32).abs() <= 1);
            assert!((round.green() as i32 - color.green() as i32).abs() <= 1);
            assert!((round.blue() as i32 - color.blue() as i32).abs() <= 1);
        }
    }

    #[test]
    fn parse_and_display_round_trip() {
        assert_eq!("#FF3F51B5".parse::<Color>().unwrap(), Color::rgb(0x3F, 0x51, 0xB5));
        assert_eq!("#3F51B5".parse::<Color>().unwrap(), Color::rgb(0x3F, 0x51, 0xB5));
        assert_eq!("zzz".parse::<Color>(), Err(ParseColorError));
        assert_eq!("#12345".parse::<Color>(), Err(ParseColorError));

        let color = Color::argb(0x80, 0xAB, 0xCD, 0xEF);
        assert_eq!(color.to_string().parse::<Color>().unwrap(), color);
    }
}
