//! Background-aware color resolution
//!
//! Decides which color is actually drawn for an element, given its
//! candidate color, the background behind it, a precomputed tint and
//! the background-aware flag. Pure functions; safe from any thread,
//! though results normally feed render state on the UI thread.

use tinge_core::Color;

use crate::theme::ResolvedTheme;

/// The color to draw for an element with candidate `candidate` on
/// `background`.
///
/// With `background_aware` off the candidate passes through untouched.
/// Otherwise the decision runs on polarity: a candidate matching the
/// background's polarity is kept; a mismatched one is replaced by
/// `tint` when the tint matches the background, and by the candidate's
/// own tint color as the last resort.
pub fn resolve(background: Color, candidate: Color, tint: Color, background_aware: bool) -> Color {
    if !background_aware {
        return candidate;
    }
    if background.is_dark() == candidate.is_dark() {
        return candidate;
    }
    if tint.is_dark() == background.is_dark() {
        tint
    } else {
        candidate.tint_color()
    }
}

/// [`resolve`] for elements that are themselves tint colors, such as
/// icons on a colored fill. Same decision with the roles of
/// `candidate` and `tint` swapped.
pub fn resolve_tint(
    background: Color,
    candidate: Color,
    tint: Color,
    background_aware: bool,
) -> Color {
    if !background_aware {
        return tint;
    }
    if background.is_dark() == tint.is_dark() {
        return tint;
    }
    if candidate.is_dark() == background.is_dark() {
        candidate
    } else {
        tint.tint_color()
    }
}

/// Adjusts `color` until it reaches `min_ratio` against
/// `contrast_with`, best effort.
pub fn with_contrast_ratio(color: Color, contrast_with: Color, min_ratio: f32) -> Color {
    color.contrast_color(contrast_with, min_ratio)
}

/// [`with_contrast_ratio`] reading the minimum ratio from the theme's
/// contrast setting.
pub fn with_theme_contrast(color: Color, contrast_with: Color, theme: &ResolvedTheme) -> Color {
    color.contrast_color(contrast_with, theme.contrast_ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::AppTheme;

    const NEAR_BLACK: Color = Color::rgb(0x20, 0x20, 0x20);
    const NEAR_WHITE: Color = Color::rgb(0xEE, 0xEE, 0xEE);

    #[test]
    fn opt_out_passes_candidate_through() {
        assert_eq!(
            resolve(Color::WHITE, NEAR_BLACK, Color::BLACK, false),
            NEAR_BLACK
        );
        assert_eq!(
            resolve_tint(Color::WHITE, NEAR_BLACK, Color::BLACK, false),
            Color::BLACK
        );
    }

    #[test]
    fn matching_polarity_keeps_the_candidate() {
        assert_eq!(
            resolve(Color::WHITE, NEAR_WHITE, Color::BLACK, true),
            NEAR_WHITE
        );
        assert_eq!(
            resolve(Color::BLACK, NEAR_BLACK, Color::WHITE, true),
            NEAR_BLACK
        );
    }

    #[test]
    fn mismatch_prefers_a_tint_matching_the_background() {
        // Dark candidate on white; the light tint matches the
        // background's polarity and wins.
        assert_eq!(
            resolve(Color::WHITE, NEAR_BLACK, NEAR_WHITE, true),
            NEAR_WHITE
        );
    }

    #[test]
    fn white_background_near_black_candidate_scenario() {
        let background = Color::WHITE;
        let candidate = NEAR_BLACK;
        assert!(!background.is_dark());
        assert!(candidate.is_dark());

        // Both the candidate and the supplied tint mismatch the
        // background, so the candidate's own tint color is computed.
        let result = resolve(background, candidate, NEAR_BLACK, true);
        assert_eq!(result, candidate.tint_color());
        assert_eq!(background.is_dark(), result.is_dark());
    }

    #[test]
    fn tint_resolution_mirrors_the_decision() {
        // Tint matches the background's polarity: kept as-is.
        assert_eq!(
            resolve_tint(Color::WHITE, NEAR_BLACK, NEAR_WHITE, true),
            NEAR_WHITE
        );
        // Tint mismatches but the candidate matches: candidate wins.
        assert_eq!(
            resolve_tint(Color::WHITE, NEAR_WHITE, NEAR_BLACK, true),
            NEAR_WHITE
        );
        // Both mismatch: fall back to the tint's own tint color.
        assert_eq!(
            resolve_tint(Color::BLACK, NEAR_WHITE, NEAR_WHITE, true),
            NEAR_WHITE.tint_color()
        );
    }

    #[test]
    fn contrast_correction_never_reduces_contrast() {
        let pairs = [
            (Color::WHITE, Color::rgb(0xCC, 0xCC, 0xCC)),
            (Color::BLACK, Color::rgb(0x30, 0x30, 0x30)),
            (Color::rgb(0x3F, 0x51, 0xB5), Color::rgb(0x30, 0x3F, 0x9F)),
        ];
        for (background, color) in pairs {
            let before = color.contrast_ratio(background);
            let after = with_contrast_ratio(color, background, 4.5).contrast_ratio(background);
            assert!(
                after >= before,
                "contrast got worse against {background}: {before} -> {after}"
            );
        }
    }

    #[test]
    fn theme_overload_reads_the_configured_ratio() {
        let theme = AppTheme {
            background: Color::WHITE.into(),
            contrast_ratio: 4.5,
            ..AppTheme::default()
        };
        let resolved = theme.resolve(&AppTheme::fallback()).unwrap();

        let color = Color::rgb(0xBB, 0xBB, 0xBB);
        let corrected = with_theme_contrast(color, Color::WHITE, &resolved);
        assert_eq!(corrected, with_contrast_ratio(color, Color::WHITE, 4.5));
        assert!(corrected.contrast_ratio(Color::WHITE) > color.contrast_ratio(Color::WHITE));
    }
}
