//! Sparse palette ingestion and mutation
//!
//! [`DerivedPalette`] owns two maps: *original* (explicit, possibly
//! sparse entries supplied by the host or extracted from wallpaper
//! swatches) and *mutated* (the complete derived palette). `mutate`
//! recomputes *mutated* wholesale from *original* and the active
//! theme's base colors; it never merges against stale derived values.

use rustc_hash::FxHashMap;
use tinge_core::{Color, TokenColor};

use crate::roles::ColorRole;
use crate::theme::ResolvedTheme;

/// Shade factor applied when deriving the mutated palette.
pub const MUTATE_FACTOR: f32 = 0.8;

/// Wallpaper-style color swatches for palette ingestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Swatches {
    pub primary: Color,
    pub secondary: Option<Color>,
    pub tertiary: Option<Color>,
}

/// An original palette and the complete palette derived from it.
#[derive(Clone, Debug, Default)]
pub struct DerivedPalette {
    original: FxHashMap<ColorRole, TokenColor>,
    mutated: FxHashMap<ColorRole, TokenColor>,
}

impl DerivedPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn original(&self) -> &FxHashMap<ColorRole, TokenColor> {
        &self.original
    }

    pub fn mutated(&self) -> &FxHashMap<ColorRole, TokenColor> {
        &self.mutated
    }

    /// Sets one original entry. Derived state is cleared; callers
    /// re-run [`mutate`](Self::mutate) before reading mutated colors.
    pub fn put(&mut self, role: ColorRole, value: impl Into<TokenColor>) {
        self.original.insert(role, value.into());
        self.mutated.clear();
    }

    /// Replaces the original map. Derived state is cleared.
    pub fn put_all(&mut self, entries: FxHashMap<ColorRole, TokenColor>) {
        self.original = entries;
        self.mutated.clear();
    }

    /// Ingests wallpaper-style swatches: tertiary becomes the
    /// background (with surface left `Auto`), primary stays primary,
    /// secondary becomes the accent. Each dark variant rides along as
    /// `Auto` for per-role resolution.
    pub fn put_swatches(&mut self, swatches: &Swatches) {
        let mut entries = FxHashMap::default();
        if let Some(tertiary) = swatches.tertiary {
            entries.insert(ColorRole::Background, tertiary.into());
            entries.insert(ColorRole::Surface, TokenColor::Auto);
        }
        entries.insert(ColorRole::Primary, swatches.primary.into());
        entries.insert(ColorRole::PrimaryDark, TokenColor::Auto);
        if let Some(secondary) = swatches.secondary {
            entries.insert(ColorRole::Accent, secondary.into());
            entries.insert(ColorRole::AccentDark, TokenColor::Auto);
        }
        self.put_all(entries);
    }

    /// Clears both maps.
    pub fn clear(&mut self) {
        self.original.clear();
        self.mutated.clear();
    }

    /// The stored original color for a role, or `fallback` when the
    /// entry is absent or not concrete.
    pub fn original_color(&self, role: ColorRole, fallback: Color) -> Color {
        token(&self.original, role).unwrap_or(fallback)
    }

    /// The derived color for a role, or `fallback` when the entry is
    /// absent or not concrete.
    pub fn mutated_color(&self, role: ColorRole, fallback: Color) -> Color {
        token(&self.mutated, role).unwrap_or(fallback)
    }

    /// Recomputes the mutated palette from the original entries and
    /// the theme's base colors.
    ///
    /// The mutated map is replaced wholesale, never merged. The
    /// background (and an explicit primary) are shaded by
    /// [`MUTATE_FACTOR`] toward the theme's polarity; a missing
    /// primary collapses to the mutated background, a missing accent
    /// to the unshaded one. Surface and the dark variants stay `Auto`
    /// and are derived on demand during per-role resolution.
    pub fn mutate(&mut self, theme: &ResolvedTheme) {
        let shade = |color: Color| {
            if theme.is_dark() {
                color.darken(MUTATE_FACTOR)
            } else {
                color.lighten(MUTATE_FACTOR)
            }
        };

        let base_background = self.original_color(ColorRole::Background, theme.background);
        let background = shade(base_background);
        let primary = match token(&self.original, ColorRole::Primary).concrete() {
            Some(explicit) => shade(explicit),
            None => background,
        };
        let accent = token(&self.original, ColorRole::Accent)
            .concrete()
            .unwrap_or(base_background);

        self.mutated.clear();
        self.mutated
            .insert(ColorRole::Background, background.into());
        self.mutated.insert(ColorRole::Surface, TokenColor::Auto);
        self.mutated.insert(ColorRole::Primary, primary.into());
        self.mutated.insert(ColorRole::PrimaryDark, TokenColor::Auto);
        self.mutated.insert(ColorRole::Accent, accent.into());
        self.mutated.insert(ColorRole::AccentDark, TokenColor::Auto);
    }
}

fn token(map: &FxHashMap<ColorRole, TokenColor>, role: ColorRole) -> TokenColor {
    map.get(&role).copied().unwrap_or(TokenColor::Unset)
}
