//! Tagged color values for theme tokens
//!
//! A theme field is not always a concrete color: it may be `Auto`
//! (resolve it from the wider scope or derive it) or `Unset` (no
//! applicable color). Making these states a tagged type keeps
//! unresolved markers out of any API that promises a drawable color.

use crate::color::Color;

/// A theme color slot: concrete, derivable, or absent.
///
/// `Auto` and `Unset` are intermediate markers only; resolution always
/// produces a plain [`Color`] before a value reaches a consumer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TokenColor {
    /// An explicit ARGB value.
    Concrete(Color),
    /// Not explicitly set; resolve from context.
    #[default]
    Auto,
    /// No applicable color.
    Unset,
}

impl TokenColor {
    pub const fn is_concrete(self) -> bool {
        matches!(self, TokenColor::Concrete(_))
    }

    pub const fn is_auto(self) -> bool {
        matches!(self, TokenColor::Auto)
    }

    pub const fn is_unset(self) -> bool {
        matches!(self, TokenColor::Unset)
    }

    /// The concrete color, if any.
    pub const fn concrete(self) -> Option<Color> {
        match self {
            TokenColor::Concrete(color) => Some(color),
            _ => None,
        }
    }

    /// The concrete color, or `fallback` for `Auto`/`Unset`.
    pub fn unwrap_or(self, fallback: Color) -> Color {
        match self {
            TokenColor::Concrete(color) => color,
            _ => fallback,
        }
    }

    /// This value if concrete, otherwise `other`.
    pub fn or(self, other: TokenColor) -> TokenColor {
        if self.is_concrete() {
            self
        } else {
            other
        }
    }

    /// The concrete color, or the result of `derive` for
    /// `Auto`/`Unset`.
    pub fn unwrap_or_else(self, derive: impl FnOnce() -> Color) -> Color {
        match self {
            TokenColor::Concrete(color) => color,
            _ => derive(),
        }
    }
}

impl From<Color> for TokenColor {
    fn from(color: Color) -> Self {
        TokenColor::Concrete(color)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TokenColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TokenColor::Concrete(color) => serializer.collect_str(color),
            TokenColor::Auto => serializer.serialize_str("auto"),
            TokenColor::Unset => serializer.serialize_str("unset"),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TokenColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        match text.as_ref() {
            "auto" => Ok(TokenColor::Auto),
            "unset" => Ok(TokenColor::Unset),
            other => other
                .parse()
                .map(TokenColor::Concrete)
                .map_err(serde::de::Error::custom),
        }
    }
}
