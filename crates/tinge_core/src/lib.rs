//! Tinge Core Primitives
//!
//! This crate provides the foundational color primitives for the Tinge
//! theming engine:
//!
//! - **[`Color`]**: a packed 32-bit ARGB value with pure colorimetric
//!   math (darken/lighten, contrast ratio, tint generation)
//! - **[`TokenColor`]**: a tagged color value that can be concrete,
//!   `Auto` (resolve from context) or `Unset` (no applicable color)
//!
//! Everything here is stateless and safe to call from any thread.
//!
//! # Example
//!
//! ```rust
//! use tinge_core::Color;
//!
//! let background = Color::WHITE;
//! let candidate = Color::from_argb(0xFF20_2020);
//!
//! assert!(!background.is_dark());
//! assert!(candidate.is_dark());
//! assert!(background.contrast_ratio(candidate) > 10.0);
//! ```

pub mod color;
pub mod token;

pub use color::Color;
pub use token::TokenColor;
