//! Tinge Theming Engine
//!
//! A dynamic theming engine: layered theme scopes, derived palettes,
//! day/night resolution, background-aware contrast and change
//! propagation.
//!
//! # Overview
//!
//! The engine provides:
//! - **Theme hierarchy**: Application, local (per-screen) and remote
//!   scopes, with one precedence rule — local wins while attached
//! - **Per-role resolution**: every [`ColorRole`] resolves to a
//!   concrete color, deriving `Auto` slots from siblings
//! - **Derived palettes**: a sparse original palette mutated into a
//!   complete one, conditioned on the theme's polarity
//! - **Day/night resolution**: mode and variant driven, with a
//!   wrapping wall-clock window and next-transition scheduling
//! - **Change propagation**: ordered listener fan-out with
//!   delta classification and isolate-and-continue dispatch
//!
//! # Quick Start
//!
//! ```rust
//! use tinge_theme::{
//!     AppTheme, ColorRole, FixedProbe, MemoryStorage, ThemeEngine,
//! };
//! use tinge_core::Color;
//!
//! let mut engine = ThemeEngine::new(
//!     Box::new(MemoryStorage::new()),
//!     Box::new(FixedProbe::default()),
//! );
//!
//! let theme = AppTheme {
//!     background: Color::rgb(0x12, 0x12, 0x12).into(),
//!     primary: Color::rgb(0x3F, 0x51, 0xB5).into(),
//!     ..AppTheme::default()
//! };
//! engine.set_application_theme(AppTheme::fallback(), Some(theme));
//!
//! let primary = engine.resolve_role(ColorRole::Primary)?;
//! assert_eq!(primary, Color::rgb(0x3F, 0x51, 0xB5));
//! # Ok::<(), tinge_theme::ThemeError>(())
//! ```
//!
//! # Architecture
//!
//! The engine is an explicit instance, not a global: hosts construct
//! one, hold it in their composition root and drive it from a single
//! logical thread. Platform inputs arrive through the [`SystemProbe`]
//! seam, persistence through [`ThemeStorage`], and consumers register
//! [`DynamicListener`] implementations with the engine's broker.

pub mod broker;
pub mod contrast;
pub mod delta;
pub mod engine;
pub mod error;
pub mod night;
pub mod palette;
pub mod roles;
pub mod storage;
pub mod theme;

// Re-export commonly used types
pub use broker::{
    ChangeBroker, ConfigurationChange, DispatchError, DynamicListener, ListenerError, ListenerId,
};
pub use delta::ChangeDelta;
pub use engine::{decode_theme, encode_theme, ScreenIdentity, ThemeEngine};
pub use error::ThemeError;
pub use night::{FixedProbe, NightResolver, NightVariant, SystemProbe, ThemeMode};
pub use palette::{DerivedPalette, Swatches};
pub use roles::ColorRole;
pub use storage::{MemoryStorage, ThemeStorage};
pub use theme::{generate_dark_color, AppTheme, BackgroundAware, ResolvedTheme};
