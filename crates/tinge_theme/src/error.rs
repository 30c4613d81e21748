//! Engine error types

use thiserror::Error;

use crate::broker::DispatchError;

/// Errors surfaced by the theming engine.
///
/// Colorimetric degradation is never an error: contrast resolution
/// returns the best-achieved color instead of failing. These variants
/// cover structural and precondition failures only.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// A local-scope accessor was called before `attach`.
    #[error("no local scope is attached")]
    NotAttached,

    /// No concrete background color could be resolved anywhere in the
    /// scope hierarchy.
    #[error("no background color is configured for the theme")]
    NotConfigured,

    /// A persisted theme failed to encode or decode.
    #[error("theme serialization failed: {0}")]
    Serde(#[from] serde_json::Error),

    /// One or more listeners failed during an otherwise complete
    /// dispatch.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
