//! Error types.

/// Errors reported while configuring a demo or attaching it to a host.
///
/// Drawing and ticking never fail; these only come from setup and from
/// transform setters that reject their input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum JellyError {
    /// Zoom must be positive and finite.
    #[error("zoom must be positive and finite, got {0}")]
    InvalidZoom(f64),
    /// A stroke palette needs at least one color.
    #[error("stroke palette must contain at least one color")]
    InvalidPalette,
    /// A required host facility (window, canvas, 2d context) is missing.
    #[error("host facility unavailable: {0}")]
    HostUnavailable(&'static str),
}
