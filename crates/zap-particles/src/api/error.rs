//! Error types for recoverable host input.
//!
//! Programmer errors (empty anchor lists, zero tick interval) are asserted
//! instead and never reach this type.

use thiserror::Error;

/// Errors surfaced to the host embedding the particle view.
#[derive(Debug, Error)]
pub enum ParticleError {
    /// A touch action code outside the closed set of actions.
    #[error("Unknown touch action code: {0}")]
    UnknownTouchAction(u32),

    /// A color string that is not `#rgb`, `#rrggbb` or `#aarrggbb`.
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),

    /// Configuration JSON failed to parse.
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The host could not provide its drawing surface or clock.
    #[error("Host error: {0}")]
    Host(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ParticleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        assert_eq!(
            ParticleError::UnknownTouchAction(42).to_string(),
            "Unknown touch action code: 42"
        );
        assert!(ParticleError::InvalidColor("#xyz".into())
            .to_string()
            .contains("#xyz"));
    }

    #[test]
    fn json_errors_convert() {
        let err: ParticleError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ParticleError::Config(_)));
    }
}
