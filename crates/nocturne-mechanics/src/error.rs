//! Error types for the mechanics engine.
//!
//! Only two situations are errors here. Invalid dice pools are reported
//! through a flagged result (callers check [`crate::dice::PoolRoll::invalid_pool`]),
//! and missing rule data resolves to `None` with documented defaults at
//! every call site.

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A dice expression string could not be parsed.
    #[error("invalid dice expression: {0}")]
    InvalidExpression(String),

    /// A level-up option was applied without its required target detail.
    #[error("level-up option requires a {0}")]
    MissingDetail(&'static str),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
