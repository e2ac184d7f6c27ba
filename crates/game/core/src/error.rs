//! Common error infrastructure for lantern-core.
//!
//! Domain-specific errors (`ConfigError`, `ActivationError`, `InventoryError`)
//! live beside the code that raises them. The per-tick controller itself has
//! no error path: anomalies are absorbed into safe default transitions.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same request may succeed once the situation changes
/// - **Validation**: invalid input that should be rejected without retry
/// - **Fatal**: the surrounding system cannot continue with this input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// Recoverable error, e.g. offering the altar before every shard is found.
    Recoverable,

    /// Validation error, e.g. a tuning file with an inverted range.
    Validation,

    /// Fatal error, e.g. geometry that makes the stairs unreachable.
    Fatal,
}

impl ErrorSeverity {
    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all lantern-core errors.
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for log filtering and test assertions. Default implementation
    /// uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
