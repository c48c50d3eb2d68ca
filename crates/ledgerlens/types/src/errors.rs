//! Error types for the LedgerLens types layer

use thiserror::Error;

/// Errors raised when validating an engine configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Risk thresholds must satisfy `0 < suspicious < critical <= 1`
    #[error("risk thresholds out of order: suspicious={suspicious}, critical={critical}")]
    ThresholdOrder {
        /// Configured suspicious threshold
        suspicious: f64,
        /// Configured critical threshold
        critical: f64,
    },

    /// The network flag threshold must lie within `(0, 1]`
    #[error("network flag threshold {0} outside (0, 1]")]
    NetworkFlagRange(f64),

    /// The minimum inter-frame delay cannot exceed the base delay
    #[error("playback delays out of order: min={min_delay_ms}ms > base={base_delay_ms}ms")]
    DelayOrder {
        /// Configured floor delay
        min_delay_ms: u64,
        /// Configured base delay
        base_delay_ms: u64,
    },

    /// The playback step divisor must be positive
    #[error("playback step divisor must be positive")]
    ZeroStepDivisor,

    /// Viewport dimensions must be positive
    #[error("viewport dimensions must be positive: {width}x{height}")]
    EmptyViewport {
        /// Configured width
        width: f64,
        /// Configured height
        height: f64,
    },

    /// Force simulation decay parameters must lie within `(0, 1)`
    #[error("force decay parameter {name} = {value} outside (0, 1)")]
    DecayRange {
        /// Parameter name
        name: &'static str,
        /// Configured value
        value: f64,
    },
}

/// Result alias for types-layer operations
pub type ConfigResult<T> = Result<T, ConfigError>;
