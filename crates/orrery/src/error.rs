use thiserror::Error;

/// Errors reported at the API boundary, before a simulation starts
///
/// Numeric trouble during a tick is never an error; it is repaired and
/// reported through [`crate::simulator::TickReport`] instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrreryError {
    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f64),

    #[error("radius must be non-negative and finite, got {0}")]
    InvalidRadius(f64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, OrreryError>;
