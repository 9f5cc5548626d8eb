//! Validation errors

use crate::float_types::Real;

/// All the possible validation issues we might encounter
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A parameter is outside its documented range
    #[error("parameter `{name}` is out of range: {value}")]
    InvalidParameter { name: &'static str, value: Real },

    /// The wavy profile would have non-positive wall thickness
    #[error(
        "profile wall thickness is non-positive (radius {radius}, amplitude {amplitude})"
    )]
    DegenerateWall { radius: Real, amplitude: Real },

    /// The persisted parameter blob could not be parsed
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
