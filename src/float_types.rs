//! Scalar type and numeric constants used across the crate.

/// Our Real scalar type. All geometry is evaluated in double precision;
/// STL output downcasts to `f32` at the very last step.
pub type Real = f64;

/// Tolerance for coplanarity tests and degenerate-geometry guards.
///
/// `Plane::orient_point` builds its basis from unit vectors, so the raw
/// orient3d determinant is a signed distance and this constant can be read
/// as a distance in model units.
pub const EPSILON: Real = 1e-8;

/// Archimedes' constant (π)
pub const PI: Real = core::f64::consts::PI;

/// π/2
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

/// The full circle constant (τ)
pub const TAU: Real = core::f64::consts::TAU;
