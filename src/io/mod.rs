//! Mesh file export.

#[cfg(feature = "stl-io")]
pub mod stl;
