//! Parametric self-watering planter generator.
//!
//! Builds the four printable parts of a wavy twisted planter — the
//! planting top, the water reservoir bottom, the connector peg, and the
//! wicking insert — as watertight triangle meshes ready for STL export.
//!
//! The pipeline: sample a rippled 2D [`Profile`], extrude it into a
//! stepped prism, apply a sinusoidal twist, combine with primitive
//! solids through BSP-based CSG [`Brush`] evaluation, then weld into an
//! indexed [`TriangleMesh`].
//!
//! ```rust
//! use plantergen::{PlanterParams, Resolution, models};
//!
//! let params = PlanterParams::default();
//! let top = models::top::build(&params, Resolution::Preview);
//! assert!(top.triangle_count() > 0);
//! ```

pub mod aabb;
pub mod brush;
pub mod bsp;
pub mod errors;
pub mod extrude;
pub mod float_types;
pub mod mesh;
pub mod models;
pub mod params;
pub mod plane;
pub mod polygon;
pub mod profile;
pub mod shapes;
pub mod trimesh;
pub mod twist;
pub mod vertex;

#[cfg(feature = "stl-io")]
pub mod io;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use brush::{BoolOp, Brush, evaluate};
pub use errors::ValidationError;
pub use mesh::Mesh;
pub use params::{PlanterParams, Resolution, STORAGE_KEY};
pub use plane::Plane;
pub use polygon::Polygon;
pub use profile::Profile;
pub use trimesh::TriangleMesh;
pub use vertex::Vertex;
