//! Positioned boolean operands and the single evaluation entry point.
//!
//! A [`Brush`] pairs a mesh with a placement transform; [`evaluate`] bakes
//! both operands into world space and runs one BSP boolean. Model builders
//! chain evaluations strictly left-to-right.

use crate::float_types::Real;
use crate::mesh::Mesh;
use nalgebra::{Matrix4, Rotation3, Translation3, Vector3};
use std::fmt::Debug;

/// The boolean operation applied between two brushes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoolOp {
    Union,
    Subtract,
    Intersect,
}

/// A mesh plus a placement transform, not yet applied.
#[derive(Clone, Debug)]
pub struct Brush<S: Clone + Send + Sync + Debug> {
    pub mesh: Mesh<S>,
    pub transform: Matrix4<Real>,
}

impl<S: Clone + Send + Sync + Debug> Brush<S> {
    /// Wrap a mesh with an identity placement.
    pub fn new(mesh: Mesh<S>) -> Self {
        Brush {
            mesh,
            transform: Matrix4::identity(),
        }
    }

    /// Wrap a mesh placed at (x, y, z).
    pub fn at(mesh: Mesh<S>, x: Real, y: Real, z: Real) -> Self {
        Brush::new(mesh).translate(x, y, z)
    }

    /// Compose a translation onto this brush's placement.
    pub fn translate(mut self, x: Real, y: Real, z: Real) -> Self {
        self.transform = Translation3::new(x, y, z).to_homogeneous() * self.transform;
        self
    }

    /// Compose a rotation about the z axis (degrees) onto this placement.
    pub fn rotate_z(mut self, degrees: Real) -> Self {
        let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), degrees.to_radians());
        self.transform = rot.to_homogeneous() * self.transform;
        self
    }

    /// Apply the placement, producing a world-space mesh.
    pub fn bake(&self) -> Mesh<S> {
        if self.transform == Matrix4::identity() {
            self.mesh.clone()
        } else {
            self.mesh.transform(&self.transform)
        }
    }
}

/// Evaluate one boolean between two brushes, returning the resulting solid.
///
/// Degenerate operands never fail: an empty right-hand side leaves a union
/// or subtraction unchanged, and empties an intersection. Operands are
/// assumed to be closed solids; non-manifold input is not detected or
/// repaired.
pub fn evaluate<S: Clone + Send + Sync + Debug>(
    a: &Brush<S>,
    b: &Brush<S>,
    op: BoolOp,
) -> Mesh<S> {
    let a = a.bake();
    let b = b.bake();

    match op {
        BoolOp::Union => a.union(&b),
        BoolOp::Subtract => a.difference(&b),
        BoolOp::Intersect => a.intersection(&b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bake_applies_translation() {
        let cube: Mesh<()> = Mesh::cuboid(2.0, 2.0, 2.0, None);
        let baked = Brush::at(cube, 10.0, 0.0, 0.0).bake();
        let bb = baked.bounding_box();
        assert!((bb.mins.x - 9.0).abs() < 1e-9);
        assert!((bb.maxs.x - 11.0).abs() < 1e-9);
    }

    #[test]
    fn subtract_empty_is_identity() {
        let cube: Mesh<()> = Mesh::cuboid(2.0, 2.0, 2.0, None);
        let n = cube.polygons.len();
        let out = evaluate(&Brush::new(cube), &Brush::new(Mesh::new()), BoolOp::Subtract);
        assert_eq!(out.polygons.len(), n);
    }

    #[test]
    fn intersect_empty_is_empty() {
        let cube: Mesh<()> = Mesh::cuboid(2.0, 2.0, 2.0, None);
        let out =
            evaluate(&Brush::new(cube), &Brush::new(Mesh::new()), BoolOp::Intersect);
        assert!(out.is_empty());
    }
}
