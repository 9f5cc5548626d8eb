//! Sinusoidal twist about the Z axis.

use crate::float_types::{EPSILON, Real, TAU};
use crate::mesh::Mesh;
use crate::plane::Plane;
use std::fmt::Debug;

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// Rotate every vertex about Z by `sin(t * waves * 2pi)` radians, where
    /// `t` is the vertex height as a fraction of `depth`. With `reverse`
    /// the parameter runs top-down and the rotation direction flips, which
    /// lets an upside-down part mate against a normally twisted one.
    ///
    /// Planes and vertex normals are refit after the deformation.
    pub fn twist(&self, depth: Real, waves: Real, reverse: bool) -> Mesh<S> {
        if waves.abs() < EPSILON || depth <= EPSILON {
            return self.clone();
        }
        let dir: Real = if reverse { -1.0 } else { 1.0 };

        let mut mesh = self.clone();
        for poly in &mut mesh.polygons {
            for vertex in &mut poly.vertices {
                let t = (vertex.pos.z / depth).clamp(0.0, 1.0);
                let tt = if reverse { 1.0 - t } else { t };
                let angle = (tt * waves * TAU).sin() * dir;
                let (sin, cos) = angle.sin_cos();
                let (x, y) = (vertex.pos.x, vertex.pos.y);
                vertex.pos.x = x * cos - y * sin;
                vertex.pos.y = x * sin + y * cos;
            }
            // refit the cached plane before renormalizing, the BSP relies on it
            poly.plane = Plane::from_vertices(&poly.vertices);
            poly.set_new_normal();
        }
        mesh.invalidate_bounding_box();
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::Real;

    #[test]
    fn zero_waves_is_identity() {
        let mesh: Mesh<()> = Mesh::cylinder(5.0, 10.0, 12, None);
        let twisted = mesh.twist(10.0, 0.0, false);
        for (a, b) in mesh.polygons.iter().zip(twisted.polygons.iter()) {
            for (va, vb) in a.vertices.iter().zip(b.vertices.iter()) {
                assert_eq!(va.pos, vb.pos);
            }
        }
    }

    #[test]
    fn twist_preserves_height_and_radius() {
        use approx::assert_relative_eq;

        let mesh: Mesh<()> = Mesh::cylinder(5.0, 10.0, 12, None);
        let twisted = mesh.twist(10.0, 0.5, false);
        for (a, b) in mesh.polygons.iter().zip(twisted.polygons.iter()) {
            for (va, vb) in a.vertices.iter().zip(b.vertices.iter()) {
                assert!((va.pos.z - vb.pos.z).abs() < 1e-12);
                let ra = (va.pos.x * va.pos.x + va.pos.y * va.pos.y).sqrt();
                let rb: Real = (vb.pos.x * vb.pos.x + vb.pos.y * vb.pos.y).sqrt();
                assert_relative_eq!(ra, rb, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn reverse_twist_fixes_the_top() {
        let mesh: Mesh<()> = Mesh::cylinder(5.0, 10.0, 12, None);
        let twisted = mesh.twist(10.0, 0.25, true);
        // With reverse, t=1 maps to tt=0 so the top ring stays put.
        for (a, b) in mesh.polygons.iter().zip(twisted.polygons.iter()) {
            for (va, vb) in a.vertices.iter().zip(b.vertices.iter()) {
                if (va.pos.z - 10.0).abs() < 1e-12 {
                    assert!((va.pos.x - vb.pos.x).abs() < 1e-9);
                    assert!((va.pos.y - vb.pos.y).abs() < 1e-9);
                }
            }
        }
    }
}
