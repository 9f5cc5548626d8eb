//! Prism extrusion of [`Profile`]s into closed solids.

use crate::float_types::{EPSILON, Real};
use crate::mesh::Mesh;
use crate::polygon::Polygon;
use crate::profile::Profile;
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// Extrude a planar profile along +Z from z=0 to z=depth.
    ///
    /// Side walls are stacked into `steps` rings so a later twist has
    /// vertices to act on. Caps are ear-cut with the holes respected; the
    /// cap triangulation introduces no new boundary vertices, so cap and
    /// wall share ring vertices exactly and the result welds watertight.
    ///
    /// Zero depth or a degenerate outer ring yields an empty mesh.
    pub fn extrude_profile(
        profile: &Profile,
        depth: Real,
        steps: usize,
        metadata: Option<S>,
    ) -> Mesh<S> {
        if profile.outer.len() < 3 || depth <= EPSILON {
            return Mesh::new();
        }
        let steps = steps.max(1);

        let mut polygons = Vec::new();

        // Caps
        let hole_slices: Vec<&[[Real; 2]]> =
            profile.holes.iter().map(|h| h.as_slice()).collect();
        let cap_triangles = Mesh::<S>::triangulate_2d(&profile.outer, &hole_slices);

        for tri in &cap_triangles {
            // Bottom cap faces -Z: reverse the winding.
            polygons.push(Polygon::new(
                vec![
                    Vertex::new(tri[2], -Vector3::z()),
                    Vertex::new(tri[1], -Vector3::z()),
                    Vertex::new(tri[0], -Vector3::z()),
                ],
                metadata.clone(),
            ));

            // Top cap faces +Z at z=depth.
            polygons.push(Polygon::new(
                vec![
                    Vertex::new(Point3::new(tri[0].x, tri[0].y, depth), Vector3::z()),
                    Vertex::new(Point3::new(tri[1].x, tri[1].y, depth), Vector3::z()),
                    Vertex::new(Point3::new(tri[2].x, tri[2].y, depth), Vector3::z()),
                ],
                metadata.clone(),
            ));
        }

        // Side walls for the outer ring and every hole ring. The outer ring
        // is counter-clockwise and holes are clockwise, so the same quad
        // winding yields outward normals on both.
        ring_walls(&profile.outer, depth, steps, &metadata, &mut polygons);
        for hole in &profile.holes {
            ring_walls(hole, depth, steps, &metadata, &mut polygons);
        }

        Mesh::from_polygons(&polygons)
    }
}

fn ring_walls<S: Clone + Send + Sync + Debug>(
    ring: &[[Real; 2]],
    depth: Real,
    steps: usize,
    metadata: &Option<S>,
    polygons: &mut Vec<Polygon<S>>,
) {
    let n = ring.len();
    if n < 3 {
        return;
    }

    for step in 0..steps {
        let z0 = depth * step as Real / steps as Real;
        let z1 = depth * (step + 1) as Real / steps as Real;

        for i in 0..n {
            let j = (i + 1) % n;
            let [x0, y0] = ring[i];
            let [x1, y1] = ring[j];

            let edge = Vector3::new(x1 - x0, y1 - y0, 0.0);
            if edge.norm_squared() < EPSILON * EPSILON {
                continue;
            }
            let normal = Vector3::new(edge.y, -edge.x, 0.0).normalize();

            polygons.push(Polygon::new(
                vec![
                    Vertex::new(Point3::new(x0, y0, z0), normal),
                    Vertex::new(Point3::new(x1, y1, z0), normal),
                    Vertex::new(Point3::new(x1, y1, z1), normal),
                    Vertex::new(Point3::new(x0, y0, z1), normal),
                ],
                metadata.clone(),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_depth_is_empty() {
        let profile = Profile::circle(5.0, 16);
        let mesh: Mesh<()> = Mesh::extrude_profile(&profile, 0.0, 1, None);
        assert!(mesh.is_empty());
    }

    #[test]
    fn prism_bounds_and_wall_count() {
        let profile = Profile::circle(5.0, 16);
        let mesh: Mesh<()> = Mesh::extrude_profile(&profile, 10.0, 4, None);
        let bb = mesh.bounding_box();
        assert!(bb.mins.z.abs() < 1e-9);
        assert!((bb.maxs.z - 10.0).abs() < 1e-9);

        let quads = mesh.polygons.iter().filter(|p| p.vertices.len() == 4).count();
        assert_eq!(quads, 16 * 4);
    }

    #[test]
    fn ring_profile_extrudes_inner_and_outer_walls() {
        let profile = Profile::circle(5.0, 16).with_circular_hole(2.0, 16);
        let mesh: Mesh<()> = Mesh::extrude_profile(&profile, 4.0, 1, None);
        let quads = mesh.polygons.iter().filter(|p| p.vertices.len() == 4).count();
        assert_eq!(quads, 32);
    }

    #[test]
    fn wall_normals_point_outward() {
        let profile = Profile::circle(5.0, 16);
        let mesh: Mesh<()> = Mesh::extrude_profile(&profile, 10.0, 1, None);
        for poly in mesh.polygons.iter().filter(|p| p.vertices.len() == 4) {
            let n = poly.plane.normal();
            let center = poly
                .vertices
                .iter()
                .fold(Vector3::zeros(), |acc, v| acc + v.pos.coords)
                / poly.vertices.len() as Real;
            let radial = Vector3::new(center.x, center.y, 0.0).normalize();
            assert!(n.dot(&radial) > 0.9, "wall normal should face outward");
        }
    }
}
