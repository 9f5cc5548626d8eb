//! Cylinder and box primitives used by the model builders.

use crate::float_types::{EPSILON, Real, TAU};
use crate::mesh::Mesh;
use crate::polygon::Polygon;
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// A vertical cylinder along Z from z=0 to z=height with the specified
    /// radius (NOT diameter). Degenerate dimensions yield an empty mesh.
    pub fn cylinder(
        radius: Real,
        height: Real,
        segments: usize,
        metadata: Option<S>,
    ) -> Mesh<S> {
        if radius.abs() < EPSILON || height < EPSILON || segments < 3 {
            return Mesh::new();
        }

        let bottom_center = Vertex::new(Point3::origin(), -Vector3::z());
        let top_center = Vertex::new(Point3::new(0.0, 0.0, height), Vector3::z());

        // A point on the lateral surface. `stack` is 0.0 for the bottom ring,
        // 1.0 for the top; `normal_blend` lerps the normal between radial and
        // the cap direction.
        let point = |stack: Real, slice: Real, normal_blend: Real| {
            let angle = slice * TAU;
            let radial_dir = Vector3::new(angle.cos(), angle.sin(), 0.0);
            let pos = radial_dir * radius + Vector3::new(0.0, 0.0, stack * height);
            let normal =
                radial_dir * (1.0 - normal_blend.abs()) + Vector3::z() * normal_blend;
            Vertex::new(Point3::from(pos), normal.normalize())
        };

        let mut polygons = Vec::with_capacity(segments * 3);

        for i in 0..segments {
            let slice0 = i as Real / segments as Real;
            let slice1 = (i + 1) as Real / segments as Real;

            // Bottom cap: triangle fan from the bottom center, wound
            // clockwise seen from above so the normal faces -Z.
            polygons.push(Polygon::new(
                vec![
                    bottom_center.clone(),
                    point(0.0, slice1, -1.0),
                    point(0.0, slice0, -1.0),
                ],
                metadata.clone(),
            ));

            // Top cap: triangle fan from the top center.
            polygons.push(Polygon::new(
                vec![
                    top_center.clone(),
                    point(1.0, slice0, 1.0),
                    point(1.0, slice1, 1.0),
                ],
                metadata.clone(),
            ));

            // Side wall quad, wound so the normal faces outward.
            polygons.push(Polygon::new(
                vec![
                    point(0.0, slice0, 0.0),
                    point(0.0, slice1, 0.0),
                    point(1.0, slice1, 0.0),
                    point(1.0, slice0, 0.0),
                ],
                metadata.clone(),
            ));
        }

        Mesh::from_polygons(&polygons)
    }

    /// An axis-aligned box centered on the origin spanning
    /// `±width/2 × ±length/2 × ±height/2`. Degenerate dimensions yield an
    /// empty mesh.
    pub fn cuboid(width: Real, length: Real, height: Real, metadata: Option<S>) -> Mesh<S> {
        if width < EPSILON || length < EPSILON || height < EPSILON {
            return Mesh::new();
        }

        let (hw, hl, hh) = (width / 2.0, length / 2.0, height / 2.0);

        let p000 = Point3::new(-hw, -hl, -hh);
        let p100 = Point3::new(hw, -hl, -hh);
        let p110 = Point3::new(hw, hl, -hh);
        let p010 = Point3::new(-hw, hl, -hh);

        let p001 = Point3::new(-hw, -hl, hh);
        let p101 = Point3::new(hw, -hl, hh);
        let p111 = Point3::new(hw, hl, hh);
        let p011 = Point3::new(-hw, hl, hh);

        // Six faces with outward normals and counter-clockwise winding as
        // seen from outside.
        let bottom_normal = -Vector3::z();
        let bottom = Polygon::new(
            vec![
                Vertex::new(p000, bottom_normal),
                Vertex::new(p010, bottom_normal),
                Vertex::new(p110, bottom_normal),
                Vertex::new(p100, bottom_normal),
            ],
            metadata.clone(),
        );

        let top_normal = Vector3::z();
        let top = Polygon::new(
            vec![
                Vertex::new(p001, top_normal),
                Vertex::new(p101, top_normal),
                Vertex::new(p111, top_normal),
                Vertex::new(p011, top_normal),
            ],
            metadata.clone(),
        );

        let front_normal = -Vector3::y();
        let front = Polygon::new(
            vec![
                Vertex::new(p000, front_normal),
                Vertex::new(p100, front_normal),
                Vertex::new(p101, front_normal),
                Vertex::new(p001, front_normal),
            ],
            metadata.clone(),
        );

        let back_normal = Vector3::y();
        let back = Polygon::new(
            vec![
                Vertex::new(p010, back_normal),
                Vertex::new(p011, back_normal),
                Vertex::new(p111, back_normal),
                Vertex::new(p110, back_normal),
            ],
            metadata.clone(),
        );

        let left_normal = -Vector3::x();
        let left = Polygon::new(
            vec![
                Vertex::new(p000, left_normal),
                Vertex::new(p001, left_normal),
                Vertex::new(p011, left_normal),
                Vertex::new(p010, left_normal),
            ],
            metadata.clone(),
        );

        let right_normal = Vector3::x();
        let right = Polygon::new(
            vec![
                Vertex::new(p100, right_normal),
                Vertex::new(p110, right_normal),
                Vertex::new(p111, right_normal),
                Vertex::new(p101, right_normal),
            ],
            metadata.clone(),
        );

        Mesh::from_polygons(&[bottom, top, front, back, left, right])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cylinder_bounds() {
        let cyl: Mesh<()> = Mesh::cylinder(5.0, 10.0, 32, None);
        let bb = cyl.bounding_box();
        assert!((bb.mins.z).abs() < 1e-9);
        assert!((bb.maxs.z - 10.0).abs() < 1e-9);
        assert!((bb.maxs.x - 5.0).abs() < 1e-2);
    }

    #[test]
    fn cylinder_face_count() {
        let cyl: Mesh<()> = Mesh::cylinder(5.0, 10.0, 16, None);
        // per segment: bottom tri + top tri + side quad
        assert_eq!(cyl.polygons.len(), 16 * 3);
    }

    #[test]
    fn degenerate_primitives_are_empty() {
        assert!(Mesh::<()>::cylinder(0.0, 10.0, 16, None).is_empty());
        assert!(Mesh::<()>::cylinder(5.0, 0.0, 16, None).is_empty());
        assert!(Mesh::<()>::cuboid(2.0, 0.0, 2.0, None).is_empty());
    }

    #[test]
    fn primitive_normals_face_away_from_the_centroid() {
        let center = Vector3::new(0.0, 0.0, 5.0);
        let cyl: Mesh<()> = Mesh::cylinder(5.0, 10.0, 16, None);
        for poly in &cyl.polygons {
            let face_center = poly
                .vertices
                .iter()
                .fold(Vector3::zeros(), |acc, v| acc + v.pos.coords)
                / poly.vertices.len() as Real;
            assert!(poly.plane.normal().dot(&(face_center - center)) > 0.0);
        }

        let cube: Mesh<()> = Mesh::cuboid(2.0, 4.0, 6.0, None);
        for poly in &cube.polygons {
            let face_center = poly
                .vertices
                .iter()
                .fold(Vector3::zeros(), |acc, v| acc + v.pos.coords)
                / poly.vertices.len() as Real;
            assert!(poly.plane.normal().dot(&face_center) > 0.0);
        }
    }

    #[test]
    fn cuboid_is_centered() {
        let cube: Mesh<()> = Mesh::cuboid(2.0, 4.0, 6.0, None);
        let bb = cube.bounding_box();
        assert_eq!(bb.mins, Point3::new(-1.0, -2.0, -3.0));
        assert_eq!(bb.maxs, Point3::new(1.0, 2.0, 3.0));
    }
}
