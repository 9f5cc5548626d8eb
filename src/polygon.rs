//! Planar polygons with cached planes and optional per-polygon metadata.

use crate::float_types::Real;
use crate::plane::Plane;
use crate::vertex::Vertex;
use geo::{LineString, Polygon as GeoPolygon, TriangulateEarcut, coord};
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

/// A polygon, defined by a list of vertices.
/// - `S` is the generic metadata type, stored as `Option<S>`.
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone + Send + Sync + Debug> {
    pub vertices: Vec<Vertex>,
    pub plane: Plane,
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Polygon<S> {
    /// Create a polygon from vertices
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        debug_assert!(vertices.len() >= 3, "degenerate polygon");

        let plane = Plane::from_vertices(&vertices);

        Polygon {
            vertices,
            plane,
            metadata,
        }
    }

    /// Reverses winding order, flips vertex normals, and flips the plane normal
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }

    /// Return an iterator over paired vertices each forming an edge of the polygon
    pub fn edges(&self) -> impl Iterator<Item = (&Vertex, &Vertex)> {
        self.vertices
            .iter()
            .zip(self.vertices.iter().cycle().skip(1))
    }

    /// Axis-aligned bounds of this polygon's vertices.
    pub fn bounding_box(&self) -> crate::aabb::Aabb {
        crate::aabb::Aabb::from_points(self.vertices.iter().map(|v| v.pos))
    }

    /// Triangulate this polygon into a list of triangles, each [v0, v1, v2].
    ///
    /// The loop is projected onto its plane basis and ear-cut in 2D; earcut
    /// introduces no new vertices, so every output corner coincides with an
    /// input vertex and welding stays exact.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        if self.vertices.len() < 3 {
            return Vec::new();
        }

        let normal_3d = self.plane.normal();

        if self.vertices.len() == 3 {
            return vec![[
                Vertex::new(self.vertices[0].pos, normal_3d),
                Vertex::new(self.vertices[1].pos, normal_3d),
                Vertex::new(self.vertices[2].pos, normal_3d),
            ]];
        }

        // Quads split along the shorter diagonal, keeping the original
        // corner positions. Deformed (non-planar) quads must not go through
        // the plane projection below: projecting would move their corners
        // and open cracks against neighboring faces.
        if self.vertices.len() == 4 {
            let d02 = (self.vertices[0].pos - self.vertices[2].pos).norm_squared();
            let d13 = (self.vertices[1].pos - self.vertices[3].pos).norm_squared();
            let corner_sets: [[usize; 3]; 2] = if d02 <= d13 {
                [[0, 1, 2], [0, 2, 3]]
            } else {
                [[1, 2, 3], [1, 3, 0]]
            };
            return corner_sets
                .iter()
                .map(|idx| {
                    let n = Plane::from_points(
                        self.vertices[idx[0]].pos,
                        self.vertices[idx[1]].pos,
                        self.vertices[idx[2]].pos,
                    )
                    .normal();
                    [
                        Vertex::new(self.vertices[idx[0]].pos, n),
                        Vertex::new(self.vertices[idx[1]].pos, n),
                        Vertex::new(self.vertices[idx[2]].pos, n),
                    ]
                })
                .collect();
        }

        let (u, v) = build_orthonormal_basis(normal_3d);
        let origin_3d = self.vertices[0].pos;

        // Flatten each vertex to 2D
        let mut all_vertices_2d = Vec::with_capacity(self.vertices.len());
        for vert in &self.vertices {
            let offset = vert.pos.coords - origin_3d.coords;
            let x = offset.dot(&u);
            let y = offset.dot(&v);
            all_vertices_2d.push(coord! {x: x, y: y});
        }

        let triangulation = GeoPolygon::new(LineString::new(all_vertices_2d), Vec::new())
            .earcut_triangles_raw();
        let triangle_indices = triangulation.triangle_indices;
        let vertices = triangulation.vertices;

        // Convert back into 3D triangles
        let mut triangles = Vec::with_capacity(triangle_indices.len() / 3);
        for tri_chunk in triangle_indices.chunks_exact(3) {
            let mut tri_vertices = [const {
                Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0))
            }; 3];
            for (k, &idx) in tri_chunk.iter().enumerate() {
                let base = idx * 2;
                let x = vertices[base];
                let y = vertices[base + 1];
                let pos_3d = origin_3d.coords + (x * u) + (y * v);
                tri_vertices[k] = Vertex::new(Point3::from(pos_3d), normal_3d);
            }
            triangles.push(tri_vertices);
        }
        triangles
    }

    /// Return a normal calculated from all polygon vertices (Newell's method)
    pub fn calculate_new_normal(&self) -> Vector3<Real> {
        let n = self.vertices.len();
        if n < 3 {
            return Vector3::z(); // degenerate or empty
        }

        let mut normal = Vector3::zeros();
        for i in 0..n {
            let current = self.vertices[i].pos;
            let next = self.vertices[(i + 1) % n].pos;
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
        }

        let mut poly_normal = normal.normalize();

        // Keep the computed normal on the same side as the cached plane
        if poly_normal.dot(&self.plane.normal()) < 0.0 {
            poly_normal = -poly_normal;
        }

        poly_normal
    }

    /// Recompute this polygon's normal from all vertices, then set all
    /// vertex normals to match (flat shading).
    pub fn set_new_normal(&mut self) {
        let new_normal = self.calculate_new_normal();
        for v in &mut self.vertices {
            v.normal = new_normal;
        }
    }

    /// Returns a reference to the metadata, if any.
    pub fn metadata(&self) -> Option<&S> {
        self.metadata.as_ref()
    }

    /// Sets the metadata to the given value.
    pub fn set_metadata(&mut self, data: S) {
        self.metadata = Some(data);
    }
}

/// Given a normal vector `n`, build two perpendicular unit vectors `u` and `v`
/// so that {u, v, n} forms an orthonormal basis. `n` is assumed non-zero.
pub fn build_orthonormal_basis(n: Vector3<Real>) -> (Vector3<Real>, Vector3<Real>) {
    let n = n.normalize();

    // Pick the axis with the smallest component in `n`; crossing with it is
    // least likely to cause numeric trouble.
    let other = if n.x.abs() < n.y.abs() && n.x.abs() < n.z.abs() {
        Vector3::x()
    } else if n.y.abs() < n.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };

    let v = n.cross(&other).normalize();
    let u = v.cross(&n).normalize();

    (u, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> Polygon<()> {
        Polygon::new(
            vec![
                Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::z()),
                Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z()),
                Vertex::new(Point3::new(1.0, 1.0, 0.0), Vector3::z()),
                Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::z()),
            ],
            None,
        )
    }

    #[test]
    fn quad_triangulates_into_two_triangles() {
        let tris = unit_quad().triangulate();
        assert_eq!(tris.len(), 2);
        let area: Real = tris
            .iter()
            .map(|t| {
                (t[1].pos - t[0].pos)
                    .cross(&(t[2].pos - t[0].pos))
                    .norm()
                    * 0.5
            })
            .sum();
        assert!((area - 1.0).abs() < 1e-12);
    }

    #[test]
    fn non_planar_quad_keeps_its_corners() {
        // One corner lifted well out of the fitted plane, as a twist
        // deformation produces.
        let quad = Polygon::<()>::new(
            vec![
                Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::z()),
                Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z()),
                Vertex::new(Point3::new(1.0, 1.0, 0.5), Vector3::z()),
                Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::z()),
            ],
            None,
        );
        let tris = quad.triangulate();
        assert_eq!(tris.len(), 2);
        for tri in &tris {
            for v in tri {
                assert!(
                    quad.vertices.iter().any(|q| (q.pos - v.pos).norm() < 1e-12),
                    "triangulation must not move quad corners"
                );
            }
        }
    }

    #[test]
    fn flip_reverses_plane() {
        let mut quad = unit_quad();
        let n = quad.plane.normal();
        quad.flip();
        assert!((quad.plane.normal() + n).norm() < 1e-12);
    }

    #[test]
    fn newell_normal_matches_plane() {
        let quad = unit_quad();
        assert!((quad.calculate_new_normal() - Vector3::z()).norm() < 1e-12);
    }
}
