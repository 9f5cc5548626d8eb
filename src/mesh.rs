//! Polygon-soup solid with boolean operations evaluated on BSP trees.

use crate::aabb::Aabb;
use crate::bsp::Node;
use crate::float_types::{EPSILON, Real};
use crate::plane::Plane;
use crate::polygon::Polygon;
use crate::vertex::Vertex;
use geo::{Coord, LineString, Polygon as GeoPolygon, TriangulateEarcut};
use nalgebra::{Matrix4, Point3, Rotation3, Translation3, Vector3};
use std::{fmt::Debug, sync::OnceLock};

#[derive(Clone, Debug)]
pub struct Mesh<S: Clone + Send + Sync + Debug> {
    /// 3D polygons bounding the solid
    pub polygons: Vec<Polygon<S>>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,

    /// Metadata
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// Returns a new empty Mesh
    pub fn new() -> Self {
        Mesh {
            polygons: Vec::new(),
            bounding_box: OnceLock::new(),
            metadata: None,
        }
    }

    /// Build a Mesh from an existing polygon list
    pub fn from_polygons(polygons: &[Polygon<S>]) -> Self {
        let mut mesh = Mesh::new();
        mesh.polygons = polygons.to_vec();
        mesh
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Concatenate another mesh's polygons onto this one without any boolean
    /// resolution. Coincident interior faces are left as-is.
    pub fn concat(&self, other: &Mesh<S>) -> Mesh<S> {
        let mut polygons = self.polygons.clone();
        polygons.extend(other.polygons.iter().cloned());
        Mesh {
            polygons,
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
        }
    }

    /// Helper to collect all vertices from the mesh.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.clone())
            .collect()
    }

    /// Split polygons into (may_touch, cannot_touch) using bounding-box tests
    fn partition_polys(
        polys: &[Polygon<S>],
        other_bb: &Aabb,
    ) -> (Vec<Polygon<S>>, Vec<Polygon<S>>) {
        let mut maybe = Vec::new();
        let mut never = Vec::new();
        for p in polys {
            if p.bounding_box().intersects(other_bb) {
                maybe.push(p.clone());
            } else {
                never.push(p.clone());
            }
        }
        (maybe, never)
    }

    /// Ear-cut a 2D ring (plus holes) and lift the triangles to z=0.
    pub fn triangulate_2d(
        outer: &[[Real; 2]],
        holes: &[&[[Real; 2]]],
    ) -> Vec<[Point3<Real>; 3]> {
        let outer_coords: Vec<Coord<Real>> =
            outer.iter().map(|&[x, y]| Coord { x, y }).collect();

        let holes_coords: Vec<LineString<Real>> = holes
            .iter()
            .map(|hole| {
                let coords: Vec<Coord<Real>> =
                    hole.iter().map(|&[x, y]| Coord { x, y }).collect();
                LineString::new(coords)
            })
            .collect();

        // Ear-cut triangulation on the polygon (outer + holes)
        let polygon = GeoPolygon::new(LineString::new(outer_coords), holes_coords);

        let triangulation = polygon.earcut_triangles_raw();
        let triangle_indices = triangulation.triangle_indices;
        let vertices = triangulation.vertices;

        let mut result = Vec::with_capacity(triangle_indices.len() / 3);
        for tri in triangle_indices.chunks_exact(3) {
            let pts = [
                Point3::new(vertices[2 * tri[0]], vertices[2 * tri[0] + 1], 0.0),
                Point3::new(vertices[2 * tri[1]], vertices[2 * tri[1] + 1], 0.0),
                Point3::new(vertices[2 * tri[2]], vertices[2 * tri[2] + 1], 0.0),
            ];
            result.push(pts);
        }
        result
    }

    /// Split every polygon into triangles, leaving the surface unchanged.
    ///
    /// Boolean evaluation assumes planar faces: a deformed quad straddles
    /// its own fitted plane and classifies as spanning against almost any
    /// splitting plane, so BSP clipping fragments it without bound. Any
    /// mesh that went through a non-affine deformation must be triangulated
    /// before it reaches `union`/`difference`/`intersection`.
    pub fn triangulate(&self) -> Mesh<S> {
        let polygons: Vec<Polygon<S>> = self
            .polygons
            .iter()
            .flat_map(|poly| {
                let metadata = poly.metadata.clone();
                poly.triangulate().into_iter().filter_map(move |tri| {
                    let area2 = (tri[1].pos - tri[0].pos)
                        .cross(&(tri[2].pos - tri[0].pos))
                        .norm_squared();
                    if area2 < EPSILON * EPSILON {
                        return None;
                    }
                    Some(Polygon::new(tri.to_vec(), metadata.clone()))
                })
            })
            .collect();
        Mesh::from_polygons(&polygons)
    }

    /// Renormalize all polygons in this Mesh by re-computing each polygon's
    /// plane and assigning that plane's normal to all vertices.
    pub fn renormalize(&mut self) {
        for poly in &mut self.polygons {
            poly.set_new_normal();
        }
    }

    /// Return a new Mesh representing the union of the two Meshes.
    ///
    /// A degenerate operand falls through unchanged; unioning with nothing
    /// is the identity.
    pub fn union(&self, other: &Mesh<S>) -> Mesh<S> {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }

        // avoid splitting obvious non-intersecting faces
        let (a_clip, a_passthru) =
            Self::partition_polys(&self.polygons, &other.bounding_box());
        let (b_clip, b_passthru) =
            Self::partition_polys(&other.polygons, &self.bounding_box());

        let mut a = Node::from_polygons(&a_clip);
        let mut b = Node::from_polygons(&b_clip);

        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());

        // combine results and untouched faces
        let mut final_polys = a.all_polygons();
        final_polys.extend(a_passthru);
        final_polys.extend(b_passthru);

        Mesh {
            polygons: final_polys,
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
        }
    }

    /// Return a new Mesh representing the difference of the two Meshes.
    ///
    /// Subtracting a degenerate operand is the identity; a degenerate
    /// left-hand side stays empty.
    pub fn difference(&self, other: &Mesh<S>) -> Mesh<S> {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return Mesh::new();
        }

        // avoid splitting obvious non-intersecting faces
        let (a_clip, a_passthru) =
            Self::partition_polys(&self.polygons, &other.bounding_box());
        let (b_clip, _b_passthru) =
            Self::partition_polys(&other.polygons, &self.bounding_box());

        let mut a = Node::from_polygons(&a_clip);
        let mut b = Node::from_polygons(&b_clip);

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());
        a.invert();

        // combine results and untouched faces
        let mut final_polys = a.all_polygons();
        final_polys.extend(a_passthru);

        Mesh {
            polygons: final_polys,
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
        }
    }

    /// Return a new Mesh representing the intersection of the two Meshes.
    /// An empty operand yields an empty result.
    pub fn intersection(&self, other: &Mesh<S>) -> Mesh<S> {
        if self.is_empty() || other.is_empty() {
            return Mesh::new();
        }

        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(&b.all_polygons());
        a.invert();

        Mesh {
            polygons: a.all_polygons(),
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
        }
    }

    /// Apply an arbitrary 3D transform (as a 4x4 matrix) to the mesh.
    pub fn transform(&self, mat: &Matrix4<Real>) -> Mesh<S> {
        let mat_inv_transpose = mat
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
            .transpose();
        let mut mesh = self.clone();

        for poly in &mut mesh.polygons {
            for vert in &mut poly.vertices {
                // Position
                let homog_pos = mat * vert.pos.to_homogeneous();
                if let Some(pos) = Point3::from_homogeneous(homog_pos) {
                    vert.pos = pos;
                }

                // Normal
                vert.normal = mat_inv_transpose.transform_vector(&vert.normal).normalize();
            }

            // keep the cached plane consistent with the new vertex positions
            poly.plane = Plane::from_vertices(&poly.vertices);
        }

        // invalidate the old cached bounding box
        mesh.bounding_box = OnceLock::new();

        mesh
    }

    /// Translate by (x, y, z).
    pub fn translate(&self, x: Real, y: Real, z: Real) -> Mesh<S> {
        self.transform(&Translation3::new(x, y, z).to_homogeneous())
    }

    /// Rotate about the x, y, then z axes by the given angles in degrees.
    pub fn rotate(&self, x_deg: Real, y_deg: Real, z_deg: Real) -> Mesh<S> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), x_deg.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), y_deg.to_radians());
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), z_deg.to_radians());
        self.transform(&(rz * ry * rx).to_homogeneous())
    }

    /// Returns an [`Aabb`] indicating the 3D bounds of all `polygons`.
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            Aabb::from_points(
                self.polygons
                    .iter()
                    .flat_map(|poly| poly.vertices.iter().map(|v| v.pos)),
            )
        })
    }

    /// Invalidates the cached bounding box.
    pub fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }

    /// Invert this Mesh (flip inside vs. outside)
    pub fn inverse(&self) -> Mesh<S> {
        let mut mesh = self.clone();
        for p in &mut mesh.polygons {
            p.flip();
        }
        mesh
    }
}

impl<S: Clone + Send + Sync + Debug> Default for Mesh<S> {
    fn default() -> Self {
        Self::new()
    }
}
