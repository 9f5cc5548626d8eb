//! Planes in 3D space, with robust point classification and polygon splitting.

use crate::float_types::{EPSILON, Real};
use crate::polygon::Polygon;
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

// Plane classification constants
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// A plane in Hessian normal form: `normal · p == w`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    /// Unit normal vector of the plane
    pub normal: Vector3<Real>,
    /// Distance from origin along normal (plane equation: n·p = w)
    pub w: Real,
}

impl Plane {
    /// Create a plane from three points.
    /// The normal direction follows the right-hand rule: (p2-p1) × (p3-p1)
    pub fn from_points(p1: Point3<Real>, p2: Point3<Real>, p3: Point3<Real>) -> Self {
        let v1 = p2 - p1;
        let v2 = p3 - p1;
        let normal = v1.cross(&v2);

        if normal.norm_squared() < EPSILON * EPSILON {
            // Degenerate triangle, return default plane
            return Plane {
                normal: Vector3::z(),
                w: 0.0,
            };
        }

        let normal = normal.normalize();
        let w = normal.dot(&p1.coords);
        Plane { normal, w }
    }

    /// Fit a plane to a polygon's vertex loop.
    ///
    /// Picks the best-conditioned triangle (longest chord plus the vertex
    /// farthest from it) and orients the result to agree with the loop's
    /// Newell normal, so near-degenerate quads from clipping still get a
    /// stable plane.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        let n = vertices.len();
        if n < 3 {
            return Plane {
                normal: Vector3::z(),
                w: 0.0,
            };
        }

        let reference_plane =
            Self::from_points(vertices[0].pos, vertices[1].pos, vertices[2].pos);
        if n == 3 {
            return reference_plane;
        }

        // Find the longest chord (farthest pair of points)
        let Some((i0, i1, _)) = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .map(|(i, j)| {
                let d2 = (vertices[i].pos - vertices[j].pos).norm_squared();
                (i, j, d2)
            })
            .max_by(|a, b| a.2.total_cmp(&b.2))
        else {
            return reference_plane;
        };

        let p0 = vertices[i0].pos;
        let p1 = vertices[i1].pos;
        let dir = p1 - p0;
        if dir.norm_squared() < EPSILON * EPSILON {
            return reference_plane; // everything almost coincident
        }

        // Find the vertex farthest from the line p0-p1
        let Some((i2, max_area2)) = vertices
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != i0 && *idx != i1)
            .map(|(idx, v)| {
                let a2 = (v.pos - p0).cross(&dir).norm_squared(); // ∝ area²
                (idx, a2)
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))
        else {
            return reference_plane;
        };

        if max_area2 <= EPSILON * EPSILON {
            return reference_plane; // all vertices collinear
        }
        let p2 = vertices[i2].pos;

        let mut plane = Self::from_points(p0, p1, p2);

        // Newell normal of the original loop, to recover the winding
        let reference_normal = vertices.iter().zip(vertices.iter().cycle().skip(1)).fold(
            Vector3::zeros(),
            |acc, (curr, next)| {
                acc + (curr.pos - Point3::origin()).cross(&(next.pos - Point3::origin()))
            },
        );

        if plane.normal.dot(&reference_normal) < 0.0 {
            plane.flip(); // flip in-place to agree with winding
        }

        plane
    }

    #[inline]
    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    /// Signed offset of the plane from the origin: `n · p = w`.
    #[inline]
    pub const fn offset(&self) -> Real {
        self.w
    }

    /// Flip the plane (reverse normal and distance)
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Return a flipped copy of this plane
    pub fn flipped(&self) -> Self {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Classify a point relative to the plane using robust geometric predicates.
    ///
    /// Three synthetic points spanning the plane feed `robust::orient3d`; the
    /// basis vectors are unit length, so the determinant magnitude is the
    /// distance from the plane and `EPSILON` keeps its distance meaning.
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let p0 = Point3::from(self.normal * (self.w / self.normal.norm_squared()));

        // Build an orthonormal basis {u, v} that spans the plane
        let mut u = if self.normal.z.abs() > self.normal.x.abs()
            || self.normal.z.abs() > self.normal.y.abs()
        {
            // normal is closer to ±Z ⇒ cross with X
            Vector3::x().cross(&self.normal)
        } else {
            // otherwise cross with Z
            Vector3::z().cross(&self.normal)
        };
        u.normalize_mut();
        let v = self.normal.cross(&u).normalize();

        let point_a = p0;
        let point_b = p0 + u;
        let point_c = p0 + v;

        let sign = robust::orient3d(
            robust::Coord3D {
                x: point_a.x,
                y: point_a.y,
                z: point_a.z,
            },
            robust::Coord3D {
                x: point_b.x,
                y: point_b.y,
                z: point_b.z,
            },
            robust::Coord3D {
                x: point_c.x,
                y: point_c.y,
                z: point_c.z,
            },
            robust::Coord3D {
                x: point.x,
                y: point.y,
                z: point.z,
            },
        );

        // orient3d is positive when the query point lies on the side opposite
        // the triangle's CCW normal, which is this plane's normal.
        if sign > EPSILON {
            BACK
        } else if sign < -EPSILON {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// Classify a polygon with respect to the plane.
    /// Returns a bitmask of COPLANAR, FRONT, and BACK.
    pub fn classify_polygon<S: Clone + Send + Sync + Debug>(
        &self,
        polygon: &Polygon<S>,
    ) -> i8 {
        polygon
            .vertices
            .iter()
            .fold(COPLANAR, |acc, v| acc | self.orient_point(&v.pos))
    }

    /// Which side of this plane another plane's normal points to.
    /// Used to sort coplanar polygons between the front and back lists.
    pub fn orient_plane(&self, other: &Plane) -> i8 {
        if self.normal.dot(&other.normal) > 0.0 {
            FRONT
        } else {
            BACK
        }
    }

    /// Splits `polygon` by this plane, returning four buckets:
    /// `(coplanar_front, coplanar_back, front, back)`.
    #[allow(clippy::type_complexity)]
    pub fn split_polygon<S: Clone + Send + Sync + Debug>(
        &self,
        polygon: &Polygon<S>,
    ) -> (
        Vec<Polygon<S>>,
        Vec<Polygon<S>>,
        Vec<Polygon<S>>,
        Vec<Polygon<S>>,
    ) {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        // 1. classify all vertices with robust orient3d
        let mut types = Vec::with_capacity(polygon.vertices.len());
        let mut polygon_type: i8 = COPLANAR;
        for vertex in &polygon.vertices {
            let vertex_type = self.orient_point(&vertex.pos);
            types.push(vertex_type);
            polygon_type |= vertex_type;
        }

        // 2. dispatch the easy cases
        match polygon_type {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal()) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),

            // 3. true spanning, do the split
            _ => {
                let mut split_front = Vec::<Vertex>::new();
                let mut split_back = Vec::<Vertex>::new();

                for i in 0..polygon.vertices.len() {
                    let j = (i + 1) % polygon.vertices.len();
                    let type_i = types[i];
                    let type_j = types[j];
                    let vertex_i = &polygon.vertices[i];
                    let vertex_j = &polygon.vertices[j];

                    // A vertex not strictly behind the plane goes to the front list,
                    // one not strictly in front goes to the back list.
                    if type_i != BACK {
                        split_front.push(vertex_i.clone());
                    }
                    if type_i != FRONT {
                        split_back.push(vertex_i.clone());
                    }

                    // If the edge between these two vertices crosses the plane,
                    // compute the intersection and add it to both sets
                    if (type_i | type_j) == SPANNING {
                        let denom = self.normal.dot(&(vertex_j.pos - vertex_i.pos));
                        if denom.abs() > EPSILON {
                            let t = (self.w - self.normal.dot(&vertex_i.pos.coords))
                                / denom;
                            let vertex_new = vertex_i.interpolate(vertex_j, t);
                            split_front.push(vertex_new.clone());
                            split_back.push(vertex_new);
                        }
                    }
                }

                if split_front.len() >= 3 {
                    front.push(Polygon::new(split_front, polygon.metadata.clone()));
                }
                if split_back.len() >= 3 {
                    back.push(Polygon::new(split_back, polygon.metadata.clone()));
                }
            },
        }

        (coplanar_front, coplanar_back, front, back)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy_plane() -> Plane {
        Plane {
            normal: Vector3::z(),
            w: 0.0,
        }
    }

    #[test]
    fn orient_point_sides() {
        let plane = xy_plane();
        assert_eq!(plane.orient_point(&Point3::new(0.3, -0.7, 1.0)), FRONT);
        assert_eq!(plane.orient_point(&Point3::new(0.3, -0.7, -1.0)), BACK);
        assert_eq!(plane.orient_point(&Point3::new(5.0, 5.0, 0.0)), COPLANAR);
    }

    #[test]
    fn from_points_recovers_normal_and_offset() {
        let plane = Plane::from_points(
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(1.0, 0.0, 2.0),
            Point3::new(0.0, 1.0, 2.0),
        );
        assert!((plane.normal - Vector3::z()).norm() < 1e-12);
        assert!((plane.w - 2.0).abs() < 1e-12);
    }

    #[test]
    fn split_spanning_triangle() {
        let plane = xy_plane();
        let tri: Polygon<()> = Polygon::new(
            vec![
                Vertex::new(Point3::new(0.0, 0.0, -1.0), Vector3::x()),
                Vertex::new(Point3::new(2.0, 0.0, 1.0), Vector3::x()),
                Vertex::new(Point3::new(0.0, 2.0, 1.0), Vector3::x()),
            ],
            None,
        );
        let (cf, cb, front, back) = plane.split_polygon(&tri);
        assert!(cf.is_empty() && cb.is_empty());
        assert_eq!(front.len(), 1);
        assert_eq!(back.len(), 1);
        // both pieces keep all their vertices on or to one side of the plane
        for v in &front[0].vertices {
            assert!(v.pos.z >= -1e-9);
        }
        for v in &back[0].vertices {
            assert!(v.pos.z <= 1e-9);
        }
    }

    #[test]
    fn coplanar_polygon_is_bucketed_by_orientation() {
        let plane = xy_plane();
        let mut quad: Polygon<()> = Polygon::new(
            vec![
                Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::z()),
                Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z()),
                Vertex::new(Point3::new(1.0, 1.0, 0.0), Vector3::z()),
                Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::z()),
            ],
            None,
        );
        let (cf, cb, _, _) = plane.split_polygon(&quad);
        assert_eq!(cf.len(), 1);
        assert!(cb.is_empty());

        quad.flip();
        let (cf, cb, _, _) = plane.split_polygon(&quad);
        assert!(cf.is_empty());
        assert_eq!(cb.len(), 1);
    }
}
