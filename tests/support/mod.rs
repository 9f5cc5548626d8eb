//! Test support library
//! Provides various helper functions & utilities for tests.

use plantergen::TriangleMesh;
use plantergen::float_types::Real;
use plantergen::mesh::Mesh;
use plantergen::polygon::Polygon;

/// Returns the approximate bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// for a set of polygons.
#[allow(dead_code)]
pub fn bounding_box(polygons: &[Polygon<()>]) -> [Real; 6] {
    let mut bounds = [
        Real::MAX,
        Real::MAX,
        Real::MAX,
        Real::MIN,
        Real::MIN,
        Real::MIN,
    ];
    for poly in polygons {
        for v in &poly.vertices {
            let p = v.pos;
            bounds[0] = bounds[0].min(p.x);
            bounds[1] = bounds[1].min(p.y);
            bounds[2] = bounds[2].min(p.z);
            bounds[3] = bounds[3].max(p.x);
            bounds[4] = bounds[4].max(p.y);
            bounds[5] = bounds[5].max(p.z);
        }
    }
    bounds
}

/// Bounding box of an indexed triangle mesh, same layout as [`bounding_box`].
#[allow(dead_code)]
pub fn tri_bounding_box(mesh: &TriangleMesh) -> [Real; 6] {
    let mut bounds = [
        Real::MAX,
        Real::MAX,
        Real::MAX,
        Real::MIN,
        Real::MIN,
        Real::MIN,
    ];
    for p in mesh.positions.chunks_exact(3) {
        for axis in 0..3 {
            bounds[axis] = bounds[axis].min(p[axis]);
            bounds[axis + 3] = bounds[axis + 3].max(p[axis]);
        }
    }
    bounds
}

/// Largest distance from the Z axis over all vertices.
#[allow(dead_code)]
pub fn max_radial(mesh: &TriangleMesh) -> Real {
    mesh.positions
        .chunks_exact(3)
        .map(|p| (p[0] * p[0] + p[1] * p[1]).sqrt())
        .fold(0.0, Real::max)
}

/// Total unsigned surface area, a cheap proxy for "the solid survived".
#[allow(dead_code)]
pub fn surface_area(mesh: &Mesh<()>) -> Real {
    mesh.polygons
        .iter()
        .flat_map(|poly| poly.triangulate())
        .map(|tri| {
            let a = tri[1].pos - tri[0].pos;
            let b = tri[2].pos - tri[0].pos;
            a.cross(&b).norm() / 2.0
        })
        .sum()
}
