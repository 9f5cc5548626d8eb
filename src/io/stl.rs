//! STL import/export for [`TriangleMesh`].

use crate::float_types::Real;
use crate::trimesh::TriangleMesh;
use nalgebra::Vector3;
use std::io::Cursor;
use stl_io::{Normal, Triangle, Vertex, write_stl};

fn facet_normal(mesh: &TriangleMesh, tri: &[u32]) -> Vector3<Real> {
    let p = |i: u32| {
        let base = i as usize * 3;
        Vector3::new(
            mesh.positions[base],
            mesh.positions[base + 1],
            mesh.positions[base + 2],
        )
    };
    let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
    let n = (b - a).cross(&(c - a));
    let len = n.norm();
    if len > Real::EPSILON { n / len } else { Vector3::z() }
}

/// Serialize as binary STL.
pub fn write_binary(mesh: &TriangleMesh) -> std::io::Result<Vec<u8>> {
    let mut triangles = Vec::with_capacity(mesh.triangle_count());

    for tri in mesh.indices.chunks_exact(3) {
        let n = facet_normal(mesh, tri);
        triangles.push(Triangle {
            normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
            vertices: [tri[0], tri[1], tri[2]].map(|i| {
                let base = i as usize * 3;
                Vertex::new([
                    mesh.positions[base] as f32,
                    mesh.positions[base + 1] as f32,
                    mesh.positions[base + 2] as f32,
                ])
            }),
        });
    }

    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

/// Serialize as ASCII STL with the given solid `name`.
pub fn write_ascii(mesh: &TriangleMesh, name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("solid {name}\n"));

    for tri in mesh.indices.chunks_exact(3) {
        let n = facet_normal(mesh, tri);
        out.push_str(&format!(
            "  facet normal {:.6} {:.6} {:.6}\n",
            n.x, n.y, n.z
        ));
        out.push_str("    outer loop\n");
        for &i in tri {
            let base = i as usize * 3;
            out.push_str(&format!(
                "      vertex {:.6} {:.6} {:.6}\n",
                mesh.positions[base],
                mesh.positions[base + 1],
                mesh.positions[base + 2]
            ));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }

    out.push_str(&format!("endsolid {name}\n"));
    out
}

/// Parse a binary or ASCII STL back into a [`TriangleMesh`].
pub fn read_binary(bytes: &[u8]) -> std::io::Result<TriangleMesh> {
    let mut cursor = Cursor::new(bytes);
    let indexed = stl_io::read_stl(&mut cursor)?;

    let mut mesh = TriangleMesh {
        positions: Vec::with_capacity(indexed.vertices.len() * 3),
        indices: Vec::with_capacity(indexed.faces.len() * 3),
        normals: Vec::new(),
    };
    for v in &indexed.vertices {
        mesh.positions
            .extend_from_slice(&[v[0] as Real, v[1] as Real, v[2] as Real]);
    }
    for face in &indexed.faces {
        for &i in &face.vertices {
            mesh.indices.push(i as u32);
        }
    }
    // STL stores facet normals only; rebuild smooth vertex normals.
    Ok(mesh.weld(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;

    #[test]
    fn binary_round_trip_preserves_topology() {
        let cube: Mesh<()> = Mesh::cuboid(2.0, 2.0, 2.0, None);
        let mesh = TriangleMesh::from_mesh(&cube, 1e-5);
        let bytes = write_binary(&mesh).unwrap();
        // 80-byte header + count + 12 facets at 50 bytes each.
        assert_eq!(bytes.len(), 84 + 12 * 50);

        let back = read_binary(&bytes).unwrap();
        assert_eq!(back.triangle_count(), 12);
        assert_eq!(back.vertex_count(), 8);
        assert_eq!(back.euler_characteristic(), 2);
    }

    #[test]
    fn empty_mesh_serializes_to_a_zero_triangle_file() {
        let bytes = write_binary(&TriangleMesh::default()).unwrap();
        assert_eq!(bytes.len(), 84);
        let back = read_binary(&bytes).unwrap();
        assert_eq!(back.triangle_count(), 0);
    }

    #[test]
    fn ascii_has_matching_facet_count() {
        let cube: Mesh<()> = Mesh::cuboid(1.0, 1.0, 1.0, None);
        let mesh = TriangleMesh::from_mesh(&cube, 1e-5);
        let text = write_ascii(&mesh, "planter");
        assert!(text.starts_with("solid planter\n"));
        assert!(text.ends_with("endsolid planter\n"));
        assert_eq!(text.matches("facet normal").count(), 12);
        assert_eq!(text.matches("vertex").count(), 36);
    }
}
