//! Flat indexed triangle mesh with vertex welding.
//!
//! [`TriangleMesh`] is the export-facing representation: deduplicated
//! positions, a triangle index list, and area-weighted vertex normals.
//! Welding uses a spatial hash so coincident ring vertices produced by
//! separate band extrusions collapse into shared indices.

use crate::float_types::Real;
use crate::mesh::Mesh;
use hashbrown::{HashMap, HashSet};
use nalgebra::Vector3;
use std::fmt::Debug;

#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Flat xyz positions, 3 entries per vertex.
    pub positions: Vec<Real>,
    /// Triangle corner indices, 3 per face.
    pub indices: Vec<u32>,
    /// Flat xyz unit normals, parallel to `positions`.
    pub normals: Vec<Real>,
}

/// Spatial-hash vertex merger. Cells are `tolerance`-sized; a candidate
/// checks its own cell plus the 26 neighbors so matches straddling a cell
/// boundary are still found.
struct Welder {
    tolerance: Real,
    cells: HashMap<(i64, i64, i64), Vec<u32>>,
    positions: Vec<Real>,
}

impl Welder {
    fn new(tolerance: Real) -> Self {
        Welder {
            tolerance: tolerance.max(0.0),
            cells: HashMap::new(),
            positions: Vec::new(),
        }
    }

    fn cell_of(&self, x: Real, y: Real, z: Real) -> (i64, i64, i64) {
        let t = self.tolerance.max(Real::EPSILON);
        (
            (x / t).floor() as i64,
            (y / t).floor() as i64,
            (z / t).floor() as i64,
        )
    }

    fn insert(&mut self, x: Real, y: Real, z: Real) -> u32 {
        let tol_sq = self.tolerance * self.tolerance;
        let (cx, cy, cz) = self.cell_of(x, y, z);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = self.cells.get(&(cx + dx, cy + dy, cz + dz))
                    else {
                        continue;
                    };
                    for &idx in bucket {
                        let base = idx as usize * 3;
                        let ex = self.positions[base] - x;
                        let ey = self.positions[base + 1] - y;
                        let ez = self.positions[base + 2] - z;
                        if ex * ex + ey * ey + ez * ez <= tol_sq {
                            return idx;
                        }
                    }
                }
            }
        }

        let idx = (self.positions.len() / 3) as u32;
        self.positions.extend_from_slice(&[x, y, z]);
        self.cells.entry((cx, cy, cz)).or_default().push(idx);
        idx
    }
}

impl TriangleMesh {
    /// Triangulate a BSP mesh and weld vertices within `tolerance`.
    ///
    /// Triangles that collapse onto a shared index after welding are
    /// dropped; CSG clipping produces plenty of sliver faces and they
    /// carry no surface.
    pub fn from_mesh<S: Clone + Send + Sync + Debug>(
        mesh: &Mesh<S>,
        tolerance: Real,
    ) -> TriangleMesh {
        let mut welder = Welder::new(tolerance);
        let mut indices = Vec::new();

        for poly in &mesh.polygons {
            for tri in poly.triangulate() {
                let mapped: [u32; 3] = [
                    welder.insert(tri[0].pos.x, tri[0].pos.y, tri[0].pos.z),
                    welder.insert(tri[1].pos.x, tri[1].pos.y, tri[1].pos.z),
                    welder.insert(tri[2].pos.x, tri[2].pos.y, tri[2].pos.z),
                ];
                if mapped[0] == mapped[1]
                    || mapped[1] == mapped[2]
                    || mapped[2] == mapped[0]
                {
                    continue;
                }
                indices.extend_from_slice(&mapped);
            }
        }

        let normals = accumulate_normals(&welder.positions, &indices);
        TriangleMesh {
            positions: welder.positions,
            indices,
            normals,
        }
    }

    /// Re-weld an already indexed mesh at a coarser tolerance.
    pub fn weld(&self, tolerance: Real) -> TriangleMesh {
        let mut welder = Welder::new(tolerance);
        let remap: Vec<u32> = self
            .positions
            .chunks_exact(3)
            .map(|p| welder.insert(p[0], p[1], p[2]))
            .collect();

        let mut indices = Vec::with_capacity(self.indices.len());
        for tri in self.indices.chunks_exact(3) {
            let mapped = [
                remap[tri[0] as usize],
                remap[tri[1] as usize],
                remap[tri[2] as usize],
            ];
            if mapped[0] == mapped[1]
                || mapped[1] == mapped[2]
                || mapped[2] == mapped[0]
            {
                continue;
            }
            indices.extend_from_slice(&mapped);
        }

        let normals = accumulate_normals(&welder.positions, &indices);
        TriangleMesh {
            positions: welder.positions,
            indices,
            normals,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// V - E + F over unique undirected edges. 2 for a closed solid of
    /// genus zero, 0 for a torus-like ring.
    pub fn euler_characteristic(&self) -> i64 {
        let v = self.vertex_count() as i64;
        let f = self.triangle_count() as i64;
        let mut edges: HashSet<(u32, u32)> = HashSet::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                edges.insert((a.min(b), a.max(b)));
            }
        }
        v - edges.len() as i64 + f
    }
}

fn accumulate_normals(positions: &[Real], indices: &[u32]) -> Vec<Real> {
    let mut normals = vec![0.0; positions.len()];

    for tri in indices.chunks_exact(3) {
        let p = |i: u32| {
            let base = i as usize * 3;
            Vector3::new(positions[base], positions[base + 1], positions[base + 2])
        };
        let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
        // Cross product length is twice the triangle area, giving the
        // area weighting for free.
        let face = (b - a).cross(&(c - a));
        for &i in tri {
            let base = i as usize * 3;
            normals[base] += face.x;
            normals[base + 1] += face.y;
            normals[base + 2] += face.z;
        }
    }

    for n in normals.chunks_exact_mut(3) {
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        if len > Real::EPSILON {
            n[0] /= len;
            n[1] /= len;
            n[2] /= len;
        } else {
            n[2] = 1.0;
        }
    }
    normals
}
