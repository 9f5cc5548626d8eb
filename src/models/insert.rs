//! Wicking insert: a perforated cup that hangs from the top section's
//! drainage bore and dips into the reservoir.

use crate::brush::{BoolOp, Brush, evaluate};
use crate::float_types::{Real, TAU};
use crate::mesh::Mesh;
use crate::params::{PlanterParams, Resolution};
use crate::profile::Profile;
use crate::trimesh::TriangleMesh;

pub fn build(params: &PlanterParams, res: Resolution) -> TriangleMesh {
    let height = (params.base_depth - 12.0).max(0.0);
    let segments = res.fine_segments();

    // Hanging ring at the top, tube shell below it, both bored to an
    // 8mm inner radius, closed by a solid disk at the very bottom.
    let ring = Mesh::cylinder(10.0, 2.0, segments, None);
    let shell = Mesh::cylinder(10.0, height, segments, None);
    let inner = Mesh::cylinder(8.0, height + 2.0, segments, None);
    let disk = Mesh::cylinder(8.0, 2.0, segments, None);

    let mut solid = evaluate(
        &Brush::at(ring, 0.0, 0.0, height + 2.0),
        &Brush::at(shell, 0.0, 0.0, 2.0),
        BoolOp::Union,
    );
    solid = evaluate(
        &Brush::new(solid),
        &Brush::at(inner, 0.0, 0.0, 2.0),
        BoolOp::Subtract,
    );
    solid = evaluate(&Brush::new(solid), &Brush::new(disk), BoolOp::Union);

    // Side windows through the tube wall, rows of six every 8mm of
    // height, so the wick stays in contact with the reservoir water.
    if height > 2.0 {
        let rows = ((height / 8.0).floor() as usize).min(2);
        for row in 0..rows {
            let z = 4.0 + row as Real * 8.0;
            for i in 0..6 {
                let angle = TAU * i as Real / 6.0;
                let vent: Mesh<()> = Mesh::cylinder(2.0, 4.0, 6, None);
                solid = evaluate(
                    &Brush::new(solid),
                    &Brush::at(vent, 9.0 * angle.cos(), 9.0 * angle.sin(), z - 2.0),
                    BoolOp::Subtract,
                );
            }
        }
    }

    // Star of three slots through the bottom disk.
    let slot_profile = Profile::stadium(12.0, 3.0, 8);
    for i in 0..3 {
        let slot: Mesh<()> = Mesh::extrude_profile(&slot_profile, 2.0, 1, None)
            .rotate(0.0, 0.0, i as Real * 120.0);
        solid = evaluate(&Brush::new(solid), &Brush::new(slot), BoolOp::Subtract);
    }

    TriangleMesh::from_mesh(&solid, res.weld_tolerance())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_spans_ring_to_disk() {
        let mesh = build(&PlanterParams::default(), Resolution::Preview);
        assert!(mesh.triangle_count() > 0);
        let (mut min_z, mut max_z) = (Real::INFINITY, Real::NEG_INFINITY);
        for p in mesh.positions.chunks_exact(3) {
            min_z = min_z.min(p[2]);
            max_z = max_z.max(p[2]);
        }
        // base_depth 50: tube height 38, ring top at 42.
        assert!(min_z.abs() < 1e-6);
        assert!((max_z - 42.0).abs() < 1e-6);
    }

    #[test]
    fn shallow_base_still_yields_ring_and_disk() {
        let params = PlanterParams {
            base_depth: 12.0,
            ..PlanterParams::default()
        };
        let mesh = build(&params, Resolution::Preview);
        assert!(mesh.triangle_count() > 0);
    }

    #[test]
    fn ring_is_the_widest_feature() {
        let mesh = build(&PlanterParams::default(), Resolution::Preview);
        let max_r = mesh
            .positions
            .chunks_exact(3)
            .map(|p| (p[0] * p[0] + p[1] * p[1]).sqrt())
            .fold(0.0, Real::max);
        assert!((max_r - 10.0).abs() < 1e-6);
    }
}
