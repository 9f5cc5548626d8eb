//! Top (planting) section: twisted wavy wall, floor, locking skirt, and
//! stepped drainage holes.

use super::{drainage_centers, wavy_wall};
use crate::brush::{BoolOp, Brush, evaluate};
use crate::mesh::Mesh;
use crate::params::{PlanterParams, Resolution};
use crate::trimesh::TriangleMesh;

pub fn build(params: &PlanterParams, res: Resolution) -> TriangleMesh {
    let wall = wavy_wall(
        params.radius,
        params.amplitude,
        params.density,
        params.depth,
        params.twist_waves,
        false,
        0.0,
        res,
    );

    // Floor disc inside the wall, plus a slightly undersized skirt below
    // z=0 that drops into the bottom section's lip recess.
    let floor = Mesh::cylinder(params.radius - 3.0, 2.0, res.round_segments(), None);
    let lock = Mesh::cylinder(params.radius - 3.15, 2.0, res.round_segments(), None);

    let mut solid = evaluate(&Brush::new(wall), &Brush::new(floor), BoolOp::Union);
    solid = evaluate(
        &Brush::new(solid),
        &Brush::at(lock, 0.0, 0.0, -2.0),
        BoolOp::Union,
    );

    // Stepped drainage bores: wide through the floor, narrower through
    // the skirt so water drips clear of the seam.
    for [x, y] in drainage_centers(params.radius) {
        let upper = Mesh::cylinder(10.0, 2.0, res.fine_segments(), None);
        let lower = Mesh::cylinder(8.0, 2.0, res.fine_segments(), None);
        let bore = evaluate(
            &Brush::new(upper),
            &Brush::at(lower, 0.0, 0.0, -2.0),
            BoolOp::Union,
        );
        solid = evaluate(
            &Brush::new(solid),
            &Brush::at(bore, x, y, 0.0),
            BoolOp::Subtract,
        );
    }

    TriangleMesh::from_mesh(&solid, res.weld_tolerance())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::Real;

    #[test]
    fn top_stays_in_radial_envelope_at_preview() {
        let mesh = build(&PlanterParams::default(), Resolution::Preview);
        assert!(mesh.triangle_count() > 0);
        let max_r = mesh
            .positions
            .chunks_exact(3)
            .map(|p| (p[0] * p[0] + p[1] * p[1]).sqrt())
            .fold(0.0, Real::max);
        assert!(max_r <= 75.0 + 0.2 + 1e-6);
    }

    #[test]
    fn skirt_extends_below_the_floor() {
        let mesh = build(&PlanterParams::default(), Resolution::Preview);
        let min_z = mesh
            .positions
            .chunks_exact(3)
            .map(|p| p[2])
            .fold(Real::INFINITY, Real::min);
        assert!((min_z + 2.0).abs() < 1e-6);
    }
}
