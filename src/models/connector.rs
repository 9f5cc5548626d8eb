//! Connector peg joining the top section to the reservoir floor.
//!
//! A hollow post with a head flange, four small feet bores, and a
//! cross-hatch of slots so water wicks up through the peg into the soil.

use super::points_on_circle;
use crate::brush::{BoolOp, Brush, evaluate};
use crate::mesh::Mesh;
use crate::params::{PlanterParams, Resolution};
use crate::trimesh::TriangleMesh;

pub fn build(params: &PlanterParams, res: Resolution) -> TriangleMesh {
    let height = params.base_depth - 5.0;
    // Shorter than the slot lattice can accommodate: no connector.
    if height <= 10.0 {
        return TriangleMesh::default();
    }
    let half = height / 2.0;
    let segments = res.fine_segments();

    let body = Mesh::cylinder(8.0, height, segments, None);
    let head = Mesh::cylinder(10.0, 2.0, segments, None);

    let mut solid = evaluate(
        &Brush::at(body, 0.0, 0.0, -half),
        &Brush::at(head, 0.0, 0.0, half - 1.0),
        BoolOp::Union,
    );

    // Central bore, open at the top, floored 2mm above the bottom.
    let bore = Mesh::cylinder(6.0, height, segments, None);
    solid = evaluate(
        &Brush::new(solid),
        &Brush::at(bore, 0.0, 0.0, 2.0 - half),
        BoolOp::Subtract,
    );

    // Feet bores around the base rim.
    for [x, y] in points_on_circle(3.5, 4) {
        let foot = Mesh::cylinder(1.5, 2.0, segments, None);
        solid = evaluate(
            &Brush::new(solid),
            &Brush::at(foot, x, y, -half),
            BoolOp::Subtract,
        );
    }

    // Wicking slots: two crossed blades, then the cross rotated 45
    // degrees, all centered on the post.
    let blade = || -> Mesh<()> { Mesh::cuboid(2.0, 20.0, height - 10.0, None) };
    let cross = evaluate(
        &Brush::new(blade()),
        &Brush::new(blade().rotate(0.0, 0.0, 90.0)),
        BoolOp::Union,
    );
    let lattice = evaluate(
        &Brush::new(cross.clone()),
        &Brush::new(cross.rotate(0.0, 0.0, 45.0)),
        BoolOp::Union,
    );
    solid = evaluate(&Brush::new(solid), &Brush::new(lattice), BoolOp::Subtract);

    TriangleMesh::from_mesh(&solid, res.weld_tolerance())
}
