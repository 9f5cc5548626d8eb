//! Bottom (reservoir) section: reverse-twisted wall with a lip recess,
//! thick floor, water filling port, and a smooth-bored cavity.

use super::wavy_wall;
use crate::brush::{BoolOp, Brush, evaluate};
use crate::mesh::Mesh;
use crate::params::{PlanterParams, Resolution};
use crate::trimesh::TriangleMesh;

pub fn build(params: &PlanterParams, res: Resolution) -> TriangleMesh {
    let height = params.base_depth;

    // The base twists in reverse with a proportionally shorter wave so
    // its ripples meet the top section's at the seam.
    let wall = wavy_wall(
        params.radius,
        params.amplitude,
        params.density,
        height,
        params.twist_waves * params.twist_ratio(),
        true,
        2.0,
        res,
    );

    let floor = Mesh::cylinder(params.radius - 3.0, 4.0, res.round_segments(), None);

    // Filling port: a block straddling the rim with a narrower slot cut
    // through it, leaving a ledge the water can be poured over.
    let entry: Mesh<()> = Mesh::cuboid(25.0, 25.0, 15.0, None);
    let slot: Mesh<()> = Mesh::cuboid(20.0, 20.0, 15.0, None);

    let mut solid = evaluate(&Brush::new(wall), &Brush::new(floor), BoolOp::Union);
    solid = evaluate(
        &Brush::new(solid),
        &Brush::at(entry, params.radius, 0.0, height - 7.5),
        BoolOp::Union,
    );
    solid = evaluate(
        &Brush::new(solid),
        &Brush::at(slot, params.radius, 0.0, height - 5.5),
        BoolOp::Subtract,
    );

    // Bore the reservoir smooth above the floor; the ripple stays on the
    // outside only.
    let cavity = Mesh::cylinder(params.radius - 3.0, height, res.round_segments(), None);
    solid = evaluate(
        &Brush::new(solid),
        &Brush::at(cavity, 0.0, 0.0, 4.0),
        BoolOp::Subtract,
    );

    TriangleMesh::from_mesh(&solid, res.weld_tolerance())
}
