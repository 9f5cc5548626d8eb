//! The four printable planter parts.
//!
//! Each submodule exposes `build(params, resolution) -> TriangleMesh`.
//! All parts share the wavy wall construction here; the top and bottom
//! walls twist in opposite senses so the assembled pot reads as one
//! continuous spiral.

use crate::float_types::{EPSILON, Real, TAU};
use crate::mesh::Mesh;
use crate::params::Resolution;
use crate::profile::Profile;

pub mod bottom;
pub mod connector;
pub mod insert;
pub mod top;

/// Drainage holes scale with pot size.
pub(crate) fn drainage_hole_count(radius: Real) -> usize {
    if radius < 50.0 {
        1
    } else if radius < 100.0 {
        3
    } else {
        5
    }
}

/// `count` points evenly spaced on a circle of `radius`, starting at +X.
pub(crate) fn points_on_circle(radius: Real, count: usize) -> Vec<[Real; 2]> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as Real / count as Real;
            [radius * angle.cos(), radius * angle.sin()]
        })
        .collect()
}

/// Twisted wavy wall shell spanning z = 0..depth.
///
/// With `top_cut > 0` the topmost `top_cut` of wall gets a wider bore
/// (wall thickness 4 regardless of amplitude), forming the recessed lip
/// the mating section seats into. The wall is extruded in two bands so
/// the lip edge lands on a real ring of vertices, then twisted as one.
pub(crate) fn wavy_wall(
    radius: Real,
    amplitude: Real,
    density: Real,
    depth: Real,
    twist_waves: Real,
    reverse: bool,
    top_cut: Real,
    res: Resolution,
) -> Mesh<()> {
    let segments = res.profile_segments();
    let steps = res.twist_steps();

    let shell = if top_cut > EPSILON && top_cut < depth {
        let body_depth = depth - top_cut;
        let body_steps =
            ((body_depth / depth * steps as Real).round() as usize).max(1);
        let lip_steps = steps.saturating_sub(body_steps).max(1);

        let body_profile = Profile::wavy_ring(radius, amplitude, density, segments);
        let lip_profile = Profile::wavy_ring_with_bore(
            radius,
            amplitude,
            density,
            radius - 4.0,
            segments,
        );

        let body = Mesh::extrude_profile(&body_profile, body_depth, body_steps, None);
        let lip = Mesh::extrude_profile(&lip_profile, top_cut, lip_steps, None)
            .translate(0.0, 0.0, body_depth);
        body.concat(&lip)
    } else {
        let profile = Profile::wavy_ring(radius, amplitude, density, segments);
        Mesh::extrude_profile(&profile, depth, steps, None)
    };

    // The twist bends every wall quad out of plane. Triangulate here so
    // boolean evaluation only ever sees planar faces.
    shell.twist(depth, twist_waves, reverse).triangulate()
}

/// Drainage bore centers on the floor of the top section.
///
/// A single hole sits on the pot axis; more holes spread out on a circle
/// of half the pot radius.
pub(crate) fn drainage_centers(radius: Real) -> Vec<[Real; 2]> {
    let count = drainage_hole_count(radius);
    if count == 1 {
        vec![[0.0, 0.0]]
    } else {
        points_on_circle(radius / 2.0, count)
    }
}
