//! Planar cross-section profiles: wavy rings, circles and stadium slots.

use crate::float_types::{EPSILON, FRAC_PI_2, PI, Real, TAU};

/// A closed 2D profile: one counter-clockwise outer ring plus zero or more
/// clockwise hole rings. Rings are open (the closing edge is implicit).
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub outer: Vec<[Real; 2]>,
    pub holes: Vec<Vec<[Real; 2]>>,
}

impl Profile {
    /// Number of wave lobes for a given radius and wave density:
    /// `k = round(radius * density)`.
    pub fn wave_count(radius: Real, density: Real) -> usize {
        let k = (radius * density).round();
        if k <= 0.0 { 0 } else { k as usize }
    }

    /// The scalloped outer boundary `r(t) = radius + amplitude - |sin(k·t)|`
    /// sampled at `segments` points, with a circular bore of `bore_radius`.
    ///
    /// A non-positive bore is omitted and the profile becomes a filled wavy
    /// disc rather than an error.
    pub fn wavy_ring_with_bore(
        radius: Real,
        amplitude: Real,
        density: Real,
        bore_radius: Real,
        segments: usize,
    ) -> Profile {
        let k = Self::wave_count(radius, density) as Real;
        let r_outer = |t: Real| radius + amplitude - (k * t).sin().abs();

        let mut outer = Vec::with_capacity(segments);
        for i in 0..segments {
            let t = (i as Real / segments as Real) * TAU;
            let r = r_outer(t);
            outer.push([r * t.cos(), r * t.sin()]);
        }

        let mut profile = Profile {
            outer,
            holes: Vec::new(),
        };
        if bore_radius > EPSILON {
            profile.holes.push(circle_ring(bore_radius, segments, true));
        }
        profile
    }

    /// The standard planter wall ring: bore radius `radius - (amplitude + 4)`,
    /// leaving a wall roughly 4 units thick at the wave troughs.
    pub fn wavy_ring(
        radius: Real,
        amplitude: Real,
        density: Real,
        segments: usize,
    ) -> Profile {
        Self::wavy_ring_with_bore(radius, amplitude, density, radius - (amplitude + 4.0), segments)
    }

    /// A plain circle of `radius`.
    pub fn circle(radius: Real, segments: usize) -> Profile {
        Profile {
            outer: circle_ring(radius, segments, false),
            holes: Vec::new(),
        }
    }

    /// A stadium (rectangle with semicircular caps), centered at the origin
    /// with its long axis along x. `segments` is the arc resolution per cap.
    pub fn stadium(length: Real, width: Real, segments: usize) -> Profile {
        let r = width / 2.0;
        let half_len = length / 2.0 - r;

        let mut outer = Vec::with_capacity(2 * (segments + 1));
        // right cap sweeps -π/2..π/2, left cap π/2..3π/2, counter-clockwise
        for i in 0..=segments {
            let a = -FRAC_PI_2 + PI * i as Real / segments as Real;
            outer.push([half_len + r * a.cos(), r * a.sin()]);
        }
        for i in 0..=segments {
            let a = FRAC_PI_2 + PI * i as Real / segments as Real;
            outer.push([-half_len + r * a.cos(), r * a.sin()]);
        }

        Profile {
            outer,
            holes: Vec::new(),
        }
    }

    /// Add a circular hole ring (clockwise) to this profile.
    pub fn with_circular_hole(mut self, radius: Real, segments: usize) -> Profile {
        self.holes.push(circle_ring(radius, segments, true));
        self
    }
}

fn circle_ring(radius: Real, segments: usize, clockwise: bool) -> Vec<[Real; 2]> {
    let mut ring = Vec::with_capacity(segments);
    for i in 0..segments {
        let mut t = (i as Real / segments as Real) * TAU;
        if clockwise {
            t = -t;
        }
        ring.push([radius * t.cos(), radius * t.sin()]);
    }
    ring
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_count_rounds() {
        assert_eq!(Profile::wave_count(75.0, 0.3), 23); // 22.5 rounds away from zero
        assert_eq!(Profile::wave_count(100.0, 0.6), 60);
        assert_eq!(Profile::wave_count(10.0, 0.3), 3);
        assert_eq!(Profile::wave_count(1.0, 0.1), 0);
    }

    #[test]
    fn wavy_ring_radius_bounds() {
        let radius = 75.0;
        let amplitude = 0.2;
        let profile = Profile::wavy_ring(radius, amplitude, 0.3, 256);
        for &[x, y] in &profile.outer {
            let r = (x * x + y * y).sqrt();
            assert!(r <= radius + amplitude + 1e-9);
            assert!(r >= radius + amplitude - 1.0 - 1e-9);
        }
        assert_eq!(profile.holes.len(), 1);
        for &[x, y] in &profile.holes[0] {
            let r = (x * x + y * y).sqrt();
            assert!((r - (radius - amplitude - 4.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn degenerate_bore_is_omitted() {
        // radius too small for the 4-unit wall: filled disc, no hole, no panic
        let profile = Profile::wavy_ring(3.0, 0.2, 0.3, 64);
        assert!(profile.holes.is_empty());
        assert_eq!(profile.outer.len(), 64);
    }

    #[test]
    fn outer_ring_is_counter_clockwise() {
        let profile = Profile::wavy_ring(75.0, 0.2, 0.3, 256);
        assert!(signed_area(&profile.outer) > 0.0);
        assert!(signed_area(&profile.holes[0]) < 0.0);
    }

    #[test]
    fn stadium_dimensions() {
        let profile = Profile::stadium(12.0, 3.0, 8);
        let (mut min_x, mut max_x, mut max_y) = (Real::MAX, -Real::MAX, -Real::MAX);
        for &[x, y] in &profile.outer {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        assert!((max_x - 6.0).abs() < 1e-9);
        assert!((min_x + 6.0).abs() < 1e-9);
        assert!((max_y - 1.5).abs() < 1e-9);
        assert!(signed_area(&profile.outer) > 0.0);
    }

    fn signed_area(ring: &[[Real; 2]]) -> Real {
        let mut sum = 0.0;
        for i in 0..ring.len() {
            let [x0, y0] = ring[i];
            let [x1, y1] = ring[(i + 1) % ring.len()];
            sum += x0 * y1 - x1 * y0;
        }
        sum / 2.0
    }
}
