//! Planter parameter set and resolution tiers.

use crate::errors::ValidationError;
use crate::float_types::{EPSILON, Real};
use serde::{Deserialize, Serialize};

/// Local-storage key the web frontend persists parameters under.
pub const STORAGE_KEY: &str = "wavyProperties";

/// User-facing planter parameters, in millimeters. Serialized camelCase
/// so the JSON shape matches the frontend's saved state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanterParams {
    /// Nominal pot radius.
    pub radius: Real,
    /// Wave depth of the rippled wall.
    pub amplitude: Real,
    /// Waves per unit radius; the wave count is `round(radius * density)`.
    pub density: Real,
    /// Height of the top (planting) section.
    pub depth: Real,
    /// Height of the bottom (reservoir) section.
    pub base_depth: Real,
    /// Twist periods over the full depth.
    pub twist_waves: Real,
}

impl Default for PlanterParams {
    fn default() -> Self {
        PlanterParams {
            radius: 75.0,
            amplitude: 0.2,
            density: 0.3,
            depth: 100.0,
            base_depth: 50.0,
            twist_waves: 0.5,
        }
    }
}

impl PlanterParams {
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let params: PlanterParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json(&self) -> Result<String, ValidationError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Fraction of the twist period spanned by the base section, used so
    /// the bottom's reverse twist lines up with the top's.
    pub fn twist_ratio(&self) -> Real {
        if self.depth > EPSILON {
            self.base_depth / self.depth
        } else {
            0.0
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, value, min) in [
            ("radius", self.radius, 10.0),
            ("depth", self.depth, 10.0),
            ("baseDepth", self.base_depth, 10.0),
        ] {
            if !value.is_finite() || value < min {
                return Err(ValidationError::InvalidParameter { name, value });
            }
        }
        for (name, value) in [
            ("amplitude", self.amplitude),
            ("twistWaves", self.twist_waves),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidParameter { name, value });
            }
        }
        // Density is strictly positive: the wall needs at least one wave.
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(ValidationError::InvalidParameter {
                name: "density",
                value: self.density,
            });
        }
        // The wall bore must stay open or the pot has no cavity.
        if self.radius - (self.amplitude + 4.0) <= EPSILON {
            return Err(ValidationError::DegenerateWall {
                radius: self.radius,
                amplitude: self.amplitude,
            });
        }
        Ok(())
    }
}

/// Tessellation tier. Preview favors interactive rebuilds; Export is what
/// gets sliced and printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Preview,
    Export,
}

impl Resolution {
    /// Samples around the wavy wall profile.
    ///
    /// Wall faces feed straight into boolean evaluation, which is
    /// superlinear in operand size, so these counts stay an order of
    /// magnitude below what a plain surface export could afford.
    pub const fn profile_segments(self) -> usize {
        match self {
            Resolution::Preview => 96,
            Resolution::Export => 192,
        }
    }

    /// Vertical subdivisions available to the twist deformation.
    pub const fn twist_steps(self) -> usize {
        match self {
            Resolution::Preview => 6,
            Resolution::Export => 12,
        }
    }

    /// Segments for large round features (floors, cavities).
    pub const fn round_segments(self) -> usize {
        match self {
            Resolution::Preview => 28,
            Resolution::Export => 48,
        }
    }

    /// Segments for small bores and pegs.
    pub const fn fine_segments(self) -> usize {
        match self {
            Resolution::Preview => 16,
            Resolution::Export => 32,
        }
    }

    pub const fn weld_tolerance(self) -> Real {
        match self {
            Resolution::Preview => 1e-4,
            Resolution::Export => 1e-5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_json() {
        let params = PlanterParams::default();
        let json = params.to_json().unwrap();
        assert!(json.contains("\"baseDepth\":50.0"));
        assert!(json.contains("\"twistWaves\":0.5"));
        let back = PlanterParams::from_json(&json).unwrap();
        assert_eq!(params, back);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let params = PlanterParams::from_json(r#"{"radius": 60}"#).unwrap();
        assert_eq!(params.radius, 60.0);
        assert_eq!(params.depth, 100.0);
        assert_eq!(params.amplitude, 0.2);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(PlanterParams {
            radius: 3.0,
            ..PlanterParams::default()
        }
        .validate()
        .is_err());
        assert!(PlanterParams {
            density: -1.0,
            ..PlanterParams::default()
        }
        .validate()
        .is_err());
        assert!(PlanterParams {
            density: 0.0,
            ..PlanterParams::default()
        }
        .validate()
        .is_err());
    }

    #[test]
    fn twist_ratio_follows_base_depth() {
        let params = PlanterParams::default();
        assert!((params.twist_ratio() - 0.5).abs() < 1e-12);
    }
}
