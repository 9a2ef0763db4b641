use serde::{Deserialize, Serialize};

use crate::measurement::ValidatedMeasurement;

/// Per-factor "badness" scores, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubIndex {
    pub ph: f64,
    pub dissolved_oxygen: f64,
    pub bod: f64,
    pub fecal_coliform: f64,
    pub conductivity: f64,
    pub nitrate: f64,
}

impl SubIndex {
    pub const fn components(&self) -> [f64; 6] {
        [
            self.ph,
            self.dissolved_oxygen,
            self.bod,
            self.fecal_coliform,
            self.conductivity,
            self.nitrate,
        ]
    }
}

fn c100(v: f64) -> f64 {
    v.clamp(0.0, 100.0)
}

/// Distance from neutral 7.0; 8.5 and 6.5 are the fully bad endpoints.
pub fn ph_score(ph: f64) -> f64 {
    if ph > 7.0 {
        c100(100.0 * (ph - 7.0) / (8.5 - 7.0))
    } else {
        c100(100.0 * (7.0 - ph) / (7.0 - 6.5))
    }
}

/// Decreasing in DO: 14.6 mg/L scores 0, 5 mg/L scores 100.
pub fn dissolved_oxygen_score(dissolved_oxygen: f64) -> f64 {
    c100(100.0 * (dissolved_oxygen - 14.6) / (5.0 - 14.6))
}

pub fn bod_score(bod: f64) -> f64 {
    c100(100.0 * bod / 5.0)
}

pub fn fecal_coliform_score(fecal_coliform: f64) -> f64 {
    c100(100.0 * fecal_coliform / 100.0)
}

pub fn conductivity_score(conductivity: f64) -> f64 {
    c100(100.0 * conductivity / 1000.0)
}

pub fn nitrate_score(nitrate: f64) -> f64 {
    c100(100.0 * nitrate / 20.0)
}

/// Temperature is carried on the measurement but is not a contributing
/// factor; it is intentionally ignored here.
pub fn normalize(measurement: &ValidatedMeasurement) -> SubIndex {
    SubIndex {
        ph: ph_score(measurement.ph),
        dissolved_oxygen: dissolved_oxygen_score(measurement.dissolved_oxygen),
        bod: bod_score(measurement.bod),
        fecal_coliform: fecal_coliform_score(measurement.fecal_coliform),
        conductivity: conductivity_score(measurement.conductivity),
        nitrate: nitrate_score(measurement.nitrate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::Measurement;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn dissolved_oxygen_saturates_at_both_ends() {
        assert!(close(dissolved_oxygen_score(14.6), 0.0));
        assert!(close(dissolved_oxygen_score(5.0), 100.0));
        assert!(close(dissolved_oxygen_score(20.0), 0.0));
        assert!(close(dissolved_oxygen_score(2.0), 100.0));
    }

    #[test]
    fn ph_deviates_in_both_directions() {
        assert!(close(ph_score(7.0), 0.0));
        assert!(close(ph_score(8.5), 100.0));
        assert!(close(ph_score(6.5), 100.0));
        assert!(close(ph_score(7.75), 50.0));
        assert!(close(ph_score(6.75), 50.0));
        assert!(close(ph_score(10.0), 100.0));
        assert!(close(ph_score(1.0), 100.0));
    }

    #[test]
    fn linear_factors_saturate_at_their_endpoints() {
        assert!(close(bod_score(5.0), 100.0));
        assert!(close(bod_score(50.0), 100.0));
        assert!(close(fecal_coliform_score(100.0), 100.0));
        assert!(close(fecal_coliform_score(50.0), 50.0));
        assert!(close(conductivity_score(1000.0), 100.0));
        assert!(close(conductivity_score(250.0), 25.0));
        assert!(close(nitrate_score(20.0), 100.0));
        assert!(close(nitrate_score(5.0), 25.0));
    }

    #[test]
    fn temperature_does_not_affect_sub_index() {
        let cold = Measurement {
            temperature: 1.0,
            ..Measurement::sample()
        };
        let hot = Measurement {
            temperature: 90.0,
            ..Measurement::sample()
        };
        let a = normalize(&cold.validate().expect("valid"));
        let b = normalize(&hot.validate().expect("valid"));
        assert_eq!(a, b);
    }
}
