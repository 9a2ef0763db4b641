use serde::Serialize;

use crate::normalize::SubIndex;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightTable {
    pub ph: f64,
    pub dissolved_oxygen: f64,
    pub bod: f64,
    pub fecal_coliform: f64,
    pub conductivity: f64,
    pub nitrate: f64,
}

pub const WEIGHTS: WeightTable = WeightTable {
    ph: 0.12,
    dissolved_oxygen: 0.28,
    bod: 0.23,
    fecal_coliform: 0.18,
    conductivity: 0.09,
    nitrate: 0.10,
};

impl WeightTable {
    pub fn total(&self) -> f64 {
        self.ph
            + self.dissolved_oxygen
            + self.bod
            + self.fecal_coliform
            + self.conductivity
            + self.nitrate
    }
}

/// Weighted sum of the sub-index. Not clamped.
///
/// The summation order is fixed (pH, DO, BOD, FC, EC, NO3); with every
/// component at 100 it lands on exactly 100.0.
pub fn compute_index(sub: &SubIndex) -> f64 {
    sub.ph * WEIGHTS.ph
        + sub.dissolved_oxygen * WEIGHTS.dissolved_oxygen
        + sub.bod * WEIGHTS.bod
        + sub.fecal_coliform * WEIGHTS.fecal_coliform
        + sub.conductivity * WEIGHTS.conductivity
        + sub.nitrate * WEIGHTS.nitrate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(v: f64) -> SubIndex {
        SubIndex {
            ph: v,
            dissolved_oxygen: v,
            bod: v,
            fecal_coliform: v,
            conductivity: v,
            nitrate: v,
        }
    }

    #[test]
    fn weights_sum_to_one() {
        assert!((WEIGHTS.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn saturated_sub_index_is_exactly_one_hundred() {
        assert_eq!(compute_index(&uniform(100.0)), 100.0);
        assert_eq!(compute_index(&uniform(0.0)), 0.0);
    }

    #[test]
    fn dissolved_oxygen_dominates() {
        let only_do = SubIndex {
            dissolved_oxygen: 100.0,
            ..uniform(0.0)
        };
        let only_ec = SubIndex {
            conductivity: 100.0,
            ..uniform(0.0)
        };
        assert!((compute_index(&only_do) - 28.0).abs() < 1e-9);
        assert!((compute_index(&only_ec) - 9.0).abs() < 1e-9);
    }
}
