use tracing::warn;

use crate::category::{classify, QualityCategory};
use crate::measurement::{Measurement, Parameter};

/// Two advisory sentences for the bucket `index` falls in.
///
/// The bucket is recomputed from `index`; `category` is only checked for
/// consistency.
pub fn insights(index: f64, category: QualityCategory) -> Vec<&'static str> {
    let bucket = classify(index);
    if bucket != category {
        warn!(index, %category, %bucket, "insights requested with a category that does not match the index");
    }
    bucket.insights().to_vec()
}

struct FeedbackRule {
    parameter: Parameter,
    fires: fn(f64) -> bool,
    message: &'static str,
}

static FEEDBACK_RULES: [FeedbackRule; 5] = [
    FeedbackRule {
        parameter: Parameter::Ph,
        fires: |v| v < 6.5 || v > 8.5,
        message: "pH levels are outside optimal range (6.5-8.5)",
    },
    FeedbackRule {
        parameter: Parameter::DissolvedOxygen,
        fires: |v| v < 5.0,
        message: "Low dissolved oxygen may stress aquatic life",
    },
    FeedbackRule {
        parameter: Parameter::Bod,
        fires: |v| v > 5.0,
        message: "High BOD indicates organic pollution",
    },
    FeedbackRule {
        parameter: Parameter::FecalColiform,
        fires: |v| v > 200.0,
        message: "Elevated fecal coliform suggests contamination",
    },
    FeedbackRule {
        parameter: Parameter::Conductivity,
        fires: |v| v > 1000.0,
        message: "High conductivity indicates excess dissolved solids",
    },
];

/// Per-parameter range warnings. Works on unvalidated readings.
pub fn parameter_feedback(measurement: &Measurement) -> Vec<&'static str> {
    FEEDBACK_RULES
        .iter()
        .filter(|rule| (rule.fires)(measurement.value(rule.parameter)))
        .map(|rule| rule.message)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insights_follow_index_buckets() {
        assert_eq!(
            insights(10.0, QualityCategory::Excellent),
            vec![
                "Excellent water quality suitable for all uses",
                "Minimal treatment required for drinking water"
            ]
        );
        assert_eq!(
            insights(60.3, QualityCategory::Poor),
            vec![
                "Water quality issues detected",
                "Requires treatment before consumption"
            ]
        );
        assert_eq!(
            insights(100.0, QualityCategory::VeryPoor)[0],
            "Significant water quality concerns"
        );
        assert_eq!(
            insights(120.0, QualityCategory::UnfitForDrinking)[1],
            "Immediate treatment required"
        );
    }

    #[test]
    fn insights_ignore_a_mismatched_category() {
        assert_eq!(
            insights(40.0, QualityCategory::UnfitForDrinking),
            QualityCategory::Good.insights().to_vec()
        );
    }

    #[test]
    fn in_range_sample_has_no_feedback() {
        assert!(parameter_feedback(&Measurement::sample()).is_empty());
    }

    #[test]
    fn all_rules_fire_in_field_order() {
        let m = Measurement {
            ph: 9.0,
            dissolved_oxygen: 3.0,
            bod: 10.0,
            fecal_coliform: 300.0,
            conductivity: 2000.0,
            ..Measurement::sample()
        };
        assert_eq!(
            parameter_feedback(&m),
            vec![
                "pH levels are outside optimal range (6.5-8.5)",
                "Low dissolved oxygen may stress aquatic life",
                "High BOD indicates organic pollution",
                "Elevated fecal coliform suggests contamination",
                "High conductivity indicates excess dissolved solids",
            ]
        );
    }

    #[test]
    fn rule_bounds_are_exclusive() {
        let m = Measurement {
            ph: 6.5,
            dissolved_oxygen: 5.0,
            bod: 5.0,
            fecal_coliform: 200.0,
            conductivity: 1000.0,
            ..Measurement::sample()
        };
        assert!(parameter_feedback(&m).is_empty());

        let acidic = Measurement {
            ph: 6.4,
            ..Measurement::sample()
        };
        assert_eq!(parameter_feedback(&acidic).len(), 1);
    }

    #[test]
    fn feedback_does_not_gate_on_validity() {
        let m = Measurement {
            ph: -1.0,
            dissolved_oxygen: 0.0,
            ..Measurement::sample()
        };
        assert!(m.validate().is_err());
        assert_eq!(parameter_feedback(&m).len(), 2);
    }
}
