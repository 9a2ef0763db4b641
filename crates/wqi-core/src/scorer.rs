use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::category::{classify, QualityCategory};
use crate::error::ValidationError;
use crate::measurement::Measurement;
use crate::normalize::{normalize, SubIndex};
use crate::presentation::style_tag;
use crate::uncertainty::add_uncertainty;
use crate::weights::compute_index;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictOptions {
    /// Apply the cosmetic ±2.5 jitter. Off unless asked for.
    #[serde(default)]
    pub with_uncertainty: bool,
}

impl PredictOptions {
    pub const fn deterministic() -> Self {
        Self {
            with_uncertainty: false,
        }
    }

    pub const fn with_uncertainty() -> Self {
        Self {
            with_uncertainty: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub category: QualityCategory,
    pub index: f64,
    pub presentation_tag: &'static str,
    pub sub_index: SubIndex,
}

/// Scores a measurement, drawing any jitter from the thread-local RNG.
pub fn predict(
    measurement: &Measurement,
    options: PredictOptions,
) -> Result<PredictionResult, ValidationError> {
    predict_with_rng(measurement, options, &mut rand::thread_rng())
}

/// validate → normalize → weight → (jitter) → classify.
///
/// `rng` is untouched when `options.with_uncertainty` is false.
pub fn predict_with_rng<R: Rng>(
    measurement: &Measurement,
    options: PredictOptions,
    rng: &mut R,
) -> Result<PredictionResult, ValidationError> {
    let validated = measurement.validate()?;
    let sub_index = normalize(&validated);
    let raw = compute_index(&sub_index);
    let index = if options.with_uncertainty {
        add_uncertainty(raw, rng)
    } else {
        raw
    };
    let category = classify(index);
    debug!(raw, index, %category, with_uncertainty = options.with_uncertainty, "scored measurement");

    Ok(PredictionResult {
        category,
        index,
        presentation_tag: style_tag(category),
        sub_index,
    })
}
