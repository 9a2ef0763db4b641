use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownCategory;

/// Water quality classification, ordered best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualityCategory {
    Excellent,
    Good,
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
    #[serde(rename = "Unfit for Drinking")]
    UnfitForDrinking,
}

/// Closed upper bounds of the first four buckets; anything above the last
/// one is unfit.
const THRESHOLDS: [(f64, QualityCategory); 4] = [
    (25.0, QualityCategory::Excellent),
    (50.0, QualityCategory::Good),
    (75.0, QualityCategory::Poor),
    (100.0, QualityCategory::VeryPoor),
];

/// Buckets `index` by ascending thresholds, first match wins. NaN compares
/// false against every bound and so falls through to the last bucket.
pub fn classify(index: f64) -> QualityCategory {
    THRESHOLDS
        .iter()
        .find(|(upper, _)| index <= *upper)
        .map_or(QualityCategory::UnfitForDrinking, |(_, category)| *category)
}

impl QualityCategory {
    pub const ALL: [Self; 5] = [
        Self::Excellent,
        Self::Good,
        Self::Poor,
        Self::VeryPoor,
        Self::UnfitForDrinking,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
            Self::UnfitForDrinking => "Unfit for Drinking",
        }
    }

    /// Inclusive upper bound of the bucket, `None` for the open-ended one.
    pub fn upper_bound(self) -> Option<f64> {
        THRESHOLDS
            .iter()
            .find(|(_, category)| *category == self)
            .map(|(upper, _)| *upper)
    }

    /// Assessment first, treatment guidance second.
    pub const fn insights(self) -> [&'static str; 2] {
        match self {
            Self::Excellent => [
                "Excellent water quality suitable for all uses",
                "Minimal treatment required for drinking water",
            ],
            Self::Good => [
                "Good water quality with minor impurities",
                "Standard treatment recommended for drinking",
            ],
            Self::Poor => [
                "Water quality issues detected",
                "Requires treatment before consumption",
            ],
            Self::VeryPoor => [
                "Significant water quality concerns",
                "Not suitable for direct consumption",
            ],
            Self::UnfitForDrinking => [
                "Severe water pollution detected",
                "Immediate treatment required",
            ],
        }
    }
}

impl fmt::Display for QualityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QualityCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
