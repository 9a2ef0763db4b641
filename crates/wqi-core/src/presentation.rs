//! Display-side lookups keyed by category. Nothing here feeds back into the
//! index or the classification.

use serde::Serialize;

use crate::category::QualityCategory;

pub const fn style_tag(category: QualityCategory) -> &'static str {
    match category {
        QualityCategory::Excellent => "quality-excellent",
        QualityCategory::Good => "quality-good",
        QualityCategory::Poor => "quality-poor",
        QualityCategory::VeryPoor => "quality-very-poor",
        QualityCategory::UnfitForDrinking => "quality-unfit",
    }
}

/// One row of the quality scale legend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleEntry {
    pub category: QualityCategory,
    pub style_tag: &'static str,
    /// Legend text, e.g. `"26-50"`.
    pub range: &'static str,
    pub lower: f64,
    pub upper: Option<f64>,
}

static QUALITY_SCALE: [ScaleEntry; 5] = [
    ScaleEntry {
        category: QualityCategory::Excellent,
        style_tag: style_tag(QualityCategory::Excellent),
        range: "0-25",
        lower: 0.0,
        upper: Some(25.0),
    },
    ScaleEntry {
        category: QualityCategory::Good,
        style_tag: style_tag(QualityCategory::Good),
        range: "26-50",
        lower: 25.0,
        upper: Some(50.0),
    },
    ScaleEntry {
        category: QualityCategory::Poor,
        style_tag: style_tag(QualityCategory::Poor),
        range: "51-75",
        lower: 50.0,
        upper: Some(75.0),
    },
    ScaleEntry {
        category: QualityCategory::VeryPoor,
        style_tag: style_tag(QualityCategory::VeryPoor),
        range: "76-100",
        lower: 75.0,
        upper: Some(100.0),
    },
    ScaleEntry {
        category: QualityCategory::UnfitForDrinking,
        style_tag: style_tag(QualityCategory::UnfitForDrinking),
        range: "100+",
        lower: 100.0,
        upper: None,
    },
];

pub fn quality_scale() -> &'static [ScaleEntry] {
    &QUALITY_SCALE
}

/// Fill level for a 0..=100 gauge.
pub fn progress_value(index: f64) -> f64 {
    index.min(100.0)
}

pub fn format_index(index: f64) -> String {
    format!("{index:.1}")
}
