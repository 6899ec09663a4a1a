//! Tunable thresholds for the rule engine and the static extractor.
//!
//! Scoring weights are deliberately absent: they live in [`crate::scoring`]
//! and are not configurable.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::signals::read_json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Thresholds {
    /// Navigation items above this count trigger a Hick's-law warning
    pub nav_max_items: usize,
    pub primary_cta_min_area_px2: f64,
    pub primary_cta_min_font_px: f64,
    pub max_ctas: usize,

    pub meta_description_min_chars: usize,
    pub meta_description_max_chars: usize,
    pub title_min_chars: usize,
    pub title_max_chars: usize,

    /// Local load-time bands used when no Lighthouse data is present
    pub load_time_good_ms: f64,
    pub load_time_poor_ms: f64,
    pub lcp_good_ms: f64,
    pub lcp_poor_ms: f64,
    pub cls_warning: f64,
    pub tbt_good_ms: f64,
    pub tbt_poor_ms: f64,
    pub max_resources: usize,

    pub max_form_fields: usize,

    pub action_limit: usize,
    pub quick_win_limit: usize,
    pub ab_test_limit: usize,

    /// Static extraction only: elements at or before this document position
    /// count as above the fold
    pub fold_element_count: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            nav_max_items: 7,
            primary_cta_min_area_px2: 4_000.0,
            primary_cta_min_font_px: 16.0,
            max_ctas: 15,
            meta_description_min_chars: 100,
            meta_description_max_chars: 160,
            title_min_chars: 30,
            title_max_chars: 60,
            load_time_good_ms: 2_000.0,
            load_time_poor_ms: 4_000.0,
            lcp_good_ms: 2_500.0,
            lcp_poor_ms: 4_000.0,
            cls_warning: 0.25,
            tbt_good_ms: 200.0,
            tbt_poor_ms: 600.0,
            max_resources: 100,
            max_form_fields: 5,
            action_limit: 5,
            quick_win_limit: 5,
            ab_test_limit: 15,
            fold_element_count: 120,
        }
    }
}

impl Thresholds {
    /// Load thresholds from a JSON file; omitted fields keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }
}
