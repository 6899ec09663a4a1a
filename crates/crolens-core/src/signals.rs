//! Signal model: everything extractable from one rendered page.
//!
//! These records are produced outside the analysis core (a headless scraper,
//! or the static fallback in [`crate::extract`]) and arrive as JSON. Every
//! field has a default so that a partially populated record is still a valid
//! input; missing data degrades to findings, never to errors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::Thresholds;
use crate::error::{CroError, Result};

/// Upper bounds applied during extraction
pub const MAX_HEADINGS: usize = 50;
pub const MAX_CTAS: usize = 30;
pub const MAX_IMAGES: usize = 50;
pub const MAX_LINKS: usize = 100;
pub const MAX_TEXT_CHARS: usize = 8_000;
pub const MAX_FRAGMENTS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScrapedSignals {
    pub url: String,
    pub title: String,
    pub meta_description: String,
    pub headings: Vec<Heading>,
    pub ctas: Vec<Cta>,
    pub forms: Vec<FormInfo>,
    pub trust_signals: Vec<TrustSignal>,
    pub copy_analysis: CopyAnalysis,
    pub structure: StructuralFlags,
    pub page_signals: PageSignals,
    pub images: Vec<ImageInfo>,
    pub links: Vec<LinkInfo>,
    pub meta_tags: BTreeMap<String, String>,
    pub performance: PerformanceTiming,
    /// `None` when the producer collected no security signals at all
    pub security: Option<SecuritySignals>,
    pub ux: UxSignals,
    pub text_content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Heading {
    pub tag: String,
    pub text: String,
    pub is_above_fold: bool,
}

impl Heading {
    /// Heading level 1-6, or `None` for a malformed tag
    pub fn level(&self) -> Option<u8> {
        let tag = self.tag.trim().to_ascii_lowercase();
        let digit = tag.strip_prefix('h')?.parse::<u8>().ok()?;
        (1..=6).contains(&digit).then_some(digit)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cta {
    pub text: String,
    pub tag: String,
    pub href: Option<String>,
    pub is_above_fold: bool,
    pub font_size_px: f64,
    pub area_px2: f64,
}

impl Cta {
    /// A CTA is primary when it is both large and legible enough to dominate
    pub fn is_primary(&self, thresholds: &Thresholds) -> bool {
        self.area_px2 >= thresholds.primary_cta_min_area_px2
            && self.font_size_px >= thresholds.primary_cta_min_font_px
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormInfo {
    pub field_count: usize,
    pub has_labels: bool,
    pub has_validation: bool,
    pub field_types: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustKind {
    Badge,
    Text,
    SocialProof,
    Authority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustSignal {
    pub kind: TrustKind,
    #[serde(default)]
    pub description: String,
}

/// Sentence-level classified text fragments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CopyAnalysis {
    pub usps: Vec<String>,
    pub benefit_statements: Vec<String>,
    pub feature_statements: Vec<String>,
    pub urgency_elements: Vec<String>,
    pub guarantee_statements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuralFlags {
    pub has_nav: bool,
    pub has_footer: bool,
    pub has_hero: bool,
    #[serde(rename = "hasFAQ", alias = "hasFaq")]
    pub has_faq: bool,
    pub has_testimonials: bool,
    pub has_pricing: bool,
    pub has_video: bool,
    pub has_trust_badges: bool,
    pub has_newsletter: bool,
    pub has_product_gallery: bool,
    pub has_add_to_cart: bool,
    pub has_checkout_form: bool,
    pub has_filters: bool,
    pub has_breadcrumbs: bool,
    pub has_progress_indicator: bool,
    pub section_count: usize,
    pub nav_item_count: usize,
}

/// Signals used only for page classification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSignals {
    pub has_product_schema: bool,
    pub price_visible: bool,
    pub product_count: usize,
    pub checkout_indicator_count: usize,
    pub add_to_cart_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageInfo {
    pub src: String,
    pub alt: String,
    pub has_alt: bool,
    pub is_above_fold: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkInfo {
    pub text: String,
    pub href: String,
    pub is_external: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PerformanceTiming {
    pub load_time_ms: f64,
    pub dom_content_loaded_ms: f64,
    pub resource_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecuritySignals {
    pub is_https: bool,
    pub has_mixed_content: bool,
    pub exposed_emails: Vec<String>,
    pub third_party_scripts: usize,
    pub third_party_scripts_without_sri: usize,
    pub jquery_version: Option<String>,
    pub has_admin_login_link: bool,
    pub has_aggressive_popup: bool,
    pub has_privacy_policy_link: bool,
    pub has_checkout_security_badge: bool,
    pub has_password_field: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UxSignals {
    pub has_search: bool,
    pub has_cookie_consent: bool,
    pub has_chat_widget: bool,
    pub has_sticky_header: bool,
}

/// Lighthouse strategy a speed record was measured with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Mobile,
    Desktop,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Mobile => "mobile",
            Strategy::Desktop => "desktop",
        }
    }
}

/// One Lighthouse audit line (opportunity or diagnostic)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Audit {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
    pub description: String,
}

/// Lighthouse-style metrics for one strategy. Scores are 0-100, timings in ms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpeedData {
    pub strategy: Strategy,
    pub performance_score: u8,
    pub accessibility_score: u8,
    pub best_practices_score: u8,
    pub seo_score: u8,
    pub lcp_ms: f64,
    pub fcp_ms: f64,
    pub tbt_ms: f64,
    pub cls: f64,
    pub si_ms: f64,
    pub ttfb_ms: f64,
    pub opportunities: Vec<Audit>,
    pub diagnostics: Vec<Audit>,
    pub passed_audits: usize,
}

/// Response headers relevant to the security audit, plus robots.txt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityHeadersData {
    pub strict_transport_security: Option<String>,
    pub content_security_policy: Option<String>,
    pub x_frame_options: Option<String>,
    pub x_content_type_options: Option<String>,
    pub referrer_policy: Option<String>,
    pub permissions_policy: Option<String>,
    pub server: Option<String>,
    pub x_powered_by: Option<String>,
    pub robots_txt: Option<String>,
}

/// Everything the core consumes for one request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisInput {
    pub signals: ScrapedSignals,
    pub desktop_speed: Option<SpeedData>,
    pub mobile_speed: Option<SpeedData>,
    pub security_headers: Option<SecurityHeadersData>,
    /// Which speed record the rules and the benchmark read first
    pub viewport: Strategy,
}

impl AnalysisInput {
    pub fn new(signals: ScrapedSignals) -> Self {
        Self {
            signals,
            ..Default::default()
        }
    }

    /// Metrics for the audited viewport, falling back to the other strategy
    pub fn primary_speed(&self) -> Option<&SpeedData> {
        let (preferred, fallback) = match self.viewport {
            Strategy::Mobile => (&self.mobile_speed, &self.desktop_speed),
            Strategy::Desktop => (&self.desktop_speed, &self.mobile_speed),
        };
        preferred.as_ref().or(fallback.as_ref())
    }
}

impl ScrapedSignals {
    /// Parse a signals record produced by an external scraper
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }

    pub fn h1_headings(&self) -> impl Iterator<Item = &Heading> {
        self.headings.iter().filter(|h| h.level() == Some(1))
    }

    pub fn meta(&self, name: &str) -> Option<&str> {
        self.meta_tags
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn has_trust(&self, kind: TrustKind) -> bool {
        self.trust_signals.iter().any(|t| t.kind == kind)
    }

    pub fn has_viewport_meta(&self) -> bool {
        self.meta("viewport").is_some()
    }
}

/// Read any JSON-shaped input record from disk
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path).map_err(|source| CroError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_is_accepted() {
        let json = r#"{
            "url": "https://shop.example/products/lamp",
            "headings": [{"tag": "H1", "text": "Spar 30%", "isAboveFold": true}],
            "structure": {"hasFAQ": true, "navItemCount": 5},
            "ctas": [{"text": "Buy now", "tag": "button", "isPrimary": true}]
        }"#;

        let signals = ScrapedSignals::from_json(json).unwrap();
        assert_eq!(signals.headings[0].level(), Some(1));
        assert!(signals.structure.has_faq);
        assert_eq!(signals.structure.nav_item_count, 5);
        assert!(signals.security.is_none());
        // isPrimary is derived, never read from input
        assert!(!signals.ctas[0].is_primary(&Thresholds::default()));
    }

    #[test]
    fn heading_level_rejects_garbage() {
        let heading = Heading {
            tag: "header".to_string(),
            ..Default::default()
        };
        assert_eq!(heading.level(), None);

        let heading = Heading {
            tag: "h7".to_string(),
            ..Default::default()
        };
        assert_eq!(heading.level(), None);
    }

    #[test]
    fn primary_cta_needs_both_thresholds() {
        let thresholds = Thresholds::default();
        let mut cta = Cta {
            text: "Add to cart".to_string(),
            font_size_px: 18.0,
            area_px2: 9_000.0,
            ..Default::default()
        };
        assert!(cta.is_primary(&thresholds));

        cta.font_size_px = 12.0;
        assert!(!cta.is_primary(&thresholds));
    }

    #[test]
    fn primary_speed_prefers_mobile() {
        let mut input = AnalysisInput::default();
        input.desktop_speed = Some(SpeedData {
            strategy: Strategy::Desktop,
            performance_score: 90,
            ..Default::default()
        });
        assert_eq!(input.primary_speed().unwrap().performance_score, 90);

        input.mobile_speed = Some(SpeedData {
            performance_score: 40,
            ..Default::default()
        });
        assert_eq!(input.primary_speed().unwrap().strategy, Strategy::Mobile);
    }

    #[test]
    fn desktop_viewport_reads_desktop_metrics() {
        let input: AnalysisInput = serde_json::from_str(
            r#"{
                "viewport": "desktop",
                "mobileSpeed": {"strategy": "mobile", "performanceScore": 40},
                "desktopSpeed": {"strategy": "desktop", "performanceScore": 90}
            }"#,
        )
        .unwrap();
        assert_eq!(input.primary_speed().unwrap().performance_score, 90);

        let only_mobile = AnalysisInput {
            desktop_speed: None,
            ..input
        };
        assert_eq!(only_mobile.primary_speed().unwrap().strategy, Strategy::Mobile);
    }
}
