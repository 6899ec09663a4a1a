//! Common types used across crolens

use serde::{Deserialize, Serialize};
use std::fmt;

/// Commercial intent of a page, as decided by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Home,
    Product,
    Collection,
    Cart,
    Checkout,
    Landing,
}

impl PageType {
    pub const ALL: [PageType; 6] = [
        PageType::Home,
        PageType::Product,
        PageType::Collection,
        PageType::Cart,
        PageType::Checkout,
        PageType::Landing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PageType::Home => "home",
            PageType::Product => "product",
            PageType::Collection => "collection",
            PageType::Cart => "cart",
            PageType::Checkout => "checkout",
            PageType::Landing => "landing",
        }
    }

    /// Human label used in summaries and benchmark context
    pub fn label(self) -> &'static str {
        match self {
            PageType::Home => "home page",
            PageType::Product => "product page",
            PageType::Collection => "collection page",
            PageType::Cart => "cart page",
            PageType::Checkout => "checkout page",
            PageType::Landing => "landing page",
        }
    }

    pub fn is_commerce(self) -> bool {
        matches!(
            self,
            PageType::Product | PageType::Collection | PageType::Cart | PageType::Checkout
        )
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single rule check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingType {
    Success,
    Warning,
    Error,
}

impl FindingType {
    /// Sort rank used when prioritizing: errors before warnings
    pub(crate) fn rank(self) -> u8 {
        match self {
            FindingType::Error => 0,
            FindingType::Warning => 1,
            FindingType::Success => 2,
        }
    }
}

/// Expected conversion impact of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub(crate) fn rank(self) -> u8 {
        match self {
            Impact::High => 0,
            Impact::Medium => 1,
            Impact::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Impact::High => "high",
            Impact::Medium => "medium",
            Impact::Low => "low",
        }
    }
}

/// CRO principle a finding is rooted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Principle {
    #[serde(rename = "Clarity")]
    Clarity,
    #[serde(rename = "F-Pattern")]
    FPattern,
    #[serde(rename = "Fitts' Law")]
    FittsLaw,
    #[serde(rename = "Von Restorff Effect")]
    VonRestorff,
    #[serde(rename = "Hick's Law")]
    HicksLaw,
    #[serde(rename = "Social Proof")]
    SocialProof,
    #[serde(rename = "Authority")]
    Authority,
    #[serde(rename = "Trust")]
    Trust,
    #[serde(rename = "Cognitive Load")]
    CognitiveLoad,
    #[serde(rename = "Jakob's Law")]
    JakobsLaw,
    #[serde(rename = "Aesthetic-Usability Effect")]
    AestheticUsability,
    #[serde(rename = "Doherty Threshold")]
    DohertyThreshold,
    #[serde(rename = "Scarcity")]
    Scarcity,
    #[serde(rename = "Loss Aversion")]
    LossAversion,
    #[serde(rename = "Reciprocity")]
    Reciprocity,
    #[serde(rename = "Friction")]
    Friction,
    #[serde(rename = "Accessibility")]
    Accessibility,
}

impl Principle {
    pub fn as_str(self) -> &'static str {
        match self {
            Principle::Clarity => "Clarity",
            Principle::FPattern => "F-Pattern",
            Principle::FittsLaw => "Fitts' Law",
            Principle::VonRestorff => "Von Restorff Effect",
            Principle::HicksLaw => "Hick's Law",
            Principle::SocialProof => "Social Proof",
            Principle::Authority => "Authority",
            Principle::Trust => "Trust",
            Principle::CognitiveLoad => "Cognitive Load",
            Principle::JakobsLaw => "Jakob's Law",
            Principle::AestheticUsability => "Aesthetic-Usability Effect",
            Principle::DohertyThreshold => "Doherty Threshold",
            Principle::Scarcity => "Scarcity",
            Principle::LossAversion => "Loss Aversion",
            Principle::Reciprocity => "Reciprocity",
            Principle::Friction => "Friction",
            Principle::Accessibility => "Accessibility",
        }
    }
}

/// One typed observation produced by a single rule check.
///
/// Findings are only built through [`Finding::success`], [`Finding::warning`]
/// and [`Finding::error`], which keeps `recommendation` empty exactly when the
/// check passed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "type")]
    pub kind: FindingType,
    pub title: String,
    pub description: String,
    pub recommendation: String,
    pub impact: Impact,
    pub principle: Principle,
}

impl Finding {
    pub fn success(
        title: impl Into<String>,
        description: impl Into<String>,
        impact: Impact,
        principle: Principle,
    ) -> Self {
        Self {
            kind: FindingType::Success,
            title: title.into(),
            description: description.into(),
            recommendation: String::new(),
            impact,
            principle,
        }
    }

    pub fn warning(
        title: impl Into<String>,
        description: impl Into<String>,
        recommendation: impl Into<String>,
        impact: Impact,
        principle: Principle,
    ) -> Self {
        Self::issue(
            FindingType::Warning,
            title.into(),
            description.into(),
            recommendation.into(),
            impact,
            principle,
        )
    }

    pub fn error(
        title: impl Into<String>,
        description: impl Into<String>,
        recommendation: impl Into<String>,
        impact: Impact,
        principle: Principle,
    ) -> Self {
        Self::issue(
            FindingType::Error,
            title.into(),
            description.into(),
            recommendation.into(),
            impact,
            principle,
        )
    }

    fn issue(
        kind: FindingType,
        title: String,
        description: String,
        recommendation: String,
        impact: Impact,
        principle: Principle,
    ) -> Self {
        debug_assert!(
            !recommendation.trim().is_empty(),
            "non-success finding '{title}' needs a recommendation"
        );
        Self {
            kind,
            title,
            description,
            recommendation,
            impact,
            principle,
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == FindingType::Success
    }
}

/// Stable identifier of one of the nine analysis categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryKey {
    #[serde(rename = "above-the-fold")]
    AboveTheFold,
    #[serde(rename = "cta")]
    Cta,
    #[serde(rename = "trust")]
    Trust,
    #[serde(rename = "content")]
    Content,
    #[serde(rename = "navigation")]
    Navigation,
    #[serde(rename = "design")]
    Design,
    #[serde(rename = "performance")]
    Performance,
    #[serde(rename = "conversion")]
    Conversion,
    #[serde(rename = "friction")]
    Friction,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 9] = [
        CategoryKey::AboveTheFold,
        CategoryKey::Cta,
        CategoryKey::Trust,
        CategoryKey::Content,
        CategoryKey::Navigation,
        CategoryKey::Design,
        CategoryKey::Performance,
        CategoryKey::Conversion,
        CategoryKey::Friction,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKey::AboveTheFold => "above-the-fold",
            CategoryKey::Cta => "cta",
            CategoryKey::Trust => "trust",
            CategoryKey::Content => "content",
            CategoryKey::Navigation => "navigation",
            CategoryKey::Design => "design",
            CategoryKey::Performance => "performance",
            CategoryKey::Conversion => "conversion",
            CategoryKey::Friction => "friction",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CategoryKey::AboveTheFold => "Above the Fold",
            CategoryKey::Cta => "Call to Action",
            CategoryKey::Trust => "Social Proof & Trust",
            CategoryKey::Content => "Content & Copywriting",
            CategoryKey::Navigation => "Navigation & Structure",
            CategoryKey::Design => "Visual Design & UX",
            CategoryKey::Performance => "Mobile & Performance",
            CategoryKey::Conversion => "Conversion Elements",
            CategoryKey::Friction => "Friction & Barriers",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            CategoryKey::AboveTheFold => "👁️",
            CategoryKey::Cta => "🎯",
            CategoryKey::Trust => "⭐",
            CategoryKey::Content => "✍️",
            CategoryKey::Navigation => "🧭",
            CategoryKey::Design => "🎨",
            CategoryKey::Performance => "📱",
            CategoryKey::Conversion => "💰",
            CategoryKey::Friction => "🚧",
        }
    }
}

/// Scored result of one analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub key: CategoryKey,
    pub name: String,
    pub icon: String,
    pub score: u8,
    pub findings: Vec<Finding>,
}

/// A high-impact finding surfaced for immediate remediation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickWin {
    pub title: String,
    pub description: String,
    pub estimated_impact: String,
}

/// A ranked experiment suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbTestIdea {
    pub id: u32,
    pub title: String,
    pub hypothesis: String,
    pub variant_a: String,
    pub variant_b: String,
    pub metric: String,
    pub expected_impact: Impact,
    pub category: CategoryKey,
    pub page_types: Vec<PageType>,
    pub priority: u32,
}

/// Position of a score relative to the industry table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenchmarkStatus {
    Above,
    At,
    Below,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkComparison {
    pub metric: String,
    pub your_value: u8,
    pub industry_avg: u8,
    pub top_performers: u8,
    pub status: BenchmarkStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmark {
    pub overall_position: String,
    pub comparisons: Vec<BenchmarkComparison>,
    pub industry_context: String,
}

/// Status of a technical or security check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
    Warning,
    Info,
}

/// Risk tier carried by a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    None,
    Low,
    Medium,
    High,
}

/// Aggregate risk rating of the technical/security audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskRating {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityCheck {
    pub category: String,
    pub label: String,
    pub status: CheckStatus,
    pub value: String,
    pub risk: Risk,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub how_to_fix: Option<String>,
}

/// Checks sharing a category name, in first-seen order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityCheckGroup {
    pub category: String,
    pub checks: Vec<SecurityCheck>,
}

/// Core Web Vital classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VitalRating {
    Good,
    NeedsImprovement,
    Poor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebVital {
    pub metric: String,
    pub value: String,
    pub rating: VitalRating,
    pub threshold: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalHealth {
    pub score: u8,
    pub risk: RiskRating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_practices_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_score: Option<u8>,
    pub core_web_vitals: Vec<WebVital>,
    pub groups: Vec<SecurityCheckGroup>,
    pub opportunities: Vec<crate::signals::Audit>,
    pub diagnostics: Vec<crate::signals::Audit>,
    pub passed_count: usize,
}

/// Root aggregate returned for one analyzed page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_score: u8,
    pub page_type: PageType,
    pub summary: String,
    pub categories: Vec<Category>,
    pub quick_wins: Vec<QuickWin>,
    pub prioritized_actions: Vec<String>,
    pub ab_test_ideas: Vec<AbTestIdea>,
    pub benchmark: Benchmark,
    pub technical_health: Option<TechnicalHealth>,
}

impl AnalysisResult {
    pub fn category(&self, key: CategoryKey) -> Option<&Category> {
        self.categories.iter().find(|c| c.key == key)
    }
}
