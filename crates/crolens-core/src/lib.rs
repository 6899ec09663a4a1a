//! # crolens-core
//!
//! Conversion-rate-optimization audit engine for single web pages.
//!
//! This library provides:
//! - Page-type classification (home, product, collection, cart, checkout, landing)
//! - Nine rule-based category analyzers producing explainable findings
//! - Deterministic scoring, prioritized actions, quick wins and A/B test ideas
//! - Industry benchmark comparison and a technical/security audit
//! - Static signal extraction from raw HTML
//!
//! ## Features
//!
//! - `default`: Analysis core and static extraction (no network access)
//! - `fetch`: Live page, PageSpeed Insights and security-header fetching
//!
//! ## Example
//!
//! ```no_run
//! use crolens_core::{AnalysisInput, Thresholds, analyze, extract};
//!
//! let html = r#"<html><body><h1>Spar 30% i dag</h1><button>Køb nu</button></body></html>"#;
//! let thresholds = Thresholds::default();
//! let signals = extract(html, "https://shop.example/products/lamp", &thresholds);
//!
//! let result = analyze(&AnalysisInput::new(signals), &thresholds);
//! println!("{} page: {}/100", result.page_type, result.overall_score);
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod extract;
pub mod report;
pub mod rules;
pub mod scoring;
pub mod security;
pub mod signals;
pub mod synthesis;
pub mod text_index;
pub mod types;
pub mod url_utils;

#[cfg(feature = "fetch")]
pub mod fetch;

// Re-export commonly used types
pub use config::Thresholds;
pub use error::{CroError, Result};
pub use signals::{AnalysisInput, ScrapedSignals, SecurityHeadersData, SpeedData, Strategy};
pub use types::{
    AnalysisResult, Category, CategoryKey, Finding, FindingType, Impact, PageType, Principle,
};

pub use classifier::classify;
pub use extract::extract;
pub use report::{analyze, analyze_default};
pub use url_utils::parse_page_url;

#[cfg(feature = "fetch")]
pub use fetch::{ExternalData, ExternalOptions, fetch_page, gather_external};
