//! Orchestrator: one `AnalysisInput` in, one `AnalysisResult` out.

use crate::classifier::classify;
use crate::config::Thresholds;
use crate::rules::{RuleContext, analyze_categories};
use crate::scoring::mean_score;
use crate::security;
use crate::signals::AnalysisInput;
use crate::synthesis;
use crate::text_index::TextIndex;
use crate::types::AnalysisResult;

/// Run the whole pipeline. Total and deterministic: identical input yields
/// an identical result.
pub fn analyze(input: &AnalysisInput, thresholds: &Thresholds) -> AnalysisResult {
    let signals = &input.signals;
    let page_type = classify(signals);
    let text = TextIndex::build(signals);
    let speed = input.primary_speed();

    let ctx = RuleContext {
        signals,
        page_type,
        speed,
        text: &text,
        thresholds,
    };
    let categories = analyze_categories(&ctx);
    let overall_score = mean_score(categories.iter().map(|c| c.score));

    let findings = || categories.iter().flat_map(|c| &c.findings);
    let prioritized_actions = synthesis::prioritized_actions(findings(), thresholds.action_limit);
    let quick_wins = synthesis::quick_wins(findings(), thresholds.quick_win_limit);
    let summary = synthesis::summary(overall_score, page_type, &categories);
    let ab_test_ideas =
        synthesis::select_ab_tests(page_type, &categories, thresholds.ab_test_limit);
    let benchmark = synthesis::compare(overall_score, page_type, &categories, speed);
    let technical_health =
        security::audit(signals, speed, input.security_headers.as_ref(), thresholds);

    tracing::info!(
        url = %signals.url,
        page_type = %page_type,
        overall_score,
        actions = prioritized_actions.len(),
        "analysis complete"
    );

    AnalysisResult {
        overall_score,
        page_type,
        summary,
        categories,
        quick_wins,
        prioritized_actions,
        ab_test_ideas,
        benchmark,
        technical_health,
    }
}

/// [`analyze`] with default thresholds
pub fn analyze_default(input: &AnalysisInput) -> AnalysisResult {
    analyze(input, &Thresholds::default())
}
