//! Weighted scoring shared by every category.
//!
//! The weights and the warning credit are fixed; re-running an analysis on
//! unchanged input must reproduce the same score.

use crate::types::{Finding, FindingType, Impact};

/// Score for a category with no findings
pub const NEUTRAL_SCORE: u8 = 50;

/// Fraction of its weight a warning earns
pub const WARNING_CREDIT: f64 = 0.35;

pub fn impact_weight(impact: Impact) -> f64 {
    match impact {
        Impact::High => 3.0,
        Impact::Medium => 2.0,
        Impact::Low => 1.0,
    }
}

/// Score findings on a 0-100 scale.
///
/// Successes earn their full weight, warnings earn [`WARNING_CREDIT`] of it
/// and errors earn nothing.
pub fn calc_score(findings: &[Finding]) -> u8 {
    if findings.is_empty() {
        return NEUTRAL_SCORE;
    }

    let (earned, total) = findings.iter().fold((0.0, 0.0), |(earned, total), f| {
        let weight = impact_weight(f.impact);
        let credit = match f.kind {
            FindingType::Success => weight,
            FindingType::Warning => weight * WARNING_CREDIT,
            FindingType::Error => 0.0,
        };
        (earned + credit, total + weight)
    });

    (100.0 * earned / total).round().clamp(0.0, 100.0) as u8
}

/// Arithmetic mean of scores, rounded; neutral when there is nothing to average
pub fn mean_score(scores: impl IntoIterator<Item = u8>) -> u8 {
    let (sum, count) = scores
        .into_iter()
        .fold((0u32, 0u32), |(sum, count), s| (sum + u32::from(s), count + 1));
    if count == 0 {
        return NEUTRAL_SCORE;
    }
    (f64::from(sum) / f64::from(count)).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Principle;

    fn finding(kind: FindingType, impact: Impact) -> Finding {
        match kind {
            FindingType::Success => Finding::success("ok", "ok", impact, Principle::Clarity),
            FindingType::Warning => {
                Finding::warning("meh", "meh", "fix it", impact, Principle::Clarity)
            }
            FindingType::Error => {
                Finding::error("bad", "bad", "fix it", impact, Principle::Clarity)
            }
        }
    }

    #[test]
    fn empty_is_neutral() {
        assert_eq!(calc_score(&[]), 50);
    }

    #[test]
    fn single_high_warning_earns_partial_credit() {
        assert_eq!(calc_score(&[finding(FindingType::Warning, Impact::High)]), 35);
    }

    #[test]
    fn all_success_and_all_error_are_extremes() {
        let good = [Impact::High, Impact::Medium, Impact::Low]
            .map(|i| finding(FindingType::Success, i));
        assert_eq!(calc_score(&good), 100);

        let bad = [Impact::High, Impact::Medium, Impact::Low]
            .map(|i| finding(FindingType::Error, i));
        assert_eq!(calc_score(&bad), 0);
    }

    #[test]
    fn mixed_findings_are_weighted() {
        // earned = 3 + 2*0.35 + 0 = 3.7, total = 6 -> 61.67
        let findings = [
            finding(FindingType::Success, Impact::High),
            finding(FindingType::Warning, Impact::Medium),
            finding(FindingType::Error, Impact::Low),
        ];
        assert_eq!(calc_score(&findings), 62);
    }

    #[test]
    fn mean_rounds_and_handles_empty() {
        assert_eq!(mean_score([50, 51]), 51);
        assert_eq!(mean_score([10, 20, 30]), 20);
        assert_eq!(mean_score(std::iter::empty()), 50);
    }
}
