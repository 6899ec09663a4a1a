//! Post-processing of the nine scored categories into the report's
//! actionable sections.

mod benchmark;

pub use ab_tests::{AbTestTemplate, POOL, idea_priority, select_ab_tests};
pub use benchmark::{BENCHMARKS, BenchmarkRow, LIGHTHOUSE_AVG, LIGHTHOUSE_TOP, compare};

use crate::types::{Category, Finding, FindingType, Impact, PageType, QuickWin};

/// Recommendations of all non-success findings, most severe first.
///
/// Ordering is stable: findings of equal impact and type keep the order in
/// which their categories and checks produced them.
pub fn prioritized_actions<'a>(
    findings: impl IntoIterator<Item = &'a Finding>,
    limit: usize,
) -> Vec<String> {
    let mut issues: Vec<&Finding> = findings
        .into_iter()
        .filter(|f| !f.is_success() && !f.recommendation.is_empty())
        .collect();
    issues.sort_by_key(|f| (f.impact.rank(), f.kind.rank()));

    issues
        .into_iter()
        .take(limit)
        .map(|f| f.recommendation.clone())
        .collect()
}

/// High-impact issues in report order
pub fn quick_wins<'a>(
    findings: impl IntoIterator<Item = &'a Finding>,
    limit: usize,
) -> Vec<QuickWin> {
    findings
        .into_iter()
        .filter(|f| !f.is_success() && f.impact == Impact::High)
        .take(limit)
        .map(|f| QuickWin {
            title: f.title.clone(),
            description: f.recommendation.clone(),
            estimated_impact: match f.kind {
                FindingType::Error => "High: removes a conversion blocker".to_string(),
                _ => "Medium: strengthens a key element".to_string(),
            },
        })
        .collect()
}

/// One-paragraph verdict naming the overall score and the extremes.
///
/// Ties resolve to the category that comes first in report order.
pub fn summary(overall_score: u8, page_type: PageType, categories: &[Category]) -> String {
    let errors = categories
        .iter()
        .flat_map(|c| &c.findings)
        .filter(|f| f.kind == FindingType::Error)
        .count();

    let mut best: Option<&Category> = None;
    let mut worst: Option<&Category> = None;
    for category in categories {
        if best.is_none_or(|b| category.score > b.score) {
            best = Some(category);
        }
        if worst.is_none_or(|w| category.score < w.score) {
            worst = Some(category);
        }
    }

    let verdict = match overall_score {
        80.. => "performs well",
        60..=79 => "has a solid base with room to improve",
        40..=59 => "has clear conversion gaps",
        _ => "has serious conversion problems",
    };
    let issues = match errors {
        0 => "no critical issues".to_string(),
        1 => "1 critical issue".to_string(),
        n => format!("{n} critical issues"),
    };

    let mut text = format!(
        "This {} scores {overall_score}/100 and {verdict}, with {issues}.",
        page_type.label()
    );
    if let (Some(best), Some(worst)) = (best, worst) {
        text.push_str(&format!(
            " Strongest area: {} ({}). Weakest area: {} ({}).",
            best.name, best.score, worst.name, worst.score
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CategoryKey, Principle};

    fn error(title: &str, impact: Impact) -> Finding {
        Finding::error(title, title, format!("fix {title}"), impact, Principle::Clarity)
    }

    fn warning(title: &str, impact: Impact) -> Finding {
        Finding::warning(title, title, format!("fix {title}"), impact, Principle::Clarity)
    }

    fn category(key: CategoryKey, score: u8, findings: Vec<Finding>) -> Category {
        Category {
            key,
            name: key.name().to_string(),
            icon: key.icon().to_string(),
            score,
            findings,
        }
    }

    #[test]
    fn actions_order_by_impact_then_type() {
        let findings = [
            error("a", Impact::High),
            warning("b", Impact::Medium),
            warning("c", Impact::High),
            Finding::success("d", "d", Impact::High, Principle::Clarity),
        ];
        let actions = prioritized_actions(&findings, 5);
        assert_eq!(actions, ["fix a", "fix c", "fix b"]);
    }

    #[test]
    fn actions_prefer_errors_within_an_impact_and_respect_limit() {
        let findings = [
            warning("w1", Impact::High),
            error("e1", Impact::High),
            warning("w2", Impact::High),
            error("e2", Impact::Low),
        ];
        assert_eq!(prioritized_actions(&findings, 2), ["fix e1", "fix w1"]);
    }

    #[test]
    fn quick_wins_keep_high_impact_only() {
        let findings = [
            warning("low", Impact::Low),
            error("blocker", Impact::High),
            warning("weak", Impact::High),
        ];
        let wins = quick_wins(&findings, 5);
        assert_eq!(wins.len(), 2);
        assert_eq!(wins[0].title, "blocker");
        assert_eq!(wins[0].description, "fix blocker");
        assert!(wins[0].estimated_impact.starts_with("High"));
        assert!(wins[1].estimated_impact.starts_with("Medium"));
    }

    #[test]
    fn summary_names_first_extremes_on_ties() {
        let categories = vec![
            category(CategoryKey::AboveTheFold, 70, vec![]),
            category(CategoryKey::Cta, 20, vec![error("x", Impact::High)]),
            category(CategoryKey::Trust, 70, vec![]),
            category(CategoryKey::Content, 20, vec![]),
        ];
        let text = summary(45, PageType::Product, &categories);
        assert_eq!(
            text,
            "This product page scores 45/100 and has clear conversion gaps, with 1 critical issue. \
             Strongest area: Above the Fold (70). Weakest area: Call to Action (20)."
        );
    }
}
