//! Call-to-action checks.

use super::{Applicability, Check, RuleContext};
use crate::text_index::TextTag;
use crate::types::{Finding, Impact, Principle};

pub(super) const CHECKS: &[Check] = &[
    Check {
        id: "cta.count",
        applies: Applicability::Always,
        evaluate: cta_count,
    },
    Check {
        id: "cta.above_fold",
        applies: Applicability::Always,
        evaluate: above_fold,
    },
    Check {
        id: "cta.primary",
        applies: Applicability::Always,
        evaluate: primary_prominence,
    },
    Check {
        id: "cta.copy",
        applies: Applicability::When(has_ctas),
        evaluate: action_copy,
    },
    Check {
        id: "cta.repetition",
        applies: Applicability::When(has_ctas),
        evaluate: repetition,
    },
];

fn has_ctas(ctx: &RuleContext<'_>) -> bool {
    !ctx.signals.ctas.is_empty()
}

fn cta_count(ctx: &RuleContext<'_>) -> Finding {
    let count = ctx.signals.ctas.len();
    let max = ctx.thresholds.max_ctas;

    if count == 0 {
        Finding::error(
            "No CTAs found",
            "The page has no buttons or links inviting the visitor to act.",
            "Add a clear primary call to action that names the next step (e.g. \"Add to cart\", \"Start free trial\").",
            Impact::High,
            Principle::FittsLaw,
        )
    } else if count > max {
        Finding::warning(
            "Too many competing CTAs",
            format!("{count} calls to action compete for attention (guideline: at most {max})."),
            "Reduce secondary CTAs so that one primary action stands out.",
            Impact::Medium,
            Principle::HicksLaw,
        )
    } else {
        Finding::success(
            "Focused number of CTAs",
            format!("{count} calls to action found."),
            Impact::Medium,
            Principle::HicksLaw,
        )
    }
}

fn above_fold(ctx: &RuleContext<'_>) -> Finding {
    let total = ctx.signals.ctas.len();
    let visible = ctx.signals.ctas.iter().filter(|c| c.is_above_fold).count();

    if visible > 0 {
        Finding::success(
            "CTA visible above the fold",
            format!("{visible} CTA(s) are visible without scrolling."),
            Impact::High,
            Principle::FittsLaw,
        )
    } else if total > 0 {
        Finding::error(
            "No CTA above the fold",
            format!("All {total} CTAs require scrolling before they can be seen."),
            "Place the primary CTA in the first viewport, next to the headline.",
            Impact::High,
            Principle::FittsLaw,
        )
    } else {
        Finding::error(
            "No CTA above the fold",
            "There is nothing to click in the first viewport.",
            "Add a primary CTA in the hero area of the page.",
            Impact::High,
            Principle::FittsLaw,
        )
    }
}

fn primary_prominence(ctx: &RuleContext<'_>) -> Finding {
    let ctas = &ctx.signals.ctas;
    let primary = ctas.iter().filter(|c| c.is_primary(ctx.thresholds)).count();

    if primary > 0 {
        Finding::success(
            "Prominent primary CTA",
            format!("{primary} CTA(s) are large enough to stand out visually."),
            Impact::High,
            Principle::VonRestorff,
        )
    } else if ctas.is_empty() {
        Finding::error(
            "No primary CTA",
            "Without any CTA there is no dominant next step.",
            "Design one large, high-contrast primary button for the main conversion goal.",
            Impact::High,
            Principle::VonRestorff,
        )
    } else {
        Finding::warning(
            "Primary CTA does not stand out",
            format!(
                "None of the {} CTAs reach the size of a primary button (at least {:.0}px² and {:.0}px text).",
                ctas.len(),
                ctx.thresholds.primary_cta_min_area_px2,
                ctx.thresholds.primary_cta_min_font_px
            ),
            "Make the main CTA larger with a contrasting color so it is the most visible element.",
            Impact::High,
            Principle::VonRestorff,
        )
    }
}

fn action_copy(ctx: &RuleContext<'_>) -> Finding {
    let ctas = &ctx.signals.ctas;
    let vague: Vec<&str> = ctas
        .iter()
        .map(|c| c.text.trim())
        .filter(|t| TextTag::VagueCta.matches(t))
        .collect();
    let action = ctas
        .iter()
        .filter(|c| TextTag::ActionVerb.matches(&c.text))
        .count();

    if let Some(example) = vague.first() {
        return Finding::warning(
            "Vague CTA copy",
            format!(
                "{} CTA(s) use generic wording such as \"{example}\".",
                vague.len()
            ),
            "Replace generic labels with the concrete outcome (\"Get my quote\" instead of \"Submit\").",
            Impact::Medium,
            Principle::Clarity,
        );
    }

    if action * 2 >= ctas.len() {
        Finding::success(
            "Action-oriented CTA copy",
            format!("{action} of {} CTAs start with an action verb.", ctas.len()),
            Impact::Medium,
            Principle::Clarity,
        )
    } else {
        Finding::warning(
            "CTA copy lacks action verbs",
            format!("Only {action} of {} CTAs start with an action verb.", ctas.len()),
            "Start CTA labels with a verb that describes what happens next (Buy, Get, Start, Book).",
            Impact::Medium,
            Principle::Clarity,
        )
    }
}

fn repetition(ctx: &RuleContext<'_>) -> Finding {
    let ctas = &ctx.signals.ctas;
    let above = ctas.iter().any(|c| c.is_above_fold);
    let below = ctas.iter().any(|c| !c.is_above_fold);

    match (above, below) {
        (true, true) => Finding::success(
            "CTA repeated down the page",
            "Calls to action appear both above and below the fold.",
            Impact::Low,
            Principle::FittsLaw,
        ),
        (true, false) => Finding::warning(
            "CTA not repeated further down",
            "Visitors who scroll to read more find no CTA when they are ready to act.",
            "Repeat the primary CTA after key content sections and near the bottom of the page.",
            Impact::Low,
            Principle::FittsLaw,
        ),
        _ => Finding::warning(
            "CTAs only appear below the fold",
            "Calls to action exist but only after scrolling.",
            "Add the primary CTA to the top of the page and keep the lower ones as repeats.",
            Impact::Low,
            Principle::FittsLaw,
        ),
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::Fixture;
    use crate::signals::{Cta, ScrapedSignals};
    use crate::types::{CategoryKey, FindingType, PageType};

    fn cta(text: &str, above: bool, primary: bool) -> Cta {
        Cta {
            text: text.to_string(),
            tag: "button".to_string(),
            is_above_fold: above,
            font_size_px: if primary { 18.0 } else { 13.0 },
            area_px2: if primary { 8_000.0 } else { 1_500.0 },
            ..Default::default()
        }
    }

    #[test]
    fn no_ctas_leads_with_error() {
        let category =
            Fixture::new(ScrapedSignals::default(), PageType::Product).run(CategoryKey::Cta);
        assert_eq!(category.findings[0].kind, FindingType::Error);
        assert_eq!(category.findings[0].title, "No CTAs found");
        assert_eq!(category.findings.len(), 3);
    }

    #[test]
    fn strong_cta_setup_scores_full() {
        let signals = ScrapedSignals {
            ctas: vec![cta("Add to cart", true, true), cta("Buy now", false, false)],
            ..Default::default()
        };
        let category = Fixture::new(signals, PageType::Product).run(CategoryKey::Cta);
        assert!(category.findings.iter().all(|f| f.is_success()));
        assert_eq!(category.score, 100);
    }

    #[test]
    fn ctas_only_below_fold_is_error() {
        let signals = ScrapedSignals {
            ctas: vec![cta("Get started", false, true)],
            ..Default::default()
        };
        let category = Fixture::new(signals, PageType::Landing).run(CategoryKey::Cta);
        assert_eq!(category.findings[1].kind, FindingType::Error);
    }

    #[test]
    fn vague_copy_is_flagged() {
        let signals = ScrapedSignals {
            ctas: vec![cta("Click here", true, true)],
            ..Default::default()
        };
        let category = Fixture::new(signals, PageType::Home).run(CategoryKey::Cta);
        let copy = &category.findings[3];
        assert_eq!(copy.title, "Vague CTA copy");
        assert_eq!(copy.kind, FindingType::Warning);
    }
}
