//! Above-the-fold checks: headline, meta description, hero and value proposition.

use super::{Applicability, Check, RuleContext};
use crate::text_index::TextTag;
use crate::types::{Finding, Impact, PageType, Principle};

const HERO_PAGES: &[PageType] = &[PageType::Home, PageType::Landing];

pub(super) const CHECKS: &[Check] = &[
    Check {
        id: "atf.h1",
        applies: Applicability::Always,
        evaluate: h1_headline,
    },
    Check {
        id: "atf.meta_description",
        applies: Applicability::Always,
        evaluate: meta_description,
    },
    Check {
        id: "atf.visible_heading",
        applies: Applicability::Always,
        evaluate: visible_heading,
    },
    Check {
        id: "atf.hero",
        applies: Applicability::PageTypes(HERO_PAGES),
        evaluate: hero_section,
    },
    Check {
        id: "atf.value_proposition",
        applies: Applicability::PageTypes(HERO_PAGES),
        evaluate: value_proposition,
    },
];

fn h1_headline(ctx: &RuleContext<'_>) -> Finding {
    let h1s: Vec<_> = ctx.signals.h1_headings().collect();

    match h1s.as_slice() {
        [] => Finding::error(
            "Missing H1 headline",
            "The page has no H1. Visitors and search engines get no single statement of what the page offers.",
            "Add one H1 near the top that states the main benefit of the page.",
            Impact::High,
            Principle::Clarity,
        ),
        [h1] if TextTag::Benefit.matches(&h1.text) => Finding::success(
            "Benefit-driven headline",
            format!("The H1 \"{}\" communicates a concrete benefit.", h1.text.trim()),
            Impact::High,
            Principle::Clarity,
        ),
        [h1] => Finding::warning(
            "Headline lacks a clear benefit",
            format!(
                "The H1 \"{}\" describes the page but does not say what the visitor gains.",
                h1.text.trim()
            ),
            "Rewrite the H1 around the outcome for the visitor (save time, save money, get a result).",
            Impact::High,
            Principle::Clarity,
        ),
        many => Finding::warning(
            "Multiple H1 headlines",
            format!("Found {} H1 elements, which dilutes the main message.", many.len()),
            "Keep a single H1 and demote the others to H2.",
            Impact::Medium,
            Principle::Clarity,
        ),
    }
}

fn meta_description(ctx: &RuleContext<'_>) -> Finding {
    let t = ctx.thresholds;
    let description = ctx.signals.meta_description.trim();
    let len = description.chars().count();

    if len == 0 {
        return Finding::error(
            "Missing meta description",
            "Search results will show an arbitrary text snippet instead of a crafted pitch.",
            format!(
                "Write a {}-{} character meta description with the key benefit and a call to action.",
                t.meta_description_min_chars, t.meta_description_max_chars
            ),
            Impact::Medium,
            Principle::Clarity,
        );
    }

    if len < t.meta_description_min_chars || len > t.meta_description_max_chars {
        return Finding::warning(
            "Meta description length is off",
            format!(
                "The meta description is {len} characters; {}-{} is the range that displays fully.",
                t.meta_description_min_chars, t.meta_description_max_chars
            ),
            format!(
                "Adjust the meta description to {}-{} characters.",
                t.meta_description_min_chars, t.meta_description_max_chars
            ),
            Impact::Low,
            Principle::Clarity,
        );
    }

    Finding::success(
        "Well-sized meta description",
        format!("The meta description is {len} characters."),
        Impact::Low,
        Principle::Clarity,
    )
}

fn visible_heading(ctx: &RuleContext<'_>) -> Finding {
    let visible = ctx.signals.headings.iter().filter(|h| h.is_above_fold).count();
    if visible > 0 {
        Finding::success(
            "Message visible without scrolling",
            format!("{visible} heading(s) are visible in the first viewport."),
            Impact::Medium,
            Principle::FPattern,
        )
    } else {
        Finding::warning(
            "No heading in the first viewport",
            "Visitors have to scroll before they see any headline.",
            "Move the main headline into the first screen so the offer is clear at a glance.",
            Impact::Medium,
            Principle::FPattern,
        )
    }
}

fn hero_section(ctx: &RuleContext<'_>) -> Finding {
    if ctx.signals.structure.has_hero {
        Finding::success(
            "Hero section present",
            "A hero section frames the offer at the top of the page.",
            Impact::High,
            Principle::AestheticUsability,
        )
    } else {
        Finding::warning(
            "No hero section",
            "The top of the page has no dedicated hero area presenting the offer.",
            "Add a hero with headline, supporting sentence, visual and primary CTA.",
            Impact::High,
            Principle::AestheticUsability,
        )
    }
}

fn value_proposition(ctx: &RuleContext<'_>) -> Finding {
    let usps = ctx.text.count(TextTag::Usp);
    let benefit_headline = ctx
        .signals
        .h1_headings()
        .any(|h| TextTag::Benefit.matches(&h.text));

    if usps > 0 || benefit_headline {
        Finding::success(
            "Clear value proposition",
            "The page states why a visitor should choose this offer.",
            Impact::High,
            Principle::Clarity,
        )
    } else {
        Finding::warning(
            "Value proposition is unclear",
            "No unique selling points or benefit statements were detected near the top.",
            "State in one sentence what makes the offer better than the alternatives, and support it with 2-3 USPs.",
            Impact::High,
            Principle::Clarity,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::Fixture;
    use crate::signals::{Heading, ScrapedSignals};
    use crate::types::{CategoryKey, FindingType, PageType};

    fn h1(text: &str) -> Heading {
        Heading {
            tag: "h1".to_string(),
            text: text.to_string(),
            is_above_fold: true,
        }
    }

    #[test]
    fn benefit_headline_is_success() {
        let signals = ScrapedSignals {
            headings: vec![h1("Spar 30%")],
            ..Default::default()
        };
        let category = Fixture::new(signals, PageType::Product).run(CategoryKey::AboveTheFold);
        assert_eq!(category.findings[0].kind, FindingType::Success);
        assert_eq!(category.findings[0].title, "Benefit-driven headline");
    }

    #[test]
    fn multiple_h1_is_warning() {
        let signals = ScrapedSignals {
            headings: vec![h1("One"), h1("Two")],
            ..Default::default()
        };
        let category = Fixture::new(signals, PageType::Product).run(CategoryKey::AboveTheFold);
        assert_eq!(category.findings[0].kind, FindingType::Warning);
        assert_eq!(category.findings[0].title, "Multiple H1 headlines");
    }

    #[test]
    fn meta_description_banding() {
        let mut signals = ScrapedSignals::default();
        let fixture = Fixture::new(signals.clone(), PageType::Product);
        assert_eq!(
            fixture.run(CategoryKey::AboveTheFold).findings[1].kind,
            FindingType::Error
        );

        signals.meta_description = "Too short".to_string();
        let fixture = Fixture::new(signals.clone(), PageType::Product);
        assert_eq!(
            fixture.run(CategoryKey::AboveTheFold).findings[1].kind,
            FindingType::Warning
        );

        signals.meta_description = "x".repeat(120);
        let fixture = Fixture::new(signals, PageType::Product);
        assert_eq!(
            fixture.run(CategoryKey::AboveTheFold).findings[1].kind,
            FindingType::Success
        );
    }

    #[test]
    fn hero_checks_only_on_home_and_landing() {
        let product = Fixture::new(ScrapedSignals::default(), PageType::Product);
        assert_eq!(product.run(CategoryKey::AboveTheFold).findings.len(), 3);

        let landing = Fixture::new(ScrapedSignals::default(), PageType::Landing);
        assert_eq!(landing.run(CategoryKey::AboveTheFold).findings.len(), 5);
    }
}
