//! Content and copywriting checks.

use super::{Applicability, Check, RuleContext};
use crate::text_index::TextTag;
use crate::types::{Finding, Impact, Principle};

pub(super) const CHECKS: &[Check] = &[
    Check {
        id: "content.subheadings",
        applies: Applicability::Always,
        evaluate: subheadings,
    },
    Check {
        id: "content.heading_hierarchy",
        applies: Applicability::When(has_headings),
        evaluate: heading_hierarchy,
    },
    Check {
        id: "content.title",
        applies: Applicability::Always,
        evaluate: title_length,
    },
    Check {
        id: "content.alt_text",
        applies: Applicability::When(has_images),
        evaluate: alt_coverage,
    },
    Check {
        id: "content.benefits",
        applies: Applicability::Always,
        evaluate: benefits_vs_features,
    },
    Check {
        id: "content.usps",
        applies: Applicability::Always,
        evaluate: usp_count,
    },
];

const GOOD_ALT_COVERAGE: f64 = 0.9;
const POOR_ALT_COVERAGE: f64 = 0.5;
const STRONG_USP_COUNT: usize = 3;

fn has_headings(ctx: &RuleContext<'_>) -> bool {
    !ctx.signals.headings.is_empty()
}

fn has_images(ctx: &RuleContext<'_>) -> bool {
    !ctx.signals.images.is_empty()
}

fn subheadings(ctx: &RuleContext<'_>) -> Finding {
    let count = ctx
        .signals
        .headings
        .iter()
        .filter(|h| matches!(h.level(), Some(2 | 3)))
        .count();

    match count {
        0 => Finding::warning(
            "No subheadings",
            "The copy has no H2/H3 structure, so scanning visitors cannot find what they look for.",
            "Break the copy into sections with descriptive H2 subheadings.",
            Impact::Medium,
            Principle::CognitiveLoad,
        ),
        1 => Finding::warning(
            "Few subheadings",
            "Only one subheading structures the page.",
            "Add subheadings for each key topic so the page can be scanned.",
            Impact::Low,
            Principle::CognitiveLoad,
        ),
        n => Finding::success(
            "Scannable structure",
            format!("{n} subheadings break the copy into sections."),
            Impact::Medium,
            Principle::CognitiveLoad,
        ),
    }
}

/// Levels may only step down one at a time (h2 -> h3, not h2 -> h4)
fn heading_hierarchy(ctx: &RuleContext<'_>) -> Finding {
    let mut previous: Option<u8> = None;
    let mut skips = Vec::new();

    for level in ctx.signals.headings.iter().filter_map(|h| h.level()) {
        match previous {
            Some(prev) if level > prev + 1 => skips.push(format!("h{prev} → h{level}")),
            _ => {}
        }
        previous = Some(level);
    }

    if skips.is_empty() {
        Finding::success(
            "Logical heading hierarchy",
            "Heading levels follow each other without gaps.",
            Impact::Low,
            Principle::Accessibility,
        )
    } else {
        Finding::warning(
            "Heading levels are skipped",
            format!("Found skipped levels: {}.", skips.join(", ")),
            "Use heading levels in order so screen readers and search engines understand the outline.",
            Impact::Low,
            Principle::Accessibility,
        )
    }
}

fn title_length(ctx: &RuleContext<'_>) -> Finding {
    let t = ctx.thresholds;
    let len = ctx.signals.title.trim().chars().count();

    if len == 0 {
        Finding::error(
            "Missing page title",
            "The page has no <title>, which hurts search snippets and browser tabs.",
            format!(
                "Write a {}-{} character title with the main keyword and benefit.",
                t.title_min_chars, t.title_max_chars
            ),
            Impact::Medium,
            Principle::Clarity,
        )
    } else if len < t.title_min_chars || len > t.title_max_chars {
        Finding::warning(
            "Title length is off",
            format!(
                "The title is {len} characters; {}-{} displays best in search results.",
                t.title_min_chars, t.title_max_chars
            ),
            format!(
                "Adjust the title to {}-{} characters.",
                t.title_min_chars, t.title_max_chars
            ),
            Impact::Low,
            Principle::Clarity,
        )
    } else {
        Finding::success(
            "Well-sized page title",
            format!("The title is {len} characters."),
            Impact::Low,
            Principle::Clarity,
        )
    }
}

fn alt_coverage(ctx: &RuleContext<'_>) -> Finding {
    let images = &ctx.signals.images;
    let with_alt = images
        .iter()
        .filter(|i| i.has_alt && !i.alt.trim().is_empty())
        .count();
    let ratio = with_alt as f64 / images.len() as f64;
    let percent = (ratio * 100.0).round();

    if ratio >= GOOD_ALT_COVERAGE {
        Finding::success(
            "Images are described",
            format!("{percent}% of images have alt text."),
            Impact::Medium,
            Principle::Accessibility,
        )
    } else if ratio >= POOR_ALT_COVERAGE {
        Finding::warning(
            "Some images lack alt text",
            format!("{with_alt} of {} images have alt text ({percent}%).", images.len()),
            "Add descriptive alt text to every content image.",
            Impact::Medium,
            Principle::Accessibility,
        )
    } else {
        Finding::error(
            "Most images lack alt text",
            format!("Only {with_alt} of {} images have alt text ({percent}%).", images.len()),
            "Add descriptive alt text to every content image; use empty alt only for decoration.",
            Impact::Medium,
            Principle::Accessibility,
        )
    }
}

fn benefits_vs_features(ctx: &RuleContext<'_>) -> Finding {
    let benefits = ctx.text.count(TextTag::Benefit);
    let features = ctx.text.count(TextTag::Feature);

    if benefits == 0 {
        Finding::warning(
            "Copy lacks benefit statements",
            "The text does not tell visitors what they gain.",
            "Translate features into outcomes: say what the visitor saves, gains or avoids.",
            Impact::High,
            Principle::Clarity,
        )
    } else if features > benefits * 2 {
        Finding::warning(
            "Copy is feature-heavy",
            format!("{features} feature statements against {benefits} benefit statements."),
            "Lead with benefits and move specifications further down.",
            Impact::Medium,
            Principle::Clarity,
        )
    } else {
        Finding::success(
            "Benefit-led copy",
            format!("{benefits} benefit statement(s) found."),
            Impact::High,
            Principle::Clarity,
        )
    }
}

fn usp_count(ctx: &RuleContext<'_>) -> Finding {
    let usps = ctx.text.count(TextTag::Usp);

    if usps >= STRONG_USP_COUNT {
        Finding::success(
            "Clear unique selling points",
            format!("{usps} USPs communicated (e.g. \"{}\").", ctx.text.fragments(TextTag::Usp)[0]),
            Impact::High,
            Principle::Clarity,
        )
    } else if usps > 0 {
        Finding::warning(
            "Few unique selling points",
            format!("Only {usps} USP(s) found."),
            "List 3-4 concrete USPs (delivery, returns, price, quality) in a visible strip.",
            Impact::Medium,
            Principle::Clarity,
        )
    } else {
        Finding::error(
            "No unique selling points",
            "Nothing explains why to buy here rather than elsewhere.",
            "Add a USP bar with 3-4 concrete reasons to choose you (free shipping, easy returns, guarantee).",
            Impact::High,
            Principle::Clarity,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::Fixture;
    use crate::signals::{CopyAnalysis, Heading, ImageInfo, ScrapedSignals};
    use crate::types::{CategoryKey, FindingType, PageType};

    fn heading(tag: &str) -> Heading {
        Heading {
            tag: tag.to_string(),
            text: "Section".to_string(),
            is_above_fold: false,
        }
    }

    fn image(alt: &str) -> ImageInfo {
        ImageInfo {
            src: "/img.jpg".to_string(),
            alt: alt.to_string(),
            has_alt: !alt.is_empty(),
            is_above_fold: false,
        }
    }

    #[test]
    fn skipped_heading_level_is_reported() {
        let signals = ScrapedSignals {
            headings: vec![heading("h1"), heading("h2"), heading("h4")],
            ..Default::default()
        };
        let category = Fixture::new(signals, PageType::Home).run(CategoryKey::Content);
        let hierarchy = &category.findings[1];
        assert_eq!(hierarchy.kind, FindingType::Warning);
        assert!(hierarchy.description.contains("h2 → h4"));
    }

    #[test]
    fn alt_coverage_bands() {
        let signals = ScrapedSignals {
            images: vec![image("Lamp"), image(""), image(""), image("")],
            ..Default::default()
        };
        let category = Fixture::new(signals, PageType::Product).run(CategoryKey::Content);
        let alt = category
            .findings
            .iter()
            .find(|f| f.title.contains("alt text"))
            .unwrap();
        assert_eq!(alt.kind, FindingType::Error);
    }

    #[test]
    fn usps_from_copy_analysis() {
        let signals = ScrapedSignals {
            copy_analysis: CopyAnalysis {
                usps: vec![
                    "Free shipping".to_string(),
                    "30 day returns".to_string(),
                    "Danish design".to_string(),
                ],
                ..Default::default()
            },
            ..Default::default()
        };
        let category = Fixture::new(signals, PageType::Home).run(CategoryKey::Content);
        let usp = category.findings.last().unwrap();
        assert_eq!(usp.title, "Clear unique selling points");
    }

    #[test]
    fn empty_page_has_no_optional_checks() {
        let category =
            Fixture::new(ScrapedSignals::default(), PageType::Home).run(CategoryKey::Content);
        assert_eq!(category.findings.len(), 4);
        assert_eq!(category.findings[3].kind, FindingType::Error);
    }
}
