//! Visual design and UX checks.

use super::{Applicability, Check, RuleContext};
use crate::types::{Finding, Impact, PageType, Principle};

const VIDEO_PAGES: &[PageType] = &[PageType::Home, PageType::Product, PageType::Landing];

const MIN_IMAGES: usize = 3;
const MAX_IMAGES: usize = 40;
const MIN_SECTIONS: usize = 3;
const MAX_SECTIONS: usize = 15;
/// Pages this long need the navigation to follow the reader
const STICKY_HEADER_SECTIONS: usize = 5;

pub(super) const CHECKS: &[Check] = &[
    Check {
        id: "design.images",
        applies: Applicability::Always,
        evaluate: image_count,
    },
    Check {
        id: "design.hero_image",
        applies: Applicability::Always,
        evaluate: hero_image,
    },
    Check {
        id: "design.sections",
        applies: Applicability::Always,
        evaluate: sections,
    },
    Check {
        id: "design.video",
        applies: Applicability::PageTypes(VIDEO_PAGES),
        evaluate: video,
    },
    Check {
        id: "design.share_image",
        applies: Applicability::Always,
        evaluate: share_image,
    },
    Check {
        id: "design.sticky_header",
        applies: Applicability::When(is_long_page),
        evaluate: sticky_header,
    },
];

fn is_long_page(ctx: &RuleContext<'_>) -> bool {
    ctx.signals.structure.section_count >= STICKY_HEADER_SECTIONS
}

fn image_count(ctx: &RuleContext<'_>) -> Finding {
    let count = ctx.signals.images.len();

    if count == 0 {
        Finding::error(
            "No images",
            "The page is text only; visitors cannot see what is offered.",
            "Add high-quality images of the product or the outcome it delivers.",
            Impact::Medium,
            Principle::AestheticUsability,
        )
    } else if count < MIN_IMAGES {
        Finding::warning(
            "Few images",
            format!("Only {count} image(s) support the copy."),
            "Add visuals that show the product in use or illustrate key benefits.",
            Impact::Low,
            Principle::AestheticUsability,
        )
    } else if count > MAX_IMAGES {
        Finding::warning(
            "Image-heavy page",
            format!("{count} images compete for attention and weigh on load time."),
            "Remove decorative images and lazy-load the rest.",
            Impact::Low,
            Principle::CognitiveLoad,
        )
    } else {
        Finding::success(
            "Balanced use of images",
            format!("{count} images support the content."),
            Impact::Low,
            Principle::AestheticUsability,
        )
    }
}

fn hero_image(ctx: &RuleContext<'_>) -> Finding {
    if ctx.signals.images.iter().any(|i| i.is_above_fold) {
        Finding::success(
            "Visual above the fold",
            "An image is visible in the first viewport.",
            Impact::Medium,
            Principle::AestheticUsability,
        )
    } else {
        Finding::warning(
            "No visual above the fold",
            "The first viewport contains no image.",
            "Show a strong product or hero image next to the headline.",
            Impact::Medium,
            Principle::AestheticUsability,
        )
    }
}

fn sections(ctx: &RuleContext<'_>) -> Finding {
    let count = ctx.signals.structure.section_count;

    if count < MIN_SECTIONS {
        Finding::warning(
            "Little visual structure",
            format!("Only {count} distinct section(s) were found."),
            "Group content into clear sections with whitespace and headings.",
            Impact::Medium,
            Principle::CognitiveLoad,
        )
    } else if count > MAX_SECTIONS {
        Finding::warning(
            "Very long page",
            format!("{count} sections make the page long and hard to digest."),
            "Cut or merge sections that do not support the conversion goal.",
            Impact::Low,
            Principle::CognitiveLoad,
        )
    } else {
        Finding::success(
            "Clear section structure",
            format!("{count} sections organise the page."),
            Impact::Medium,
            Principle::CognitiveLoad,
        )
    }
}

fn video(ctx: &RuleContext<'_>) -> Finding {
    if ctx.signals.structure.has_video {
        Finding::success(
            "Video content",
            "A video helps explain the offer.",
            Impact::Low,
            Principle::AestheticUsability,
        )
    } else {
        Finding::warning(
            "No video",
            "There is no video showing the product or explaining the offer.",
            "Consider a short demo or product video near the top of the page.",
            Impact::Low,
            Principle::AestheticUsability,
        )
    }
}

fn share_image(ctx: &RuleContext<'_>) -> Finding {
    if ctx.signals.meta("og:image").is_some() {
        Finding::success(
            "Share image defined",
            "An og:image controls how the page looks when shared.",
            Impact::Low,
            Principle::AestheticUsability,
        )
    } else {
        Finding::warning(
            "No share image",
            "Without og:image, shared links render with a random or missing image.",
            "Add an og:image meta tag (1200×630) with an attractive visual.",
            Impact::Low,
            Principle::AestheticUsability,
        )
    }
}

fn sticky_header(ctx: &RuleContext<'_>) -> Finding {
    if ctx.signals.ux.has_sticky_header {
        Finding::success(
            "Sticky header keeps navigation in reach",
            "Navigation and cart stay visible while visitors scroll the long page.",
            Impact::Low,
            Principle::FittsLaw,
        )
    } else {
        Finding::warning(
            "Navigation scrolls away",
            format!(
                "On a page with {} sections, visitors must scroll back up to navigate.",
                ctx.signals.structure.section_count
            ),
            "Make the header sticky, or add a compact sticky bar with the main CTA.",
            Impact::Low,
            Principle::FittsLaw,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::Fixture;
    use crate::signals::{ImageInfo, ScrapedSignals};
    use crate::types::{CategoryKey, FindingType, PageType};

    #[test]
    fn text_only_page_is_error() {
        let category =
            Fixture::new(ScrapedSignals::default(), PageType::Cart).run(CategoryKey::Design);
        assert_eq!(category.findings.len(), 4);
        assert_eq!(category.findings[0].kind, FindingType::Error);
    }

    #[test]
    fn well_designed_page_scores_full() {
        let mut signals = ScrapedSignals {
            images: (0..5)
                .map(|i| ImageInfo {
                    src: format!("/img/{i}.jpg"),
                    is_above_fold: i == 0,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };
        signals.structure.section_count = 6;
        signals.structure.has_video = true;
        signals.ux.has_sticky_header = true;
        signals
            .meta_tags
            .insert("og:image".to_string(), "https://cdn.example/share.jpg".to_string());

        let category = Fixture::new(signals, PageType::Landing).run(CategoryKey::Design);
        assert_eq!(category.score, 100);
        assert!(
            category
                .findings
                .iter()
                .any(|f| f.title == "Sticky header keeps navigation in reach")
        );
    }

    #[test]
    fn long_page_without_sticky_header_warns() {
        let mut signals = ScrapedSignals::default();
        signals.structure.section_count = 4;
        let short = Fixture::new(signals.clone(), PageType::Home).run(CategoryKey::Design);
        assert!(!short.findings.iter().any(|f| f.title == "Navigation scrolls away"));

        signals.structure.section_count = 8;
        let long = Fixture::new(signals, PageType::Home).run(CategoryKey::Design);
        let finding = long
            .findings
            .iter()
            .find(|f| f.title == "Navigation scrolls away")
            .unwrap();
        assert_eq!(finding.kind, FindingType::Warning);
        assert!(finding.description.contains("8 sections"));
    }
}
