//! Conversion element checks: price, urgency, guarantees and page-type
//! specific purchase affordances.

use super::{Applicability, Check, RuleContext};
use crate::text_index::TextTag;
use crate::types::{Finding, Impact, PageType, Principle};

const PRICE_PAGES: &[PageType] = &[
    PageType::Product,
    PageType::Collection,
    PageType::Cart,
    PageType::Checkout,
];
const URGENCY_PAGES: &[PageType] = &[PageType::Product, PageType::Landing, PageType::Cart];
const NEWSLETTER_PAGES: &[PageType] = &[
    PageType::Home,
    PageType::Landing,
    PageType::Collection,
    PageType::Product,
];

pub(super) const CHECKS: &[Check] = &[
    Check {
        id: "conv.price",
        applies: Applicability::PageTypes(PRICE_PAGES),
        evaluate: price_visibility,
    },
    Check {
        id: "conv.urgency",
        applies: Applicability::PageTypes(URGENCY_PAGES),
        evaluate: urgency,
    },
    Check {
        id: "conv.guarantee",
        applies: Applicability::Always,
        evaluate: guarantee,
    },
    Check {
        id: "conv.newsletter",
        applies: Applicability::PageTypes(NEWSLETTER_PAGES),
        evaluate: newsletter,
    },
    Check {
        id: "conv.add_to_cart",
        applies: Applicability::PageTypes(&[PageType::Product]),
        evaluate: add_to_cart,
    },
    Check {
        id: "conv.progress",
        applies: Applicability::PageTypes(&[PageType::Checkout]),
        evaluate: progress_indicator,
    },
    Check {
        id: "conv.pricing",
        applies: Applicability::PageTypes(&[PageType::Landing]),
        evaluate: pricing_section,
    },
];

fn price_visibility(ctx: &RuleContext<'_>) -> Finding {
    if ctx.signals.page_signals.price_visible || ctx.text.has(TextTag::Price) {
        Finding::success(
            "Price is visible",
            "Visitors can see what the offer costs.",
            Impact::High,
            Principle::Clarity,
        )
    } else {
        Finding::error(
            "Price not visible",
            format!(
                "No price was detected on this {}.",
                ctx.page_type.label()
            ),
            "Show the price clearly next to the product name and the buy button.",
            Impact::High,
            Principle::Clarity,
        )
    }
}

fn urgency(ctx: &RuleContext<'_>) -> Finding {
    match ctx.text.fragments(TextTag::Urgency).first() {
        Some(example) => Finding::success(
            "Urgency communicated",
            format!("Urgency cue found: \"{example}\"."),
            Impact::Medium,
            Principle::Scarcity,
        ),
        None => Finding::warning(
            "No urgency or scarcity",
            "Nothing gives visitors a reason to act now rather than later.",
            "Add honest urgency cues such as stock levels, delivery cut-off times or campaign end dates.",
            Impact::Medium,
            Principle::Scarcity,
        ),
    }
}

fn guarantee(ctx: &RuleContext<'_>) -> Finding {
    match ctx.text.fragments(TextTag::Guarantee).first() {
        Some(example) => Finding::success(
            "Risk reversal offered",
            format!("Guarantee found: \"{example}\"."),
            Impact::Medium,
            Principle::LossAversion,
        ),
        None => Finding::warning(
            "No guarantee or return promise",
            "Visitors carry the full risk of a bad purchase.",
            "State your guarantee or free-returns policy close to the CTA.",
            Impact::Medium,
            Principle::LossAversion,
        ),
    }
}

fn newsletter(ctx: &RuleContext<'_>) -> Finding {
    if ctx.signals.structure.has_newsletter {
        Finding::success(
            "Newsletter signup",
            "Visitors who are not ready to buy can still leave their email.",
            Impact::Low,
            Principle::Reciprocity,
        )
    } else {
        Finding::warning(
            "No newsletter signup",
            "Visitors who are not ready to buy leave without a way back.",
            "Offer a newsletter signup with a concrete incentive (e.g. 10% off the first order).",
            Impact::Low,
            Principle::Reciprocity,
        )
    }
}

fn add_to_cart(ctx: &RuleContext<'_>) -> Finding {
    let signals = ctx.signals;
    let labelled = signals.ctas.iter().any(|c| TextTag::AddToCart.matches(&c.text));
    if signals.structure.has_add_to_cart || signals.page_signals.add_to_cart_count > 0 || labelled {
        Finding::success(
            "Add-to-cart available",
            "The product can be added to the cart directly.",
            Impact::High,
            Principle::FittsLaw,
        )
    } else {
        Finding::error(
            "No add-to-cart button",
            "The product page has no visible way to buy.",
            "Place a prominent \"Add to cart\" button next to the price.",
            Impact::High,
            Principle::FittsLaw,
        )
    }
}

fn progress_indicator(ctx: &RuleContext<'_>) -> Finding {
    if ctx.signals.structure.has_progress_indicator {
        Finding::success(
            "Checkout progress shown",
            "A progress indicator shows how many steps remain.",
            Impact::Medium,
            Principle::CognitiveLoad,
        )
    } else {
        Finding::warning(
            "No checkout progress indicator",
            "Visitors cannot see how far they are from completing the order.",
            "Show the checkout steps (Details › Shipping › Payment) with the current step highlighted.",
            Impact::Medium,
            Principle::CognitiveLoad,
        )
    }
}

fn pricing_section(ctx: &RuleContext<'_>) -> Finding {
    if ctx.signals.structure.has_pricing {
        Finding::success(
            "Pricing section present",
            "Plans and prices are presented on the page.",
            Impact::Medium,
            Principle::Clarity,
        )
    } else {
        Finding::warning(
            "No pricing section",
            "Visitors have to look elsewhere to find out what the offer costs.",
            "Add a pricing section or a clear \"from\" price close to the CTA.",
            Impact::Medium,
            Principle::Clarity,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::Fixture;
    use crate::signals::{Cta, ScrapedSignals};
    use crate::types::{CategoryKey, FindingType, PageType};

    #[test]
    fn product_without_price_or_buy_button() {
        let category =
            Fixture::new(ScrapedSignals::default(), PageType::Product).run(CategoryKey::Conversion);
        let titles: Vec<_> = category.findings.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Price not visible",
                "No urgency or scarcity",
                "No guarantee or return promise",
                "No newsletter signup",
                "No add-to-cart button",
            ]
        );
        assert_eq!(category.findings[0].kind, FindingType::Error);
    }

    #[test]
    fn price_and_buy_button_from_copy() {
        let signals = ScrapedSignals {
            text_content: "Nu kun 499 kr. Fri retur i 30 dage.".to_string(),
            ctas: vec![Cta {
                text: "Læg i kurv".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let category = Fixture::new(signals, PageType::Product).run(CategoryKey::Conversion);
        assert!(category.findings[0].is_success());
        assert!(category.findings[2].is_success());
        assert!(category.findings[4].is_success());
    }

    #[test]
    fn home_only_gets_generic_checks() {
        let category =
            Fixture::new(ScrapedSignals::default(), PageType::Home).run(CategoryKey::Conversion);
        assert_eq!(category.findings.len(), 2);
    }
}
