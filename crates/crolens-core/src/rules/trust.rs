//! Social proof, authority and trust-badge checks.

use super::{Applicability, Check, RuleContext};
use crate::signals::TrustKind;
use crate::text_index::TextTag;
use crate::types::{Finding, Impact, PageType, Principle};

const TESTIMONIAL_PAGES: &[PageType] = &[PageType::Home, PageType::Product, PageType::Landing];
const PAYMENT_PAGES: &[PageType] = &[PageType::Checkout, PageType::Cart];

pub(super) const CHECKS: &[Check] = &[
    Check {
        id: "trust.badges",
        applies: Applicability::Always,
        evaluate: badges,
    },
    Check {
        id: "trust.text",
        applies: Applicability::Always,
        evaluate: trust_text,
    },
    Check {
        id: "trust.social_proof",
        applies: Applicability::Always,
        evaluate: social_proof,
    },
    Check {
        id: "trust.authority",
        applies: Applicability::Always,
        evaluate: authority,
    },
    Check {
        id: "trust.testimonials",
        applies: Applicability::PageTypes(TESTIMONIAL_PAGES),
        evaluate: testimonials,
    },
    Check {
        id: "trust.payment_badges",
        applies: Applicability::PageTypes(PAYMENT_PAGES),
        evaluate: payment_badges,
    },
];

fn badges(ctx: &RuleContext<'_>) -> Finding {
    if ctx.signals.has_trust(TrustKind::Badge) || ctx.signals.structure.has_trust_badges {
        Finding::success(
            "Trust badges shown",
            "Visual trust marks (payment, certification, e-commerce labels) are present.",
            Impact::High,
            Principle::Trust,
        )
    } else {
        Finding::warning(
            "No trust badges",
            "No payment logos, certification marks or shop labels were found.",
            "Show recognised trust badges (payment methods, e-commerce labels, SSL) near prices and CTAs.",
            Impact::High,
            Principle::Trust,
        )
    }
}

fn trust_text(ctx: &RuleContext<'_>) -> Finding {
    if ctx.signals.has_trust(TrustKind::Text) || ctx.text.has(TextTag::TrustPhrase) {
        Finding::success(
            "Reassuring security copy",
            "The copy mentions secure payment or verified handling.",
            Impact::Medium,
            Principle::Trust,
        )
    } else {
        Finding::warning(
            "No reassuring security copy",
            "Nothing in the text tells visitors that payment and data are handled safely.",
            "Add a short line such as \"Secure payment with SSL encryption\" close to the purchase area.",
            Impact::Medium,
            Principle::Trust,
        )
    }
}

fn social_proof(ctx: &RuleContext<'_>) -> Finding {
    let mentions = ctx.text.count(TextTag::SocialProof);
    if ctx.signals.has_trust(TrustKind::SocialProof) || mentions > 0 {
        Finding::success(
            "Social proof present",
            format!("{mentions} review or customer-count mention(s) found."),
            Impact::High,
            Principle::SocialProof,
        )
    } else {
        Finding::error(
            "No social proof",
            "The page shows no reviews, ratings or customer numbers.",
            "Add reviews, star ratings or a customer count (e.g. a Trustpilot widget) near the primary CTA.",
            Impact::High,
            Principle::SocialProof,
        )
    }
}

fn authority(ctx: &RuleContext<'_>) -> Finding {
    if ctx.signals.has_trust(TrustKind::Authority) || ctx.text.has(TextTag::Authority) {
        Finding::success(
            "Authority signals present",
            "Awards, certifications or press mentions lend the page credibility.",
            Impact::Low,
            Principle::Authority,
        )
    } else {
        Finding::warning(
            "No authority signals",
            "No awards, certifications, partners or press mentions were found.",
            "Mention relevant awards, certifications or \"as seen in\" media logos.",
            Impact::Low,
            Principle::Authority,
        )
    }
}

fn testimonials(ctx: &RuleContext<'_>) -> Finding {
    if ctx.signals.structure.has_testimonials {
        Finding::success(
            "Testimonials present",
            "Customer testimonials support the offer.",
            Impact::High,
            Principle::SocialProof,
        )
    } else {
        Finding::warning(
            "No testimonials",
            "No section with customer quotes or stories was found.",
            "Add 2-3 short testimonials with name and photo close to the decision point.",
            Impact::High,
            Principle::SocialProof,
        )
    }
}

fn payment_badges(ctx: &RuleContext<'_>) -> Finding {
    if ctx.signals.structure.has_trust_badges || ctx.signals.has_trust(TrustKind::Badge) {
        Finding::success(
            "Payment trust marks shown",
            "Security and payment marks are visible where the visitor pays.",
            Impact::High,
            Principle::Trust,
        )
    } else {
        Finding::error(
            "No trust marks at payment",
            "Visitors are asked to pay without any visible security or payment marks.",
            "Show payment logos and a secure-checkout badge next to the payment button.",
            Impact::High,
            Principle::Trust,
        )
    }
}
