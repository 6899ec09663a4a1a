//! Friction and barrier checks: forms, reassurance, exits and support.

use super::{Applicability, Check, RuleContext};
use crate::text_index::TextTag;
use crate::types::{Finding, Impact, PageType, Principle};

const LEAN_FORM_FIELDS: usize = 3;
const MAX_CHECKOUT_EXITS: usize = 3;

const SEARCH_PAGES: &[PageType] = &[PageType::Home, PageType::Collection];
const CHAT_PAGES: &[PageType] = &[PageType::Product, PageType::Checkout, PageType::Cart];
const CATALOGUE_PAGES: &[PageType] = &[PageType::Product, PageType::Collection];

pub(super) const CHECKS: &[Check] = &[
    Check {
        id: "friction.form_length",
        applies: Applicability::When(has_forms),
        evaluate: form_length,
    },
    Check {
        id: "friction.form_labels",
        applies: Applicability::When(has_forms),
        evaluate: form_labels,
    },
    Check {
        id: "friction.form_validation",
        applies: Applicability::When(has_forms),
        evaluate: form_validation,
    },
    Check {
        id: "friction.privacy",
        applies: Applicability::Always,
        evaluate: privacy,
    },
    Check {
        id: "friction.contact",
        applies: Applicability::Always,
        evaluate: contact,
    },
    Check {
        id: "friction.checkout_exits",
        applies: Applicability::PageTypes(&[PageType::Checkout]),
        evaluate: checkout_exits,
    },
    Check {
        id: "friction.search",
        applies: Applicability::PageTypes(SEARCH_PAGES),
        evaluate: search,
    },
    Check {
        id: "friction.image_alt",
        applies: Applicability::PageTypes(CATALOGUE_PAGES),
        evaluate: accessible_images,
    },
    Check {
        id: "friction.cookie_consent",
        applies: Applicability::Always,
        evaluate: cookie_consent,
    },
    Check {
        id: "friction.chat",
        applies: Applicability::PageTypes(CHAT_PAGES),
        evaluate: chat,
    },
];

fn has_forms(ctx: &RuleContext<'_>) -> bool {
    !ctx.signals.forms.is_empty()
}

fn form_length(ctx: &RuleContext<'_>) -> Finding {
    let longest = ctx
        .signals
        .forms
        .iter()
        .map(|f| f.field_count)
        .max()
        .unwrap_or_default();
    let max = ctx.thresholds.max_form_fields;

    if longest <= LEAN_FORM_FIELDS {
        Finding::success(
            "Short forms",
            format!("The longest form has {longest} field(s)."),
            Impact::Medium,
            Principle::Friction,
        )
    } else if longest <= max {
        Finding::warning(
            "Forms could be shorter",
            format!("The longest form has {longest} fields."),
            "Remove optional fields or move them after the conversion.",
            Impact::Low,
            Principle::Friction,
        )
    } else {
        Finding::error(
            "Long forms",
            format!("A form asks for {longest} fields (guideline: at most {max})."),
            "Cut the form to the fields you need to complete the order; ask for the rest later.",
            Impact::Medium,
            Principle::Friction,
        )
    }
}

fn form_labels(ctx: &RuleContext<'_>) -> Finding {
    let unlabelled = ctx.signals.forms.iter().filter(|f| !f.has_labels).count();
    if unlabelled == 0 {
        Finding::success(
            "Form fields are labelled",
            "Every form uses visible labels.",
            Impact::Medium,
            Principle::Accessibility,
        )
    } else {
        Finding::error(
            "Form fields lack labels",
            format!("{unlabelled} form(s) rely on placeholders instead of labels."),
            "Add a visible <label> to every field; placeholders disappear while typing.",
            Impact::Medium,
            Principle::Accessibility,
        )
    }
}

fn form_validation(ctx: &RuleContext<'_>) -> Finding {
    let unvalidated = ctx.signals.forms.iter().filter(|f| !f.has_validation).count();
    if unvalidated == 0 {
        Finding::success(
            "Inline form validation",
            "Forms validate input before submission.",
            Impact::Low,
            Principle::Friction,
        )
    } else {
        Finding::warning(
            "No inline validation",
            format!("{unvalidated} form(s) only report mistakes after submission."),
            "Validate fields inline and explain how to fix each error.",
            Impact::Low,
            Principle::Friction,
        )
    }
}

fn privacy(ctx: &RuleContext<'_>) -> Finding {
    let linked = ctx
        .signals
        .security
        .as_ref()
        .is_some_and(|s| s.has_privacy_policy_link);
    if linked || ctx.text.has(TextTag::Privacy) {
        Finding::success(
            "Privacy reassurance",
            "The page references how personal data is handled.",
            Impact::Medium,
            Principle::Trust,
        )
    } else {
        Finding::warning(
            "No privacy reassurance",
            "Nothing tells visitors how their personal data is used.",
            "Link the privacy policy and add a short \"we never share your data\" note near forms.",
            Impact::Medium,
            Principle::Trust,
        )
    }
}

fn contact(ctx: &RuleContext<'_>) -> Finding {
    if ctx.text.has(TextTag::Contact) {
        Finding::success(
            "Contact options visible",
            "Visitors can find a phone number, email or contact page.",
            Impact::Medium,
            Principle::Trust,
        )
    } else {
        Finding::warning(
            "No visible contact options",
            "Visitors with a question cannot see how to reach you.",
            "Show a phone number or email address, or link a contact page, in the header or footer.",
            Impact::Medium,
            Principle::Trust,
        )
    }
}

fn checkout_exits(ctx: &RuleContext<'_>) -> Finding {
    let exits = ctx.signals.links.iter().filter(|l| l.is_external).count();

    if exits == 0 {
        Finding::success(
            "Focused checkout",
            "The checkout has no links leading away from the purchase.",
            Impact::High,
            Principle::Friction,
        )
    } else if exits <= MAX_CHECKOUT_EXITS {
        Finding::warning(
            "Checkout has exit links",
            format!("{exits} external link(s) can pull buyers out of the checkout."),
            "Remove external links from the checkout or open them in a modal.",
            Impact::Medium,
            Principle::Friction,
        )
    } else {
        Finding::error(
            "Leaky checkout",
            format!("{exits} external links lead away from the checkout."),
            "Use an enclosed checkout: strip navigation and external links down to the essentials.",
            Impact::High,
            Principle::Friction,
        )
    }
}

fn search(ctx: &RuleContext<'_>) -> Finding {
    if ctx.signals.ux.has_search {
        Finding::success(
            "Site search available",
            "Visitors who know what they want can search for it.",
            Impact::Medium,
            Principle::JakobsLaw,
        )
    } else {
        Finding::warning(
            "No site search",
            "Visitors have to browse to find a specific product.",
            "Add a visible search field in the header.",
            Impact::Medium,
            Principle::JakobsLaw,
        )
    }
}

fn accessible_images(ctx: &RuleContext<'_>) -> Finding {
    let missing = ctx
        .signals
        .images
        .iter()
        .filter(|i| !i.has_alt || i.alt.trim().is_empty())
        .count();

    if missing == 0 {
        Finding::success(
            "Product images are accessible",
            "Every product image carries alt text.",
            Impact::Low,
            Principle::Accessibility,
        )
    } else {
        Finding::warning(
            "Product images without alt text",
            format!("{missing} image(s) are invisible to screen readers and image search."),
            "Describe each product image in its alt text (product name, color, angle).",
            Impact::Low,
            Principle::Accessibility,
        )
    }
}

fn cookie_consent(ctx: &RuleContext<'_>) -> Finding {
    if ctx.signals.ux.has_cookie_consent {
        Finding::success(
            "Cookie consent handled",
            "A consent banner is present.",
            Impact::Low,
            Principle::Trust,
        )
    } else {
        Finding::warning(
            "No cookie consent",
            "No consent banner was detected, which may conflict with GDPR and ePrivacy rules.",
            "Add a lightweight consent banner that does not cover the primary CTA.",
            Impact::Low,
            Principle::Trust,
        )
    }
}

fn chat(ctx: &RuleContext<'_>) -> Finding {
    if ctx.signals.ux.has_chat_widget {
        Finding::success(
            "Live help available",
            "A chat widget lets visitors ask questions at the decision point.",
            Impact::Low,
            Principle::Friction,
        )
    } else {
        Finding::warning(
            "No live help",
            "Visitors with last-minute questions have no instant channel.",
            "Consider a chat widget or a visible help line on purchase pages.",
            Impact::Low,
            Principle::Friction,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::test_support::Fixture;
    use crate::signals::{FormInfo, LinkInfo, ScrapedSignals};
    use crate::types::{CategoryKey, FindingType, PageType};

    fn form(fields: usize) -> FormInfo {
        FormInfo {
            field_count: fields,
            has_labels: true,
            has_validation: true,
            field_types: vec!["text".to_string(); fields],
        }
    }

    #[test]
    fn form_length_bands() {
        for (fields, expected) in [
            (3, FindingType::Success),
            (5, FindingType::Warning),
            (9, FindingType::Error),
        ] {
            let signals = ScrapedSignals {
                forms: vec![form(2), form(fields)],
                ..Default::default()
            };
            let category = Fixture::new(signals, PageType::Landing).run(CategoryKey::Friction);
            assert_eq!(category.findings[0].kind, expected, "{fields} fields");
        }
    }

    #[test]
    fn form_checks_skipped_without_forms() {
        let category =
            Fixture::new(ScrapedSignals::default(), PageType::Landing).run(CategoryKey::Friction);
        assert_eq!(category.findings.len(), 3);
        assert_eq!(category.findings[0].title, "No privacy reassurance");
    }

    #[test]
    fn leaky_checkout_is_error() {
        let signals = ScrapedSignals {
            links: (0..5)
                .map(|i| LinkInfo {
                    text: format!("Partner {i}"),
                    href: format!("https://partner{i}.example"),
                    is_external: true,
                })
                .collect(),
            ..Default::default()
        };
        let category = Fixture::new(signals, PageType::Checkout).run(CategoryKey::Friction);
        let exits = category
            .findings
            .iter()
            .find(|f| f.title == "Leaky checkout")
            .unwrap();
        assert_eq!(exits.kind, FindingType::Error);
    }

    #[test]
    fn contact_details_in_copy() {
        let signals = ScrapedSignals {
            text_content: "Questions? Call us on +45 12 34 56 78".to_string(),
            ..Default::default()
        };
        let category = Fixture::new(signals, PageType::Home).run(CategoryKey::Friction);
        assert_eq!(category.findings[1].title, "Contact options visible");
    }
}
