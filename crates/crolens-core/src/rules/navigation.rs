//! Navigation and page-structure checks.

use super::{Applicability, Check, RuleContext};
use crate::types::{Finding, Impact, PageType, Principle};

const BREADCRUMB_PAGES: &[PageType] = &[PageType::Product, PageType::Collection];
const FAQ_PAGES: &[PageType] = &[PageType::Home, PageType::Product, PageType::Landing];

pub(super) const CHECKS: &[Check] = &[
    Check {
        id: "nav.menu",
        applies: Applicability::Always,
        evaluate: menu,
    },
    Check {
        id: "nav.footer",
        applies: Applicability::Always,
        evaluate: footer,
    },
    Check {
        id: "nav.breadcrumbs",
        applies: Applicability::PageTypes(BREADCRUMB_PAGES),
        evaluate: breadcrumbs,
    },
    Check {
        id: "nav.faq",
        applies: Applicability::PageTypes(FAQ_PAGES),
        evaluate: faq,
    },
];

fn menu(ctx: &RuleContext<'_>) -> Finding {
    let structure = &ctx.signals.structure;
    let max = ctx.thresholds.nav_max_items;

    if !structure.has_nav {
        Finding::error(
            "No navigation found",
            "Visitors cannot move to other parts of the site from this page.",
            "Add a clear main navigation with the most important sections.",
            Impact::Medium,
            Principle::JakobsLaw,
        )
    } else if structure.nav_item_count > max {
        Finding::warning(
            "Navigation has too many items",
            format!(
                "The main menu has {} items; more than {max} slows down the choice.",
                structure.nav_item_count
            ),
            format!("Group the menu into at most {max} top-level items."),
            Impact::Medium,
            Principle::HicksLaw,
        )
    } else {
        Finding::success(
            "Focused navigation",
            format!("The main menu has {} items.", structure.nav_item_count),
            Impact::Medium,
            Principle::HicksLaw,
        )
    }
}

fn footer(ctx: &RuleContext<'_>) -> Finding {
    if ctx.signals.structure.has_footer {
        Finding::success(
            "Footer present",
            "A footer gives access to contact, policies and secondary pages.",
            Impact::Low,
            Principle::JakobsLaw,
        )
    } else {
        Finding::warning(
            "No footer",
            "Visitors expect contact details and policies at the bottom of the page.",
            "Add a footer with contact information, terms, privacy policy and key links.",
            Impact::Low,
            Principle::JakobsLaw,
        )
    }
}

fn breadcrumbs(ctx: &RuleContext<'_>) -> Finding {
    if ctx.signals.structure.has_breadcrumbs {
        Finding::success(
            "Breadcrumbs present",
            "Breadcrumbs show where the page sits in the catalogue.",
            Impact::Medium,
            Principle::CognitiveLoad,
        )
    } else {
        Finding::warning(
            "No breadcrumbs",
            "Visitors arriving from search cannot see or reach the surrounding category.",
            "Add breadcrumbs above the page title (Home › Category › Product).",
            Impact::Medium,
            Principle::CognitiveLoad,
        )
    }
}

fn faq(ctx: &RuleContext<'_>) -> Finding {
    if ctx.signals.structure.has_faq {
        Finding::success(
            "FAQ section present",
            "Common objections are answered on the page.",
            Impact::Medium,
            Principle::CognitiveLoad,
        )
    } else {
        Finding::warning(
            "No FAQ section",
            "Unanswered questions about delivery, returns or fit stay open at the decision point.",
            "Add a short FAQ that handles the top 4-6 objections.",
            Impact::Medium,
            Principle::CognitiveLoad,
        )
    }
}
