//! Category rule engine.
//!
//! Each category is a static table of [`Check`]s. A check has an
//! applicability gate and an evaluator that always returns exactly one
//! [`Finding`]; the engine runs every applicable check of a table in order,
//! so a category can never silently skip a check that applies to the page.

mod above_fold;
mod content;
mod conversion;
mod cta;
mod design;
mod friction;
mod navigation;
mod performance;
mod trust;

use crate::config::Thresholds;
use crate::scoring::calc_score;
use crate::signals::{ScrapedSignals, SpeedData};
use crate::text_index::TextIndex;
use crate::types::{Category, CategoryKey, Finding, PageType};

/// Everything a check may look at
pub struct RuleContext<'a> {
    pub signals: &'a ScrapedSignals,
    pub page_type: PageType,
    pub speed: Option<&'a SpeedData>,
    pub text: &'a TextIndex,
    pub thresholds: &'a Thresholds,
}

/// When a check is evaluated
#[derive(Clone, Copy)]
pub enum Applicability {
    Always,
    /// Only on the listed page types
    PageTypes(&'static [PageType]),
    /// Only when the predicate holds (e.g. the page has forms at all)
    When(fn(&RuleContext<'_>) -> bool),
}

impl Applicability {
    fn applies(&self, ctx: &RuleContext<'_>) -> bool {
        match self {
            Applicability::Always => true,
            Applicability::PageTypes(types) => types.contains(&ctx.page_type),
            Applicability::When(predicate) => predicate(ctx),
        }
    }
}

/// One rule: a gate plus an evaluator that always yields a finding
pub struct Check {
    pub id: &'static str,
    pub applies: Applicability,
    pub evaluate: fn(&RuleContext<'_>) -> Finding,
}

/// A named table of checks
pub struct CategoryRules {
    pub key: CategoryKey,
    pub checks: &'static [Check],
}

/// All nine categories in report order
pub static CATEGORIES: [CategoryRules; 9] = [
    CategoryRules {
        key: CategoryKey::AboveTheFold,
        checks: above_fold::CHECKS,
    },
    CategoryRules {
        key: CategoryKey::Cta,
        checks: cta::CHECKS,
    },
    CategoryRules {
        key: CategoryKey::Trust,
        checks: trust::CHECKS,
    },
    CategoryRules {
        key: CategoryKey::Content,
        checks: content::CHECKS,
    },
    CategoryRules {
        key: CategoryKey::Navigation,
        checks: navigation::CHECKS,
    },
    CategoryRules {
        key: CategoryKey::Design,
        checks: design::CHECKS,
    },
    CategoryRules {
        key: CategoryKey::Performance,
        checks: performance::CHECKS,
    },
    CategoryRules {
        key: CategoryKey::Conversion,
        checks: conversion::CHECKS,
    },
    CategoryRules {
        key: CategoryKey::Friction,
        checks: friction::CHECKS,
    },
];

impl CategoryRules {
    /// Checks of this table that apply to the context, in table order
    pub fn applicable<'r>(&'r self, ctx: &'r RuleContext<'_>) -> impl Iterator<Item = &'r Check> {
        self.checks.iter().filter(move |check| check.applies.applies(ctx))
    }

    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Category {
        let findings: Vec<Finding> = self
            .applicable(ctx)
            .map(|check| {
                let finding = (check.evaluate)(ctx);
                tracing::trace!(check = check.id, kind = ?finding.kind, "evaluated check");
                finding
            })
            .collect();

        let score = calc_score(&findings);
        tracing::debug!(
            category = self.key.as_str(),
            score,
            findings = findings.len(),
            "scored category"
        );

        Category {
            key: self.key,
            name: self.key.name().to_string(),
            icon: self.key.icon().to_string(),
            score,
            findings,
        }
    }
}

/// Run all nine analyzers
pub fn analyze_categories(ctx: &RuleContext<'_>) -> Vec<Category> {
    CATEGORIES.iter().map(|rules| rules.evaluate(ctx)).collect()
}

/// Run a single analyzer
pub fn analyze_category(key: CategoryKey, ctx: &RuleContext<'_>) -> Category {
    CATEGORIES
        .iter()
        .find(|rules| rules.key == key)
        .map(|rules| rules.evaluate(ctx))
        .unwrap_or_else(|| Category {
            key,
            name: key.name().to_string(),
            icon: key.icon().to_string(),
            score: calc_score(&[]),
            findings: Vec::new(),
        })
}


#[cfg(test)]
mod tests {
    use super::test_support::Fixture;
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn categories_are_in_report_order() {
        let keys: Vec<_> = CATEGORIES.iter().map(|c| c.key).collect();
        assert_eq!(keys, CategoryKey::ALL.to_vec());
    }

    #[test]
    fn check_ids_are_unique() {
        let mut seen = HashSet::new();
        for rules in &CATEGORIES {
            for check in rules.checks {
                assert!(seen.insert(check.id), "duplicate check id {}", check.id);
            }
        }
    }

    #[test]
    fn every_applicable_check_emits_one_finding() {
        for page_type in PageType::ALL {
            let fixture = Fixture::new(ScrapedSignals::default(), page_type);
            let ctx = fixture.ctx();
            for rules in &CATEGORIES {
                let expected = rules.applicable(&ctx).count();
                let category = rules.evaluate(&ctx);
                assert_eq!(category.findings.len(), expected);
                assert!(
                    !category.findings.is_empty(),
                    "{} has no findings on {page_type}",
                    rules.key.as_str()
                );
            }
        }
    }

    #[test]
    fn recommendation_is_empty_iff_success() {
        for page_type in PageType::ALL {
            let fixture = Fixture::new(ScrapedSignals::default(), page_type);
            for category in analyze_categories(&fixture.ctx()) {
                for finding in &category.findings {
                    assert_eq!(
                        finding.is_success(),
                        finding.recommendation.is_empty(),
                        "{}",
                        finding.title
                    );
                }
            }
        }
    }
}
