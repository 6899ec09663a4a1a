//! Mobile and performance checks.
//!
//! Lighthouse metrics take precedence when a speed record is present; the
//! local load timing collected by the scraper is the fallback.

use super::{Applicability, Check, RuleContext};
use crate::types::{Finding, Impact, Principle};

const GOOD_LIGHTHOUSE: u8 = 90;
const POOR_LIGHTHOUSE: u8 = 50;

pub(super) const CHECKS: &[Check] = &[
    Check {
        id: "perf.lighthouse",
        applies: Applicability::When(has_speed),
        evaluate: lighthouse_score,
    },
    Check {
        id: "perf.lcp",
        applies: Applicability::When(has_speed),
        evaluate: largest_contentful_paint,
    },
    Check {
        id: "perf.cls",
        applies: Applicability::When(has_speed),
        evaluate: layout_shift,
    },
    Check {
        id: "perf.tbt",
        applies: Applicability::When(has_speed),
        evaluate: blocking_time,
    },
    Check {
        id: "perf.load_time",
        applies: Applicability::When(no_speed),
        evaluate: load_time,
    },
    Check {
        id: "perf.viewport",
        applies: Applicability::Always,
        evaluate: viewport,
    },
    Check {
        id: "perf.resources",
        applies: Applicability::Always,
        evaluate: resources,
    },
];

fn has_speed(ctx: &RuleContext<'_>) -> bool {
    ctx.speed.is_some()
}

fn no_speed(ctx: &RuleContext<'_>) -> bool {
    ctx.speed.is_none()
}

fn lighthouse_score(ctx: &RuleContext<'_>) -> Finding {
    let score = ctx.speed.map_or(0, |s| s.performance_score);
    let strategy = ctx.speed.map_or("mobile", |s| s.strategy.as_str());

    if score >= GOOD_LIGHTHOUSE {
        Finding::success(
            "Fast page",
            format!("Lighthouse performance score is {score}/100 ({strategy})."),
            Impact::High,
            Principle::DohertyThreshold,
        )
    } else if score >= POOR_LIGHTHOUSE {
        Finding::warning(
            "Page speed needs improvement",
            format!("Lighthouse performance score is {score}/100 ({strategy})."),
            "Compress images, defer non-critical scripts and reduce third-party tags.",
            Impact::High,
            Principle::DohertyThreshold,
        )
    } else {
        Finding::error(
            "Slow page",
            format!("Lighthouse performance score is only {score}/100 ({strategy})."),
            "Prioritise the Lighthouse opportunities: image sizes, render-blocking resources and unused JavaScript.",
            Impact::High,
            Principle::DohertyThreshold,
        )
    }
}

fn largest_contentful_paint(ctx: &RuleContext<'_>) -> Finding {
    let t = ctx.thresholds;
    let lcp = ctx.speed.map_or(0.0, |s| s.lcp_ms);
    let seconds = lcp / 1000.0;

    if lcp <= t.lcp_good_ms {
        Finding::success(
            "Fast main content",
            format!("Largest Contentful Paint is {seconds:.1}s."),
            Impact::High,
            Principle::DohertyThreshold,
        )
    } else if lcp <= t.lcp_poor_ms {
        Finding::warning(
            "Main content loads slowly",
            format!("Largest Contentful Paint is {seconds:.1}s."),
            format!(
                "Bring LCP under {:.1}s: preload the hero image and serve it in a modern format.",
                t.lcp_good_ms / 1000.0
            ),
            Impact::High,
            Principle::DohertyThreshold,
        )
    } else {
        Finding::error(
            "Main content loads very slowly",
            format!("Largest Contentful Paint is {seconds:.1}s."),
            format!(
                "Bring LCP under {:.1}s: optimise the hero image, server response time and render-blocking CSS.",
                t.lcp_good_ms / 1000.0
            ),
            Impact::High,
            Principle::DohertyThreshold,
        )
    }
}

fn layout_shift(ctx: &RuleContext<'_>) -> Finding {
    let cls = ctx.speed.map_or(0.0, |s| s.cls);

    if cls > ctx.thresholds.cls_warning {
        Finding::warning(
            "Layout shifts while loading",
            format!("Cumulative Layout Shift is {cls:.2}."),
            "Reserve space for images, ads and embeds so content does not jump.",
            Impact::Medium,
            Principle::AestheticUsability,
        )
    } else {
        Finding::success(
            "Stable layout",
            format!("Cumulative Layout Shift is {cls:.2}."),
            Impact::Medium,
            Principle::AestheticUsability,
        )
    }
}

fn blocking_time(ctx: &RuleContext<'_>) -> Finding {
    let t = ctx.thresholds;
    let tbt = ctx.speed.map_or(0.0, |s| s.tbt_ms);

    if tbt <= t.tbt_good_ms {
        Finding::success(
            "Responsive to input",
            format!("Total Blocking Time is {tbt:.0}ms."),
            Impact::Medium,
            Principle::DohertyThreshold,
        )
    } else if tbt <= t.tbt_poor_ms {
        Finding::warning(
            "Page is sluggish to respond",
            format!("Total Blocking Time is {tbt:.0}ms."),
            "Split long JavaScript tasks and defer scripts that are not needed for the first interaction.",
            Impact::Medium,
            Principle::DohertyThreshold,
        )
    } else {
        Finding::error(
            "Page blocks user input",
            format!("Total Blocking Time is {tbt:.0}ms."),
            "Audit third-party scripts and remove or delay the heaviest ones.",
            Impact::Medium,
            Principle::DohertyThreshold,
        )
    }
}

fn load_time(ctx: &RuleContext<'_>) -> Finding {
    let t = ctx.thresholds;
    let ms = ctx.signals.performance.load_time_ms;
    let seconds = ms / 1000.0;

    if ms < t.load_time_good_ms {
        Finding::success(
            "Fast load time",
            format!("The page loaded in {seconds:.1}s."),
            Impact::High,
            Principle::DohertyThreshold,
        )
    } else if ms < t.load_time_poor_ms {
        Finding::warning(
            "Load time could be faster",
            format!("The page loaded in {seconds:.1}s."),
            format!(
                "Aim for under {:.0}s: compress images and defer non-critical scripts.",
                t.load_time_good_ms / 1000.0
            ),
            Impact::High,
            Principle::DohertyThreshold,
        )
    } else {
        Finding::error(
            "Slow load time",
            format!("The page took {seconds:.1}s to load."),
            format!(
                "Aim for under {:.0}s: every extra second costs conversions.",
                t.load_time_good_ms / 1000.0
            ),
            Impact::High,
            Principle::DohertyThreshold,
        )
    }
}

fn viewport(ctx: &RuleContext<'_>) -> Finding {
    if ctx.signals.has_viewport_meta() {
        Finding::success(
            "Mobile viewport configured",
            "A viewport meta tag makes the page render at device width.",
            Impact::High,
            Principle::Accessibility,
        )
    } else {
        Finding::error(
            "No mobile viewport",
            "Without a viewport meta tag the page renders zoomed out on phones.",
            "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">.",
            Impact::High,
            Principle::Accessibility,
        )
    }
}

fn resources(ctx: &RuleContext<'_>) -> Finding {
    let count = ctx.signals.performance.resource_count;
    let max = ctx.thresholds.max_resources;

    if count > max {
        Finding::warning(
            "Many network requests",
            format!("The page loads {count} resources."),
            format!("Reduce requests below {max} by bundling assets and dropping unused tags."),
            Impact::Low,
            Principle::DohertyThreshold,
        )
    } else {
        Finding::success(
            "Lean resource count",
            format!("The page loads {count} resources."),
            Impact::Low,
            Principle::DohertyThreshold,
        )
    }
}
