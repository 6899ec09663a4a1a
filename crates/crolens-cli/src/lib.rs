//! Text rendering and file output for the `crolens` binary

use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};

use crolens_core::types::{
    AnalysisResult, BenchmarkStatus, CheckStatus, FindingType, RiskRating, TechnicalHealth,
    VitalRating,
};
use url::Url;

const DIVIDER: &str = "─────────────────────────────────────────────────────────────";
const LABEL_WIDTH: usize = 16;

fn push_section_header(buf: &mut String, icon: &str, title: &str) {
    let _ = writeln!(buf, "{DIVIDER}");
    let _ = writeln!(buf, "{icon} {title}");
    let _ = writeln!(buf, "{DIVIDER}");
}

fn push_key_value(buf: &mut String, label: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    let _ = writeln!(buf, "• {:<width$} : {}", label, value, width = LABEL_WIDTH);
}

fn finding_marker(kind: FindingType) -> &'static str {
    match kind {
        FindingType::Success => "✓",
        FindingType::Warning => "!",
        FindingType::Error => "✗",
    }
}

fn check_marker(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "✓",
        CheckStatus::Warning => "!",
        CheckStatus::Fail => "✗",
        CheckStatus::Info => "i",
    }
}

fn benchmark_label(status: BenchmarkStatus) -> &'static str {
    match status {
        BenchmarkStatus::Above => "above",
        BenchmarkStatus::At => "at",
        BenchmarkStatus::Below => "below",
    }
}

fn risk_label(risk: RiskRating) -> &'static str {
    match risk {
        RiskRating::Low => "low",
        RiskRating::Medium => "medium",
        RiskRating::High => "high",
        RiskRating::Critical => "critical",
    }
}

fn vital_label(rating: VitalRating) -> &'static str {
    match rating {
        VitalRating::Good => "good",
        VitalRating::NeedsImprovement => "needs improvement",
        VitalRating::Poor => "poor",
    }
}

/// Render the sectioned text report
pub fn render_report(result: &AnalysisResult, url: &str) -> String {
    let mut out = String::new();

    push_section_header(&mut out, "🎯", "CRO Audit");
    push_key_value(&mut out, "URL", url);
    push_key_value(&mut out, "Page Type", result.page_type.as_str());
    push_key_value(&mut out, "Overall Score", &format!("{}/100", result.overall_score));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", result.summary);
    let _ = writeln!(out);

    push_section_header(&mut out, "📊", "Category Scores");
    for category in &result.categories {
        push_key_value(
            &mut out,
            &category.name,
            &format!("{:>3}/100  ({} findings)", category.score, category.findings.len()),
        );
    }
    let _ = writeln!(out);

    if !result.quick_wins.is_empty() {
        push_section_header(&mut out, "⚡", "Quick Wins");
        for win in &result.quick_wins {
            let _ = writeln!(out, "• {}", win.title);
            let _ = writeln!(out, "  ↳ {}", win.description);
            let _ = writeln!(out, "  ↳ {}", win.estimated_impact);
        }
        let _ = writeln!(out);
    }

    if !result.prioritized_actions.is_empty() {
        push_section_header(&mut out, "✅", "Prioritized Actions");
        for (i, action) in result.prioritized_actions.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, action);
        }
        let _ = writeln!(out);
    }

    for category in &result.categories {
        push_section_header(
            &mut out,
            &category.icon,
            &format!("{} ({}/100)", category.name, category.score),
        );
        for finding in &category.findings {
            let _ = writeln!(
                out,
                "{} {} [{} impact, {}]",
                finding_marker(finding.kind),
                finding.title,
                finding.impact.as_str(),
                finding.principle.as_str()
            );
            let _ = writeln!(out, "  {}", finding.description);
            if !finding.recommendation.is_empty() {
                let _ = writeln!(out, "  ↳ {}", finding.recommendation);
            }
        }
        let _ = writeln!(out);
    }

    push_section_header(&mut out, "🏁", "Benchmark");
    let _ = writeln!(out, "{}", result.benchmark.overall_position);
    let _ = writeln!(out, "{}", result.benchmark.industry_context);
    let _ = writeln!(out);
    for row in &result.benchmark.comparisons {
        push_key_value(
            &mut out,
            &row.metric,
            &format!(
                "{:>3} (avg {}, top {}) {}",
                row.your_value,
                row.industry_avg,
                row.top_performers,
                benchmark_label(row.status)
            ),
        );
    }
    let _ = writeln!(out);

    if !result.ab_test_ideas.is_empty() {
        push_section_header(&mut out, "🧪", "A/B Test Ideas");
        for idea in &result.ab_test_ideas {
            let _ = writeln!(out, "{}. {} (priority {})", idea.id, idea.title, idea.priority);
            let _ = writeln!(out, "  {}", idea.hypothesis);
            let _ = writeln!(out, "  A: {}", idea.variant_a);
            let _ = writeln!(out, "  B: {}", idea.variant_b);
            let _ = writeln!(out, "  Metric: {}", idea.metric);
        }
        let _ = writeln!(out);
    }

    if let Some(health) = result.technical_health.as_ref() {
        render_technical_health(&mut out, health);
    }

    out
}

fn render_technical_health(out: &mut String, health: &TechnicalHealth) {
    push_section_header(out, "🛡️", "Technical & Security");
    push_key_value(out, "Security Score", &format!("{}/100", health.score));
    push_key_value(out, "Risk", risk_label(health.risk));
    for (label, score) in [
        ("Performance", health.performance_score),
        ("Accessibility", health.accessibility_score),
        ("Best Practices", health.best_practices_score),
        ("SEO", health.seo_score),
    ] {
        if let Some(score) = score {
            push_key_value(out, label, &format!("{score}/100"));
        }
    }
    let _ = writeln!(out);

    if !health.core_web_vitals.is_empty() {
        let _ = writeln!(out, "Core Web Vitals:");
        for vital in &health.core_web_vitals {
            let _ = writeln!(
                out,
                "  • {:<6} {:>8}  {} (target {})",
                vital.metric,
                vital.value,
                vital_label(vital.rating),
                vital.threshold
            );
        }
        let _ = writeln!(out);
    }

    for group in &health.groups {
        let _ = writeln!(out, "{}:", group.category);
        for check in &group.checks {
            let _ = writeln!(
                out,
                "  {} {}: {}",
                check_marker(check.status),
                check.label,
                check.value
            );
            if let Some(fix) = check.how_to_fix.as_ref() {
                let _ = writeln!(out, "    ↳ {fix}");
            }
        }
    }
    let _ = writeln!(out);

    if !health.opportunities.is_empty() {
        let _ = writeln!(out, "Opportunities:");
        for audit in &health.opportunities {
            match audit.display_value.as_deref() {
                Some(value) => {
                    let _ = writeln!(out, "  • {} ({value})", audit.title);
                }
                None => {
                    let _ = writeln!(out, "  • {}", audit.title);
                }
            }
        }
        let _ = writeln!(out);
    }
}

/// Resolve `--save` to a file: a `.md` path is used as is, anything else is
/// treated as a directory
pub fn build_output_path(base: &Path, url: &Url) -> PathBuf {
    let has_md_extension = base
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("md"))
        .unwrap_or(false);

    if has_md_extension {
        base.to_path_buf()
    } else {
        base.join(derive_output_filename(url))
    }
}

pub fn derive_output_filename(url: &Url) -> String {
    let host = url.host_str().unwrap_or("page");
    let mut path_component = url.path().trim_matches('/').replace('/', "_");
    if path_component.is_empty() {
        path_component = "index".to_string();
    }

    let mut parts = vec![sanitize_for_filename(host), sanitize_for_filename(&path_component)];
    if let Some(query) = url.query().filter(|q| !q.is_empty()) {
        parts.push(sanitize_for_filename(query));
    }

    format!("{}.md", parts.join("__"))
}

pub fn sanitize_for_filename(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crolens_core::signals::{AnalysisInput, ScrapedSignals, SecurityHeadersData};
    use crolens_core::analyze_default;

    fn sample_result() -> AnalysisResult {
        let mut input = AnalysisInput::new(ScrapedSignals {
            url: "https://shop.example/products/lamp".to_string(),
            ..Default::default()
        });
        input.security_headers = Some(SecurityHeadersData {
            strict_transport_security: Some("max-age=31536000".to_string()),
            ..Default::default()
        });
        analyze_default(&input)
    }

    #[test]
    fn test_report_has_all_sections() {
        let report = render_report(&sample_result(), "https://shop.example/products/lamp");

        assert!(report.contains("🎯 CRO Audit"));
        assert!(report.contains("• Page Type        : product"));
        assert!(report.contains("Category Scores"));
        assert!(report.contains("Prioritized Actions"));
        assert!(report.contains("Benchmark"));
        assert!(report.contains("A/B Test Ideas"));
        assert!(report.contains("Technical & Security"));
        assert!(report.contains("✗ No CTAs found"));
    }

    #[test]
    fn test_key_value_skips_empty() {
        let mut buf = String::new();
        push_key_value(&mut buf, "Empty", "");
        assert!(buf.is_empty());

        push_key_value(&mut buf, "Score", "42/100");
        assert_eq!(buf, "• Score            : 42/100\n");
    }

    #[test]
    fn test_derive_output_filename() {
        let url = Url::parse("https://shop.example/products/lamp?variant=2").unwrap();
        assert_eq!(
            derive_output_filename(&url),
            "shop_example__products_lamp__variant_2.md"
        );

        let root = Url::parse("https://shop.example/").unwrap();
        assert_eq!(derive_output_filename(&root), "shop_example__index.md");
    }

    #[test]
    fn test_build_output_path() {
        let url = Url::parse("https://shop.example/cart").unwrap();
        assert_eq!(
            build_output_path(Path::new("reports"), &url),
            PathBuf::from("reports/shop_example__cart.md")
        );
        assert_eq!(
            build_output_path(Path::new("out/audit.MD"), &url),
            PathBuf::from("out/audit.MD")
        );
    }

    #[test]
    fn test_sanitize_for_filename() {
        assert_eq!(sanitize_for_filename("a b/c?d=é"), "a_b_c_d__");
        assert_eq!(sanitize_for_filename("keep-this_one"), "keep-this_one");
    }
}
