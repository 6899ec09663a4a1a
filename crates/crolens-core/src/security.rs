//! Technical and security audit.
//!
//! A second rule table, evaluated over the security signals of the page,
//! the response headers and the Lighthouse record. A rule returns `None`
//! when the data it needs was not collected, so missing sources shrink the
//! audit instead of failing it.

use crate::config::Thresholds;
use crate::signals::{ScrapedSignals, SecurityHeadersData, SecuritySignals, SpeedData};
use crate::types::{
    CheckStatus, Risk, RiskRating, SecurityCheck, SecurityCheckGroup, TechnicalHealth, VitalRating,
    WebVital,
};

const TRANSPORT: &str = "Transport Security";
const HEADERS: &str = "Security Headers";
const PRIVACY: &str = "Privacy & Compliance";
const EXPOSURE: &str = "Information Exposure";
const SCRIPTS: &str = "Third-Party Scripts";
const ACCESS: &str = "Access & Authentication";
const TRUST: &str = "Trust & UX";

const CRITICAL_HIGH_FAILS: usize = 3;
const MEDIUM_RISK_FAILS: usize = 3;

/// Data available to the security rules
pub struct AuditContext<'a> {
    pub signals: &'a ScrapedSignals,
    pub security: Option<&'a SecuritySignals>,
    pub headers: Option<&'a SecurityHeadersData>,
}

type SecurityRule = fn(&AuditContext<'_>) -> Option<SecurityCheck>;

const RULES: &[SecurityRule] = &[
    https,
    mixed_content,
    hsts,
    content_security_policy,
    frame_options,
    content_type_options,
    referrer_policy,
    permissions_policy,
    cookie_consent,
    privacy_policy,
    exposed_emails,
    server_header,
    powered_by,
    robots_txt,
    subresource_integrity,
    jquery_version,
    admin_login,
    password_transport,
    aggressive_popup,
    checkout_badge,
];

fn check(
    category: &str,
    label: &str,
    status: CheckStatus,
    value: impl Into<String>,
    risk: Risk,
) -> SecurityCheck {
    SecurityCheck {
        category: category.to_string(),
        label: label.to_string(),
        status,
        value: value.into(),
        risk,
        detail: None,
        how_to_fix: None,
    }
}

fn pass(category: &str, label: &str, value: impl Into<String>) -> SecurityCheck {
    check(category, label, CheckStatus::Pass, value, Risk::None)
}

fn info(category: &str, label: &str, value: impl Into<String>) -> SecurityCheck {
    check(category, label, CheckStatus::Info, value, Risk::None)
}

fn issue(
    status: CheckStatus,
    category: &str,
    label: &str,
    value: impl Into<String>,
    risk: Risk,
    detail: &str,
    how_to_fix: &str,
) -> SecurityCheck {
    SecurityCheck {
        detail: Some(detail.to_string()),
        how_to_fix: Some(how_to_fix.to_string()),
        ..check(category, label, status, value, risk)
    }
}

fn is_https(ctx: &AuditContext<'_>) -> Option<bool> {
    match ctx.security {
        Some(security) => Some(security.is_https),
        None if !ctx.signals.url.is_empty() => {
            Some(ctx.signals.url.to_ascii_lowercase().starts_with("https://"))
        }
        None => None,
    }
}

fn https(ctx: &AuditContext<'_>) -> Option<SecurityCheck> {
    let secure = is_https(ctx)?;
    Some(if secure {
        pass(TRANSPORT, "HTTPS", "Enabled")
    } else {
        issue(
            CheckStatus::Fail,
            TRANSPORT,
            "HTTPS",
            "Not enabled",
            Risk::High,
            "The page is served over plain HTTP; browsers mark it as not secure.",
            "Install a TLS certificate and redirect all HTTP traffic to HTTPS.",
        )
    })
}

fn mixed_content(ctx: &AuditContext<'_>) -> Option<SecurityCheck> {
    let security = ctx.security?;
    if !security.is_https {
        return None;
    }
    Some(if security.has_mixed_content {
        issue(
            CheckStatus::Fail,
            TRANSPORT,
            "Mixed content",
            "HTTP resources on HTTPS page",
            Risk::Medium,
            "Some resources load over HTTP and may be blocked or tampered with.",
            "Load every image, script and stylesheet over HTTPS.",
        )
    } else {
        pass(TRANSPORT, "Mixed content", "None detected")
    })
}

fn header_check(
    value: Option<&String>,
    label: &str,
    risk: Risk,
    detail: &str,
    how_to_fix: &str,
) -> SecurityCheck {
    match value.map(|v| v.trim()).filter(|v| !v.is_empty()) {
        Some(v) => pass(HEADERS, label, v),
        None => issue(CheckStatus::Fail, HEADERS, label, "Missing", risk, detail, how_to_fix),
    }
}

fn hsts(ctx: &AuditContext<'_>) -> Option<SecurityCheck> {
    let headers = ctx.headers?;
    Some(header_check(
        headers.strict_transport_security.as_ref(),
        "Strict-Transport-Security",
        Risk::Medium,
        "Without HSTS, the first visit can be downgraded to HTTP.",
        "Send `Strict-Transport-Security: max-age=31536000; includeSubDomains`.",
    ))
}

fn content_security_policy(ctx: &AuditContext<'_>) -> Option<SecurityCheck> {
    let headers = ctx.headers?;
    Some(header_check(
        headers.content_security_policy.as_ref(),
        "Content-Security-Policy",
        Risk::Medium,
        "No policy restricts which scripts may run, which widens the impact of XSS.",
        "Define a Content-Security-Policy, starting in report-only mode.",
    ))
}

fn frame_options(ctx: &AuditContext<'_>) -> Option<SecurityCheck> {
    let headers = ctx.headers?;
    let csp_frames = headers
        .content_security_policy
        .as_deref()
        .is_some_and(|csp| csp.contains("frame-ancestors"));
    if csp_frames {
        return Some(pass(HEADERS, "X-Frame-Options", "Covered by CSP frame-ancestors"));
    }
    Some(header_check(
        headers.x_frame_options.as_ref(),
        "X-Frame-Options",
        Risk::Medium,
        "The page can be embedded in other sites, enabling clickjacking.",
        "Send `X-Frame-Options: SAMEORIGIN` or a CSP `frame-ancestors` directive.",
    ))
}

fn content_type_options(ctx: &AuditContext<'_>) -> Option<SecurityCheck> {
    let headers = ctx.headers?;
    Some(header_check(
        headers.x_content_type_options.as_ref(),
        "X-Content-Type-Options",
        Risk::Low,
        "Browsers may MIME-sniff responses into executable types.",
        "Send `X-Content-Type-Options: nosniff`.",
    ))
}

fn referrer_policy(ctx: &AuditContext<'_>) -> Option<SecurityCheck> {
    let headers = ctx.headers?;
    Some(header_check(
        headers.referrer_policy.as_ref(),
        "Referrer-Policy",
        Risk::Low,
        "Full URLs, including query parameters, may leak to third parties.",
        "Send `Referrer-Policy: strict-origin-when-cross-origin`.",
    ))
}

fn permissions_policy(ctx: &AuditContext<'_>) -> Option<SecurityCheck> {
    let headers = ctx.headers?;
    Some(match headers.permissions_policy.as_deref() {
        Some(value) if !value.trim().is_empty() => {
            pass(HEADERS, "Permissions-Policy", value.trim())
        }
        _ => info(HEADERS, "Permissions-Policy", "Not set"),
    })
}

fn cookie_consent(ctx: &AuditContext<'_>) -> Option<SecurityCheck> {
    ctx.security?;
    Some(if ctx.signals.ux.has_cookie_consent {
        pass(PRIVACY, "Cookie consent", "Banner detected")
    } else {
        issue(
            CheckStatus::Warning,
            PRIVACY,
            "Cookie consent",
            "Not detected",
            Risk::Medium,
            "No consent banner was found; tracking without consent conflicts with GDPR.",
            "Add a consent management platform and block tracking until consent is given.",
        )
    })
}

fn privacy_policy(ctx: &AuditContext<'_>) -> Option<SecurityCheck> {
    let security = ctx.security?;
    Some(if security.has_privacy_policy_link {
        pass(PRIVACY, "Privacy policy", "Linked")
    } else {
        issue(
            CheckStatus::Fail,
            PRIVACY,
            "Privacy policy",
            "Not linked",
            Risk::Medium,
            "No link to a privacy policy was found on the page.",
            "Link the privacy policy from the footer and from every form.",
        )
    })
}

fn exposed_emails(ctx: &AuditContext<'_>) -> Option<SecurityCheck> {
    let security = ctx.security?;
    Some(match security.exposed_emails.len() {
        0 => pass(PRIVACY, "Exposed e-mail addresses", "None"),
        n => issue(
            CheckStatus::Warning,
            PRIVACY,
            "Exposed e-mail addresses",
            format!("{n} found"),
            Risk::Low,
            "Plain-text addresses are harvested by spam bots.",
            "Use a contact form or obfuscate addresses in the markup.",
        ),
    })
}

fn server_header(ctx: &AuditContext<'_>) -> Option<SecurityCheck> {
    let headers = ctx.headers?;
    let server = headers.server.as_deref().map(str::trim).filter(|s| !s.is_empty());
    Some(match server {
        None => pass(EXPOSURE, "Server header", "Not disclosed"),
        Some(value) if value.chars().any(|c| c.is_ascii_digit()) => issue(
            CheckStatus::Warning,
            EXPOSURE,
            "Server header",
            value,
            Risk::Low,
            "The header reveals the server software version, which helps attackers pick exploits.",
            "Strip the version from the Server header.",
        ),
        Some(value) => info(EXPOSURE, "Server header", value),
    })
}

fn powered_by(ctx: &AuditContext<'_>) -> Option<SecurityCheck> {
    let headers = ctx.headers?;
    Some(match headers.x_powered_by.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => pass(EXPOSURE, "X-Powered-By", "Not disclosed"),
        Some(value) => issue(
            CheckStatus::Fail,
            EXPOSURE,
            "X-Powered-By",
            value,
            Risk::Low,
            "The response advertises the application framework.",
            "Remove the X-Powered-By header in the server or framework config.",
        ),
    })
}

fn robots_txt(ctx: &AuditContext<'_>) -> Option<SecurityCheck> {
    let headers = ctx.headers?;
    let Some(body) = headers.robots_txt.as_deref().filter(|b| !b.trim().is_empty()) else {
        return Some(issue(
            CheckStatus::Warning,
            EXPOSURE,
            "robots.txt",
            "Missing",
            Risk::Low,
            "No robots.txt was served; crawlers get no guidance.",
            "Publish a robots.txt that references the sitemap.",
        ));
    };

    let lower = body.to_ascii_lowercase();
    let sensitive = lower.lines().any(|line| {
        line.trim_start().starts_with("disallow:")
            && ["admin", "backup", "private", ".git", "wp-admin"]
                .iter()
                .any(|word| line.contains(word))
    });
    Some(if sensitive {
        info(EXPOSURE, "robots.txt", "Lists sensitive paths")
    } else {
        pass(EXPOSURE, "robots.txt", "Present")
    })
}

fn subresource_integrity(ctx: &AuditContext<'_>) -> Option<SecurityCheck> {
    let security = ctx.security?;
    let total = security.third_party_scripts;
    let unprotected = security.third_party_scripts_without_sri.min(total);
    Some(if total == 0 {
        info(SCRIPTS, "Subresource Integrity", "No third-party scripts")
    } else if unprotected == 0 {
        pass(SCRIPTS, "Subresource Integrity", format!("{total} of {total} scripts protected"))
    } else {
        issue(
            CheckStatus::Warning,
            SCRIPTS,
            "Subresource Integrity",
            format!("{unprotected} of {total} scripts without SRI"),
            Risk::Medium,
            "A compromised CDN could inject code into the page.",
            "Add `integrity` and `crossorigin` attributes to third-party script tags.",
        )
    })
}

/// Major and minor version of a dotted version string
fn major_minor(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.trim().trim_start_matches(['v', 'V']).split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    Some((major, minor))
}

fn jquery_version(ctx: &AuditContext<'_>) -> Option<SecurityCheck> {
    let version = ctx.security?.jquery_version.as_deref()?;
    let label = "jQuery version";
    Some(match major_minor(version) {
        Some((major, _)) if major < 3 => issue(
            CheckStatus::Fail,
            SCRIPTS,
            label,
            version,
            Risk::High,
            "jQuery before 3.x has known XSS vulnerabilities.",
            "Upgrade to the latest jQuery 3.x release.",
        ),
        Some((3, minor)) if minor < 5 => issue(
            CheckStatus::Warning,
            SCRIPTS,
            label,
            version,
            Risk::Medium,
            "jQuery before 3.5 is affected by CVE-2020-11022.",
            "Upgrade to jQuery 3.5 or later.",
        ),
        Some(_) => pass(SCRIPTS, label, version),
        None => info(SCRIPTS, label, version),
    })
}

fn admin_login(ctx: &AuditContext<'_>) -> Option<SecurityCheck> {
    let security = ctx.security?;
    Some(if security.has_admin_login_link {
        issue(
            CheckStatus::Warning,
            ACCESS,
            "Admin login exposure",
            "Admin link visible",
            Risk::Medium,
            "Public links to the admin login invite brute-force attempts.",
            "Remove admin links from public pages and protect the login with rate limiting or 2FA.",
        )
    } else {
        pass(ACCESS, "Admin login exposure", "Not linked")
    })
}

fn password_transport(ctx: &AuditContext<'_>) -> Option<SecurityCheck> {
    let security = ctx.security?;
    if !security.has_password_field {
        return None;
    }
    Some(if security.is_https {
        pass(ACCESS, "Password transport", "Encrypted")
    } else {
        issue(
            CheckStatus::Fail,
            ACCESS,
            "Password transport",
            "Sent over HTTP",
            Risk::High,
            "A password field on an HTTP page sends credentials in clear text.",
            "Serve every page with a login form over HTTPS.",
        )
    })
}

fn aggressive_popup(ctx: &AuditContext<'_>) -> Option<SecurityCheck> {
    let security = ctx.security?;
    Some(if security.has_aggressive_popup {
        issue(
            CheckStatus::Warning,
            TRUST,
            "Popups",
            "Intrusive popup detected",
            Risk::Low,
            "A popup covers the content on load, which hurts trust and mobile rankings.",
            "Delay popups until exit intent or after meaningful engagement.",
        )
    } else {
        pass(TRUST, "Popups", "None intrusive")
    })
}

fn checkout_badge(ctx: &AuditContext<'_>) -> Option<SecurityCheck> {
    let security = ctx.security?;
    let commerce = ctx.signals.structure.has_checkout_form
        || ctx.signals.structure.has_add_to_cart
        || ctx.signals.page_signals.checkout_indicator_count > 0;
    if !commerce {
        return None;
    }
    Some(if security.has_checkout_security_badge {
        pass(TRUST, "Checkout security badge", "Shown")
    } else {
        issue(
            CheckStatus::Warning,
            TRUST,
            "Checkout security badge",
            "Not shown",
            Risk::Low,
            "Buyers see no security reassurance near the purchase.",
            "Show a secure-checkout badge and payment logos near the buy button.",
        )
    })
}

fn rate(value: f64, good: f64, poor: f64) -> VitalRating {
    if value <= good {
        VitalRating::Good
    } else if value <= poor {
        VitalRating::NeedsImprovement
    } else {
        VitalRating::Poor
    }
}

fn seconds(ms: f64) -> String {
    format!("{:.1} s", ms / 1000.0)
}

/// Lighthouse lab metrics classified against the Core Web Vitals bands
pub fn web_vitals(speed: &SpeedData, thresholds: &Thresholds) -> Vec<WebVital> {
    let vital = |metric: &str, value: String, rating, threshold: String| WebVital {
        metric: metric.to_string(),
        value,
        rating,
        threshold,
    };

    vec![
        vital(
            "LCP",
            seconds(speed.lcp_ms),
            rate(speed.lcp_ms, thresholds.lcp_good_ms, thresholds.lcp_poor_ms),
            format!("≤ {}", seconds(thresholds.lcp_good_ms)),
        ),
        vital(
            "FCP",
            seconds(speed.fcp_ms),
            rate(speed.fcp_ms, 1_800.0, 3_000.0),
            "≤ 1.8 s".to_string(),
        ),
        vital(
            "TBT",
            format!("{:.0} ms", speed.tbt_ms),
            rate(speed.tbt_ms, thresholds.tbt_good_ms, thresholds.tbt_poor_ms),
            format!("≤ {:.0} ms", thresholds.tbt_good_ms),
        ),
        vital(
            "CLS",
            format!("{:.3}", speed.cls),
            rate(speed.cls, 0.1, thresholds.cls_warning),
            "≤ 0.1".to_string(),
        ),
        vital(
            "SI",
            seconds(speed.si_ms),
            rate(speed.si_ms, 3_400.0, 5_800.0),
            "≤ 3.4 s".to_string(),
        ),
        vital(
            "TTFB",
            format!("{:.0} ms", speed.ttfb_ms),
            rate(speed.ttfb_ms, 800.0, 1_800.0),
            "≤ 800 ms".to_string(),
        ),
    ]
}

/// Run every rule whose data is available
pub fn run_checks(ctx: &AuditContext<'_>) -> Vec<SecurityCheck> {
    RULES.iter().filter_map(|rule| rule(ctx)).collect()
}

/// Share of passed checks among all non-informational checks
pub fn security_score(checks: &[SecurityCheck]) -> u8 {
    let rated: Vec<_> = checks.iter().filter(|c| c.status != CheckStatus::Info).collect();
    if rated.is_empty() {
        return 100;
    }
    let passed = rated.iter().filter(|c| c.status == CheckStatus::Pass).count();
    (100.0 * passed as f64 / rated.len() as f64).round() as u8
}

/// Aggregate tier from failed checks; warnings do not raise the tier
pub fn risk_rating(checks: &[SecurityCheck]) -> RiskRating {
    let fails = |risk: Risk| {
        checks
            .iter()
            .filter(|c| c.status == CheckStatus::Fail && c.risk == risk)
            .count()
    };
    let high = fails(Risk::High);

    if high >= CRITICAL_HIGH_FAILS {
        RiskRating::Critical
    } else if high >= 1 {
        RiskRating::High
    } else if fails(Risk::Medium) >= MEDIUM_RISK_FAILS {
        RiskRating::Medium
    } else {
        RiskRating::Low
    }
}

/// Group checks by category name, keeping first-seen order
pub fn group_checks(checks: Vec<SecurityCheck>) -> Vec<SecurityCheckGroup> {
    let mut groups: Vec<SecurityCheckGroup> = Vec::new();
    for check in checks {
        match groups.iter_mut().find(|g| g.category == check.category) {
            Some(group) => group.checks.push(check),
            None => groups.push(SecurityCheckGroup {
                category: check.category.clone(),
                checks: vec![check],
            }),
        }
    }
    groups
}

/// Build the technical-health section, or `None` when there is nothing to audit
pub fn audit(
    signals: &ScrapedSignals,
    speed: Option<&SpeedData>,
    headers: Option<&SecurityHeadersData>,
    thresholds: &Thresholds,
) -> Option<TechnicalHealth> {
    if speed.is_none() && headers.is_none() && signals.security.is_none() {
        tracing::debug!("no speed, header or security data; skipping technical audit");
        return None;
    }

    let ctx = AuditContext {
        signals,
        security: signals.security.as_ref(),
        headers,
    };
    let checks = run_checks(&ctx);
    let score = security_score(&checks);
    let risk = risk_rating(&checks);
    tracing::debug!(checks = checks.len(), score, ?risk, "technical audit complete");

    Some(TechnicalHealth {
        score,
        risk,
        performance_score: speed.map(|s| s.performance_score),
        accessibility_score: speed.map(|s| s.accessibility_score),
        best_practices_score: speed.map(|s| s.best_practices_score),
        seo_score: speed.map(|s| s.seo_score),
        core_web_vitals: speed.map(|s| web_vitals(s, thresholds)).unwrap_or_default(),
        groups: group_checks(checks),
        opportunities: speed.map(|s| s.opportunities.clone()).unwrap_or_default(),
        diagnostics: speed.map(|s| s.diagnostics.clone()).unwrap_or_default(),
        passed_count: speed.map_or(0, |s| s.passed_audits),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secure_signals() -> ScrapedSignals {
        let mut signals = ScrapedSignals {
            url: "https://shop.example/".to_string(),
            security: Some(SecuritySignals {
                is_https: true,
                has_privacy_policy_link: true,
                jquery_version: Some("3.7.1".to_string()),
                third_party_scripts: 2,
                ..Default::default()
            }),
            ..Default::default()
        };
        signals.ux.has_cookie_consent = true;
        signals
    }

    fn full_headers() -> SecurityHeadersData {
        SecurityHeadersData {
            strict_transport_security: Some("max-age=31536000".to_string()),
            content_security_policy: Some("default-src 'self'".to_string()),
            x_frame_options: Some("SAMEORIGIN".to_string()),
            x_content_type_options: Some("nosniff".to_string()),
            referrer_policy: Some("strict-origin-when-cross-origin".to_string()),
            robots_txt: Some("User-agent: *\nSitemap: /sitemap.xml".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn nothing_to_audit_is_none() {
        let signals = ScrapedSignals::default();
        assert!(audit(&signals, None, None, &Thresholds::default()).is_none());
    }

    #[test]
    fn hardened_site_scores_full_and_low_risk() {
        let signals = secure_signals();
        let headers = full_headers();
        let health = audit(&signals, None, Some(&headers), &Thresholds::default()).unwrap();
        assert_eq!(health.score, 100);
        assert_eq!(health.risk, RiskRating::Low);
        assert!(health.core_web_vitals.is_empty());
        assert_eq!(health.groups[0].category, TRANSPORT);
    }

    #[test]
    fn three_high_fails_are_critical() {
        let signals = ScrapedSignals {
            url: "http://shop.example/login".to_string(),
            security: Some(SecuritySignals {
                is_https: false,
                has_password_field: true,
                jquery_version: Some("1.12.4".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let health = audit(&signals, None, None, &Thresholds::default()).unwrap();
        assert_eq!(health.risk, RiskRating::Critical);
        assert!(health.score < 50);
    }

    #[test]
    fn medium_fails_raise_medium_risk() {
        let signals = secure_signals();
        let headers = SecurityHeadersData {
            robots_txt: Some("User-agent: *".to_string()),
            ..Default::default()
        };
        // HSTS, CSP and X-Frame-Options missing: three medium-risk fails
        let checks = run_checks(&AuditContext {
            signals: &signals,
            security: signals.security.as_ref(),
            headers: Some(&headers),
        });
        assert_eq!(risk_rating(&checks), RiskRating::Medium);
    }

    #[test]
    fn warnings_do_not_raise_the_tier() {
        let checks = vec![
            issue(CheckStatus::Warning, SCRIPTS, "a", "", Risk::High, "", ""),
            issue(CheckStatus::Warning, SCRIPTS, "b", "", Risk::High, "", ""),
            issue(CheckStatus::Warning, SCRIPTS, "c", "", Risk::High, "", ""),
        ];
        assert_eq!(risk_rating(&checks), RiskRating::Low);
        assert_eq!(security_score(&checks), 0);
    }

    #[test]
    fn info_checks_are_not_scored() {
        let checks = vec![
            pass(HEADERS, "a", "ok"),
            info(HEADERS, "b", "n/a"),
            issue(CheckStatus::Fail, HEADERS, "c", "", Risk::Low, "", ""),
        ];
        assert_eq!(security_score(&checks), 50);
        assert_eq!(security_score(&[info(HEADERS, "only", "n/a")]), 100);
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let groups = group_checks(vec![
            pass(PRIVACY, "a", ""),
            pass(TRANSPORT, "b", ""),
            pass(PRIVACY, "c", ""),
        ]);
        let names: Vec<_> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(names, [PRIVACY, TRANSPORT]);
        assert_eq!(groups[0].checks.len(), 2);
    }

    #[test]
    fn jquery_staleness() {
        assert_eq!(major_minor("v3.4.1"), Some((3, 4)));
        assert_eq!(major_minor("2"), Some((2, 0)));
        assert_eq!(major_minor("latest"), None);

        let mut signals = secure_signals();
        if let Some(security) = signals.security.as_mut() {
            security.jquery_version = Some("3.4.1".to_string());
        }
        let ctx = AuditContext {
            signals: &signals,
            security: signals.security.as_ref(),
            headers: None,
        };
        let check = jquery_version(&ctx).unwrap();
        assert_eq!(check.status, CheckStatus::Warning);
    }

    #[test]
    fn web_vitals_from_speed_data() {
        let speed = SpeedData {
            lcp_ms: 3_100.0,
            fcp_ms: 900.0,
            tbt_ms: 700.0,
            cls: 0.02,
            si_ms: 2_000.0,
            ttfb_ms: 300.0,
            performance_score: 61,
            passed_audits: 30,
            ..Default::default()
        };
        let health =
            audit(&ScrapedSignals::default(), Some(&speed), None, &Thresholds::default()).unwrap();
        let ratings: Vec<_> = health.core_web_vitals.iter().map(|v| v.rating).collect();
        assert_eq!(
            ratings,
            [
                VitalRating::NeedsImprovement,
                VitalRating::Good,
                VitalRating::Poor,
                VitalRating::Good,
                VitalRating::Good,
                VitalRating::Good,
            ]
        );
        assert_eq!(health.performance_score, Some(61));
        assert_eq!(health.passed_count, 30);
        // no URL, no security signals, no headers: nothing rated
        assert_eq!(health.score, 100);
        assert!(health.groups.is_empty());
    }
}
