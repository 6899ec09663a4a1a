//! Live data collection: the page itself, PageSpeed Insights and security
//! headers.
//!
//! Every call here is an optional enrichment. [`gather_external`] converts
//! failures to `None` so a slow or failing service never blocks the audit.

use reqwest::header::HeaderMap;
use serde_json::Value as JsonValue;
use std::time::{Duration, Instant};
use url::Url;

use crate::error::{CroError, Result};
use crate::signals::{Audit, SecurityHeadersData, SpeedData, Strategy};
use crate::url_utils::normalize_origin;

const PAGESPEED_ENDPOINT: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";
const PAGE_TIMEOUT_SECS: u64 = 20;
/// Lighthouse runs take a while, especially on mobile
const PAGESPEED_TIMEOUT_SECS: u64 = 90;
const MAX_AUDITS: usize = 10;
const MAX_ROBOTS_CHARS: usize = 10_000;

/// A fetched HTML page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: String,
    pub html: String,
    /// Time until the body was fully read
    pub load_time_ms: f64,
    /// Audited headers of the page response; `robots_txt` is left empty
    pub headers: SecurityHeadersData,
}

/// Options for [`gather_external`]
#[derive(Debug, Clone, Default)]
pub struct ExternalOptions {
    pub pagespeed_key: Option<String>,
    pub skip_pagespeed: bool,
    pub skip_headers: bool,
    /// Headers already taken from the page response. When set, only
    /// robots.txt is fetched and the page is not requested again.
    pub page_headers: Option<SecurityHeadersData>,
}

/// Optional external records for one page; each is `None` when its call failed
#[derive(Debug, Clone, Default)]
pub struct ExternalData {
    pub desktop_speed: Option<SpeedData>,
    pub mobile_speed: Option<SpeedData>,
    pub security_headers: Option<SecurityHeadersData>,
}

fn client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(format!(
            "Mozilla/5.0 (compatible; crolens/{})",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .map_err(|e| CroError::http("client", e.to_string()))
}

/// Fetch a page's HTML, timing the full download
pub async fn fetch_page(url: &str) -> Result<FetchedPage> {
    let client = client(PAGE_TIMEOUT_SECS)?;
    let started = Instant::now();

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| CroError::http("page", e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CroError::http("page", format!("{url} returned {status}")));
    }

    let final_url = response.url().to_string();
    let headers = security_headers_from(response.headers());
    let html = response
        .text()
        .await
        .map_err(|e| CroError::http("page", format!("failed to read body: {e}")))?;

    Ok(FetchedPage {
        url: final_url,
        html,
        load_time_ms: started.elapsed().as_secs_f64() * 1_000.0,
        headers,
    })
}

/// Run PageSpeed Insights for one strategy
pub async fn fetch_pagespeed(
    url: &str,
    strategy: Strategy,
    api_key: Option<&str>,
) -> Result<SpeedData> {
    let mut endpoint =
        Url::parse(PAGESPEED_ENDPOINT).map_err(|e| CroError::InvalidUrl(e.to_string()))?;
    {
        let mut query = endpoint.query_pairs_mut();
        query.append_pair("url", url);
        query.append_pair("strategy", strategy.as_str());
        for category in ["performance", "accessibility", "best-practices", "seo"] {
            query.append_pair("category", category);
        }
        if let Some(key) = api_key {
            query.append_pair("key", key);
        }
    }

    let response = client(PAGESPEED_TIMEOUT_SECS)?
        .get(endpoint)
        .send()
        .await
        .map_err(|e| CroError::http("pagespeed", e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CroError::http("pagespeed", format!("API returned {status}")));
    }

    let body: JsonValue = response
        .json()
        .await
        .map_err(|e| CroError::http("pagespeed", format!("unreadable response: {e}")))?;

    parse_pagespeed(&body, strategy)
}

/// Security-relevant response headers of `url`, plus its origin's robots.txt
pub async fn fetch_security_headers(url: &str) -> Result<SecurityHeadersData> {
    let client = client(PAGE_TIMEOUT_SECS)?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| CroError::http("headers", e.to_string()))?;
    let mut headers = security_headers_from(response.headers());
    headers.robots_txt = fetch_robots_txt(&client, url).await;

    Ok(headers)
}

/// The origin's robots.txt, truncated; `None` when missing or unreachable
async fn fetch_robots_txt(client: &reqwest::Client, url: &str) -> Option<String> {
    let robots_url = format!("{}/robots.txt", normalize_origin(url));
    match client.get(&robots_url).send().await {
        Ok(resp) if resp.status().is_success() => resp
            .text()
            .await
            .ok()
            .map(|text| text.chars().take(MAX_ROBOTS_CHARS).collect()),
        Ok(resp) => {
            tracing::debug!(url = %robots_url, status = %resp.status(), "no robots.txt");
            None
        }
        Err(e) => {
            tracing::debug!(url = %robots_url, error = %e, "robots.txt fetch failed");
            None
        }
    }
}

/// Complete headers taken from the page response with the origin's robots.txt
async fn complete_page_headers(
    url: &str,
    page_headers: &SecurityHeadersData,
) -> Result<SecurityHeadersData> {
    let client = client(PAGE_TIMEOUT_SECS)?;
    let mut headers = page_headers.clone();
    headers.robots_txt = fetch_robots_txt(&client, url).await;
    Ok(headers)
}

/// Collect PageSpeed (desktop and mobile) and security headers concurrently.
///
/// Each source fails independently; failures are logged and become `None`.
pub async fn gather_external(url: &str, options: &ExternalOptions) -> ExternalData {
    let key = options.pagespeed_key.as_deref();

    let desktop = async {
        if options.skip_pagespeed {
            return None;
        }
        degrade("pagespeed desktop", fetch_pagespeed(url, Strategy::Desktop, key).await)
    };
    let mobile = async {
        if options.skip_pagespeed {
            return None;
        }
        degrade("pagespeed mobile", fetch_pagespeed(url, Strategy::Mobile, key).await)
    };
    let headers = async {
        if options.skip_headers {
            return None;
        }
        let fetched = match options.page_headers.as_ref() {
            Some(page_headers) => complete_page_headers(url, page_headers).await,
            None => fetch_security_headers(url).await,
        };
        degrade("security headers", fetched)
    };

    let (desktop_speed, mobile_speed, security_headers) = tokio::join!(desktop, mobile, headers);

    ExternalData {
        desktop_speed,
        mobile_speed,
        security_headers,
    }
}

fn degrade<T>(source: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(source, error = %e, "external data unavailable, continuing without it");
            None
        }
    }
}

/// Pick the audited headers out of a response header map
pub fn security_headers_from(headers: &HeaderMap) -> SecurityHeadersData {
    let get = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    SecurityHeadersData {
        strict_transport_security: get("strict-transport-security"),
        content_security_policy: get("content-security-policy"),
        x_frame_options: get("x-frame-options"),
        x_content_type_options: get("x-content-type-options"),
        referrer_policy: get("referrer-policy"),
        permissions_policy: get("permissions-policy"),
        server: get("server"),
        x_powered_by: get("x-powered-by"),
        robots_txt: None,
    }
}

/// Convert a PageSpeed Insights v5 response into [`SpeedData`]
pub fn parse_pagespeed(body: &JsonValue, strategy: Strategy) -> Result<SpeedData> {
    let lighthouse = body
        .get("lighthouseResult")
        .ok_or_else(|| CroError::http("pagespeed", "response has no lighthouseResult"))?;

    let category_score = |name: &str| {
        lighthouse
            .pointer(&format!("/categories/{name}/score"))
            .and_then(JsonValue::as_f64)
            .map(|score| (score * 100.0).round().clamp(0.0, 100.0) as u8)
            .unwrap_or(0)
    };

    let empty = serde_json::Map::new();
    let audits = lighthouse
        .get("audits")
        .and_then(JsonValue::as_object)
        .unwrap_or(&empty);

    let metric = |id: &str| {
        audits
            .get(id)
            .and_then(|a| a.get("numericValue"))
            .and_then(JsonValue::as_f64)
            .unwrap_or(0.0)
    };

    let mut opportunities = Vec::new();
    let mut diagnostics = Vec::new();
    let mut passed_audits = 0;

    for audit in audits.values() {
        let Some(score) = audit.get("score").and_then(JsonValue::as_f64) else {
            // informative and not-applicable audits carry no score
            continue;
        };
        if score >= 1.0 {
            passed_audits += 1;
            continue;
        }

        let is_opportunity = audit.pointer("/details/type").and_then(JsonValue::as_str)
            == Some("opportunity");
        if is_opportunity && score < 0.9 {
            opportunities.push(to_audit(audit));
        } else if !is_opportunity && score < 0.5 {
            diagnostics.push(to_audit(audit));
        }
    }
    opportunities.truncate(MAX_AUDITS);
    diagnostics.truncate(MAX_AUDITS);

    Ok(SpeedData {
        strategy,
        performance_score: category_score("performance"),
        accessibility_score: category_score("accessibility"),
        best_practices_score: category_score("best-practices"),
        seo_score: category_score("seo"),
        lcp_ms: metric("largest-contentful-paint"),
        fcp_ms: metric("first-contentful-paint"),
        tbt_ms: metric("total-blocking-time"),
        cls: metric("cumulative-layout-shift"),
        si_ms: metric("speed-index"),
        ttfb_ms: metric("server-response-time"),
        opportunities,
        diagnostics,
        passed_audits,
    })
}

fn to_audit(audit: &JsonValue) -> Audit {
    let text = |key: &str| {
        audit
            .get(key)
            .and_then(JsonValue::as_str)
            .unwrap_or_default()
            .to_string()
    };
    Audit {
        title: text("title"),
        display_value: audit
            .get("displayValue")
            .and_then(JsonValue::as_str)
            .map(str::to_string),
        description: text("description"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use serde_json::json;

    fn sample_response() -> JsonValue {
        json!({
            "lighthouseResult": {
                "categories": {
                    "performance": {"score": 0.87},
                    "accessibility": {"score": 0.9},
                    "best-practices": {"score": 1.0},
                    "seo": {"score": 0.75}
                },
                "audits": {
                    "largest-contentful-paint": {"score": 0.7, "numericValue": 2850.4},
                    "first-contentful-paint": {"score": 1, "numericValue": 900.0},
                    "total-blocking-time": {"score": 0.95, "numericValue": 120.0},
                    "cumulative-layout-shift": {"score": 1, "numericValue": 0.02},
                    "speed-index": {"score": 0.8, "numericValue": 3100.0},
                    "server-response-time": {"score": 1, "numericValue": 180.0},
                    "render-blocking-resources": {
                        "score": 0.4,
                        "title": "Eliminate render-blocking resources",
                        "displayValue": "Potential savings of 640 ms",
                        "description": "Resources are blocking the first paint.",
                        "details": {"type": "opportunity"}
                    },
                    "dom-size": {
                        "score": 0.2,
                        "title": "Avoid an excessive DOM size",
                        "description": "A large DOM increases memory usage.",
                        "details": {"type": "table"}
                    },
                    "screenshot-thumbnails": {"score": null}
                }
            }
        })
    }

    #[test]
    fn parses_scores_and_metrics() {
        let speed = parse_pagespeed(&sample_response(), Strategy::Mobile).unwrap();
        assert_eq!(speed.strategy, Strategy::Mobile);
        assert_eq!(speed.performance_score, 87);
        assert_eq!(speed.best_practices_score, 100);
        assert_eq!(speed.seo_score, 75);
        assert_eq!(speed.lcp_ms, 2850.4);
        assert_eq!(speed.cls, 0.02);
        assert_eq!(speed.ttfb_ms, 180.0);
    }

    #[test]
    fn splits_opportunities_and_diagnostics() {
        let speed = parse_pagespeed(&sample_response(), Strategy::Desktop).unwrap();
        assert_eq!(speed.opportunities.len(), 1);
        assert_eq!(
            speed.opportunities[0].display_value.as_deref(),
            Some("Potential savings of 640 ms")
        );
        assert_eq!(speed.diagnostics.len(), 1);
        assert_eq!(speed.diagnostics[0].title, "Avoid an excessive DOM size");
        assert_eq!(speed.passed_audits, 3);
    }

    #[test]
    fn response_without_lighthouse_is_an_error() {
        let err = parse_pagespeed(&json!({"error": {"code": 429}}), Strategy::Mobile).unwrap_err();
        assert!(matches!(err, CroError::Http { service: "pagespeed", .. }));
    }

    #[test]
    fn picks_security_headers() {
        let mut map = HeaderMap::new();
        map.insert("strict-transport-security", HeaderValue::from_static("max-age=31536000"));
        map.insert("x-powered-by", HeaderValue::from_static("PHP/7.4"));
        map.insert("x-frame-options", HeaderValue::from_static("  "));

        let headers = security_headers_from(&map);
        assert_eq!(headers.strict_transport_security.as_deref(), Some("max-age=31536000"));
        assert_eq!(headers.x_powered_by.as_deref(), Some("PHP/7.4"));
        assert!(headers.x_frame_options.is_none());
        assert!(headers.robots_txt.is_none());
    }

    #[tokio::test]
    async fn skipped_sources_stay_empty() {
        let options = ExternalOptions {
            skip_pagespeed: true,
            skip_headers: true,
            ..Default::default()
        };
        let data = gather_external("https://shop.example/", &options).await;
        assert!(data.desktop_speed.is_none());
        assert!(data.mobile_speed.is_none());
        assert!(data.security_headers.is_none());
    }

    #[tokio::test]
    async fn page_headers_are_reused_without_robots() {
        let options = ExternalOptions {
            skip_pagespeed: true,
            page_headers: Some(SecurityHeadersData {
                strict_transport_security: Some("max-age=31536000".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        // nothing listens on the discard port, so robots.txt cannot be read
        let data = gather_external("http://127.0.0.1:9/", &options).await;

        let headers = data.security_headers.expect("page headers kept");
        assert_eq!(headers.strict_transport_security.as_deref(), Some("max-age=31536000"));
        assert!(headers.robots_txt.is_none());
        assert!(data.mobile_speed.is_none());
    }
}
