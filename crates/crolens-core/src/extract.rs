//! Static signal extraction from raw HTML.
//!
//! A lower-fidelity producer of [`ScrapedSignals`] for when no headless
//! browser is available. Without layout information, "above the fold" means
//! "among the first `fold_element_count` elements of the body" and CTA size
//! is estimated from class names.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, BTreeSet};
use url::Url;

use crate::config::Thresholds;
use crate::signals::{
    CopyAnalysis, Cta, FormInfo, Heading, ImageInfo, LinkInfo, MAX_CTAS, MAX_FRAGMENTS,
    MAX_HEADINGS, MAX_IMAGES, MAX_LINKS, MAX_TEXT_CHARS, PageSignals, PerformanceTiming,
    ScrapedSignals, SecuritySignals, StructuralFlags, TrustKind, TrustSignal, UxSignals,
};
use crate::text_index::{TextIndex, TextTag};
use crate::url_utils::is_external;

const MAX_HEADING_CHARS: usize = 200;
const MAX_LABEL_CHARS: usize = 100;
const MAX_META_CHARS: usize = 300;

/// Estimated rendering of CTAs when no layout is available
const PROMINENT_CTA: (f64, f64) = (18.0, 9_000.0);
const PLAIN_CTA: (f64, f64) = (14.0, 2_400.0);

/// Interactive elements only; a styled wrapper is not a call to action
const CTA_SELECTOR: &str = concat!(
    r#"button, a.btn, a.button, a[class*="cta"], a[class*="btn"], [role="button"], "#,
    r#"input[type="submit"], input[type="button"]"#,
);
const HERO_SELECTOR: &str = r#"[class*="hero"], [class*="banner"], [class*="jumbotron"]"#;
const FAQ_SELECTOR: &str = r#"[class*="faq"], [class*="accordion"], [id*="faq"]"#;
const TESTIMONIAL_SELECTOR: &str =
    r#"[class*="testimonial"], [class*="review"], [class*="trustpilot"]"#;
const PRICING_SELECTOR: &str = r#"[class*="pricing"], [class*="price"], [class*="plan"]"#;
const VIDEO_SELECTOR: &str = r#"video, iframe[src*="youtube"], iframe[src*="vimeo"]"#;
const TRUST_BADGE_SELECTOR: &str =
    r#"[class*="trust"], [class*="badge"], [class*="secure"], [class*="guarantee"]"#;
const NEWSLETTER_SELECTOR: &str =
    r#"[class*="newsletter"], [class*="subscribe"], [class*="signup"]"#;
const GALLERY_SELECTOR: &str =
    r#"[class*="gallery"], [class*="product-image"], [class*="product__media"]"#;
const ADD_TO_CART_SELECTOR: &str = r#"form[action*="cart/add"], button[name="add"], [class*="add-to-cart"], [class*="addtocart"], [data-action*="add-to-cart"]"#;
const CHECKOUT_FORM_SELECTOR: &str =
    r#"form[action*="checkout"], [class*="checkout"] form, [id*="checkout"] form"#;
const CHECKOUT_INDICATOR_SELECTOR: &str = r#"input[autocomplete^="cc-"], input[name*="card"], [class*="payment-method"], [class*="checkout-step"], [class*="shipping-method"]"#;
const FILTER_SELECTOR: &str = r#"[class*="filter"], [class*="facet"]"#;
const BREADCRUMB_SELECTOR: &str = r#"[class*="breadcrumb"], [aria-label*="readcrumb"]"#;
const PROGRESS_SELECTOR: &str = r#"[class*="progress"], [class*="stepper"], [class*="checkout-steps"]"#;
const PRODUCT_CARD_SELECTOR: &str = r#"[class*="product-card"], [class*="product-item"], [class*="productcard"], [class*="product-tile"], [class*="grid-product"]"#;
const SEARCH_SELECTOR: &str =
    r#"input[type="search"], form[role="search"], input[name="q"], [class*="search"] input"#;
const COOKIE_SELECTOR: &str = r#"[class*="cookie"], [id*="cookie"], [class*="consent"], [id*="consent"], [id*="Cookiebot"]"#;
const CHAT_SELECTOR: &str = r#"[class*="chat"], [id*="chat"], [class*="intercom"], [id*="intercom"], [class*="zendesk"], [id*="zendesk"]"#;
const STICKY_SELECTOR: &str =
    r#"header[class*="sticky"], [class*="sticky-header"], [class*="fixed-top"]"#;
const POPUP_SELECTOR: &str = r#"[class*="popup"], [id*="popup"], [class*="exit-intent"]"#;
const CHECKOUT_BADGE_SELECTOR: &str = r#"[class*="secure-checkout"], [class*="payment-icons"], [class*="payment-logos"], img[alt*="secure"], img[alt*="SSL"]"#;

const ASSET_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".webp", ".svg", ".gif"];
const ADMIN_PATHS: &[&str] = &["/admin", "/wp-admin", "/wp-login", "/administrator", "/backend"];
const PRIVACY_PATHS: &[&str] =
    &["privacy", "privatliv", "persondata", "cookie-policy", "cookiepolitik"];

static RE_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("invalid email regex")
});
static RE_JQUERY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)jquery[.-]?v?(\d+\.\d+(?:\.\d+)?)").expect("invalid jquery regex")
});

/// Extract signals from an HTML document fetched from `page_url`.
///
/// Load timing is not known here; callers that fetched the page fill
/// [`ScrapedSignals::performance`] themselves.
pub fn extract(html: &str, page_url: &str, thresholds: &Thresholds) -> ScrapedSignals {
    let document = Html::parse_document(html);
    let base = Url::parse(page_url).ok();
    let fold = fold_elements(&document, thresholds.fold_element_count);

    let meta_tags = extract_meta_tags(&document);
    let meta_description = meta_tags
        .get("description")
        .or_else(|| meta_tags.get("og:description"))
        .cloned()
        .unwrap_or_default();

    let ctas = extract_ctas(&document, &fold);
    let links = extract_links(&document, base.as_ref());

    let mut signals = ScrapedSignals {
        url: page_url.to_string(),
        title: first_text(&document, "title"),
        meta_description,
        headings: extract_headings(&document, &fold),
        forms: extract_forms(&document),
        structure: extract_structure(&document),
        images: extract_images(&document, &fold),
        meta_tags,
        performance: PerformanceTiming {
            resource_count: count_elements(
                &document,
                r#"script[src], link[rel="stylesheet"], img[src], iframe[src], video[src]"#,
            ),
            ..Default::default()
        },
        security: Some(extract_security(&document, html, base.as_ref(), &links)),
        ux: extract_ux(&document),
        text_content: body_text(&document),
        ctas,
        links,
        ..Default::default()
    };

    signals.page_signals = extract_page_signals(&document, &signals);
    signals.structure.has_add_to_cart |= signals.page_signals.add_to_cart_count > 0;

    // Copy analysis and text trust signals come from the same patterns the
    // analyzers use
    let index = TextIndex::build(&signals);
    signals.copy_analysis = CopyAnalysis {
        usps: index.fragments(TextTag::Usp).to_vec(),
        benefit_statements: index.fragments(TextTag::Benefit).to_vec(),
        feature_statements: index.fragments(TextTag::Feature).to_vec(),
        urgency_elements: index.fragments(TextTag::Urgency).to_vec(),
        guarantee_statements: index.fragments(TextTag::Guarantee).to_vec(),
    };
    signals.trust_signals = extract_trust_signals(&document, &index);

    tracing::debug!(
        url = page_url,
        headings = signals.headings.len(),
        ctas = signals.ctas.len(),
        images = signals.images.len(),
        links = signals.links.len(),
        "extracted static signals"
    );
    signals
}

fn select_all<'a>(document: &'a Html, selector: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(selector) {
        Ok(selector) => document.select(&selector).collect(),
        Err(e) => {
            tracing::warn!(selector, error = ?e, "invalid selector");
            Vec::new()
        }
    }
}

fn select_exists(document: &Html, selector: &str) -> bool {
    !select_all(document, selector).is_empty()
}

fn count_elements(document: &Html, selector: &str) -> usize {
    select_all(document, selector).len()
}

fn clean_text(element: &ElementRef<'_>, max_chars: usize) -> String {
    let text = element.text().collect::<Vec<_>>().join(" ");
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(max_chars).collect()
}

fn first_text(document: &Html, selector: &str) -> String {
    select_all(document, selector)
        .first()
        .map(|e| clean_text(e, MAX_META_CHARS))
        .unwrap_or_default()
}

/// The first `limit` body elements in document order
fn fold_elements(document: &Html, limit: usize) -> Vec<ElementRef<'_>> {
    let mut elements = select_all(document, "body *");
    elements.truncate(limit);
    elements
}

fn extract_meta_tags(document: &Html) -> BTreeMap<String, String> {
    let mut tags = BTreeMap::new();
    for meta in select_all(document, "meta") {
        let element = meta.value();
        let name = element
            .attr("name")
            .or_else(|| element.attr("property"))
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        let content = element.attr("content").unwrap_or_default().trim();
        if !name.is_empty() && !content.is_empty() {
            tags.insert(name, content.chars().take(MAX_META_CHARS).collect());
        }
    }
    tags
}

fn extract_headings(document: &Html, fold: &[ElementRef<'_>]) -> Vec<Heading> {
    select_all(document, "h1, h2, h3, h4, h5, h6")
        .into_iter()
        .map(|h| Heading {
            tag: h.value().name().to_string(),
            text: clean_text(&h, MAX_HEADING_CHARS),
            is_above_fold: fold.contains(&h),
        })
        .filter(|h| !h.text.is_empty())
        .take(MAX_HEADINGS)
        .collect()
}

fn has_class_hint(element: &ElementRef<'_>, hints: &[&str]) -> bool {
    let attrs = element.value();
    let haystack = format!(
        "{} {}",
        attrs.attr("class").unwrap_or_default(),
        attrs.attr("id").unwrap_or_default()
    )
    .to_ascii_lowercase();
    hints.iter().any(|hint| haystack.contains(hint))
}

fn extract_ctas(document: &Html, fold: &[ElementRef<'_>]) -> Vec<Cta> {
    let matched = select_all(document, CTA_SELECTOR);
    matched
        .iter()
        // a button nested in a matched link is the same control
        .filter(|element| {
            !element
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|ancestor| matched.contains(&ancestor))
        })
        .filter_map(|element| {
            let attrs = element.value();
            let text = match attrs.name() {
                "input" => attrs.attr("value").unwrap_or_default().trim().to_string(),
                _ => clean_text(element, MAX_LABEL_CHARS),
            };
            if text.is_empty() {
                return None;
            }

            let prominent = has_class_hint(
                element,
                &["primary", "btn-lg", "large", "cta", "hero", "add-to-cart", "checkout"],
            );
            let (font_size_px, area_px2) = if prominent { PROMINENT_CTA } else { PLAIN_CTA };

            Some(Cta {
                text,
                tag: attrs.name().to_string(),
                href: attrs.attr("href").map(str::to_string),
                is_above_fold: fold.contains(element),
                font_size_px,
                area_px2,
            })
        })
        .take(MAX_CTAS)
        .collect()
}

fn extract_forms(document: &Html) -> Vec<FormInfo> {
    let Ok(field_selector) = Selector::parse("input, select, textarea") else {
        return Vec::new();
    };
    let Ok(label_selector) = Selector::parse("label, [aria-label], [aria-labelledby]") else {
        return Vec::new();
    };

    select_all(document, "form")
        .into_iter()
        .map(|form| {
            let fields: Vec<_> = form
                .select(&field_selector)
                .filter(|f| {
                    !matches!(
                        f.value().attr("type").unwrap_or_default(),
                        "hidden" | "submit" | "button" | "image" | "reset"
                    )
                })
                .collect();

            let field_types = fields
                .iter()
                .map(|f| {
                    let attrs = f.value();
                    match attrs.name() {
                        "input" => attrs.attr("type").unwrap_or("text").to_ascii_lowercase(),
                        other => other.to_string(),
                    }
                })
                .collect::<Vec<_>>();

            let has_validation = fields.iter().any(|f| {
                let attrs = f.value();
                ["required", "pattern", "minlength", "maxlength", "min", "max"]
                    .iter()
                    .any(|a| attrs.attr(a).is_some())
            }) || field_types
                .iter()
                .any(|t| matches!(t.as_str(), "email" | "tel" | "number" | "url"));

            FormInfo {
                field_count: fields.len(),
                has_labels: form.select(&label_selector).next().is_some(),
                has_validation,
                field_types,
            }
        })
        .collect()
}

fn extract_images(document: &Html, fold: &[ElementRef<'_>]) -> Vec<ImageInfo> {
    select_all(document, "img")
        .into_iter()
        .take(MAX_IMAGES)
        .map(|img| {
            let attrs = img.value();
            let alt = attrs.attr("alt").unwrap_or_default().trim().to_string();
            ImageInfo {
                src: attrs
                    .attr("src")
                    .or_else(|| attrs.attr("data-src"))
                    .unwrap_or_default()
                    .to_string(),
                has_alt: !alt.is_empty(),
                alt,
                is_above_fold: fold.contains(&img),
            }
        })
        .collect()
}

fn extract_links(document: &Html, base: Option<&Url>) -> Vec<LinkInfo> {
    select_all(document, "a[href]")
        .into_iter()
        .filter_map(|a| {
            let href = a.value().attr("href")?.trim();
            if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
                return None;
            }
            let resolved = base
                .and_then(|b| b.join(href).ok())
                .map(|u| u.to_string())
                .unwrap_or_else(|| href.to_string());
            Some(LinkInfo {
                text: clean_text(&a, MAX_LABEL_CHARS),
                is_external: base.is_some_and(|b| is_external(b, href)),
                href: resolved,
            })
        })
        .take(MAX_LINKS)
        .collect()
}

/// Links in the first navigation landmark
fn nav_item_count(document: &Html) -> usize {
    let Some(nav) = select_all(document, "nav, [role='navigation']").into_iter().next() else {
        return 0;
    };
    match Selector::parse("a[href]") {
        Ok(links) => nav.select(&links).count(),
        Err(_) => 0,
    }
}

fn extract_structure(document: &Html) -> StructuralFlags {
    StructuralFlags {
        has_nav: select_exists(document, "nav, [role='navigation']"),
        has_footer: select_exists(document, "footer, [role='contentinfo']"),
        has_hero: select_exists(document, HERO_SELECTOR),
        has_faq: select_exists(document, FAQ_SELECTOR),
        has_testimonials: select_exists(document, TESTIMONIAL_SELECTOR),
        has_pricing: select_exists(document, PRICING_SELECTOR),
        has_video: select_exists(document, VIDEO_SELECTOR),
        has_trust_badges: select_exists(document, TRUST_BADGE_SELECTOR),
        has_newsletter: select_exists(document, NEWSLETTER_SELECTOR),
        has_product_gallery: select_exists(document, GALLERY_SELECTOR),
        has_add_to_cart: select_exists(document, ADD_TO_CART_SELECTOR),
        has_checkout_form: select_exists(document, CHECKOUT_FORM_SELECTOR),
        has_filters: select_exists(document, FILTER_SELECTOR),
        has_breadcrumbs: select_exists(document, BREADCRUMB_SELECTOR),
        has_progress_indicator: select_exists(document, PROGRESS_SELECTOR),
        section_count: count_elements(document, "section"),
        nav_item_count: nav_item_count(document),
    }
}

/// JSON-LD blocks of the page, parsed; malformed blocks are skipped
fn json_ld_values(document: &Html) -> Vec<JsonValue> {
    select_all(document, "script")
        .into_iter()
        .filter(|script| {
            script
                .value()
                .attr("type")
                .is_some_and(|t| t.to_ascii_lowercase().contains("ld+json"))
        })
        .filter_map(|script| {
            let text = script.text().collect::<String>();
            serde_json::from_str(text.trim()).ok()
        })
        .collect()
}

fn declares_type(value: &JsonValue, wanted: &str) -> bool {
    match value {
        JsonValue::Object(map) => {
            let typed = match map.get("@type") {
                Some(JsonValue::String(t)) => t == wanted,
                Some(JsonValue::Array(types)) => types.iter().any(|t| t.as_str() == Some(wanted)),
                _ => false,
            };
            typed || map.values().any(|v| declares_type(v, wanted))
        }
        JsonValue::Array(items) => items.iter().any(|v| declares_type(v, wanted)),
        _ => false,
    }
}

fn extract_page_signals(document: &Html, signals: &ScrapedSignals) -> PageSignals {
    let has_product_schema = json_ld_values(document)
        .iter()
        .any(|v| declares_type(v, "Product"))
        || select_exists(document, r#"[itemtype*="schema.org/Product"]"#);

    let labelled_buttons = signals
        .ctas
        .iter()
        .filter(|c| TextTag::AddToCart.matches(&c.text))
        .count();

    PageSignals {
        has_product_schema,
        price_visible: TextTag::Price.matches(&signals.text_content)
            || select_exists(document, r#"[itemprop="price"], [class*="price"] [class*="amount"]"#),
        product_count: count_elements(document, PRODUCT_CARD_SELECTOR),
        checkout_indicator_count: count_elements(document, CHECKOUT_INDICATOR_SELECTOR),
        add_to_cart_count: count_elements(document, ADD_TO_CART_SELECTOR).max(labelled_buttons),
    }
}

fn extract_ux(document: &Html) -> UxSignals {
    UxSignals {
        has_search: select_exists(document, SEARCH_SELECTOR),
        has_cookie_consent: select_exists(document, COOKIE_SELECTOR),
        has_chat_widget: select_exists(document, CHAT_SELECTOR)
            || select_all(document, "script[src]").iter().any(|s| {
                let src = s.value().attr("src").unwrap_or_default().to_ascii_lowercase();
                ["intercom", "zendesk", "tawk.to", "crisp.chat", "livechat", "tidio"]
                    .iter()
                    .any(|provider| src.contains(provider))
            }),
        has_sticky_header: select_exists(document, STICKY_SELECTOR),
    }
}

fn extract_security(
    document: &Html,
    html: &str,
    base: Option<&Url>,
    links: &[LinkInfo],
) -> SecuritySignals {
    let is_https = base.is_some_and(|b| b.scheme() == "https");

    let has_mixed_content = is_https
        && select_exists(
            document,
            r#"img[src^="http:"], script[src^="http:"], link[href^="http:"], iframe[src^="http:"]"#,
        );

    let third_party: Vec<_> = select_all(document, "script[src]")
        .into_iter()
        .filter(|s| {
            let src = s.value().attr("src").unwrap_or_default();
            base.is_some_and(|b| is_external(b, src))
        })
        .collect();
    let without_sri = third_party
        .iter()
        .filter(|s| s.value().attr("integrity").is_none())
        .count();

    let jquery_version = select_all(document, "script[src]")
        .iter()
        .filter_map(|s| s.value().attr("src"))
        .find_map(|src| RE_JQUERY.captures(src))
        .map(|caps| caps[1].to_string());

    let exposed_emails: Vec<String> = RE_EMAIL
        .find_iter(html)
        .map(|m| m.as_str().to_ascii_lowercase())
        // asset names like logo@2x.png are not addresses
        .filter(|e| !ASSET_EXTENSIONS.iter().any(|ext| e.ends_with(ext)))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .take(MAX_FRAGMENTS)
        .collect();

    let hrefs = || links.iter().map(|l| l.href.to_ascii_lowercase());
    let has_admin_login_link = hrefs().any(|href| {
        let path = Url::parse(&href).map(|u| u.path().to_string()).unwrap_or(href);
        ADMIN_PATHS.iter().any(|p| path.starts_with(p))
    });
    let has_privacy_policy_link = hrefs().any(|href| PRIVACY_PATHS.iter().any(|p| href.contains(p)))
        || links.iter().any(|l| TextTag::Privacy.matches(&l.text));

    SecuritySignals {
        is_https,
        has_mixed_content,
        exposed_emails,
        third_party_scripts: third_party.len(),
        third_party_scripts_without_sri: without_sri,
        jquery_version,
        has_admin_login_link,
        has_aggressive_popup: select_exists(document, POPUP_SELECTOR),
        has_privacy_policy_link,
        has_checkout_security_badge: select_exists(document, CHECKOUT_BADGE_SELECTOR),
        has_password_field: select_exists(document, r#"input[type="password"]"#),
    }
}

/// Visible body text, one line per text node, without scripts and styles
fn body_text(document: &Html) -> String {
    let Some(body) = select_all(document, "body").into_iter().next() else {
        return String::new();
    };
    let skipped = select_all(document, "script, style, noscript, template");

    let mut lines: Vec<String> = Vec::new();
    for node in body.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let inside_skipped = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| skipped.contains(&ancestor));
        if inside_skipped {
            continue;
        }
        let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !line.is_empty() {
            lines.push(line);
        }
    }

    lines.join("\n").chars().take(MAX_TEXT_CHARS).collect()
}

fn extract_trust_signals(document: &Html, index: &TextIndex) -> Vec<TrustSignal> {
    let mut signals: Vec<TrustSignal> = Vec::new();

    for badge in select_all(document, TRUST_BADGE_SELECTOR)
        .into_iter()
        .take(MAX_FRAGMENTS)
    {
        let attrs = badge.value();
        let description = attrs
            .attr("alt")
            .or_else(|| attrs.attr("title"))
            .map(str::to_string)
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| clean_text(&badge, MAX_LABEL_CHARS));
        if !description.is_empty() {
            signals.push(TrustSignal {
                kind: TrustKind::Badge,
                description,
            });
        }
    }

    for (kind, tag) in [
        (TrustKind::Text, TextTag::TrustPhrase),
        (TrustKind::SocialProof, TextTag::SocialProof),
        (TrustKind::Authority, TextTag::Authority),
    ] {
        signals.extend(index.fragments(tag).iter().map(|fragment| TrustSignal {
            kind,
            description: fragment.clone(),
        }));
    }

    signals
}
