//! Classify a page's commercial intent from DOM affordances and URL vocabulary.
//!
//! Tiers are evaluated in a fixed order and the first match wins. Within a
//! tier, DOM signals (add-to-cart, product grid density) are checked before
//! URL patterns, since routing schemes are arbitrary.

use crate::signals::ScrapedSignals;
use crate::types::PageType;
use crate::url_utils::{path_segments, url_path};

const CHECKOUT_SEGMENTS: &[&str] = &[
    "checkout",
    "checkouts",
    "kasse",
    "betaling",
    "payment",
    "bestilling",
    "onepage",
];
const CART_SEGMENTS: &[&str] = &[
    "cart",
    "basket",
    "kurv",
    "indkobskurv",
    "indkøbskurv",
];
const PRODUCT_SEGMENTS: &[&str] =
    &["product", "products", "produkt", "produkter", "p", "item", "dp"];
const COLLECTION_SEGMENTS: &[&str] = &[
    "collections",
    "collection",
    "category",
    "categories",
    "kategori",
    "kategorier",
    "catalog",
    "katalog",
    "shop",
    "c",
    "search",
    "soeg",
    "søg",
];

/// Product grids at or above this size mean a listing, not a single product
const COLLECTION_MIN_PRODUCTS: usize = 4;
const FILTERED_COLLECTION_MIN_PRODUCTS: usize = 2;

/// Classify a page. Total: every input yields a page type.
pub fn classify(signals: &ScrapedSignals) -> PageType {
    let page_type = classify_inner(signals);
    tracing::debug!(url = %signals.url, page_type = %page_type, "classified page");
    page_type
}

fn classify_inner(signals: &ScrapedSignals) -> PageType {
    let structure = &signals.structure;
    let page = &signals.page_signals;
    let segments = path_segments(&signals.url);

    let has_checkout_signal = structure.has_checkout_form || page.checkout_indicator_count > 0;
    if has_checkout_signal && matches_any(&segments, CHECKOUT_SEGMENTS) {
        return PageType::Checkout;
    }

    if matches_any(&segments, CART_SEGMENTS) {
        return PageType::Cart;
    }

    let has_add_to_cart = structure.has_add_to_cart || page.add_to_cart_count > 0;
    let has_product_marker = structure.has_product_gallery || page.has_product_schema;
    if has_add_to_cart && has_product_marker && page.product_count < COLLECTION_MIN_PRODUCTS {
        return PageType::Product;
    }
    if is_product_path(&segments) {
        return PageType::Product;
    }

    if page.product_count >= COLLECTION_MIN_PRODUCTS
        || (structure.has_filters && page.product_count >= FILTERED_COLLECTION_MIN_PRODUCTS)
        || matches_any(&segments, COLLECTION_SEGMENTS)
    {
        return PageType::Collection;
    }

    if url_path(&signals.url) == "/" {
        return PageType::Home;
    }

    if structure.has_hero && !signals.ctas.is_empty() {
        return PageType::Landing;
    }

    PageType::Home
}

fn matches_any(segments: &[String], vocabulary: &[&str]) -> bool {
    segments.iter().any(|segment| {
        vocabulary.iter().any(|word| {
            segment == word
                || segment
                    .strip_prefix(word)
                    .is_some_and(|rest| rest.starts_with(['-', '_', '.']))
        })
    })
}

/// A product segment followed by a handle, e.g. `/products/lamp`
fn is_product_path(segments: &[String]) -> bool {
    segments
        .windows(2)
        .any(|pair| PRODUCT_SEGMENTS.contains(&pair[0].as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::Cta;

    fn at(url: &str) -> ScrapedSignals {
        ScrapedSignals {
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn checkout_wins_over_product_markers() {
        let mut signals = at("https://shop.example/checkout");
        signals.page_signals.checkout_indicator_count = 2;
        signals.structure.has_product_gallery = true;
        signals.structure.has_add_to_cart = true;
        assert_eq!(classify(&signals), PageType::Checkout);
    }

    #[test]
    fn checkout_path_without_form_is_not_checkout() {
        let signals = at("https://shop.example/checkout");
        assert_eq!(classify(&signals), PageType::Home);
    }

    #[test]
    fn cart_from_url() {
        assert_eq!(classify(&at("https://shop.example/cart")), PageType::Cart);
        assert_eq!(classify(&at("https://shop.example/da/kurv")), PageType::Cart);
    }

    #[test]
    fn product_from_dom_affordances() {
        let mut signals = at("https://shop.example/lamp-xr200");
        signals.page_signals.add_to_cart_count = 1;
        signals.page_signals.has_product_schema = true;
        assert_eq!(classify(&signals), PageType::Product);
    }

    #[test]
    fn product_grid_overrides_add_to_cart() {
        let mut signals = at("https://shop.example/lamps");
        signals.structure.has_add_to_cart = true;
        signals.structure.has_product_gallery = true;
        signals.page_signals.product_count = 12;
        assert_eq!(classify(&signals), PageType::Collection);
    }

    #[test]
    fn product_from_url_handle() {
        assert_eq!(
            classify(&at("https://shop.example/collections/lamps/products/xr200")),
            PageType::Product
        );
        assert_eq!(classify(&at("https://shop.example/products")), PageType::Home);
    }

    #[test]
    fn collection_from_filters_or_url() {
        let mut signals = at("https://shop.example/lighting");
        signals.structure.has_filters = true;
        signals.page_signals.product_count = 2;
        assert_eq!(classify(&signals), PageType::Collection);

        assert_eq!(
            classify(&at("https://shop.example/collections/all")),
            PageType::Collection
        );
    }

    #[test]
    fn root_is_home_even_with_hero() {
        let mut signals = at("https://shop.example/");
        signals.structure.has_hero = true;
        signals.ctas.push(Cta::default());
        assert_eq!(classify(&signals), PageType::Home);
    }

    #[test]
    fn hero_with_cta_off_root_is_landing() {
        let mut signals = at("https://saas.example/spring-campaign");
        signals.structure.has_hero = true;
        signals.ctas.push(Cta::default());
        assert_eq!(classify(&signals), PageType::Landing);
    }

    #[test]
    fn bag_collection_is_not_a_cart() {
        let mut signals = at("https://shop.example/collections/bag");
        signals.page_signals.product_count = 24;
        assert_eq!(classify(&signals), PageType::Collection);
    }

    #[test]
    fn unknown_defaults_to_home() {
        assert_eq!(classify(&at("https://example.com/about-us")), PageType::Home);
        assert_eq!(classify(&ScrapedSignals::default()), PageType::Home);
    }
}
