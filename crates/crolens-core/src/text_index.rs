//! Tagged text fragments shared by the analyzers.
//!
//! Every language pattern is compiled once and evaluated once per analysis
//! against the flattened page text. Analyzers then query the index instead of
//! re-scanning raw text.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};

use crate::signals::{MAX_FRAGMENTS, ScrapedSignals, TrustKind};

const MAX_SENTENCES: usize = 400;
const MIN_SENTENCE_CHARS: usize = 3;
const MAX_SENTENCE_CHARS: usize = 300;

/// Sentence ends, line breaks and list separators. Punctuation only breaks
/// when followed by whitespace (`4.8`, `shop.example` stay whole).
static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?](\s+|$)|[\n•|]").expect("invalid sentence regex"));

/// Language classes recognised in page copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextTag {
    Benefit,
    Urgency,
    Guarantee,
    Privacy,
    Contact,
    ActionVerb,
    VagueCta,
    TrustPhrase,
    SocialProof,
    Authority,
    Usp,
    Feature,
    AddToCart,
    Price,
}

static PATTERNS: Lazy<Vec<(TextTag, Regex)>> = Lazy::new(|| {
    [
        (
            TextTag::Benefit,
            r"(?i)\b(save|spar|free|gratis|get|få|discover|oplev|boost|increase|øg|improve|forbedr|easy|easier|nem|nemt|simple|enkel|fast|hurtig|hurtigt|instant|without|uden|better|bedre|best|bedste|your|din|dit|dine)\b|\d+\s?%",
        ),
        (
            TextTag::Urgency,
            r"(?i)\b(only \d+ left|kun \d+ tilbage|limited|begrænset|today only|kun i dag|ends (soon|today|tonight)|slutter (i dag|snart)|hurry|skynd dig|last chance|sidste chance|while stocks last|så længe lager haves|few left|få tilbage|order before|bestil inden)\b",
        ),
        (
            TextTag::Guarantee,
            r"(?i)\b(guarantee[ds]?|garanti|money[- ]back|pengene tilbage|risk[- ]free|risikofri|full refund|fuld refusion|free returns?|fri retur|gratis retur|returret|fortrydelsesret|no questions asked)\b",
        ),
        (
            TextTag::Privacy,
            r"(?i)\b(privacy|privatliv|privatlivspolitik|persondata|gdpr|cookiepolitik|cookie[- ]policy|we never share|deler aldrig|data protection|databeskyttelse)\b",
        ),
        (
            TextTag::Contact,
            r"(?i)(\+?\d[\d ]{6,}\d|[\w.+-]+@[\w-]+\.[a-z]{2,}|\b(contact us|kontakt os|customer service|kundeservice|call us|ring til os)\b)",
        ),
        (
            TextTag::ActionVerb,
            r"(?i)^\s*(buy|køb|shop|add|læg|get|få|start|try|prøv|order|bestil|book|sign up|tilmeld|join|subscribe|download|hent|claim|discover|oplev|explore|udforsk|see|se|view|contact|kontakt|request|send|checkout|go to|gå til|create|opret|save|spar|reserve|reservér)\b",
        ),
        (
            TextTag::VagueCta,
            r"(?i)^\s*(click here|klik her|submit|send ind|here|her|read more|læs mere|learn more|more|mere|ok|go|continue|next|næste)\s*[.!»›>]*\s*$",
        ),
        (
            TextTag::TrustPhrase,
            r"(?i)\b(secure (payment|checkout)|sikker betaling|ssl|encrypted|krypteret|e-mærket|emaerket|trusted shops?|verified|verificeret|safe checkout|pci)\b",
        ),
        (
            TextTag::SocialProof,
            r"(?i)\b(trustpilot|reviews?|anmeldelser?|testimonials?|ratings?|stars|stjerner|kunderne siger|customers say|happy customers|tilfredse kunder|\d[\d.,]*\+?\s?(customers|kunder|users|brugere))\b",
        ),
        (
            TextTag::Authority,
            r"(?i)\b(as seen (in|on)|kendt fra|featured in|awards?|prisvindende|winner|vinder af|certified|certificeret|official partner|officiel forhandler|endorsed|anbefalet af|recommended by|trusted by)\b",
        ),
        (
            TextTag::Usp,
            r"(?i)\b(free shipping|fri fragt|gratis fragt|free delivery|gratis levering|next[- ]day|levering i morgen|fast delivery|hurtig levering|free returns|fri retur|price match|prismatch|lowest price|laveste pris|handmade|håndlavet|danish design|dansk design|made in|produceret i|sustainable|bæredygtig|organic|økologisk)\b",
        ),
        (
            TextTag::Feature,
            r"(?i)\b(features?|includes?|inkluderer|made (of|from)|lavet af|specifications?|specifikationer|dimensions?|\d+\s?(mm|cm|kg|gb|tb|mah|watt|ghz|mp))\b",
        ),
        (
            TextTag::AddToCart,
            r"(?i)\b(add to (cart|bag|basket)|læg i kurv(en)?|tilføj til kurv(en)?|buy now|køb nu)\b",
        ),
        (
            TextTag::Price,
            r"(?i)((kr\.?|dkk|eur|usd|€|\$|£)\s?\d[\d.,]*|\d[\d.,]*\s?(kr\b\.?|dkk\b|eur\b|€|,-))",
        ),
    ]
    .into_iter()
    .map(|(tag, pattern)| (tag, Regex::new(pattern).expect("invalid text pattern")))
    .collect()
});

impl TextTag {
    fn regex(self) -> &'static Regex {
        PATTERNS
            .iter()
            .find(|(tag, _)| *tag == self)
            .map(|(_, re)| re)
            .expect("every tag has a pattern")
    }

    /// Test a single string (headline, CTA label) against this tag
    pub fn matches(self, text: &str) -> bool {
        self.regex().is_match(text)
    }
}

/// Fragments of page text grouped by the tags they matched
#[derive(Debug, Clone, Default)]
pub struct TextIndex {
    fragments: BTreeMap<TextTag, Vec<String>>,
}

impl TextIndex {
    pub fn build(signals: &ScrapedSignals) -> Self {
        let mut index = Self::default();

        // Fragments the producer already classified
        let copy = &signals.copy_analysis;
        for (tag, list) in [
            (TextTag::Usp, &copy.usps),
            (TextTag::Benefit, &copy.benefit_statements),
            (TextTag::Feature, &copy.feature_statements),
            (TextTag::Urgency, &copy.urgency_elements),
            (TextTag::Guarantee, &copy.guarantee_statements),
        ] {
            for fragment in list {
                index.push(tag, fragment);
            }
        }
        for signal in &signals.trust_signals {
            let tag = match signal.kind {
                TrustKind::SocialProof => TextTag::SocialProof,
                TrustKind::Authority => TextTag::Authority,
                TrustKind::Badge | TrustKind::Text => TextTag::TrustPhrase,
            };
            index.push(tag, &signal.description);
        }

        for sentence in sentences(signals) {
            for (tag, re) in PATTERNS.iter() {
                // Label-shaped patterns only make sense on single CTA strings
                if matches!(tag, TextTag::ActionVerb | TextTag::VagueCta) {
                    continue;
                }
                if re.is_match(&sentence) {
                    index.push(*tag, &sentence);
                }
            }
        }

        index
    }

    fn push(&mut self, tag: TextTag, fragment: &str) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return;
        }
        let entry = self.fragments.entry(tag).or_default();
        if entry.len() < MAX_FRAGMENTS && !entry.iter().any(|f| f == fragment) {
            entry.push(fragment.to_string());
        }
    }

    pub fn has(&self, tag: TextTag) -> bool {
        self.fragments.get(&tag).is_some_and(|f| !f.is_empty())
    }

    pub fn fragments(&self, tag: TextTag) -> &[String] {
        self.fragments.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, tag: TextTag) -> usize {
        self.fragments(tag).len()
    }
}

/// Split the page's text surfaces into bounded, de-duplicated sentences
pub fn sentences(signals: &ScrapedSignals) -> Vec<String> {
    let surfaces = std::iter::once(signals.title.as_str())
        .chain(std::iter::once(signals.meta_description.as_str()))
        .chain(signals.headings.iter().map(|h| h.text.as_str()))
        .chain(std::iter::once(signals.text_content.as_str()));

    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for surface in surfaces {
        for raw in SENTENCE_BREAK.split(surface) {
            let sentence = raw.split_whitespace().collect::<Vec<_>>().join(" ");
            let len = sentence.chars().count();
            if !(MIN_SENTENCE_CHARS..=MAX_SENTENCE_CHARS).contains(&len) {
                continue;
            }
            if seen.insert(sentence.to_lowercase()) {
                out.push(sentence);
                if out.len() >= MAX_SENTENCES {
                    return out;
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::{Heading, TrustSignal};

    #[test]
    fn benefit_language_matches_danish_discount() {
        assert!(TextTag::Benefit.matches("Spar 30%"));
        assert!(TextTag::Benefit.matches("Get more done in less time"));
        assert!(!TextTag::Benefit.matches("Lamp model XR-200"));
    }

    #[test]
    fn cta_labels_are_classified() {
        assert!(TextTag::ActionVerb.matches("Add to cart"));
        assert!(TextTag::ActionVerb.matches("Køb nu"));
        assert!(TextTag::VagueCta.matches("Click here"));
        assert!(TextTag::VagueCta.matches("Læs mere »"));
        assert!(!TextTag::VagueCta.matches("Read more about our shipping"));
    }

    #[test]
    fn price_pattern_accepts_common_formats() {
        assert!(TextTag::Price.matches("Nu kun 499 kr."));
        assert!(TextTag::Price.matches("€ 19,95"));
        assert!(TextTag::Price.matches("$12.00"));
        assert!(TextTag::Price.matches("299,-"));
        assert!(!TextTag::Price.matches("Call 4 friends"));
    }

    #[test]
    fn index_collects_sentences_and_trust_signals() {
        let signals = ScrapedSignals {
            title: "Lamps | Free shipping on all orders".to_string(),
            headings: vec![Heading {
                tag: "h2".to_string(),
                text: "Only 3 left in stock".to_string(),
                is_above_fold: false,
            }],
            text_content: "30 days free returns. Read our privacy policy.\nCall us on +45 12 34 56 78"
                .to_string(),
            trust_signals: vec![TrustSignal {
                kind: TrustKind::SocialProof,
                description: "4.8 on Trustpilot".to_string(),
            }],
            ..Default::default()
        };

        let index = TextIndex::build(&signals);
        assert!(index.has(TextTag::Usp));
        assert!(index.has(TextTag::Urgency));
        assert!(index.has(TextTag::Guarantee));
        assert!(index.has(TextTag::Privacy));
        assert!(index.has(TextTag::Contact));
        assert_eq!(index.fragments(TextTag::SocialProof)[0], "4.8 on Trustpilot");
        assert!(!index.has(TextTag::Authority));
    }

    #[test]
    fn fragments_are_bounded_and_unique() {
        let text = (0..50)
            .map(|i| format!("Save {i} percent today"))
            .collect::<Vec<_>>()
            .join(". ");
        let signals = ScrapedSignals {
            text_content: format!("{text}. Save 1 percent today."),
            ..Default::default()
        };

        let index = TextIndex::build(&signals);
        assert_eq!(index.count(TextTag::Benefit), MAX_FRAGMENTS);
    }
}
