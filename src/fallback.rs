//! Rule-based fallback responder.
//!
//! Produces a deterministic reply from keyword matches alone when the model
//! call fails. No network, no randomness, no state: the same message always
//! yields byte-identical output, and every input (including the empty string)
//! yields a non-empty reply carrying the service cities and contact details.

use crate::knowledge::{EventCategory, KnowledgeBase, KNOWLEDGE_BASE};

/// Cities we are regularly asked about but do not serve. Matched as whole
/// words so "goal" never reads as Goa; derived forms such as "Mumbaikar"
/// therefore get no redirect.
const OUT_OF_AREA_CITIES: &[&str] = &[
    "mumbai",
    "bombay",
    "pune",
    "bangalore",
    "bengaluru",
    "chennai",
    "kolkata",
    "hyderabad",
    "jaipur",
    "lucknow",
    "goa",
    "ahmedabad",
    "chandigarh",
    "kanpur",
    "patna",
    "indore",
];

/// Category keywords, matched as substrings so plurals and compounds still hit.
const WEDDING_KEYWORDS: &[&str] = &[
    "wedding", "shaadi", "shadi", "marriage", "vivah", "sangeet", "mehendi", "haldi",
];
const CORPORATE_KEYWORDS: &[&str] = &[
    "corporate",
    "conference",
    "seminar",
    "product launch",
    "offsite",
    "annual day",
    "company event",
    "office party",
];
const BIRTHDAY_KEYWORDS: &[&str] = &["birthday", "bday", "b'day", "janamdin"];
const KITTY_KEYWORDS: &[&str] = &["kitty", "social gathering", "get-together", "get together"];

/// Pricing words, matched as whole words ("rate" must not hit "corporate").
const PRICING_WORDS: &[&str] = &[
    "price", "prices", "pricing", "cost", "costs", "budget", "package", "packages", "rate",
    "rates", "charge", "charges", "fee", "fees", "quote", "kitna", "kharcha", "inr", "rs",
];
/// Pricing phrases and symbols, matched as substrings.
const PRICING_PHRASES: &[&str] = &["how much", "₹"];

/// Category shown for a pricing question that names no category.
///
/// A bare pricing question still gets concrete numbers from this block.
const DEFAULT_PRICING_CATEGORY: EventCategory = EventCategory::Wedding;

/// Build the fallback reply for `message` from the process-wide knowledge base.
pub fn build_fallback_reply(message: &str) -> String {
    build_fallback_reply_with(&KNOWLEDGE_BASE, message)
}

/// Build the fallback reply for `message` from an explicit knowledge base.
pub fn build_fallback_reply_with(kb: &KnowledgeBase, message: &str) -> String {
    let signals = MessageSignals::scan(message);

    let mut parts: Vec<String> = Vec::new();

    parts.push(format!(
        "Thank you for reaching out to {}. We currently plan events in {}.",
        kb.business_name,
        kb.service_area_phrase()
    ));

    if signals.out_of_area {
        parts.push(
            "We are sorry, we do not serve that city at the moment. \
             We would be glad to plan your event in one of our service cities instead."
                .to_string(),
        );
    }

    for category in signals.package_blocks() {
        parts.push(kb.package_summary(category));
    }

    parts.push(
        "Please share your event type, preferred date, guest count, and budget \
         so we can suggest the right plan."
            .to_string(),
    );

    let contact = kb.contact();
    parts.push(format!(
        "You can also call or WhatsApp us at {} or email {}.",
        contact.phone, contact.email
    ));

    parts.join("\n\n")
}

/// Keyword signals extracted from one message.
#[derive(Debug, Default, PartialEq, Eq)]
struct MessageSignals {
    out_of_area: bool,
    categories: Vec<EventCategory>,
    pricing: bool,
}

impl MessageSignals {
    fn scan(message: &str) -> Self {
        let lower = message.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        let has_word = |list: &[&str]| words.iter().any(|w| list.contains(w));
        let has_substring = |list: &[&str]| list.iter().any(|k| lower.contains(k));

        let categories = EventCategory::ALL
            .into_iter()
            .filter(|category| has_substring(category_keywords(*category)))
            .collect();

        Self {
            out_of_area: has_word(OUT_OF_AREA_CITIES),
            categories,
            pricing: has_word(PRICING_WORDS) || has_substring(PRICING_PHRASES),
        }
    }

    /// Categories whose package tiers go into the reply, in fixed order.
    fn package_blocks(&self) -> Vec<EventCategory> {
        if !self.categories.is_empty() {
            self.categories.clone()
        } else if self.pricing {
            vec![DEFAULT_PRICING_CATEGORY]
        } else {
            Vec::new()
        }
    }
}

fn category_keywords(category: EventCategory) -> &'static [&'static str] {
    match category {
        EventCategory::Wedding => WEDDING_KEYWORDS,
        EventCategory::Corporate => CORPORATE_KEYWORDS,
        EventCategory::Birthday => BIRTHDAY_KEYWORDS,
        EventCategory::KittyParty => KITTY_KEYWORDS,
    }
}
