//! Static knowledge base: service areas, event categories, packages and contact details.
//!
//! Both reply paths read prices and service-area claims from [`KNOWLEDGE_BASE`]:
//! the rule-based fallback quotes it directly and the model sees it rendered via
//! [`KnowledgeBase::prompt_text`]. The data is `'static` and never mutated, so it
//! is shared across request tasks without locking.

use std::fmt;

/// Event categories offered, in the fixed order replies list them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Wedding,
    Corporate,
    Birthday,
    KittyParty,
}

impl EventCategory {
    /// All categories in reply order: Wedding → Corporate → Birthday → Kitty.
    pub const ALL: [EventCategory; 4] = [
        EventCategory::Wedding,
        EventCategory::Corporate,
        EventCategory::Birthday,
        EventCategory::KittyParty,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::Wedding => "Wedding",
            EventCategory::Corporate => "Corporate",
            EventCategory::Birthday => "Birthday",
            EventCategory::KittyParty => "Kitty Party",
        }
    }
}

/// Price of a package: a display label in rupees, or quoted on request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Price {
    Fixed(&'static str),
    Custom,
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Fixed(label) => f.write_str(label),
            Price::Custom => f.write_str("custom pricing"),
        }
    }
}

/// Guest capacity of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestCeiling {
    /// At most this many guests.
    UpTo(u32),
    /// This many guests or more (open-ended top tier).
    Above(u32),
}

impl fmt::Display for GuestCeiling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuestCeiling::UpTo(n) => write!(f, "up to {n} guests"),
            GuestCeiling::Above(n) => write!(f, "{n}+ guests"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Package {
    pub name: &'static str,
    pub price: Price,
    pub guest_ceiling: GuestCeiling,
    pub features: &'static [&'static str],
}

/// Ordered package tiers for one category.
#[derive(Debug, Clone, Copy)]
pub struct CategoryPackages {
    pub category: EventCategory,
    pub packages: &'static [Package],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    /// Display form of the phone number, also reachable on WhatsApp.
    pub phone: &'static str,
    pub whatsapp_url: &'static str,
    pub email: &'static str,
}

/// Immutable catalog shared by the fallback responder and the prompt builder.
#[derive(Debug, Clone, Copy)]
pub struct KnowledgeBase {
    pub business_name: &'static str,
    service_cities: &'static [&'static str],
    catalog: &'static [CategoryPackages],
    contact: Contact,
}

impl KnowledgeBase {
    pub fn service_cities(&self) -> &'static [&'static str] {
        self.service_cities
    }

    /// Package tiers for `category`, cheapest first.
    pub fn packages(&self, category: EventCategory) -> &'static [Package] {
        self.catalog
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.packages)
            .unwrap_or(&[])
    }

    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    /// "Delhi, Greater Noida, and Varanasi".
    pub fn service_area_phrase(&self) -> String {
        match self.service_cities {
            [] => String::new(),
            [only] => (*only).to_string(),
            [init @ .., last] => format!("{}, and {}", init.join(", "), last),
        }
    }

    /// One-line summary of a category's tiers: name, price, guest ceiling.
    pub fn package_summary(&self, category: EventCategory) -> String {
        let tiers: Vec<String> = self
            .packages(category)
            .iter()
            .map(|p| format!("{} ({}, {})", p.name, p.price, p.guest_ceiling))
            .collect();
        format!("{} packages: {}.", category.label(), tiers.join("; "))
    }

    /// The whole catalog as plain text for the model's system instructions.
    pub fn prompt_text(&self) -> String {
        let mut lines = vec![format!("Service areas: {}.", self.service_area_phrase())];

        for entry in self.catalog {
            let tiers: Vec<String> = entry
                .packages
                .iter()
                .map(|p| {
                    format!(
                        "{} ({}, {}; includes {})",
                        p.name,
                        p.price,
                        p.guest_ceiling,
                        p.features.join(", ")
                    )
                })
                .collect();
            lines.push(format!(
                "{} packages: {}.",
                entry.category.label(),
                tiers.join("; ")
            ));
        }

        lines.push(format!(
            "Contact: phone/WhatsApp {} ({}), email {}.",
            self.contact.phone, self.contact.whatsapp_url, self.contact.email
        ));
        lines.join("\n")
    }
}

// ── Catalog data ─────────────────────────────────────────────────────────────

const WEDDING_PACKAGES: &[Package] = &[
    Package {
        name: "Intimate",
        price: Price::Fixed("₹5,00,000"),
        guest_ceiling: GuestCeiling::UpTo(150),
        features: &[
            "venue coordination",
            "basic decor",
            "catering management",
            "photography (8 hours)",
            "event day coordination",
        ],
    },
    Package {
        name: "Grand Celebration",
        price: Price::Fixed("₹15,00,000"),
        guest_ceiling: GuestCeiling::UpTo(500),
        features: &[
            "premium venue selection",
            "luxury decor and lighting",
            "multi-cuisine catering",
            "photography and videography",
            "guest accommodation",
            "dedicated wedding planner",
        ],
    },
    Package {
        name: "Royal Experience",
        price: Price::Custom,
        guest_ceiling: GuestCeiling::Above(500),
        features: &[
            "destination wedding planning",
            "palace or resort bookings",
            "multi-day celebrations",
            "complete travel management",
            "personal concierge service",
        ],
    },
];

const CORPORATE_PACKAGES: &[Package] = &[
    Package {
        name: "Essential",
        price: Price::Fixed("₹2,50,000"),
        guest_ceiling: GuestCeiling::UpTo(100),
        features: &[
            "venue coordination",
            "basic AV setup",
            "catering management",
            "event day coordination",
        ],
    },
    Package {
        name: "Professional",
        price: Price::Fixed("₹7,50,000"),
        guest_ceiling: GuestCeiling::UpTo(500),
        features: &[
            "premium venue selection",
            "advanced AV and stage production",
            "branding and signage",
            "photography and videography",
            "dedicated event manager",
        ],
    },
    Package {
        name: "Enterprise",
        price: Price::Custom,
        guest_ceiling: GuestCeiling::Above(500),
        features: &[
            "multi-day event management",
            "hybrid event capabilities",
            "speaker management",
            "media and PR coordination",
            "24/7 support team",
        ],
    },
];

const BIRTHDAY_PACKAGES: &[Package] = &[
    Package {
        name: "Fun Start",
        price: Price::Fixed("₹50,000"),
        guest_ceiling: GuestCeiling::UpTo(50),
        features: &[
            "basic theme decor",
            "birthday cake",
            "catering",
            "photography (4 hours)",
        ],
    },
    Package {
        name: "Grand Bash",
        price: Price::Fixed("₹1,50,000"),
        guest_ceiling: GuestCeiling::UpTo(150),
        features: &[
            "premium theme execution",
            "custom birthday cake",
            "DJ or band",
            "photography and videography",
            "event coordinator",
        ],
    },
    Package {
        name: "Luxury Experience",
        price: Price::Custom,
        guest_ceiling: GuestCeiling::Above(150),
        features: &[
            "luxury venue booking",
            "designer decor and lighting",
            "gourmet catering",
            "live streaming",
        ],
    },
];

const KITTY_PACKAGES: &[Package] = &[
    Package {
        name: "Cozy Gathering",
        price: Price::Fixed("₹25,000"),
        guest_ceiling: GuestCeiling::UpTo(30),
        features: &[
            "basic theme decor",
            "snacks and beverages",
            "party games setup",
            "photography (2 hours)",
        ],
    },
    Package {
        name: "Elegant Affair",
        price: Price::Fixed("₹75,000"),
        guest_ceiling: GuestCeiling::UpTo(80),
        features: &[
            "premium theme execution",
            "elegant decor and lighting",
            "multi-course catering",
            "DJ or live music",
            "dedicated coordinator",
        ],
    },
    Package {
        name: "Grand Celebration",
        price: Price::Custom,
        guest_ceiling: GuestCeiling::Above(80),
        features: &[
            "luxury venue booking",
            "designer decor and styling",
            "gourmet catering",
            "full event management",
        ],
    },
];

/// The process-wide catalog.
pub static KNOWLEDGE_BASE: KnowledgeBase = KnowledgeBase {
    business_name: "VedicUtsav",
    service_cities: &["Delhi", "Greater Noida", "Varanasi"],
    catalog: &[
        CategoryPackages {
            category: EventCategory::Wedding,
            packages: WEDDING_PACKAGES,
        },
        CategoryPackages {
            category: EventCategory::Corporate,
            packages: CORPORATE_PACKAGES,
        },
        CategoryPackages {
            category: EventCategory::Birthday,
            packages: BIRTHDAY_PACKAGES,
        },
        CategoryPackages {
            category: EventCategory::KittyParty,
            packages: KITTY_PACKAGES,
        },
    ],
    contact: Contact {
        phone: "+91 93691 90920",
        whatsapp_url: "https://wa.me/919369190920",
        email: "vaidikutsav03@gmail.com",
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_three_tiers() {
        for category in EventCategory::ALL {
            assert_eq!(KNOWLEDGE_BASE.packages(category).len(), 3, "{category:?}");
        }
    }

    #[test]
    fn service_area_phrase_lists_three_cities() {
        assert_eq!(
            KNOWLEDGE_BASE.service_area_phrase(),
            "Delhi, Greater Noida, and Varanasi"
        );
    }

    #[test]
    fn top_tier_is_custom_and_open_ended() {
        for category in EventCategory::ALL {
            let top = KNOWLEDGE_BASE.packages(category).last().unwrap();
            assert_eq!(top.price, Price::Custom);
            assert!(matches!(top.guest_ceiling, GuestCeiling::Above(_)));
        }
    }

    #[test]
    fn wedding_summary_formats_tiers() {
        assert_eq!(
            KNOWLEDGE_BASE.package_summary(EventCategory::Wedding),
            "Wedding packages: Intimate (₹5,00,000, up to 150 guests); \
             Grand Celebration (₹15,00,000, up to 500 guests); \
             Royal Experience (custom pricing, 500+ guests)."
        );
    }
}
