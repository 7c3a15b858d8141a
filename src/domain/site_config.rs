//! Site configuration document
//!
//! The public booking page reads its display data (subscriber stats,
//! pricing, testimonials) from a single KV-stored JSON document so the
//! team can update it without a deploy. A compiled-in default serves
//! until the first admin update, and whenever the store is unreachable.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Newsletter audience stats shown on the booking page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteStats {
    pub subscribers: String,
    pub open_rate: String,
}

/// Displayed slot pricing, in whole currency units
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SitePricing {
    pub premium: i64,
    pub unclassified: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteContact {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub company: String,
}

/// The full booking-page configuration document
///
/// Admin updates must carry `stats` and `testimonials`; the other
/// sections fall back to their defaults when omitted, matching what the
/// page can render without them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub stats: SiteStats,
    #[serde(default)]
    pub pricing: SitePricing,
    #[serde(default)]
    pub contact: SiteContact,
    pub testimonials: Vec<Testimonial>,
}

/// Served when KV has no stored document (or is unreachable)
pub static DEFAULT_SITE_CONFIG: Lazy<SiteConfig> = Lazy::new(|| SiteConfig {
    stats: SiteStats {
        subscribers: "122,000+".to_string(),
        open_rate: "46%".to_string(),
    },
    pricing: SitePricing {
        premium: 500,
        unclassified: 200,
    },
    contact: SiteContact {
        email: "editor@adboard.dev".to_string(),
    },
    testimonials: vec![
        Testimonial {
            quote: "This placement generated nearly 1,000 clicks, 5x what we \
                    estimated, and over 100 new subscribers."
                .to_string(),
            company: "Brightside Deals".to_string(),
        },
        Testimonial {
            quote: "The sponsorship ran smoothly and delivered the clicks we \
                    expected, working out to about $1 a click."
                .to_string(),
            company: "Growth HQ".to_string(),
        },
        Testimonial {
            quote: "Six signups from one issue, and one already converted to \
                    a paying customer."
                .to_string(),
            company: "Harbor Labs".to_string(),
        },
    ],
});
