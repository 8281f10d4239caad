use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Spend bracket a traveler picks on the budget step. Unknown wire values
/// fail deserialization instead of falling back to a default bracket.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetTier {
    Budget,
    MidRange,
    Luxury,
    UltraLuxury,
}

impl BudgetTier {
    pub fn base_price(&self) -> u32 {
        match self {
            BudgetTier::Budget => 2_000,
            BudgetTier::MidRange => 5_000,
            BudgetTier::Luxury => 11_000,
            BudgetTier::UltraLuxury => 20_000,
        }
    }

    /// Range shown to the traveler and embedded in itinerary prompts.
    pub fn range_label(&self) -> &'static str {
        match self {
            BudgetTier::Budget => "$1,000 - $3,000",
            BudgetTier::MidRange => "$3,000 - $7,000",
            BudgetTier::Luxury => "$7,000 - $15,000",
            BudgetTier::UltraLuxury => "$15,000+",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TripDuration {
    Weekend,
    Week,
    TwoWeeks,
    Month,
}

impl TripDuration {
    pub fn price_multiplier(&self) -> f64 {
        match self {
            TripDuration::Weekend => 0.3,
            TripDuration::Week => 1.0,
            TripDuration::TwoWeeks => 1.8,
            TripDuration::Month => 3.5,
        }
    }

    pub fn days(&self) -> u32 {
        match self {
            TripDuration::Weekend => 3,
            TripDuration::Week => 7,
            TripDuration::TwoWeeks => 14,
            TripDuration::Month => 30,
        }
    }
}

/// One draft trip held in the cart. Field names match the payload the web
/// client persists, so existing carts stay readable.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TripItem {
    pub id: String,
    pub destination: Destination,
    pub budget: BudgetTier,
    pub duration: TripDuration,
    pub experiences: Vec<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub notes: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "totalPrice", default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<u32>,
}

/// Cart candidate: a fully configured trip minus the id and timestamp the
/// store assigns at insertion.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TripDraft {
    pub destination: Destination,
    pub budget: BudgetTier,
    pub duration: TripDuration,
    pub experiences: Vec<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub notes: String,
    #[serde(rename = "totalPrice", default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<u32>,
}

/// Partial update merged into a cart entry by `TripCart::update_trip`.
#[derive(Debug, Default, Clone)]
pub struct TripPatch {
    pub destination: Option<Destination>,
    pub budget: Option<BudgetTier>,
    pub duration: Option<TripDuration>,
    pub experiences: Option<Vec<String>>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub total_price: Option<u32>,
}
