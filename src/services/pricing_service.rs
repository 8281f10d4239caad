use crate::models::trip::{BudgetTier, TripDuration};

/// Flat addition per selected experience tag.
const EXPERIENCE_BONUS: u32 = 500;

pub struct PricingService;

impl PricingService {
    /// Estimate the package price for a configured trip.
    ///
    /// Deterministic and shared between the wizard's live display and the
    /// price persisted with the cart entry, so the two can never disagree.
    pub fn estimate_trip_price(
        budget: BudgetTier,
        duration: TripDuration,
        experience_count: usize,
    ) -> u32 {
        let base = budget.base_price() as f64;
        let bonus = (EXPERIENCE_BONUS as usize * experience_count) as f64;
        (base * duration.price_multiplier() + bonus).round() as u32
    }
}
