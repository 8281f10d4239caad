pub mod ai;
pub mod checkout;
pub mod curated;
pub mod destinations;
pub mod health;
pub mod places;
pub mod trip_submissions;
