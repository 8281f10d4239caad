pub mod ai_service;
pub mod places_service;
pub mod pricing_service;
pub mod stripe;
pub mod submission_service;
