pub mod analysis;
pub mod curated;
pub mod submission;
pub mod trip;
