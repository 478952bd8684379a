pub mod repositories;
pub mod reviews;
pub mod stats;
