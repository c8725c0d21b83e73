pub mod engagement;
pub mod listings;
pub mod ownership;

pub use engagement::EngagementService;
pub use listings::ListingService;
