//! Ad listing, search and publishing

mod service;


pub use service::{MarketplaceService, SaveAdCommand, TOP_ADS_LIMIT};
