mod listing;
mod loader;

pub use listing::{Listing, ListingTable, Price};
pub use loader::{LoadError, REQUIRED_COLUMNS, load_listings, read_listings};
