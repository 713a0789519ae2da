//! Turns a free-text utterance into a reply over a loaded [`ListingTable`].
//!
//! The pipeline is `tokenize -> interpret -> filter_listings -> format_listings`,
//! wrapped by [`respond`].
//!
//! [`ListingTable`]: crate::dataset::ListingTable

mod filter;
mod interpreter;
mod response;
mod tokenizer;

pub use filter::filter_listings;
pub use interpreter::{QueryCriteria, interpret};
pub use response::{
    HELP_MESSAGE, NO_MATCH_MESSAGE, RESULTS_HEADER, format_listings, is_property_request, respond,
};
pub use tokenizer::tokenize;
