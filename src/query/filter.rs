use super::interpreter::QueryCriteria;
use crate::dataset::{Listing, ListingTable};

/// Keeps listings whose location contains the requested one (ignoring
/// case) and whose price is at most the ceiling. Absent criteria keep
/// everything; order is preserved.
pub fn filter_listings<'a>(table: &'a ListingTable, criteria: &QueryCriteria) -> Vec<&'a Listing> {
    let location = criteria.location.as_deref().map(str::to_lowercase);

    table
        .iter()
        .filter(|listing| {
            location
                .as_deref()
                .is_none_or(|needle| listing.location.to_lowercase().contains(needle))
        })
        .filter(|listing| {
            criteria
                .max_price
                .is_none_or(|max_price| listing.price.fits_within(max_price))
        })
        .collect()
}
