use std::collections::HashSet;
use std::fmt::{Display, Formatter};

/// Nightly price of a listing. Always finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self(value))
    }

    /// Coerces a raw CSV cell. Surrounding whitespace is ignored; empty,
    /// non-numeric and non-finite cells are rejected.
    pub fn parse(cell: &str) -> Option<Self> {
        cell.trim().parse::<f64>().ok().and_then(Self::new)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn fits_within(self, max_price: u64) -> bool {
        self.0 <= max_price as f64
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // f64's Display already drops the fraction of integral values.
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub location: String,
    pub price: Price,
    pub description: String,
}

impl Listing {
    pub fn new(location: impl Into<String>, price: Price, description: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            price,
            description: description.into(),
        }
    }
}

/// Validated listings in file order. Built once, never mutated.
#[derive(Debug, Clone, Default)]
pub struct ListingTable {
    listings: Vec<Listing>,
    known_locations: HashSet<String>,
}

impl ListingTable {
    pub fn new(listings: Vec<Listing>) -> Self {
        let known_locations = listings
            .iter()
            .map(|listing| listing.location.to_lowercase())
            .collect();
        Self {
            listings,
            known_locations,
        }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Listing> {
        self.listings.iter()
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// True when `token` equals some listing's whole location, ignoring case.
    pub fn has_location(&self, token: &str) -> bool {
        self.known_locations.contains(&token.to_lowercase())
    }
}
