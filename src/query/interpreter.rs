use crate::dataset::ListingTable;

/// What a single utterance asks for. `None` fields do not constrain results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryCriteria {
    pub location: Option<String>,
    pub max_price: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenClass {
    Price(u64),
    Location,
    Other,
}

/// Scans tokens left to right. Digit tokens become the price ceiling and
/// tokens equal to a whole known location become the location; in both
/// cases the last match wins.
pub fn interpret(table: &ListingTable, tokens: &[String]) -> QueryCriteria {
    let mut criteria = QueryCriteria::default();

    for token in tokens {
        match classify(table, token) {
            TokenClass::Price(value) => criteria.max_price = Some(value),
            TokenClass::Location => criteria.location = Some(token.to_lowercase()),
            TokenClass::Other => {}
        }
    }

    criteria
}

fn classify(table: &ListingTable, token: &str) -> TokenClass {
    if is_price_token(token) {
        // Only overflow can fail here; such bounds saturate.
        return TokenClass::Price(token.parse().unwrap_or(u64::MAX));
    }

    if table.has_location(token) {
        TokenClass::Location
    } else {
        TokenClass::Other
    }
}

// ASCII digits only: `٢٠٠` and other non-ASCII numerals are plain words.
fn is_price_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|byte| byte.is_ascii_digit())
}
