use super::filter::filter_listings;
use super::interpreter::interpret;
use super::tokenizer::tokenize;
use crate::dataset::{Listing, ListingTable};
use std::fmt::Write;

pub const RESULTS_HEADER: &str = "Here are some available properties:";
pub const NO_MATCH_MESSAGE: &str = "Sorry, no properties match your criteria.";
pub const HELP_MESSAGE: &str = "I can help you find properties! Try asking something like 'Find a property in Paris under $200'.";

const TRIGGER_WORDS: [&str; 2] = ["property", "find"];

/// Answers one utterance. Utterances that mention neither trigger word get
/// the help message and never touch the table.
pub fn respond(table: &ListingTable, utterance: &str) -> String {
    if !is_property_request(utterance) {
        return HELP_MESSAGE.to_string();
    }

    let tokens = tokenize(utterance);
    let criteria = interpret(table, &tokens);
    let matches = filter_listings(table, &criteria);
    format_listings(&matches)
}

pub fn is_property_request(utterance: &str) -> bool {
    let lowered = utterance.to_lowercase();
    TRIGGER_WORDS.iter().any(|word| lowered.contains(word))
}

pub fn format_listings(listings: &[&Listing]) -> String {
    if listings.is_empty() {
        return NO_MATCH_MESSAGE.to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{RESULTS_HEADER}");
    for listing in listings {
        let _ = writeln!(
            out,
            "- {} in {} for ${}",
            listing.description, listing.location, listing.price
        );
    }
    out
}
