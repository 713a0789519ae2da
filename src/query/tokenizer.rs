use regex::Regex;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

/// Lower-cases `text` and splits it into maximal runs of word characters.
/// Everything else, `$` included, only separates tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered)
        .map(|word| word.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::tokenize;

    #[test]
    fn splits_on_punctuation_and_whitespace() {
        assert_eq!(
            tokenize("Find a property in Paris under $200"),
            vec!["find", "a", "property", "in", "paris", "under", "200"]
        );
    }

    #[test]
    fn keeps_underscores_digits_and_non_ascii_letters() {
        assert_eq!(
            tokenize("Zürich, near_lake! 2br?"),
            vec!["zürich", "near_lake", "2br"]
        );
    }

    #[test]
    fn empty_and_symbol_only_input_yield_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  $ -- !! ").is_empty());
    }

    #[test]
    fn decimal_prices_split_into_two_tokens() {
        assert_eq!(tokenize("$99.50"), vec!["99", "50"]);
    }
}
