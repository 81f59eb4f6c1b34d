use crate::config::TokenizerOptions;
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref RE: Regex = Regex::new(r"[\p{L}\p{N}]+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

/// Lowercase, split on non-alphanumeric runs, drop stopwords and short tokens.
///
/// Output order follows the input text, so identical text always yields the
/// identical sequence. Blank text yields an empty vector.
pub fn tokenize(text: &str, options: &TokenizerOptions) -> Vec<String> {
    let lowered = if options.nfkc {
        text.nfkc().collect::<String>().to_lowercase()
    } else {
        text.to_lowercase()
    };
    let mut tokens = Vec::new();
    for mat in RE.find_iter(&lowered) {
        let token = mat.as_str();
        if token.chars().count() < options.min_token_len || options.stopwords.contains(token) {
            continue;
        }
        if options.stem {
            tokens.push(STEMMER.stem(token).into_owned());
        } else {
            tokens.push(token.to_string());
        }
    }
    tokens
}
