use shelfsearch_core::tokenizer::tokenize;
use shelfsearch_core::{StopwordSet, TokenizerOptions};

#[test]
fn it_lowercases_and_splits_on_punctuation() {
    let words = tokenize("Spice-Trade, DESERT_planet!", &TokenizerOptions::default());
    assert_eq!(words, vec!["spice", "trade", "desert", "planet"]);
}

#[test]
fn it_filters_stopwords() {
    let words = tokenize("The quick brown fox and the lazy dog", &TokenizerOptions::default());
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert!(words.contains(&"fox".to_string()));
}

#[test]
fn it_keeps_stopwords_when_disabled() {
    let opts = TokenizerOptions { stopwords: StopwordSet::None, ..TokenizerOptions::default() };
    assert_eq!(tokenize("the a an", &opts), vec!["the", "a", "an"]);
}

#[test]
fn it_is_deterministic() {
    let text = "Dune: desert planet, spice; empire! spice again.";
    let opts = TokenizerOptions::default();
    assert_eq!(tokenize(text, &opts), tokenize(text, &opts));
}

#[test]
fn it_stems_on_request() {
    let opts = TokenizerOptions { stem: true, ..TokenizerOptions::default() };
    let words = tokenize("Running Runners RUN!", &opts);
    assert!(words.contains(&"run".to_string()));
}

#[test]
fn it_normalizes_on_request() {
    let opts = TokenizerOptions { nfkc: true, ..TokenizerOptions::default() };
    assert_eq!(tokenize("ＳＰＩＣＥ", &opts), vec!["spice"]);
}
