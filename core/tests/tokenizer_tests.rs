use cinematch_core::tokenizer::{tokenize, tokenize_with, TokenizerOptions};

#[test]
fn it_lowercases_and_splits_on_punctuation() {
    let words = tokenize("Science Fiction|Action, ADVENTURE");
    assert_eq!(words, vec!["science", "fiction", "action", "adventure"]);
}

#[test]
fn it_keeps_digits_and_underscores() {
    let words = tokenize("Terminator 2 1984 snake_case");
    assert_eq!(words, vec!["terminator", "1984", "snake_case"]);
}

#[test]
fn it_strips_accents_only_when_asked() {
    let plain = tokenize("Amélie café");
    assert_eq!(plain, vec!["amélie", "café"]);
    let stripped = tokenize_with("Amélie café", TokenizerOptions { strip_accents: true });
    assert_eq!(stripped, vec!["amelie", "cafe"]);
}

#[test]
fn it_merges_fields_without_separator() {
    // two feature values glued together form one token
    let joined: String = ["Action", "James Cameron"].concat();
    assert_eq!(tokenize(&joined), vec!["actionjames", "cameron"]);
}

#[test]
fn it_splits_on_combining_marks() {
    // virama and vowel signs are marks, not word characters
    assert_eq!(tokenize("नमस्ते आमिर"), vec!["नमस", "आम"]);
    // decomposed accent splits the word; precomposed does not
    assert_eq!(tokenize("Ame\u{301}lie"), vec!["ame", "lie"]);
    assert_eq!(tokenize("Am\u{e9}lie"), vec!["am\u{e9}lie"]);
}
