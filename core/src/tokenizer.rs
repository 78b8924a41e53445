use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    // Maximal runs of two or more letters, digits or underscores. Combining marks are not
    // word characters here, so they split tokens; single-character tokens are dropped.
    static ref RE: Regex = Regex::new(r"[\p{L}\p{N}_]{2,}").expect("valid regex");
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Decompose (NFKD) and drop combining marks before tokenizing, so "café" -> "cafe".
    pub strip_accents: bool,
}

/// Tokenize text by lowercasing and taking word runs, with default options.
pub fn tokenize(text: &str) -> Vec<String> { tokenize_with(text, TokenizerOptions::default()) }

pub fn tokenize_with(text: &str, opts: TokenizerOptions) -> Vec<String> {
    let mut normalized = text.to_lowercase();
    if opts.strip_accents {
        normalized = normalized.nfkd().filter(|c| !is_combining_mark(*c)).collect();
    }
    RE.find_iter(&normalized).map(|m| m.as_str().to_string()).collect()
}
