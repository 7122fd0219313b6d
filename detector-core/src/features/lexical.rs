//! Lexical Features - character counts over the raw URL text

use once_cell::sync::Lazy;
use regex::Regex;

use super::extractor::{FeatureGroup, UrlContext};
use super::layout::idx;
use super::vector::FeatureVectorBuilder;

/// Counts of punctuation and digits over the whole URL, plus the
/// hostname dash count.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexicalFeatures;

impl LexicalFeatures {
    pub fn new() -> Self {
        Self
    }
}

/// Character count; lengths in the training data are code points, not bytes
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Decimal digits of any script plus the digit-valued superscripts,
/// subscripts, circled and parenthesized forms. Fractions, roman numerals
/// and other numeric symbols do not count.
static DIGIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"[\p{Nd}",
        r"\x{B2}\x{B3}\x{B9}\x{1369}-\x{1371}\x{19DA}",
        r"\x{2070}\x{2074}-\x{2079}\x{2080}-\x{2089}",
        r"\x{2460}-\x{2468}\x{2474}-\x{247C}\x{2488}-\x{2490}",
        r"\x{24EA}\x{24F5}-\x{24FD}\x{24FF}",
        r"\x{2776}-\x{277E}\x{2780}-\x{2788}\x{278A}-\x{2792}",
        r"\x{10A40}-\x{10A43}\x{10E60}-\x{10E68}\x{11052}-\x{1105A}",
        r"\x{1F100}-\x{1F10A}]",
    ))
    .expect("valid digit class")
});

pub fn count_digits(text: &str) -> usize {
    DIGIT.find_iter(text).count()
}

fn count_char(text: &str, needle: char) -> usize {
    text.chars().filter(|&c| c == needle).count()
}

impl FeatureGroup for LexicalFeatures {
    fn apply(&self, ctx: &UrlContext<'_>, builder: FeatureVectorBuilder) -> FeatureVectorBuilder {
        let url = ctx.raw;

        builder
            .count(idx::NUM_DOTS, count_char(url, '.'))
            .count(idx::URL_LENGTH, char_len(url))
            .count(idx::NUM_DASH, count_char(url, '-'))
            .count(idx::NUM_DASH_IN_HOSTNAME, count_char(&ctx.hostname, '-'))
            .flag(idx::AT_SYMBOL, url.contains('@'))
            .flag(idx::TILDE_SYMBOL, url.contains('~'))
            .count(idx::NUM_UNDERSCORE, count_char(url, '_'))
            .count(idx::NUM_PERCENT, count_char(url, '%'))
            .count(idx::NUM_AMPERSAND, count_char(url, '&'))
            .count(idx::NUM_HASH, count_char(url, '#'))
            .count(idx::NUM_NUMERIC_CHARS, count_digits(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::url_parts::split;

    fn apply(url: &str) -> crate::features::FeatureVector {
        let parts = split(url).unwrap();
        let ctx = UrlContext::new(url, parts);
        LexicalFeatures::new().apply(&ctx, FeatureVectorBuilder::new()).build()
    }

    #[test]
    fn test_counts_symbols() {
        let v = apply("http://a-b.c-d.com/x_y%20?p=1&q=2#frag~user@");
        assert_eq!(v.get(idx::NUM_DOTS), Some(2.0));
        assert_eq!(v.get(idx::NUM_DASH), Some(2.0));
        assert_eq!(v.get(idx::NUM_DASH_IN_HOSTNAME), Some(2.0));
        assert_eq!(v.get(idx::NUM_UNDERSCORE), Some(1.0));
        assert_eq!(v.get(idx::NUM_PERCENT), Some(1.0));
        assert_eq!(v.get(idx::NUM_AMPERSAND), Some(1.0));
        assert_eq!(v.get(idx::NUM_HASH), Some(1.0));
        assert_eq!(v.get(idx::TILDE_SYMBOL), Some(1.0));
        assert_eq!(v.get(idx::AT_SYMBOL), Some(1.0));
        assert_eq!(v.get(idx::NUM_NUMERIC_CHARS), Some(4.0));
    }

    #[test]
    fn test_presence_flags_are_binary() {
        let v = apply("http://a@b@c/~~~");
        assert_eq!(v.get(idx::AT_SYMBOL), Some(1.0));
        assert_eq!(v.get(idx::TILDE_SYMBOL), Some(1.0));
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        let v = apply("http://bücher.de");
        assert_eq!(v.get(idx::URL_LENGTH), Some(16.0));
    }

    #[test]
    fn test_numeric_chars_include_unicode_digits() {
        let v = apply("http://x.com/a²³b");
        assert_eq!(v.get(idx::NUM_NUMERIC_CHARS), Some(2.0));

        // Arabic-Indic and fullwidth decimals, circled one
        assert_eq!(count_digits("٣٤５①"), 4);
        // Fractions and roman numerals are numeric but not digits
        assert_eq!(count_digits("½Ⅻ"), 0);
    }
}
