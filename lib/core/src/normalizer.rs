//! Text normalization for supplier names and invoice text.
//!
//! Two policies exist and are not interchangeable:
//!
//! - **CharNgram**: keeps the text shape (spacing, periods) and strips OCR
//!   noise such as currency amounts, dates and URLs. Output feeds the
//!   word-bounded character n-gram vocabulary.
//! - **WordNgram**: reduces text to content words: punctuation and
//!   stop words are dropped and every token is lemmatized.
//!
//! Normalization is a pure function of the input; the only shared state is
//! the compiled pattern set and the [`Lexicon`], both built once per process.

use crate::config::Policy;
use crate::lexicon::Lexicon;
use regex::Regex;
use std::sync::OnceLock;

struct NoisePatterns {
    possessive: Regex,
    parens: Regex,
    currency: Regex,
    date: Regex,
    url: Regex,
}

static NOISE: OnceLock<NoisePatterns> = OnceLock::new();

fn noise_patterns() -> &'static NoisePatterns {
    NOISE.get_or_init(|| {
        let compile = |pattern: &str| match Regex::new(pattern) {
            Ok(re) => re,
            Err(e) => panic!("invalid built-in pattern {pattern:?}: {e}"),
        };
        NoisePatterns {
            possessive: compile(r"(?i)'s\b"),
            parens: compile(r"[()]"),
            // `.` matches any separator: "$12,50", "12/05/2020" and
            // "01.02.2021" are all noise.
            currency: compile(r"\$\d+(?:.\d+)?"),
            date: compile(r"\d+.\d+.\d+"),
            url: compile(
                r"(?:(?:http|https)://)?[a-zA-Z0-9./?:@\-_=#]+\.[a-zA-Z]{2,6}[a-zA-Z0-9.&/?:@\-_=#]*",
            ),
        }
    })
}

/// Policy-aware text normalizer.
///
/// # Examples
///
/// ```
/// use supplier_match_core::{Policy, TextNormalizer};
///
/// let chars = TextNormalizer::new(Policy::CharNgram);
/// assert_eq!(chars.normalize("ACME-CORP, INC."), "acme corp inc.");
///
/// let words = TextNormalizer::new(Policy::WordNgram);
/// assert_eq!(words.normalize("The Acme Companies, Inc."), "acme company inc");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    policy: Policy,
}

impl TextNormalizer {
    #[inline]
    pub const fn new(policy: Policy) -> Self {
        Self { policy }
    }

    #[inline]
    pub const fn policy(&self) -> Policy {
        self.policy
    }

    /// Normalizes text and returns a new String.
    pub fn normalize(&self, input: &str) -> String {
        match self.policy {
            Policy::CharNgram => normalize_chars(input),
            Policy::WordNgram => normalize_words(input),
        }
    }
}

fn normalize_chars(input: &str) -> String {
    let patterns = noise_patterns();

    let ascii: String = input.chars().filter(char::is_ascii).collect();
    let text = ascii.replace('-', " ").replace('&', "and");
    let text = text.trim();

    let text = patterns.possessive.replace_all(text, "");
    let text = patterns.parens.replace_all(&text, "");
    let text = patterns.currency.replace_all(&text, "");
    let text = patterns.date.replace_all(&text, "");
    let text = text.replace("http://", "");
    let text = patterns.url.replace_all(&text, "");

    text.chars()
        .filter(|&c| c == '.' || !c.is_ascii_punctuation())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn normalize_words(input: &str) -> String {
    let lexicon = Lexicon::global();

    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_punctuation())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let mut out = String::with_capacity(cleaned.len());
    for token in cleaned
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty() && !lexicon.is_stop_word(t))
    {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&lexicon.lemmatize(token));
    }
    out
}
