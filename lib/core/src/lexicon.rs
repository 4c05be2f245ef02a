//! Process-wide English word resources used by token-oriented normalization.
//!
//! The stop-word set and the irregular-plural table are built once, on first
//! use, and shared read-only by every normalizer afterwards.

use ahash::{AHashMap, AHashSet};
use std::borrow::Cow;
use std::sync::OnceLock;

#[rustfmt::skip]
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

#[rustfmt::skip]
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("children", "child"), ("people", "person"), ("men", "man"), ("women", "woman"),
    ("salesmen", "salesman"), ("chairmen", "chairman"), ("foremen", "foreman"),
    ("mice", "mouse"), ("geese", "goose"), ("feet", "foot"), ("teeth", "tooth"),
    ("oxen", "ox"), ("knives", "knife"), ("wives", "wife"), ("lives", "life"),
    ("leaves", "leaf"), ("halves", "half"), ("shelves", "shelf"), ("wolves", "wolf"),
    ("analyses", "analysis"), ("crises", "crisis"), ("theses", "thesis"),
    ("indices", "index"), ("matrices", "matrix"), ("criteria", "criterion"),
    // -ie nouns: `ies` is not `y` here
    ("movies", "movie"), ("cookies", "cookie"), ("ties", "tie"), ("pies", "pie"),
    ("lies", "lie"), ("calories", "calorie"), ("brownies", "brownie"),
    ("rookies", "rookie"), ("zombies", "zombie"), ("freebies", "freebie"),
    ("selfies", "selfie"), ("goodies", "goodie"),
    // -che nouns: only the `s` goes
    ("niches", "niche"), ("caches", "cache"), ("aches", "ache"),
    ("headaches", "headache"), ("avalanches", "avalanche"), ("cliches", "cliche"),
    ("quiches", "quiche"), ("moustaches", "moustache"), ("psyches", "psyche"),
    ("microfiches", "microfiche"),
    // same in singular and plural
    ("series", "series"), ("species", "species"), ("news", "news"),
    ("means", "means"), ("headquarters", "headquarters"), ("works", "works"),
];

/// Stop words and lemma exceptions for English text.
#[derive(Debug)]
pub struct Lexicon {
    stop_words: AHashSet<&'static str>,
    irregular: AHashMap<&'static str, &'static str>,
}

static LEXICON: OnceLock<Lexicon> = OnceLock::new();

impl Lexicon {
    /// The shared lexicon, initialized on first call.
    pub fn global() -> &'static Lexicon {
        LEXICON.get_or_init(|| {
            tracing::debug!(
                stop_words = STOP_WORDS.len(),
                irregular = IRREGULAR_NOUNS.len(),
                "loading english lexicon"
            );
            Lexicon {
                stop_words: STOP_WORDS.iter().copied().collect(),
                irregular: IRREGULAR_NOUNS.iter().copied().collect(),
            }
        })
    }

    #[inline]
    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// Reduces a lowercase token to its noun lemma.
    ///
    /// The exception table is consulted before any suffix rule: it holds
    /// irregular plurals, `-ie` and `-che` nouns and words that do not change
    /// in the plural. Everything else is detached by suffix. Tokens of three bytes or fewer and words ending in
    /// `ss`, `us` or `is` are returned unchanged.
    pub fn lemmatize<'a>(&self, token: &'a str) -> Cow<'a, str> {
        if let Some(&lemma) = self.irregular.get(token) {
            return Cow::Borrowed(lemma);
        }
        if token.len() <= 3 || !token.ends_with('s') {
            return Cow::Borrowed(token);
        }
        if token.ends_with("ss") || token.ends_with("us") || token.ends_with("is") {
            return Cow::Borrowed(token);
        }
        if let Some(stem) = token.strip_suffix("ies") {
            if stem.len() >= 2 {
                return Cow::Owned(format!("{stem}y"));
            }
        }
        for suffix in ["sses", "ches", "shes", "xes", "zes"] {
            if token.ends_with(suffix) {
                return Cow::Borrowed(&token[..token.len() - 2]);
            }
        }
        Cow::Borrowed(&token[..token.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_is_shared() {
        let a = Lexicon::global() as *const Lexicon;
        let b = Lexicon::global() as *const Lexicon;
        assert_eq!(a, b);
    }

    #[test]
    fn test_stop_words() {
        let lex = Lexicon::global();
        assert!(lex.is_stop_word("the"));
        assert!(lex.is_stop_word("and"));
        assert!(lex.is_stop_word("s"));
        assert!(!lex.is_stop_word("acme"));
        assert!(!lex.is_stop_word("The"));
    }

    #[test]
    fn test_regular_plurals() {
        let lex = Lexicon::global();
        assert_eq!(lex.lemmatize("services"), "service");
        assert_eq!(lex.lemmatize("companies"), "company");
        assert_eq!(lex.lemmatize("boxes"), "box");
        assert_eq!(lex.lemmatize("branches"), "branch");
        assert_eq!(lex.lemmatize("brushes"), "brush");
        assert_eq!(lex.lemmatize("addresses"), "address");
        assert_eq!(lex.lemmatize("supplies"), "supply");
    }

    #[test]
    fn test_words_left_alone() {
        let lex = Lexicon::global();
        assert_eq!(lex.lemmatize("business"), "business");
        assert_eq!(lex.lemmatize("status"), "status");
        assert_eq!(lex.lemmatize("basis"), "basis");
        assert_eq!(lex.lemmatize("gas"), "gas");
        assert_eq!(lex.lemmatize("acme"), "acme");
    }

    #[test]
    fn test_ie_and_che_nouns_match_singular() {
        let lex = Lexicon::global();
        for (plural, singular) in [
            ("movies", "movie"),
            ("cookies", "cookie"),
            ("ties", "tie"),
            ("pies", "pie"),
            ("calories", "calorie"),
            ("niches", "niche"),
            ("caches", "cache"),
            ("aches", "ache"),
        ] {
            assert_eq!(lex.lemmatize(plural), singular);
            assert_eq!(lex.lemmatize(singular), singular);
        }
    }

    #[test]
    fn test_invariant_nouns() {
        let lex = Lexicon::global();
        assert_eq!(lex.lemmatize("series"), "series");
        assert_eq!(lex.lemmatize("species"), "species");
        assert_eq!(lex.lemmatize("news"), "news");
    }

    #[test]
    fn test_irregular_plurals() {
        let lex = Lexicon::global();
        assert_eq!(lex.lemmatize("children"), "child");
        assert_eq!(lex.lemmatize("women"), "woman");
        assert_eq!(lex.lemmatize("knives"), "knife");
        assert!(matches!(lex.lemmatize("people"), Cow::Borrowed("person")));
    }
}
