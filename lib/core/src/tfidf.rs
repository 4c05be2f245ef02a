//! TF-IDF vector space over normalized supplier names.
//!
//! A [`VectorSpace`] is fitted once on the catalog corpus and then reused to
//! project every query, so supplier and invoice vectors share one vocabulary
//! and one set of IDF weights. Units absent from the fitted vocabulary are
//! ignored at transform time.
//!
//! Weighting:
//!
//! ```text
//! idf(t)    = ln((1 + n) / (1 + df(t))) + 1
//! w(t, d)   = count(t, d) * idf(t)
//! vector(d) = w(., d) / ||w(., d)||
//! ```

use crate::config::{MatchConfig, Policy};
use crate::vector::SparseVector;
use crate::{Error, Result};
use ahash::AHashMap;
use smallvec::SmallVec;

/// How a document is cut into vocabulary units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analyzer {
    /// Character n-grams that never cross a word boundary. Each word is
    /// padded with one space on both sides before windows are taken.
    CharWordBounded { min_n: usize, max_n: usize },
    /// Contiguous spans of word tokens (runs of two or more word characters).
    WordNgram { min_n: usize, max_n: usize },
}

impl Analyzer {
    pub fn from_config(config: &MatchConfig) -> Self {
        let (min_n, max_n) = config.analyzer_range();
        match config.policy {
            Policy::CharNgram => Analyzer::CharWordBounded { min_n, max_n },
            Policy::WordNgram => Analyzer::WordNgram { min_n, max_n },
        }
    }

    /// Emits every unit of `doc`, repeated units included.
    pub fn analyze<F>(&self, doc: &str, mut emit: F)
    where
        F: FnMut(&str),
    {
        match *self {
            Analyzer::CharWordBounded { min_n, max_n } => {
                let mut padded = String::new();
                for word in doc.split_whitespace() {
                    padded.clear();
                    padded.push(' ');
                    padded.push_str(word);
                    padded.push(' ');
                    char_windows(&padded, min_n, max_n, &mut emit);
                }
            }
            Analyzer::WordNgram { min_n, max_n } => {
                let tokens: Vec<&str> = doc
                    .split(|c: char| !(c.is_alphanumeric() || c == '_'))
                    .filter(|t| t.chars().nth(1).is_some())
                    .collect();
                let mut span = String::new();
                for n in min_n.max(1)..=max_n.min(tokens.len()) {
                    for window in tokens.windows(n) {
                        span.clear();
                        for (i, token) in window.iter().enumerate() {
                            if i > 0 {
                                span.push(' ');
                            }
                            span.push_str(token);
                        }
                        emit(&span);
                    }
                }
            }
        }
    }
}

/// Windows of `min_n..=max_n` characters over one padded word. A word no
/// longer than the window is emitted once, whole, and larger windows are
/// skipped for it.
fn char_windows<F>(word: &str, min_n: usize, max_n: usize, emit: &mut F)
where
    F: FnMut(&str),
{
    let bounds: SmallVec<[usize; 32]> = word
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(word.len()))
        .collect();
    let len = bounds.len() - 1;

    for n in min_n.max(1)..=max_n {
        let mut offset = 0;
        emit(&word[..bounds[n.min(len)]]);
        while offset + n < len {
            offset += 1;
            emit(&word[bounds[offset]..bounds[offset + n]]);
        }
        if offset == 0 {
            break;
        }
    }
}

/// A fitted TF-IDF model: vocabulary plus per-unit IDF weights.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    analyzer: Analyzer,
    vocabulary: AHashMap<String, u32>,
    terms: Vec<String>,
    idf: Vec<f32>,
}

impl VectorSpace {
    /// Fits the space on `corpus`.
    ///
    /// # Errors
    ///
    /// `EmptyCatalog` for an empty corpus, `EmptyVocabulary` when no document
    /// yields a single unit.
    pub fn fit<S: AsRef<str>>(analyzer: Analyzer, corpus: &[S]) -> Result<Self> {
        Self::fit_transform(analyzer, corpus).map(|(space, _)| space)
    }

    /// Fits the space and returns the corpus vectors in corpus order.
    pub fn fit_transform<S: AsRef<str>>(
        analyzer: Analyzer,
        corpus: &[S],
    ) -> Result<(Self, Vec<SparseVector>)> {
        if corpus.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        let counts: Vec<AHashMap<String, u32>> = corpus
            .iter()
            .map(|doc| count_units(&analyzer, doc.as_ref()))
            .collect();

        let mut doc_freq: AHashMap<&str, u32> = AHashMap::new();
        for doc in &counts {
            for term in doc.keys() {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        if doc_freq.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let mut terms: Vec<String> = doc_freq.keys().map(|t| t.to_string()).collect();
        terms.sort_unstable();

        let n_docs = corpus.len() as f64;
        let idf: Vec<f32> = terms
            .iter()
            .map(|t| {
                let df = f64::from(doc_freq[t.as_str()]);
                (((1.0 + n_docs) / (1.0 + df)).ln() + 1.0) as f32
            })
            .collect();
        let vocabulary: AHashMap<String, u32> = terms
            .iter()
            .enumerate()
            .map(|(col, t)| (t.clone(), col as u32))
            .collect();

        let space = Self {
            analyzer,
            vocabulary,
            terms,
            idf,
        };
        let vectors = counts
            .iter()
            .map(|doc| space.weigh(doc.iter().map(|(t, &c)| (t.as_str(), c))))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            documents = corpus.len(),
            vocabulary = space.dim(),
            "fitted tf-idf vector space"
        );
        Ok((space, vectors))
    }

    /// Projects documents into the fitted space.
    pub fn transform<S: AsRef<str>>(&self, docs: &[S]) -> Result<Vec<SparseVector>> {
        docs.iter().map(|doc| self.transform_one(doc.as_ref())).collect()
    }

    pub fn transform_one(&self, doc: &str) -> Result<SparseVector> {
        let counts = count_units(&self.analyzer, doc);
        self.weigh(counts.iter().map(|(t, &c)| (t.as_str(), c)))
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn analyzer(&self) -> Analyzer {
        self.analyzer
    }

    /// Column of `term`, if it is in the vocabulary
    pub fn column(&self, term: &str) -> Option<u32> {
        self.vocabulary.get(term).copied()
    }

    /// Vocabulary units in column order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.column(term).map(|col| self.idf[col as usize])
    }

    fn weigh<'a, I>(&self, counts: I) -> Result<SparseVector>
    where
        I: Iterator<Item = (&'a str, u32)>,
    {
        let entries: Vec<(u32, f32)> = counts
            .filter_map(|(term, count)| {
                self.column(term)
                    .map(|col| (col, count as f32 * self.idf[col as usize]))
            })
            .collect();
        let mut vector = SparseVector::from_entries(self.dim(), entries)?;
        vector.normalize();
        Ok(vector)
    }
}

fn count_units(analyzer: &Analyzer, doc: &str) -> AHashMap<String, u32> {
    let mut counts: AHashMap<String, u32> = AHashMap::new();
    analyzer.analyze(doc, |unit| {
        if let Some(c) = counts.get_mut(unit) {
            *c += 1;
        } else {
            counts.insert(unit.to_string(), 1);
        }
    });
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(analyzer: Analyzer, doc: &str) -> Vec<String> {
        let mut out = Vec::new();
        analyzer.analyze(doc, |u| out.push(u.to_string()));
        out
    }

    const CHAR_3_4: Analyzer = Analyzer::CharWordBounded { min_n: 3, max_n: 4 };

    #[test]
    fn test_char_windows_padded() {
        assert_eq!(
            units(CHAR_3_4, "acme"),
            vec![" ac", "acm", "cme", "me ", " acm", "acme", "cme "]
        );
    }

    #[test]
    fn test_char_windows_do_not_cross_words() {
        let all = units(CHAR_3_4, "ab cd");
        assert!(all.iter().all(|u| !u.contains("b c")));
        assert!(all.contains(&" ab".to_string()));
        assert!(all.contains(&" cd ".to_string()));
    }

    #[test]
    fn test_short_word_emitted_once() {
        // " a " has three characters: one window of size 3, size 4 skipped.
        assert_eq!(units(CHAR_3_4, "a"), vec![" a "]);
        // " ab " has four: two trigrams then the whole word once.
        assert_eq!(units(CHAR_3_4, "ab"), vec![" ab", "ab ", " ab "]);
    }

    #[test]
    fn test_word_ngrams() {
        let analyzer = Analyzer::WordNgram { min_n: 1, max_n: 4 };
        assert_eq!(
            units(analyzer, "acme office supply"),
            vec![
                "acme",
                "office",
                "supply",
                "acme office",
                "office supply",
                "acme office supply"
            ]
        );
        // Single-character tokens are not units.
        assert_eq!(units(analyzer, "a b acme"), vec!["acme"]);
    }

    #[test]
    fn test_fit_empty_corpus() {
        let corpus: Vec<&str> = Vec::new();
        assert!(matches!(
            VectorSpace::fit(CHAR_3_4, &corpus),
            Err(Error::EmptyCatalog)
        ));
    }

    #[test]
    fn test_fit_empty_vocabulary() {
        assert!(matches!(
            VectorSpace::fit(CHAR_3_4, &["", "   "]),
            Err(Error::EmptyVocabulary)
        ));
    }

    #[test]
    fn test_idf_smoothing() {
        let analyzer = Analyzer::WordNgram { min_n: 1, max_n: 1 };
        let space = VectorSpace::fit(analyzer, &["acme corp", "beta corp"]).unwrap();
        assert_eq!(space.terms(), &["acme", "beta", "corp"]);

        // corp appears everywhere: ln(3/3) + 1
        assert!((space.idf("corp").unwrap() - 1.0).abs() < 1e-6);
        // acme appears once: ln(3/2) + 1
        let expected = (1.5f64.ln() + 1.0) as f32;
        assert!((space.idf("acme").unwrap() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let (_, vectors) =
            VectorSpace::fit_transform(CHAR_3_4, &["acme corp", "beta industries", "gamma"])
                .unwrap();
        for v in &vectors {
            assert!((v.norm() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_transform_ignores_unknown_units() {
        let space = VectorSpace::fit(CHAR_3_4, &["acme corp"]).unwrap();
        let dim = space.dim();

        let unknown = space.transform_one("zzz qqq").unwrap();
        assert!(unknown.is_zero());
        assert_eq!(space.dim(), dim);

        let known = space.transform_one("acme").unwrap();
        assert!(!known.is_zero());
        assert_eq!(known.dim(), dim);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let corpus = ["acme corp", "acme industries", "beta supply co", "delta"];
        let (a_space, a) = VectorSpace::fit_transform(CHAR_3_4, &corpus).unwrap();
        let (b_space, b) = VectorSpace::fit_transform(CHAR_3_4, &corpus).unwrap();
        assert_eq!(a_space.terms(), b_space.terms());
        assert_eq!(a, b);
    }

    #[test]
    fn test_transform_matches_fit_vectors() {
        let corpus = ["acme corp", "beta supply"];
        let (space, fitted) = VectorSpace::fit_transform(CHAR_3_4, &corpus).unwrap();
        let projected = space.transform(&corpus).unwrap();
        assert_eq!(fitted, projected);
    }
}
