//! Word-span fragment generation for invoice queries.
//!
//! A normalized invoice is split on whitespace and every contiguous span of
//! `k` words, for each `k` in the configured range, becomes a separate query
//! document. Spans of the smaller size come first.
//!
//! ## Span boundary
//!
//! For `L` words and span size `k` the start index runs over `0..L-k`, so
//! the span ending on the last word is never emitted. A 4-word text with
//! `k = 3` yields exactly one span, and a text of exactly `k` words yields
//! none of that size.

/// Generates word-span fragments of every size in `min_n..=max_n`.
///
/// # Example
///
/// ```
/// use supplier_match_core::ngram::word_spans;
///
/// let spans = word_spans("acme corp inc usa", (3, 4));
/// assert_eq!(spans, vec!["acme corp inc"]);
/// ```
pub fn word_spans(normalized: &str, (min_n, max_n): (usize, usize)) -> Vec<String> {
    let words: Vec<&str> = normalized.split_whitespace().collect();
    let mut spans = Vec::with_capacity(span_count(words.len(), (min_n, max_n)));

    for k in min_n..=max_n {
        for start in 0..words.len().saturating_sub(k) {
            spans.push(words[start..start + k].join(" "));
        }
    }
    spans
}

/// Number of spans [`word_spans`] emits for `words` words.
#[inline]
pub fn span_count(words: usize, (min_n, max_n): (usize, usize)) -> usize {
    (min_n..=max_n).map(|k| words.saturating_sub(k)).sum()
}
