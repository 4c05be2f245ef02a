use serde::{Deserialize, Serialize};

/// One OCR-recognized word with its position in the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceWord {
    pub page_id: u32,
    pub line_id: u32,
    pub pos_id: u32,
    pub word: String,
}

impl InvoiceWord {
    #[inline]
    #[must_use]
    pub fn new(page_id: u32, line_id: u32, pos_id: u32, word: impl Into<String>) -> Self {
        Self {
            page_id,
            line_id,
            pos_id,
            word: word.into(),
        }
    }

    /// Reading-order key
    #[inline]
    pub fn position(&self) -> (u32, u32, u32) {
        (self.page_id, self.line_id, self.pos_id)
    }
}

/// Rebuilds the invoice text in reading order.
///
/// OCR emission order is not reading order: words are stably sorted by
/// `(page_id, line_id, pos_id)` and joined with single spaces.
pub fn reconstruct_text(words: &[InvoiceWord]) -> String {
    let mut ordered: Vec<&InvoiceWord> = words.iter().collect();
    ordered.sort_by_key(|w| w.position());

    let mut text = String::with_capacity(words.iter().map(|w| w.word.len() + 1).sum());
    for (i, w) in ordered.iter().enumerate() {
        if i > 0 {
            text.push(' ');
        }
        text.push_str(&w.word);
    }
    text
}
