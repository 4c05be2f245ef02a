//! Resolution driver.
//!
//! The pipeline is a chain of owned stages, each only constructible from the
//! previous one:
//!
//! ```text
//! Resolver (idle) --load_catalog--> LoadedResolver --fit--> FittedResolver --resolve--> Resolution
//! ```
//!
//! A [`FittedResolver`] holds the vector space and neighbor index for the
//! lifetime of the run. Every `resolve` call projects its query through that
//! same space; nothing is refitted.

use crate::catalog::{Catalog, MatchResult};
use crate::config::{MatchConfig, Policy};
use crate::index::NeighborIndex;
use crate::invoice::{reconstruct_text, InvoiceWord};
use crate::ngram::word_spans;
use crate::normalizer::TextNormalizer;
use crate::tfidf::{Analyzer, VectorSpace};
use crate::{Error, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Outcome of resolving one invoice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub result: MatchResult,
    /// Catalog row of the matched supplier
    pub row: usize,
    /// Query fragment whose neighbor was closest overall
    pub fragment: String,
    pub distance: f32,
    /// Number of fragments queried
    pub fragments: usize,
}

/// Idle stage: configuration only.
#[derive(Debug, Clone)]
pub struct Resolver {
    config: MatchConfig,
}

impl Resolver {
    /// # Errors
    ///
    /// `InvalidConfig` when a gram range is empty or starts at zero.
    pub fn new(config: MatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn load_catalog(self, catalog: Catalog) -> LoadedResolver {
        info!(suppliers = catalog.len(), policy = ?self.config.policy, "catalog loaded");
        LoadedResolver {
            config: self.config,
            catalog,
        }
    }
}

/// Catalog loaded, vector space not yet fitted.
#[derive(Debug, Clone)]
pub struct LoadedResolver {
    config: MatchConfig,
    catalog: Catalog,
}

impl LoadedResolver {
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Normalizes every supplier name, fits the vector space on them and
    /// indexes the resulting vectors.
    ///
    /// # Errors
    ///
    /// `EmptyCatalog` for a catalog without rows, `EmptyVocabulary` when no
    /// normalized name yields a vocabulary unit.
    pub fn fit(self) -> Result<FittedResolver> {
        if self.catalog.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        let normalizer = TextNormalizer::new(self.config.policy);
        let normalized = self.catalog.normalized_names(&normalizer);
        let analyzer = Analyzer::from_config(&self.config);
        let (space, vectors) = VectorSpace::fit_transform(analyzer, &normalized)?;
        let index = NeighborIndex::build(&vectors, self.config.distance)?;

        let empty_rows: Vec<usize> = vectors
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_zero())
            .map(|(row, _)| row)
            .collect();
        if !empty_rows.is_empty() {
            warn!(
                rows = ?empty_rows,
                "supplier names without vocabulary units; these rows attract unknown invoice text"
            );
        }

        info!(
            suppliers = self.catalog.len(),
            vocabulary = space.dim(),
            "vector space fitted"
        );
        Ok(FittedResolver {
            config: self.config,
            normalizer,
            catalog: self.catalog,
            normalized,
            space,
            index,
        })
    }
}

/// Vector space fitted and indexed; ready to resolve invoices.
#[derive(Debug, Clone)]
pub struct FittedResolver {
    config: MatchConfig,
    normalizer: TextNormalizer,
    catalog: Catalog,
    normalized: Vec<String>,
    space: VectorSpace,
    index: NeighborIndex,
}

impl FittedResolver {
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Normalized supplier names in catalog row order
    pub fn normalized_names(&self) -> &[String] {
        &self.normalized
    }

    pub fn space(&self) -> &VectorSpace {
        &self.space
    }

    /// Query documents for an already-normalized invoice text.
    ///
    /// CharNgram queries are the word-span fragments of the text, or the
    /// whole text when it is too short to yield any. WordNgram queries are
    /// the whole text.
    pub fn fragments(&self, normalized: &str) -> Vec<String> {
        match self.config.policy {
            Policy::CharNgram => {
                let spans = word_spans(normalized, self.config.fragment_range);
                if spans.is_empty() {
                    vec![normalized.to_string()]
                } else {
                    spans
                }
            }
            Policy::WordNgram => vec![normalized.to_string()],
        }
    }

    /// Resolves raw invoice text to the closest catalog supplier.
    ///
    /// # Errors
    ///
    /// `EmptyQuery` when the text normalizes to zero tokens.
    pub fn resolve(&self, invoice_text: &str) -> Result<Resolution> {
        let normalized = self.normalizer.normalize(invoice_text);
        if normalized.split_whitespace().next().is_none() {
            return Err(Error::EmptyQuery);
        }

        let fragments = self.fragments(&normalized);
        let queries = self.space.transform(&fragments)?;
        debug!(
            fragments = fragments.len(),
            empty = queries.iter().filter(|q| q.is_zero()).count(),
            "projected invoice fragments"
        );

        let (fragment, neighbor) = self
            .index
            .nearest_overall(&queries)?
            .ok_or(Error::EmptyQuery)?;
        let record = self.catalog.get(neighbor.row).ok_or(Error::DimensionMismatch {
            expected: self.catalog.len(),
            actual: neighbor.row + 1,
        })?;

        debug!(
            row = neighbor.row,
            distance = neighbor.distance,
            fragment = %fragments[fragment],
            "nearest supplier"
        );
        info!(supplier_id = %record.id, "invoice resolved");

        Ok(Resolution {
            result: MatchResult::from(record),
            row: neighbor.row,
            fragment: fragments[fragment].clone(),
            distance: neighbor.distance,
            fragments: fragments.len(),
        })
    }

    /// Rebuilds the invoice text from OCR words and resolves it.
    pub fn resolve_words(&self, words: &[InvoiceWord]) -> Result<Resolution> {
        self.resolve(&reconstruct_text(words))
    }
}
