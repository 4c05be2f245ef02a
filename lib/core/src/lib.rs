//! # supplier-match Core
//!
//! Core library for resolving the supplier of an OCR-scanned invoice
//! against a catalog of known supplier names.
//!
//! The pipeline, leaves first:
//!
//! - [`TextNormalizer`] - Policy-aware cleaning of supplier names and invoice text
//! - [`ngram`] - Word-span fragments used as separate invoice queries
//! - [`VectorSpace`] - TF-IDF model fitted once on the normalized catalog
//! - [`NeighborIndex`] - Exact nearest-neighbor search over sparse vectors
//! - [`Resolver`] - Type-state driver tying the stages together
//!
//! ## Example
//!
//! ```rust
//! use supplier_match_core::{Catalog, MatchConfig, Resolver, SupplierRecord};
//!
//! let catalog = Catalog::new(vec![
//!     SupplierRecord::new("7", "Acme Corp"),
//!     SupplierRecord::new("9", "Globex Industries"),
//! ])
//! .unwrap();
//!
//! let resolver = Resolver::new(MatchConfig::default())
//!     .unwrap()
//!     .load_catalog(catalog)
//!     .fit()
//!     .unwrap();
//!
//! let resolution = resolver.resolve("ACME CORP").unwrap();
//! assert_eq!(resolution.result.to_string(), "(7, 'Acme Corp')");
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod index;
pub mod invoice;
pub mod lexicon;
pub mod ngram;
pub mod normalizer;
pub mod resolver;
pub mod tfidf;
pub mod vector;

pub use catalog::{Catalog, MatchResult, SupplierRecord};
pub use config::{Distance, MatchConfig, Policy};
pub use error::{Error, Result};
pub use index::{Neighbor, NeighborIndex};
pub use invoice::{reconstruct_text, InvoiceWord};
pub use lexicon::Lexicon;
pub use normalizer::TextNormalizer;
pub use resolver::{FittedResolver, LoadedResolver, Resolution, Resolver};
pub use tfidf::{Analyzer, VectorSpace};
pub use vector::SparseVector;
