//! # supplier-match
//!
//! Resolves the supplier of an OCR-scanned invoice by matching the invoice
//! text against a catalog of known supplier names.
//!
//! The catalog names are normalized and a TF-IDF vector space is fitted on
//! them once. The invoice text goes through the same normalization, is cut
//! into query fragments and projected into the fitted space, and the
//! supplier nearest to any fragment wins.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! supplier-match -i invoice.txt -s suppliernames.txt
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use supplier_match::prelude::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let catalog = read_catalog("suppliernames.txt")?;
//! let words = read_invoice("invoice.txt")?;
//!
//! let resolver = Resolver::new(MatchConfig::default())?
//!     .load_catalog(catalog)
//!     .fit()?;
//! let resolution = resolver.resolve_words(&words)?;
//! println!("{}", resolution.result);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! - `supplier-match-core` - Normalizer, n-grams, TF-IDF space, neighbor index, resolver
//! - `supplier-match-io` - Catalog CSV and OCR invoice readers
//!
//! ## Policies
//!
//! - **CharNgram** (default): character cleaning, word-bounded character
//!   3-4 grams, invoice queried as word-span fragments
//! - **WordNgram**: stop-word removal and lemmatization, word 1-4 grams,
//!   invoice queried as one document

// Re-export core types
pub use supplier_match_core::{
    reconstruct_text, Analyzer, Catalog, Distance, Error, FittedResolver, InvoiceWord,
    LoadedResolver, MatchConfig, MatchResult, NeighborIndex, Policy, Resolution, Resolver,
    Result, SparseVector, SupplierRecord, TextNormalizer, VectorSpace,
};

// Re-export readers
pub use supplier_match_io::{parse_catalog, parse_invoice, read_catalog, read_invoice};

/// Input errors
pub mod io {
    pub use supplier_match_io::{Error, Result};
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        read_catalog, read_invoice, reconstruct_text, Catalog, Distance, FittedResolver,
        InvoiceWord, MatchConfig, MatchResult, Policy, Resolution, Resolver, SupplierRecord,
        TextNormalizer,
    };
}
