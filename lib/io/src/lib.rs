//! # supplier-match IO
//!
//! Readers for the two inputs of a run:
//!
//! - [`read_catalog`] - Supplier catalog CSV (`Id`, `SupplierName`)
//! - [`read_invoice`] - OCR word list, one Python dict literal per word

pub mod catalog;
pub mod error;
pub mod invoice;

pub use catalog::{parse_catalog, read_catalog};
pub use error::{Error, Result};
pub use invoice::{parse_invoice, read_invoice};
