use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Catalog is missing required column {0:?}")]
    MissingColumn(&'static str),

    #[error("Malformed invoice at line {line}: {reason}")]
    MalformedInvoice { line: usize, reason: String },

    #[error("Invoice record {record}: missing field {field:?}")]
    MissingField { record: usize, field: &'static str },

    #[error("Invoice record {record}: invalid field {field:?}: {reason}")]
    InvalidField {
        record: usize,
        field: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Core(#[from] supplier_match_core::Error),
}
