use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Empty catalog: cannot fit a vector space on zero suppliers")]
    EmptyCatalog,

    #[error("Empty vocabulary: no supplier name produced a single vocabulary unit")]
    EmptyVocabulary,

    #[error("Empty query: invoice text normalizes to zero tokens")]
    EmptyQuery,

    #[error("Duplicate supplier id: {0}")]
    DuplicateSupplierId(String),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
