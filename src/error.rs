use thiserror::Error;

/// Main error type for the rowtable crate.
/// Aggregates errors from the standard library and the internal modules.
#[derive(Error, Debug)]
pub enum RowTableError {
    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    // Table module errors
    #[error("{0}")]
    TableError(#[from] crate::table::TableError),

    // Codec module errors
    #[error("{0}")]
    CodecError(#[from] crate::codec::CodecError),
}
