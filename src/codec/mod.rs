//! # Delimited Text Codec
//!
//! Round trip between a table and delimiter-separated text (CSV, TSV).
//! Quoting and escaping of separators and line breaks inside field values
//! is delegated entirely to the csv crate; this module only maps records
//! to rows, applies header handling and type inference, and wires file
//! persistence.
use thiserror::Error;

pub(crate) mod delimited;

/// Errors raised while encoding or decoding delimited text.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Malformed delimited text, including records of unequal length
    #[error("{0}")]
    CsvError(#[from] csv::Error),

    #[error("{0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    EncodingError(#[from] std::string::FromUtf8Error),
}
