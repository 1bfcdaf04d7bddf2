use thiserror::Error;

/// Directory-information codec errors
#[derive(Error, Debug)]
pub enum DirInfoError {
    /// Text does not conform to the content-line grammar, or a value cannot
    /// be decoded under its declared encoding.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// A construction or mutation would produce text that does not decode.
    #[error("Unencodeable value: {0}")]
    Unencodeable(String),

    #[error("BEGIN/END mismatch: BEGIN:{begin} closed by END:{end}")]
    MismatchedBeginEnd { begin: String, end: String },

    #[error("END:{0} has no matching BEGIN")]
    UnmatchedEnd(String),

    #[error("BEGIN:{0} is never closed")]
    UnclosedBlock(String),

    /// A recognized format feature that is not implemented.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error(transparent)]
    CoreError(#[from] dirinfo_core::error::CoreError),
}

pub type DirInfoResult<T> = std::result::Result<T, DirInfoError>;
