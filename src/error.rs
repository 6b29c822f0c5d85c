//! Error types shared by the compression and decompression paths.
//!
//! Every failure aborts only the operation in progress. Nothing is retried, and the library never
//! panics on bad input: callers get a `PackError` and decide how to report it.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::prefix_coding::{Algorithm, Code};

/// Everything that can go wrong while compressing or decompressing.
#[derive(Debug, Error)]
pub enum PackError {
    /// The source file is missing or unreadable. Nothing was written.
    #[error("cannot read {}: {source}", .path.display())]
    InputIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output file could not be created or written.
    #[error("cannot write {}: {source}", .path.display())]
    OutputIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output file already exists and overwriting was not requested.
    #[error("{} already exists (use --force to overwrite)", .path.display())]
    OutputExists { path: PathBuf },

    /// The source holds zero bytes, so there is no alphabet to build codes from.
    #[error("input is empty, nothing to compress")]
    EmptyInput,

    /// A byte was handed to the packer that the code table knows nothing about.
    #[error("byte {symbol:#04x} has no code in the table")]
    SymbolNotInTable { symbol: u8 },

    /// The container is not one of ours, or it is damaged.
    #[error("malformed container: {0}")]
    MalformedContainer(#[from] Malformed),
}

/// Detail for [`PackError::MalformedContainer`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Malformed {
    #[error("unknown magic tag {0:02x?}")]
    BadMagic(Vec<u8>),

    #[error("expected a {expected} container, found {found}")]
    AlgorithmMismatch {
        expected: Algorithm,
        found: Algorithm,
    },

    #[error("container ends inside the {0}")]
    Truncated(&'static str),

    #[error("dictionary claims {0} entries, expected 1 to 256")]
    BadEntryCount(u64),

    #[error("code for byte {symbol:#04x} is empty")]
    EmptyCode { symbol: u8 },

    #[error("code for byte {symbol:#04x} holds characters other than '0' and '1'")]
    BadCodeText { symbol: u8 },

    #[error("byte {symbol:#04x} appears twice in the dictionary")]
    DuplicateSymbol { symbol: u8 },

    #[error("code {code} is assigned to more than one byte")]
    DuplicateCode { code: Code },

    #[error("payload ran out after {decoded} of {expected} bytes")]
    TruncatedPayload { decoded: u64, expected: u64 },

    #[error("payload bits stop matching any code after {decoded} bytes")]
    UndecodablePayload { decoded: u64 },
}
