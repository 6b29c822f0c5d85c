//! The compression module ties the coding stages together.
//!
//! Compression happens in the following steps:
//! - Frequency count: tally every byte value in the input.
//! - Code construction: build a Huffman or Shannon-Fano code table from the counts.
//! - Packing: concatenate the code of every input byte and pack the bits into bytes.
//! - Container: write the magic tag, original length, dictionary, then the packed payload.
//!
//! Decompression reads the container back, rebuilds the code -> symbol map from the dictionary and
//! walks the payload bit by bit until the original number of bytes has been recovered.
//!
//! Everything happens in memory. File based operations read the whole input first and only create
//! the output once the in-memory work has succeeded, so a failed operation never leaves a partial
//! output file behind.
//!
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use crate::error::PackError;

pub mod compress;
pub mod container;
pub mod decompress;

/// Sizes reported after a file operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub input_size: u64,
    pub output_size: u64,
}

impl Stats {
    /// Output size as a percentage of input size.
    pub fn ratio(&self) -> f64 {
        if self.input_size == 0 {
            return 0.0;
        }
        self.output_size as f64 / self.input_size as f64 * 100.0
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} bytes in, {} bytes out ({:.2}%)",
            self.input_size,
            self.output_size,
            self.ratio()
        )
    }
}

pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>, PackError> {
    fs::read(path).map_err(|source| PackError::InputIo {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write_output(path: &Path, data: &[u8]) -> Result<(), PackError> {
    fs::write(path, data).map_err(|source| PackError::OutputIo {
        path: path.to_path_buf(),
        source,
    })
}
