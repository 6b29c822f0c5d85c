//! Lossless file compression with classical prefix codes.
//!
//! Two code builders are available, Huffman and Shannon-Fano. Both feed the same container
//! format: a four byte magic tag naming the algorithm, the original length, a dictionary
//! of codes stored as ASCII '0'/'1' text, and the packed payload.
//!
//! Code construction is deterministic, so compressing the same input twice gives identical
//! output. Every symbol gets a non-empty code, including the lone symbol of a one byte alphabet.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> prefixzip -a shannon-fano test.txt`
//!
//! This will compress the file and create the file test.txt.sfn. `prefixzip -d test.txt.sfn`
//! restores test.txt.
//!
//! The same operations are available on buffers:
//!
//! ```
//! use prefixzip::{compress, decompress, Algorithm};
//!
//! let packed = compress(b"AABBBCCCC", Algorithm::Huffman).unwrap();
//! assert_eq!(&packed[..4], b"HUFF");
//! assert_eq!(decompress(&packed).unwrap(), b"AABBBCCCC");
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod prefix_coding;
pub mod tools;

pub use compression::compress::{compress, compress_file};
pub use compression::decompress::{decompress, decompress_as, decompress_file};
pub use compression::Stats;
pub use error::{Malformed, PackError};
pub use prefix_coding::{Algorithm, Code, CodeTable, Symbol};
