//! Container layout, all integers big endian:
//!
//! | field           | width          |                                          |
//! |-----------------|----------------|------------------------------------------|
//! | magic           | 4 bytes        | "HUFF" or "SFAN"                         |
//! | original length | u64            | bytes in the uncompressed input          |
//! | entry count     | u16            | 1..=256                                  |
//! | symbol          | u8             | repeated once per entry                  |
//! | code length     | u8             |                                          |
//! | code            | length bytes   | ASCII '0' / '1', one per bit             |
//! | payload         | rest of file   | packed codes, last byte zero padded      |
//!
//! The original length tells the decoder exactly when to stop, so padding bits never turn into a
//! spurious trailing symbol.
//!
use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::bitstream::bitpacker::{BitPacker, Payload};
use crate::bitstream::bitreader::BitReader;
use crate::error::Malformed;
use crate::prefix_coding::{Algorithm, Code, CodeTable};

/// Bytes before the dictionary entries: magic, original length, entry count.
pub const HEADER_LEN: usize = 4 + 8 + 2;

/// A parsed container. The payload borrows from the buffer it was parsed from.
#[derive(Debug)]
pub struct Container<'a> {
    pub algorithm: Algorithm,
    pub original_len: u64,
    pub table: CodeTable,
    /// code -> symbol, rebuilt from the dictionary for the decoder.
    pub inverse: FxHashMap<Code, u8>,
    pub payload: &'a [u8],
}

/// Serialize a container. Dictionary entries go out in ascending symbol order.
pub fn write_container(
    algorithm: Algorithm,
    original_len: u64,
    table: &CodeTable,
    payload: &Payload,
) -> Vec<u8> {
    let dictionary_len = table.iter().map(|(_, code)| 2 + code.len()).sum::<usize>();
    let mut bp = BitPacker::new(HEADER_LEN + dictionary_len + payload.bytes.len());

    bp.out_bytes(algorithm.magic());
    bp.out64(original_len);
    bp.out16(table.len() as u16);
    trace!("Dictionary written at {}", bp.loc());
    for (symbol, code) in table.iter() {
        bp.out8(symbol);
        // Both builders keep codes within alphabet size - 1 bits, so 255 always suffices
        bp.out8(code.len() as u8);
        bp.out_bytes(&code.to_ascii());
    }
    trace!("Payload written at {}", bp.loc());
    bp.out_bytes(&payload.bytes);
    bp.flush();
    debug!(
        "{} container: {} dictionary entries, {} payload bits in {} bytes",
        algorithm,
        table.len(),
        payload.bits,
        payload.bytes.len()
    );
    bp.output
}

impl<'a> Container<'a> {
    /// Parse and validate everything up to the payload. The payload itself is only checked when
    /// it is decoded.
    pub fn parse(data: &'a [u8]) -> Result<Self, Malformed> {
        let magic = &data[..data.len().min(4)];
        let algorithm =
            Algorithm::from_magic(magic).ok_or_else(|| Malformed::BadMagic(magic.to_vec()))?;

        let mut br = BitReader::new(&data[magic.len()..]);
        let original_len = br.bint(64).ok_or(Malformed::Truncated("header"))?;
        let count = br.bint(16).ok_or(Malformed::Truncated("header"))?;
        if !(1..=256).contains(&count) {
            return Err(Malformed::BadEntryCount(count));
        }

        let mut table = CodeTable::new();
        let mut inverse = FxHashMap::default();
        for _ in 0..count {
            let symbol = br.byte().ok_or(Malformed::Truncated("dictionary"))?;
            let len = br.byte().ok_or(Malformed::Truncated("dictionary"))?;
            if len == 0 {
                return Err(Malformed::EmptyCode { symbol });
            }
            let text = br
                .bytes(len as usize)
                .ok_or(Malformed::Truncated("dictionary"))?;
            let code = Code::from_ascii(&text).ok_or(Malformed::BadCodeText { symbol })?;
            if inverse.insert(code.clone(), symbol).is_some() {
                return Err(Malformed::DuplicateCode { code });
            }
            if table.insert(symbol, code).is_some() {
                return Err(Malformed::DuplicateSymbol { symbol });
            }
        }

        // Every field so far is whole bytes, so the reader is still aligned
        let payload = br.rest().unwrap_or_default();
        debug!(
            "Found a valid {} container: {} entries, {} original bytes, {} payload bytes",
            algorithm,
            count,
            original_len,
            payload.len()
        );
        Ok(Self {
            algorithm,
            original_len,
            table,
            inverse,
            payload,
        })
    }
}
