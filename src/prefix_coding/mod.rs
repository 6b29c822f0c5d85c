//! The prefix_coding module builds the code tables used by both container formats.
//!
//! Two classical builders are provided:
//! - huffman: greedy bottom-up merging of the two lightest nodes.
//! - shannon_fano: top-down splitting of a frequency sorted symbol list.
//!
//! Both produce a `CodeTable` mapping each byte of the alphabet to a non-empty `Code`. For alphabets
//! of two or more symbols the codes are prefix free. A one symbol alphabet gets the single bit code
//! `0`, since an empty code could not be written to (or recovered from) the bitstream.
//!
//! Tie-breaking is deterministic in both builders, so the same input always yields the same table
//! and therefore the same compressed bytes.
//!
use std::fmt::{Display, Formatter};

use rustc_hash::FxHashMap;

pub mod huffman;
pub mod shannon_fano;

/// A byte value together with how often it occurs in the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub value: u8,
    pub freq: u64,
}

/// A variable length bit code. Bits are kept in the order they are written to the stream.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    /// Append one bit to the end of the code.
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Return a copy of this code extended by one bit.
    pub fn child(&self, bit: bool) -> Self {
        let mut code = self.clone();
        code.push(bit);
        code
    }

    pub fn clear(&mut self) {
        self.bits.clear();
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// True if every bit of self matches the start of other.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }

    /// Parse the textual form used in the container dictionary. Returns None on any byte other
    /// than `'0'` or `'1'`.
    pub fn from_ascii(text: &[u8]) -> Option<Self> {
        text.iter()
            .map(|&c| match c {
                b'0' => Some(false),
                b'1' => Some(true),
                _ => None,
            })
            .collect::<Option<Vec<bool>>>()
            .map(|bits| Self { bits })
    }

    /// One ASCII `'0'`/`'1'` per bit.
    pub fn to_ascii(&self) -> Vec<u8> {
        self.bits
            .iter()
            .map(|&bit| if bit { b'1' } else { b'0' })
            .collect()
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for bit in self.bits() {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Mapping from byte value to code. Indexed by symbol, so iteration is always in byte order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self {
            codes: vec![None; 256],
        }
    }

    /// Set the code for a symbol, returning the code it replaced (if any).
    pub fn insert(&mut self, symbol: u8, code: Code) -> Option<Code> {
        self.codes[symbol as usize].replace(code)
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Number of symbols with a code (the alphabet size).
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|code| code.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(|code| code.is_none())
    }

    /// Iterate (symbol, code) pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|code| (symbol as u8, code)))
    }

    /// Length of the longest code, or 0 for an empty table.
    pub fn max_len(&self) -> usize {
        self.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }

    /// True if no code in the table is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes = self.iter().map(|(_, code)| code).collect::<Vec<_>>();
        // After sorting, any code that prefixes another sorts directly before some code it prefixes.
        codes.sort_unstable();
        codes.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }

    /// Total bits needed to encode data with these frequencies: the sum of freq * code length.
    pub fn encoded_bits(&self, freqs: &[u64; 256]) -> u64 {
        self.iter()
            .map(|(symbol, code)| freqs[symbol as usize] * code.len() as u64)
            .sum()
    }

    /// Reverse lookup used by the decoder.
    pub fn inverse(&self) -> FxHashMap<Code, u8> {
        self.iter()
            .map(|(symbol, code)| (code.clone(), symbol))
            .collect()
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// The two code construction schemes. Each has its own magic tag in the container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Algorithm {
    /// Bottom-up merge tree (magic "HUFF")
    Huffman,
    /// Top-down frequency split (magic "SFAN")
    ShannonFano,
}

impl Algorithm {
    /// Four byte tag written at the start of every container.
    pub fn magic(&self) -> &'static [u8; 4] {
        match self {
            Algorithm::Huffman => b"HUFF",
            Algorithm::ShannonFano => b"SFAN",
        }
    }

    pub fn from_magic(magic: &[u8]) -> Option<Self> {
        [Algorithm::Huffman, Algorithm::ShannonFano]
            .into_iter()
            .find(|algorithm| algorithm.magic().as_slice() == magic)
    }

    /// Default file extension for containers of this kind.
    pub fn extension(&self) -> &'static str {
        match self {
            Algorithm::Huffman => "huf",
            Algorithm::ShannonFano => "sfn",
        }
    }

    /// Build a code table for the alphabet using this algorithm.
    pub fn build_table(&self, symbols: &[Symbol]) -> CodeTable {
        match self {
            Algorithm::Huffman => huffman::huffman_table(symbols),
            Algorithm::ShannonFano => shannon_fano::shannon_fano_table(symbols),
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Huffman => write!(f, "Huffman"),
            Algorithm::ShannonFano => write!(f, "Shannon-Fano"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn code(text: &str) -> Code {
        Code::from_ascii(text.as_bytes()).unwrap()
    }

    #[test]
    fn code_text_test() {
        let c = code("0110");
        assert_eq!(c.len(), 4);
        assert_eq!(c.to_string(), "0110");
        assert_eq!(c.to_ascii(), b"0110".to_vec());
        assert_eq!(Code::from_ascii(b"01x"), None);
        assert!(Code::from_ascii(b"").unwrap().is_empty());
    }

    #[test]
    fn prefix_test() {
        assert!(code("01").is_prefix_of(&code("011")));
        assert!(!code("011").is_prefix_of(&code("01")));
        assert!(!code("10").is_prefix_of(&code("011")));
    }

    #[test]
    fn prefix_free_table_test() {
        let mut table = CodeTable::new();
        table.insert(b'a', code("0"));
        table.insert(b'b', code("10"));
        table.insert(b'c', code("11"));
        assert!(table.is_prefix_free());

        // 'a' sorts first, but it is 'b' that prefixes 'd'
        table.insert(b'd', code("100"));
        assert!(!table.is_prefix_free());
    }

    #[test]
    fn table_order_and_bits_test() {
        let mut table = CodeTable::new();
        table.insert(b'z', code("1"));
        table.insert(b'a', code("01"));
        table.insert(b'm', code("00"));
        let symbols = table.iter().map(|(s, _)| s).collect::<Vec<_>>();
        assert_eq!(symbols, vec![b'a', b'm', b'z']);
        assert_eq!(table.len(), 3);
        assert_eq!(table.max_len(), 2);

        let mut freqs = [0_u64; 256];
        freqs[b'a' as usize] = 5;
        freqs[b'm' as usize] = 1;
        freqs[b'z' as usize] = 7;
        assert_eq!(table.encoded_bits(&freqs), 5 * 2 + 2 + 7);

        let inverse = table.inverse();
        assert_eq!(inverse.get(&code("00")), Some(&b'm'));
        assert_eq!(inverse.get(&code("0")), None);
    }

    #[test]
    fn magic_test() {
        assert_eq!(Algorithm::from_magic(b"HUFF"), Some(Algorithm::Huffman));
        assert_eq!(Algorithm::from_magic(b"SFAN"), Some(Algorithm::ShannonFano));
        assert_eq!(Algorithm::from_magic(b"BZh9"), None);
        assert_eq!(Algorithm::from_magic(b"HUF"), None);
    }
}
