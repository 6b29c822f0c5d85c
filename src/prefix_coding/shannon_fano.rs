use log::{debug, trace};

use super::{Code, CodeTable, Symbol};

/// Build a Shannon-Fano code table for the alphabet.
///
/// Symbols are sorted by descending frequency (equal frequencies by ascending byte value). Each
/// range of the sorted list is split where the running total first reaches half of the range
/// total: the left part gets a `0`, the right part a `1`, and both parts are split again until
/// they hold a single symbol.
pub fn shannon_fano_table(symbols: &[Symbol]) -> CodeTable {
    let mut partition = symbols.to_vec();
    partition.sort_by(|a, b| b.freq.cmp(&a.freq).then(a.value.cmp(&b.value)));

    let mut codes = vec![Code::new(); partition.len()];
    // Half open ranges still waiting to be split
    let mut pending = vec![(0, partition.len())];
    let mut splits = 0;

    while let Some((start, end)) = pending.pop() {
        if end - start < 2 {
            continue;
        }
        let split = start + split_point(&partition[start..end]);
        codes[start..=split].iter_mut().for_each(|c| c.push(false));
        codes[split + 1..end].iter_mut().for_each(|c| c.push(true));
        pending.push((split + 1, end));
        pending.push((start, split + 1));
        splits += 1;
    }
    debug!(
        "Shannon-Fano split {} symbols {} times",
        partition.len(),
        splits
    );

    let mut table = CodeTable::new();
    for (sym, mut code) in partition.iter().zip(codes) {
        // Only a one symbol alphabet reaches here with an empty code
        if code.is_empty() {
            code.push(false);
        }
        trace!("{:#04x} ({}) -> {}", sym.value, sym.freq, code);
        table.insert(sym.value, code);
    }
    table
}

/// Index of the last symbol in the left part. Always leaves at least one symbol on the right.
fn split_point(range: &[Symbol]) -> usize {
    let half = range.iter().map(|sym| sym.freq).sum::<u64>() / 2;
    let mut running = 0;
    let split = range
        .iter()
        .position(|sym| {
            running += sym.freq;
            running >= half
        })
        .unwrap_or(0);
    split.min(range.len() - 2)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tools::freq_count::alphabet;

    fn sym(value: u8, freq: u64) -> Symbol {
        Symbol { value, freq }
    }

    fn code_of(table: &CodeTable, symbol: u8) -> String {
        table.get(symbol).unwrap().to_string()
    }

    #[test]
    fn aabbbcccc_test() {
        let table = shannon_fano_table(&alphabet(b"AABBBCCCC").unwrap());
        assert_eq!(table.len(), 3);
        assert_eq!(code_of(&table, b'C'), "0");
        assert_eq!(code_of(&table, b'B'), "10");
        assert_eq!(code_of(&table, b'A'), "11");
    }

    #[test]
    fn textbook_test() {
        let table = shannon_fano_table(&[
            sym(b'e', 5),
            sym(b'd', 6),
            sym(b'c', 6),
            sym(b'b', 7),
            sym(b'a', 15),
        ]);
        assert_eq!(code_of(&table, b'a'), "00");
        assert_eq!(code_of(&table, b'b'), "01");
        assert_eq!(code_of(&table, b'c'), "100");
        assert_eq!(code_of(&table, b'd'), "101");
        assert_eq!(code_of(&table, b'e'), "11");
        assert!(table.is_prefix_free());
    }

    #[test]
    fn single_symbol_test() {
        let table = shannon_fano_table(&alphabet(b"AAAA").unwrap());
        assert_eq!(table.len(), 1);
        assert_eq!(code_of(&table, b'A'), "0");
    }

    #[test]
    fn split_point_test() {
        // First index reaching half wins, later ties are ignored
        assert_eq!(split_point(&[sym(0, 2), sym(1, 2), sym(2, 2), sym(3, 2)]), 1);
        assert_eq!(split_point(&[sym(0, 9), sym(1, 1)]), 0);
        // A zero half still leaves the right side populated
        assert_eq!(split_point(&[sym(0, 1), sym(1, 0)]), 0);
    }

    #[test]
    fn prefix_free_test() {
        let data = (0..=255_u8)
            .flat_map(|b| std::iter::repeat(b).take(1 + (b as usize * 13) % 17))
            .collect::<Vec<u8>>();
        let table = shannon_fano_table(&alphabet(&data).unwrap());
        assert_eq!(table.len(), 256);
        assert!(table.is_prefix_free());
        assert!(table.max_len() <= 255);
    }
}
