use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, trace};

use super::{Code, CodeTable, Symbol};

/// Merge tree nodes are addressed by their index in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeData {
    Kids(usize, usize),
    Leaf(u8),
}

#[derive(Debug, Clone, Copy)]
struct Node {
    weight: u64,
    node_data: NodeData,
}

/// Heap entry. The arena index doubles as the tie-breaker: leaves are created in symbol order
/// before any merged node, and merged nodes are numbered in the order they are made.
#[derive(Debug, PartialEq, Eq)]
struct Entry {
    weight: u64,
    index: usize,
}

impl Ord for Entry {
    /// Reversed so the BinaryHeap pops the lightest node, lowest index first among equals.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build a Huffman code table for the alphabet. The first node popped in each merge becomes the
/// `0` branch, the second the `1` branch.
pub fn huffman_table(symbols: &[Symbol]) -> CodeTable {
    let mut leaves = symbols.to_vec();
    leaves.sort_by_key(|sym| sym.value);

    let mut arena: Vec<Node> = leaves
        .iter()
        .map(|sym| Node {
            weight: sym.freq,
            node_data: NodeData::Leaf(sym.value),
        })
        .collect();
    let mut heap: BinaryHeap<Entry> = arena
        .iter()
        .enumerate()
        .map(|(index, node)| Entry {
            weight: node.weight,
            index,
        })
        .collect();

    // Pare the heap down to a single root, merging the two lightest nodes each time.
    let root = loop {
        let Some(left) = heap.pop() else {
            return CodeTable::new();
        };
        let Some(right) = heap.pop() else {
            break left.index;
        };
        let weight = left.weight + right.weight;
        arena.push(Node {
            weight,
            node_data: NodeData::Kids(left.index, right.index),
        });
        heap.push(Entry {
            weight,
            index: arena.len() - 1,
        });
    };
    debug!(
        "Huffman tree for {} symbols uses {} nodes, root weight {}",
        leaves.len(),
        arena.len(),
        arena[root].weight
    );

    codes_from_tree(&arena, root)
}

/// Walk the tree depth first and record the path to each leaf as its code.
fn codes_from_tree(arena: &[Node], root: usize) -> CodeTable {
    let mut table = CodeTable::new();
    let mut stack = vec![(root, Code::new())];
    while let Some((index, code)) = stack.pop() {
        match arena[index].node_data {
            NodeData::Kids(left, right) => {
                stack.push((right, code.child(true)));
                stack.push((left, code.child(false)));
            }
            NodeData::Leaf(symbol) => {
                // A lone root leaf would otherwise get an empty code
                let code = if code.is_empty() {
                    code.child(false)
                } else {
                    code
                };
                trace!("{:#04x} -> {}", symbol, code);
                table.insert(symbol, code);
            }
        }
    }
    table
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tools::freq_count::alphabet;

    fn codes_of(table: &CodeTable) -> Vec<(u8, String)> {
        table
            .iter()
            .map(|(sym, code)| (sym, code.to_string()))
            .collect()
    }

    #[test]
    fn aabbbcccc_test() {
        let table = huffman_table(&alphabet(b"AABBBCCCC").unwrap());
        // A(2) and B(3) merge first, then C(4) pairs with their parent (5)
        assert_eq!(
            codes_of(&table),
            vec![
                (b'A', "10".to_string()),
                (b'B', "11".to_string()),
                (b'C', "0".to_string())
            ]
        );
    }

    #[test]
    fn single_symbol_test() {
        let table = huffman_table(&alphabet(b"AAAA").unwrap());
        assert_eq!(codes_of(&table), vec![(b'A', "0".to_string())]);
    }

    #[test]
    fn empty_alphabet_test() {
        assert!(huffman_table(&[]).is_empty());
    }

    #[test]
    fn ties_follow_symbol_order_test() {
        // Input order must not matter, only byte values
        let forward = huffman_table(&[
            Symbol { value: b'x', freq: 1 },
            Symbol { value: b'y', freq: 1 },
        ]);
        let backward = huffman_table(&[
            Symbol { value: b'y', freq: 1 },
            Symbol { value: b'x', freq: 1 },
        ]);
        assert_eq!(forward, backward);
        assert_eq!(forward.get(b'x').unwrap().to_string(), "0");
        assert_eq!(forward.get(b'y').unwrap().to_string(), "1");

        // Four equal weights give a balanced tree in symbol order
        let table = huffman_table(&alphabet(b"dcba").unwrap());
        assert_eq!(
            codes_of(&table),
            vec![
                (b'a', "00".to_string()),
                (b'b', "01".to_string()),
                (b'c', "10".to_string()),
                (b'd', "11".to_string())
            ]
        );
    }

    #[test]
    fn optimal_length_test() {
        // Powers of two weights give code lengths of 1, 2, 3, 4, 4
        let data = [vec![0_u8; 16], vec![1; 8], vec![2; 4], vec![3; 2], vec![4; 1]].concat();
        let table = huffman_table(&alphabet(&data).unwrap());
        let lens = table.iter().map(|(_, c)| c.len()).collect::<Vec<_>>();
        assert_eq!(lens, vec![1, 2, 3, 4, 4]);
    }

    #[test]
    fn prefix_free_test() {
        let data = (0..=255_u8)
            .flat_map(|b| std::iter::repeat(b).take(1 + (b as usize * 7) % 31))
            .collect::<Vec<u8>>();
        let table = huffman_table(&alphabet(&data).unwrap());
        assert_eq!(table.len(), 256);
        assert!(table.is_prefix_free());
        assert!(table.iter().all(|(_, c)| !c.is_empty()));
    }
}
