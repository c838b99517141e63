//! Deterministic Huffman tree construction
//!
//! The decoder never sees the encoder's tree or codebook, only the ordered
//! frequency table. Both sides therefore run [`HuffmanTree::build`] on the
//! same entries and must arrive at the same shape. Ties on frequency are
//! broken by insertion order: leaves are inserted in table order, merged
//! trees get a fresh, strictly larger sequence number.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::frequency::SymbolFrequency;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: char,
        frequency: u64,
    },
    Internal {
        frequency: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    pub fn frequency(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { frequency, .. } | HuffmanNode::Internal { frequency, .. } => {
                *frequency
            }
        }
    }

    pub fn symbol(&self) -> Option<char> {
        match self {
            HuffmanNode::Leaf { symbol, .. } => Some(*symbol),
            HuffmanNode::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    /// Left and right children of an internal node.
    pub fn children(&self) -> Option<(&HuffmanNode, &HuffmanNode)> {
        match self {
            HuffmanNode::Internal { left, right, .. } => Some((left, right)),
            HuffmanNode::Leaf { .. } => None,
        }
    }

    fn merge(left: HuffmanNode, right: HuffmanNode) -> HuffmanNode {
        HuffmanNode::Internal {
            frequency: left.frequency() + right.frequency(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn size(&self) -> usize {
        match self.children() {
            Some((left, right)) => 1 + left.size() + right.size(),
            None => 1,
        }
    }

    fn height(&self) -> usize {
        match self.children() {
            Some((left, right)) => 1 + left.height().max(right.height()),
            None => 0,
        }
    }
}

/// A subtree waiting in the merge queue.
#[derive(Debug)]
struct Pending {
    frequency: u64,
    order: usize,
    node: HuffmanNode,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    // BinaryHeap is a max-heap: reverse so the lowest (frequency, order) pops first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .frequency
            .cmp(&self.frequency)
            .then_with(|| other.order.cmp(&self.order))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Option<HuffmanNode>,
}

impl HuffmanTree {
    /// Build the tree for `entries`, taken in the given order.
    pub fn build<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a SymbolFrequency>,
    {
        let mut heap: BinaryHeap<Pending> = entries
            .into_iter()
            .enumerate()
            .map(|(order, entry)| Pending {
                frequency: entry.count,
                order,
                node: HuffmanNode::Leaf {
                    symbol: entry.symbol,
                    frequency: entry.count,
                },
            })
            .collect();
        let mut next_order = heap.len();

        while heap.len() > 1 {
            let (Some(a), Some(b)) = (heap.pop(), heap.pop()) else {
                break;
            };
            let node = HuffmanNode::merge(a.node, b.node);
            heap.push(Pending {
                frequency: node.frequency(),
                order: next_order,
                node,
            });
            next_order += 1;
        }

        let tree = HuffmanTree {
            root: heap.pop().map(|pending| pending.node),
        };
        tracing::trace!(nodes = tree.size(), height = tree.height(), "huffman tree built");
        tree
    }

    pub fn root(&self) -> Option<&HuffmanNode> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// True when the tree is a lone leaf, i.e. the input had one distinct symbol.
    pub fn is_single_leaf(&self) -> bool {
        self.root.as_ref().is_some_and(HuffmanNode::is_leaf)
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.root.as_ref().map_or(0, HuffmanNode::size)
    }

    /// Edges on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, HuffmanNode::height)
    }

    /// Total frequency, equal to the symbol count of the source text.
    pub fn frequency(&self) -> u64 {
        self.root.as_ref().map_or(0, HuffmanNode::frequency)
    }

    /// Leaf depths in left-to-right order.
    pub fn code_lengths(&self) -> Vec<(char, usize)> {
        let mut lengths = Vec::new();
        let mut stack: Vec<(&HuffmanNode, usize)> = self.root.iter().map(|n| (n, 0)).collect();
        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, .. } => lengths.push((*symbol, depth)),
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
            }
        }
        lengths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;

    fn leaf(symbol: char, frequency: u64) -> HuffmanNode {
        HuffmanNode::Leaf { symbol, frequency }
    }

    fn node(left: HuffmanNode, right: HuffmanNode) -> HuffmanNode {
        HuffmanNode::merge(left, right)
    }

    fn build(text: &str) -> HuffmanTree {
        HuffmanTree::build(&FrequencyTable::count(text))
    }

    #[test]
    fn test_build_empty() {
        let tree = build("");
        assert!(tree.is_empty());
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.frequency(), 0);
    }

    #[test]
    fn test_build_single_leaf() {
        let tree = build("aaaa");
        assert!(tree.is_single_leaf());
        assert_eq!(tree.root(), Some(&leaf('a', 4)));
        assert_eq!(tree.size(), 1);
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn test_build_shape() {
        // a:3 b:2 c:1 -> merge c,b first, then a with (c,b)
        let tree = build("abacba");
        let expected = node(leaf('a', 3), node(leaf('c', 1), leaf('b', 2)));
        assert_eq!(tree.root(), Some(&expected));
        assert_eq!(tree.frequency(), 6);
        assert_eq!(tree.size(), 5);
    }

    #[test]
    fn test_ties_break_by_insertion_order() {
        // All equal: a,b merge first, then c,d, then the two pairs in creation order.
        let tree = build("abcd");
        let expected = node(
            node(leaf('a', 1), leaf('b', 1)),
            node(leaf('c', 1), leaf('d', 1)),
        );
        assert_eq!(tree.root(), Some(&expected));

        let reversed = build("dcba");
        let expected = node(
            node(leaf('d', 1), leaf('c', 1)),
            node(leaf('b', 1), leaf('a', 1)),
        );
        assert_eq!(reversed.root(), Some(&expected));
    }

    #[test]
    fn test_merged_tree_queues_after_equal_leaf() {
        // a,b merge into (ab):2. The tie between c:2 and (ab):2 goes to c,
        // which was inserted first.
        let table = FrequencyTable::from_entries([('a', 1u64), ('b', 1), ('c', 2), ('d', 5)]).unwrap();
        let tree = HuffmanTree::build(&table);
        let expected = node(
            node(leaf('c', 2), node(leaf('a', 1), leaf('b', 1))),
            leaf('d', 5),
        );
        assert_eq!(tree.root(), Some(&expected));
    }

    #[test]
    fn test_build_is_deterministic() {
        let table = FrequencyTable::count("this is a huffman test");
        assert_eq!(HuffmanTree::build(&table), HuffmanTree::build(&table));
    }

    #[test]
    fn test_internal_frequency_is_sum_of_children() {
        fn check(node: &HuffmanNode) {
            if let Some((left, right)) = node.children() {
                assert_eq!(node.frequency(), left.frequency() + right.frequency());
                check(left);
                check(right);
            }
        }
        let tree = build("the quick brown fox jumps over the lazy dog");
        check(tree.root().unwrap());
        assert_eq!(tree.frequency(), 43);
    }

    #[test]
    fn test_code_lengths() {
        let tree = build("abacba");
        assert_eq!(tree.code_lengths(), vec![('a', 1), ('c', 2), ('b', 2)]);
        assert_eq!(build("zzz").code_lengths(), vec![('z', 0)]);
        assert!(build("").code_lengths().is_empty());
    }
}
