use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;

use super::priority_queue::PriorityQueue;
use crate::frequency::FrequencyTable;

/// Index of a node inside the arena of a [`HuffmanTree`]
pub type NodeIndex = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Leaf { symbol: u8 },
    /// Internal nodes always own exactly two children
    Internal { left: NodeIndex, right: NodeIndex },
}

/// A Huffman tree stored as an arena of nodes.
///
/// Leaves hold the distinct byte values of the input. If the input only ever
/// contained a single byte value the tree is *degenerate*: the root is that
/// single leaf and there are no internal nodes.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeIndex,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HuffmanTreeError {
    #[error("Can't build a huffman tree without any symbols, the input is empty")]
    EmptyFrequencyTable,
}

struct QueueEntry {
    weight: u64,
    node: NodeIndex,
}

/// Lower weight first. Equal weights are ordered by node index, which makes
/// leaves (ascending by symbol) come before internal nodes, and older internal
/// nodes before newer ones.
fn lightest_first(a: &QueueEntry, b: &QueueEntry) -> Ordering {
    match a.weight.cmp(&b.weight) {
        Ordering::Equal => a.node.cmp(&b.node),
        other => other,
    }
}

impl HuffmanTree {
    /// Build the tree for the given frequencies by repeatedly merging the two
    /// lightest nodes. The lighter node of each pair becomes the left child.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self, HuffmanTreeError> {
        if frequencies.is_empty() {
            return Err(HuffmanTreeError::EmptyFrequencyTable);
        }

        let mut nodes = Vec::with_capacity(2 * frequencies.len() - 1);
        let mut queue = PriorityQueue::new(lightest_first);
        for (symbol, weight) in frequencies.iter() {
            queue.push(QueueEntry {
                weight,
                node: nodes.len(),
            });
            nodes.push(Node::Leaf { symbol });
        }

        let root = loop {
            let left = queue
                .pop()
                .ok_or(HuffmanTreeError::EmptyFrequencyTable)?;
            let right = match queue.pop() {
                Some(right) => right,
                // the last remaining node is the root
                None => break left.node,
            };
            nodes.push(Node::Internal {
                left: left.node,
                right: right.node,
            });
            queue.push(QueueEntry {
                weight: left.weight.saturating_add(right.weight),
                node: nodes.len() - 1,
            });
        };

        vdebug!(
            symbols = frequencies.len(),
            nodes = nodes.len(),
            "built huffman tree"
        );
        Ok(HuffmanTree { nodes, root })
    }

    /// Count the bytes in `data` and build the tree for them
    pub fn build_from_data(data: &[u8]) -> Result<Self, HuffmanTreeError> {
        Self::build(&FrequencyTable::count(data))
    }

    /// Callers guarantee `nodes` forms a tree rooted at `root`
    pub(crate) fn from_raw_parts(nodes: Vec<Node>, root: NodeIndex) -> Self {
        HuffmanTree { nodes, root }
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// # Panics
    /// If `idx` was not handed out by this tree
    pub fn node(&self, idx: NodeIndex) -> Node {
        self.nodes[idx]
    }

    /// True if the tree is a single leaf without any branching
    pub fn is_degenerate(&self) -> bool {
        matches!(self.nodes[self.root], Node::Leaf { .. })
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf { .. }))
            .count()
    }

    /// Length of the longest root to leaf path. A degenerate tree has depth 0.
    pub fn max_depth(&self) -> usize {
        let mut max: usize = 0;
        let mut stack: Vec<(NodeIndex, usize)> = vec![(self.root, 0)];
        while let Some((idx, depth)) = stack.pop() {
            match self.nodes[idx] {
                Node::Leaf { .. } => max = max.max(depth),
                Node::Internal { left, right } => {
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
            }
        }
        max
    }

    /// The leaf symbols in preorder, i.e. from the leftmost to the rightmost leaf
    pub fn symbols(&self) -> Vec<u8> {
        let mut symbols = Vec::with_capacity(self.nodes.len() / 2 + 1);
        let mut stack = vec![self.root];
        while let Some(idx) = stack.pop() {
            match self.nodes[idx] {
                Node::Leaf { symbol } => symbols.push(symbol),
                Node::Internal { left, right } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        symbols
    }
}

/// Trees are equal if they have the same shape and the same symbols in the same
/// leaf positions, independent of how the nodes are laid out in the arena.
impl PartialEq for HuffmanTree {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self.root, other.root)];
        while let Some((ours, theirs)) = stack.pop() {
            match (self.nodes[ours], other.nodes[theirs]) {
                (Node::Leaf { symbol: a }, Node::Leaf { symbol: b }) => {
                    if a != b {
                        return false;
                    }
                }
                (
                    Node::Internal {
                        left: our_left,
                        right: our_right,
                    },
                    Node::Internal {
                        left: their_left,
                        right: their_right,
                    },
                ) => {
                    stack.push((our_right, their_right));
                    stack.push((our_left, their_left));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for HuffmanTree {}

#[cfg(test)]
mod tests {
    use super::{HuffmanTree, HuffmanTreeError, Node};
    use crate::frequency::FrequencyTable;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn two_symbols() {
        let tree = HuffmanTree::build_from_data(b"aaab").unwrap();
        assert!(!tree.is_degenerate());
        assert_eq!(tree.num_leaves(), 2);
        assert_eq!(tree.num_nodes(), 3);
        assert_eq!(tree.max_depth(), 1);
        // the lighter node goes left
        assert_eq!(tree.symbols(), vec![b'b', b'a']);
    }

    #[test]
    fn single_symbol_is_degenerate() {
        let tree = HuffmanTree::build_from_data(b"zzzzzz").unwrap();
        assert!(tree.is_degenerate());
        assert_eq!(tree.node(tree.root()), Node::Leaf { symbol: b'z' });
        assert_eq!(tree.max_depth(), 0);
    }

    #[test]
    fn empty_table() {
        assert!(matches!(
            HuffmanTree::build_from_data(&[]),
            Err(HuffmanTreeError::EmptyFrequencyTable)
        ));
    }

    #[test]
    fn skewed_weights_build_a_chain() {
        // 1, 1, 2, 4, 8 forces every merge to include the previous internal node
        let table: FrequencyTable = vec![(b'a', 1), (b'b', 1), (b'c', 2), (b'd', 4), (b'e', 8)]
            .into_iter()
            .collect();
        let tree = HuffmanTree::build(&table).unwrap();
        assert_eq!(tree.max_depth(), 4);
        assert_eq!(tree.num_leaves(), 5);
        assert_eq!(tree.num_nodes(), 9);
    }

    #[test]
    fn equal_weights_are_balanced() {
        let data: Vec<u8> = (0..=255).collect();
        let tree = HuffmanTree::build_from_data(&data).unwrap();
        assert_eq!(tree.num_leaves(), 256);
        assert_eq!(tree.max_depth(), 8);
        let mut symbols = tree.symbols();
        symbols.sort_unstable();
        assert_eq!(symbols, data);
    }

    #[test]
    fn building_is_deterministic() {
        let data = b"abracadabra, said the magician to the rabbit";
        let first = HuffmanTree::build_from_data(data).unwrap();
        let second = HuffmanTree::build_from_data(data).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.symbols(), second.symbols());
    }

    #[test]
    fn structural_equality_ignores_layout() {
        let a = HuffmanTree::from_raw_parts(
            vec![
                Node::Leaf { symbol: 1 },
                Node::Leaf { symbol: 2 },
                Node::Internal { left: 0, right: 1 },
            ],
            2,
        );
        let b = HuffmanTree::from_raw_parts(
            vec![
                Node::Internal { left: 1, right: 2 },
                Node::Leaf { symbol: 1 },
                Node::Leaf { symbol: 2 },
            ],
            0,
        );
        let mirrored = HuffmanTree::from_raw_parts(
            vec![
                Node::Internal { left: 2, right: 1 },
                Node::Leaf { symbol: 1 },
                Node::Leaf { symbol: 2 },
            ],
            0,
        );
        assert_eq!(a, b);
        assert_ne!(a, mirrored);
    }
}
