//! Huffman tree construction
//!
//! Greedy minimum-weight merging over a binary min-heap. Candidates are
//! ordered by weight and then by creation order, so equal-weight nodes are
//! merged oldest first and the resulting tree is reproducible.

use crate::frequency::FrequencyTable;
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: char,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    pub fn leaf(symbol: char, weight: u64) -> Self {
        HuffmanNode::Leaf { symbol, weight }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } => *weight,
            HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    /// Join two subtrees; `left` is the one taken from the queue first.
    /// The combined weight saturates at `u64::MAX`.
    pub fn merge(left: Self, right: Self) -> Self {
        HuffmanNode::Internal {
            weight: left.weight().saturating_add(right.weight()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Queue entry. `order` is the creation sequence number of the node.
#[derive(Debug)]
struct Candidate {
    weight: u64,
    order: usize,
    node: HuffmanNode,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.order == other.order
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap pops its greatest element, we want the lightest and oldest.
        (other.weight, other.order).cmp(&(self.weight, self.order))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Build the tree for `frequencies`. Returns `None` for an empty table;
    /// a one-entry table yields a lone leaf root.
    pub fn build(frequencies: &FrequencyTable) -> Option<Self> {
        let mut heap: BinaryHeap<Candidate> = frequencies
            .iter()
            .enumerate()
            .map(|(order, (symbol, weight))| Candidate {
                weight,
                order,
                node: HuffmanNode::leaf(symbol, weight),
            })
            .collect();
        let mut next_order = heap.len();

        let root = loop {
            let first = heap.pop()?;
            let Some(second) = heap.pop() else {
                break first.node;
            };
            trace!(
                "merging weight {} (#{}) with weight {} (#{}) into #{}",
                first.weight, first.order, second.weight, second.order, next_order
            );

            let node = HuffmanNode::merge(first.node, second.node);
            heap.push(Candidate { weight: node.weight(), order: next_order, node });
            next_order += 1;
        };

        let tree = HuffmanTree { root };
        debug!(
            "built huffman tree: {} leaves, depth {}, weight {}",
            tree.leaf_count(),
            tree.depth(),
            tree.root.weight()
        );
        Some(tree)
    }

    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                HuffmanNode::Leaf { .. } => count += 1,
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push(&**left);
                    stack.push(&**right);
                }
            }
        }
        count
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(&self.root, 0)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { .. } => deepest = deepest.max(depth),
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push((&**left, depth + 1));
                    stack.push((&**right, depth + 1));
                }
            }
        }
        deepest
    }
}

/// Quote a symbol for display, escaping control characters such as `\n`.
pub fn display_symbol(symbol: char) -> String {
    format!("'{}'", symbol.escape_debug())
}

fn render_node(
    f: &mut fmt::Formatter<'_>,
    node: &HuffmanNode,
    prefix: &str,
    is_last: bool,
) -> fmt::Result {
    let connector = if is_last { "└── " } else { "├── " };
    match node {
        HuffmanNode::Leaf { symbol, weight } => {
            writeln!(f, "{}{}{} (freq: {})", prefix, connector, display_symbol(*symbol), weight)
        }
        HuffmanNode::Internal { weight, left, right } => {
            writeln!(f, "{}{}Internal (freq: {})", prefix, connector, weight)?;
            let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
            render_node(f, right, &child_prefix, false)?;
            render_node(f, left, &child_prefix, true)
        }
    }
}

impl fmt::Display for HuffmanTree {
    /// Sideways drawing with the right subtree above the left one.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_node(f, &self.root, "", true)
    }
}
