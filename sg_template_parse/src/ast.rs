/**
 * All of the template syntax-tree (AST) data-structures.
 */

use std::fmt;
use std::sync::Arc;

/// How many characters a character set draws on a single render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Always exactly this many
    Exactly(usize),
    /// A fresh uniform draw from the inclusive range, on every render
    Between(usize, usize),
}

impl Quantity {
    /// The lower bound, if the quantity is a range.
    pub fn min(&self) -> Option<usize> {
        match self {
            Quantity::Exactly(_) => None,
            Quantity::Between(min, _) => Some(*min),
        }
    }

    pub fn max(&self) -> usize {
        match self {
            Quantity::Exactly(n) | Quantity::Between(_, n) => *n,
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::Exactly(1)
    }
}

/// A node of the compiled template.
///
/// Nodes are never mutated after the parser builds them, so group
/// repetition can share the same child between several parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Text that renders verbatim
    Literal(String),

    /// Draws `quantity` characters from `chars`, with replacement
    CharacterSet{
        chars: Vec<char>,
        quantity: Quantity,
    },

    /// Renders every child in order
    Sequence(Vec<Arc<Node>>),

    /// Renders exactly one of the two branches
    Alternation{
        first: Arc<Node>,
        second: Arc<Node>,
    },
}

impl Node {
    /// Number of node references in the tree, the root included. Shared
    /// children count once per reference.
    pub fn node_count(&self) -> usize {
        match self {
            Node::Literal(_) | Node::CharacterSet{ .. } => 1,
            Node::Sequence(children) => 1 + children.iter().map(|c| c.node_count()).sum::<usize>(),
            Node::Alternation{ first, second } => 1 + first.node_count() + second.node_count(),
        }
    }
}

/**
 * Debug-print a tree.
 *
 * Character sets print as `[min:max:chars]`, with -1 standing for an exact
 * count.
 */
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(text) => write!(f, "{:?}", text),

            Node::CharacterSet{ chars, quantity } => {
                let min = quantity.min().map_or(-1, |m| m as i64);
                write!(f, "[{}:{}:", min, quantity.max())?;
                for c in chars {
                    write!(f, "{}", c.escape_debug())?;
                }
                write!(f, "]")
            },

            Node::Sequence(children) => {
                write!(f, "(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            },

            Node::Alternation{ first, second } => write!(f, "({}|{})", first, second),
        }
    }
}

// Tests ///////////////////////////////////////////////////////////////////////
