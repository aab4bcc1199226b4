//! Data model for rooted phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [Tree], which uses the arena pattern to store
//! [Vertex] nodes referenced by [VertexIndex]. Unlike a strictly binary
//! model, vertices may have any number of children, so trees read from
//! Newick files with polytomies are represented as they are written.
//!
//! # Bifurcation
//! The reconstruction tool only accepts binary trees.
//! [`Tree::rebinarize()`] resolves every multifurcation into a chain of
//! binary vertices joined by zero-length edges.

mod rebinarize;
pub mod tree;
pub mod vertex;

pub use tree::{PostOrderIter, PreOrderIter, Tree, VertexIndex};
pub use vertex::{BranchLength, Vertex};
