//! Vertex and branch length types of the tree arena.

use crate::model::tree::VertexIndex;
use std::fmt;
use std::ops::Deref;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// A vertex (node) of a rooted phylogenetic [Tree](crate::model::Tree).
///
/// A vertex is
/// - the **root** if it has no parent,
/// - a **leaf** if it has no children,
/// - **internal** otherwise.
///
/// # Invariants
/// - `index` is the position of the vertex in the arena
/// - `children` are ordered as in the input; empty for leaves
/// - leaves carry a label, internal vertices may carry one
///   (e.g. a support value or an ancestor name)
/// - `branch_length` is the length of the edge to the parent, if known
#[derive(PartialEq, Debug, Clone)]
pub struct Vertex {
    index: VertexIndex,
    parent: Option<VertexIndex>,
    children: Vec<VertexIndex>,
    label: Option<String>,
    branch_length: Option<BranchLength>,
}

impl Vertex {
    /// Creates a new leaf vertex without parent.
    pub(crate) fn new_leaf(index: VertexIndex, label: String, branch_length: Option<BranchLength>) -> Self {
        Self {
            index,
            parent: None,
            children: Vec::new(),
            label: Some(label),
            branch_length,
        }
    }

    /// Creates a new non-leaf vertex without parent.
    pub(crate) fn new_internal(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        label: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Self {
            index,
            parent: None,
            children,
            label,
            branch_length,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        self.index
    }

    /// Returns the index of the parent, or `None` for the root
    /// (and for vertices not yet attached during construction).
    pub fn parent_index(&self) -> Option<VertexIndex> {
        self.parent
    }

    /// Returns the ordered children of this vertex.
    pub fn children(&self) -> &[VertexIndex] {
        &self.children
    }

    /// Returns the number of children.
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Returns the label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the length of the edge to the parent, if set.
    pub fn branch_length(&self) -> Option<BranchLength> {
        self.branch_length
    }

    /// Returns `true` if this vertex has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if this vertex has children and a parent.
    pub fn is_internal(&self) -> bool {
        !self.children.is_empty() && self.parent.is_some()
    }

    pub(crate) fn set_parent(&mut self, parent: VertexIndex) {
        self.parent = Some(parent);
    }

    pub(crate) fn set_children(&mut self, children: Vec<VertexIndex>) {
        self.children = children;
    }

    pub(crate) fn take_children(&mut self) -> Vec<VertexIndex> {
        std::mem::take(&mut self.children)
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Zero-length branch, as used for vertices inserted by rebinarization.
    pub const ZERO: BranchLength = BranchLength(0.0);

    /// Creates a new branch length.
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn new(length: f64) -> Self {
        assert!(length >= 0.0, "Branch length must be non-negative, got {}", length);
        assert!(length.is_finite(), "Branch length must be finite, got {}", length);
        BranchLength(length)
    }

    /// Creates a new branch length, or `None` if `length` is negative or not finite.
    pub fn try_new(length: f64) -> Option<Self> {
        (length >= 0.0 && length.is_finite()).then_some(BranchLength(length))
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for BranchLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
