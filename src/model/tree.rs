//! Arena-backed rooted tree.
//!
//! Provides the core data structures for representing phylogenetic trees:
//! * [Tree] - rooted tree with arbitrary fan-out using the arena pattern
//! * [VertexIndex] - type used to index vertices in the tree
//! * [PreOrderIter] and [PostOrderIter] - stack-based traversals

use crate::model::vertex::{BranchLength, Vertex};
use std::collections::HashSet;

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: VertexIndex = usize::MAX;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted phylogenetic tree represented using the arena pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex], so no vertex holds a reference to another one and the
/// tree owns all of its vertices exclusively.
///
/// # Structure
/// - Vertices may have any number of children; leaves have none.
/// - Children keep their input order.
/// - Leaves carry labels, internal vertices optionally.
/// - Branch lengths are optional, but if provided are non-negative.
/// - No assumption on the order of indices is made, except that a vertex
///   added later never precedes its children during construction.
///
/// # Construction
/// Build bottom-up: add leaves, then internal vertices referencing the
/// indices of their children, then the root. Test validity with
/// [`Tree::is_valid()`].
///
/// # Example
/// ```
/// use ancestree::model::{BranchLength, Tree};
///
/// // ((A:0.2,B:0.2)90:0.2,C:0.4,D:0.1);
/// let mut tree = Tree::new();
/// let a = tree.add_leaf("A".to_string(), Some(BranchLength::new(0.2)));
/// let b = tree.add_leaf("B".to_string(), Some(BranchLength::new(0.2)));
/// let c = tree.add_leaf("C".to_string(), Some(BranchLength::new(0.4)));
/// let d = tree.add_leaf("D".to_string(), Some(BranchLength::new(0.1)));
/// let ab = tree.add_internal_vertex(vec![a, b], Some("90".to_string()), Some(BranchLength::new(0.2)));
/// tree.add_root(vec![ab, c, d], None, None);
///
/// assert!(tree.is_valid());
/// assert!(!tree.is_bifurcating());
/// ```
#[derive(Debug, Clone)]
pub struct Tree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: VertexIndex,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl Tree {
    /// Creates a new empty tree.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty tree with space for `num_vertices` vertices.
    pub fn with_capacity(num_vertices: usize) -> Self {
        Tree {
            vertices: Vec::with_capacity(num_vertices),
            root_index: NO_ROOT_SET_INDEX,
        }
    }

    /// Adds a leaf to the tree and returns its index.
    pub fn add_leaf(&mut self, label: String, branch_length: Option<BranchLength>) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices.push(Vertex::new_leaf(index, label, branch_length));
        index
    }

    /// Adds an internal vertex with the given children and returns its index.
    ///
    /// # Panics
    /// Panics if a child index is out of bounds.
    pub fn add_internal_vertex(
        &mut self,
        children: Vec<VertexIndex>,
        label: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        for &child in &children {
            self.vertices[child].set_parent(index);
        }
        self.vertices
            .push(Vertex::new_internal(index, children, label, branch_length));
        index
    }

    /// Adds the root with the given children and returns its index.
    ///
    /// A root branch length is unusual but allowed in Newick, so it is kept.
    ///
    /// # Panics
    /// Panics if a child index is out of bounds.
    pub fn add_root(
        &mut self,
        children: Vec<VertexIndex>,
        label: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        let index = self.add_internal_vertex(children, label, branch_length);
        self.root_index = index;
        index
    }

    /// Returns whether root of tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set and thus tree hasn't been fully constructed yet.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index]
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_leaf()).count()
    }

    /// Returns the number of internal (non-root, non-leaf) vertices.
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_internal()).count()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if every vertex has either zero or two children.
    pub fn is_bifurcating(&self) -> bool {
        self.first_non_bifurcating().is_none()
    }

    /// Returns the first vertex (in pre-order) with neither zero nor two children.
    pub fn first_non_bifurcating(&self) -> Option<&Vertex> {
        self.pre_order_iter()
            .find(|v| !v.is_leaf() && v.num_children() != 2)
    }

    /// Returns the labels of all leaves in pre-order.
    pub fn leaf_labels(&self) -> Vec<&str> {
        self.pre_order_iter()
            .filter(|v| v.is_leaf())
            .filter_map(|v| v.label())
            .collect()
    }

    /// Returns the leaf with the given label, if any.
    pub fn find_leaf(&self, label: &str) -> Option<&Vertex> {
        self.vertices
            .iter()
            .find(|v| v.is_leaf() && v.label() == Some(label))
    }

    /// Returns the sum of all branch lengths that are set.
    pub fn total_branch_length(&self) -> f64 {
        self.vertices
            .iter()
            .filter_map(|v| v.branch_length())
            .map(|bl| *bl)
            .sum::<f64>()
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is set, in bounds and points to a vertex without parent
    /// - All vertex indices match their position in the arena
    /// - All child indices are in bounds and point back to their parent
    /// - All non-root vertices have a parent listing them as a child
    /// - Every vertex is reachable from the root exactly once
    /// - Leaves are labelled and leaf labels are unique
    pub fn is_valid(&self) -> bool {
        if !self.is_root_set() || self.root_index >= self.vertices.len() {
            return false;
        }
        if self.vertices[self.root_index].parent_index().is_some() {
            return false;
        }

        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return false;
            }

            for &child in vertex.children() {
                if child >= self.vertices.len() || self.vertices[child].parent_index() != Some(index) {
                    return false;
                }
            }

            if index != self.root_index {
                match vertex.parent_index() {
                    None => return false,
                    Some(parent) => {
                        if parent >= self.vertices.len()
                            || !self.vertices[parent].children().contains(&index)
                        {
                            return false;
                        }
                    }
                }
            }
        }

        // Reachability without revisits (guards against cycles)
        let mut seen = vec![false; self.vertices.len()];
        let mut stack = vec![self.root_index];
        while let Some(index) = stack.pop() {
            if seen[index] {
                return false;
            }
            seen[index] = true;
            stack.extend_from_slice(self.vertices[index].children());
        }
        if seen.iter().any(|s| !s) {
            return false;
        }

        let mut labels = HashSet::new();
        self.vertices
            .iter()
            .filter(|v| v.is_leaf())
            .all(|v| v.label().is_some_and(|label| labels.insert(label)))
    }

    /// Returns an iterator over the tree in post-order (children before parents).
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// # Example
    /// ```
    /// use ancestree::newick::parse_str;
    ///
    /// let tree = parse_str("((A,B)x,C)r;").unwrap();
    /// let labels: Vec<_> = tree.pre_order_iter().filter_map(|v| v.label()).collect();
    /// assert_eq!(labels, vec!["r", "x", "A", "B", "C"]);
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

// ============================================================================
// Restructuring (crate)
// ============================================================================
impl Tree {
    /// Replaces the children of `parent`, updating the parent index of each new child.
    pub(crate) fn set_children(&mut self, parent: VertexIndex, children: Vec<VertexIndex>) {
        for &child in &children {
            self.vertices[child].set_parent(parent);
        }
        self.vertices[parent].set_children(children);
    }

    /// Detaches and returns the children of `parent`.
    pub(crate) fn take_children(&mut self, parent: VertexIndex) -> Vec<VertexIndex> {
        self.vertices[parent].take_children()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<VertexIndex> for Tree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

// =#========================================================================#=
// ITERATORS
// =#========================================================================#=
/// Iterator for post-order traversal (children before parents).
///
/// Stack-based, so traversal depth is not limited by the call stack.
pub struct PostOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push((tree.root_index, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            if children_visited || vertex.is_leaf() {
                return Some(vertex);
            }

            self.stack.push((index, true));
            // Reverse, so the first child is processed first
            for &child in vertex.children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// Stack-based, so traversal depth is not limited by the call stack.
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push(tree.root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        for &child in vertex.children().iter().rev() {
            self.stack.push(child);
        }

        Some(vertex)
    }
}
