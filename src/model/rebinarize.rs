//! Resolution of multifurcations into a strictly bifurcating tree.

use crate::model::tree::{Tree, VertexIndex};
use crate::model::vertex::BranchLength;

impl Tree {
    /// Resolves every vertex with more than two children into a cascade of
    /// binary vertices joined by zero-length edges.
    ///
    /// For a vertex with children `c_1, ..., c_k` (k > 2) the last child is
    /// peeled off and the remaining children, in their original order, are
    /// moved below a new unlabelled vertex with a zero-length edge; the new
    /// vertex is split the same way until two children remain. The result is
    /// a right-leaning chain of `k - 1` binary vertices:
    ///
    /// ```text
    /// (A:1,B:2,C:3,D:4);  ->  (D:4,(C:3,(A:1,B:2):0):0);
    /// ```
    ///
    /// Leaves, their labels and pendant branch lengths, internal labels and all
    /// original branch lengths are unchanged. Vertices with exactly one child
    /// are left as they are, so [`Tree::is_bifurcating()`] only holds
    /// afterwards if the input had no unary vertices. Applying this to a
    /// bifurcating tree is a no-op.
    ///
    /// Traversal uses an explicit worklist over the arena; neither deep nor
    /// highly multifurcating trees grow the call stack.
    ///
    /// # Returns
    /// Number of vertices inserted.
    ///
    /// # Example
    /// ```
    /// use ancestree::newick::{parse_str, to_newick, NewickStyle};
    ///
    /// let mut tree = parse_str("(A:1,B:2,C:3,D:4);").unwrap();
    /// assert_eq!(tree.rebinarize(), 2);
    /// assert_eq!(to_newick(&tree, NewickStyle::Quoted).unwrap(), "(D:4,(C:3,(A:1,B:2):0):0);");
    /// ```
    pub fn rebinarize(&mut self) -> usize {
        if !self.is_root_set() {
            return 0;
        }

        let mut inserted = 0;
        let mut worklist: Vec<VertexIndex> = vec![self.root_index()];

        while let Some(index) = worklist.pop() {
            if self[index].num_children() > 2 {
                inserted += self.split_multifurcation(index);
            }
            worklist.extend_from_slice(self[index].children());
        }

        inserted
    }

    /// Splits the children of `index` into a chain of binary vertices,
    /// peeling off the last child at each level.
    ///
    /// Returns the number of vertices inserted.
    fn split_multifurcation(&mut self, index: VertexIndex) -> usize {
        let mut remaining = self.take_children(index);
        let mut current = index;
        let mut inserted = 0;

        while remaining.len() > 2 {
            let Some(peeled) = remaining.pop() else {
                break;
            };
            let next = self.add_internal_vertex(Vec::new(), None, Some(BranchLength::ZERO));
            self.set_children(current, vec![peeled, next]);
            current = next;
            inserted += 1;
        }

        self.set_children(current, remaining);
        inserted
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{BranchLength, Tree};

    fn star(num_leaves: usize) -> Tree {
        let mut tree = Tree::new();
        let leaves = (0..num_leaves)
            .map(|i| tree.add_leaf(format!("t{i}"), Some(BranchLength::new(i as f64 + 1.0))))
            .collect();
        tree.add_root(leaves, None, None);
        tree
    }

    #[test]
    fn test_star_becomes_chain() {
        let mut tree = star(5);
        assert_eq!(tree.rebinarize(), 3);
        assert!(tree.is_valid());
        assert!(tree.is_bifurcating());
        assert_eq!(tree.num_vertices(), 5 + 1 + 3);

        // Root keeps the last leaf as first child
        let root = tree.root();
        assert_eq!(tree[root.children()[0]].label(), Some("t4"));
        let chain = &tree[root.children()[1]];
        assert_eq!(chain.branch_length(), Some(BranchLength::ZERO));
        assert_eq!(chain.label(), None);
    }

    #[test]
    fn test_huge_star_does_not_overflow() {
        let mut tree = star(200_000);
        assert_eq!(tree.rebinarize(), 199_998);
        assert!(tree.is_bifurcating());
        assert_eq!(tree.num_leaves(), 200_000);
    }

    #[test]
    fn test_unary_vertex_is_left_alone() {
        let mut tree = Tree::new();
        let a = tree.add_leaf("A".to_string(), None);
        let b = tree.add_leaf("B".to_string(), None);
        let c = tree.add_leaf("C".to_string(), None);
        let unary = tree.add_internal_vertex(vec![c], None, None);
        tree.add_root(vec![a, b, unary], None, None);

        assert_eq!(tree.rebinarize(), 1);
        assert!(tree.is_valid());
        assert_eq!(tree.first_non_bifurcating().map(|v| v.index()), Some(unary));
    }

    #[test]
    fn test_empty_tree() {
        let mut tree = Tree::new();
        assert_eq!(tree.rebinarize(), 0);
    }
}
