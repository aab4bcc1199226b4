//! Ancestree is a library (and command-line tool) to reconstruct ancestral
//! sequences on rooted phylogenetic trees with an external reconstruction
//! tool.
//!
//! Given a FASTA alignment and a rooted Newick tree, a run produces the
//! alignment extended by one sequence per internal vertex, plus the tree with
//! labeled internal vertices written by the tool.
//! Core functionality provided:
//! - Tree model: rooted trees with arbitrary fan-out and internal labels,
//!   stored with the arena pattern (see [crate::model]).
//! - Rebinarization: multifurcations are resolved into chains of binary
//!   vertices joined by zero-length edges, see [`Tree::rebinarize()`](model::Tree::rebinarize).
//! - Newick: parse and write trees, quoted or plain (see [crate::newick]).
//! - Alignments: FASTA reading and writing, the ancestral state table of the
//!   tool and merging (see [crate::alignment]).
//! - Reconstruction: scratch workspace, tool invocation with optional timeout
//!   and the complete run (see [crate::reconstruction]).
//!
//! Limitations:
//! - Only rooted trees
//! - Only FASTA alignments
//! - The reconstruction itself is done by the external tool
//!
//! # Usage patterns
//!
//! Rebinarize a tree:
//! ```
//! use ancestree::parse_newick_str;
//! use ancestree::newick::{to_newick, NewickStyle};
//!
//! let mut tree = parse_newick_str("(A:1,B:2,C:3,D:4);").unwrap();
//! assert_eq!(tree.rebinarize(), 2);
//! assert!(tree.is_bifurcating());
//! assert_eq!(to_newick(&tree, NewickStyle::Plain).unwrap(), "(D:4,(C:3,(A:1,B:2):0):0);");
//! ```
//!
//! Run a reconstruction:
//! ```no_run
//! use ancestree::reconstruction::{AncestralReconstruction, ReconstructionConfig};
//!
//! let config = ReconstructionConfig {
//!     verbose: true,
//!     ..ReconstructionConfig::default()
//! };
//! let report = AncestralReconstruction::new("snps.aln", "snps.tre", "joint.aln", "joint.tre", config).run()?;
//! println!("Added {} ancestor sequences", report.reconstructed_records);
//! # Ok::<(), ancestree::reconstruction::ReconstructionError>(())
//! ```

pub mod alignment;
pub mod model;
pub mod newick;
pub mod parser;
pub mod reconstruction;

use crate::alignment::Alignment;
use crate::model::Tree;
use crate::parser::ParsingError;
use std::path::Path;

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parse a Newick string using default settings.
///
/// See [`newick::parse_str`] for full documentation of this convenience function.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    newick::parse_str(newick)
}

/// Parse every Newick string of a file using default settings.
///
/// See [`newick::parse_file`] for full documentation of this convenience function.
pub fn parse_newick_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParsingError> {
    newick::parse_file(path)
}

// ============================================================================
// Quick FASTA API
// ============================================================================
/// Read a FASTA file into an [Alignment].
///
/// See [`alignment::fasta::parse_str`] for details.
pub fn read_fasta_file<P: AsRef<Path>>(path: P) -> Result<Alignment, ParsingError> {
    alignment::fasta::read_file(path)
}
