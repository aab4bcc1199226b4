//! Newick format parser and writer for rooted phylogenetic trees.
//!
//! # Quick API
//! * [`parse_str`] - parses a single Newick string into a [`Tree`]
//! * [`parse_file`] - parses every tree in a file
//! * [`parse_first_in_file`] - parses the first tree of a file
//! * [`to_newick`] / [`write_newick_file`] - serialization
//!
//! # Format
//! The Newick format has the following grammar:
//! * `tree ::= internal_vertex ';'`
//! * `vertex ::= leaf | internal_vertex`
//! * `internal_vertex ::= '(' vertex {',' vertex} ')' [label] [branch_length]`
//! * `leaf ::= label [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch length
//! * Labels may be single-quoted, with `''` encoding a quote
//! * Underscores in labels are literal and never read as spaces
//! * Comments are square brackets and can occur wherever whitespace can

mod defs;
mod parser;
mod writer;

pub use self::parser::NewickParser;
pub use self::writer::{NewickStyle, UnwritableLabelError, to_newick, write_newick_file};

use crate::model::Tree;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::InMemoryByteSource;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single Newick string into a [`Tree`] using default settings.
///
/// # Example
/// ```
/// use ancestree::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata,Fratercula_arctica,Fratercula_corniculata);").unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// assert!(tree.find_leaf("Fratercula_arctica").is_some());
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    NewickParser::new().parse_str(&mut byte_parser)
}

/// Parses all semicolon-terminated Newick strings of a file.
///
/// Multiple trees can appear on the same line or across multiple lines,
/// and `[...]` comments and whitespace are fine.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParsingError> {
    let byte_parser = ByteParser::new(InMemoryByteSource::from_file(path)?);
    NewickParser::new().parse_all(byte_parser)
}

/// Parses the first Newick string of a file, ignoring anything after it.
///
/// # Errors
/// [UnexpectedEOF](crate::parser::ParsingErrorType::UnexpectedEOF) if the
/// file contains no tree.
pub fn parse_first_in_file<P: AsRef<Path>>(path: P) -> Result<Tree, ParsingError> {
    let mut byte_parser = ByteParser::new(InMemoryByteSource::from_file(path)?);
    NewickParser::new().parse_str(&mut byte_parser)
}
