//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, which parses single
//! Newick strings or all Newick strings of an input into [Tree]s.

use crate::model::{BranchLength, Tree, VertexIndex};
use crate::newick::defs::{BRANCH_LENGTH_CHARS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;
use std::collections::HashSet;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Parser (configuration) for rooted Newick trees with arbitrary fan-out.
///
/// Internal vertex labels (e.g. support values or ancestor names) are kept,
/// leaf labels are taken verbatim: underscores stay underscores and quoted
/// labels (`'Wilson''s Storm-petrel'`) are unquoted. Comments (`[...]`) are
/// skipped wherever whitespace may occur.
///
/// Parsing is iterative, so deeply nested trees do not grow the call stack.
///
/// # Configuration
/// * [`allow_duplicate_labels()`](Self::allow_duplicate_labels)
///     - By default two leaves with the same label are rejected, since leaf
///       labels have to identify alignment records.
///
/// # Example
/// ```
/// use ancestree::newick::NewickParser;
/// use ancestree::parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str("((A_meleagrides:1.0,A_vulturinum:1.0)95:0.5,N_meleagris:1.0,G_plumifera:1.5);");
/// let tree = NewickParser::new().parse_str(&mut byte_parser).unwrap();
/// assert_eq!(tree.num_leaves(), 4);
/// assert_eq!(tree.root().num_children(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct NewickParser {
    unique_labels: bool,
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] that rejects duplicate leaf labels.
    pub fn new() -> Self {
        Self { unique_labels: true }
    }

    /// Configures the parser to accept trees with repeated leaf labels.
    pub fn allow_duplicate_labels(mut self) -> Self {
        self.unique_labels = false;
        self
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Parses all Newick trees from the byte source until EOF.
    ///
    /// # Returns
    /// * `Ok(Vec<Tree>)` - All parsed trees
    /// * `Err(ParsingError)` - If any tree fails to parse
    pub fn parse_all<B: ByteSource>(&self, mut byte_parser: ByteParser<B>) -> Result<Vec<Tree>, ParsingError> {
        let mut trees = Vec::new();
        loop {
            byte_parser.skip_comment_and_whitespace()?;
            if byte_parser.is_eof() {
                break;
            }
            trees.push(self.parse_str(&mut byte_parser)?);
        }
        Ok(trees)
    }

    /// Parses a single Newick tree, leaving the [ByteParser] after its `;`.
    ///
    /// # Returns
    /// * `Ok(Tree)` - The parsed tree
    /// * `Err(ParsingError)` - If the Newick string is invalid
    pub fn parse_str<B: ByteSource>(&self, parser: &mut ByteParser<B>) -> Result<Tree, ParsingError> {
        let mut tree = Tree::new();
        let mut seen_labels: HashSet<String> = HashSet::new();

        // Children collected so far for each currently open '('
        let mut open_groups: Vec<Vec<VertexIndex>> = Vec::new();

        parser.skip_comment_and_whitespace()?;
        if parser.is_eof() {
            return Err(ParsingError::unexpected_eof(parser));
        }
        if !parser.consume_if(b'(') {
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected '(' at start of tree but found {:?}", next_char),
            ));
        }
        open_groups.push(Vec::new());

        loop {
            // Expect a vertex: either a new group or a leaf
            parser.skip_comment_and_whitespace()?;
            if parser.consume_if(b'(') {
                open_groups.push(Vec::new());
                continue;
            }
            let leaf_index = self.parse_leaf(parser, &mut tree, &mut seen_labels)?;
            push_child(parser, &mut open_groups, leaf_index)?;

            // After a vertex: ',' means a sibling follows,
            // ')' closes the innermost group (possibly several in a row)
            loop {
                parser.skip_comment_and_whitespace()?;
                if parser.consume_if(b',') {
                    break;
                }
                if !parser.consume_if(b')') {
                    return Err(match parser.peek() {
                        None => ParsingError::unexpected_eof(parser),
                        Some(b) => ParsingError::invalid_newick_string(
                            parser,
                            format!("Expected ',' or ')' after vertex but found {:?}", char::from(b)),
                        ),
                    });
                }

                let Some(children) = open_groups.pop() else {
                    return Err(ParsingError::invalid_newick_string(parser, "Unbalanced ')'".to_string()));
                };
                let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
                let label = (!label.is_empty()).then_some(label);
                let branch_length = self.parse_branch_length(parser)?;

                if open_groups.is_empty() {
                    self.parse_terminator(parser)?;
                    tree.add_root(children, label, branch_length);
                    return Ok(tree);
                }

                let index = tree.add_internal_vertex(children, label, branch_length);
                push_child(parser, &mut open_groups, index)?;
            }
        }
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl NewickParser {
    /// Parses leaf vertex `label[:branch_length]` and adds it to `tree`.
    fn parse_leaf<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
        tree: &mut Tree,
        seen_labels: &mut HashSet<String>,
    ) -> Result<VertexIndex, ParsingError> {
        if parser.is_eof() {
            return Err(ParsingError::unexpected_eof(parser));
        }

        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        if label.is_empty() {
            return Err(ParsingError::unlabeled_leaf(parser));
        }
        if self.unique_labels && !seen_labels.insert(label.clone()) {
            return Err(ParsingError::duplicate_label(parser, label));
        }

        let branch_length = self.parse_branch_length(parser)?;
        Ok(tree.add_leaf(label, branch_length))
    }

    /// Parses optional branch length `[:number]`:
    /// - Skips comments/whitespace before and after `:`
    /// - Supports scientific notation (e.g., `1.5e-10`)
    ///
    /// # Returns
    /// - `Ok(Some(branch_length))` if found a non-negative branch length
    /// - `Ok(None)` if no branch length found
    /// - [ParsingError] if the value is not a non-negative number
    fn parse_branch_length<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<BranchLength>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        let mut value_str = String::new();
        while let Some(b) = parser.peek() {
            if BRANCH_LENGTH_CHARS.contains(&b) {
                value_str.push(char::from(b));
                parser.next_byte();
            } else {
                break;
            }
        }

        value_str
            .parse::<f64>()
            .ok()
            .and_then(BranchLength::try_new)
            .map(Some)
            .ok_or_else(|| ParsingError::invalid_branch_length(parser, value_str))
    }

    /// Consumes the terminating semicolon of a tree.
    fn parse_terminator<B: ByteSource>(&self, parser: &mut ByteParser<B>) -> Result<(), ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if parser.consume_if(b';') {
            return Ok(());
        }

        let next_char = parser.peek().map(char::from);
        Err(ParsingError::invalid_newick_string(
            parser,
            format!("Expected ';' at end of tree but found {:?}", next_char),
        ))
    }
}

/// Appends `child` to the innermost open group.
fn push_child<B: ByteSource>(
    parser: &ByteParser<B>,
    open_groups: &mut [Vec<VertexIndex>],
    child: VertexIndex,
) -> Result<(), ParsingError> {
    match open_groups.last_mut() {
        Some(group) => {
            group.push(child);
            Ok(())
        }
        None => Err(ParsingError::invalid_newick_string(
            parser,
            "Vertex outside of parentheses".to_string(),
        )),
    }
}
