//! Constants for Newick parsing and writing.

/// Newick label delimiters: parentheses, brackets, comma, colon, semicolon, whitespace
pub(crate) const NEWICK_LABEL_DELIMITERS: &[u8] = b"()[],:; \n\t\r";

/// Characters of a branch length value: digits, sign, decimal point, exponent
pub(crate) const BRANCH_LENGTH_CHARS: &[u8] = b"0123456789.-+eE";

/// Estimated number of characters per vertex in a Newick string,
/// used to pre-allocate output
pub(crate) const ESTIMATED_CHARS_PER_VERTEX: usize = 16;
