//! Newick serialization of trees.

use crate::model::{Tree, Vertex, VertexIndex};
use crate::newick::defs::ESTIMATED_CHARS_PER_VERTEX;
use crate::parser::utils::{escape_label, plain_label};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Style for serializing a tree to Newick format,
/// controlling how labels are represented in the output string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewickStyle {
    /// Labels with whitespace or structural characters are single-quoted.
    Quoted,
    /// No quotes are ever written; whitespace becomes `_`. Labels containing
    /// structural characters cannot be written in this style. This is the
    /// form expected by the reconstruction tool.
    Plain,
}

/// A label that cannot be represented in the requested [NewickStyle].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnwritableLabelError {
    label: String,
}

impl UnwritableLabelError {
    /// Returns the offending label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for UnwritableLabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "label '{}' cannot be written to a Newick string without quotes", self.label)
    }
}

impl Error for UnwritableLabelError {}

/// Returns the Newick representation of `tree` with closing semicolon.
///
/// Leaf labels, internal labels and all branch lengths (including a root
/// branch length) are written. Uses an explicit stack, so deep trees are
/// fine.
///
/// # Errors
/// [UnwritableLabelError] if `style` is [NewickStyle::Plain] and a label
/// contains structural characters.
///
/// # Example
/// ```
/// use ancestree::newick::{parse_str, to_newick, NewickStyle};
///
/// let tree = parse_str("(('Little Spotted Kiwi':1,Great_Spotted_Kiwi:1)99:0.5,Rowi:1.5);").unwrap();
/// assert_eq!(
///     to_newick(&tree, NewickStyle::Quoted).unwrap(),
///     "(('Little Spotted Kiwi':1,Great_Spotted_Kiwi:1)99:0.5,Rowi:1.5);"
/// );
/// assert_eq!(
///     to_newick(&tree, NewickStyle::Plain).unwrap(),
///     "((Little_Spotted_Kiwi:1,Great_Spotted_Kiwi:1)99:0.5,Rowi:1.5);"
/// );
/// ```
pub fn to_newick(tree: &Tree, style: NewickStyle) -> Result<String, UnwritableLabelError> {
    enum Step {
        Enter(VertexIndex),
        Separator,
        Exit(VertexIndex),
    }

    let mut newick = String::with_capacity(tree.num_vertices() * ESTIMATED_CHARS_PER_VERTEX + 1);
    if !tree.is_root_set() {
        newick.push(';');
        return Ok(newick);
    }

    let mut stack = vec![Step::Enter(tree.root_index())];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(index) => {
                let vertex = &tree[index];
                if vertex.is_leaf() {
                    push_label_and_length(&mut newick, vertex, style)?;
                    continue;
                }

                newick.push('(');
                stack.push(Step::Exit(index));
                // Reverse, so the first child is written first
                for (position, &child) in vertex.children().iter().enumerate().rev() {
                    stack.push(Step::Enter(child));
                    if position > 0 {
                        stack.push(Step::Separator);
                    }
                }
            }
            Step::Separator => newick.push(','),
            Step::Exit(index) => {
                newick.push(')');
                push_label_and_length(&mut newick, &tree[index], style)?;
            }
        }
    }
    newick.push(';');

    Ok(newick)
}

/// Writes the given trees to a file in Newick format, one tree per line.
///
/// # Errors
/// Returns an I/O error if writing fails, or an error of kind
/// [InvalidInput](io::ErrorKind::InvalidInput) if a label cannot be written
/// in the requested style.
pub fn write_newick_file(file: File, trees: &[Tree], style: NewickStyle) -> io::Result<()> {
    let mut writer = BufWriter::new(file);
    for tree in trees {
        let newick = to_newick(tree, style).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        writer.write_all(newick.as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()
}

// Helper for adding a label (if any) and a branch length (if any)
fn push_label_and_length(newick: &mut String, vertex: &Vertex, style: NewickStyle) -> Result<(), UnwritableLabelError> {
    if let Some(label) = vertex.label() {
        match style {
            NewickStyle::Quoted => newick.push_str(&escape_label(label)),
            NewickStyle::Plain => {
                let plain = plain_label(label).ok_or_else(|| UnwritableLabelError {
                    label: label.to_string(),
                })?;
                newick.push_str(&plain);
            }
        }
    }

    if let Some(branch_length) = vertex.branch_length() {
        newick.push(':');
        newick.push_str(&branch_length.to_string());
    }

    Ok(())
}
