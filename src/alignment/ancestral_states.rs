//! Parser for the marginal ancestral state table of the reconstruction tool.
//!
//! Each non-blank line holds a vertex name and its contiguous state
//! characters, separated by whitespace:
//! ```text
//! ROOT ACGTACG?T
//! Node3 ACGTAC??T
//! ```
//! Undetermined states (`?`) are converted to `N`.

use crate::alignment::fasta::FastaWriter;
use crate::alignment::record::{Alignment, AlignmentRecord};
use crate::parser::{ParsingError, ParsingErrorType};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Character the tool writes for undetermined states.
const UNDETERMINED_STATE: char = '?';

/// Character undetermined states are converted to.
const UNKNOWN_BASE: char = 'N';

/// Parses the text of an ancestral state table into an [Alignment], one
/// record per non-blank line, in line order.
///
/// # Errors
/// [MalformedStateRecord](ParsingErrorType::MalformedStateRecord) with the
/// line number if a non-blank line does not have exactly two fields.
///
/// # Example
/// ```
/// use ancestree::alignment::parse_ancestral_states;
///
/// let alignment = parse_ancestral_states("ROOT AC?T\nNode1 ??GT\n").unwrap();
/// assert_eq!(alignment.records()[0].name(), "ROOT");
/// assert_eq!(alignment.records()[0].sequence(), "ACNT");
/// assert_eq!(alignment.records()[1].sequence(), "NNGT");
/// ```
pub fn parse_ancestral_states(text: &str) -> Result<Alignment, ParsingError> {
    let mut alignment = Alignment::new();

    for (line_index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let (Some(name), Some(states), None) = (fields.next(), fields.next(), fields.next()) else {
            let field_count = line.split_whitespace().count();
            return Err(ParsingError::at_line(
                ParsingErrorType::MalformedStateRecord(format!("expected 2 fields, found {field_count}")),
                line_index + 1,
                line,
            ));
        };

        let sequence: String = states
            .chars()
            .map(|c| if c == UNDETERMINED_STATE { UNKNOWN_BASE } else { c })
            .collect();
        alignment.push(AlignmentRecord::new(name, sequence));
    }

    Ok(alignment)
}

/// Reads the ancestral state table at `path`.
pub fn read_ancestral_states<P: AsRef<Path>>(path: P) -> Result<Alignment, ParsingError> {
    let text = fs::read_to_string(path)?;
    parse_ancestral_states(&text)
}

/// Converts the state table at `states_path` into a FASTA file at
/// `fasta_path`, one unwrapped two-line record per vertex.
///
/// Returns the converted records.
pub fn convert_ancestral_states<P: AsRef<Path>, Q: AsRef<Path>>(
    states_path: P,
    fasta_path: Q,
) -> Result<Alignment, ParsingError> {
    let alignment = read_ancestral_states(states_path.as_ref())?;
    FastaWriter::unwrapped().write_file(fasta_path.as_ref(), &alignment)?;
    debug!(
        records = alignment.len(),
        path = %fasta_path.as_ref().display(),
        "converted ancestral states to FASTA"
    );
    Ok(alignment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Location;

    #[test]
    fn test_only_question_marks_replaced() {
        let alignment = parse_ancestral_states("Node7 -ACGTN?acgt?\n").unwrap();
        assert_eq!(alignment.records()[0].sequence(), "-ACGTNNacgtN");
    }

    #[test]
    fn test_blank_lines_skipped() {
        let alignment = parse_ancestral_states("\nROOT AC\n\n  \nNode1 GT\n").unwrap();
        assert_eq!(alignment.names(), vec!["ROOT", "Node1"]);
    }

    #[test]
    fn test_extra_whitespace_between_fields() {
        let alignment = parse_ancestral_states("ROOT \t  ACGT  \n").unwrap();
        assert_eq!(alignment.records()[0].sequence(), "ACGT");
    }

    #[test]
    fn test_single_field_is_fatal() {
        let err = parse_ancestral_states("ROOT ACGT\nNode1\n").unwrap_err();
        assert!(matches!(err.kind(), ParsingErrorType::MalformedStateRecord(_)));
        assert_eq!(err.location(), Location::Line(2));
    }

    #[test]
    fn test_three_fields_is_fatal() {
        let err = parse_ancestral_states("ROOT AC GT\n").unwrap_err();
        assert_eq!(
            err.kind(),
            &ParsingErrorType::MalformedStateRecord("expected 2 fields, found 3".to_string())
        );
    }
}
