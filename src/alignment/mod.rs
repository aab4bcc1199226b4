//! Alignments: FASTA input/output, the ancestral state table of the
//! reconstruction tool and merging of alignments.

mod ancestral_states;
pub mod fasta;
mod record;

pub use ancestral_states::{convert_ancestral_states, parse_ancestral_states, read_ancestral_states};
pub use fasta::FastaWriter;
pub use record::{Alignment, AlignmentRecord, merge};

use crate::parser::ParsingError;
use std::path::Path;

/// Reads the FASTA files `first` and `second`, merges them (records of
/// `first` before records of `second`) and writes the result to `output`.
///
/// Returns the merged alignment.
pub fn combine_fasta_files<P, Q, R>(
    first: P,
    second: Q,
    output: R,
    writer: &FastaWriter,
) -> Result<Alignment, ParsingError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    let first = fasta::read_file(first)?;
    let second = fasta::read_file(second)?;
    let combined = merge(first, second);
    writer.write_file(output, &combined)?;
    Ok(combined)
}
