//! FASTA reading and writing.
//!
//! The reader accepts multi-line records and keeps the header text after the
//! first whitespace as record description. Blank lines are ignored.

use crate::alignment::record::{Alignment, AlignmentRecord};
use crate::parser::{ParsingError, ParsingErrorType};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Line width of sequence lines written by [FastaWriter::default()].
pub const DEFAULT_LINE_WIDTH: usize = 60;

// =#========================================================================#=
// READING
// =#========================================================================$=
/// Parses FASTA text into an [Alignment].
///
/// # Errors
/// * [InvalidFastaRecord](ParsingErrorType::InvalidFastaRecord) for sequence
///   data before the first header or a header without name
/// * [DuplicateRecord](ParsingErrorType::DuplicateRecord) if a name occurs twice
///
/// # Example
/// ```
/// use ancestree::alignment::fasta;
///
/// let alignment = fasta::parse_str(">A first\nAC\nGT\n>B\nACGA\n").unwrap();
/// assert_eq!(alignment.names(), vec!["A", "B"]);
/// assert_eq!(alignment.records()[0].sequence(), "ACGT");
/// assert_eq!(alignment.records()[0].description(), Some("first"));
/// ```
pub fn parse_str(text: &str) -> Result<Alignment, ParsingError> {
    let mut alignment = Alignment::new();
    let mut seen_names: HashSet<String> = HashSet::new();
    let mut current: Option<PendingRecord> = None;

    for (line_index, raw_line) in text.lines().enumerate() {
        let line_number = line_index + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some(done) = current.take() {
                alignment.push(done.finish());
            }

            let (name, description) = split_header(header);
            if name.is_empty() {
                return Err(ParsingError::at_line(
                    ParsingErrorType::InvalidFastaRecord("header without record name".to_string()),
                    line_number,
                    raw_line,
                ));
            }
            if !seen_names.insert(name.to_string()) {
                return Err(ParsingError::at_line(
                    ParsingErrorType::DuplicateRecord(name.to_string()),
                    line_number,
                    raw_line,
                ));
            }
            current = Some(PendingRecord::new(name, description));
            continue;
        }

        match current.as_mut() {
            Some(record) => record.sequence.extend(line.chars().filter(|c| !c.is_whitespace())),
            None => {
                return Err(ParsingError::at_line(
                    ParsingErrorType::InvalidFastaRecord("sequence data before first header".to_string()),
                    line_number,
                    raw_line,
                ));
            }
        }
    }

    if let Some(done) = current {
        alignment.push(done.finish());
    }
    Ok(alignment)
}

/// Reads and parses a FASTA file.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Alignment, ParsingError> {
    let text = fs::read_to_string(path)?;
    parse_str(&text)
}

/// Record under construction while its sequence lines are read.
struct PendingRecord {
    name: String,
    description: Option<String>,
    sequence: String,
}

impl PendingRecord {
    fn new(name: &str, description: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            description: description.map(str::to_string),
            sequence: String::new(),
        }
    }

    fn finish(self) -> AlignmentRecord {
        let record = AlignmentRecord::new(self.name, self.sequence);
        match self.description {
            Some(description) => record.with_description(description),
            None => record,
        }
    }
}

// Splits "name rest of header" into name and (non-empty) description
fn split_header(header: &str) -> (&str, Option<&str>) {
    let header = header.trim();
    match header.split_once(char::is_whitespace) {
        Some((name, rest)) => {
            let rest = rest.trim();
            (name, (!rest.is_empty()).then_some(rest))
        }
        None => (header, None),
    }
}

// =#========================================================================#=
// WRITING
// =#========================================================================$=
/// Writer (configuration) for FASTA output.
///
/// # Example
/// ```
/// use ancestree::alignment::{fasta::FastaWriter, Alignment, AlignmentRecord};
///
/// let alignment = Alignment::from_records(vec![AlignmentRecord::new("Node1", "ACNTAC")]);
/// let text = FastaWriter::with_line_width(4).to_string(&alignment);
/// assert_eq!(text, ">Node1\nACNT\nAC\n");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastaWriter {
    line_width: usize,
}

impl Default for FastaWriter {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl FastaWriter {
    /// Creates a writer wrapping sequences at `line_width` characters;
    /// `0` writes every sequence on a single line.
    pub fn with_line_width(line_width: usize) -> Self {
        Self { line_width }
    }

    /// Creates a writer that never wraps sequences.
    pub fn unwrapped() -> Self {
        Self::with_line_width(0)
    }

    pub fn line_width(&self) -> usize {
        self.line_width
    }

    /// Writes all records of `alignment` in order.
    pub fn write<W: Write>(&self, mut out: W, alignment: &Alignment) -> io::Result<()> {
        for record in alignment {
            out.write_all(b">")?;
            out.write_all(record.name().as_bytes())?;
            if let Some(description) = record.description() {
                out.write_all(b" ")?;
                out.write_all(description.as_bytes())?;
            }
            out.write_all(b"\n")?;

            let sequence = record.sequence();
            if self.line_width == 0 {
                out.write_all(sequence.as_bytes())?;
                out.write_all(b"\n")?;
                continue;
            }
            // Width counts characters, lines never split a multi-byte one
            let mut line_start = 0;
            for (count, (offset, _)) in sequence.char_indices().enumerate() {
                if count > 0 && count % self.line_width == 0 {
                    out.write_all(sequence[line_start..offset].as_bytes())?;
                    out.write_all(b"\n")?;
                    line_start = offset;
                }
            }
            out.write_all(sequence[line_start..].as_bytes())?;
            out.write_all(b"\n")?;
        }
        out.flush()
    }

    /// Creates (or truncates) the file at `path` and writes `alignment` to it.
    pub fn write_file<P: AsRef<Path>>(&self, path: P, alignment: &Alignment) -> io::Result<()> {
        let file = File::create(path)?;
        self.write(BufWriter::new(file), alignment)
    }

    /// Returns the FASTA text of `alignment`.
    pub fn to_string(&self, alignment: &Alignment) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write(&mut buffer, alignment);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}
