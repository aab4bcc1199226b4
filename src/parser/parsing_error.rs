//! Error types for the Newick, FASTA and ancestral-state parsers.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for representing
//! and reporting errors that occur while reading trees and alignments.

use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use std::error::Error;
use std::fmt;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================€=
/// Error types that can occur while parsing trees, alignments and
/// ancestral-state tables.
#[derive(PartialEq, Debug, Clone)]
pub enum ParsingErrorType {
    IoError(String),
    UnexpectedEOF,
    UnclosedComment,
    InvalidNewickString(String),
    InvalidBranchLength(String),
    UnlabeledLeaf,
    DuplicateLabel(String),
    InvalidFastaRecord(String),
    DuplicateRecord(String),
    MalformedStateRecord(String),
}

/// Where in the input an error occurred.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Location {
    /// Byte offset (Newick input)
    Byte(usize),
    /// 1-based line number (line-based formats)
    Line(usize),
    /// No position available, e.g. for I/O errors
    Unknown,
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================$=
/// Parsing error with contextual information (location and surrounding text).
#[derive(Debug)]
pub struct ParsingError {
    kind: ParsingErrorType,
    location: Location,
    context: String,
}

impl ParsingError {
    /// Create a ParsingError from an error type and parser state
    pub fn from_parser<S: ByteSource>(kind: ParsingErrorType, parser: &ByteParser<S>) -> Self {
        Self {
            kind,
            location: Location::Byte(parser.position()),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Create a ParsingError for a line-based format, with the line as context.
    pub fn at_line(kind: ParsingErrorType, line_number: usize, line: &str) -> Self {
        let context: String = line.chars().take(DEFAULT_CONTEXT_LENGTH).collect();
        Self {
            kind,
            location: Location::Line(line_number),
            context,
        }
    }

    /// Convenience constructor for UnexpectedEOF
    pub fn unexpected_eof<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnexpectedEOF, parser)
    }

    /// Convenience constructor for UnclosedComment
    pub fn unclosed_comment<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnclosedComment, parser)
    }

    /// Convenience constructor for InvalidNewickString
    pub fn invalid_newick_string<S: ByteSource>(parser: &ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidNewickString(msg), parser)
    }

    /// Convenience constructor for InvalidBranchLength
    pub fn invalid_branch_length<S: ByteSource>(parser: &ByteParser<S>, value: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidBranchLength(value), parser)
    }

    /// Convenience constructor for UnlabeledLeaf
    pub fn unlabeled_leaf<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnlabeledLeaf, parser)
    }

    /// Convenience constructor for DuplicateLabel
    pub fn duplicate_label<S: ByteSource>(parser: &ByteParser<S>, label: String) -> Self {
        Self::from_parser(ParsingErrorType::DuplicateLabel(label), parser)
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the location where the error occurred
    pub fn location(&self) -> Location {
        self.location
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Main error message
        match &self.kind {
            ParsingErrorType::IoError(msg) => write!(f, "IO error - {msg}")?,
            ParsingErrorType::UnexpectedEOF => write!(f, "Unexpected end of file")?,
            ParsingErrorType::UnclosedComment => write!(f, "Unclosed comment")?,
            ParsingErrorType::InvalidNewickString(msg) => write!(f, "Invalid newick string: {msg}")?,
            ParsingErrorType::InvalidBranchLength(value) => write!(f, "Invalid branch length '{value}'")?,
            ParsingErrorType::UnlabeledLeaf => write!(f, "Leaf without label")?,
            ParsingErrorType::DuplicateLabel(label) => write!(f, "Leaf label '{label}' occurs more than once")?,
            ParsingErrorType::InvalidFastaRecord(msg) => write!(f, "Invalid FASTA record: {msg}")?,
            ParsingErrorType::DuplicateRecord(name) => write!(f, "Record name '{name}' occurs more than once")?,
            ParsingErrorType::MalformedStateRecord(msg) => write!(f, "Malformed ancestral state record: {msg}")?,
        }

        // Additional position information
        match self.location {
            Location::Byte(position) => write!(f, " at position {position}")?,
            Location::Line(line) => write!(f, " on line {line}")?,
            Location::Unknown => {}
        }

        // Additional context if available
        if !self.context.is_empty() {
            write!(f, "\n  Context: {}", self.context)?;
        }

        Ok(())
    }
}

impl Error for ParsingError {}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        ParsingError {
            kind: ParsingErrorType::IoError(err.to_string()),
            location: Location::Unknown,
            context: String::new(),
        }
    }
}
