//! Basic low-level parsing functionality shared by the format readers.
pub mod byte_parser;
pub mod byte_source;
pub mod parsing_error;
pub mod utils;

pub use byte_parser::ByteParser;
pub use byte_source::{ByteSource, InMemoryByteSource};
pub use parsing_error::{Location, ParsingError, ParsingErrorType};
