//! Basic low-level byte parser functionality.
//!
//! This module provides the [ByteParser] the Newick parser is built on,
//! its byte sources, and the [ParsingError] reported for malformed input.

pub mod byte_parser;
pub mod byte_source;
pub mod parsing_error;

pub use byte_parser::ByteParser;
pub use parsing_error::{ParsingError, ParsingErrorType};
