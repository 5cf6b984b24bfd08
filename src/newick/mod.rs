//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [NewickParser] to parse a Newick string into a
//! [Tree], and [to_newick] to write one.
//!
//! # Quick API
//! * [`parse_file`] - parses the single tree of a file
//! * [`parse_str`] - parses a single tree from a string
//!
//! # Format
//! The Newick format has the following simple grammar:
//! * `tree ::= vertex ';'`
//! * `vertex ::= leaf | internal_vertex`
//! * `internal_vertex ::= '(' vertex (',' vertex)* ')' [label] [branch_length]`
//! * `leaf ::= label [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch_length
//! * Labels may be single-quoted, with `''` for a literal quote
//! * Comments are square brackets and can occur anywhere whitespace is allowed
//! * Labels of internal vertices (often support values) are kept,
//!   so they can serve as reroot targets

mod defs;
pub mod parser;
pub mod writer;

pub use parser::NewickParser;
pub use writer::{to_newick, write_newick};

use crate::model::Tree;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a file containing exactly one Newick tree.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * [Tree] - Tree parsed from the file
/// * [ParsingError] - If file reading fails, the Newick format is invalid
///   or anything but whitespace and comments follows the first tree
///
/// # Example
/// ```no_run
/// use allelog::newick::parse_file;
///
/// let tree = parse_file("OG0001234.nwk")?;
/// println!("Parsed gene tree with {} genes", tree.num_leaves());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Tree, ParsingError> {
    let mut byte_parser = ByteParser::from_file(path)?;
    parse_single(&mut byte_parser)
}

/// Parses a string containing exactly one Newick tree.
///
/// # Example
/// ```
/// use allelog::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata));")?;
/// assert_eq!(tree.num_leaves(), 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    parse_single(&mut byte_parser)
}

fn parse_single<B: ByteSource>(byte_parser: &mut ByteParser<B>) -> Result<Tree, ParsingError> {
    let tree = NewickParser::new().parse_str(byte_parser)?;

    byte_parser.skip_comment_and_whitespace()?;
    if !byte_parser.is_eof() {
        return Err(ParsingError::invalid_newick_string(
            byte_parser,
            "Expected a single tree, but found more input after ';'".to_string(),
        ));
    }

    Ok(tree)
}
