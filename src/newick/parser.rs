//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, which parses a single
//! Newick string into a [Tree].

use crate::model::{BranchLength, Tree, VertexIndex};
use crate::newick::defs::{DEFAULT_NUM_VERTICES_GUESS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Parser (configuration) for Newick format phylogenetic trees with
/// arbitrary vertex degrees.
///
/// Leaf labels are taken verbatim (unquoted labels keep their underscores).
/// Labels after a closing parenthesis are stored on the internal vertex.
///
/// # Configuration
/// * [`with_num_vertices(num_vertices)`](Self::with_num_vertices)
///     - Expected number of vertices, used for pre-allocation.
///
/// # Example
/// ```
/// use allelog::newick::NewickParser;
/// use allelog::parser::ByteParser;
///
/// let input = "((A_meleagrides:1.0,A_vulturinum:1.0)Numididae:0.5,N_meleagris:1.5,G_plumifera:1.5);";
/// let mut byte_parser = ByteParser::for_str(input);
/// let tree = NewickParser::new().parse_str(&mut byte_parser).unwrap();
/// assert_eq!(tree.num_leaves(), 4);
/// assert_eq!(tree.root().children().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct NewickParser {
    num_vertices: usize,
}

impl NewickParser {
    /// Creates a new [NewickParser] with default settings.
    pub fn new() -> Self {
        Self {
            num_vertices: DEFAULT_NUM_VERTICES_GUESS,
        }
    }

    /// Sets the expected number of vertices of parsed trees.
    ///
    /// This allows pre-allocation of the tree arena.
    pub fn with_num_vertices(mut self, num_vertices: usize) -> Self {
        self.num_vertices = num_vertices;
        self
    }
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Parses a single Newick tree from the given [ByteParser].
    ///
    /// Parsing stops right after the terminating `;`.
    ///
    /// # Arguments
    /// * `parser` - The byte parser positioned at the start of a Newick tree string
    ///
    /// # Returns
    /// * `Ok(Tree)` - The parsed phylogenetic tree
    /// * `Err(ParsingError)` - If the Newick format is invalid
    pub fn parse_str<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Tree, ParsingError> {
        let mut tree = Tree::with_capacity(self.num_vertices);

        parser.skip_comment_and_whitespace()?;
        let root_index = self.parse_vertex(parser, &mut tree)?;

        // Consume the terminating semicolon
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected ';' at end of tree but found {:?}", next_char),
            ));
        }

        tree.set_root(root_index);
        log::trace!(
            "Parsed Newick tree with {} vertices ({} leaves)",
            tree.num_vertices(),
            tree.num_leaves()
        );
        Ok(tree)
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl NewickParser {
    /// Parses a vertex (either internal vertex or leaf) with all its
    /// descendants and returns its index:
    /// - `(child[,child]*)[label][:branch_length]` or `label[:branch_length]`
    /// - Open parentheses are kept on an explicit stack of child lists,
    ///   so nesting depth is not limited by the call stack
    fn parse_vertex<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
        tree: &mut Tree,
    ) -> Result<VertexIndex, ParsingError> {
        let mut open: Vec<Vec<VertexIndex>> = Vec::new();

        loop {
            // Descend through opening parentheses down to the next leaf
            parser.skip_comment_and_whitespace()?;
            if parser.consume_if(b'(') {
                open.push(Vec::new());
                continue;
            }
            let mut finished = self.parse_leaf(parser, tree)?;

            // Close internal vertices until a sibling follows
            loop {
                let Some(mut children) = open.pop() else {
                    return Ok(finished);
                };
                children.push(finished);

                parser.skip_comment_and_whitespace()?;
                if parser.consume_if(b',') {
                    open.push(children);
                    break;
                }
                if parser.consume_if(b')') {
                    finished = self.finish_internal_vertex(parser, tree, children)?;
                    continue;
                }
                if parser.is_eof() {
                    return Err(ParsingError::unexpected_eof(parser));
                }
                let next_char = parser.peek().map(char::from);
                return Err(ParsingError::invalid_newick_string(
                    parser,
                    format!("Expected ',' or ')' after child but found {:?}", next_char),
                ));
            }
        }
    }

    /// Parses `[label][:branch_length]` after a closing `)` and adds the
    /// internal vertex over `children` to the tree.
    fn finish_internal_vertex<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
        tree: &mut Tree,
        children: Vec<VertexIndex>,
    ) -> Result<VertexIndex, ParsingError> {
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        let label = (!label.is_empty()).then_some(label);
        let branch_length = self.parse_branch_length(parser)?;

        Ok(tree.add_internal(children, branch_length, label))
    }

    /// Parses leaf vertex and adds it to tree:
    /// - `label[:branch_length]`
    /// - Label must not be empty
    fn parse_leaf<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
        tree: &mut Tree,
    ) -> Result<VertexIndex, ParsingError> {
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        if label.is_empty() {
            if parser.is_eof() {
                return Err(ParsingError::unexpected_eof(parser));
            }
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected leaf label but found {:?}", next_char),
            ));
        }
        let branch_length = self.parse_branch_length(parser)?;

        Ok(tree.add_leaf(branch_length, label))
    }

    /// Parses optional branch length `[:number]`:
    /// - Skips comments/whitespace before and after `:`
    /// - Supports scientific notation (e.g., `1.5e-10`)
    ///
    /// # Returns
    /// - `Ok(Some(branch_length))` if found a valid branch length
    /// - `Ok(None)` if no branch length found
    /// - [ParsingError] if the value is malformed, negative or not finite
    fn parse_branch_length<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<BranchLength>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        let mut branch_length_str = String::new();
        while let Some(b) = parser.peek() {
            // Valid characters for a float: digits, '.', '-', '+', 'e', 'E'
            if b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E') {
                branch_length_str.push(b as char);
                parser.next_byte();
            } else {
                break;
            }
        }

        let value: f64 = branch_length_str.parse().map_err(|_| {
            ParsingError::invalid_branch_length(parser, format!("'{}'", branch_length_str))
        })?;
        let branch_length = BranchLength::try_new(value).ok_or_else(|| {
            ParsingError::invalid_branch_length(
                parser,
                format!("{} (must be non-negative and finite)", value),
            )
        })?;
        Ok(Some(branch_length))
    }
}
