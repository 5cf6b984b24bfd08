//! Newick format writing of trees.

use crate::model::{Tree, Vertex};
use crate::newick::defs::NEWICK_SPECIAL_CHARS;
use std::io::{self, Write};

/// Extra buffer in Newick string length/capacity estimate
const BUFFER_CHARS: usize = 10;

/// Estimated characters per vertex: label, branch length and punctuation
const CHARS_PER_VERTEX: usize = 16;

/// Returns the Newick representation of a tree with closing semicolon.
///
/// Leaf and internal labels are written (quoted if necessary),
/// as are all set branch lengths, including one on the root.
///
/// # Example
/// ```
/// use allelog::model::{BranchLength, Tree};
/// use allelog::newick::to_newick;
///
/// let mut tree = Tree::new();
/// let a = tree.add_leaf(Some(BranchLength::new(1.0)), "A".to_string());
/// let b = tree.add_leaf(Some(BranchLength::new(2.5)), "Baillon's Crake".to_string());
/// tree.add_root(vec![a, b], None, None);
///
/// assert_eq!(to_newick(&tree), "(A:1,'Baillon''s Crake':2.5);");
/// ```
pub fn to_newick(tree: &Tree) -> String {
    let mut newick = String::with_capacity(tree.num_vertices() * CHARS_PER_VERTEX + BUFFER_CHARS);
    if !tree.is_root_set() {
        return newick;
    }

    // Explicit stack of (vertex, next child position) to avoid deep recursion
    let mut stack: Vec<(&Vertex, usize)> = vec![(tree.root(), 0)];
    while let Some((vertex, next_child)) = stack.pop() {
        let children = vertex.children();

        if next_child < children.len() {
            newick.push(if next_child == 0 { '(' } else { ',' });
            stack.push((vertex, next_child + 1));
            stack.push((&tree[children[next_child]], 0));
            continue;
        }

        if vertex.is_internal() {
            newick.push(')');
        }
        if let Some(label) = vertex.label() {
            newick.push_str(&escape_label(label));
        }
        if let Some(branch_length) = vertex.branch_length() {
            newick.push(':');
            newick.push_str(&branch_length.to_string());
        }
    }

    newick.push(';');
    newick
}

/// Writes the Newick representation of `tree` followed by a newline.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_newick<W: Write>(mut writer: W, tree: &Tree) -> io::Result<()> {
    writer.write_all(to_newick(tree).as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Escapes a label for safe use in Newick strings.
///
/// Labels containing special characters (punctuation, delimiters, whitespace)
/// are wrapped in single quotes, with internal single quotes doubled.
/// Other labels are returned unchanged.
///
/// # Examples
/// ```
/// # use allelog::newick::writer::escape_label;
/// assert_eq!(escape_label("Pukeko"), "Pukeko");
/// assert_eq!(escape_label("Pu[ke]ko"), "'Pu[ke]ko'");
/// assert_eq!(escape_label("Australasian Swamphen"), "'Australasian Swamphen'");
/// assert_eq!(escape_label("Baillon's_Crake"), "'Baillon''s_Crake'");
/// ```
pub fn escape_label(label: &str) -> String {
    if label.contains(NEWICK_SPECIAL_CHARS) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}
