//! Writing of orthogroup tables.
//!
//! The table is tab-separated with a `gene\torthogroup` header and one row
//! per [Assignment] entry, e.g.:
//! ```text
//! gene	orthogroup
//! AT1G01010	OG1
//! Bra000001	OG1
//! AT1G01020	non_OG
//! ```

use crate::orthogroup::assignment::Assignment;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Header line of an orthogroup table
pub const REPORT_HEADER: &str = "gene\torthogroup";

/// Writes `assignment` as orthogroup table to `writer`.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_assignment<W: Write>(writer: W, assignment: &Assignment) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    writeln!(writer, "{}", REPORT_HEADER)?;
    for (gene, label) in assignment.iter() {
        writeln!(writer, "{}\t{}", gene, label)?;
    }
    writer.flush()
}

/// Writes `assignment` as orthogroup table to a newly created (or truncated) file.
pub fn write_assignment_file<P: AsRef<Path>>(path: P, assignment: &Assignment) -> io::Result<()> {
    let file = File::create(path)?;
    write_assignment(file, assignment)
}

/// Returns `assignment` as orthogroup table, formatted as by [write_assignment].
///
/// # Errors
/// Returns an I/O error only if formatting into the buffer fails.
pub fn to_table(assignment: &Assignment) -> io::Result<String> {
    let mut buffer = Vec::new();
    write_assignment(&mut buffer, assignment)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
