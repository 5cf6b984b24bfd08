use allelog::newick::parse_file;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    Path::new("tests").join("fixtures").join(name)
}

fn allelog(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_allelog"))
        .args(args)
        .output()
        .unwrap()
}

fn six_taxa_args() -> Vec<String> {
    vec![
        fixture("six_taxa.nwk").display().to_string(),
        fixture("six_taxa.tsv").display().to_string(),
        "-t".to_string(),
        "2".to_string(),
    ]
}

const SIX_TAXA_TABLE: &str = "gene\torthogroup\n\
A\tOG1\n\
B\tOG1\n\
C\tnon_OG\n\
D\tnon_OG\n\
E\tnon_OG\n\
F\tnon_OG\n";

// --- OUTPUT TARGETS ---
#[test]
fn test_table_to_stdout() {
    let args = six_taxa_args();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let output = allelog(&args);

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), SIX_TAXA_TABLE);
}

#[test]
fn test_table_and_tree_to_files() {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("orthogroups.tsv");
    let tree = dir.path().join("rerooted.nwk");

    let mut args = six_taxa_args();
    args.extend([
        "-o".to_string(),
        table.display().to_string(),
        "-r".to_string(),
        "F".to_string(),
        "--write-tree".to_string(),
        tree.display().to_string(),
    ]);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let output = allelog(&args);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    // Unassigned genes follow the pre-order of the rerooted tree
    assert_eq!(
        std::fs::read_to_string(&table).unwrap(),
        "gene\torthogroup\nA\tOG1\nB\tOG1\nF\tnon_OG\nE\tnon_OG\nC\tnon_OG\nD\tnon_OG\n"
    );

    let rerooted = parse_file(&tree).unwrap();
    assert_eq!(rerooted.num_leaves(), 6);
    let f = rerooted.find_by_label("F").unwrap();
    assert_eq!(rerooted[f].parent(), Some(rerooted.root_index()));
    assert_eq!(rerooted[f].length_or_zero(), 0.075);
}

// --- FAILURES ---
#[test]
fn test_unknown_reroot_label_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("orthogroups.tsv");

    let mut args = six_taxa_args();
    args.extend([
        "-o".to_string(),
        table.display().to_string(),
        "-r".to_string(),
        "outgroup".to_string(),
    ]);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let output = allelog(&args);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error: No vertex labelled 'outgroup' found in tree"));
    assert!(!table.exists());
}

#[test]
fn test_missing_tree_file_exits_with_error() {
    let output = allelog(&["tests/fixtures/does_not_exist.nwk", "tests/fixtures/six_taxa.tsv"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr).unwrap().starts_with("Error: "));
}

#[test]
fn test_rejected_missing_taxon_policy() {
    let mut args = six_taxa_args();
    args[1] = fixture("brassicaceae.tsv").display().to_string();
    args.extend(["--missing-taxon".to_string(), "reject".to_string()]);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let output = allelog(&args);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error: Gene 'A' has no taxon assigned"));
}
