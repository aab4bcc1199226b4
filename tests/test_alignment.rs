use ancestree::alignment::{
    Alignment, AlignmentRecord, FastaWriter, combine_fasta_files, convert_ancestral_states, fasta, merge,
    read_ancestral_states,
};
use ancestree::parser::ParsingErrorType;
use ancestree::read_fasta_file;
use std::fs;
use std::path::Path;

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new("tests").join("fixtures").join(name)
}

// --- FASTA ---
#[test]
fn test_read_fasta_fixture() {
    let alignment = read_fasta_file(fixture("kiwi.fasta")).unwrap();

    assert_eq!(alignment.names(), vec!["Apteryx_australis", "Apteryx_rowi", "Apteryx_mantelli"]);
    assert_eq!(alignment.records()[0].sequence(), "ACGTACGTACGTAC");
    assert_eq!(alignment.records()[0].description(), Some("tokoeka"));
    assert_eq!(alignment.records()[1].description(), None);
    assert_eq!(alignment.get("Apteryx_mantelli").unwrap().description(), Some("North Island brown kiwi"));
}

#[test]
fn test_fasta_write_then_read_keeps_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.fasta");
    let alignment = read_fasta_file(fixture("kiwi.fasta")).unwrap();

    FastaWriter::with_line_width(5).write_file(&path, &alignment).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with(">Apteryx_australis tokoeka\nACGTA\nCGTAC\nGTAC\n"));
    assert_eq!(read_fasta_file(&path).unwrap(), alignment);
}

#[test]
fn test_fasta_reports_line_of_bad_record() {
    let err = fasta::parse_str(">A\nACGT\n>B\nAC\n>A\nGG\n").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::DuplicateRecord("A".to_string()));
    assert!(err.to_string().contains("on line 5"));
}

// --- ANCESTRAL STATES ---
#[test]
fn test_read_ancestral_states_fixture() {
    let alignment = read_ancestral_states(fixture("marginal_states.txt")).unwrap();

    assert_eq!(alignment.names(), vec!["ROOT", "Node1", "Node2"]);
    assert_eq!(alignment.records()[0].sequence(), "ACGTACGTACGTAN");
    assert_eq!(alignment.records()[1].sequence(), "ACGTACGNACGTAC");
    assert_eq!(alignment.records()[2].sequence(), "NNGTACGTACGTAC");
    assert!(alignment.iter().all(|r| !r.sequence().contains('?')));
}

#[test]
fn test_convert_ancestral_states_writes_two_line_records() {
    let dir = tempfile::tempdir().unwrap();
    let fasta_path = dir.path().join("internal.fasta");

    let converted = convert_ancestral_states(fixture("marginal_states.txt"), &fasta_path).unwrap();
    assert_eq!(converted.len(), 3);
    assert_eq!(
        fs::read_to_string(&fasta_path).unwrap(),
        ">ROOT\nACGTACGTACGTAN\n>Node1\nACGTACGNACGTAC\n>Node2\nNNGTACGTACGTAC\n"
    );
}

#[test]
fn test_malformed_state_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let states = dir.path().join("states");
    fs::write(&states, "ROOT ACGT\nNode1 AC GT\n").unwrap();

    let err = read_ancestral_states(&states).unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::MalformedStateRecord(_)));
    assert!(err.to_string().contains("on line 2"));
}

// --- MERGING ---
#[test]
fn test_merge_keeps_order_and_duplicates() {
    let first = Alignment::from_records(vec![AlignmentRecord::new("A", "ACGT"), AlignmentRecord::new("B", "ACGA")]);
    let second = Alignment::from_records(vec![AlignmentRecord::new("Node1", "ACNT"), AlignmentRecord::new("A", "TT")]);

    let merged = merge(first.clone(), second.clone());
    assert_eq!(merged.len(), first.len() + second.len());
    assert_eq!(merged.names(), vec!["A", "B", "Node1", "A"]);
    assert_eq!(merged.records()[3].sequence(), "TT");
}

#[test]
fn test_merge_with_empty() {
    let first = Alignment::from_records(vec![AlignmentRecord::new("A", "ACGT")]);
    assert_eq!(merge(first.clone(), Alignment::new()), first);
    assert_eq!(merge(Alignment::new(), first.clone()), first);
}

#[test]
fn test_combine_fasta_files() {
    let dir = tempfile::tempdir().unwrap();
    let internal = dir.path().join("internal.fasta");
    let output = dir.path().join("combined.fasta");
    convert_ancestral_states(fixture("marginal_states.txt"), &internal).unwrap();

    let combined = combine_fasta_files(fixture("kiwi.fasta"), &internal, &output, &FastaWriter::default()).unwrap();
    assert_eq!(combined.len(), 6);
    assert_eq!(
        read_fasta_file(&output).unwrap().names(),
        vec!["Apteryx_australis", "Apteryx_rowi", "Apteryx_mantelli", "ROOT", "Node1", "Node2"]
    );
}
