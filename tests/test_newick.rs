use ancestree::newick::{NewickParser, NewickStyle, parse_file, parse_first_in_file, parse_str, to_newick};
use ancestree::parser::{ByteParser, ParsingErrorType};
use std::path::Path;

// --- TESTS NEWICK STRING PARSING ---
#[test]
fn test_basic_binary_tree() {
    let newick = "((A:1.0,B:2.0):3.0,C:4.0):0.5;";
    let tree = parse_str(newick).unwrap();

    // Test counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 1);
    assert_eq!(tree.num_vertices(), 5);
    assert!(tree.is_bifurcating());

    // Test relationships
    // - Root has children (internal, C)
    let root = tree.root();
    let root_index = root.index();
    let [root_left, root_right] = root.children() else {
        panic!("root should have two children");
    };

    // - Internal vertex has children (A, B)
    let internal = tree.vertex(*root_left);
    assert!(internal.is_internal());
    let [a_index, b_index] = internal.children() else {
        panic!("internal vertex should have two children");
    };

    // - Labels and branch lengths
    assert_eq!(tree.vertex(*a_index).label(), Some("A"));
    assert_eq!(tree.vertex(*b_index).label(), Some("B"));
    assert_eq!(tree.vertex(*root_right).label(), Some("C"));
    assert_eq!(*tree.vertex(*b_index).branch_length().unwrap(), 2.0);
    assert_eq!(*root.branch_length().unwrap(), 0.5);

    // - Parent relationships
    assert_eq!(internal.parent_index(), Some(root_index));
    assert_eq!(tree.vertex(*a_index).parent_index(), Some(*root_left));
    assert_eq!(tree.vertex(*root_right).parent_index(), Some(root_index));
    assert!(tree.is_valid());
}

#[test]
fn test_multifurcating_tree_with_internal_labels() {
    let newick = "((Eudyptes_robustus:1,Eudyptes_sclateri:1,Eudyptes_pachyrhynchus:1)97:0.5,Megadyptes_antipodes:2)ROOT;";
    let tree = parse_str(newick).unwrap();

    assert_eq!(tree.num_leaves(), 4);
    assert_eq!(tree.root().label(), Some("ROOT"));
    let crested = tree.vertex(tree.root().children()[0]);
    assert_eq!(crested.num_children(), 3);
    assert_eq!(crested.label(), Some("97"));
    assert!(!tree.is_bifurcating());
}

#[test]
fn test_underscores_are_literal() {
    let tree = parse_str("(Spheniscus_humboldti,Spheniscus_mendiculus);").unwrap();
    assert_eq!(tree.leaf_labels(), vec!["Spheniscus_humboldti", "Spheniscus_mendiculus"]);
}

#[test]
fn test_tree_with_quoted_labels() {
    let newick = "(('Taxon one':1.5,'Second''s taxon':2.5):3.0,'3rd Taxon':4.0):0.0;";
    let tree = parse_str(newick).unwrap();

    assert_eq!(tree.num_leaves(), 3);
    assert!(tree.find_leaf("Taxon one").is_some());
    assert!(tree.find_leaf("Second's taxon").is_some());
    assert!(tree.find_leaf("3rd Taxon").is_some());
}

#[test]
fn test_tree_with_scientific_notation() {
    let newick = "((A:1e-5,B:2.5E+3):1.0e2,C:3.14E-10):0.0;";
    let tree = parse_str(newick).unwrap();

    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(*tree.find_leaf("B").unwrap().branch_length().unwrap(), 2500.0);
}

#[test]
fn test_optional_branch_length() {
    let tree = parse_str("((A:1.0,B),C:4.0);").unwrap();
    assert_eq!(tree.find_leaf("B").unwrap().branch_length(), None);
    assert_eq!(tree.root().branch_length(), None);
}

#[test]
fn test_newick_with_comments() {
    let newick_with_comment = "[A tree of] ([Shags!] C:[King Commentoran] 2.2, (A[Great Commentoran]:0.33, B[Pied Commentoran]:0.33):1.87):0.0[The end.];";
    let tree = parse_str(newick_with_comment).unwrap();
    assert_eq!(tree.leaf_labels(), vec!["C", "A", "B"]);
}

#[test]
fn test_duplicate_labels_allowed_when_configured() {
    let mut byte_parser = ByteParser::for_str("(A,A,B);");
    let tree = NewickParser::new()
        .allow_duplicate_labels()
        .parse_str(&mut byte_parser)
        .unwrap();
    assert_eq!(tree.num_leaves(), 3);
}

// --- TESTS DEALING WITH CORRUPT NEWICK STRINGS ---
#[test]
fn test_missing_semicolon() {
    let err = parse_str("((A:1.0,B:2.0):3.0,C:4.0):0.5").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidNewickString(_)));
}

#[test]
fn test_missing_comma() {
    assert!(parse_str("((A:1.0 B:2.0):3.0,C:4.0):0.5;").is_err());
}

#[test]
fn test_unmatched_parentheses() {
    assert!(parse_str("((A:1.0,B:2.0:3.0,C:4.0):0.5;").is_err());
}

#[test]
fn test_invalid_branch_length() {
    let err = parse_str("((A:1.0,B:abc):3.0,C:4.0):0.5;").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidBranchLength(_)));
}

#[test]
fn test_negative_branch_length() {
    let err = parse_str("(A:1.0,B:-2.0);").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::InvalidBranchLength("-2.0".to_string()));
}

#[test]
fn test_unlabeled_leaf() {
    let err = parse_str("(A,,B);").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnlabeledLeaf);
}

#[test]
fn test_duplicate_leaf_label() {
    let err = parse_str("((A,B),A);").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::DuplicateLabel("A".to_string()));
}

#[test]
fn test_unclosed_comment() {
    let err = parse_str("(A,B)[unfinished;").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnclosedComment);
}

// --- TESTS WRITING ---
#[test]
fn test_write_reproduces_input() {
    let inputs = [
        "((A:1,B:2)90:0.5,C:3,D:4)ROOT;",
        "(('Little Spotted Kiwi':1,'Rowi''s':1):0.5,Great_Spotted_Kiwi:1.5):0.1;",
        "(A,(B,(C,(D,E))));",
    ];
    for newick in inputs {
        let tree = parse_str(newick).unwrap();
        assert_eq!(to_newick(&tree, NewickStyle::Quoted).unwrap(), newick);
    }
}

#[test]
fn test_plain_style_has_no_quotes() {
    let tree = parse_str("(('Little Spotted Kiwi':1,Rowi:1):0.5,Great_Spotted_Kiwi:1.5);").unwrap();
    let plain = to_newick(&tree, NewickStyle::Plain).unwrap();
    assert_eq!(plain, "((Little_Spotted_Kiwi:1,Rowi:1):0.5,Great_Spotted_Kiwi:1.5);");
    assert!(!plain.contains('\''));
}

#[test]
fn test_plain_style_rejects_structural_label() {
    let tree = parse_str("('A:B',C);").unwrap();
    let err = to_newick(&tree, NewickStyle::Plain).unwrap_err();
    assert_eq!(err.label(), "A:B");
}

#[test]
fn test_deep_tree_round_trip() {
    let depth = 50_000;
    let mut newick = String::new();
    for i in 0..depth {
        newick.push_str(&format!("(l{i},"));
    }
    newick.push_str("last");
    newick.push_str(&")".repeat(depth));
    newick.push(';');

    let tree = parse_str(&newick).unwrap();
    assert_eq!(tree.num_leaves(), depth + 1);
    assert_eq!(to_newick(&tree, NewickStyle::Plain).unwrap(), newick);
}

// --- TESTS PARSING WHOLE FILE ---
#[test]
fn test_parsing_newick_file() {
    let path = Path::new("tests").join("fixtures").join("kiwi_polytomy.nwk");
    let trees = parse_file(&path).unwrap();

    assert_eq!(trees.len(), 2);
    assert_eq!(trees[0].num_leaves(), 7);
    assert_eq!(trees[0].root().num_children(), 4);
    assert!(trees[0].find_leaf("Apteryx sp. Okarito").is_some());
    assert_eq!(trees[1].num_leaves(), 3);
    for tree in &trees {
        assert!(tree.is_valid());
    }

    let first = parse_first_in_file(&path).unwrap();
    assert_eq!(first.leaf_labels(), trees[0].leaf_labels());
}

#[test]
fn test_parsing_missing_file() {
    let err = parse_file("tests/fixtures/does_not_exist.nwk").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::IoError(_)));
}
