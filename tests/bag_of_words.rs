// Bag-of-words end-to-end tests: tokenize documents, index them with the
// AppendFirst policy, and render the index.
use chain_hash::bag_of_words::bag_of_words_with_capacity;
use chain_hash::{bag_of_words, tokenize, BagOfWordsDisplay};
use std::collections::BTreeMap;

// Parse the rendered index back into a map. The format is one
// ` "token": [a, b]` entry per line between braces.
fn parse_rendered(s: &str) -> BTreeMap<String, Vec<usize>> {
    let lines: Vec<&str> = s.lines().collect();
    assert_eq!(lines.first(), Some(&"{"));
    assert_eq!(lines.last(), Some(&"}"));
    let body = &lines[1..lines.len() - 1];
    let mut out = BTreeMap::new();
    for (i, line) in body.iter().enumerate() {
        let is_last = i + 1 == body.len();
        assert_eq!(line.ends_with(','), !is_last, "bad separator on {:?}", line);
        let line = line.trim().trim_end_matches(',');
        let (key, list) = line.split_once(": ").expect("key: list");
        let key = key.trim_matches('"').to_string();
        let list = list.trim_start_matches('[').trim_end_matches(']');
        let docs = if list.is_empty() {
            Vec::new()
        } else {
            list.split(", ").map(|d| d.parse().unwrap()).collect()
        };
        out.insert(key, docs);
    }
    out
}

#[test]
fn two_documents_index() {
    let docs = ["La casa es grande", "La casa es bonita"];
    let idx = bag_of_words(&docs);
    assert_eq!(idx.get("casa"), Ok(&vec![0, 1]));
    assert_eq!(idx.get("grande"), Ok(&vec![0]));
    assert_eq!(idx.get("bonita"), Ok(&vec![1]));
    assert_eq!(idx.get("la"), Ok(&vec![0, 1]));
    assert_eq!(idx.get("es"), Ok(&vec![0, 1]));
    assert_eq!(idx.len(), 5);
    assert!(!idx.contains("La"));
}

#[test]
fn rendered_index_is_well_formed() {
    let docs = ["La casa es grande", "La casa es bonita"];
    let idx = bag_of_words(&docs);
    let rendered = BagOfWordsDisplay(&idx).to_string();
    let parsed = parse_rendered(&rendered);

    let expected: BTreeMap<String, Vec<usize>> = [
        ("bonita", vec![1]),
        ("casa", vec![0, 1]),
        ("es", vec![0, 1]),
        ("grande", vec![0]),
        ("la", vec![0, 1]),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    assert_eq!(parsed, expected);
}

#[test]
fn sample_corpus_survives_growth() {
    let docs = [
        "La casa es grande",
        "El gato está en la casa",
        "La casa es bonita y grande",
        "El sol brilla sobre la casa",
    ];
    // Start from a single bucket so building the index rehashes repeatedly.
    let idx = bag_of_words_with_capacity(&docs, 1);
    assert!(idx.bucket_count() > 1);
    assert_eq!(idx.get("casa"), Ok(&vec![0, 1, 2, 3]));
    assert_eq!(idx.get("la"), Ok(&vec![0, 1, 2, 3]));
    assert_eq!(idx.get("el"), Ok(&vec![1, 3]));
    assert_eq!(idx.get("grande"), Ok(&vec![0, 2]));
    assert_eq!(idx.get("está"), Ok(&vec![1]));
    assert_eq!(idx.get("sol"), Ok(&vec![3]));

    let distinct: std::collections::BTreeSet<String> =
        docs.iter().flat_map(|d| tokenize(d)).collect();
    assert_eq!(idx.len(), distinct.len());
}
