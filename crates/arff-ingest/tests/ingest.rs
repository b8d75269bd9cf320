//! Integration tests for encoding fallback and nominal-list repair.

use std::io::Write;

use arff_ingest::{
    IngestError, LoadOptions, TextEncoding, load_relation, load_relation_with_options,
    normalize_nominal_lists, read_arff_file,
};
use arff_model::Value;
use proptest::prelude::*;
use tempfile::NamedTempFile;

const LOOSE_HEADER: &str = "@relation kdd\n\
                            @attribute protocol_type { 'tcp', 'udp' }\n\
                            @attribute class {'a','b'}\n\
                            @data\n";

#[test]
fn loose_nominal_list_parses_only_after_normalization() {
    let text = format!("{LOOSE_HEADER}tcp,a\nudp,b\n");

    let strict = LoadOptions::default().with_normalize(false);
    assert!(load_relation_with_options(text.as_bytes(), &strict).is_err());

    let loaded = load_relation(text.as_bytes()).unwrap();
    assert_eq!(loaded.relation.rows.len(), 2);
    assert_eq!(
        loaded.relation.attributes[0].kind.nominal_values(),
        Some(&["tcp".to_string(), "udp".to_string()][..])
    );
}

#[test]
fn normalizes_the_reported_scenario() {
    assert_eq!(
        normalize_nominal_lists("@attribute x { 'a', 'b' }"),
        "@attribute x {'a','b'}"
    );
}

#[test]
fn whitespace_before_comma_in_nominal_list_is_accepted() {
    let loaded = load_relation(b"@relation r\n@attribute c {'a' , 'b'}\n@data\na\n").unwrap();
    assert_eq!(
        loaded.relation.attributes[0].kind.nominal_values(),
        Some(&["a".to_string(), "b".to_string()][..])
    );
    assert_eq!(loaded.relation.rows[0].get("c"), Some(&Value::text("a")));

    let strict = LoadOptions::default().with_normalize(false);
    let loaded =
        load_relation_with_options(b"@relation r\n@attribute c {'a'\t,'b'}\n@data\nb\n", &strict)
            .unwrap();
    assert_eq!(loaded.relation.rows.len(), 1);
}

#[test]
fn windows_1252_upload_falls_back() {
    // 0xE9 is 'é' in Windows-1252 and invalid as a lone UTF-8 byte.
    let mut bytes = b"@relation caf\xe9\n@attribute note string\n@data\n'd\xe9j\xe0 vu'\n".to_vec();
    bytes.extend_from_slice(b"'\x93smart\x94'\n");

    assert!(TextEncoding::Utf8.decode(&bytes).is_err());

    let loaded = load_relation(&bytes).unwrap();
    assert_ne!(loaded.encoding, TextEncoding::Utf8);
    assert_eq!(loaded.relation.name, "caf\u{e9}");
    assert_eq!(
        loaded.relation.rows[0].get("note"),
        Some(&Value::text("d\u{e9}j\u{e0} vu"))
    );
    assert_eq!(loaded.relation.rows.len(), 2);
}

#[test]
fn windows_1252_only_candidate_maps_smart_quotes() {
    let bytes = b"@relation r\n@attribute note string\n@data\n'\x93hi\x94'\n";
    let options = LoadOptions::default().with_encodings(vec![TextEncoding::Windows1252]);
    let loaded = load_relation_with_options(bytes, &options).unwrap();
    assert_eq!(
        loaded.relation.rows[0].get("note"),
        Some(&Value::text("\u{201c}hi\u{201d}"))
    );
}

#[test]
fn exhaustion_reports_last_parse_error() {
    let err = load_relation(b"this is not arff").unwrap_err();
    match &err {
        IngestError::NoCandidateSucceeded { tried, .. } => {
            assert_eq!(tried, "utf-8, latin-1, iso-8859-1, windows-1252");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(matches!(
        err.last_failure(),
        IngestError::Parse {
            encoding: TextEncoding::Windows1252,
            ..
        }
    ));
}

#[test]
fn dropped_rows_are_reported_not_fatal() {
    let text = "@relation r\n@attribute a numeric\n@data\n1\n{0 5}\n2\n";
    let loaded = load_relation(text.as_bytes()).unwrap();
    assert_eq!(loaded.relation.rows.len(), 2);
    assert_eq!(loaded.dropped_rows.len(), 1);
    assert_eq!(loaded.dropped_rows[0].line, 5);
}

#[test]
fn reads_files_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{LOOSE_HEADER}tcp,b").unwrap();
    file.flush().unwrap();

    let loaded = read_arff_file(file.path()).unwrap();
    assert_eq!(loaded.relation.rows.len(), 1);

    let missing = file.path().with_extension("does-not-exist");
    assert!(matches!(
        read_arff_file(&missing),
        Err(IngestError::FileNotFound { .. })
    ));
}

proptest! {
    #[test]
    fn normalization_is_idempotent(text in "(@attribute [a-z]{1,4} )?[{}', \"\ta-z\n]{0,40}") {
        let once = normalize_nominal_lists(&text);
        let twice = normalize_nominal_lists(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalization_never_touches_non_attribute_lines(body in "[{}', \"a-z]{0,30}") {
        let text = format!("1,{body}\n");
        prop_assert_eq!(normalize_nominal_lists(&text), text);
    }
}
