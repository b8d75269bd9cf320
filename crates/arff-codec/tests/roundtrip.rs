//! Decode/encode round-trip tests.

use arff_codec::{decode, encode_dataset, encode_relation};
use arff_model::{Attribute, AttributeType, Relation, Row, Value};
use proptest::prelude::*;

const KDD_SAMPLE: &str = "\
@relation 'kdd sample'
@attribute duration integer
@attribute protocol_type {'tcp','udp'}
@attribute note string
@attribute class {normal,anomaly}
@data
0,tcp,'a b',normal
5,udp,?,anomaly
";

#[test]
fn encodes_header_then_data() {
    let decoded = decode(KDD_SAMPLE).unwrap();
    insta::assert_snapshot!(encode_relation(&decoded.relation), @r"
    @RELATION 'kdd sample'

    @ATTRIBUTE duration INTEGER
    @ATTRIBUTE protocol_type {tcp,udp}
    @ATTRIBUTE note STRING
    @ATTRIBUTE class {normal,anomaly}

    @DATA
    0,tcp,'a b',normal
    5,udp,?,anomaly
    ");
}

#[test]
fn attribute_section_survives_reencoding() {
    let text = "\
@relation r
@attribute 'src bytes' real
@attribute when date 'yyyy-MM-dd HH:mm'
@attribute flag {'S0','REJ','S F'}
@attribute bare
@data
1,'2024-01-01 10:00',S0,3
";
    let first = decode(text).unwrap();
    let second = decode(&encode_relation(&first.relation)).unwrap();
    assert_eq!(second.relation.attributes, first.relation.attributes);
    assert_eq!(second.relation.rows, first.relation.rows);
    // The untyped declaration is written back as NUMERIC.
    assert_eq!(second.declarations[3].kind, Some(AttributeType::Numeric));
}

#[test]
fn encode_dataset_uses_given_relation_name() {
    let dataset = decode(KDD_SAMPLE).unwrap().relation.into_dataset();
    let text = encode_dataset(&dataset, "train_set");
    let reread = decode(&text).unwrap().relation;
    assert_eq!(reread.name, "train_set");
    assert_eq!(reread.rows.len(), 2);
}

fn string_relation(values: &[String]) -> Relation {
    let attributes = vec![
        Attribute::new("id", AttributeType::Integer),
        Attribute::new("text", AttributeType::String),
    ];
    let names: Vec<String> = attributes.iter().map(|a| a.name.clone()).collect();
    let rows = values
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            Row::aligned(&names, vec![Value::Number(idx as f64), Value::text(value.clone())])
        })
        .collect();
    Relation::new("strings", attributes, rows)
}

proptest! {
    #[test]
    fn arbitrary_strings_round_trip(values in proptest::collection::vec(".*", 0..8)) {
        let relation = string_relation(&values);
        let decoded = decode(&encode_relation(&relation)).unwrap();
        prop_assert_eq!(decoded.relation, relation);
    }

    #[test]
    fn finite_numbers_round_trip(numbers in proptest::collection::vec(-1.0e12f64..1.0e12, 1..16)) {
        let attributes = vec![Attribute::new("x", AttributeType::Real)];
        let names = vec!["x".to_string()];
        let rows = numbers
            .iter()
            .map(|&n| Row::aligned(&names, vec![Value::Number(n)]))
            .collect();
        let relation = Relation::new("numbers", attributes, rows);
        let decoded = decode(&encode_relation(&relation)).unwrap();
        prop_assert_eq!(decoded.relation, relation);
    }
}
