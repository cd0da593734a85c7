//! Property-based tests for the kind lattice and schema inference

use proptest::prelude::*;
use smart_schema::import::CsvImporter;
use smart_schema::inference::{
    InferenceConfig, Kind, Record, Value, classify, detect_format, infer, infer_records, merge,
    merge_schemas,
};
use smart_schema::validation::Validator;

fn kind() -> impl Strategy<Value = Kind> {
    prop::sample::select(Kind::ALL.to_vec())
}

// Date-shaped text; `\d` also yields non-ASCII digits
fn date_like() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{4}-[0-9]{2}-[0-9]{2}",
        "[0-9]{4}-[0-9]{2}-[0-9]{2}[T ][0-9]{2}:[0-9]{2}(:[0-9]{2})?(Z|[+-][0-9]{2}:[0-9]{2})?",
        "[0-9]{2}:[0-9]{2}:[0-9]{2}",
        "20[0-9]{2}-0[1-9]-[0-2][0-9]T[01][0-9]:[0-5][0-9]:[0-5][0-9]Z",
        "\\d{4}-\\d{2}-\\d{2}T\\d{2}:\\d{2}:\\d{2}",
        "\\d{2}:\\d{2}(:\\d{2})?",
    ]
}

fn text() -> impl Strategy<Value = String> {
    prop_oneof!["\\PC{0,16}", date_like()]
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>().prop_map(Value::Float),
        Just(Value::Float(f64::NAN)),
        text().prop_map(Value::String),
    ]
}

// Field names come from a small pool so records overlap
fn field_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(str::to_string)
}

fn value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec((field_name(), inner), 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

fn record() -> impl Strategy<Value = Record> {
    prop::collection::vec((field_name(), value()), 0..5)
        .prop_map(|entries| entries.into_iter().collect())
}

// Records whose fields stay scalar never conflict
fn flat_record() -> impl Strategy<Value = Record> {
    prop::collection::vec((field_name(), scalar()), 0..5)
        .prop_map(|entries| entries.into_iter().collect())
}

// Every record omits a field or leaves it null, in some mix
fn null_or_absent_records() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec((any::<bool>(), scalar()), 1..6).prop_map(|rows| {
        rows.into_iter()
            .map(|(present, other)| {
                let mut record = Record::new();
                if present {
                    record.insert("a".to_string(), Value::Null);
                }
                record.insert("b".to_string(), other);
                record
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn test_classify_never_panics(s in text()) {
        let kind = classify(Some(&Value::String(s.clone())));
        prop_assert!(matches!(kind, Kind::String | Kind::DateTime));
        prop_assert_eq!(kind == Kind::DateTime, detect_format(&s).is_some());
    }

    #[test]
    fn test_csv_cells_never_panic(cells in prop::collection::vec("[^,\"\\r\\n]{0,16}", 1..6)) {
        let rows: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{},{}", i, cell))
            .collect();
        let csv = format!("row,cell\n{}\n", rows.join("\n"));
        let records = CsvImporter::new().parse(&csv).unwrap();
        prop_assert!(infer_records(&records, &InferenceConfig::default()).is_ok());
    }

    #[test]
    fn test_unify_commutative(a in kind(), b in kind()) {
        prop_assert_eq!(a.unify(b), b.unify(a));
    }

    #[test]
    fn test_unify_associative(a in kind(), b in kind(), c in kind()) {
        prop_assert_eq!(a.unify(b).unify(c), a.unify(b.unify(c)));
    }

    #[test]
    fn test_unify_is_upper_bound(a in kind(), b in kind()) {
        let joined = a.unify(b);
        prop_assert!(a == Kind::Null || joined.accepts(a));
        prop_assert!(b == Kind::Null || joined.accepts(b));
    }

    #[test]
    fn test_nan_classifies_as_null(bits in any::<u64>()) {
        // Every NaN payload, not only the canonical one
        let f = f64::from_bits(bits | 0x7ff0_0000_0000_0001);
        prop_assume!(f.is_nan());
        prop_assert_eq!(classify(Some(&Value::Float(f))), Kind::Null);
    }

    #[test]
    fn test_merge_idempotent(r in record()) {
        if let Ok(shape) = infer(&r) {
            let once = merge([shape.clone()]).unwrap();
            let twice = merge([shape.clone(), shape]).unwrap();
            prop_assert_eq!(once.fields(), twice.fields());
        }
    }

    #[test]
    fn test_sample_records_validate(records in prop::collection::vec(record(), 1..8)) {
        if let Ok(schema) = infer_records(&records, &InferenceConfig::default()) {
            let validator = Validator::new(&schema).strict(true);
            for r in &records {
                let report = validator.validate(r);
                prop_assert!(report.is_valid(), "{:?} against {:?}", report, schema);
            }
        }
    }

    #[test]
    fn test_sample_records_validate_without_datetime(
        records in prop::collection::vec(record(), 1..8)
    ) {
        let config = InferenceConfig::builder().detect_datetime(false).build();
        if let Ok(schema) = infer_records(&records, &config) {
            let validator = Validator::new(&schema).strict(true);
            for r in &records {
                let report = validator.validate(r);
                prop_assert!(report.is_valid(), "{:?} against {:?}", report, schema);
            }
        }
    }

    #[test]
    fn test_null_or_absent_field_is_never_required(records in null_or_absent_records()) {
        let schema = infer_records(&records, &InferenceConfig::default()).unwrap();
        let json_schema = schema.to_json_schema();
        let required = json_schema["required"].as_array().cloned().unwrap_or_default();

        if schema.field("a").is_some() {
            prop_assert!(schema.optional_fields().contains("a"));
        }
        prop_assert!(!required.contains(&serde_json::json!("a")));

        let validator = Validator::new(&schema);
        for r in &records {
            prop_assert!(validator.validate(r).is_valid());
        }
    }

    #[test]
    fn test_flat_records_never_conflict(records in prop::collection::vec(flat_record(), 1..8)) {
        let schema = infer_records(&records, &InferenceConfig::default());
        prop_assert!(schema.is_ok(), "{:?}", schema);
    }

    #[test]
    fn test_shard_order_does_not_matter(
        records in prop::collection::vec(flat_record(), 2..8),
        split in 1usize..7,
    ) {
        let split = split.min(records.len() - 1);
        let config = InferenceConfig::default();
        let left = infer_records(&records[..split], &config).unwrap();
        let right = infer_records(&records[split..], &config).unwrap();

        let lr = merge_schemas(left.clone(), right.clone()).unwrap();
        let rl = merge_schemas(right, left).unwrap();

        // Field order follows whichever shard comes first; shapes must agree
        prop_assert_eq!(lr.fields().len(), rl.fields().len());
        for (name, shape) in lr.fields() {
            prop_assert_eq!(Some(shape), rl.field(name));
        }
        prop_assert_eq!(lr.sample_count(), records.len());
    }
}
