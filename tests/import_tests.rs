//! Import module tests

use smart_schema::import::{CsvImporter, ImportError, JsonImporter};
use smart_schema::inference::{FieldShape, InferenceConfig, Kind, Value, infer_records};
use smart_schema::validation::Validator;

mod csv_import_tests {
    use super::*;

    #[test]
    fn test_csv_to_schema() {
        let csv = "\
id,name,price,active,created
1,Widget,9.99,true,2024-01-15
2,Gadget,,false,2024-02-01
3,NA,12,TRUE,2024-03-10
";
        let records = CsvImporter::new().parse(csv).unwrap();
        let schema = infer_records(&records, &InferenceConfig::default()).unwrap();

        let names: Vec<&str> = schema.fields().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["id", "name", "price", "active", "created"]);
        assert_eq!(schema.field("id"), Some(&FieldShape::Primitive(Kind::Int)));
        assert_eq!(
            schema.field("name"),
            Some(&FieldShape::optional(FieldShape::Primitive(Kind::String)))
        );
        assert_eq!(
            schema.field("price"),
            Some(&FieldShape::optional(FieldShape::Primitive(Kind::Float)))
        );
        assert_eq!(schema.field("active"), Some(&FieldShape::Primitive(Kind::Bool)));
        assert_eq!(schema.field("created"), Some(&FieldShape::Primitive(Kind::DateTime)));

        let validator = Validator::new(&schema);
        assert!(records.iter().all(|r| validator.validate(r).is_valid()));
    }

    #[test]
    fn test_csv_from_reader_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.tsv");
        std::fs::write(&path, "a\tb\n1\tx\n").unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let records = CsvImporter::new().with_delimiter(b'\t').read(file).unwrap();
        assert_eq!(records[0]["a"], Value::Int(1));
    }

    #[test]
    fn test_csv_non_ascii_digits_stay_text() {
        let csv = "when\n2024-01-15\n2024-01-1\u{0665}T10:30:00\n";
        let records = CsvImporter::new().parse(csv).unwrap();
        let schema = infer_records(&records, &InferenceConfig::default()).unwrap();
        assert_eq!(schema.field("when"), Some(&FieldShape::Primitive(Kind::String)));
    }

    #[test]
    fn test_csv_ragged_row_error_message() {
        let err = CsvImporter::new().parse("a\n1\n2,3\n").unwrap_err();
        assert_eq!(err.to_string(), "Row 2 has 2 fields, header has 1");
    }
}

mod json_import_tests {
    use super::*;

    #[test]
    fn test_ndjson_to_schema() {
        let text = r#"{"event": "click", "meta": {"x": 1}}
{"event": "view", "meta": {"x": 2, "y": 3}}
"#;
        let records = JsonImporter::new().parse(text).unwrap();
        let schema = infer_records(&records, &InferenceConfig::default()).unwrap();

        let meta = schema.field("meta").unwrap().as_object().unwrap();
        assert_eq!(meta["x"], FieldShape::Primitive(Kind::Int));
        assert_eq!(meta["y"], FieldShape::optional(FieldShape::Primitive(Kind::Int)));
        assert_eq!(
            schema.optional_fields().iter().collect::<Vec<_>>(),
            vec!["meta.y"]
        );
    }

    #[test]
    fn test_large_unsigned_becomes_float() {
        let records = JsonImporter::new()
            .parse(r#"[{"n": 18446744073709551615}]"#)
            .unwrap();
        assert!(matches!(records[0]["n"], Value::Float(_)));
    }

    #[test]
    fn test_scalar_stream_rejected() {
        assert!(matches!(
            JsonImporter::new().parse("1 2"),
            Err(ImportError::NotAnObject { index: 0, .. })
        ));
    }
}
