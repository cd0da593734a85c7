//! Scalar value classification
//!
//! The NaN-as-missing rule lives here and nowhere else: every other part of
//! the engine sees NaN only as `Kind::Null`.

use super::config::InferenceConfig;
use super::formats::detect_format;
use super::types::Kind;
use super::value::Value;

/// Classify a scalar with default settings
///
/// `None` stands for an absent field.
pub fn classify(value: Option<&Value>) -> Kind {
    classify_scalar(value, true)
}

/// Classify a scalar under an inference configuration
///
/// With `detect_datetime` off, date-like strings stay `String`.
pub fn classify_with(value: Option<&Value>, config: &InferenceConfig) -> Kind {
    classify_scalar(value, config.detect_datetime)
}

fn classify_scalar(value: Option<&Value>, detect_datetime: bool) -> Kind {
    let Some(value) = value else {
        return Kind::Null;
    };

    match value {
        Value::Null => Kind::Null,
        // Booleans first so they are never absorbed into Int
        Value::Bool(_) => Kind::Bool,
        Value::Int(_) => Kind::Int,
        Value::Float(f) if f.is_nan() => Kind::Null,
        Value::Float(_) => Kind::Float,
        Value::String(s) => {
            if detect_datetime && detect_format(s).is_some() {
                Kind::DateTime
            } else {
                Kind::String
            }
        }
        // Not scalars; callers recurse before getting here
        Value::Array(_) | Value::Object(_) => Kind::String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_is_null() {
        assert_eq!(classify(Some(&Value::Float(f64::NAN))), Kind::Null);
        assert_eq!(classify(Some(&Value::Float(-f64::NAN))), Kind::Null);
    }

    #[test]
    fn test_absent_and_null() {
        assert_eq!(classify(None), Kind::Null);
        assert_eq!(classify(Some(&Value::Null)), Kind::Null);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(classify(Some(&Value::Int(0))), Kind::Int);
        assert_eq!(classify(Some(&Value::Int(-7))), Kind::Int);
        assert_eq!(classify(Some(&Value::Float(2.5))), Kind::Float);
        assert_eq!(classify(Some(&Value::Float(3.0))), Kind::Float);
        assert_eq!(classify(Some(&Value::Float(f64::INFINITY))), Kind::Float);
    }

    #[test]
    fn test_bool_is_not_int() {
        assert_eq!(classify(Some(&Value::Bool(true))), Kind::Bool);
        assert_eq!(classify(Some(&Value::Bool(false))), Kind::Bool);
    }

    #[test]
    fn test_strings() {
        assert_eq!(classify(Some(&Value::from("hello"))), Kind::String);
        assert_eq!(classify(Some(&Value::from("2024-01-15"))), Kind::DateTime);
        assert_eq!(
            classify(Some(&Value::from("2024-01-15T10:30:00Z"))),
            Kind::DateTime
        );
        assert_eq!(classify(Some(&Value::from("42"))), Kind::String);
    }

    #[test]
    fn test_datetime_detection_disabled() {
        let config = InferenceConfig::builder().detect_datetime(false).build();
        assert_eq!(
            classify_with(Some(&Value::from("2024-01-15")), &config),
            Kind::String
        );
        assert_eq!(
            classify_with(Some(&Value::from("2024-01-15")), &InferenceConfig::default()),
            Kind::DateTime
        );
    }

    #[test]
    fn test_non_ascii_digits_are_plain_strings() {
        for text in ["2024-01-1\u{0665}T10:30:00", "10:3\u{0665}:00", "\u{0968}\u{0966}"] {
            assert_eq!(classify(Some(&Value::from(text))), Kind::String);
        }
    }

    #[test]
    fn test_composites_fall_back_to_string() {
        assert_eq!(classify(Some(&Value::Array(vec![]))), Kind::String);
    }
}
