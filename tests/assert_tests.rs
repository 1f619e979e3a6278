//! Integration tests for the assertion engine

mod common;
use common::engine;

use argent::{details, quote, raw, Details, ErrorKind, Value, ValueCategory};

mod equal {
    use super::*;

    #[test]
    fn every_number_is_same_as_itself() {
        let (a, _) = engine();
        for x in [0.0, -0.0, 1.5, f64::NAN, f64::INFINITY, f64::MIN_POSITIVE] {
            assert!(a.equal(&Value::Number(x), &Value::Number(x), None).is_ok());
        }
    }

    #[test]
    fn nan_equals_nan() {
        let (a, _) = engine();
        assert!(a
            .equal(&Value::Number(f64::NAN), &Value::Number(f64::NAN), None)
            .is_ok());
    }

    #[test]
    fn negative_zero_is_distinct_from_zero() {
        let (a, _) = engine();
        let err = a
            .equal(&Value::Number(-0.0), &Value::Number(0.0), None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RangeError);
    }

    #[test]
    fn objects_compare_by_identity() {
        let (a, _) = engine();
        let obj = Value::new_array(vec![Value::Number(1.0)]);
        assert!(a.equal(&obj, &obj.clone(), None).is_ok());
        let other = Value::new_array(vec![Value::Number(1.0)]);
        assert!(a.equal(&obj, &other, None).is_err());
    }

    #[test]
    fn default_message_uses_descriptors() {
        let (a, _) = engine();
        let err = a
            .equal(&Value::Number(1.0), &Value::String("1".into()), None)
            .unwrap_err();
        assert_eq!(
            err.message(),
            "Expected (a number) is same as (a string)"
        );
    }

    #[test]
    fn custom_kind_is_respected() {
        let (a, _) = engine();
        let err = a
            .equal_with(
                &Value::Number(1.0),
                &Value::Number(2.0),
                None,
                ErrorKind::TypeError,
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeError);
    }
}

mod type_checks {
    use super::*;

    #[test]
    fn number_is_not_a_string() {
        let (a, _) = engine();
        let err = a
            .type_of(&Value::Number(2.0), ValueCategory::String, None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeError);
        assert_eq!(err.to_string(), "TypeError: (a number) must be a string");
    }

    #[test]
    fn matching_category_passes() {
        let (a, _) = engine();
        assert!(a
            .type_of(&Value::String("x".into()), ValueCategory::String, None)
            .is_ok());
        assert!(a
            .type_of(&Value::new_object(), ValueCategory::Object, None)
            .is_ok());
        assert!(a
            .type_of(&Value::new_function(None), ValueCategory::Function, None)
            .is_ok());
    }

    #[test]
    fn null_counts_as_object() {
        let (a, _) = engine();
        assert!(a.type_of(&Value::Null, ValueCategory::Object, None).is_ok());
    }
}

mod redaction {
    use super::*;

    #[test]
    fn raw_values_never_reach_the_message() {
        let (a, _) = engine();
        let err = a.fail(Some(details(
            &["Got ", " expected ", ""],
            vec![
                raw(Value::String("secret".into())),
                quote(Value::Number(5.0)),
            ],
        )));
        assert!(!err.to_string().contains("secret"));
        assert_eq!(err.to_string(), "Error: Got (a string) expected 5");
    }

    #[test]
    fn quoted_values_appear_serialized() {
        let (a, _) = engine();
        let err = a.fail(Some(details(
            &["bad input ", ""],
            vec![quote(Value::String("x\"y".into()))],
        )));
        assert_eq!(err.message(), "bad input \"x\\\"y\"");
    }

    #[test]
    fn default_messages() {
        let (a, _) = engine();
        assert_eq!(
            a.that(false, None).unwrap_err().to_string(),
            "Error: Check failed"
        );
        assert_eq!(a.fail(None).to_string(), "Error: Assert failed");
    }
}

mod builders {
    use super::*;

    #[test]
    fn error_returns_without_raising() {
        let (a, _) = engine();
        let err = a.error_with(Some(Details::literal("foo")), ErrorKind::SyntaxError);
        assert!(err.is_error());
        assert_eq!(err.error_kind(), Some(ErrorKind::SyntaxError));
        assert_eq!(err.error_message(), Some("foo".to_string()));
    }

    #[test]
    fn raised_value_keeps_identity_for_notes() {
        let (a, tracker) = engine();
        let err = a.that(false, None).unwrap_err();
        a.note(err.value(), "Thrown from", &Value::String("startup".into()));
        let notes = tracker.notes_of(err.value());
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].label, "Thrown from");
    }

    #[test]
    fn details_survive_on_the_error_value() {
        let (a, _) = engine();
        let err = a.fail(Some(details(
            &["count was ", ""],
            vec![raw(Value::Number(3.0))],
        )));
        let owned = err.value().error_details().expect("details attached");
        assert_eq!(owned.to_redacted(), "count was (a number)");
    }
}
