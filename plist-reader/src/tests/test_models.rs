#[cfg(test)]
mod models_tests {
    use chrono::{TimeZone, Utc};
    use indexmap::IndexMap;

    use crate::error::plist::PlistParseError;
    use crate::models::Object;

    #[test]
    fn can_access_typed_views() {
        assert_eq!(
            Object::Array(vec![Object::Null]).as_array(),
            Some(&[Object::Null][..])
        );
        assert_eq!(
            Object::String("hi".to_string()).as_string(),
            Some("hi")
        );
        assert_eq!(Object::Integer(-3).as_integer(), Some(-3));
        assert_eq!(Object::Real(0.5).as_real(), Some(0.5));
        assert_eq!(Object::Boolean(true).as_boolean(), Some(true));
        assert_eq!(Object::Data(vec![1, 2]).as_data(), Some(&[1u8, 2][..]));
        assert!(Object::Null.is_null());

        let date = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(Object::Date(date).as_date(), Some(date));

        let entries = IndexMap::from([("k".to_string(), Object::Null)]);
        assert_eq!(
            Object::Dictionary(entries.clone()).as_dictionary(),
            Some(&entries)
        );
    }

    #[test]
    fn typed_views_reject_other_variants() {
        assert!(Object::Null.as_array().is_none());
        assert!(Object::Integer(1).as_string().is_none());
        assert!(Object::String("1".to_string()).as_integer().is_none());
        assert!(Object::Boolean(false).as_real().is_none());
        assert!(Object::Array(vec![]).as_dictionary().is_none());
        assert!(Object::Data(vec![]).as_date().is_none());
        assert!(!Object::Boolean(false).is_null());
    }

    #[test]
    fn type_names_match_the_grammar() {
        assert_eq!(Object::Null.type_name(), "null");
        assert_eq!(Object::Boolean(true).type_name(), "boolean");
        assert_eq!(Object::Integer(0).type_name(), "integer");
        assert_eq!(Object::Real(0.0).type_name(), "real");
        assert_eq!(Object::String(String::new()).type_name(), "string");
        assert_eq!(Object::Data(vec![]).type_name(), "data");
        assert_eq!(Object::Array(vec![]).type_name(), "array");
        assert_eq!(Object::Dictionary(IndexMap::new()).type_name(), "dictionary");
    }

    #[test]
    fn can_convert_integer_text() {
        assert!(matches!(
            Object::integer_from("42"),
            Ok(Object::Integer(42))
        ));
    }

    #[test]
    fn integer_conversion_trims_whitespace() {
        assert!(matches!(
            Object::integer_from("  7 \n"),
            Ok(Object::Integer(7))
        ));
        assert!(matches!(
            Object::integer_from("-19"),
            Ok(Object::Integer(-19))
        ));
    }

    #[test]
    fn integer_conversion_rejects_overflow_and_garbage() {
        assert!(matches!(
            Object::integer_from("99999999999999999999"),
            Err(PlistParseError::InvalidInteger(_))
        ));
        assert!(matches!(
            Object::integer_from("twelve"),
            Err(PlistParseError::InvalidInteger(_))
        ));
        assert!(matches!(
            Object::integer_from(""),
            Err(PlistParseError::InvalidInteger(_))
        ));
    }

    #[test]
    fn can_convert_real_text() {
        assert!(matches!(
            Object::real_from(" 3.25 "),
            Ok(Object::Real(value)) if value == 3.25
        ));
        assert!(matches!(
            Object::real_from("-1e3"),
            Ok(Object::Real(value)) if value == -1000.0
        ));
        assert!(matches!(
            Object::real_from("0x10"),
            Err(PlistParseError::InvalidReal(_))
        ));
    }

    #[test]
    fn can_convert_base64_data() {
        assert!(matches!(
            Object::data_from("SGVsbG8="),
            Ok(Object::Data(bytes)) if bytes == b"Hello"
        ));
    }

    #[test]
    fn base64_conversion_ignores_interior_whitespace() {
        assert!(matches!(
            Object::data_from("SGVs\n  bG8="),
            Ok(Object::Data(bytes)) if bytes == b"Hello"
        ));
    }

    #[test]
    fn base64_conversion_rejects_foreign_characters() {
        assert!(matches!(
            Object::data_from("SGVs!bG8="),
            Err(PlistParseError::InvalidData(_))
        ));
    }

    #[test]
    fn can_convert_date_text() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert!(matches!(
            Object::date_from("2024-05-01T12:30:00Z"),
            Ok(Object::Date(date)) if date == expected
        ));
        assert!(matches!(
            Object::date_from("  2024-05-01T12:30:00Z  "),
            Ok(Object::Date(date)) if date == expected
        ));
    }

    #[test]
    fn date_conversion_rejects_other_grammars() {
        assert!(matches!(
            Object::date_from("2024-05-01"),
            Err(PlistParseError::InvalidDate(_))
        ));
        assert!(matches!(
            Object::date_from("yesterday"),
            Err(PlistParseError::InvalidDate(_))
        ));
        assert!(matches!(
            Object::date_from("2024-05-01 12:30:00"),
            Err(PlistParseError::InvalidDate(_))
        ));
    }

    #[test]
    fn dictionaries_compare_as_mappings() {
        let forward = Object::Dictionary(IndexMap::from([
            ("a".to_string(), Object::Integer(1)),
            ("b".to_string(), Object::Integer(2)),
        ]));
        let reversed = Object::Dictionary(IndexMap::from([
            ("b".to_string(), Object::Integer(2)),
            ("a".to_string(), Object::Integer(1)),
        ]));
        assert_eq!(forward, reversed);

        let different = Object::Dictionary(IndexMap::from([
            ("a".to_string(), Object::Integer(1)),
            ("b".to_string(), Object::Integer(3)),
        ]));
        assert_ne!(forward, different);
    }

    #[test]
    fn arrays_compare_in_order() {
        let forward = Object::Array(vec![Object::Integer(1), Object::Integer(2)]);
        let reversed = Object::Array(vec![Object::Integer(2), Object::Integer(1)]);
        assert_ne!(forward, reversed);
    }

    #[test]
    fn reinserted_keys_keep_their_position() {
        let mut entries: IndexMap<String, Object> = IndexMap::new();
        entries.insert("first".to_string(), Object::Integer(1));
        entries.insert("second".to_string(), Object::Integer(2));
        entries.insert("first".to_string(), Object::Integer(3));

        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries.get_index(0),
            Some((&"first".to_string(), &Object::Integer(3)))
        );
    }
}
