//! Unit tests for the Identifiers module
//!
//! Tests cover scheme code parsing, display, serialization and cache keys.

use core_kernel::{CoreError, SchemeCode};

mod parsing {
    use super::*;

    #[test]
    fn test_parses_numeric_code() {
        let code: SchemeCode = "119551".parse().unwrap();
        assert_eq!(code, SchemeCode::new(119551));
    }

    #[test]
    fn test_trims_whitespace() {
        let code: SchemeCode = " 100027 ".parse().unwrap();
        assert_eq!(code.value(), 100027);
    }

    #[test]
    fn test_rejects_empty() {
        let result = "".parse::<SchemeCode>();
        assert!(matches!(result, Err(CoreError::InvalidSchemeCode(_))));
    }

    #[test]
    fn test_rejects_non_digits() {
        for input in ["abc", "12a4", "-5", "1.5", "12 34"] {
            let result = input.parse::<SchemeCode>();
            assert!(
                matches!(result, Err(CoreError::InvalidSchemeCode(ref raw)) if raw == input),
                "expected invalid scheme code for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_rejects_overflow() {
        let result = "99999999999999".parse::<SchemeCode>();
        assert!(matches!(result, Err(CoreError::SchemeCodeOutOfRange(_))));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Scheme code out of range: '99999999999999'"
        );
    }
}

mod formatting {
    use super::*;

    #[test]
    fn test_display_is_bare_number() {
        assert_eq!(SchemeCode::from(120503).to_string(), "120503");
    }

    #[test]
    fn test_serializes_transparently() {
        let json = serde_json::to_string(&SchemeCode::new(119551)).unwrap();
        assert_eq!(json, "119551");

        let back: SchemeCode = serde_json::from_str("119551").unwrap();
        assert_eq!(back, SchemeCode::new(119551));
    }

    #[test]
    fn test_cache_key_prefix() {
        assert_eq!(SchemeCode::new(1).cache_key(), "scheme_1");
    }
}
