//! Property tests for failure classification.

use live_probe::{FailureCategory, LiveError};
use proptest::prelude::*;

/// Free text that cannot contain any recognised status marker.
fn arb_neutral_text() -> impl Strategy<Value = String> {
    "[a-z ]{0,60}".prop_filter("must not mention a known status", |s| {
        !["permission", "not found", "api key not valid", "quota"].iter().any(|m| s.contains(m))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_api_key_invalid_marker_wins(prefix in arb_neutral_text(), suffix in arb_neutral_text()) {
        let reason = format!("{prefix}API_KEY_INVALID{suffix}");
        let error = LiveError::closed(1007, reason);
        prop_assert_eq!(FailureCategory::classify(&error), FailureCategory::InvalidKey);
    }

    #[test]
    fn prop_permission_denied_marker(prefix in arb_neutral_text(), suffix in arb_neutral_text()) {
        let message = format!("{prefix}PERMISSION_DENIED{suffix}");
        let error = LiveError::server(String::new(), message);
        prop_assert_eq!(FailureCategory::classify(&error), FailureCategory::PermissionDenied);
    }

    #[test]
    fn prop_not_found_marker(prefix in arb_neutral_text(), suffix in arb_neutral_text()) {
        let reason = format!("{prefix}NOT_FOUND{suffix}");
        let error = LiveError::closed(1008, reason);
        prop_assert_eq!(FailureCategory::classify(&error), FailureCategory::ModelNotFound);
    }

    #[test]
    fn prop_neutral_text_is_unknown(text in arb_neutral_text(), code in 1000u16..1015) {
        let error = LiveError::closed(code, text.clone());
        prop_assert_eq!(FailureCategory::classify(&error), FailureCategory::Unknown);

        let error = LiveError::connection(text);
        prop_assert_eq!(FailureCategory::classify(&error), FailureCategory::Unknown);
    }

    #[test]
    fn prop_http_status_drives_category(status in 400u16..600, body in arb_neutral_text()) {
        let expected = match status {
            401 => FailureCategory::InvalidKey,
            403 => FailureCategory::PermissionDenied,
            404 => FailureCategory::ModelNotFound,
            _ => FailureCategory::Unknown,
        };
        let error = LiveError::handshake(status, body);
        prop_assert_eq!(FailureCategory::classify(&error), expected);
    }
}
