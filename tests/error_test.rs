use mimir::{MimirError, Result};

#[test]
fn test_error_display() {
    let err = MimirError::NotFound("problem 'two-sum'".to_string());
    assert!(err.to_string().contains("two-sum"));
}

#[test]
fn test_not_implemented() {
    let err = MimirError::NotImplemented("daily");
    assert!(err.to_string().contains("not implemented"));
}

#[test]
fn test_exhausted_display_names_operation() {
    let err = MimirError::UpstreamExhausted {
        operation: "questionData".into(),
        attempts: 3,
        last_error: "HTTP error: timed out".into(),
    };
    let text = err.to_string();
    assert!(text.contains("questionData"));
    assert!(text.contains("3 attempts"));
    assert!(text.contains("timed out"));
}

#[test]
fn test_result_alias() {
    fn returns_error() -> Result<()> {
        Err(MimirError::NotFound("x".into()))
    }
    assert!(returns_error().is_err());
}

#[test]
fn test_json_error_converts() {
    fn parse() -> Result<serde_json::Value> {
        Ok(serde_json::from_str("{ not json")?)
    }
    assert!(matches!(parse(), Err(MimirError::Json(_))));
}

// ============================================================================
// Transient error classification
// ============================================================================

#[test]
fn transient_errors() {
    assert!(MimirError::Http("connection reset".into()).is_transient());
    assert!(
        MimirError::Api {
            status: 500,
            message: "internal".into()
        }
        .is_transient()
    );
    assert!(
        MimirError::Api {
            status: 429,
            message: "slow down".into()
        }
        .is_transient()
    );
}

#[test]
fn permanent_errors() {
    assert!(!MimirError::NotFound("x".into()).is_transient());
    assert!(!MimirError::InvalidInput("x".into()).is_transient());
    assert!(!MimirError::Configuration("x".into()).is_transient());
    assert!(!MimirError::NotImplemented("x").is_transient());
    assert!(
        !MimirError::UpstreamExhausted {
            operation: "op".into(),
            attempts: 3,
            last_error: String::new(),
        }
        .is_transient()
    );
}

#[test]
fn not_found_classification() {
    assert!(MimirError::NotFound("x".into()).is_not_found());
    assert!(!MimirError::Http("x".into()).is_not_found());
}
