//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position(10, Rc::new("test.lang".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_error_position() {
    let pos = Position(42, Rc::new("test.lang".to_string()));
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        pos.clone(),
    );

    assert_eq!(error.get_position().0, 42);
}

#[test]
fn test_unexpected_token_tip() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
        },
        Position(0, Rc::new("test.lang".to_string())),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("}")),
        ErrorTip::None => panic!("expected a suggestion"),
    }
}

#[test]
fn test_type_mismatch_tip() {
    let error = Error::new(
        ErrorImpl::TypeMismatch {
            left: "Concrete int".to_string(),
            right: "Concrete bool".to_string(),
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "TypeMismatch");
    match error.get_tip() {
        ErrorTip::Suggestion(tip) => {
            assert!(tip.contains("Concrete int"));
            assert!(tip.contains("Concrete bool"));
        }
        ErrorTip::None => panic!("expected a suggestion"),
    }
}

#[test]
fn test_arity_mismatch_tip() {
    let error = Error::new(
        ErrorImpl::ArityMismatch {
            expected: 2,
            received: 0,
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "ArityMismatch");
    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("2") && tip.contains("0")),
        ErrorTip::None => panic!("expected a suggestion"),
    }
}

#[test]
fn test_null_position_is_null() {
    assert!(Position::null().is_null());
    assert!(!Position(0, Rc::new("test.lang".to_string())).is_null());
}
