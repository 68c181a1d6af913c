//! Unit tests for rivven-bind error module

use rivven_bind::error::{Error, ErrorCategory};

#[test]
fn test_error_unknown_parameter() {
    let err = Error::unknown_parameter("header.id", "uuid", Some("v4"));

    assert_eq!(err.category(), ErrorCategory::Configuration);
    assert!(err.is_configuration());
    assert!(!err.is_binding());
    assert_eq!(
        err.to_string(),
        "invalid SQL parameter item: header.id and type: uuid with config: v4"
    );
}

#[test]
fn test_error_parameter_config() {
    let err = Error::parameter_config("header.ts", "date", Some("%Q"), "invalid date pattern");

    assert_eq!(err.category(), ErrorCategory::Configuration);
    let msg = err.to_string();
    assert!(msg.contains("header.ts"));
    assert!(msg.contains("date"));
    assert!(msg.contains("%Q"));
    assert!(msg.contains("invalid date pattern"));
}

#[test]
fn test_error_custom_parameter() {
    let err = Error::custom_parameter("com.example.Geo", None, "not registered");

    assert_eq!(err.category(), ErrorCategory::Configuration);
    assert_eq!(
        err.to_string(),
        "could not initialize custom parameter type: com.example.Geo with config: <none>: not registered"
    );
}

#[test]
fn test_error_config() {
    let err = Error::config("unterminated placeholder at offset 3");

    assert_eq!(err.category(), ErrorCategory::Configuration);
    assert!(err.to_string().contains("offset 3"));
    assert_eq!(err.position(), None);
}

#[test]
fn test_error_type_conversion() {
    let err = Error::type_conversion(2, "cannot parse 'abc' as int");

    assert_eq!(err.category(), ErrorCategory::Binding);
    assert!(err.is_binding());
    assert_eq!(err.position(), Some(2));
    assert!(err.to_string().contains("parameter 2"));
}

#[test]
fn test_error_bind_with_source() {
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "socket closed");
    let err = Error::bind_with_source(7, "driver refused value", io);

    assert_eq!(err.category(), ErrorCategory::Binding);
    assert_eq!(err.position(), Some(7));
    let source = std::error::Error::source(&err).unwrap();
    assert!(source.to_string().contains("socket closed"));
}

#[test]
fn test_error_execution() {
    let err = Error::execution("statement timed out");

    assert_eq!(err.category(), ErrorCategory::Execution);
    assert!(!err.is_configuration());
    assert!(!err.is_binding());
}

#[test]
fn test_error_execution_with_source() {
    let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "read timeout");
    let err = Error::execution_with_source("insert failed", io);

    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_result_type() {
    fn test_fn() -> rivven_bind::error::Result<i32> {
        Ok(42)
    }

    assert_eq!(test_fn().unwrap(), 42);
}
