#![allow(clippy::unwrap_used, clippy::expect_used)]

use usercrud_core::errors::UserError;
use usercrud_core::logging_facility::test_capture::init_test_capture;
use usercrud_core::types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE,
};
use usercrud_core::{log_op_end, log_op_error, log_op_start};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(
        end_events[0].fields.get(FIELD_DURATION_MS),
        Some(&"42".to_string())
    );
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    log_op_error!(op_name, UserError::NotFound { user_id: 9 }, duration_ms = 10);

    let error_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(
        error_events[0].fields.get(FIELD_ERR_CODE),
        Some(&"ERR_NOT_FOUND".to_string())
    );
}

#[test]
fn test_extra_fields_are_captured() {
    let capture = init_test_capture();
    let op_name = "test_extra_fields_unique_4";

    log_op_start!(op_name, user_id = 77);
    log_op_end!(op_name, duration_ms = 1, rows = 3);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].fields.get("user_id"), Some(&"77".to_string()));
    assert_eq!(events[1].fields.get("rows"), Some(&"3".to_string()));
}

#[test]
fn test_component_is_module_path() {
    let capture = init_test_capture();
    let op_name = "test_component_unique_5";

    log_op_start!(op_name);

    let events = capture.events_for_op(op_name);
    assert_eq!(
        events[0].component.as_deref(),
        Some("logging_facility_tests")
    );
}
