//! Names shared by the lifecycle log events
//!
//! The logging macros emit these keys and the test capture layer reads them
//! back, so both sides must agree on the spelling.

/// Module path of the emitting code
pub const FIELD_COMPONENT: &str = "component";
/// Repository or runner operation, e.g. `insert_user`
pub const FIELD_OP: &str = "op";
/// One of the `EVENT_*` values
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
/// Stable `ERR_*` code of a failed operation
pub const FIELD_ERR_CODE: &str = "err_code";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
