//! Lifecycle logging macros
//!
//! Each macro accepts trailing `key = value` fields in `tracing` syntax.
//! The calling crate must depend on `tracing`.

/// Emit the `start` event of an operation
///
/// ```
/// # use usercrud_core::log_op_start;
/// log_op_start!("insert_user");
/// log_op_start!("get_user_by_id", user_id = 7);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        $crate::log_op_start!($op,)
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_START,
            $($field)*
        )
    };
}

/// Emit the `end` event of a successful operation
///
/// ```
/// # use usercrud_core::log_op_end;
/// log_op_end!("list_users", duration_ms = 3, rows = 12);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        $crate::log_op_end!($op, duration_ms = $duration,)
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        )
    };
}

/// Emit the `end_error` event of a failed operation
///
/// `$err` is anything convertible into `ExError`; its kind and stable code
/// are recorded next to the rendered message.
///
/// ```
/// # use usercrud_core::{log_op_error, errors::UserError};
/// log_op_error!("get_user_by_id", UserError::NotFound { user_id: 1 }, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {
        $crate::log_op_error!($op, $err, duration_ms = $duration,)
    };
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            error = %ex_err,
            $($field)*
        );
    }};
}
