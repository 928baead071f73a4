//! Structured logging for the users store
//!
//! [`init`] installs the process-wide subscriber once, choosing human or JSON
//! output from a [`Profile`]. The `log_op_*` macros emit the lifecycle events
//! (`start`, `end`, `end_error`) that every repository operation produces,
//! and [`init_test_capture`] records those events so tests can assert on them.
//!
//! ```rust
//! use usercrud_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
