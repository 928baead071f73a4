//! Subcommand implementations
//!
//! Each command receives the shared configuration and the open handle and
//! writes its result as JSON to stdout.

pub mod migrate;
pub mod seed;
pub mod user;

use serde::Serialize;
use usercrud_core::{ExError, ExErrorKind};

/// Print `value` as pretty JSON on stdout
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), ExError> {
    let rendered = serde_json::to_string_pretty(value).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("print_json")
            .with_message(e.to_string())
    })?;
    println!("{}", rendered);
    Ok(())
}
