//! Core types shared across usercrud facilities
//!
//! This crate provides foundational types used by the error, logging and
//! storage layers:
//!
//! - **Request context**: RequestId, RequestContext, Interruption
//! - **Sensitive data**: Sensitive<T> marker for automatic redaction
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::{Interruption, RequestContext, RequestId};
pub use sensitive::Sensitive;
