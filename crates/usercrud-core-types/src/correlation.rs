//! Request correlation and cancellation
//!
//! Every repository operation receives a [`RequestContext`]. It carries a
//! request id for log correlation, a `CancellationToken` that another owner may
//! trip at any time, and an optional deadline.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Unique identifier for a single request or operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random RequestId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a context stopped being active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interruption {
    Cancelled,
    DeadlineExceeded,
}

/// Context carried through operation boundaries
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: RequestId,
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Create a new context with a fresh RequestId, no deadline
    pub fn new() -> Self {
        Self {
            request_id: RequestId::new(),
            cancel: CancellationToken::new(),
            deadline: None,
        }
    }

    /// Create a context with an existing RequestId
    pub fn with_request_id(request_id: RequestId) -> Self {
        Self {
            request_id,
            ..Self::new()
        }
    }

    /// Share an externally owned cancellation token
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Abort operations once `timeout` has elapsed from now
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Token observed by this context
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancel this context and every clone sharing its token
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns the reason the context is no longer active, if any
    pub fn interruption(&self) -> Option<Interruption> {
        if self.cancel.is_cancelled() {
            return Some(Interruption::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(Interruption::DeadlineExceeded),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.interruption().is_none()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
