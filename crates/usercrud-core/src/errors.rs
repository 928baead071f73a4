use thiserror::Error;
use usercrud_core_types::RequestId;

/// Result type alias using UserError
pub type Result<T> = std::result::Result<T, UserError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every error surfaced by the store or the CLI is classified by one of these
/// kinds. Each kind maps to a stable error code usable by scripts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Storage lifecycle
    Connection,
    Migration,

    // Repository
    Duplicate,
    NotFound,
    Validation,
    Cancelled,

    // Credentials
    Hashing,

    // Integration/IO
    InvalidInput,
    Persistence,
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Connection => "ERR_CONNECTION",
            ExErrorKind::Migration => "ERR_MIGRATION",
            ExErrorKind::Duplicate => "ERR_DUPLICATE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Validation => "ERR_VALIDATION",
            ExErrorKind::Cancelled => "ERR_CANCELLED",
            ExErrorKind::Hashing => "ERR_HASHING",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the operation,
/// entity and request it happened in.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain errors raised by user model rules and password hashing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UserError {
    /// No row carries the given id
    #[error("User not found: {user_id}")]
    NotFound { user_id: i64 },

    /// Another user already owns this email
    #[error("Email already registered: {email}")]
    DuplicateEmail { email: String },

    /// A field failed validation before reaching storage
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// A write touched an unexpected number of rows
    #[error("Expected {expected} row(s) affected by {op}, got {actual}")]
    UnexpectedRowCount {
        op: String,
        expected: usize,
        actual: usize,
    },

    /// Password hashing or verification failed
    #[error("Password hashing failed: {message}")]
    Hashing { message: String },
}

impl UserError {
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        UserError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Conversion from UserError to ExError
impl From<UserError> for ExError {
    fn from(err: UserError) -> Self {
        let message = err.to_string();
        match err {
            UserError::NotFound { user_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(user_id.to_string())
                .with_message(message),

            UserError::DuplicateEmail { email } => ExError::new(ExErrorKind::Duplicate)
                .with_entity_id(email)
                .with_message(message),

            UserError::InvalidField { .. } => {
                ExError::new(ExErrorKind::Validation).with_message(message)
            }

            UserError::UnexpectedRowCount { op, .. } => ExError::new(ExErrorKind::Validation)
                .with_op(op)
                .with_message(message),

            UserError::Hashing { .. } => ExError::new(ExErrorKind::Hashing).with_message(message),
        }
    }
}
