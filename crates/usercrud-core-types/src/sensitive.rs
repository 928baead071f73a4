//! Sensitive data marker for automatic redaction
//!
//! Plaintext passwords travel through the system wrapped in `Sensitive<T>`
//! so they never show up in logs or debug output.

use std::fmt;

/// Wrapper for sensitive data that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use usercrud_core_types::Sensitive;
///
/// let password = Sensitive::new("secret123");
/// assert_eq!(format!("{:?}", password), "***REDACTED***");
/// assert_eq!(password.expose(), &"secret123");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying sensitive value
    ///
    /// Only the password hasher should need this.
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl From<String> for Sensitive<String> {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Sensitive<String> {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = "correct horse battery staple";

    #[test]
    fn test_formatting_never_shows_value() {
        let password: Sensitive<String> = PLAIN.into();

        for rendered in [format!("{:?}", password), format!("{}", password)] {
            assert_eq!(rendered, "***REDACTED***");
        }
        assert_eq!(password.expose(), PLAIN);
    }

    #[test]
    fn test_clone_keeps_value() {
        let password = Sensitive::new(PLAIN.to_string());
        assert_eq!(password.clone().into_inner(), PLAIN);
    }

    #[test]
    fn test_redacted_inside_derived_debug() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct Signup {
            email: String,
            password: Sensitive<String>,
        }

        let signup = Signup {
            email: "ada@example.com".to_string(),
            password: PLAIN.into(),
        };

        let rendered = format!("{:?}", signup);
        assert!(rendered.contains("ada@example.com"));
        assert!(!rendered.contains(PLAIN));
    }
}
