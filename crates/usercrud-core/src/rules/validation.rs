use crate::errors::{Result, UserError};
use crate::model::{NewUser, UserUpdate};
use usercrud_core_types::Sensitive;

/// Validate a user before it is inserted
///
/// # Errors
/// Returns `UserError::InvalidField` for the first field that fails.
pub fn validate_new_user(user: &NewUser) -> Result<()> {
    validate_name(&user.name)?;
    if let Some(role) = &user.role {
        validate_role(role)?;
    }
    validate_email(&user.email)?;
    validate_age(user.age)
}

/// Validate the replacement values of an update
///
/// # Errors
/// Returns `UserError::InvalidField` for the first field that fails.
pub fn validate_update(update: &UserUpdate) -> Result<()> {
    validate_name(&update.name)?;
    validate_role(&update.role)?;
    validate_email(&update.email)?;
    validate_age(update.age)?;
    if let Some(password) = &update.password {
        validate_password(password)?;
    }
    Ok(())
}

/// # Errors
/// Rejects empty passwords.
pub fn validate_password(password: &Sensitive<String>) -> Result<()> {
    if password.expose().is_empty() {
        return Err(UserError::invalid_field("password", "cannot be empty"));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(UserError::invalid_field("name", "cannot be blank"));
    }
    Ok(())
}

fn validate_role(role: &str) -> Result<()> {
    if role.trim().is_empty() {
        return Err(UserError::invalid_field("role", "cannot be blank"));
    }
    Ok(())
}

/// The value is checked exactly as it will be stored, so padded variants
/// cannot slip past the UNIQUE constraint.
fn validate_email(email: &str) -> Result<()> {
    if email.trim().is_empty() {
        return Err(UserError::invalid_field("email", "cannot be blank"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(UserError::invalid_field("email", "cannot contain whitespace"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(UserError::invalid_field(
            "email",
            format!("'{}' is not an email address", email),
        )),
    }
}

fn validate_age(age: Option<i64>) -> Result<()> {
    match age {
        Some(age) if age < 0 => Err(UserError::invalid_field("age", "cannot be negative")),
        _ => Ok(()),
    }
}
