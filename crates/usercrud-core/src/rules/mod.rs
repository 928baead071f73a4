pub mod validation;

pub use validation::{validate_new_user, validate_password, validate_update};
