pub mod user;

pub use user::{NewUser, User, UserUpdate, DEFAULT_ROLE};
