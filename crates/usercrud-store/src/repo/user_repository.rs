use crate::errors::Result;
use usercrud_core::model::{NewUser, User, UserUpdate};
use usercrud_core_types::{RequestContext, Sensitive};

/// Typed CRUD operations over stored users
///
/// Every operation is a single synchronous attempt. An inactive context
/// (cancelled or past its deadline) yields a `Cancelled` error and nothing
/// is written.
pub trait UserRepository {
    /// All users in storage order, without password hashes
    ///
    /// # Errors
    /// `Cancelled` or `Persistence`.
    fn list_users(&self, ctx: &RequestContext) -> Result<Vec<User>>;

    /// The user with this id, including its password hash
    ///
    /// # Errors
    /// `NotFound` when no row carries `id`.
    fn get_user_by_id(&self, ctx: &RequestContext, id: i64) -> Result<User>;

    /// Hash `password`, insert the user and return the assigned id
    ///
    /// # Errors
    /// `Duplicate` when the email is taken, `Validation` for rejected input or
    /// when the write did not create exactly one row.
    fn insert_user(
        &self,
        ctx: &RequestContext,
        data: &NewUser,
        password: &Sensitive<String>,
    ) -> Result<i64>;

    /// Replace every mutable field of the user `id`
    ///
    /// A supplied password is re-hashed; otherwise the stored hash is kept.
    ///
    /// # Errors
    /// `NotFound` when no row carries `id`, `Duplicate` when the new email
    /// belongs to another user, `Validation` for rejected input.
    fn update_user_by_id(&self, ctx: &RequestContext, id: i64, data: &UserUpdate) -> Result<()>;

    /// Physically remove the user `id`
    ///
    /// # Errors
    /// `NotFound` when no row carries `id`.
    fn delete_user_by_id(&self, ctx: &RequestContext, id: i64) -> Result<()>;
}
