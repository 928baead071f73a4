//! SQLite repository implementation
//!
//! Each operation is one parameterized statement against the handle given at
//! construction. Columns are bound by name on write and read by name on scan.
//!
//! ## Logging Ownership
//!
//! The repository owns lifecycle logging for user operations:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure

use crate::errors::{from_rusqlite, write_error, Result};
use crate::interrupt::{ensure_active, InterruptGuard};
use crate::repo::UserRepository;
use rusqlite::{named_params, Connection, OptionalExtension, Row};
use std::time::Instant;
use usercrud_core::model::{NewUser, User, UserUpdate};
use usercrud_core::password::{verify_password, PasswordHasher};
use usercrud_core::rules::{validate_new_user, validate_password, validate_update};
use usercrud_core::{log_op_end, log_op_error, log_op_start, UserError};
use usercrud_core_types::{RequestContext, Sensitive};

const INSERT_USER_SQL: &str = "INSERT INTO users (name, role, email, age, password)
     VALUES (:name, :role, :email, :age, :password)";

const SELECT_USERS_SQL: &str = "SELECT id, name, email, role, age FROM users";

const SELECT_USER_SQL: &str =
    "SELECT id, name, role, email, age, password FROM users WHERE id = :id";

const UPDATE_USER_SQL: &str = "UPDATE users
     SET name = :name, role = :role, email = :email, age = :age,
         password = COALESCE(:password, password)
     WHERE id = :id";

const DELETE_USER_SQL: &str = "DELETE FROM users WHERE id = :id";

/// SQLite-backed [`UserRepository`]
#[derive(Debug)]
pub struct SqliteUserRepo<'c> {
    conn: &'c Connection,
    hasher: PasswordHasher,
}

impl<'c> SqliteUserRepo<'c> {
    /// Repository over `conn` hashing with the default Argon2 cost
    pub fn new(conn: &'c Connection) -> Self {
        Self::with_hasher(conn, PasswordHasher::default())
    }

    pub fn with_hasher(conn: &'c Connection, hasher: PasswordHasher) -> Self {
        Self { conn, hasher }
    }

    /// Check a candidate password against the stored hash of user `id`
    ///
    /// # Errors
    /// `NotFound` when no row carries `id`, `Hashing` when the stored value
    /// is not a valid hash.
    pub fn verify_user_password(
        &self,
        ctx: &RequestContext,
        id: i64,
        candidate: &Sensitive<String>,
    ) -> Result<bool> {
        const OP: &str = "verify_user_password";
        log_op_start!(OP, request_id = ctx.request_id.as_str(), user_id = id);
        let start = Instant::now();

        let result = ensure_active(ctx, OP).and_then(|()| {
            let _guard = InterruptGuard::install(self.conn, ctx);
            let hash: String = self
                .conn
                .query_row(
                    "SELECT password FROM users WHERE id = :id",
                    named_params! { ":id": id },
                    |row| row.get("password"),
                )
                .optional()
                .map_err(from_rusqlite)?
                .ok_or(UserError::NotFound { user_id: id })?;
            Ok(verify_password(candidate.expose(), &hash)?)
        });

        observe(OP, ctx, start, result)
    }

    fn list_users_impl(&self, ctx: &RequestContext) -> Result<Vec<User>> {
        let _guard = InterruptGuard::install(self.conn, ctx);
        let mut stmt = self.conn.prepare(SELECT_USERS_SQL).map_err(from_rusqlite)?;
        let users = stmt
            .query_map([], summary_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        tracing::debug!(rows = users.len(), "listed users");
        Ok(users)
    }

    fn get_user_by_id_impl(&self, ctx: &RequestContext, id: i64) -> Result<User> {
        let _guard = InterruptGuard::install(self.conn, ctx);
        let user = self
            .conn
            .query_row(SELECT_USER_SQL, named_params! { ":id": id }, full_from_row)
            .optional()
            .map_err(from_rusqlite)?;

        user.ok_or_else(|| UserError::NotFound { user_id: id }.into())
    }

    fn insert_user_impl(
        &self,
        ctx: &RequestContext,
        data: &NewUser,
        password: &Sensitive<String>,
    ) -> Result<i64> {
        validate_new_user(data)?;
        validate_password(password)?;

        let password_hash = self.hasher.hash(password)?;

        // hashing is slow; the context may have expired meanwhile
        ensure_active(ctx, "insert_user")?;
        let _guard = InterruptGuard::install(self.conn, ctx);
        insert_row(self.conn, data, &password_hash)
    }

    fn update_user_by_id_impl(
        &self,
        ctx: &RequestContext,
        id: i64,
        data: &UserUpdate,
    ) -> Result<()> {
        validate_update(data)?;

        let password_hash = data
            .password
            .as_ref()
            .map(|password| self.hasher.hash(password))
            .transpose()?;

        ensure_active(ctx, "update_user_by_id")?;
        let _guard = InterruptGuard::install(self.conn, ctx);
        let affected = self
            .conn
            .execute(
                UPDATE_USER_SQL,
                named_params! {
                    ":name": data.name,
                    ":role": data.role,
                    ":email": data.email,
                    ":age": data.age,
                    ":password": password_hash,
                    ":id": id,
                },
            )
            .map_err(|e| write_error(e, &data.email))?;

        match affected {
            0 => Err(UserError::NotFound { user_id: id }.into()),
            1 => Ok(()),
            actual => Err(UserError::UnexpectedRowCount {
                op: "update_user_by_id".to_string(),
                expected: 1,
                actual,
            }
            .into()),
        }
    }

    fn delete_user_by_id_impl(&self, ctx: &RequestContext, id: i64) -> Result<()> {
        let _guard = InterruptGuard::install(self.conn, ctx);
        let affected = self
            .conn
            .execute(DELETE_USER_SQL, named_params! { ":id": id })
            .map_err(from_rusqlite)?;

        if affected == 0 {
            tracing::warn!(user_id = id, "no user was deleted");
            return Err(UserError::NotFound { user_id: id }.into());
        }
        tracing::debug!(user_id = id, rows = affected, "user deleted");
        Ok(())
    }
}

impl UserRepository for SqliteUserRepo<'_> {
    fn list_users(&self, ctx: &RequestContext) -> Result<Vec<User>> {
        const OP: &str = "list_users";
        log_op_start!(OP, request_id = ctx.request_id.as_str());
        let start = Instant::now();

        let result = ensure_active(ctx, OP).and_then(|()| self.list_users_impl(ctx));
        observe(OP, ctx, start, result)
    }

    fn get_user_by_id(&self, ctx: &RequestContext, id: i64) -> Result<User> {
        const OP: &str = "get_user_by_id";
        log_op_start!(OP, request_id = ctx.request_id.as_str(), user_id = id);
        let start = Instant::now();

        let result = ensure_active(ctx, OP).and_then(|()| self.get_user_by_id_impl(ctx, id));
        observe(OP, ctx, start, result)
    }

    fn insert_user(
        &self,
        ctx: &RequestContext,
        data: &NewUser,
        password: &Sensitive<String>,
    ) -> Result<i64> {
        const OP: &str = "insert_user";
        log_op_start!(OP, request_id = ctx.request_id.as_str(), email = data.email.as_str());
        let start = Instant::now();

        let result =
            ensure_active(ctx, OP).and_then(|()| self.insert_user_impl(ctx, data, password));
        observe(OP, ctx, start, result)
    }

    fn update_user_by_id(&self, ctx: &RequestContext, id: i64, data: &UserUpdate) -> Result<()> {
        const OP: &str = "update_user_by_id";
        log_op_start!(
            OP,
            request_id = ctx.request_id.as_str(),
            user_id = id,
            rehash = data.password.is_some()
        );
        let start = Instant::now();

        let result =
            ensure_active(ctx, OP).and_then(|()| self.update_user_by_id_impl(ctx, id, data));
        observe(OP, ctx, start, result)
    }

    fn delete_user_by_id(&self, ctx: &RequestContext, id: i64) -> Result<()> {
        const OP: &str = "delete_user_by_id";
        log_op_start!(OP, request_id = ctx.request_id.as_str(), user_id = id);
        let start = Instant::now();

        let result = ensure_active(ctx, OP).and_then(|()| self.delete_user_by_id_impl(ctx, id));
        observe(OP, ctx, start, result)
    }
}

/// Write one user row with an already hashed password
///
/// Shared by the repository and the seed importer.
pub(crate) fn insert_row(conn: &Connection, data: &NewUser, password_hash: &str) -> Result<i64> {
    let affected = conn
        .execute(
            INSERT_USER_SQL,
            named_params! {
                ":name": data.name,
                ":role": data.effective_role(),
                ":email": data.email,
                ":age": data.age,
                ":password": password_hash,
            },
        )
        .map_err(|e| write_error(e, &data.email))?;

    if affected != 1 {
        return Err(UserError::UnexpectedRowCount {
            op: "insert_user".to_string(),
            expected: 1,
            actual: affected,
        }
        .into());
    }
    Ok(conn.last_insert_rowid())
}

/// Attach operation context to the outcome and emit the closing event
fn observe<T>(op: &str, ctx: &RequestContext, start: Instant, result: Result<T>) -> Result<T> {
    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(value) => {
            log_op_end!(
                op,
                duration_ms = duration_ms,
                request_id = ctx.request_id.as_str()
            );
            Ok(value)
        }
        Err(err) => {
            let err = err.with_op(op).with_request_id(ctx.request_id.clone());
            log_op_error!(
                op,
                err.clone(),
                duration_ms = duration_ms,
                request_id = ctx.request_id.as_str()
            );
            Err(err)
        }
    }
}

fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        role: row.get("role")?,
        email: row.get("email")?,
        age: row.get("age")?,
        password_hash: None,
    })
}

fn full_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let mut user = summary_from_row(row)?;
    user.password_hash = Some(row.get("password")?);
    Ok(user)
}
