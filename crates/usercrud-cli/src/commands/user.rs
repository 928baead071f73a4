//! User commands
//!
//! Usage:
//!   usercrud user list
//!   usercrud user get <ID>
//!   usercrud user create --name <NAME> --email <EMAIL> [--role <ROLE>] [--age <AGE>] --password <PW>
//!   usercrud user update <ID> --name <NAME> --email <EMAIL> --role <ROLE> [--age <AGE>] [--password <PW>]
//!   usercrud user delete <ID>
//!   usercrud user verify-password <ID> --password <PW>

use crate::commands::print_json;
use crate::config::Config;
use clap::{Args, Subcommand};
use rusqlite::Connection;
use serde_json::json;
use std::convert::Infallible;
use usercrud_core::model::{NewUser, UserUpdate};
use usercrud_core::ExError;
use usercrud_core_types::Sensitive;
use usercrud_store::{SqliteUserRepo, UserRepository};

#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List all users (passwords are never included)
    List,
    /// Show one user
    Get(IdArgs),
    /// Create a user and print its id
    Create(CreateArgs),
    /// Replace every field of a user
    Update(UpdateArgs),
    /// Delete a user
    Delete(IdArgs),
    /// Check a password against the stored hash
    VerifyPassword(VerifyArgs),
}

#[derive(Debug, Args)]
pub struct IdArgs {
    pub id: i64,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    /// Defaults to USER
    #[arg(long)]
    pub role: Option<String>,

    #[arg(long)]
    pub age: Option<i64>,

    #[arg(
        long,
        env = "USERCRUD_PASSWORD",
        hide_env_values = true,
        value_parser = parse_sensitive
    )]
    pub password: Sensitive<String>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: i64,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub role: String,

    /// Omit to clear the stored age
    #[arg(long)]
    pub age: Option<i64>,

    /// New password; the stored hash is kept when omitted.
    /// Only the flag is read here, never USERCRUD_PASSWORD.
    #[arg(long, value_parser = parse_sensitive)]
    pub password: Option<Sensitive<String>>,
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    pub id: i64,

    #[arg(
        long,
        env = "USERCRUD_PASSWORD",
        hide_env_values = true,
        value_parser = parse_sensitive
    )]
    pub password: Sensitive<String>,
}

fn parse_sensitive(value: &str) -> Result<Sensitive<String>, Infallible> {
    Ok(Sensitive::from(value))
}

/// Execute user command
pub fn execute(args: UserArgs, config: &Config, conn: &Connection) -> Result<(), ExError> {
    let ctx = config.request_context();
    let repo = SqliteUserRepo::with_hasher(conn, config.hasher()?);

    match args.command {
        UserCommand::List => {
            let users = repo.list_users(&ctx)?;
            print_json(&users)
        }
        UserCommand::Get(IdArgs { id }) => {
            let mut user = repo.get_user_by_id(&ctx, id)?;
            user.password_hash = None;
            print_json(&user)
        }
        UserCommand::Create(create) => {
            let mut data = NewUser::new(create.name, create.email);
            data.role = create.role;
            data.age = create.age;

            let id = repo.insert_user(&ctx, &data, &create.password)?;
            print_json(&json!({ "id": id }))
        }
        UserCommand::Update(update) => {
            let data = UserUpdate {
                name: update.name,
                role: update.role,
                email: update.email,
                age: update.age,
                password: update.password,
            };

            repo.update_user_by_id(&ctx, update.id, &data)?;
            print_json(&json!({ "id": update.id, "updated": true }))
        }
        UserCommand::Delete(IdArgs { id }) => {
            repo.delete_user_by_id(&ctx, id)?;
            print_json(&json!({ "id": id, "deleted": true }))
        }
        UserCommand::VerifyPassword(verify) => {
            let valid = repo.verify_user_password(&ctx, verify.id, &verify.password)?;
            print_json(&json!({ "id": verify.id, "valid": valid }))
        }
    }
}
