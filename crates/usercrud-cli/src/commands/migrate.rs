//! Schema command
//!
//! Usage: usercrud migrate
//!
//! The schema is applied on every start; this command only reports it.

use crate::commands::print_json;
use clap::Args;
use serde_json::json;
use usercrud_core::ExError;
use usercrud_store::migrations::get_migrations;

#[derive(Debug, Args)]
pub struct MigrateArgs {}

pub fn execute(_args: MigrateArgs) -> Result<(), ExError> {
    let applied: Vec<&str> = get_migrations().iter().map(|m| m.id).collect();
    print_json(&json!({ "applied": applied }))
}
