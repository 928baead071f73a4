//! Seed import command
//!
//! Usage: usercrud seed import <PATH>
//!
//! PATH is a seed YAML file or a directory of them. Each file is imported
//! in its own transaction, in file name order.

use crate::commands::print_json;
use crate::config::Config;
use clap::{Args, Subcommand};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use usercrud_core::ExError;
use usercrud_store::errors::io_error;
use usercrud_store::seed::import_seed;

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Import a seed file into the database
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to seed YAML file or directory
    pub path: PathBuf,
}

/// Execute seed command
pub fn execute(args: SeedArgs, config: &Config, conn: &mut Connection) -> Result<(), ExError> {
    match args.command {
        SeedCommand::Import(import_args) => execute_import(import_args, config, conn),
    }
}

fn execute_import(args: ImportArgs, config: &Config, conn: &mut Connection) -> Result<(), ExError> {
    let hasher = config.hasher()?;

    let mut reports = Vec::new();
    for seed_file in seed_files(&args.path)? {
        let ctx = config.request_context();
        let report = import_seed(&ctx, &seed_file, conn, &hasher)?;
        tracing::info!(path = %seed_file.display(), digest = %report.digest, "seed imported");
        reports.push(report);
    }

    print_json(&reports)
}

/// The file itself, or the sorted YAML files of a directory
fn seed_files(path: &Path) -> Result<Vec<PathBuf>, ExError> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(path)
        .map_err(|e| io_error("seed_import", e))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .map(|ext| ext == "yaml" || ext == "yml")
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}
