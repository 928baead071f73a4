//! Process configuration
//!
//! Every option has a flag, an environment variable and a default.

use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use usercrud_core::logging_facility::Profile;
use usercrud_core::password::{HashCost, PasswordHasher};
use usercrud_core::ExError;
use usercrud_core_types::RequestContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, debug level
    Dev,
    /// JSON lines, info level
    Json,
}

#[derive(Debug, Args)]
pub struct Config {
    /// SQLite database file, or `:memory:`
    #[arg(
        long,
        global = true,
        env = "USERCRUD_DB",
        default_value = "user-database.sql"
    )]
    pub db: PathBuf,

    /// Log output format (written to stderr)
    #[arg(
        long,
        global = true,
        env = "USERCRUD_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Dev
    )]
    pub log_format: LogFormat,

    /// Deadline for each operation, in milliseconds
    #[arg(long, global = true, env = "USERCRUD_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Argon2 memory cost in KiB
    #[arg(long, global = true, env = "USERCRUD_HASH_MEMORY_KIB")]
    pub hash_memory_kib: Option<u32>,

    /// Argon2 iteration count
    #[arg(long, global = true, env = "USERCRUD_HASH_ITERATIONS")]
    pub hash_iterations: Option<u32>,
}

impl Config {
    pub fn log_profile(&self) -> Profile {
        match self.log_format {
            LogFormat::Dev => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }

    /// Fresh context for one command, bounded by `--timeout-ms` when set
    pub fn request_context(&self) -> RequestContext {
        let ctx = RequestContext::new();
        match self.timeout_ms {
            Some(ms) => ctx.with_timeout(Duration::from_millis(ms)),
            None => ctx,
        }
    }

    pub fn hash_cost(&self) -> HashCost {
        let defaults = HashCost::default();
        HashCost {
            memory_kib: self.hash_memory_kib.unwrap_or(defaults.memory_kib),
            iterations: self.hash_iterations.unwrap_or(defaults.iterations),
            parallelism: defaults.parallelism,
        }
    }

    /// # Errors
    /// Returns a `Hashing` error when the configured cost is rejected.
    pub fn hasher(&self) -> Result<PasswordHasher, ExError> {
        Ok(PasswordHasher::new(self.hash_cost())?)
    }
}
