//! Subscriber installation
//!
//! Events go to stderr so JSON command output on stdout stays parseable.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Output style selected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines, `usercrud=debug`
    Development,
    /// JSON lines, `usercrud=info`
    Production,
    /// Silent; pair with `init_test_capture()`
    Test,
}

impl Profile {
    fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "usercrud=debug",
            Profile::Production | Profile::Test => "usercrud=info",
        }
    }

    /// `RUST_LOG` wins over the profile default
    fn filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`
///
/// Only the first call in a process has an effect.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let builder = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(profile.filter());

        match profile {
            Profile::Development => builder.init(),
            Profile::Production => builder.json().init(),
            Profile::Test => tracing_subscriber::registry().init(),
        }
    });
}
