//! Diagnostic logging on stderr.
//!
//! Quiet (`warn`) by default so logs never mix with session output.
//! `RUST_LOG` takes precedence over the verbosity flag:
//!
//! ```bash
//! RUST_LOG=sentiment_cli=debug sentiment "I love this!"
//! sentiment -vv
//! ```

use std::sync::Once;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: Once = Once::new();

/// Maps the number of `-v` flags to a filter directive.
pub const fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize logging.
///
/// Call once at startup. Safe to call multiple times (only first call takes effect).
pub fn init(verbosity: u8) {
    INIT.call_once(|| {
        let filter = if std::env::var_os("RUST_LOG").is_some() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(level_for_verbosity(verbosity))
        };

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .compact()
            .with_filter(filter);

        // A subscriber set by an embedding application wins.
        let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
    });
}
