//! The `sprig` command line driver.
//!
//! ```text
//! source file ──► sprig_parse::parse ──► ParseOutput
//!                                            │
//!                         diagnostics? ◄─────┤
//!                                            ▼
//!                               sprig_eval::Interpreter::run
//! ```
//!
//! Commands live in [`commands`]; each one writes results to a caller-supplied
//! writer and diagnostics to a [`DiagnosticEmitter`](sprig_diagnostic::DiagnosticEmitter),
//! so tests drive them without touching the process streams.

pub mod commands;
mod error;

pub use commands::{parse_options, CliOptions, Session};
pub use error::CliError;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs a tracing subscriber when `RUST_LOG` is set.
///
/// Safe to call more than once. `RUST_LOG=sprig_eval=trace` shows every
/// invocation as an indented call tree.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .init();
        }
    });
}
