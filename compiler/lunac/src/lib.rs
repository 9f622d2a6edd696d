//! Command-line driver for the luna front-end.
//!
//! The `luna` binary is a thin layer over this library: [`options`] turns
//! arguments into a [`luna_parse::ParseConfig`] and output settings, and
//! [`commands`] runs one front-end phase per command.

pub mod commands;
pub mod options;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Safe to call more than once. Does nothing unless `RUST_LOG` is set, so
/// normal runs print only command output; `RUST_LOG=luna_parse=debug`
/// shows parser events.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
