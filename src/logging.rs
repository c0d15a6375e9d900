//! tracing subscriber setup
//!
//! Logs go to stderr so report paths and tables on stdout stay pipeable.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "damaged_box_rust=debug,damaged_box_common=debug"
    } else {
        "damaged_box_rust=info,damaged_box_common=info"
    };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
