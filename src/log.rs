// src/log.rs
//
// Thin logging layer. Library code logs through the macros below, which emit
// `tracing` events under the crate target; frontends decide where they go.

pub const TARGET: &str = "jarchive_scrape";

/// Install a stderr subscriber. `RUST_LOG` overrides `default_level`.
#[cfg(feature = "cli")]
pub fn init(default_level: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (tests, embedding) is harmless; keep the first subscriber.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: $crate::log::TARGET, $($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::__tracing::debug!(target: $crate::log::TARGET, $($arg)*)
    };
}

/// Warning-level logging (recoverable extraction problems)
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        $crate::__tracing::warn!(target: $crate::log::TARGET, $($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::__tracing::error!(target: $crate::log::TARGET, $($arg)*)
    };
}
