// ABOUTME: Shared logging setup for the agents launcher
// ABOUTME: Two levels: quiet by default, debug with `agents --verbose`

use tracing_subscriber::EnvFilter;

/// Quiet logging to stderr. Default: WARN level, RUST_LOG override.
/// The launcher prints its menu on stdout and children inherit both streams,
/// so only problems are shown unless asked for.
pub fn init() {
    init_with_level(tracing::Level::WARN);
}

/// Verbose logging to stderr. Default: DEBUG level, RUST_LOG override.
/// Used for `agents --verbose`.
pub fn init_verbose() {
    init_with_level(tracing::Level::DEBUG);
}

fn init_with_level(level: tracing::Level) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn exports_init() {
        let _ = super::init as fn();
    }

    #[test]
    fn exports_init_verbose() {
        let _ = super::init_verbose as fn();
    }
}
