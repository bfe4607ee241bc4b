use std::sync::Once;
use tracing::Level;

static INIT: Once = Once::new();

/// Picks the log level for the command-line verbosity flag.
pub fn level_for(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Installs the fmt subscriber on stderr so stdout stays clean for JSON output.
/// Calling it again, or after another subscriber was set, is a no-op.
pub fn init_logging(level: Level) {
    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .try_init();
        });
    }
}
