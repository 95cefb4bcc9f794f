//! `tracing` subscriber setup.
//!
//! Events go to stderr so stdout stays reserved for workflow commands.
//! The filter comes from `TASKDEF_RENDER_LOG` (EnvFilter syntax), defaulting to
//! `warn`, or `debug` for this crate when verbose output is requested.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static INIT: OnceCell<()> = OnceCell::new();

pub const LOG_ENV: &str = "TASKDEF_RENDER_LOG";

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "taskdef_render=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber once; later calls are no-ops.
pub fn init_tracing(verbose: bool) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
