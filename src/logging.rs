use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter directives
pub const LOG_ENV: &str = "OBRAS_LOG";

/// Library and stage binaries at info, everything else (iced, wgpu) at warn
const DEFAULT_DIRECTIVES: &str =
    "obras=info,obras_upscale=info,obras_optimize=info,obras_manifest=info,obras_pipeline=info,warn";

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}
