use obras::config::Config;
use obras::media::orchestrator::{self, ProcessRunner, Stage};
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    obras::logging::init();

    let result = Config::load().and_then(|config| {
        let mut runner = ProcessRunner::beside_current_exe(&config.site_root)?;
        orchestrator::run_chain(&mut runner, &Stage::CHAIN)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ Error during processing: {}", e);
            ExitCode::FAILURE
        }
    }
}
