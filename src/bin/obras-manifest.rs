use anyhow::Result;
use obras::config::Config;
use obras::media::manifest_gen;
use tracing::info;

fn main() -> Result<()> {
    obras::logging::init();
    let config = Config::load()?;

    let report = manifest_gen::run_with_config(&config)?;
    info!(
        "📋 {} updated, {} migrated, {} unmapped, {} without images",
        report.updated, report.migrated, report.unmapped, report.without_images
    );
    Ok(())
}
