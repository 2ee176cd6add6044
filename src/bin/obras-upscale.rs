use anyhow::Result;
use obras::config::Config;
use obras::media::raster::ImageRaster;
use obras::media::upscale;
use tracing::info;

fn main() -> Result<()> {
    obras::logging::init();
    let config = Config::load()?;

    info!("🚀 Starting image upscale...");
    let report = upscale::run(
        &ImageRaster,
        &config.upscale,
        &config.originals_dir(),
        &config.upscaled_dir(),
    )?;

    info!("💡 Next step: run obras-optimize on the upscaled images");
    if report.failed > 0 {
        info!("{} of {} files failed", report.failed, report.total());
    }
    Ok(())
}
