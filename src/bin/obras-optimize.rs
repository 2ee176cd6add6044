use anyhow::Result;
use obras::config::Config;
use obras::media::optimize;
use obras::media::raster::ImageRaster;

fn main() -> Result<()> {
    obras::logging::init();
    let config = Config::load()?;

    let source = optimize::select_source(&config.upscaled_dir(), &config.originals_dir())?;
    optimize::run(&ImageRaster, &config.optimize, &source, &config.optimized_dir())?;
    Ok(())
}
