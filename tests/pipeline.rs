//! End-to-end runs of the three media stages over a throwaway site tree.

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};
use obras::config::{Config, CONFIG_FILE};
use obras::media::raster::ImageRaster;
use obras::media::{manifest_gen, optimize, upscale};
use obras::state::data::ProjectId;
use obras::state::manifest::Manifest;
use tempfile::TempDir;

const MANIFEST: &str = r#"{
  "obras": [
    {
      "id": 1,
      "nombre": "Casa Prueba",
      "cliente": "Cliente Uno",
      "categoria": "residential",
      "estado": "completed",
      "ubicacion": "Montevideo",
      "superficie": "300 m²",
      "descripcion": "Vivienda",
      "imagenes": ["obras/casa-prueba/viejo.jpg"],
      "videos": [],
      "fechaInicio": "2023-03-01",
      "fechaFin": null
    },
    {
      "id": 2,
      "nombre": "Sin Carpeta",
      "cliente": "Cliente Dos",
      "categoria": "industrial",
      "estado": "in-progress",
      "ubicacion": "Canelones",
      "superficie": null,
      "descripcion": "Nave",
      "imagenes": ["obras/sin-carpeta/foto.jpg"],
      "videos": []
    }
  ]
}"#;

const CONFIG: &str = r#"{
  "upscale": {
    "bounds": { "min_width": 400, "min_height": 300, "max_width": 1000, "max_height": 800 }
  },
  "folder_map": { "Casa Prueba": "casa-prueba" }
}"#;

fn photo(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width) as u8,
            (y * 255 / height) as u8,
            ((x + y) % 64) as u8 + 96,
        ])
    })
}

fn site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    let folder = root.join("assets/images/obras/casa-prueba");
    fs::create_dir_all(&folder).unwrap();
    photo(200, 150).save(folder.join("fachada.jpg")).unwrap();
    photo(500, 400).save(folder.join("interior.png")).unwrap();
    fs::write(folder.join("recorrido.mp4"), b"not really a video").unwrap();

    fs::create_dir_all(root.join("assets/data")).unwrap();
    fs::write(root.join("assets/data/obras.json"), MANIFEST).unwrap();
    fs::write(root.join(CONFIG_FILE), CONFIG).unwrap();

    tmp
}

fn run_pipeline(config: &Config) -> (obras::media::StageReport, manifest_gen::ManifestReport) {
    let upscaled = upscale::run(
        &ImageRaster,
        &config.upscale,
        &config.originals_dir(),
        &config.upscaled_dir(),
    )
    .unwrap();

    let source = optimize::select_source(&config.upscaled_dir(), &config.originals_dir()).unwrap();
    optimize::run(&ImageRaster, &config.optimize, &source, &config.optimized_dir()).unwrap();

    let manifest = manifest_gen::run_with_config(config).unwrap();
    (upscaled, manifest)
}

#[test]
fn test_full_pipeline_updates_manifest() {
    let tmp = site();
    let config = Config::load_from(tmp.path()).unwrap();

    let (upscaled, report) = run_pipeline(&config);
    assert_eq!(upscaled.processed, 2);
    assert_eq!(upscaled.failed, 0);

    // Below the floor: doubled. Already inside the bounds: unchanged.
    let up = config.upscaled_dir().join("casa-prueba");
    assert_eq!(image::image_dimensions(up.join("fachada.png")).unwrap(), (400, 300));
    assert_eq!(image::image_dimensions(up.join("interior.png")).unwrap(), (500, 400));

    let opt = config.optimized_dir().join("casa-prueba");
    assert_eq!(image::image_dimensions(opt.join("fachada.webp")).unwrap(), (400, 300));
    assert!(opt.join("interior.webp").is_file());
    assert!(!opt.join("recorrido.webp").exists());

    assert_eq!(report.updated, 1);
    assert_eq!(report.unmapped, 1);
    assert!(report.written);

    let manifest = Manifest::load(&config.manifest_path()).unwrap();
    assert!(manifest.is_wrapped());

    let casa = manifest.find(&ProjectId::Number(1)).unwrap();
    assert_eq!(
        casa.images,
        vec![
            "obras-optimized/casa-prueba/fachada.webp".to_string(),
            "obras-optimized/casa-prueba/interior.webp".to_string(),
        ]
    );
    assert_eq!(casa.videos, vec!["obras/casa-prueba/recorrido.mp4".to_string()]);
    assert_eq!(casa.start_date.as_deref(), Some("2023-03-01"));

    // Unmapped records are left exactly as they were
    let other = manifest.find(&ProjectId::Number(2)).unwrap();
    assert_eq!(other.images, vec!["obras/sin-carpeta/foto.jpg".to_string()]);

    // Only media lists are rewritten; explicit nulls stay in the file
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config.manifest_path()).unwrap()).unwrap();
    assert!(written["obras"][0]["fechaFin"].is_null());
    assert!(written["obras"][1]["superficie"].is_null());
}

#[test]
fn test_second_run_changes_nothing() {
    let tmp = site();
    let config = Config::load_from(tmp.path()).unwrap();

    run_pipeline(&config);
    let first = fs::read(config.manifest_path()).unwrap();

    let (upscaled, report) = run_pipeline(&config);
    assert_eq!(upscaled.processed, 0);
    assert_eq!(upscaled.skipped, 2);
    assert!(!report.written);
    assert_eq!(fs::read(config.manifest_path()).unwrap(), first);
}

#[test]
fn test_optimize_falls_back_to_originals() {
    let tmp = site();
    let config = Config::load_from(tmp.path()).unwrap();

    let source = optimize::select_source(&config.upscaled_dir(), &config.originals_dir()).unwrap();
    assert_eq!(source, config.originals_dir());

    let report = optimize::run(&ImageRaster, &config.optimize, &source, &config.optimized_dir()).unwrap();
    assert_eq!(report.processed, 2);
    assert!(Path::new(&config.optimized_dir().join("casa-prueba/fachada.webp")).is_file());
    assert_eq!(
        image::image_dimensions(config.optimized_dir().join("casa-prueba/fachada.webp")).unwrap(),
        (200, 150)
    );
}

#[test]
fn test_missing_originals_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let config = Config::load_from(tmp.path()).unwrap();

    assert!(upscale::run(
        &ImageRaster,
        &config.upscale,
        &config.originals_dir(),
        &config.upscaled_dir()
    )
    .is_err());
    assert!(optimize::select_source(&config.upscaled_dir(), &config.originals_dir()).is_err());
}
