/// Generate-Manifest stage
///
/// Joins the curated folder map against the optimized image tree and the
/// original video tree, and rewrites the manifest's media lists. Given the
/// same files on disk the output is byte-for-byte the same.

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::folders::FolderMap;
use super::scan;
use crate::config::Config;
use crate::error::PipelineError;
use crate::state::data::Project;
use crate::state::manifest::Manifest;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "svg"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov"];

/// Directories to scan and the path prefixes written into the manifest
#[derive(Debug, Clone)]
pub struct MediaRoots {
    /// Optimized images on disk
    pub images_dir: PathBuf,
    /// Manifest prefix for images, e.g. "obras-optimized"
    pub images_prefix: String,
    /// Original tree, where videos stay uncompressed
    pub videos_dir: PathBuf,
    pub videos_prefix: String,
    /// Older prefixes rewritten to `images_prefix` when nothing is found
    pub legacy_prefixes: Vec<String>,
}

impl MediaRoots {
    pub fn from_config(config: &Config) -> Self {
        MediaRoots {
            images_dir: config.optimized_dir(),
            images_prefix: config.assets.optimized.clone(),
            videos_dir: config.originals_dir(),
            videos_prefix: config.assets.originals.clone(),
            legacy_prefixes: vec![
                config.assets.originals.clone(),
                config.assets.upscaled.clone(),
                config.assets.optimized.clone(),
            ],
        }
    }

    /// Images and videos found for a folder slug, as manifest paths
    pub fn discover(&self, slug: &str) -> (Vec<String>, Vec<String>) {
        let images = scan::media_files(&self.images_dir.join(slug), IMAGE_EXTENSIONS)
            .into_iter()
            .map(|file| format!("{}/{}/{}", self.images_prefix, slug, file))
            .collect();

        let videos = scan::media_files(&self.videos_dir.join(slug), VIDEO_EXTENSIONS)
            .into_iter()
            .map(|file| format!("{}/{}/{}", self.videos_prefix, slug, file))
            .collect();

        (images, videos)
    }

    /// Point an older image path at the optimized tree
    pub fn migrate_path(&self, path: &str) -> String {
        for prefix in &self.legacy_prefixes {
            if let Some(rest) = path
                .strip_prefix(prefix.as_str())
                .and_then(|r| r.strip_prefix('/'))
            {
                return format!("{}/{}", self.images_prefix, rest);
            }
        }
        path.to_string()
    }
}

/// What happened to the records of one run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ManifestReport {
    /// Records whose images came from the optimized tree
    pub updated: usize,
    /// Records whose existing paths were rewritten instead
    pub migrated: usize,
    /// Records with no folder mapping
    pub unmapped: usize,
    /// Mapped records that ended up without images
    pub without_images: usize,
    /// Whether the manifest file changed on disk
    pub written: bool,
}

fn update_project(project: &mut Project, slug: &str, roots: &MediaRoots, report: &mut ManifestReport) {
    let (images, videos) = roots.discover(slug);

    if !images.is_empty() {
        info!("✓ {}: {} images found", project.name, images.len());
        project.images = images;
        report.updated += 1;
    } else if !project.images.is_empty() {
        project.images = project.images.iter().map(|p| roots.migrate_path(p)).collect();
        warn!(
            "⚠ {}: no optimized images found, paths updated to {}/",
            project.name, roots.images_prefix
        );
        report.migrated += 1;
    } else {
        warn!("⚠ {}: no images found in folder '{}'", project.name, slug);
        report.without_images += 1;
    }

    if !videos.is_empty() {
        info!("  📹 {}: {} videos found", project.name, videos.len());
    }
    project.videos = videos;
}

/// Rewrite the media lists of every mapped record in place
pub fn update_manifest(manifest: &mut Manifest, folders: &FolderMap, roots: &MediaRoots) -> ManifestReport {
    let mut report = ManifestReport::default();

    for project in &mut manifest.projects {
        match folders.slug_for(&project.name) {
            Some(slug) => update_project(project, slug, roots, &mut report),
            None => {
                warn!("⚠ {}: no mapped folder", project.name);
                report.unmapped += 1;
            }
        }
    }

    report
}

/// Run the stage against the manifest file at `manifest_path`
pub fn run(
    manifest_path: &Path,
    folders: &FolderMap,
    roots: &MediaRoots,
) -> Result<ManifestReport, PipelineError> {
    let mut manifest = Manifest::load(manifest_path)?;

    let mut report = update_manifest(&mut manifest, folders, roots);
    report.written = manifest.save(manifest_path)?;

    if report.written {
        info!("✓ Manifest updated: {}", manifest_path.display());
    } else {
        info!("✓ Manifest already up to date: {}", manifest_path.display());
    }

    Ok(report)
}

/// Stage entry point with the configured paths and folder map
pub fn run_with_config(config: &Config) -> Result<ManifestReport, PipelineError> {
    let folders = FolderMap::curated().with_overrides(&config.folder_map);
    let roots = MediaRoots::from_config(config);
    run(&config.manifest_path(), &folders, &roots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::sample_project;
    use std::fs;
    use tempfile::TempDir;

    fn roots(base: &Path) -> MediaRoots {
        MediaRoots {
            images_dir: base.join("obras-optimized"),
            images_prefix: "obras-optimized".to_string(),
            videos_dir: base.join("obras"),
            videos_prefix: "obras".to_string(),
            legacy_prefixes: vec![
                "obras".to_string(),
                "obras-upscaled".to_string(),
                "obras-optimized".to_string(),
            ],
        }
    }

    fn touch(path: PathBuf) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_migrate_path() {
        let roots = roots(Path::new("/site"));
        assert_eq!(roots.migrate_path("obras/uas/1.jpg"), "obras-optimized/uas/1.jpg");
        assert_eq!(roots.migrate_path("obras-upscaled/uas/1.png"), "obras-optimized/uas/1.png");
        assert_eq!(roots.migrate_path("obras-optimized/uas/1.webp"), "obras-optimized/uas/1.webp");
        assert_eq!(roots.migrate_path("obrasx/uas/1.jpg"), "obrasx/uas/1.jpg");
        assert_eq!(roots.migrate_path("otros/1.jpg"), "otros/1.jpg");
    }

    #[test]
    fn test_discover_sorts_and_filters() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path();
        touch(base.join("obras-optimized/uas/2.webp"));
        touch(base.join("obras-optimized/uas/1.webp"));
        touch(base.join("obras-optimized/uas/thumbs.db"));
        touch(base.join("obras/uas/recorrido.MP4"));
        touch(base.join("obras/uas/1.jpg"));

        let (images, videos) = roots(base).discover("uas");
        assert_eq!(images, ["obras-optimized/uas/1.webp", "obras-optimized/uas/2.webp"]);
        assert_eq!(videos, ["obras/uas/recorrido.MP4"]);
    }

    #[test]
    fn test_update_manifest_policies() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path();
        touch(base.join("obras-optimized/uas/1.webp"));
        touch(base.join("obras/mides/video.mp4"));

        let mut found = sample_project(1, "corporate", "completed");
        found.name = "Uruguayan American School (UAS)".to_string();
        found.images = vec!["obras/uas/viejo.jpg".to_string()];
        found.videos = vec!["obras/uas/viejo.mp4".to_string()];

        let mut stale = sample_project(2, "corporate", "completed");
        stale.name = "MIDES - Fachada Institucional".to_string();
        stale.images = vec!["obras-upscaled/mides/1.png".to_string()];

        let mut unmapped = sample_project(3, "corporate", "completed");
        unmapped.name = "Obra sin carpeta".to_string();
        unmapped.images = vec!["obras/otra/1.jpg".to_string()];

        let mut manifest = Manifest::new(vec![found, stale, unmapped]);
        let report = update_manifest(&mut manifest, &FolderMap::curated(), &roots(base));

        assert_eq!(report.updated, 1);
        assert_eq!(report.migrated, 1);
        assert_eq!(report.unmapped, 1);

        let p = &manifest.projects;
        assert_eq!(p[0].images, ["obras-optimized/uas/1.webp"]);
        assert!(p[0].videos.is_empty());
        assert_eq!(p[1].images, ["obras-optimized/mides/1.png"]);
        assert_eq!(p[1].videos, ["obras/mides/video.mp4"]);
        assert_eq!(p[2].images, ["obras/otra/1.jpg"]);
    }

    #[test]
    fn test_run_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path();
        touch(base.join("obras-optimized/proa-carrasco/b.webp"));
        touch(base.join("obras-optimized/proa-carrasco/a.webp"));
        touch(base.join("obras/proa-carrasco/a.mov"));

        let manifest_path = base.join("obras.json");
        fs::write(
            &manifest_path,
            r#"[{"id": 1, "nombre": "Proa Carrasco", "categoria": "residencial", "estado": "Finalizada", "destacada": true},
                {"id": 2, "nombre": "Sin mapa", "imagenes": ["obras/x/1.jpg"]}]"#,
        )
        .unwrap();

        let folders = FolderMap::curated();
        let first = run(&manifest_path, &folders, &roots(base)).unwrap();
        assert!(first.written);
        let bytes = fs::read(&manifest_path).unwrap();

        let second = run(&manifest_path, &folders, &roots(base)).unwrap();
        assert!(!second.written);
        assert_eq!(bytes, fs::read(&manifest_path).unwrap());

        let written = Manifest::load(&manifest_path).unwrap();
        assert_eq!(
            written.projects[0].images,
            ["obras-optimized/proa-carrasco/a.webp", "obras-optimized/proa-carrasco/b.webp"]
        );
        assert_eq!(written.projects[0].videos, ["obras/proa-carrasco/a.mov"]);
        assert_eq!(written.projects[0].extra["destacada"], serde_json::Value::Bool(true));
    }

    #[test]
    fn test_missing_manifest_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let result = run(&tmp.path().join("obras.json"), &FolderMap::curated(), &roots(tmp.path()));
        assert!(matches!(result, Err(PipelineError::Manifest(_))));
    }
}
