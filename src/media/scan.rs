use std::path::Path;
use walkdir::WalkDir;

/// Case-insensitive extension check (extensions given without the dot)
pub fn has_extension(name: &str, extensions: &[&str]) -> bool {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.contains(&ext.as_str()))
}

/// Immediate subdirectories of `root`, sorted by name
pub fn project_folders(root: &Path) -> Vec<String> {
    WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect()
}

/// Files directly inside `dir` with one of `extensions`, sorted by name.
/// A missing directory yields an empty list.
pub fn media_files(dir: &Path, extensions: &[&str]) -> Vec<String> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let mut names: Vec<String> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| has_extension(name, extensions))
        .collect();

    names.sort();
    names
}

/// File name without its extension
pub fn file_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_extension_matching() {
        assert!(has_extension("foto.JPG", &["jpg", "png"]));
        assert!(has_extension("a.b.webp", &["webp"]));
        assert!(!has_extension("notas.txt", &["jpg"]));
        assert!(!has_extension("sin-extension", &["jpg"]));
    }

    #[test]
    fn test_folders_and_files_sorted() {
        let tmp = TempDir::new().unwrap();
        for folder in ["zeta", "alfa", "medio"] {
            fs::create_dir(tmp.path().join(folder)).unwrap();
        }
        fs::write(tmp.path().join("suelto.jpg"), b"x").unwrap();
        for file in ["2.jpg", "10.jpg", "1.PNG", "readme.md"] {
            fs::write(tmp.path().join("alfa").join(file), b"x").unwrap();
        }

        assert_eq!(project_folders(tmp.path()), ["alfa", "medio", "zeta"]);
        assert_eq!(
            media_files(&tmp.path().join("alfa"), &["jpg", "png"]),
            ["1.PNG", "10.jpg", "2.jpg"]
        );
        assert!(media_files(&tmp.path().join("nada"), &["jpg"]).is_empty());
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("foto.final.jpg"), "foto.final");
        assert_eq!(file_stem("plano"), "plano");
    }
}
