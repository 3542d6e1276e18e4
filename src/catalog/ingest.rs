//! Batch catalog ingest
//!
//! Scans source trees for model files and registers each into the catalog
//! layout: `<root>/<category>/<stem>/<file>`, with any sibling thumbnail
//! copied alongside as `thumbnail.png`. Models are opaque files here;
//! nothing is parsed or converted.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::{CatalogError, MODEL_EXTENSIONS};
use crate::scene::Category;

/// Scan `sources` recursively and register every model file found under
/// the catalog root, as `category` entries. Entries that already exist
/// are left alone. Returns how many new entries were created.
pub fn ingest_sources(
    catalog_root: &Path,
    category: Category,
    sources: &[PathBuf],
) -> Result<usize, CatalogError> {
    let folder = match category.prefab_folder() {
        Some(folder) => catalog_root.join(folder),
        None => return Ok(0),
    };
    fs::create_dir_all(&folder)?;

    let mut models = Vec::new();
    for source in sources {
        collect_models(source, &mut models);
    }
    models.sort();

    let mut created = 0;
    for model in models {
        if ingest_one(&folder, &model)? {
            created += 1;
        }
    }
    info!("ingested {} new entries into {}", created, folder.display());
    Ok(created)
}

fn collect_models(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("cannot read source tree {}: {}", dir.display(), err);
            return;
        }
    };
    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.is_dir() {
            collect_models(&path, out);
        } else if is_model(&path) {
            out.push(path);
        }
    }
}

fn is_model(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| MODEL_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn ingest_one(category_folder: &Path, model: &Path) -> Result<bool, CatalogError> {
    let (stem, file_name) = match (
        model.file_stem().and_then(|s| s.to_str()),
        model.file_name(),
    ) {
        (Some(stem), Some(name)) => (stem, name),
        _ => {
            warn!("skipping model with unreadable name: {}", model.display());
            return Ok(false);
        }
    };

    let dest_dir = category_folder.join(stem);
    if dest_dir.exists() {
        debug!("already ingested: {}", stem);
        return Ok(false);
    }

    fs::create_dir_all(&dest_dir)?;
    fs::copy(model, dest_dir.join(file_name))?;

    // A sibling <stem>.png or thumbnail.png becomes the entry's thumbnail
    for candidate in [
        model.with_extension("png"),
        model.with_file_name("thumbnail.png"),
    ] {
        if candidate.is_file() {
            fs::copy(&candidate, dest_dir.join("thumbnail.png"))?;
            break;
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use std::fs::File;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        File::create(path).unwrap();
    }

    #[test]
    fn test_ingest_registers_models_and_thumbnails() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        touch(&src.join("chair.fbx"));
        touch(&src.join("chair.png"));
        touch(&src.join("deep/table.obj"));
        touch(&src.join("notes.txt"));

        let root = tmp.path().join("catalog");
        fs::create_dir_all(&root).unwrap();
        let count = ingest_sources(&root, Category::Item, &[src]).unwrap();
        assert_eq!(count, 2);

        let catalog = Catalog::discover(root.as_path()).unwrap();
        let chair = catalog.get("chair").unwrap();
        assert!(chair.thumbnail_path.is_some());
        let table = catalog.get("table").unwrap();
        assert!(table.thumbnail_path.is_none());
    }

    #[test]
    fn test_reingest_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        touch(&src.join("chair.fbx"));
        let root = tmp.path().join("catalog");
        fs::create_dir_all(&root).unwrap();

        assert_eq!(ingest_sources(&root, Category::Item, &[src.clone()]).unwrap(), 1);
        assert_eq!(ingest_sources(&root, Category::Item, &[src]).unwrap(), 0);
    }

    #[test]
    fn test_untagged_category_ingests_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let count = ingest_sources(tmp.path(), Category::SceneObject, &[]).unwrap();
        assert_eq!(count, 0);
    }
}
