//! Asset catalog
//!
//! The catalog is a directory tree: `<root>/Items/<key>/` and
//! `<root>/Shelves/<key>/`, each holding one model file (fbx or obj,
//! treated as an opaque resource) and an optional `thumbnail.png`.
//! `<root>/object_info.json` carries display metadata per key.
//!
//! Discovery is sorted so entry order is stable across platforms, and
//! unreadable entries are skipped with a warning instead of failing the
//! whole catalog.

pub mod ingest;

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Deserialize;

use crate::scene::Category;

/// Model file extensions the catalog recognizes
pub const MODEL_EXTENSIONS: [&str; 2] = ["fbx", "obj"];

const INFO_FILE: &str = "object_info.json";
const THUMBNAIL_FILE: &str = "thumbnail.png";

#[derive(Debug)]
pub enum CatalogError {
    Io(io::Error),
    /// The catalog root does not exist or is not a directory
    MissingRoot(PathBuf),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "catalog IO error: {}", e),
            CatalogError::MissingRoot(p) => write!(f, "catalog root not found: {}", p.display()),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<io::Error> for CatalogError {
    fn from(e: io::Error) -> Self {
        CatalogError::Io(e)
    }
}

/// Display metadata for one catalog key, from `object_info.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ObjectInfo {
    pub name: String,
    pub category: String,
    pub memo: String,
}

/// One discovered catalog entry
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// Directory name under the category folder
    pub key: String,
    pub category: Category,
    pub model_path: PathBuf,
    pub thumbnail_path: Option<PathBuf>,
}

impl CatalogEntry {
    /// The path persisted into scene data, e.g. `Items/chair`
    pub fn prefab_path(&self) -> String {
        match self.category.prefab_folder() {
            Some(folder) => format!("{}/{}", folder, self.key),
            None => self.key.clone(),
        }
    }

    /// File stem of the model, used as the placed object's name
    pub fn model_name(&self) -> &str {
        self.model_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.key)
    }

    /// Naming-convention texture: `<model>.png` beside the model file
    pub fn conventional_texture(&self) -> Option<PathBuf> {
        let texture = self.model_path.with_extension("png");
        texture.is_file().then_some(texture)
    }
}

/// Discovered catalog with metadata and thumbnail caches
pub struct Catalog {
    root: PathBuf,
    entries: Vec<CatalogEntry>,
    info: HashMap<String, ObjectInfo>,
    thumbnails: HashMap<String, image::RgbaImage>,
}

impl Catalog {
    /// Scan the catalog tree under `root`.
    ///
    /// A missing category folder just yields no entries of that category;
    /// entries without a model file are skipped with a warning. Metadata
    /// is read once here and cached for the catalog's lifetime.
    pub fn discover(root: impl Into<PathBuf>) -> Result<Catalog, CatalogError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(CatalogError::MissingRoot(root));
        }

        let mut entries = Vec::new();
        for category in [Category::Item, Category::Shelf] {
            let folder = match category.prefab_folder() {
                Some(folder) => root.join(folder),
                None => continue,
            };
            if !folder.is_dir() {
                debug!("catalog folder absent: {}", folder.display());
                continue;
            }
            scan_category(&folder, category, &mut entries)?;
        }
        entries.sort_by(|a, b| a.prefab_path().cmp(&b.prefab_path()));

        let info = load_info(&root.join(INFO_FILE));

        Ok(Catalog {
            root,
            entries,
            info,
            thumbnails: HashMap::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn entries_in(&self, category: Category) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Map a persisted prefab path like `Items/chair` back to its entry
    pub fn resolve(&self, prefab_path: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.prefab_path() == prefab_path)
    }

    /// Metadata for a key; missing info is a normal condition
    pub fn info(&self, key: &str) -> Option<&ObjectInfo> {
        self.info.get(key)
    }

    /// Decode the entry's thumbnail, caching the pixels for next time
    pub fn thumbnail(&mut self, key: &str) -> Option<&image::RgbaImage> {
        if !self.thumbnails.contains_key(key) {
            let path = self.get(key)?.thumbnail_path.clone()?;
            match image::open(&path) {
                Ok(img) => {
                    self.thumbnails.insert(key.to_string(), img.to_rgba8());
                }
                Err(err) => {
                    warn!("failed to decode thumbnail {}: {}", path.display(), err);
                    return None;
                }
            }
        }
        self.thumbnails.get(key)
    }
}

fn scan_category(
    folder: &Path,
    category: Category,
    entries: &mut Vec<CatalogEntry>,
) -> Result<(), CatalogError> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(folder)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();

    for dir in dirs {
        let key = match dir.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                warn!("skipping catalog entry with unreadable name: {}", dir.display());
                continue;
            }
        };
        match find_model(&dir) {
            Some(model_path) => {
                let thumbnail = dir.join(THUMBNAIL_FILE);
                entries.push(CatalogEntry {
                    key,
                    category,
                    model_path,
                    thumbnail_path: thumbnail.is_file().then_some(thumbnail),
                });
            }
            None => warn!("skipping catalog entry without a model: {}", dir.display()),
        }
    }
    Ok(())
}

/// First model file in the directory, sorted for determinism
fn find_model(dir: &Path) -> Option<PathBuf> {
    let mut models: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|e| MODEL_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    models.sort();
    models.into_iter().next()
}

/// Metadata is optional; a missing or malformed file degrades to empty
fn load_info(path: &Path) -> HashMap<String, ObjectInfo> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(_) => {
            debug!("no catalog metadata at {}", path.display());
            return HashMap::new();
        }
    };
    match serde_json::from_str(&data) {
        Ok(info) => info,
        Err(err) => {
            warn!("malformed {}: {}", path.display(), err);
            HashMap::new()
        }
    }
}
