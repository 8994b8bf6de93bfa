//! Lang directory scanning.
//!
//! The locator classifies files without reading them. Two layouts are
//! recognised and may be mixed freely under one root:
//!
//! - `lang/en.json`: a flat resource; locale `en`, no namespace.
//! - `lang/fr/backend.php`: a namespaced resource; locale `fr`,
//!   namespace `backend`.

use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
};

use walkdir::{DirEntry, WalkDir};

use super::error::{ProjectError, Result};

/// Discovered descriptors grouped by locale.
///
/// Locales are keyed in lexical order; descriptors keep scan order.
pub type ResourceFilesMap = BTreeMap<String, Vec<ResourceDescriptor>>;

/// On-disk format of a resource, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceFormat {
    /// `.json`: a JSON object of keys to strings.
    Json,
    /// `.php`: a PHP file returning an array literal.
    Php,
}

impl ResourceFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "json" => Some(Self::Json),
            "php" => Some(Self::Php),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for ResourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceFormat::Json => write!(f, "json"),
            ResourceFormat::Php => write!(f, "php"),
        }
    }
}

/// One eligible file found by [`scan_resources`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub locale: String,
    pub namespace: Option<String>,
    pub path: PathBuf,
    pub format: ResourceFormat,
}

/// Scan `root` one level deep and group every eligible file by locale.
///
/// Entries are visited in file-name order so the result is stable for a
/// given filesystem state. Unsupported extensions, hidden entries and
/// directories nested below a locale directory are skipped silently.
pub fn scan_resources(root: impl AsRef<Path>) -> Result<ResourceFilesMap> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(ProjectError::NotFound(root.to_path_buf()));
    }

    let mut map = ResourceFilesMap::new();

    for entry in list_dir(root) {
        let entry = entry.map_err(|e| walk_error(root, e))?;
        if is_hidden(&entry) {
            continue;
        }
        let path = entry.path();

        if entry.file_type().is_dir() {
            let Some(locale) = file_name(&entry) else {
                continue;
            };
            for item in list_dir(path) {
                let item = item.map_err(|e| walk_error(path, e))?;
                if is_hidden(&item) || !item.file_type().is_file() {
                    continue;
                }
                let Some((namespace, format)) = classify(item.path()) else {
                    continue;
                };
                map.entry(locale.to_string())
                    .or_default()
                    .push(ResourceDescriptor {
                        locale: locale.to_string(),
                        namespace: Some(namespace),
                        path: item.path().to_path_buf(),
                        format,
                    });
            }
            continue;
        }

        if let Some((locale, format)) = classify(path) {
            map.entry(locale.clone())
                .or_default()
                .push(ResourceDescriptor {
                    locale,
                    namespace: None,
                    path: path.to_path_buf(),
                    format,
                });
        }
    }

    tracing::debug!(
        root = %root.display(),
        locales = map.len(),
        files = map.values().map(Vec::len).sum::<usize>(),
        "scanned lang directory"
    );

    Ok(map)
}

fn list_dir(dir: &Path) -> impl Iterator<Item = walkdir::Result<DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn file_name(entry: &DirEntry) -> Option<&str> {
    entry.file_name().to_str()
}

/// Returns the file stem and format of an eligible resource file.
fn classify(path: &Path) -> Option<(String, ResourceFormat)> {
    let format = ResourceFormat::from_path(path)?;
    let stem = path.file_stem()?.to_str()?;
    if stem.is_empty() {
        return None;
    }
    Some((stem.to_string(), format))
}

fn walk_error(dir: &Path, err: walkdir::Error) -> ProjectError {
    let path = err.path().unwrap_or(dir).to_path_buf();
    ProjectError::io(path, err.into())
}
