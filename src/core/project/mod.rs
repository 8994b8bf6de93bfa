//! Project aggregation: discovered locales, their resources, and the
//! reconciled key table.


use std::{
    cell::OnceCell,
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use super::{
    error::{ProjectError, Result},
    key_table::{KeyTable, KeyTableBuilder},
    locator::{ResourceFilesMap, scan_resources},
    resource::Resource,
};

/// Resources materialized on first request, one list per discovered locale.
type ResourceCache = BTreeMap<String, OnceCell<Vec<Resource>>>;

/// A lang directory and the locale its content is written in.
///
/// The directory is scanned once at construction; resources are created
/// and parsed lazily and stay cached until [`Project::reload`].
///
/// Caches use [`OnceCell`], so a `Project` is not `Sync`. Share one across
/// threads behind a mutex, or build one per thread.
#[derive(Debug)]
pub struct Project {
    root: PathBuf,
    source_locale: String,
    resource_files: ResourceFilesMap,
    resources: ResourceCache,
}

impl Project {
    /// Scan `root` and bind it to `source_locale`.
    ///
    /// # Errors
    ///
    /// - [`ProjectError::Config`] if `source_locale` is blank or no resource
    ///   exists for it
    /// - [`ProjectError::NotFound`] if `root` is not a directory
    pub fn new(root: impl Into<PathBuf>, source_locale: impl Into<String>) -> Result<Self> {
        let root = root.into();
        let source_locale = source_locale.into().trim().to_string();

        if source_locale.is_empty() {
            return Err(ProjectError::Config(
                "Couldn't determine source locale. Set `sourceLocale` in .ivyrc.json, \
                 pass --source-locale, or set APP_LOCALE."
                    .to_string(),
            ));
        }

        let (resource_files, resources) = load(&root, &source_locale)?;

        Ok(Self {
            root,
            source_locale,
            resource_files,
            resources,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source_locale(&self) -> &str {
        &self.source_locale
    }

    /// Every discovered locale except the source, in ascending order.
    pub fn target_locales(&self) -> Vec<&str> {
        self.resource_files
            .keys()
            .map(String::as_str)
            .filter(|l| *l != self.source_locale)
            .collect()
    }

    /// The source locale followed by [`Project::target_locales`].
    pub fn all_locales(&self) -> Vec<&str> {
        let mut locales = vec![self.source_locale.as_str()];
        locales.extend(self.target_locales());
        locales
    }

    /// Descriptors found by the last scan, grouped by locale.
    pub fn resource_files(&self) -> &ResourceFilesMap {
        &self.resource_files
    }

    /// Resources of `locale`, in scan order.
    pub fn resources_for(&self, locale: &str) -> Result<&[Resource]> {
        self.cached_resources(locale)
            .ok_or_else(|| ProjectError::UnknownLocale(locale.to_string()))
    }

    /// Resources of every locale, grouped in [`Project::all_locales`] order.
    pub fn resources(&self) -> Vec<&Resource> {
        self.all_locales()
            .into_iter()
            .filter_map(|locale| self.cached_resources(locale))
            .flatten()
            .collect()
    }

    /// Build the key table from every resource of every locale.
    ///
    /// Within one locale the first occurrence of a key wins; later ones are
    /// logged and listed in [`KeyTable::duplicates`]. Fails as a whole if
    /// any resource cannot be parsed.
    pub fn keys(&self) -> Result<KeyTable> {
        let locales = self.all_locales();
        let mut builder = KeyTableBuilder::new(locales.iter().map(|l| l.to_string()).collect());

        for (index, locale) in locales.iter().enumerate() {
            for resource in self.resources_for(locale)? {
                for key in resource.keys()? {
                    builder.insert(
                        index,
                        resource.qualified_name(key),
                        key.value.as_deref(),
                        resource.path(),
                    );
                }
            }
        }

        Ok(builder.finish())
    }

    /// Rows of [`Project::keys`] where at least one locale has no value.
    pub fn keys_with_empty_values(&self) -> Result<KeyTable> {
        Ok(self.keys()?.with_empty_values())
    }

    /// Rescan the same root for the same source locale, dropping every
    /// cached resource. On error the project keeps its previous state.
    pub fn reload(&mut self) -> Result<()> {
        let (resource_files, resources) = load(&self.root, &self.source_locale)?;
        self.resource_files = resource_files;
        self.resources = resources;
        tracing::debug!(root = %self.root.display(), "reloaded project");
        Ok(())
    }

    fn cached_resources(&self, locale: &str) -> Option<&[Resource]> {
        let descriptors = self.resource_files.get(locale)?;
        let cell = self.resources.get(locale)?;
        let resources =
            cell.get_or_init(|| descriptors.iter().cloned().map(Resource::new).collect());
        Some(resources.as_slice())
    }
}

fn load(root: &Path, source_locale: &str) -> Result<(ResourceFilesMap, ResourceCache)> {
    let resource_files = scan_resources(root)?;

    if !resource_files.contains_key(source_locale) {
        return Err(ProjectError::Config(format!(
            "No resource found matching source locale `{}` in '{}'",
            source_locale,
            root.display()
        )));
    }

    let resources = resource_files
        .keys()
        .map(|locale| (locale.clone(), OnceCell::new()))
        .collect();

    Ok((resource_files, resources))
}
