use std::{cell::OnceCell, path::Path};

use super::{
    error::Result,
    key_table::qualified_key_name,
    locator::{ResourceDescriptor, ResourceFormat},
    parsers::parse_resource,
};

/// A raw key as it appears in one resource file, before namespace qualification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceKey {
    pub name: String,
    /// `None` when the file stores an explicit null.
    pub value: Option<String>,
}

impl ResourceKey {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// One resource file bound to its locale and namespace.
///
/// Parsing happens on the first call to [`Resource::keys`]; the result is
/// cached for the lifetime of the resource. A failed parse is not cached.
#[derive(Debug)]
pub struct Resource {
    descriptor: ResourceDescriptor,
    keys: OnceCell<Vec<ResourceKey>>,
}

impl Resource {
    pub fn new(descriptor: ResourceDescriptor) -> Self {
        Self {
            descriptor,
            keys: OnceCell::new(),
        }
    }

    pub fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    pub fn locale(&self) -> &str {
        &self.descriptor.locale
    }

    pub fn namespace(&self) -> Option<&str> {
        self.descriptor.namespace.as_deref()
    }

    pub fn path(&self) -> &Path {
        &self.descriptor.path
    }

    pub fn format(&self) -> ResourceFormat {
        self.descriptor.format
    }

    /// Keys in file order, parsed on first access.
    pub fn keys(&self) -> Result<&[ResourceKey]> {
        if let Some(keys) = self.keys.get() {
            return Ok(keys.as_slice());
        }
        let parsed = parse_resource(&self.descriptor.path, self.descriptor.format)?;
        Ok(self.keys.get_or_init(|| parsed).as_slice())
    }

    /// Whether [`Resource::keys`] has already parsed the file.
    pub fn is_loaded(&self) -> bool {
        self.keys.get().is_some()
    }

    /// The cross-locale join key for `key` within this resource.
    pub fn qualified_name(&self, key: &ResourceKey) -> String {
        qualified_key_name(self.namespace(), &key.name)
    }
}
