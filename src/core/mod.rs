//! Resource discovery and key reconciliation.
//!
//! Data flows leaf-first through the modules:
//!
//! 1. `locator`: scans the lang root once into per-locale descriptors
//! 2. `parsers`: decode one JSON or PHP file into ordered keys
//! 3. `resource`: a descriptor plus its lazily parsed, cached keys
//! 4. `project`: owns the locales and resources, builds the `KeyTable`
//!
//! ```no_run
//! use ivy::core::Project;
//!
//! let project = Project::new("lang", "en")?;
//! for row in project.keys_with_empty_values()?.iter() {
//!     println!("{} is missing in {:?}", row.key(), row.missing_locales());
//! }
//! # Ok::<(), ivy::core::ProjectError>(())
//! ```

pub mod error;
pub mod key_table;
pub mod locator;
pub mod parsers;
pub mod project;
pub mod resource;

pub use error::ProjectError;
pub use key_table::{DuplicateKey, KeyRow, KeyTable, qualified_key_name};
pub use locator::{ResourceDescriptor, ResourceFilesMap, ResourceFormat, scan_resources};
pub use project::Project;
pub use resource::{Resource, ResourceKey};
