//! Read-only resource stores.
//!
//! A store hands out the raw bytes of a named resource. The catalog loader
//! only ever asks for two names; everything else about where the bytes live
//! is hidden behind [`ResourceStore`].

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tracing::trace;

use crate::error::{Error, Result};

/// Built-in astronaut roster.
const BUILTIN_ASTRONAUTS: &[u8] = include_bytes!("../resources/astronauts.json");

/// Built-in mission list.
const BUILTIN_MISSIONS: &[u8] = include_bytes!("../resources/missions.json");

/// Trait for stores that resolve resource names to bytes.
pub trait ResourceStore: Send + Sync {
    /// Human-readable description of this store (for diagnostics).
    fn name(&self) -> &str;

    /// Read the full contents of the named resource.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceNotFound`] if the store has no such resource
    /// and [`Error::ResourceRead`] if it exists but cannot be read.
    fn read(&self, resource: &str) -> Result<Vec<u8>>;
}

/// Resources stored as files in a single directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
    label: String,
}

impl DirectoryStore {
    /// Create a store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let label = format!("directory {}", root.display());
        Self { root, label }
    }

    /// The directory resources are read from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceStore for DirectoryStore {
    fn name(&self) -> &str {
        &self.label
    }

    fn read(&self, resource: &str) -> Result<Vec<u8>> {
        let path = self.root.join(resource);
        trace!("Reading {}", path.display());

        // Resource names are flat; anything else would escape the store.
        let mut components = Path::new(resource).components();
        if !matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        ) {
            return Err(Error::resource_not_found(resource, &self.label));
        }

        std::fs::read(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => Error::resource_not_found(resource, &self.label),
            _ => Error::ResourceRead {
                name: resource.to_string(),
                source,
            },
        })
    }
}

/// Resources held in memory.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedStore {
    resources: BTreeMap<String, Vec<u8>>,
}

impl EmbeddedStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The Apollo data set compiled into the binary.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new()
            .with("astronauts.json", BUILTIN_ASTRONAUTS)
            .with("missions.json", BUILTIN_MISSIONS)
    }

    /// Add (or replace) a resource.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    /// Add (or replace) a resource in place.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.resources.insert(name.into(), bytes.into());
    }

    /// Names of all resources, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }
}

impl ResourceStore for EmbeddedStore {
    fn name(&self) -> &str {
        "built-in resources"
    }

    fn read(&self, resource: &str) -> Result<Vec<u8>> {
        self.resources
            .get(resource)
            .cloned()
            .ok_or_else(|| Error::resource_not_found(resource, self.name()))
    }
}
