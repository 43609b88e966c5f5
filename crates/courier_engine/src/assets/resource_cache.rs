//! Memoized resource cache
//!
//! `get_resource(path)` loads through a [`ResourceLoader`] the first time a
//! path is requested and returns the same handle on every later request.
//! Failed loads are not cached: the error goes back to the caller and the
//! next request retries.

use std::collections::HashMap;
use std::path::PathBuf;

use log::{debug, warn};
use thiserror::Error;

use crate::foundation::handles::{ResourceHandle, SlotMap};

/// Resource loading errors
#[derive(Error, Debug)]
pub enum ResourceLoadError {
    /// No search path contains the resource
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// IO error while reading the resource
    #[error("IO error reading {path}: {source}")]
    Io {
        /// Requested path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Bytes were read but could not be turned into the resource type
    #[error("Failed to decode {path}: {reason}")]
    Decode {
        /// Requested path
        path: String,
        /// Decoder message
        reason: String,
    },
}

/// Produces a resource from its path
pub trait ResourceLoader<T> {
    /// Load `path`; called at most once per successful path
    fn load(&mut self, path: &str) -> Result<T, ResourceLoadError>;
}

/// Resource types that can be decoded from raw file bytes
pub trait FromBytes: Sized {
    /// Decode from the file contents, returning a reason on failure
    fn from_bytes(bytes: Vec<u8>) -> Result<Self, String>;
}

impl FromBytes for Vec<u8> {
    fn from_bytes(bytes: Vec<u8>) -> Result<Self, String> {
        Ok(bytes)
    }
}

impl FromBytes for String {
    fn from_bytes(bytes: Vec<u8>) -> Result<Self, String> {
        Self::from_utf8(bytes).map_err(|e| e.to_string())
    }
}

/// Loads resources from disk, trying each search path in order
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    search_paths: Vec<PathBuf>,
}

impl FileLoader {
    /// Loader resolving relative paths against `search_paths`
    pub fn new(search_paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            search_paths: search_paths.into_iter().map(Into::into).collect(),
        }
    }

    fn resolve(&self, path: &str) -> Option<PathBuf> {
        self.search_paths
            .iter()
            .map(|root| root.join(path))
            .chain(std::iter::once(PathBuf::from(path)))
            .find(|candidate| candidate.is_file())
    }
}

impl<T: FromBytes> ResourceLoader<T> for FileLoader {
    fn load(&mut self, path: &str) -> Result<T, ResourceLoadError> {
        let file_path = self
            .resolve(path)
            .ok_or_else(|| ResourceLoadError::NotFound(path.to_string()))?;
        let bytes = std::fs::read(&file_path).map_err(|source| ResourceLoadError::Io {
            path: path.to_string(),
            source,
        })?;
        T::from_bytes(bytes).map_err(|reason| ResourceLoadError::Decode {
            path: path.to_string(),
            reason,
        })
    }
}

/// Path-keyed cache handing out [`ResourceHandle`]s
///
/// An explicit service object: whoever needs resources is given the cache.
pub struct ResourceCache<T, L> {
    loader: L,
    resources: SlotMap<ResourceHandle, T>,
    by_path: HashMap<String, ResourceHandle>,
    placeholder: Option<ResourceHandle>,
}

impl<T, L: ResourceLoader<T>> ResourceCache<T, L> {
    /// Empty cache loading through `loader`
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            resources: SlotMap::with_key(),
            by_path: HashMap::new(),
            placeholder: None,
        }
    }

    /// Builder pattern: resource returned by [`ResourceCache::get_or_placeholder`]
    /// when a load fails
    pub fn with_placeholder(mut self, placeholder: T) -> Self {
        self.placeholder = Some(self.resources.insert(placeholder));
        self
    }

    /// Handle for `path`, loading it on first request
    pub fn get_resource(&mut self, path: &str) -> Result<ResourceHandle, ResourceLoadError> {
        if let Some(handle) = self.by_path.get(path) {
            return Ok(*handle);
        }

        let resource = self.loader.load(path)?;
        let handle = self.resources.insert(resource);
        self.by_path.insert(path.to_string(), handle);
        debug!("Loaded resource {path}");
        Ok(handle)
    }

    /// Like [`ResourceCache::get_resource`], falling back to the placeholder.
    ///
    /// Returns `None` only when the load fails and no placeholder is set.
    pub fn get_or_placeholder(&mut self, path: &str) -> Option<ResourceHandle> {
        match self.get_resource(path) {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!("Using placeholder for {path}: {err}");
                self.placeholder
            }
        }
    }

    /// Borrow a loaded resource
    pub fn get(&self, handle: ResourceHandle) -> Option<&T> {
        self.resources.get(handle)
    }

    /// True when `path` has been loaded successfully
    pub fn contains(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    /// Drop the cached entry for `path`, returning the resource
    pub fn evict(&mut self, path: &str) -> Option<T> {
        let handle = self.by_path.remove(path)?;
        self.resources.remove(handle)
    }

    /// Number of cached paths
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    /// True when no path is cached
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// The loader backing this cache
    pub fn loader(&self) -> &L {
        &self.loader
    }
}
