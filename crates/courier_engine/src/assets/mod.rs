//! Asset management
//!
//! Resources (textures and other file-backed data) are requested by path
//! through a [`ResourceCache`] service object.

pub mod resource_cache;

pub use resource_cache::{FileLoader, FromBytes, ResourceCache, ResourceLoadError, ResourceLoader};
