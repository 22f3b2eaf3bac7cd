//! Asset loading
//!
//! Meshes are read through a [`MeshSource`] and shared through the
//! [`MeshCache`], so every object placed from the same path points at the
//! same immutable [`Mesh`].

pub mod obj_loader;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::config::AssetConfig;
use crate::render::Mesh;

pub use obj_loader::{ObjError, ObjLoader};

/// Asset loading errors
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    /// No asset at this path
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The file exists but could not be parsed
    #[error("Failed to load '{path}': {source}")]
    Obj {
        /// Requested asset path
        path: String,
        /// Underlying parse error
        #[source]
        source: ObjError,
    },
}

/// Something meshes can be loaded from
pub trait MeshSource: std::fmt::Debug {
    /// Load the mesh stored at `path`
    fn load_mesh(&self, path: &str) -> Result<Mesh, AssetError>;
}

/// Reads Wavefront OBJ files relative to a root directory
#[derive(Debug, Clone)]
pub struct ObjMeshSource {
    root: PathBuf,
}

impl ObjMeshSource {
    /// Resolve paths against `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve paths against the configured asset directory
    pub fn from_config(config: &AssetConfig) -> Self {
        Self::new(&config.assets_dir)
    }
}

impl MeshSource for ObjMeshSource {
    fn load_mesh(&self, path: &str) -> Result<Mesh, AssetError> {
        let full = self.root.join(path);
        if !full.exists() {
            return Err(AssetError::NotFound(full.display().to_string()));
        }
        ObjLoader::load_obj(&full).map_err(|source| AssetError::Obj {
            path: path.to_string(),
            source,
        })
    }
}

/// Meshes registered in memory by path
#[derive(Debug, Clone, Default)]
pub struct InMemoryMeshSource {
    meshes: HashMap<String, Mesh>,
    fallback: Option<Mesh>,
}

impl InMemoryMeshSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `mesh` under `path`
    pub fn with_mesh(mut self, path: impl Into<String>, mesh: Mesh) -> Self {
        self.meshes.insert(path.into(), mesh);
        self
    }

    /// Mesh returned for any unregistered path
    pub fn with_fallback(mut self, mesh: Mesh) -> Self {
        self.fallback = Some(mesh);
        self
    }
}

impl MeshSource for InMemoryMeshSource {
    fn load_mesh(&self, path: &str) -> Result<Mesh, AssetError> {
        self.meshes
            .get(path)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }
}

/// Path-keyed cache of shared meshes
#[derive(Debug)]
pub struct MeshCache {
    source: Box<dyn MeshSource>,
    meshes: HashMap<String, Arc<Mesh>>,
    caching: bool,
    loads: usize,
}

impl MeshCache {
    /// Cache in front of `source`
    pub fn new(source: Box<dyn MeshSource>) -> Self {
        Self {
            source,
            meshes: HashMap::new(),
            caching: true,
            loads: 0,
        }
    }

    /// Cache configured from `config`, reading OBJ files from its asset directory
    pub fn from_config(config: &AssetConfig) -> Self {
        let mut cache = Self::new(Box::new(ObjMeshSource::from_config(config)));
        cache.caching = config.enable_caching;
        cache
    }

    /// Mesh for `path`, loading it on first request
    pub fn get(&mut self, path: &str) -> Result<Arc<Mesh>, AssetError> {
        if let Some(mesh) = self.meshes.get(path) {
            return Ok(Arc::clone(mesh));
        }
        let mesh = Arc::new(self.source.load_mesh(path)?);
        self.loads += 1;
        log::debug!("Loaded mesh '{path}' ({} vertices)", mesh.vertex_count());
        if self.caching {
            self.meshes.insert(path.to_string(), Arc::clone(&mesh));
        }
        Ok(mesh)
    }

    /// Whether `path` is cached
    pub fn contains(&self, path: &str) -> bool {
        self.meshes.contains_key(path)
    }

    /// Number of loads that reached the source
    pub fn load_count(&self) -> usize {
        self.loads
    }

    /// Drop every cached mesh
    pub fn clear(&mut self) {
        self.meshes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_cache_shares_meshes() {
        let source = InMemoryMeshSource::new().with_mesh("box.obj", Mesh::cuboid(Vec3::new(1.0, 1.0, 1.0)));
        let mut cache = MeshCache::new(Box::new(source));
        let a = cache.get("box.obj").unwrap();
        let b = cache.get("box.obj").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.load_count(), 1);
        assert!(matches!(cache.get("missing.obj"), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_obj_source_reads_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tri.obj"), "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        let config = AssetConfig::new().with_assets_dir(dir.path().to_string_lossy());
        let mut cache = MeshCache::from_config(&config);
        assert_eq!(cache.get("tri.obj").unwrap().vertex_count(), 3);
        assert!(matches!(cache.get("nope.obj"), Err(AssetError::NotFound(_))));
    }
}
