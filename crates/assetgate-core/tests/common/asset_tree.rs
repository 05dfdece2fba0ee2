//! On-disk asset tree for integration tests.
//!
//! Lays files out under `<tempdir>/www/...` the way a bundled app ships them
//! and builds a pipeline over that directory.

use std::path::Path;
use std::sync::Arc;

use assetgate_core::resolver::{DirAssetResolver, GuessMimeResolver};
use assetgate_core::{InterceptHost, InterceptionPipeline, PriorityRegistry};
use tempfile::TempDir;

pub struct AssetTree {
    dir: TempDir,
}

impl AssetTree {
    pub fn new(files: &[(&str, &[u8])]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        for (path, body) in files {
            let full = dir.path().join(path);
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(full, body).unwrap();
        }
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn host(&self) -> InterceptHost {
        InterceptHost::new(InterceptionPipeline::new(
            Arc::new(PriorityRegistry::new()),
            Arc::new(DirAssetResolver::new(self.root())),
            Arc::new(GuessMimeResolver),
        ))
    }
}
