//! Collaborator interfaces for turning a request into bytes and metadata.
//!
//! The pipeline only depends on these traits and does not know where assets
//! live or how mime types are chosen.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor};
use std::path::{Component, Path, PathBuf};

use crate::transform::ByteStream;
use crate::url_model::request_path;

/// Why an asset could not be opened.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("asset path escapes the asset root: {0}")]
    InvalidPath(String),
    #[error("failed to open asset {path}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Bundled asset store, addressed by namespace-relative paths such as
/// `www/index.html`.
pub trait AssetResolver: Send + Sync {
    fn open(&self, path: &str) -> Result<ByteStream, ResolveError>;
}

/// Mime type lookup for a request URL.
pub trait MimeResolver: Send + Sync {
    fn mime_type_for(&self, url: &str) -> Option<String>;
}

/// Serves assets from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirAssetResolver {
    root: PathBuf,
}

impl DirAssetResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps `path` under the root, refusing anything that could step outside
    /// it.
    fn local_path(&self, path: &str) -> Result<PathBuf, ResolveError> {
        let mut local = self.root.clone();
        for component in Path::new(path).components() {
            match component {
                Component::Normal(part) => local.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(ResolveError::InvalidPath(path.to_string()));
                }
            }
        }
        Ok(local)
    }
}

impl AssetResolver for DirAssetResolver {
    fn open(&self, path: &str) -> Result<ByteStream, ResolveError> {
        let local = self.local_path(path)?;
        // Directories open fine on Linux but are not assets.
        if !local.is_file() {
            return Err(ResolveError::NotFound(path.to_string()));
        }
        match File::open(&local) {
            Ok(file) => Ok(Box::new(file)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(ResolveError::NotFound(path.to_string()))
            }
            Err(source) => Err(ResolveError::Io {
                path: path.to_string(),
                source,
            }),
        }
    }
}

/// In-memory asset store for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetResolver {
    assets: HashMap<String, Vec<u8>>,
}

impl MemoryAssetResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.insert(path, body);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.assets.insert(path.into(), body.into());
    }
}

impl AssetResolver for MemoryAssetResolver {
    fn open(&self, path: &str) -> Result<ByteStream, ResolveError> {
        self.assets
            .get(path)
            .map(|body| Box::new(Cursor::new(body.clone())) as ByteStream)
            .ok_or_else(|| ResolveError::NotFound(path.to_string()))
    }
}

/// Guesses the mime type from the extension of the URL's path.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuessMimeResolver;

impl MimeResolver for GuessMimeResolver {
    fn mime_type_for(&self, url: &str) -> Option<String> {
        let path = request_path(url)?;
        Path::new(&path).extension()?;
        mime_guess::from_path(&path)
            .first()
            .map(|mime| mime.essence_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_all(mut stream: ByteStream) -> Vec<u8> {
        let mut out = Vec::new();
        stream.read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn dir_resolver_opens_files_under_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("www/css")).unwrap();
        std::fs::write(dir.path().join("www/css/site.css"), b"body{}").unwrap();

        let resolver = DirAssetResolver::new(dir.path());
        let body = read_all(resolver.open("www/css/site.css").unwrap());
        assert_eq!(body, b"body{}");
    }

    #[test]
    fn dir_resolver_missing_file_and_directory_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("www/sub")).unwrap();
        let resolver = DirAssetResolver::new(dir.path());

        assert!(matches!(
            resolver.open("www/missing.html"),
            Err(ResolveError::NotFound(_))
        ));
        assert!(matches!(resolver.open("www/sub"), Err(ResolveError::NotFound(_))));
    }

    #[test]
    fn dir_resolver_rejects_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = DirAssetResolver::new(dir.path().join("assets"));
        assert!(matches!(
            resolver.open("www/../../secret"),
            Err(ResolveError::InvalidPath(_))
        ));
        assert!(matches!(
            resolver.open("/etc/passwd"),
            Err(ResolveError::InvalidPath(_))
        ));
    }

    #[test]
    fn memory_resolver_serves_inserted_assets() {
        let resolver = MemoryAssetResolver::new().with("www/index.html", "<html></html>");
        assert_eq!(
            read_all(resolver.open("www/index.html").unwrap()),
            b"<html></html>"
        );
        let err = resolver.open("www/other.html").err().unwrap();
        assert_eq!(err.to_string(), "asset not found: www/other.html");
    }

    #[test]
    fn guess_mime_uses_path_extension() {
        let mime = GuessMimeResolver;
        assert_eq!(mime.mime_type_for("/index.html").as_deref(), Some("text/html"));
        assert_eq!(
            mime.mime_type_for("https://app.local/app.css?v=3").as_deref(),
            Some("text/css")
        );
        assert_eq!(mime.mime_type_for("/logo.png").as_deref(), Some("image/png"));
        assert_eq!(mime.mime_type_for("/chrome-content-loaded"), None);
        assert_eq!(mime.mime_type_for("/file.unknownext"), None);
    }
}
