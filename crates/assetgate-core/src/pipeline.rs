//! The interception pipeline: rewrite pass, resolution, wrap pass.
//!
//! One call to [`InterceptionPipeline::handle`] runs a request through every
//! registered transform's URL rewrite (ascending priority), derives the mime
//! type from the resulting effective URL, opens the asset, then runs the
//! stream through every transform's wrap step (ascending priority again).
//! All working state lives on the stack of that call.

use std::fmt;
use std::io::{Cursor, Read};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::registry::PriorityRegistry;
use crate::resolver::{AssetResolver, MimeResolver, ResolveError};
use crate::transform::ByteStream;
use crate::url_model::request_path;

const DEFAULT_INJECTED_SCRIPT: &str = "Object.defineProperty(document, 'readyState', {get: function() { return 'loading'}, configurable: true });";

/// Constants the pipeline resolves requests with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Prefixed to the request path before asset lookup (`www` + `/a.html`).
    pub namespace: String,
    /// Request path answered with `injected_script` instead of an asset.
    pub sentinel_path: String,
    pub injected_script: String,
    /// Mime types starting with this prefix get `text_encoding`.
    pub text_mime_prefix: String,
    pub text_encoding: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            namespace: "www".to_string(),
            sentinel_path: "/chrome-content-loaded".to_string(),
            injected_script: DEFAULT_INJECTED_SCRIPT.to_string(),
            text_mime_prefix: "text/".to_string(),
            text_encoding: "UTF-8".to_string(),
        }
    }
}

/// A resolved and wrapped response, ready for the web view.
pub struct InterceptedResponse {
    pub stream: ByteStream,
    pub mime_type: Option<String>,
    /// Set only for textual mime types.
    pub encoding: Option<String>,
    /// The request URL after the rewrite pass.
    pub effective_url: String,
}

impl InterceptedResponse {
    /// Drains the body.
    pub fn into_bytes(mut self) -> std::io::Result<Vec<u8>> {
        let mut body = Vec::new();
        self.stream.read_to_end(&mut body)?;
        Ok(body)
    }
}

impl fmt::Debug for InterceptedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptedResponse")
            .field("mime_type", &self.mime_type)
            .field("encoding", &self.encoding)
            .field("effective_url", &self.effective_url)
            .finish_non_exhaustive()
    }
}

/// Runs requests through the registry's transforms around asset resolution.
#[derive(Clone)]
pub struct InterceptionPipeline {
    registry: Arc<PriorityRegistry>,
    assets: Arc<dyn AssetResolver>,
    mime: Arc<dyn MimeResolver>,
    settings: PipelineSettings,
}

impl InterceptionPipeline {
    pub fn new(
        registry: Arc<PriorityRegistry>,
        assets: Arc<dyn AssetResolver>,
        mime: Arc<dyn MimeResolver>,
    ) -> Self {
        Self {
            registry,
            assets,
            mime,
            settings: PipelineSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: PipelineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn registry(&self) -> &Arc<PriorityRegistry> {
        &self.registry
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Handles one request. `None` means the asset does not exist (or could
    /// not be read) and the host should load the request itself.
    pub fn handle(&self, request_url: &str) -> Option<InterceptedResponse> {
        let effective_url = self.rewrite(request_url);
        if effective_url != request_url {
            tracing::debug!("rewrote {} -> {}", request_url, effective_url);
        }

        let mime_type = self.mime.mime_type_for(&effective_url);
        let encoding = mime_type
            .as_deref()
            .filter(|mime| mime.starts_with(self.settings.text_mime_prefix.as_str()))
            .map(|_| self.settings.text_encoding.clone());

        let resolved = self.resolve(&effective_url)?;
        let stream = self.wrap(&effective_url, resolved);

        Some(InterceptedResponse {
            stream,
            mime_type,
            encoding,
            effective_url,
        })
    }

    fn rewrite(&self, request_url: &str) -> String {
        self.registry
            .ordered_transforms()
            .iter()
            .fold(request_url.to_string(), |url, transform| {
                transform.rewrite_url(&url)
            })
    }

    fn wrap(&self, effective_url: &str, stream: ByteStream) -> ByteStream {
        // Re-read: registrations made since the rewrite pass apply here.
        self.registry
            .ordered_transforms()
            .into_iter()
            .fold(stream, |stream, transform| {
                transform.wrap_stream(effective_url, stream)
            })
    }

    fn asset_path(&self, path: &str) -> String {
        let namespace = self.settings.namespace.trim_end_matches('/');
        let relative = path.trim_start_matches('/');
        if namespace.is_empty() {
            relative.to_string()
        } else {
            format!("{namespace}/{relative}")
        }
    }

    fn resolve(&self, effective_url: &str) -> Option<ByteStream> {
        let Some(path) = request_path(effective_url) else {
            tracing::debug!("no resolvable path in {}", effective_url);
            return None;
        };

        if path == self.settings.sentinel_path {
            tracing::debug!("serving injected script for {}", effective_url);
            let script = self.settings.injected_script.clone().into_bytes();
            return Some(Box::new(Cursor::new(script)));
        }

        match self.assets.open(&self.asset_path(&path)) {
            Ok(stream) => Some(stream),
            Err(err @ (ResolveError::NotFound(_) | ResolveError::InvalidPath(_))) => {
                tracing::debug!("{}", err);
                None
            }
            Err(err) => {
                tracing::warn!("{:#}", anyhow::Error::new(err));
                None
            }
        }
    }
}

impl fmt::Debug for InterceptionPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptionPipeline")
            .field("registry", &self.registry)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
