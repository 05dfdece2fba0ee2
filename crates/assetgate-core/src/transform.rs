//! Request/response transforms applied around asset resolution.
//!
//! A transform gets two chances to act on a request: it may rewrite the URL
//! before the asset is looked up, and it may wrap the byte stream once the
//! asset has been opened. Transforms are shared as `Arc<dyn Transform>` and
//! compared by allocation identity, never by value.

use std::any::type_name;
use std::fmt;
use std::io::Read;

/// Response body handed from stage to stage.
pub type ByteStream = Box<dyn Read + Send>;

/// Extension hook invoked by the interception pipeline.
///
/// Both methods default to passing their input through, so a transform that
/// only rewrites URLs (or only wraps streams) implements just one of them.
/// Implementations must not fail: when a transform cannot handle a URL or
/// stream it returns the input unchanged.
pub trait Transform: Send + Sync {
    /// Rewrite the request URL. Receives the output of every lower-priority
    /// transform.
    fn rewrite_url(&self, url: &str) -> String {
        url.to_string()
    }

    /// Wrap the response stream. `url` is the effective URL produced by the
    /// complete rewrite pass.
    fn wrap_stream(&self, url: &str, stream: ByteStream) -> ByteStream {
        let _ = url;
        stream
    }

    /// Label used in log lines.
    fn name(&self) -> &str {
        type_name::<Self>()
    }
}

/// Error reported by a [`TryTransform`].
#[derive(Debug, thiserror::Error)]
#[error("{transform}: {reason}")]
pub struct TransformError {
    pub transform: String,
    pub reason: String,
}

impl TransformError {
    pub fn new(transform: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            transform: transform.into(),
            reason: reason.into(),
        }
    }
}

/// A failed stream wrap. Carries the input stream back so the chain can
/// continue with it.
pub struct WrapFailure {
    pub error: TransformError,
    pub stream: ByteStream,
}

impl fmt::Debug for WrapFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapFailure")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// Transform whose steps can fail. Register it through [`Fallible`].
pub trait TryTransform: Send + Sync {
    fn try_rewrite_url(&self, url: &str) -> Result<String, TransformError> {
        Ok(url.to_string())
    }

    fn try_wrap_stream(&self, url: &str, stream: ByteStream) -> Result<ByteStream, WrapFailure> {
        let _ = url;
        Ok(stream)
    }

    fn name(&self) -> &str {
        type_name::<Self>()
    }
}

/// Adapts a [`TryTransform`] to the infallible [`Transform`] contract: a
/// failed step is logged and its input passed through unchanged.
pub struct Fallible<T>(pub T);

impl<T: TryTransform> Transform for Fallible<T> {
    fn rewrite_url(&self, url: &str) -> String {
        match self.0.try_rewrite_url(url) {
            Ok(rewritten) => rewritten,
            Err(err) => {
                tracing::warn!("url rewrite failed, keeping {}: {}", url, err);
                url.to_string()
            }
        }
    }

    fn wrap_stream(&self, url: &str, stream: ByteStream) -> ByteStream {
        match self.0.try_wrap_stream(url, stream) {
            Ok(wrapped) => wrapped,
            Err(WrapFailure { error, stream }) => {
                tracing::warn!("stream wrap failed for {}: {}", url, error);
                stream
            }
        }
    }

    fn name(&self) -> &str {
        self.0.name()
    }
}
