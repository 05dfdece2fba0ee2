//! Interception chain for resource loads issued by an embedded web view.
//!
//! Requests pass through a [`PriorityRegistry`] of [`Transform`]s: every
//! transform may rewrite the URL before the asset is resolved and wrap the
//! response stream afterwards, in ascending priority order.

pub mod config;
pub mod logging;

pub mod builtin;
pub mod host;
pub mod pipeline;
pub mod registry;
pub mod resolver;
pub mod transform;
pub mod url_model;

pub use host::{HostResponse, InterceptHost};
pub use pipeline::{InterceptedResponse, InterceptionPipeline, PipelineSettings};
pub use registry::{OrderedTransforms, Priority, PriorityRegistry};
pub use resolver::{AssetResolver, MimeResolver, ResolveError};
pub use transform::{ByteStream, Fallible, Transform, TransformError, TryTransform, WrapFailure};
