//! Boundary between the web view's resource-interception callback and the
//! pipeline, plus the registration surface offered to extensions.

use std::sync::Arc;

use crate::pipeline::{InterceptedResponse, InterceptionPipeline};
use crate::registry::{Priority, PriorityRegistry};
use crate::transform::Transform;

/// Answer handed back to the web view for one request.
#[derive(Debug)]
pub enum HostResponse {
    /// Serve this response instead of loading the URL.
    Intercept(InterceptedResponse),
    /// Let the web view load the request itself.
    Passthrough,
}

impl HostResponse {
    pub fn is_passthrough(&self) -> bool {
        matches!(self, HostResponse::Passthrough)
    }

    pub fn into_response(self) -> Option<InterceptedResponse> {
        match self {
            HostResponse::Intercept(response) => Some(response),
            HostResponse::Passthrough => None,
        }
    }
}

/// Created once at start-up and shared by reference with the web view
/// callback and with every extension that registers transforms.
#[derive(Debug, Clone)]
pub struct InterceptHost {
    pipeline: InterceptionPipeline,
}

impl InterceptHost {
    pub fn new(pipeline: InterceptionPipeline) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &InterceptionPipeline {
        &self.pipeline
    }

    pub fn registry(&self) -> &Arc<PriorityRegistry> {
        self.pipeline.registry()
    }

    /// Claims `priority` for `transform`; false if the slot is taken.
    pub fn register_transform(&self, transform: Arc<dyn Transform>, priority: Priority) -> bool {
        self.registry().register(transform, priority)
    }

    /// Releases `priority` if it holds exactly `transform`.
    pub fn unregister_transform(&self, transform: &Arc<dyn Transform>, priority: Priority) -> bool {
        self.registry().unregister(transform, priority)
    }

    /// Entry point for the web view's resource-load callback.
    pub fn should_intercept_request(&self, url: &str) -> HostResponse {
        match self.pipeline.handle(url) {
            Some(response) => HostResponse::Intercept(response),
            None => HostResponse::Passthrough,
        }
    }
}
