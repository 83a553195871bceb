//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` so they depend only on the
//! domain service and stay testable without network I/O.

use crate::domain::PassthroughService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub passthrough: PassthroughService,
}

impl HttpState {
    pub fn new(passthrough: PassthroughService) -> Self {
        Self { passthrough }
    }
}
