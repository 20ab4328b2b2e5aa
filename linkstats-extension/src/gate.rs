//! Readiness gate over the external link service.

use crate::error::{ExtensionError, ExtensionResult};
use crate::service::LinkService;

/// Single predicate every lookup consults before touching the service.
#[derive(Clone, Copy)]
pub struct ReadinessGate<'a> {
    service: &'a dyn LinkService,
}

impl<'a> ReadinessGate<'a> {
    pub fn new(service: &'a dyn LinkService) -> Self {
        Self { service }
    }

    pub fn is_ready(&self) -> bool {
        self.service.is_ready()
    }

    /// Fails with [`ExtensionError::ServiceNotReady`] while the service is down.
    pub fn ensure_ready(&self) -> ExtensionResult<()> {
        if self.service.is_ready() {
            Ok(())
        } else {
            Err(ExtensionError::ServiceNotReady)
        }
    }
}
