// SPDX-FileCopyrightText: 2026 Arbor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host service locator forwarded to plugins at startup.

use std::any::Any;
use std::sync::Arc;

/// Opaque capability object supplied by the host.
///
/// The plugin loader forwards it unchanged into every plugin's start context
/// and never inspects its contents; only plugin code performs lookups.
pub trait HostServices: Send + Sync {
    /// Looks up a host service by name, if the host provides one.
    fn service(&self, name: &str) -> Option<Arc<dyn Any + Send + Sync>>;
}

/// A locator that provides no services.
///
/// Useful for hosts without a service container and for tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoServices;

impl HostServices for NoServices {
    fn service(&self, _name: &str) -> Option<Arc<dyn Any + Send + Sync>> {
        None
    }
}
