// SPDX-FileCopyrightText: 2026 Arbor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Arbor application platform.
//!
//! This crate provides the error type shared across the workspace plus the
//! boundary types for the two external collaborators the plugin loader talks
//! to: the background-job engine and the host service locator.

pub mod error;
pub mod jobs;
pub mod services;

// Re-export key items at crate root for ergonomic imports.
pub use error::ArborError;
pub use jobs::{JobContext, JobType, JobTypeRegistry};
pub use services::{HostServices, NoServices};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arbor_error_has_all_variants() {
        // Verify all 4 error variants exist and can be constructed.
        let _manifest = ArborError::ManifestParse {
            path: "manifest.json".into(),
            source: "test".into(),
        };
        let _module = ArborError::ModuleLoad {
            path: "crm_mod.so".into(),
            source: "test".into(),
        };
        let _startup = ArborError::StartupInvocation {
            module: "crm_mod".into(),
            type_name: "crm::Startup".into(),
            source: "test".into(),
        };
        let _io = ArborError::Io {
            path: "plugins".into(),
            source: std::io::Error::other("test"),
        };
    }

    #[test]
    fn job_registry_trait_is_object_safe() {
        struct Discarding;
        impl JobTypeRegistry for Discarding {
            fn register_type(&self, _job_type: JobType) {}
        }
        let registry: &dyn JobTypeRegistry = &Discarding;
        registry.register_type(JobType {
            id: "job.noop".into(),
            name: "Noop".into(),
            default_priority: 0,
            allow_single_instance: false,
            module: "m".into(),
            complete_class_name: "m::T".into(),
            method_name: "run".into(),
        });
    }
}
