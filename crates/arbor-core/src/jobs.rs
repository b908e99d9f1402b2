// SPDX-FileCopyrightText: 2026 Arbor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Boundary types for the background-job execution engine.
//!
//! The plugin loader only *registers* job types with the engine; it never
//! schedules or runs them. [`JobTypeRegistry`] is the single operation this
//! side of the boundary consumes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The single argument passed to every job handler at execution time.
///
/// Owned by the job engine; the loader only uses it to designate the
/// required handler signature.
#[derive(Debug, Clone)]
pub struct JobContext {
    /// Unique id of the job run.
    pub job_id: Uuid,
    /// Arbitrary JSON payload attached when the job was scheduled.
    pub payload: serde_json::Value,
}

impl JobContext {
    /// Creates a context for a fresh job run with the given payload.
    pub fn new(payload: serde_json::Value) -> Self {
        Self {
            job_id: Uuid::new_v4(),
            payload,
        }
    }
}

/// A declarative record of one job handler discovered in a plugin module.
///
/// Built by the loader during the job-type scanning phase and handed to the
/// engine via [`JobTypeRegistry::register_type`]; the loader holds no further
/// reference afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobType {
    /// Stable identifier, copied from the handler's registration entry.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Default scheduling priority; interpreted by the engine.
    pub default_priority: i32,
    /// Whether the engine may run at most one instance at a time.
    pub allow_single_instance: bool,
    /// Name of the module the handler lives in.
    pub module: String,
    /// Fully-qualified name of the type owning the handler.
    pub complete_class_name: String,
    /// Name of the handler method itself.
    pub method_name: String,
}

/// The job engine's registration surface.
///
/// Duplicate ids are not deduplicated by the caller; conflict resolution is
/// entirely the implementor's responsibility.
pub trait JobTypeRegistry: Send + Sync {
    /// Records one job type for later execution.
    fn register_type(&self, job_type: JobType);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_context_payload_roundtrip() {
        let ctx = JobContext::new(serde_json::json!({ "batch": 42 }));
        assert_eq!(ctx.payload["batch"], 42);
    }

    #[test]
    fn job_type_serialization() {
        let job_type = JobType {
            id: "job.sync".into(),
            name: "Record sync".into(),
            default_priority: 3,
            allow_single_instance: true,
            module: "crm_mod".into(),
            complete_class_name: "crm::jobs::SyncJobs".into(),
            method_name: "run_sync".into(),
        };
        let json = serde_json::to_string(&job_type).expect("should serialize");
        let parsed: JobType = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(job_type, parsed);
    }
}
