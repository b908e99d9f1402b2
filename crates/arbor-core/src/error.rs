// SPDX-FileCopyrightText: 2026 Arbor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Arbor application platform.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used across Arbor core operations.
///
/// Every variant raised during plugin initialization is fatal: the host
/// aborts startup and the operator fixes or removes the offending plugin.
#[derive(Debug, Error)]
pub enum ArborError {
    /// A plugin manifest file exists but could not be parsed.
    #[error("failed to parse plugin manifest '{}': {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A plugin module file could not be resolved or loaded.
    #[error("failed to load plugin module '{}': {source}", path.display())]
    ModuleLoad {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A plugin entry point failed during construction or `start`.
    #[error("plugin startup failed in '{module};{type_name}': {source}")]
    StartupInvocation {
        module: String,
        type_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A filesystem read failed while enumerating plugin directories.
    #[error("i/o error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
