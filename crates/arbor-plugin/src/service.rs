// SPDX-FileCopyrightText: 2026 Arbor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The plugin initialization pipeline.
//!
//! [`PluginService::initialize`] runs the whole
//! discover → load → register → start sequence synchronously on the calling
//! thread. It consumes the service, so initialization happens at most once;
//! the frozen [`PluginRegistry`] it returns is the host's read-only view of
//! the loaded plugins.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arbor_core::{ArborError, HostServices, JobType, JobTypeRegistry};
use tracing::{debug, info};

use crate::exports::PluginStartArguments;
use crate::manifest::load_manifest;
use crate::module::{LoadedModule, ModuleSpace};
use crate::registry::{Plugin, PluginRegistry};

/// Discovers, loads, and starts plugins from a root directory.
pub struct PluginService {
    plugins_root: PathBuf,
}

impl PluginService {
    /// Creates a service that will discover plugins under `plugins_root`.
    pub fn new(plugins_root: impl Into<PathBuf>) -> Self {
        Self {
            plugins_root: plugins_root.into(),
        }
    }

    /// Runs the full initialization pipeline.
    ///
    /// 1. Enumerates plugin directories under the root.
    /// 2. Reads each manifest and loads the plugin's binary modules into
    ///    `space`.
    /// 3. Freezes the registry in descending-priority order.
    /// 4. Registers every valid job handler with `jobs`.
    /// 5. Starts every plugin entry point with `services` in its context.
    ///
    /// The first fatal error aborts the remainder of the pipeline; plugins
    /// started before the failure remain started. A missing root directory
    /// yields an empty registry, not an error.
    pub fn initialize(
        self,
        services: Arc<dyn HostServices>,
        jobs: &dyn JobTypeRegistry,
        space: &mut ModuleSpace,
    ) -> Result<PluginRegistry, ArborError> {
        let candidates = self.discover(space)?;
        let registry = PluginRegistry::freeze(candidates);
        info!(plugins = registry.len(), "plugin discovery complete");

        register_job_types(&registry, jobs);
        execute_plugin_start(&registry, &services)?;

        info!(plugins = registry.len(), "plugin initialization complete");
        Ok(registry)
    }

    /// Enumerates plugin directories and builds the candidate list in
    /// lexicographic directory order.
    fn discover(&self, space: &mut ModuleSpace) -> Result<Vec<Plugin>, ArborError> {
        if !self.plugins_root.is_dir() {
            debug!(root = %self.plugins_root.display(), "no plugins directory, nothing to load");
            return Ok(Vec::new());
        }

        let mut dirs = Vec::new();
        let entries = fs::read_dir(&self.plugins_root).map_err(|source| ArborError::Io {
            path: self.plugins_root.clone(),
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| ArborError::Io {
                path: self.plugins_root.clone(),
                source,
            })?;
            if entry.path().is_dir() {
                dirs.push(entry.path());
            }
        }
        // Directory enumeration order is filesystem-dependent; sort so that
        // discovery, and with it the equal-priority tie-break, stays
        // deterministic.
        dirs.sort();

        let mut candidates = Vec::new();
        for dir in dirs {
            let Some(manifest) = load_manifest(&dir)? else {
                debug!(dir = %dir.display(), "no manifest.json, skipping directory");
                continue;
            };
            let modules = load_plugin_modules(&dir, space)?;
            debug!(
                plugin = %manifest.id,
                priority = manifest.load_priority,
                modules = modules.len(),
                "plugin discovered"
            );
            candidates.push(Plugin {
                id: manifest.id,
                name: manifest.name,
                load_priority: manifest.load_priority,
                modules,
            });
        }
        Ok(candidates)
    }
}

/// Loads every dynamic library directly inside the plugin's `binaries`
/// directory. A missing directory means a manifest-only plugin.
fn load_plugin_modules(
    plugin_dir: &Path,
    space: &mut ModuleSpace,
) -> Result<Vec<Arc<LoadedModule>>, ArborError> {
    let bin_dir = plugin_dir.join("binaries");
    if !bin_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    let entries = fs::read_dir(&bin_dir).map_err(|source| ArborError::Io {
        path: bin_dir.clone(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| ArborError::Io {
            path: bin_dir.clone(),
            source,
        })?;
        let path = entry.path();
        let is_library = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext == std::env::consts::DLL_EXTENSION);
        if is_library {
            paths.push(path);
        }
    }
    paths.sort();

    paths.into_iter().map(|path| space.load(&path)).collect()
}

/// Registers every valid job handler across the registry with the engine.
///
/// Handlers whose declared signature is not exactly one job-context
/// parameter are skipped silently: a plugin author's mistake must not crash
/// host startup, at the cost of dropping the misconfigured handler.
fn register_job_types(registry: &PluginRegistry, jobs: &dyn JobTypeRegistry) {
    for plugin in registry {
        for module in &plugin.modules {
            for entry in &module.exports().jobs {
                if !entry.takes_job_context() {
                    debug!(
                        module = module.name(),
                        handler = entry.method_name,
                        "job handler signature mismatch, skipping"
                    );
                    continue;
                }
                jobs.register_type(JobType {
                    id: entry.id.to_string(),
                    name: entry.name.to_string(),
                    default_priority: entry.default_priority,
                    allow_single_instance: entry.allow_single_instance,
                    module: module.name().to_string(),
                    complete_class_name: entry.class_name.to_string(),
                    method_name: entry.method_name.to_string(),
                });
            }
        }
    }
}

/// Constructs and starts every plugin entry point across the registry.
///
/// The first failing `start` aborts initialization; entry points started
/// before it are not rolled back.
fn execute_plugin_start(
    registry: &PluginRegistry,
    services: &Arc<dyn HostServices>,
) -> Result<(), ArborError> {
    for plugin in registry {
        for module in &plugin.modules {
            for entry in &module.exports().entry_points {
                let Some(construct) = entry.construct else {
                    debug!(
                        module = module.name(),
                        type_name = entry.type_name,
                        "entry point has no factory, skipping"
                    );
                    continue;
                };
                let mut instance = construct();
                instance
                    .start(PluginStartArguments {
                        plugin,
                        services: Arc::clone(services),
                    })
                    .map_err(|source| ArborError::StartupInvocation {
                        module: module.name().to_string(),
                        type_name: entry.type_name.to_string(),
                        source,
                    })?;
                debug!(
                    plugin = %plugin.id,
                    type_name = entry.type_name,
                    "plugin entry point started"
                );
            }
        }
    }
    Ok(())
}
