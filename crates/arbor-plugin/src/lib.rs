// SPDX-FileCopyrightText: 2026 Arbor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin discovery, module loading, and startup for the Arbor platform.
//!
//! At host startup, [`PluginService::initialize`] walks a `plugins` root
//! directory, parses each sub-directory's `manifest.json`, loads the dynamic
//! libraries in its `binaries` directory, registers the job handlers those
//! modules declare, and invokes each plugin's one-time startup entry points
//! in descending load-priority order.
//!
//! Modules declare their capabilities through an explicit registration table
//! ([`ModuleExports`]) rather than runtime type introspection; see the
//! [`exports`] module for the plugin-authored contract.

pub mod exports;
pub mod manifest;
pub mod module;
pub mod registry;
pub mod service;

pub use exports::{
    EntryPoint, EntryPointCtor, EntryPointExport, HandlerParam, JobHandlerExport, JobHandlerFn,
    ModuleExports, ModuleExportsFn, PluginStartArguments, MODULE_EXPORTS_SYMBOL,
};
pub use manifest::{load_manifest, parse_plugin_manifest, PluginManifest};
pub use module::{LoadedModule, ModuleSpace};
pub use registry::{Plugin, PluginRegistry};
pub use service::PluginService;
