// SPDX-FileCopyrightText: 2026 Arbor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The registration table a plugin module exposes to the loader.
//!
//! Instead of scanning loaded code for annotated types, the loader asks each
//! module for an explicit [`ModuleExports`] table through a well-known
//! `extern "C"` symbol. Plugin crates build the table with [`export_module!`]
//! and list their job handlers and startup entry points in it.
//!
//! The table crosses the library boundary as ordinary Rust data: host and
//! plugins must be built with the same toolchain. This is a same-compiler
//! convention, not a stable C ABI.

use std::error::Error;
use std::sync::Arc;

use arbor_core::{HostServices, JobContext};

use crate::registry::Plugin;

/// Name of the symbol every plugin module must export.
pub const MODULE_EXPORTS_SYMBOL: &[u8] = b"arbor_module_exports\0";

/// Signature of the exported symbol: a function handing ownership of the
/// module's registration table to the caller.
pub type ModuleExportsFn = unsafe extern "C" fn() -> *mut ModuleExports;

/// Everything one module registers with the host.
#[derive(Debug, Default)]
pub struct ModuleExports {
    /// Job handlers offered to the background-job engine.
    pub jobs: Vec<JobHandlerExport>,
    /// Startup entry points invoked once at host startup.
    pub entry_points: Vec<EntryPointExport>,
}

/// A job handler's function pointer, held for the job engine.
///
/// Never invoked during initialization; the engine calls it at
/// job-execution time.
pub type JobHandlerFn = fn(&JobContext);

/// Kind of one declared parameter of a job handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerParam {
    /// The designated job-context parameter.
    JobContext,
    /// Any other parameter type, named for diagnostics.
    Other(&'static str),
}

/// One job handler entry in a module's registration table.
#[derive(Debug, Clone)]
pub struct JobHandlerExport {
    /// Stable job-type identifier (e.g. `"job.sync"`).
    pub id: &'static str,
    /// Human-readable job name.
    pub name: &'static str,
    /// Default scheduling priority hint.
    pub default_priority: i32,
    /// Whether the engine may run at most one instance at a time.
    pub allow_single_instance: bool,
    /// Fully-qualified name of the type owning the handler.
    pub class_name: &'static str,
    /// Name of the handler method.
    pub method_name: &'static str,
    /// The handler's declared parameter list, validated by the scanner.
    pub params: &'static [HandlerParam],
    /// The handler itself.
    pub handler: JobHandlerFn,
}

impl JobHandlerExport {
    /// True when the declared signature is exactly one job-context parameter.
    ///
    /// Entries failing this check are skipped silently during scanning, not
    /// registered and not reported as errors.
    pub fn takes_job_context(&self) -> bool {
        matches!(self.params, [HandlerParam::JobContext])
    }
}

/// Ephemeral context passed to a plugin entry point's [`EntryPoint::start`].
pub struct PluginStartArguments<'a> {
    /// The plugin owning the module that registered the entry point.
    pub plugin: &'a Plugin,
    /// The host service locator, forwarded unchanged.
    pub services: Arc<dyn HostServices>,
}

/// One-time startup hook provided by a plugin.
pub trait EntryPoint: Send {
    /// Performs the plugin's one-time initialization.
    fn start(
        &mut self,
        args: PluginStartArguments<'_>,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// Factory producing a fresh entry-point instance.
///
/// The loader applies no dependency injection; construction takes no
/// arguments and the host only supplies the `start` call's context.
pub type EntryPointCtor = fn() -> Box<dyn EntryPoint>;

/// One startup entry in a module's registration table.
#[derive(Debug, Clone)]
pub struct EntryPointExport {
    /// Fully-qualified name of the entry-point type, used in diagnostics.
    pub type_name: &'static str,
    /// Factory for the entry point. Entries without one are skipped silently.
    pub construct: Option<EntryPointCtor>,
}

/// Declares the `arbor_module_exports` symbol for a plugin module.
///
/// The expression is evaluated on every call and its [`ModuleExports`] value
/// is handed to the loader:
///
/// ```ignore
/// arbor_plugin::export_module!(ModuleExports {
///     jobs: vec![/* ... */],
///     entry_points: vec![/* ... */],
/// });
/// ```
#[macro_export]
macro_rules! export_module {
    ($exports:expr) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn arbor_module_exports() -> *mut $crate::ModuleExports {
            Box::into_raw(Box::new($exports))
        }
    };
}
