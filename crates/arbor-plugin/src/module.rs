// SPDX-FileCopyrightText: 2026 Arbor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loading of plugin binary modules into the process module space.
//!
//! A [`LoadedModule`] pairs a module's registration table with the library
//! handle keeping its code resident. The [`ModuleSpace`] is the process-wide
//! collection of loaded modules, keyed by module name: the host's own
//! registration step may load a binary before plugin discovery does, and
//! loading the same name again must yield the single resident instance
//! rather than a duplicate.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use arbor_core::ArborError;
use libloading::{Library, Symbol};
use tracing::debug;

use crate::exports::{ModuleExports, ModuleExportsFn, MODULE_EXPORTS_SYMBOL};

/// One binary module resident in the process.
pub struct LoadedModule {
    name: String,
    // Declared before `library` so the table drops while the code backing
    // its function pointers is still mapped.
    exports: ModuleExports,
    library: Option<Library>,
}

impl LoadedModule {
    /// Wraps a module that is already part of the host binary.
    ///
    /// Used for compiled-in modules and by hosts that pre-register binaries
    /// before plugin discovery runs.
    pub fn builtin(name: impl Into<String>, exports: ModuleExports) -> Self {
        Self {
            name: name.into(),
            exports,
            library: None,
        }
    }

    /// Loads a module from a dynamic library file and reads its
    /// registration table.
    pub fn open(path: &Path) -> Result<Self, ArborError> {
        let name = module_name(path)?;

        // Safety: loading a plugin library executes its initializers and the
        // exports constructor with full host privileges. That is the loader's
        // contract; plugins are trusted code, not sandboxed.
        let (library, exports) = unsafe {
            let library = Library::new(path).map_err(|e| ArborError::ModuleLoad {
                path: path.to_path_buf(),
                source: Box::new(e),
            })?;
            let symbol: Symbol<'_, ModuleExportsFn> = library
                .get(MODULE_EXPORTS_SYMBOL)
                .map_err(|e| ArborError::ModuleLoad {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                })?;
            let exports_fn = *symbol;
            drop(symbol);
            let exports = *Box::from_raw(exports_fn());
            (library, exports)
        };

        Ok(Self {
            name,
            exports,
            library: Some(library),
        })
    }

    /// The module's name, derived from its file stem for loaded binaries.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The module's registration table.
    pub fn exports(&self) -> &ModuleExports {
        &self.exports
    }
}

impl std::fmt::Debug for LoadedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModule")
            .field("name", &self.name)
            .field("exports", &self.exports)
            .field("library", &self.library.is_some())
            .finish()
    }
}

/// Process-wide collection of loaded modules, keyed by name.
#[derive(Debug, Default)]
pub struct ModuleSpace {
    modules: HashMap<String, Arc<LoadedModule>>,
}

impl ModuleSpace {
    /// Creates an empty module space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an already-resident module.
    ///
    /// If a module with the same name is present, the existing instance is
    /// kept and returned; registration never duplicates a module.
    pub fn register(&mut self, module: LoadedModule) -> Arc<LoadedModule> {
        let name = module.name().to_string();
        Arc::clone(
            self.modules
                .entry(name)
                .or_insert_with(|| Arc::new(module)),
        )
    }

    /// Looks up a resident module by name.
    pub fn get(&self, name: &str) -> Option<Arc<LoadedModule>> {
        self.modules.get(name).map(Arc::clone)
    }

    /// Resolves the module at `path`, loading it only if a module of the
    /// same name is not already resident.
    pub fn load(&mut self, path: &Path) -> Result<Arc<LoadedModule>, ArborError> {
        let name = module_name(path)?;
        if let Some(existing) = self.modules.get(&name) {
            debug!(module = %name, "module already resident, reusing");
            return Ok(Arc::clone(existing));
        }

        let module = Arc::new(LoadedModule::open(path)?);
        debug!(module = %name, path = %path.display(), "module loaded");
        self.modules.insert(name, Arc::clone(&module));
        Ok(module)
    }

    /// Number of resident modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// True when no modules are resident.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Derives a module name from a library file path (its file stem).
fn module_name(path: &Path) -> Result<String, ArborError> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| ArborError::ModuleLoad {
            path: path.to_path_buf(),
            source: "module path has no file name".into(),
        })
}
