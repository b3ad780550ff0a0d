//! A Rust model of what the bootstrap does in a given page.
//!
//! Useful for reasoning about repeated cell execution and shared runtimes without a browser:
//! [`LoadPlan::run`] applies one bootstrap execution to a [`PageState`] and reports the loads it
//! would request. All loads are assumed to succeed.

use crate::bootstrap::strip_js_extension;
use chartcell_core::{LoaderConfig, RenderFragment};
use std::collections::{BTreeMap, BTreeSet};

/// A load the bootstrap asks the browser to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadRequest {
    /// `<script src>` injected into `document.head`.
    ScriptTag(String),
    /// Runtime bundle registered under `name` and required through the module loader.
    Module { name: String, path: String },
    /// Plain source required through the module loader.
    ModuleSource(String),
}

/// The parts of a live page the bootstrap inspects or mutates.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    module_loader: bool,
    script_tags: BTreeSet<String>,
    module_paths: BTreeMap<String, String>,
    loaded_modules: BTreeSet<String>,
    globals: BTreeMap<String, String>,
}

impl PageState {
    /// A page without a module loader.
    pub fn plain() -> Self {
        Self::default()
    }

    /// A page with a RequireJS-style loader (classic notebook front-ends).
    pub fn with_module_loader() -> Self {
        Self {
            module_loader: true,
            ..Self::default()
        }
    }

    pub fn has_module_loader(&self) -> bool {
        self.module_loader
    }

    /// Marks a `<script src>` as already present, e.g. from another cell.
    pub fn add_script_tag(&mut self, src: impl Into<String>) {
        self.script_tags.insert(src.into());
    }

    pub fn has_script_tag(&self, src: &str) -> bool {
        self.script_tags.contains(src)
    }

    /// Path the loader resolves `module` to, if configured.
    pub fn module_path(&self, module: &str) -> Option<&str> {
        self.module_paths.get(module).map(String::as_str)
    }

    /// Module the named global was bound to.
    pub fn global(&self, name: &str) -> Option<&str> {
        self.globals.get(name).map(String::as_str)
    }
}

/// What one bootstrap execution did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub requests: Vec<LoadRequest>,
    pub chart_fn_calls: usize,
}

#[derive(Debug, Clone)]
pub struct LoadPlan {
    sources: Vec<String>,
    loader: LoaderConfig,
}

impl LoadPlan {
    pub fn new(fragment: &RenderFragment, loader: &LoaderConfig) -> Self {
        Self {
            sources: fragment.external_scripts().to_vec(),
            loader: loader.clone(),
        }
    }

    pub fn run(&self, page: &mut PageState) -> RunReport {
        let mut report = RunReport::default();
        let mut sources = self.sources.as_slice();

        if page.module_loader
            && let Some((runtime, rest)) = sources.split_first()
        {
            let name = self.loader.module_name.clone();
            let path = strip_js_extension(runtime).to_string();
            // The loader caches by module id: once defined, a new path is never fetched.
            page.module_paths.insert(name.clone(), path.clone());
            if page.loaded_modules.insert(name.clone()) {
                page.script_tags.insert(format!("{path}.js"));
                report.requests.push(LoadRequest::Module {
                    name: name.clone(),
                    path,
                });
            }
            page.globals.insert(self.loader.global_name.clone(), name);
            sources = rest;
        }

        for src in sources {
            if page.script_tags.contains(src) {
                continue;
            }
            if page.module_loader {
                if page.loaded_modules.insert(src.clone()) {
                    report.requests.push(LoadRequest::ModuleSource(src.clone()));
                }
            } else {
                report.requests.push(LoadRequest::ScriptTag(src.clone()));
            }
            page.script_tags.insert(src.clone());
        }

        report.chart_fn_calls += 1;
        report
    }
}
