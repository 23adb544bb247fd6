// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Finds the real `my_print_defaults` on this host.
//!
//! The process search path is consulted first because it reflects the
//! operator's own environment. Only when it yields nothing are the platform's
//! well-known install locations tried, in order, with glob patterns expanded
//! against the filesystem.

use crate::error::ShimError;
use crate::platform::{PlatformFamily, target_binary_name};
use log::{debug, trace};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Label used for the search path in the list of searched locations
const SEARCH_PATH_LABEL: &str = "PATH";

/// Outcome of a lookup. Not finding the executable is an expected outcome here;
/// callers decide whether it is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(PathBuf),
    NotFound { searched_paths: Vec<String> },
}

impl Resolution {
    pub fn found(&self) -> Option<&Path> {
        match self {
            Resolution::Found(path) => Some(path),
            Resolution::NotFound { .. } => None,
        }
    }

    /// Turn a missing executable into [`ShimError::ExecutableNotFound`].
    pub fn into_result(self) -> crate::error::Result<PathBuf> {
        match self {
            Resolution::Found(path) => Ok(path),
            Resolution::NotFound { searched_paths } => {
                Err(ShimError::ExecutableNotFound { searched_paths })
            }
        }
    }
}

pub struct Locator {
    binary_name: String,
    search_path: Option<OsString>,
    candidates: Vec<String>,
    excluded: Option<PathBuf>,
}

impl Locator {
    /// Locator for the current process: its `PATH`, the platform's install
    /// locations, and the running executable excluded so the drop-in binary
    /// never resolves to itself.
    pub fn new(platform: PlatformFamily) -> Self {
        let excluded = env::current_exe()
            .and_then(fs::canonicalize)
            .map_err(|e| debug!("Cannot determine current executable: {e}"))
            .ok();

        Self {
            binary_name: target_binary_name(),
            search_path: env::var_os("PATH"),
            candidates: platform
                .candidate_templates()
                .iter()
                .map(|c| c.to_string())
                .collect(),
            excluded,
        }
    }

    pub fn with_search_path(mut self, search_path: Option<OsString>) -> Self {
        self.search_path = search_path;
        self
    }

    pub fn with_candidates(mut self, candidates: Vec<String>) -> Self {
        self.candidates = candidates;
        self
    }

    /// Append operator-supplied paths or patterns after the built-in candidates.
    pub fn with_extra_candidates(mut self, extra: &[String]) -> Self {
        self.candidates.extend(extra.iter().cloned());
        self
    }

    pub fn excluding(mut self, path: Option<PathBuf>) -> Self {
        self.excluded = path.map(|p| fs::canonicalize(&p).unwrap_or(p));
        self
    }

    pub fn resolve(&self) -> Resolution {
        if let Some(path) = self.search_in_path() {
            debug!("Found {} in PATH: {}", self.binary_name, path.display());
            return Resolution::Found(path);
        }

        for template in &self.candidates {
            for candidate in expand_template(template) {
                trace!("Checking candidate {}", candidate.display());
                if candidate.is_file() && !self.is_excluded(&candidate) {
                    debug!("Found {} at {}", self.binary_name, candidate.display());
                    return Resolution::Found(candidate);
                }
            }
        }

        let mut searched_paths = vec![SEARCH_PATH_LABEL.to_string()];
        searched_paths.extend(self.candidates.iter().cloned());
        debug!("{} not found in {} locations", self.binary_name, searched_paths.len());
        Resolution::NotFound { searched_paths }
    }

    fn search_in_path(&self) -> Option<PathBuf> {
        let search_path = self.search_path.as_ref()?;
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        match which::which_in_all(&self.binary_name, Some(search_path), cwd) {
            Ok(mut matches) => matches.find(|path| {
                let excluded = self.is_excluded(path);
                if excluded {
                    debug!("Skipping {} (this executable)", path.display());
                }
                !excluded
            }),
            Err(e) => {
                trace!("PATH lookup for {} failed: {e}", self.binary_name);
                None
            }
        }
    }

    fn is_excluded(&self, candidate: &Path) -> bool {
        let Some(excluded) = &self.excluded else {
            return false;
        };
        fs::canonicalize(candidate)
            .map(|canonical| &canonical == excluded)
            .unwrap_or(false)
    }
}

fn is_glob_pattern(template: &str) -> bool {
    template.contains(['*', '?', '['])
}

/// Concrete paths for one candidate template, in sorted order.
fn expand_template(template: &str) -> Vec<PathBuf> {
    if !is_glob_pattern(template) {
        return vec![PathBuf::from(template)];
    }

    match glob::glob(template) {
        Ok(paths) => {
            let mut matches: Vec<PathBuf> = paths.filter_map(|entry| entry.ok()).collect();
            matches.sort();
            matches
        }
        Err(e) => {
            debug!("Ignoring invalid pattern '{template}': {e}");
            Vec::new()
        }
    }
}
