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

//! macOS detection: install location first, `--version` output second.

use super::packages::MARIADB_MARKER;
use super::{DetectionStrategy, Evidence};
use crate::probe::ProbeRunner;
use log::debug;
use std::ffi::OsString;
use std::fs;
use std::path::Path;

/// Locations only a MySQL installation uses. Homebrew links `bin/` into the
/// keg, so the canonical path is checked as well.
const MYSQL_PATH_MARKERS: &[&str] = &[
    "/usr/local/mysql/",
    "/opt/homebrew/var/mysql/",
    "/usr/local/var/mysql/",
    "/Cellar/mysql",
];

const MYSQL_MARKER: &str = "mysql";

pub struct DarwinStrategy;

impl DarwinStrategy {
    fn match_path(&self, path: &Path) -> Option<&'static str> {
        let mut forms = vec![path.to_string_lossy().into_owned()];
        if let Ok(canonical) = fs::canonicalize(path) {
            forms.push(canonical.to_string_lossy().into_owned());
        }

        MYSQL_PATH_MARKERS
            .iter()
            .copied()
            .find(|marker| forms.iter().any(|form| form.contains(marker)))
    }

    fn probe_version(
        &self,
        path: &Path,
        probes: &dyn ProbeRunner,
        evidence: &mut Vec<Evidence>,
    ) -> bool {
        let args = [OsString::from("--version")];
        match probes.output(path.as_os_str(), &args) {
            Ok(output) => {
                let output = output.trim().to_string();
                let lowered = output.to_lowercase();
                let matched = lowered.contains(MYSQL_MARKER) && !lowered.contains(MARIADB_MARKER);
                debug!("Version output '{output}' (mysql: {matched})");
                evidence.push(Evidence::VersionString { output, matched });
                matched
            }
            Err(e) => {
                debug!("Version probe failed: {e}");
                evidence.push(Evidence::ProbeFailed {
                    method: "version".to_string(),
                    reason: e.to_string(),
                });
                false
            }
        }
    }
}

impl DetectionStrategy for DarwinStrategy {
    fn is_mysql(&self, path: &Path, probes: &dyn ProbeRunner, evidence: &mut Vec<Evidence>) -> bool {
        if let Some(marker) = self.match_path(path) {
            debug!("{} is under MySQL location {marker}", path.display());
            evidence.push(Evidence::PathPattern {
                pattern: marker.to_string(),
            });
            return true;
        }

        self.probe_version(path, probes, evidence)
    }
}
