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

//! Package-database lookups for Linux hosts.

use super::packages::{MARIADB_MARKER, base_package_name, is_known_mysql_package};
use super::{DetectionStrategy, Evidence};
use crate::probe::ProbeRunner;
use log::debug;
use regex::Regex;
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::sync::LazyLock;

// `dpkg -S` prints "package[:arch]: /path"
static DPKG_PACKAGE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^\s:]+):").expect("dpkg pattern is valid"));

/// Asks rpm, then dpkg, which package owns the binary.
pub struct LinuxPackageStrategy;

impl LinuxPackageStrategy {
    fn query_rpm(&self, path: &Path, probes: &dyn ProbeRunner, evidence: &mut Vec<Evidence>) -> bool {
        let args = [
            OsString::from("-qf"),
            OsString::from("--queryformat"),
            OsString::from("%{NAME}\n"),
            path.as_os_str().to_os_string(),
        ];

        let output = match probes.output(OsStr::new("rpm"), &args) {
            Ok(output) => output,
            Err(e) => {
                debug!("rpm lookup failed: {e}");
                evidence.push(Evidence::ProbeFailed {
                    method: "rpm".to_string(),
                    reason: e.to_string(),
                });
                return false;
            }
        };

        let Some(package) = output.lines().map(str::trim).find(|line| !line.is_empty()) else {
            debug!("rpm returned no package for {}", path.display());
            return false;
        };

        let base_name = base_package_name(package);
        let matched = is_known_mysql_package(base_name);
        debug!("rpm owner of {}: {package} (base {base_name}, mysql: {matched})", path.display());

        evidence.push(Evidence::PackageOwner {
            manager: "rpm".to_string(),
            package: package.to_string(),
            base_name: base_name.to_string(),
            matched,
        });
        matched
    }

    fn query_dpkg(&self, path: &Path, probes: &dyn ProbeRunner, evidence: &mut Vec<Evidence>) -> bool {
        let args = [OsString::from("-S"), path.as_os_str().to_os_string()];

        let output = match probes.output(OsStr::new("dpkg"), &args) {
            Ok(output) => output,
            Err(e) => {
                debug!("dpkg lookup failed: {e}");
                evidence.push(Evidence::ProbeFailed {
                    method: "dpkg".to_string(),
                    reason: e.to_string(),
                });
                return false;
            }
        };

        let Some(package) = parse_dpkg_owner(&output) else {
            debug!("Unrecognised dpkg output: {}", output.trim());
            return false;
        };

        let base_name = base_package_name(package);
        let matched = is_known_mysql_package(base_name)
            && !package.to_lowercase().contains(MARIADB_MARKER);
        debug!("dpkg owner of {}: {package} (base {base_name}, mysql: {matched})", path.display());

        evidence.push(Evidence::PackageOwner {
            manager: "dpkg".to_string(),
            package: package.to_string(),
            base_name: base_name.to_string(),
            matched,
        });
        matched
    }
}

/// Package name before the first colon of `dpkg -S` output.
fn parse_dpkg_owner(output: &str) -> Option<&str> {
    DPKG_PACKAGE_NAME
        .captures(output.trim_start())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

impl DetectionStrategy for LinuxPackageStrategy {
    fn is_mysql(&self, path: &Path, probes: &dyn ProbeRunner, evidence: &mut Vec<Evidence>) -> bool {
        self.query_rpm(path, probes, evidence) || self.query_dpkg(path, probes, evidence)
    }
}
