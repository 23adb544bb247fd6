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

use super::{DetectionStrategy, Evidence};
use crate::probe::ProbeRunner;
use log::debug;
use std::path::Path;

/// Lower-cased path fragments of MySQL installer layouts.
const MYSQL_PATH_INDICATORS: &[&str] = &[
    "mysql server",
    r"\mysql\",
    r"program files\mysql\",
    r"program files (x86)\mysql\",
];

/// Windows has no package database to ask; the install path is the only evidence.
pub struct WindowsPathStrategy;

impl DetectionStrategy for WindowsPathStrategy {
    fn is_mysql(&self, path: &Path, _probes: &dyn ProbeRunner, evidence: &mut Vec<Evidence>) -> bool {
        let lowered = path.to_string_lossy().to_lowercase();

        match MYSQL_PATH_INDICATORS
            .iter()
            .find(|indicator| lowered.contains(*indicator))
        {
            Some(indicator) => {
                debug!("{} matches MySQL indicator '{indicator}'", path.display());
                evidence.push(Evidence::PathPattern {
                    pattern: indicator.to_string(),
                });
                true
            }
            None => false,
        }
    }
}
