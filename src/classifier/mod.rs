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

//! Decides which distribution installed a `my_print_defaults` binary.
//!
//! MySQL's binary understands `--login-path` natively; MariaDB's does not and
//! needs the argument shim. Classification never fails: every unanswered or
//! failed query leaves the result at [`Distribution::MariaDb`], which keeps the
//! shim in place. Applying the shim unnecessarily is harmless, skipping it when
//! it is needed is not.

mod darwin;
mod linux;
pub mod packages;
mod windows;

use crate::platform::PlatformFamily;
use crate::probe::ProbeRunner;
use log::debug;
use serde::Serialize;
use std::fmt;
use std::path::Path;

pub use darwin::DarwinStrategy;
pub use linux::LinuxPackageStrategy;
pub use windows::WindowsPathStrategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    /// Native `--login-path` support
    MySql,
    /// No `--login-path`; the value must be passed positionally
    MariaDb,
}

impl Distribution {
    pub fn supports_login_path(&self) -> bool {
        matches!(self, Distribution::MySql)
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distribution::MySql => write!(f, "MySQL"),
            Distribution::MariaDb => write!(f, "MariaDB"),
        }
    }
}

/// One observation made while classifying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    PackageOwner {
        manager: String,
        package: String,
        base_name: String,
        matched: bool,
    },
    PathPattern {
        pattern: String,
    },
    VersionString {
        output: String,
        matched: bool,
    },
    ProbeFailed {
        method: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub distribution: Distribution,
    pub evidence: Vec<Evidence>,
}

/// Platform-specific way of recognising a MySQL installation.
pub trait DetectionStrategy {
    /// Returns `true` only on positive evidence of MySQL. Observations,
    /// including failed probes, are appended to `evidence`.
    fn is_mysql(&self, path: &Path, probes: &dyn ProbeRunner, evidence: &mut Vec<Evidence>)
    -> bool;
}

/// Strategy used on the given platform family.
pub fn strategy_for(platform: PlatformFamily) -> &'static dyn DetectionStrategy {
    match platform {
        PlatformFamily::Linux => &LinuxPackageStrategy,
        PlatformFamily::Darwin => &DarwinStrategy,
        PlatformFamily::Windows => &WindowsPathStrategy,
    }
}

pub struct Classifier<'a> {
    strategy: &'static dyn DetectionStrategy,
    probes: &'a dyn ProbeRunner,
}

impl<'a> Classifier<'a> {
    pub fn new(platform: PlatformFamily, probes: &'a dyn ProbeRunner) -> Self {
        Self {
            strategy: strategy_for(platform),
            probes,
        }
    }

    pub fn classify(&self, path: &Path) -> Classification {
        let mut evidence = Vec::new();
        let distribution = if self.strategy.is_mysql(path, self.probes, &mut evidence) {
            Distribution::MySql
        } else {
            Distribution::MariaDb
        };

        debug!(
            "Classified {} as {distribution} ({} observations)",
            path.display(),
            evidence.len()
        );

        Classification {
            distribution,
            evidence,
        }
    }
}
