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

//! The drop-in `my_print_defaults` runtime.
//!
//! Locate → classify → either forward the arguments untouched (MySQL) or
//! rewrite `--login-path` and forward the result (MariaDB).

use crate::classifier::Classifier;
use crate::config::ShimConfig;
use crate::error::Result;
use crate::locator::{Locator, Resolution};
use crate::platform::PlatformFamily;
use crate::probe::SystemProbeRunner;
use log::{debug, info};
use std::ffi::OsString;
use std::io::{self, Write};

pub mod args;
pub mod executor;

use args::{HELP_LINES, Rewrite, rewrite};
use executor::{Launcher, ProcessLauncher};

/// Main entry point for the drop-in binary.
///
/// `args` excludes argv[0]. Returns the exit code the process should exit with.
pub fn run(args: Vec<OsString>, config: &ShimConfig) -> Result<i32> {
    let start = std::time::Instant::now();
    let platform = PlatformFamily::current();

    let resolution = Locator::new(platform)
        .with_extra_candidates(&config.locator.extra_paths)
        .resolve();

    let probes = SystemProbeRunner::new(config.probe.timeout());
    let dispatcher = Dispatcher::new(Classifier::new(platform, &probes), ProcessLauncher);

    debug!("Shim resolution completed in {:?}", start.elapsed());
    dispatcher.dispatch(resolution, args, &mut io::stdout())
}

pub struct Dispatcher<'a, L: Launcher> {
    classifier: Classifier<'a>,
    launcher: L,
}

impl<'a, L: Launcher> Dispatcher<'a, L> {
    pub fn new(classifier: Classifier<'a>, launcher: L) -> Self {
        Self {
            classifier,
            launcher,
        }
    }

    /// Run the wrapped executable for `args`.
    ///
    /// Help output for the login-path option is written to `out` after the
    /// executable's own help text.
    pub fn dispatch(
        &self,
        resolution: Resolution,
        args: Vec<OsString>,
        out: &mut dyn Write,
    ) -> Result<i32> {
        let path = resolution.into_result()?;
        let classification = self.classifier.classify(&path);

        if classification.distribution.supports_login_path() {
            info!(
                "{} is provided by {}; forwarding arguments unchanged",
                path.display(),
                classification.distribution
            );
            return self.launcher.launch(&path, &args);
        }

        match rewrite(&args)? {
            Rewrite::Help => {
                self.launcher.launch(&path, &args)?;
                for line in HELP_LINES {
                    writeln!(out, "{line}")?;
                }
                out.flush()?;
                Ok(0)
            }
            Rewrite::Args(rewritten) => {
                debug!("Rewrote {args:?} to {rewritten:?}");
                self.launcher.launch(&path, &rewritten)
            }
        }
    }
}
