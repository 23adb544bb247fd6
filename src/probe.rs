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

//! Short-lived evidence-gathering subprocesses.
//!
//! A probe is a package-manager or version query whose stdout is used as
//! classification evidence. Every failure mode is a typed [`ProbeError`];
//! callers decide how to fold it into their result.

use log::{debug, trace};
use std::ffi::{OsStr, OsString};
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with status {status}")]
    Failed { program: String, status: String },

    #[error("{program} did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("{program} produced output that is not valid UTF-8")]
    Decode { program: String },

    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

pub type ProbeResult<T> = std::result::Result<T, ProbeError>;

/// Runs probe commands and returns their standard output.
#[cfg_attr(test, mockall::automock)]
pub trait ProbeRunner {
    fn output(&self, program: &OsStr, args: &[OsString]) -> ProbeResult<String>;
}

/// Runs probes as real subprocesses, bounded by a timeout.
pub struct SystemProbeRunner {
    timeout: Duration,
}

impl SystemProbeRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn timed_out(&self, program: &str) -> ProbeError {
        ProbeError::Timeout {
            program: program.to_string(),
            timeout: self.timeout,
        }
    }

    fn wait_with_timeout(
        &self,
        child: &mut Child,
        program: &str,
        start: Instant,
    ) -> ProbeResult<ExitStatus> {
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {
                    if start.elapsed() >= self.timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(self.timed_out(program));
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(source) => {
                    return Err(ProbeError::Wait {
                        program: program.to_string(),
                        source,
                    });
                }
            }
        }
    }
}

impl ProbeRunner for SystemProbeRunner {
    fn output(&self, program: &OsStr, args: &[OsString]) -> ProbeResult<String> {
        let display = program.to_string_lossy().into_owned();
        trace!("Probing: {display} {args:?}");
        let start = Instant::now();

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ProbeError::Spawn {
                program: display.clone(),
                source,
            })?;

        // Drain stdout off-thread so a verbose probe cannot block on a full pipe.
        // The read shares the wait's deadline; a background grandchild can keep
        // the pipe open indefinitely.
        let (sender, receiver) = mpsc::channel();
        if let Some(mut stdout) = child.stdout.take() {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = stdout.read_to_end(&mut buf);
                let _ = sender.send(buf);
            });
        } else {
            let _ = sender.send(Vec::new());
        }

        let status = self.wait_with_timeout(&mut child, &display, start)?;
        let remaining = self.timeout.saturating_sub(start.elapsed());
        let bytes = match receiver.recv_timeout(remaining) {
            Ok(bytes) => bytes,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                debug!("Probe {display} exited but its output stayed open");
                return Err(self.timed_out(&display));
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Vec::new(),
        };

        if !status.success() {
            debug!("Probe {display} exited with {status}");
            return Err(ProbeError::Failed {
                program: display,
                status: status.to_string(),
            });
        }

        String::from_utf8(bytes).map_err(|_| ProbeError::Decode { program: display })
    }
}
