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

//! Platform-specific process execution.

use crate::error::{Result, ShimError};
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Exit code reported when the platform gives no better information
const FALLBACK_EXIT_CODE: i32 = 1;

/// Run `program` with inherited standard streams and wait for it.
///
/// Returns the child's exit code as computed by [`exit_code`].
pub fn run_inherited(program: &Path, args: &[OsString]) -> Result<i32> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| ShimError::Execution {
            program: program.display().to_string(),
            source,
        })?;

    Ok(exit_code(status))
}

/// Convert an exit status into the integer the wrapper should exit with.
///
/// On Unix a child killed by a signal maps to `128 + signal`, the same
/// value a POSIX shell reports.
#[cfg(unix)]
pub fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => 128 + signal,
        (None, None) => FALLBACK_EXIT_CODE,
    }
}

/// Convert an exit status into the integer the wrapper should exit with.
#[cfg(not(unix))]
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(FALLBACK_EXIT_CODE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn run_inherited_propagates_exit_code() {
        let args = vec![OsString::from("-c"), OsString::from("exit 3")];
        let code = run_inherited(Path::new("/bin/sh"), &args).expect("sh runs");
        assert_eq!(code, 3);
    }

    #[cfg(unix)]
    #[test]
    fn run_inherited_reports_success() {
        let args = vec![OsString::from("-c"), OsString::from("true")];
        let code = run_inherited(Path::new("/bin/sh"), &args).expect("sh runs");
        assert_eq!(code, 0);
    }

    #[cfg(unix)]
    #[test]
    fn run_inherited_maps_signal_to_shell_convention() {
        let args = vec![OsString::from("-c"), OsString::from("kill -TERM $$")];
        let code = run_inherited(Path::new("/bin/sh"), &args).expect("sh runs");
        assert_eq!(code, 128 + 15);
    }

    #[test]
    fn run_inherited_missing_program_is_execution_error() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let missing = temp_dir.path().join("missing");

        let err = run_inherited(&missing, &[]).expect_err("spawn must fail");
        match err {
            ShimError::Execution { program, source } => {
                assert!(program.contains("missing"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }
}
