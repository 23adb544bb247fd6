//! Process execution for the wrapped executable.
//!
//! The child inherits all environment variables, the working directory and
//! the standard streams; the wrapper waits for it and reports its exit code.

use crate::error::Result;
use crate::platform::process::run_inherited;
use log::debug;
use std::ffi::OsString;
use std::path::Path;

/// Starts the real `my_print_defaults` and waits for it.
#[cfg_attr(test, mockall::automock)]
pub trait Launcher {
    /// Run `program` with `args`, returning the exit code to propagate.
    fn launch(&self, program: &Path, args: &[OsString]) -> Result<i32>;
}

pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, program: &Path, args: &[OsString]) -> Result<i32> {
        debug!("Executing {} {args:?}", program.display());
        let code = run_inherited(program, args)?;
        debug!("{} exited with {code}", program.display());
        Ok(code)
    }
}
