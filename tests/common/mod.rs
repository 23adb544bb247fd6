#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const LOGIN_PATH_HELP: &str = "path to be read from the login file";

/// `my_print_defaults` stand-in: echoes its arguments one per line, prints a
/// usage line for help requests and exits with `$FAKE_EXIT`.
const FAKE_PRINT_DEFAULTS: &str = r#"#!/bin/sh
if [ -n "$FAKE_VERSION" ] && [ "$1" = "--version" ]; then
    echo "$FAKE_VERSION"
    exit 0
fi
if [ "$1" = "--help" ] || [ "$1" = "-?" ]; then
    echo "Usage: my_print_defaults [OPTIONS] [groups]"
fi
for arg in "$@"; do
    echo "arg: $arg"
done
exit ${FAKE_EXIT:-0}
"#;

/// `rpm -qf` stand-in that claims ownership by a MySQL package.
const FAKE_RPM: &str = r#"#!/bin/sh
echo "mysql-community-client"
"#;

const MYSQL_VERSION: &str =
    "my_print_defaults  Ver 8.0.36 for macos14 on arm64 (MySQL Community Server - GPL)";

/// A throwaway directory holding a fake install, used as the whole PATH of the
/// binary under test.
pub struct FakeInstall {
    dir: TempDir,
    native: bool,
}

impl FakeInstall {
    /// A `my_print_defaults` nothing identifies as MySQL.
    pub fn mariadb() -> Self {
        let install = Self::empty(false);
        install.write_script("my_print_defaults", FAKE_PRINT_DEFAULTS);
        install
    }

    /// A `my_print_defaults` identified as MySQL by package ownership on Linux
    /// and by its version string on macOS.
    pub fn mysql() -> Self {
        let install = Self::empty(true);
        install.write_script("my_print_defaults", FAKE_PRINT_DEFAULTS);
        install.write_script("rpm", FAKE_RPM);
        install
    }

    /// No executables at all.
    pub fn empty(native: bool) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join("bin")).expect("Failed to create bin dir");
        fs::create_dir_all(dir.path().join("config")).expect("Failed to create config dir");
        Self { dir, native }
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.dir.path().join("bin")
    }

    pub fn executable(&self) -> PathBuf {
        self.bin_dir().join("my_print_defaults")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    /// The drop-in binary, isolated from the host PATH and user config.
    pub fn shim(&self) -> Command {
        self.isolated(Command::new(env!("CARGO_BIN_EXE_my_print_defaults")))
    }

    /// The diagnostic CLI, isolated the same way.
    pub fn cli(&self) -> Command {
        self.isolated(Command::new(env!("CARGO_BIN_EXE_loginpath-shim")))
    }

    fn isolated(&self, mut cmd: Command) -> Command {
        cmd.env("PATH", self.bin_dir())
            .env("XDG_CONFIG_HOME", self.config_dir())
            .env("HOME", self.dir.path())
            .env_remove("LOGINPATH_SHIM_PROBE__TIMEOUT_SECS")
            .env_remove("LOGINPATH_SHIM_LOCATOR__EXTRA_PATHS")
            .env_remove("RUST_LOG");
        if self.native {
            cmd.env("FAKE_VERSION", MYSQL_VERSION);
        }
        cmd
    }

    fn write_script(&self, name: &str, contents: &str) {
        write_executable(&self.bin_dir().join(name), contents);
    }
}

pub fn write_executable(path: &Path, contents: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, contents).expect("Failed to write script");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make script executable");
}

/// Whether the host has a `my_print_defaults` at one of the built-in locations.
pub fn host_has_builtin_install() -> bool {
    loginpath_shim::platform::PlatformFamily::current()
        .candidate_templates()
        .iter()
        .any(|candidate| Path::new(candidate).exists())
}
