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

//! Platform detection for the entire application.
//!
//! The host is resolved once into a [`PlatformFamily`]. Each family owns one
//! list of install locations for the locator and one detection strategy for
//! the classifier, so callers never branch on the OS themselves.

pub mod process;

mod constants;

use serde::Serialize;
use std::fmt;

pub use constants::{executable_extension, target_binary_name, with_executable_extension};

/// Operating-system family, as far as install layouts and evidence sources go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    Linux,
    Darwin,
    Windows,
}

impl PlatformFamily {
    /// Family of the host this binary was compiled for.
    ///
    /// Unix flavours other than macOS are treated as Linux: the same install
    /// prefixes apply and the package queries simply fail where rpm/dpkg are
    /// absent.
    pub fn current() -> Self {
        #[cfg(windows)]
        return PlatformFamily::Windows;
        #[cfg(target_os = "macos")]
        return PlatformFamily::Darwin;
        #[cfg(not(any(windows, target_os = "macos")))]
        return PlatformFamily::Linux;
    }

    pub fn id(&self) -> &'static str {
        match self {
            PlatformFamily::Linux => "linux",
            PlatformFamily::Darwin => "darwin",
            PlatformFamily::Windows => "windows",
        }
    }

    /// Well-known install locations of `my_print_defaults`, most preferred first.
    ///
    /// Windows entries are glob patterns because the server directory embeds
    /// the version (`MySQL Server 8.0`, `MariaDB 10.11`).
    pub fn candidate_templates(&self) -> &'static [&'static str] {
        match self {
            PlatformFamily::Linux => &[
                "/usr/bin/my_print_defaults",
                "/usr/local/bin/my_print_defaults",
                "/opt/mysql/bin/my_print_defaults",
                "/opt/mariadb/bin/my_print_defaults",
                "/usr/local/mysql/bin/my_print_defaults",
                "/usr/local/mariadb/bin/my_print_defaults",
            ],
            PlatformFamily::Darwin => &[
                "/usr/local/bin/my_print_defaults",      // Homebrew (Intel)
                "/opt/homebrew/bin/my_print_defaults",   // Homebrew (Apple Silicon)
                "/usr/local/mysql/bin/my_print_defaults", // MySQL.com installer
                "/usr/local/mariadb/bin/my_print_defaults",
                "/opt/local/bin/my_print_defaults", // MacPorts
                "/sw/bin/my_print_defaults",        // Fink
            ],
            PlatformFamily::Windows => &[
                r"C:\Program Files\MySQL\MySQL Server*\bin\my_print_defaults.exe",
                r"C:\Program Files\MariaDB*\bin\my_print_defaults.exe",
                r"C:\Program Files (x86)\MySQL\MySQL Server*\bin\my_print_defaults.exe",
                r"C:\mysql\bin\my_print_defaults.exe",
                r"C:\mariadb\bin\my_print_defaults.exe",
            ],
        }
    }
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
