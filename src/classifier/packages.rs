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

//! Package names that identify a MySQL-provided `my_print_defaults`.

use regex::Regex;
use std::sync::LazyLock;

/// Base names of packages that ship MySQL client tools.
///
/// Compared case-insensitively and exactly against [`base_package_name`].
pub const KNOWN_MYSQL_PACKAGES: &[&str] = &[
    "mysql",
    "mysql-community",
    "mysql-community-server",
    "mysql-server",
    "MySQL-server",
    "mysql84-community-release",
    "mysql83-community-release",
    "mysql80-community-release",
    "mysql57-community-release",
    "mysql56-community-release",
    "mysql-community-client",
    "mysql-client",
    // Debian/Ubuntu split the binaries into *-core packages
    "mysql-client-core",
    "mysql-server-core",
    "mysql-community-client-core",
    "mysql-community-server-core",
];

/// Vendor name that disqualifies a package even when its base name matches.
pub const MARIADB_MARKER: &str = "mariadb";

// Name segments after the first may not start with a digit; the first such
// segment begins the version (rpm NVRA, dpkg versioned package names).
static BASE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^-]+(?:-[^-0-9][^-]*)*").expect("base name pattern is valid"));

/// Strip version, release and architecture suffixes from a package string.
///
/// `mysql-community-client-8.0.34-1.el8.x86_64` becomes
/// `mysql-community-client`. Input that does not look like a package name is
/// returned unchanged.
pub fn base_package_name(package: &str) -> &str {
    let package = package.trim();
    BASE_NAME
        .find(package)
        .map(|m| m.as_str())
        .unwrap_or(package)
}

/// Whether `base_name` is exactly one of [`KNOWN_MYSQL_PACKAGES`], ignoring case.
pub fn is_known_mysql_package(base_name: &str) -> bool {
    KNOWN_MYSQL_PACKAGES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(base_name))
}
