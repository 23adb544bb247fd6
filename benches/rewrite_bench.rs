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


use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use loginpath_shim::classifier::packages::base_package_name;
use loginpath_shim::locator::Locator;
use loginpath_shim::platform::{PlatformFamily, target_binary_name};
use loginpath_shim::shim::args::rewrite;
use std::ffi::OsString;
use std::fs;
use tempfile::TempDir;

fn os(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
}

fn benchmark_rewrite(c: &mut Criterion) {
    let cases = [
        ("no_login_path", os(&["--defaults-file=/etc/my.cnf", "client", "mysqld"])),
        ("long_equals", os(&["-s", "--login-path=client", "mysqld"])),
        ("short_separate", os(&["-l", "client", "mysqld"])),
        ("help", os(&["client", "--help"])),
    ];

    let mut group = c.benchmark_group("rewrite");
    for (name, args) in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), args, |b, args| {
            b.iter(|| rewrite(black_box(args)))
        });
    }
    group.finish();

    // Many passthrough arguments around a single login path
    let mut long_args = os(&["--login-path=client"]);
    long_args.extend((0..200).map(|i| OsString::from(format!("group{i}"))));
    c.bench_function("rewrite_long_argument_list", |b| {
        b.iter(|| rewrite(black_box(&long_args)))
    });
}

fn benchmark_base_package_name(c: &mut Criterion) {
    c.bench_function("base_package_name", |b| {
        b.iter(|| {
            for name in [
                "mysql-community-client-8.0.36-1.el9",
                "mysql-client-core-8.0",
                "mariadb-client-10.11.6",
            ] {
                black_box(base_package_name(name));
            }
        })
    });
}

fn benchmark_locator(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let bin_dir = temp_dir.path().join("bin");
    fs::create_dir_all(&bin_dir).unwrap();
    let binary = bin_dir.join(target_binary_name());
    fs::write(&binary, "").unwrap();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&binary, fs::Permissions::from_mode(0o755)).unwrap();
    }

    c.bench_function("locator_path_hit", |b| {
        let locator = Locator::new(PlatformFamily::current())
            .with_search_path(Some(bin_dir.clone().into_os_string()))
            .with_candidates(Vec::new());
        b.iter(|| black_box(locator.resolve()))
    });

    c.bench_function("locator_candidate_fallback", |b| {
        let locator = Locator::new(PlatformFamily::current())
            .with_search_path(Some(OsString::new()))
            .with_candidates(vec![binary.display().to_string()]);
        b.iter(|| black_box(locator.resolve()))
    });
}

criterion_group!(
    benches,
    benchmark_rewrite,
    benchmark_base_package_name,
    benchmark_locator
);
criterion_main!(benches);
