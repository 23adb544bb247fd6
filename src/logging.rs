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

/// Filter directive for the given verbosity level
fn filter_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "loginpath_shim=warn",
        1 => "loginpath_shim=info",
        2 => "loginpath_shim=debug",
        _ => "loginpath_shim=trace",
    }
}

/// Initialize the logger with the specified verbosity level
///
/// Output goes to stderr; stdout belongs to the wrapped executable.
///
/// # Arguments
/// * `verbose` - Verbosity level (0=warn, 1=info, 2=debug, 3+=trace)
pub fn setup_logger(verbose: u8) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter_for(verbose)))
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .target(env_logger::Target::Stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_for_verbosity() {
        assert_eq!(filter_for(0), "loginpath_shim=warn");
        assert_eq!(filter_for(1), "loginpath_shim=info");
        assert_eq!(filter_for(2), "loginpath_shim=debug");
        assert_eq!(filter_for(3), "loginpath_shim=trace");
        assert_eq!(filter_for(9), "loginpath_shim=trace");
    }
}
