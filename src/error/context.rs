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

use crate::error::ShimError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a ShimError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a ShimError) -> Self {
        let (suggestion, details) = match error {
            ShimError::ExecutableNotFound { searched_paths } => {
                let suggestion = if cfg!(windows) {
                    Some(
                        "Please install MySQL or MariaDB client tools and add their bin \
                         directory to your PATH environment variable."
                            .to_string(),
                    )
                } else {
                    Some("Please install MySQL or MariaDB client tools.".to_string())
                };
                let details = if searched_paths.is_empty() {
                    None
                } else {
                    Some(format!(
                        "Searched in:\n{}",
                        searched_paths
                            .iter()
                            .map(|p| format!("  - {p}"))
                            .collect::<Vec<_>>()
                            .join("\n")
                    ))
                };
                (suggestion, details)
            }
            ShimError::MissingLoginPathValue { option } => {
                let suggestion = Some(
                    "Usage: -l <name>, --login-path <name> or --login-path=<name>".to_string(),
                );
                let details = Some(format!("Option '{option}' requires a non-empty value."));
                (suggestion, details)
            }
            ShimError::Execution { source, .. } => {
                let suggestion = match source.kind() {
                    std::io::ErrorKind::PermissionDenied => {
                        Some("Check that the executable has execute permissions.".to_string())
                    }
                    std::io::ErrorKind::NotFound => Some(
                        "The executable disappeared after it was located. Check your installation."
                            .to_string(),
                    ),
                    _ => None,
                };
                (suggestion, None)
            }
            ShimError::ConfigError(_) => {
                let suggestion = Some(
                    "Check the config.toml file and LOGINPATH_SHIM_* environment variables."
                        .to_string(),
                );
                (suggestion, None)
            }
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
