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

//! `--login-path` translation for MariaDB's `my_print_defaults`.
//!
//! MariaDB does not know the option, but it does accept a trailing positional
//! argument naming an extra option group to read. Rewriting moves the
//! option's value to the end of the argument vector; everything else keeps its
//! relative order.

use crate::error::{Result, ShimError};
use std::ffi::{OsStr, OsString};

pub const SHORT_OPTION: &str = "-l";
pub const LONG_OPTION: &str = "--login-path";
const LONG_OPTION_PREFIX: &str = "--login-path=";
const HELP_FLAGS: &[&str] = &["-?", "--help"];

/// Appended after the wrapped executable's own help text.
pub const HELP_LINES: &[&str] = &[
    "\t-l, --login-path=name",
    "\t\t\tpath to be read from the login file",
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedArguments {
    pub login_path: Option<OsString>,
    pub help: bool,
    /// When `help` is set, the complete original vector
    pub passthrough: Vec<OsString>,
}

/// What the dispatcher should do with the arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// Show the executable's help followed by [`HELP_LINES`]
    Help,
    Args(Vec<OsString>),
}

enum State {
    Scanning,
    AwaitingValue { option: &'static str },
}

fn is_help_flag(arg: &OsStr) -> bool {
    arg.to_str().is_some_and(|a| HELP_FLAGS.contains(&a))
}

fn looks_like_option(arg: &OsStr) -> bool {
    arg.as_encoded_bytes().first() == Some(&b'-')
}

fn missing_value(option: &str) -> ShimError {
    ShimError::MissingLoginPathValue {
        option: option.to_string(),
    }
}

impl ParsedArguments {
    pub fn parse(args: &[OsString]) -> Result<Self> {
        if args.iter().any(|arg| is_help_flag(arg)) {
            return Ok(Self {
                login_path: None,
                help: true,
                passthrough: args.to_vec(),
            });
        }

        let mut parsed = Self::default();
        let mut state = State::Scanning;

        for arg in args {
            if let State::AwaitingValue { option } = state {
                if arg.is_empty() || looks_like_option(arg) {
                    return Err(missing_value(option));
                }
                parsed.login_path = Some(arg.clone());
                state = State::Scanning;
                continue;
            }

            match arg.to_str() {
                Some(SHORT_OPTION) => state = State::AwaitingValue { option: SHORT_OPTION },
                Some(LONG_OPTION) => state = State::AwaitingValue { option: LONG_OPTION },
                Some(a) if a.starts_with(LONG_OPTION_PREFIX) => {
                    let value = &a[LONG_OPTION_PREFIX.len()..];
                    if value.is_empty() {
                        return Err(missing_value(LONG_OPTION));
                    }
                    parsed.login_path = Some(OsString::from(value));
                }
                _ => parsed.passthrough.push(arg.clone()),
            }
        }

        if let State::AwaitingValue { option } = state {
            return Err(missing_value(option));
        }

        Ok(parsed)
    }

    /// Arguments for MariaDB's `my_print_defaults`: pass-through tokens
    /// followed by the login path, if one was given.
    pub fn into_command_args(self) -> Vec<OsString> {
        let mut args = self.passthrough;
        args.extend(self.login_path);
        args
    }
}

pub fn rewrite(args: &[OsString]) -> Result<Rewrite> {
    let parsed = ParsedArguments::parse(args)?;
    if parsed.help {
        return Ok(Rewrite::Help);
    }
    Ok(Rewrite::Args(parsed.into_command_args()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    fn rewritten(args: &[&str]) -> Vec<OsString> {
        match rewrite(&os(args)).unwrap() {
            Rewrite::Args(args) => args,
            Rewrite::Help => panic!("unexpected help"),
        }
    }

    fn assert_missing_value(args: &[&str], expected_option: &str) {
        match rewrite(&os(args)) {
            Err(ShimError::MissingLoginPathValue { option }) => assert_eq!(option, expected_option),
            other => panic!("expected usage error for {args:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_short_option_with_value() {
        assert_eq!(rewritten(&["-uroot", "-l", "client"]), os(&["-uroot", "client"]));
    }

    #[test]
    fn test_inline_long_option() {
        assert_eq!(
            rewritten(&["--login-path=backup", "--defaults-file=/tmp/x"]),
            os(&["--defaults-file=/tmp/x", "backup"])
        );
    }

    #[test]
    fn test_separate_long_option() {
        assert_eq!(
            rewritten(&["--login-path", "backup", "mysqldump"]),
            os(&["mysqldump", "backup"])
        );
    }

    #[test]
    fn test_inline_value_split_on_first_equals() {
        assert_eq!(rewritten(&["--login-path=a=b"]), os(&["a=b"]));
    }

    #[test]
    fn test_no_option_is_identity() {
        let args = ["--defaults-file=/etc/my.cnf", "client", "mysqld"];
        assert_eq!(rewritten(&args), os(&args));
        assert!(rewritten(&[]).is_empty());
    }

    #[test]
    fn test_value_appended_once_last_wins() {
        assert_eq!(
            rewritten(&["-l", "first", "client", "--login-path=second"]),
            os(&["client", "second"])
        );
    }

    #[test]
    fn test_option_as_last_token() {
        assert_missing_value(&["-l"], "-l");
        assert_missing_value(&["client", "--login-path"], "--login-path");
    }

    #[test]
    fn test_value_looks_like_option() {
        assert_missing_value(&["-l", "--defaults-file=/tmp/x"], "-l");
        assert_missing_value(&["--login-path", "-s"], "--login-path");
    }

    #[test]
    fn test_empty_values() {
        assert_missing_value(&["--login-path="], "--login-path");
        assert_missing_value(&["-l", ""], "-l");
    }

    #[test]
    fn test_help_takes_precedence() {
        assert_eq!(rewrite(&os(&["--help"])).unwrap(), Rewrite::Help);
        assert_eq!(rewrite(&os(&["-l", "client", "-?"])).unwrap(), Rewrite::Help);
        // Would otherwise be a usage error
        assert_eq!(rewrite(&os(&["-l", "--help"])).unwrap(), Rewrite::Help);
    }

    #[test]
    fn test_help_keeps_original_arguments() {
        let args = os(&["--login-path=x", "--help"]);
        let parsed = ParsedArguments::parse(&args).unwrap();
        assert!(parsed.help);
        assert_eq!(parsed.login_path, None);
        assert_eq!(parsed.passthrough, args);
    }

    #[test]
    fn test_similar_tokens_pass_through() {
        let args = ["--login-paths", "-lclient", "--login", "-L"];
        assert_eq!(rewritten(&args), os(&args));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_tokens() {
        use std::os::unix::ffi::OsStringExt;

        let odd = OsString::from_vec(vec![b'c', 0xff, b'x']);
        let args = vec![OsString::from("-l"), odd.clone(), OsString::from("mysqld")];
        assert_eq!(rewrite(&args).unwrap(), Rewrite::Args(vec![OsString::from("mysqld"), odd.clone()]));

        let args = vec![odd.clone(), OsString::from("client")];
        assert_eq!(rewrite(&args).unwrap(), Rewrite::Args(args.clone()));
    }

    #[test]
    fn test_parsed_arguments_fields() {
        let parsed = ParsedArguments::parse(&os(&["-uroot", "-l", "client"])).unwrap();
        assert_eq!(
            parsed,
            ParsedArguments {
                login_path: Some(OsString::from("client")),
                help: false,
                passthrough: os(&["-uroot"]),
            }
        );
    }
}
