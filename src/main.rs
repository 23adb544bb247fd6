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

use clap::{Parser, Subcommand};
use loginpath_shim::commands::detect::DetectCommand;
use loginpath_shim::commands::rewrite::RewriteCommand;
use loginpath_shim::commands::which::WhichCommand;
use loginpath_shim::config::ShimConfig;
use loginpath_shim::error::{Result, format_error_chain, get_exit_code};
use loginpath_shim::logging;
use std::ffi::OsString;

#[derive(Parser)]
#[command(name = "loginpath-shim")]
#[command(
    author,
    version,
    about = "Inspect how the my_print_defaults wrapper resolves and rewrites a call",
    long_about = None
)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which my_print_defaults the wrapper would run
    #[command(visible_alias = "w")]
    Which {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Locate my_print_defaults and report its distribution with the evidence used
    #[command(visible_alias = "d")]
    Detect {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show the arguments a MariaDB my_print_defaults would receive
    #[command(long_about = "Show the arguments a MariaDB my_print_defaults would receive

Nothing is executed. Put `--` before arguments that start with a dash.

Examples:
  loginpath-shim rewrite -- --login-path=client mysqld
  loginpath-shim rewrite -- -s -l backup client")]
    Rewrite {
        /// Arguments as they would be passed to my_print_defaults
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
        args: Vec<OsString>,
    },
}

fn main() {
    let cli = Cli::parse();

    logging::setup_logger(cli.verbose);

    let config = match ShimConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error_chain(&e));
            std::process::exit(get_exit_code(&e));
        }
    };

    let result: Result<()> = (|| match cli.command {
        Commands::Which { json } => {
            let command = WhichCommand::new(&config)?;
            command.execute(json)
        }
        Commands::Detect { json } => {
            let command = DetectCommand::new(&config)?;
            command.execute(json)
        }
        Commands::Rewrite { args } => {
            let command = RewriteCommand::new()?;
            command.execute(&args)
        }
    })();

    if let Err(e) = result {
        eprintln!("{}", format_error_chain(&e));
        std::process::exit(get_exit_code(&e));
    }
}
