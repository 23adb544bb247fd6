use loginpath_shim::config::ShimConfig;
use loginpath_shim::error::{format_error_with_color, get_exit_code};
use loginpath_shim::{logging, shim};
use std::env;
use std::io::IsTerminal;
use std::process;

fn main() {
    // Initialize logger with default verbosity (warn level)
    // This will respect RUST_LOG environment variable if set
    logging::setup_logger(0);

    let args = env::args_os().skip(1).collect();

    // A broken user config must not break callers of my_print_defaults
    let config = ShimConfig::load_or_default();
    let result = shim::run(args, &config);

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprint!(
                "{}",
                format_error_with_color(&e, std::io::stderr().is_terminal())
            );
            process::exit(get_exit_code(&e));
        }
    }
}
