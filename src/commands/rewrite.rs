use crate::error::Result;
use crate::shim::args::{Rewrite, rewrite};
use std::ffi::OsString;

/// Dry run of the argument shim: prints what a MariaDB `my_print_defaults`
/// would receive, one argument per line.
pub struct RewriteCommand;

impl RewriteCommand {
    pub fn new() -> Result<Self> {
        Ok(Self)
    }

    pub fn execute(&self, args: &[OsString]) -> Result<()> {
        for line in render(rewrite(args)?) {
            println!("{line}");
        }
        Ok(())
    }
}

fn render(rewrite: Rewrite) -> Vec<String> {
    match rewrite {
        Rewrite::Help => vec!["(help requested: arguments forwarded unchanged)".to_string()],
        Rewrite::Args(args) => args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_args() {
        let args: Vec<OsString> = ["-uroot", "-l", "client"].iter().map(OsString::from).collect();
        assert_eq!(render(rewrite(&args).unwrap()), vec!["-uroot", "client"]);
    }

    #[test]
    fn test_render_help() {
        let lines = render(Rewrite::Help);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("help requested"));
    }
}
