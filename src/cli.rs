// File: ./src/cli.rs
//! Command-line flags and help output for the `tasklet` binary.
use crate::command::Operation;
use crate::model::datetime::ACCEPTED_FORMATS;
use anyhow::Result;
use std::path::PathBuf;
use strum::IntoEnumIterator;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub help: bool,
    pub root: Option<PathBuf>,
    pub no_save: bool,
}

/// Parses flags, excluding the program name.
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" | "help" => parsed.help = true,
            "-r" | "--root" => {
                let path = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("{} requires a path", arg))?;
                parsed.root = Some(PathBuf::from(path));
            }
            "--no-save" => parsed.no_save = true,
            other => return Err(anyhow::anyhow!("Unknown argument: {}", other)),
        }
    }
    Ok(parsed)
}

pub fn print_help(binary_name: &str) {
    println!(
        "Tasklet v{} - A small, fast line-oriented task tracker",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] [--no-save]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config, data and logs.");
    println!("    --no-save             Keep this session's changes in memory only.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("COMMANDS (one per line):");
    for line in command_usage() {
        println!("    {}", line);
    }
    println!();
    println!("DATE/TIME EXAMPLES:");
    println!("    {}", ACCEPTED_FORMATS);
    println!();
    println!("ENVIRONMENT:");
    println!("    TASKLET_ROOT          Same as --root when the flag is not given.");
    println!("    TASKLET_LOG           Override the log level (off, error, warn, info, debug, trace).");
}

/// One usage line per known operation, in declaration order.
pub fn command_usage() -> Vec<&'static str> {
    Operation::iter().filter_map(|op| op.usage()).collect()
}
