//! Argument definitions and value parsers

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

/// One `--set IDX:KEY=VALUE` edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub strategy: usize,
    pub key: String,
    pub value: String,
}

/// Parse `IDX:KEY=VALUE`; the value may itself contain `:` or `=`
///
/// # Errors
/// Returns a message naming the malformed part
pub fn parse_assignment(s: &str) -> Result<Assignment, String> {
    let (index, rest) = s
        .split_once(':')
        .ok_or_else(|| format!("expected IDX:KEY=VALUE, got {s:?}"))?;
    let strategy = index
        .trim()
        .parse()
        .map_err(|_| format!("invalid strategy index {index:?}"))?;
    let (key, value) = rest
        .split_once('=')
        .ok_or_else(|| format!("missing '=' in {rest:?}"))?;
    Ok(Assignment {
        strategy,
        key: key.trim().to_string(),
        value: value.trim().to_string(),
    })
}

fn files_arg() -> Arg {
    Arg::new("files")
        .required(true)
        .num_args(1..)
        .value_parser(value_parser!(PathBuf))
        .help("Strategy export files; indices run across files in order")
}

fn selection_args() -> [Arg; 2] {
    [
        Arg::new("baseline")
            .long("baseline")
            .default_value("0")
            .value_parser(value_parser!(usize))
            .help("Index of the baseline strategy"),
        Arg::new("select")
            .long("select")
            .value_delimiter(',')
            .action(ArgAction::Append)
            .value_parser(value_parser!(usize))
            .help("Strategy indices to compare, comma separated"),
    ]
}

fn history_dir_arg(required: bool) -> Arg {
    Arg::new("history-dir")
        .long("history-dir")
        .required(required)
        .value_parser(value_parser!(PathBuf))
        .help("Directory holding the history log")
}

/// Full command-line definition
#[must_use]
pub fn command() -> Command {
    Command::new("stratcmp")
        .version(crate::VERSION)
        .about("Compare, edit and track trading strategy exports")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML session configuration"),
        )
        .subcommand(
            Command::new("tree")
                .about("Print folders and strategies with their indices")
                .arg(files_arg()),
        )
        .subcommand(
            Command::new("compare")
                .about("Print the parameter diff table")
                .arg(files_arg())
                .args(selection_args())
                .arg(
                    Arg::new("only-diff")
                        .long("only-diff")
                        .action(ArgAction::SetTrue)
                        .help("Hide rows where every strategy matches the baseline"),
                ),
        )
        .subcommand(
            Command::new("edit")
                .about("Apply edits, save a history block and print the command scripts")
                .arg(files_arg())
                .args(selection_args())
                .arg(
                    Arg::new("set")
                        .long("set")
                        .required(true)
                        .action(ArgAction::Append)
                        .value_parser(parse_assignment)
                        .help("Edit as IDX:KEY=VALUE; repeatable"),
                )
                .arg(history_dir_arg(false))
                .arg(
                    Arg::new("out-dir")
                        .long("out-dir")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the edited documents into this directory"),
                ),
        )
        .subcommand(
            Command::new("history")
                .about("Inspect or prune the saved history")
                .subcommand_required(true)
                .subcommand(
                    Command::new("list")
                        .about("Print every block with its scripts")
                        .arg(history_dir_arg(true)),
                )
                .subcommand(
                    Command::new("remove")
                        .about("Delete one block by position")
                        .arg(
                            Arg::new("position")
                                .required(true)
                                .value_parser(value_parser!(usize))
                                .help("Block position, 0 = oldest"),
                        )
                        .arg(history_dir_arg(true)),
                )
                .subcommand(
                    Command::new("clear")
                        .about("Delete every block")
                        .arg(history_dir_arg(true)),
                ),
        )
}
