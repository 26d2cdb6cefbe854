//! Command-line definition

use clap::{value_parser, Arg, ArgAction, Command};

fn tree_arg() -> Arg {
    Arg::new("tree")
        .required(true)
        .help("Network tree JSON file, or - for stdin")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

/// Build the `refnet` command
#[must_use]
pub fn build_command() -> Command {
    Command::new("refnet")
        .version(refnet_core::VERSION)
        .about("Inspect campaign referral networks")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (repeatable)"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("stats")
                .about("Network statistics")
                .arg(tree_arg())
                .arg(
                    Arg::new("role")
                        .long("role")
                        .action(ArgAction::Append)
                        .help("Additional role to count (repeatable)"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("classes")
                .about("Network class of every member")
                .arg(tree_arg())
                .arg(
                    Arg::new("class")
                        .long("class")
                        .value_parser(value_parser!(u32))
                        .help("Only list members of this class"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("path")
                .about("Ids from the root to a member")
                .arg(tree_arg())
                .arg(Arg::new("id").required(true).help("Target member id")),
        )
        .subcommand(
            Command::new("filter")
                .about("Restrict the tree to one campaign")
                .arg(tree_arg())
                .arg(
                    Arg::new("campaign")
                        .long("campaign")
                        .required(true)
                        .help("Campaign id, or the all-campaigns value"),
                ),
        )
        .subcommand(
            Command::new("view")
                .about("Dashboard view: filtered, classified, with stats and expansion")
                .arg(tree_arg())
                .arg(Arg::new("campaign").long("campaign").help("Campaign selection"))
                .arg(
                    Arg::new("class")
                        .long("class")
                        .value_parser(value_parser!(u32))
                        .help("Class filter"),
                )
                .arg(Arg::new("user").long("user").help("Current user id"))
                .arg(Arg::new("users").long("users").help("User records JSON file"))
                .arg(
                    Arg::new("campaigns")
                        .long("campaigns")
                        .help("Campaign records JSON file"),
                )
                .arg(
                    Arg::new("concurrent")
                        .long("concurrent")
                        .value_parser(value_parser!(usize))
                        .help("Resolve records with this many lookups in flight"),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Check invitedBy against nesting")
                .arg(tree_arg()),
        )
}
