use std::io;

use clap::{ArgMatches, Command, arg, value_parser};
use clap_complete::{Shell, generate};

/// `completion` subcommand every tool provides
#[must_use]
pub fn completion_subcommand() -> Command {
    Command::new("completion")
        .about("Generate the autocompletion script for the specified shell")
        .arg(
            arg!([generator])
                .value_parser(value_parser!(Shell))
                .required(true)
                .index(1),
        )
}

/// Writes completion script of the command specified into stdout
pub fn print_completions(mut cmd: Command, matches: &ArgMatches) {
    let bin_name = cmd.get_name().to_string();
    if let Some(generator) = matches.get_one::<Shell>("generator") {
        generate(*generator, &mut cmd, bin_name, &mut io::stdout());
    }
}
