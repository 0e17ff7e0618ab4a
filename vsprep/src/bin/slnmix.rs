use std::{path::Path, time::Instant};

use clap::{ArgAction, ArgMatches, Command, arg, crate_authors, crate_version};
use slnmix::api::Layout;
use vsprep::{cli, mix::Mix, ux};

const PATH: &str = "PATH";
const DEFAULT_SOLUTION: &str = "all.sln";

fn main() {
    vsprep::init_logging();
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("completion", cmd)) => cli::print_completions(build_cli(), cmd),
        _ => mix(&matches),
    }
}

fn mix(matches: &ArgMatches) {
    let path = matches
        .get_one::<String>(PATH)
        .map_or(DEFAULT_SOLUTION, String::as_str);
    let layout = match matches.get_one::<String>("layout").map(String::as_str) {
        Some("winall") => Layout::WinAll,
        _ => Layout::MixedPlatforms,
    };
    let dry_run = matches.get_flag("dry-run");

    let now = Instant::now();
    let mut consumer = Mix::new();
    let result = if dry_run {
        slnmix::preview_file(path, layout, &mut consumer).map(|content| print!("{content}"))
    } else {
        slnmix::rewrite_file(path, layout, &mut consumer)
    };

    if let Err(e) = result {
        eprintln!("{e:?}");
        std::process::exit(failure_code(path));
    }

    if !dry_run {
        print!("{consumer}");
        ux::print_elapsed(now);
    }
}

/// Missing solution means no input. Existing one failed to be read or written
fn failure_code(path: &str) -> exitcode::ExitCode {
    if Path::new(path).is_file() {
        exitcode::IOERR
    } else {
        exitcode::NOINPUT
    }
}

fn build_cli() -> Command {
    Command::new("slnmix")
        .version(crate_version!())
        .author(crate_authors!("\n"))
        .about("Consolidates x86 and x64 C++ projects of Visual Studio solution under single solution platform")
        .args_conflicts_with_subcommands(true)
        .arg(
            arg!([PATH])
                .help("Sets solution path to rewrite")
                .default_value(DEFAULT_SOLUTION),
        )
        .arg(
            arg!(-l --layout <LAYOUT>)
                .required(false)
                .value_parser(["mixed", "winall"])
                .default_value("mixed")
                .help("Solution platform label: 'Mixed Platforms' or 'WINALL'"),
        )
        .arg(
            arg!(-n --"dry-run")
                .required(false)
                .action(ArgAction::SetTrue)
                .help("Print rewritten solution to stdout and leave the file untouched"),
        )
        .subcommand(cli::completion_subcommand())
}
