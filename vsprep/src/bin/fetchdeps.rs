use std::{path::Path, time::Instant};

use clap::{ArgMatches, Command, arg, crate_authors, crate_version};
use vsprep::{
    cli,
    fetch::{Fetcher, Http},
    manifest::Manifest,
    ux,
};

const DEFAULT_ROOT: &str = ".";

fn main() {
    vsprep::init_logging();
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("completion", cmd)) => cli::print_completions(build_cli(), cmd),
        _ => {
            if let Err(e) = fetch(&matches) {
                eprintln!("{e:?}");
                std::process::exit(exitcode::SOFTWARE);
            }
        }
    }
}

fn fetch(matches: &ArgMatches) -> miette::Result<()> {
    let manifest = match matches.get_one::<String>("manifest") {
        Some(path) => Manifest::from_path(path)?,
        None => Manifest::builtin(),
    };
    let root = matches
        .get_one::<String>("root")
        .map_or(DEFAULT_ROOT, String::as_str);
    let manifest = manifest.rooted(Path::new(root));
    log::info!("{} dependencies to fetch", manifest.len());

    let now = Instant::now();
    let fetcher = Fetcher::new(Http::new()?);
    let fetched = fetcher.fetch_all(&manifest, |f| println!("{}", f.url))?;

    println!();
    println!("{}", ux::fetched_table(&fetched));
    ux::print_elapsed(now);
    Ok(())
}

fn build_cli() -> Command {
    Command::new("fetchdeps")
        .version(crate_version!())
        .author(crate_authors!("\n"))
        .about("Downloads and extracts third party dependencies of Windows build")
        .args_conflicts_with_subcommands(true)
        .arg(
            arg!(-m --manifest <FILE>)
                .required(false)
                .help("JSON dependencies manifest. Built in dependencies are used if not set"),
        )
        .arg(
            arg!(-r --root <DIR>)
                .required(false)
                .default_value(DEFAULT_ROOT)
                .help("Source tree root relative destinations are resolved against"),
        )
        .subcommand(cli::completion_subcommand())
}
