use std::time::{Duration, Instant};

use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, presets};
use crossterm::style::{self, Stylize};
use num_format::{Locale, ToFormattedString};

use crate::fetch::Fetched;

/// Borderless table all output is printed with
#[must_use]
pub fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Disabled);
    table
}

#[must_use]
pub fn header<I: IntoIterator<Item = &'static str>>(titles: I) -> Vec<Cell> {
    titles
        .into_iter()
        .map(|t| Cell::new(t).add_attribute(Attribute::Bold))
        .collect()
}

#[must_use]
pub fn styled_path(path: &str) -> style::StyledContent<&str> {
    style::style(path)
        .with(style::Color::Rgb {
            r: 0xAA,
            g: 0xAA,
            b: 0xAA,
        })
        .bold()
}

pub fn print_elapsed(started: Instant) {
    let duration = started.elapsed().as_millis();
    let duration = Duration::from_millis(u64::try_from(duration).unwrap_or(u64::MAX));
    println!("{:>2} {}", "elapsed:", humantime::format_duration(duration));
}

/// Table of fetched dependencies: url, archive kind and downloaded size
#[must_use]
pub fn fetched_table(fetched: &[Fetched]) -> Table {
    let mut table = new_table();
    table.set_header(header(["Url", "Archive", "Size", "Destination"]));
    for f in fetched {
        let kind = match f.kind {
            Some(k) => Cell::new(k).fg(Color::Green),
            None => Cell::new("skipped").fg(Color::DarkYellow),
        };
        table.add_row(vec![
            Cell::new(f.url.as_str()),
            kind,
            Cell::new(f.bytes.to_formatted_string(&Locale::en)).set_alignment(CellAlignment::Right),
            Cell::new(f.destination.display()),
        ]);
    }
    table
}
