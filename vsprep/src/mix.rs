use std::fmt::Display;

use comfy_table::{Cell, Color};
use crossterm::style::Stylize;
use itertools::Itertools;
use slnmix::{
    Consume,
    api::{Layout, Platform, Rewrite},
};

use crate::ux;

/// Project row as it is displayed
struct Row {
    name: String,
    file: String,
    id: String,
    platform: Platform,
}

/// Collects rewritten solutions to display projects and the platforms they were mapped to
pub struct Mix {
    solutions: Vec<Solution>,
}

struct Solution {
    path: String,
    layout: Layout,
    rows: Vec<Row>,
    counts: Vec<(Platform, usize)>,
    replaced: Vec<&'static str>,
    changed: bool,
}

impl Mix {
    #[must_use]
    pub fn new() -> Self {
        Self { solutions: vec![] }
    }
}

impl Default for Mix {
    fn default() -> Self {
        Self::new()
    }
}

impl Consume for Mix {
    fn ok(&mut self, rewrite: &Rewrite) {
        let rows = rewrite
            .mappings
            .iter()
            .map(|m| Row {
                name: m.project.name.to_owned(),
                file: m.project.file.to_owned(),
                id: m.project.id.to_owned(),
                platform: m.platform,
            })
            .collect();

        let counts = Platform::ALL
            .iter()
            .map(|p| (*p, rewrite.iterate_platform(*p).count()))
            .collect();

        self.solutions.push(Solution {
            path: rewrite.path.to_owned(),
            layout: rewrite.layout,
            rows,
            counts,
            replaced: rewrite.replaced.clone(),
            changed: rewrite.changed,
        });
    }

    fn err(&self, path: &str) {
        crate::err(path);
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, " {}", ux::styled_path(&self.path))?;

        if self.rows.is_empty() {
            writeln!(f, " {}", "No C++ projects found".dark_yellow())?;
        } else {
            let mut table = ux::new_table();
            table.set_header(ux::header(["Project", "File", "Id", "Platform"]));
            for row in &self.rows {
                let color = match row.platform {
                    Platform::Win32 => Color::Cyan,
                    Platform::X64 => Color::Magenta,
                };
                table.add_row(vec![
                    Cell::new(&row.name),
                    Cell::new(&row.file),
                    Cell::new(&row.id),
                    Cell::new(row.platform).fg(color),
                ]);
            }
            writeln!(f, "{table}")?;
        }

        let counts = self
            .counts
            .iter()
            .map(|(platform, count)| format!("{platform}: {count}"))
            .join(", ");
        writeln!(f, " {} {counts}", format!("{}", self.layout).bold())?;

        if self.replaced.is_empty() {
            writeln!(
                f,
                " {}",
                "No platform sections found. Solution left as is".dark_yellow()
            )?;
        } else if self.changed {
            writeln!(f, " {} {}", "Rewritten:".dark_green(), self.replaced.join(", "))?;
        } else {
            writeln!(f, " {}", "Already up to date".dark_green())?;
        }
        Ok(())
    }
}

impl Display for Mix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for solution in &self.solutions {
            write!(f, "{solution}")?;
        }
        writeln!(f)
    }
}
