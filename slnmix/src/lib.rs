/*!
A library for rewriting Microsoft Visual Studio solution file so that
32-bit and 64-bit C++ projects are built together under a single solution platform.

Projects which file name ends with `_x64` are built for `x64`, all others for `WIN32`.

## Example: rewriting solution from [&str]

```
use slnmix::{api::Layout, rewrite_str};

const SOLUTION: &str = r#"
Microsoft Visual Studio Solution File, Format Version 12.00
Project("{8BC9CEB8-8B4A-11D0-8D11-00A0C91BC942}") = "Foo_x64", "Foo_x64.vcxproj", "{11111111-1111-1111-1111-111111111111}"
EndProject
Project("{8BC9CEB8-8B4A-11D0-8D11-00A0C91BC942}") = "Bar", "Bar.vcxproj", "{22222222-2222-2222-2222-222222222222}"
EndProject
Global
	GlobalSection(SolutionConfigurationPlatforms) = preSolution
		Debug|Win32 = Debug|Win32
	EndGlobalSection
	GlobalSection(ProjectConfigurationPlatforms) = postSolution
	EndGlobalSection
EndGlobal
"#;

let (content, rewrite) = rewrite_str(SOLUTION, Layout::MixedPlatforms);
assert!(rewrite.changed);
assert_eq!(rewrite.mappings.len(), 2);
assert!(content.contains("Debug|Mixed Platforms = Debug|Mixed Platforms"));
assert!(content.contains("{11111111-1111-1111-1111-111111111111}.Release|Mixed Platforms.Build.0 = Release|x64"));
assert!(content.contains("{22222222-2222-2222-2222-222222222222}.Debug|Mixed Platforms.ActiveCfg = Debug|WIN32"));
```
*/

#![warn(unused_extern_crates)]
#![allow(clippy::missing_errors_doc)]
use std::fs;

use api::{Layout, Project, Rewrite};
use itertools::Itertools;
use config::{
    POST_SOLUTION, PRE_SOLUTION, PROJECT_CONFIGURATION_PLATFORMS, SOLUTION_CONFIGURATION_PLATFORMS,
};
use miette::{Context, IntoDiagnostic};

pub mod api;
mod ast;
pub mod config;
mod lex;
mod parser;

#[cfg(test)] // <-- not needed in integration tests
extern crate rstest;

/// Consume provides [`Rewrite`] consumer
pub trait Consume {
    /// Called in case of successful rewrite
    fn ok(&mut self, rewrite: &Rewrite);
    /// Called on error
    fn err(&self, path: &str);
}

/// `rewrite_file` rewrites single solution file specified by path in place.
/// No backup is created.
///
/// # Errors
///
/// This function will return an error if file content cannot be read into memory
/// or the result cannot be written back.
pub fn rewrite_file(path: &str, layout: Layout, consumer: &mut dyn Consume) -> miette::Result<()> {
    let contents = read(path, consumer)?;
    let (rewritten, mut rewrite) = rewrite_str(&contents, layout);
    rewrite.path = path;

    fs::write(path, rewritten)
        .into_diagnostic()
        .wrap_err_with(|| {
            consumer.err(path);
            format!("Failed to write solution to path: {path}")
        })?;
    log::info!("{path} written");

    consumer.ok(&rewrite);
    Ok(())
}

/// `preview_file` does the same as [`rewrite_file`] but leaves the file untouched
/// and returns rewritten content instead.
///
/// # Errors
///
/// This function will return an error if file content cannot be read into memory.
pub fn preview_file(
    path: &str,
    layout: Layout,
    consumer: &mut dyn Consume,
) -> miette::Result<String> {
    let contents = read(path, consumer)?;
    let (rewritten, mut rewrite) = rewrite_str(&contents, layout);
    rewrite.path = path;
    consumer.ok(&rewrite);
    Ok(rewritten)
}

/// `rewrite_str` rewrites solution content from `&str` and returns new content together with [`Rewrite`]
/// describing what has been done.
///
/// Both `SolutionConfigurationPlatforms` and `ProjectConfigurationPlatforms` sections are regenerated.
/// Missing section is not an error, it's just left as is. The function is idempotent.
#[must_use]
pub fn rewrite_str(contents: &str, layout: Layout) -> (String, Rewrite<'_>) {
    let mut document = parser::parse_str(contents);
    let projects = document.projects().iter().map(Project::from).collect();
    let mut rewrite = Rewrite::new(layout, projects);
    log::debug!(
        "{} C++ projects found. Sections: {}",
        rewrite.mappings.len(),
        document.sections().join(", ")
    );

    let replacements = [
        (
            SOLUTION_CONFIGURATION_PLATFORMS,
            PRE_SOLUTION,
            config::solution_platforms(layout),
        ),
        (
            PROJECT_CONFIGURATION_PLATFORMS,
            POST_SOLUTION,
            config::project_platforms(layout, &rewrite.mappings),
        ),
    ];

    for (name, stage, lines) in replacements {
        if document.replace(name, stage, &lines) {
            rewrite.replaced.push(name);
        } else {
            log::debug!("{name} = {stage} section not found. Left as is");
        }
    }

    let rewritten = document.render();
    rewrite.changed = rewritten != contents;
    (rewritten, rewrite)
}

/// `projects` returns all C++ projects declared in solution content in the order of declaration
#[must_use]
pub fn projects(contents: &str) -> Vec<Project<'_>> {
    parser::parse_str(contents)
        .projects()
        .iter()
        .map(Project::from)
        .collect()
}

fn read(path: &str, consumer: &dyn Consume) -> miette::Result<String> {
    fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| {
            consumer.err(path);
            format!("Failed to read content from path: {path}")
        })
}
