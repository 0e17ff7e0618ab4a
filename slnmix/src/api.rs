use std::fmt::{self, Display};

use crate::ast::Prj;

/// Project file name suffix that marks 64-bit project variant
pub const X64_SUFFIX: &str = "_x64";

/// Represent C++ project declared inside solution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project<'a> {
    /// Name displayed in Solution Explorer
    pub name: &'a str,
    /// Project file name (or relative path) without `.vcxproj` extension
    pub file: &'a str,
    /// Project GUID including braces
    pub id: &'a str,
}

/// Concrete platform a project is built for
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    Win32,
    X64,
}

/// Solution configuration names generated for every project
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Configuration {
    Debug,
    Release,
}

/// Project configuration tag
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    /// Selects project configuration used when solution configuration is active
    ActiveCfg,
    /// Defines project configuration buildable
    Build,
}

/// Unified solution platform all projects are consolidated under
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Layout {
    #[default]
    MixedPlatforms,
    WinAll,
}

/// Project together with the platform it resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping<'a> {
    pub project: Project<'a>,
    pub platform: Platform,
}

/// Outcome of a single solution rewrite
#[derive(Debug, Clone)]
pub struct Rewrite<'a> {
    /// Path to solution file. Empty when rewriting in memory content
    pub path: &'a str,
    pub layout: Layout,
    /// Projects in the order they were declared in solution
    pub mappings: Vec<Mapping<'a>>,
    /// Names of global sections which body was regenerated
    pub replaced: Vec<&'static str>,
    /// Whether resulting content differs from the original one
    pub changed: bool,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Win32, Platform::X64];

    /// Classifies project by its file name. Only exact, case sensitive `_x64` suffix means x64
    #[must_use]
    pub fn of(file: &str) -> Self {
        if file.ends_with(X64_SUFFIX) {
            Platform::X64
        } else {
            Platform::Win32
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Win32 => "WIN32",
            Platform::X64 => "x64",
        }
    }
}

impl Configuration {
    pub const ALL: [Configuration; 2] = [Configuration::Debug, Configuration::Release];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Configuration::Debug => "Debug",
            Configuration::Release => "Release",
        }
    }
}

impl Tag {
    pub const ALL: [Tag; 2] = [Tag::ActiveCfg, Tag::Build];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::ActiveCfg => "ActiveCfg",
            Tag::Build => "Build.0",
        }
    }
}

impl Layout {
    /// Solution platform label written into solution file
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Layout::MixedPlatforms => "Mixed Platforms",
            Layout::WinAll => "WINALL",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl<'a> From<&Prj<'a>> for Project<'a> {
    fn from(p: &Prj<'a>) -> Self {
        Self {
            name: p.name,
            file: p.file,
            id: p.id,
        }
    }
}

impl<'a> Mapping<'a> {
    #[must_use]
    pub fn new(project: Project<'a>) -> Self {
        let platform = Platform::of(project.file);
        Self { project, platform }
    }
}

impl<'a> Rewrite<'a> {
    #[must_use]
    pub fn new(layout: Layout, projects: Vec<Project<'a>>) -> Self {
        Self {
            path: "",
            layout,
            mappings: projects.into_iter().map(Mapping::new).collect(),
            replaced: vec![],
            changed: false,
        }
    }

    /// Iterates mappings resolved to platform specified
    pub fn iterate_platform(&self, platform: Platform) -> impl Iterator<Item = &Mapping<'a>> {
        self.mappings.iter().filter(move |m| m.platform == platform)
    }
}
