use crate::ast::{Prj, SectionBegin};
use crate::lex::{Lexer, Tok};

const UTF8_BOM: char = '\u{feff}';
const INDENT: &str = "\t\t";

/// Solution text split into verbatim parts and global sections.
/// Rendering untouched document gives exactly the input back
#[derive(Debug)]
pub struct Document<'a> {
    bom: bool,
    line_ending: &'static str,
    parts: Vec<Part<'a>>,
    projects: Vec<Prj<'a>>,
}

#[derive(Debug)]
enum Part<'a> {
    Verbatim(&'a str),
    Section(Section<'a>),
}

#[derive(Debug)]
struct Section<'a> {
    begin: SectionBegin<'a>,
    /// Section opening line including indentation and line break
    head: &'a str,
    body: Body<'a>,
    /// `EndGlobalSection` line including indentation and line break
    tail: &'a str,
}

#[derive(Debug)]
enum Body<'a> {
    Original(&'a str),
    Generated(String),
}

/// Splits solution content into [`Document`].
///
/// Section starts at `GlobalSection(Name) = stage` line and ends at the nearest
/// `EndGlobalSection` line. Section never closed stays verbatim text as well as
/// everything outside sections. UTF-8 BOM is skipped and restored on rendering.
#[must_use]
pub fn parse_str(contents: &str) -> Document<'_> {
    // Skip UTF-8 signature if necessary
    let (bom, input) = match contents.strip_prefix(UTF8_BOM) {
        Some(rest) => (true, rest),
        None => (false, contents),
    };
    let line_ending = if input.contains("\r\n") { "\r\n" } else { "\n" };

    let mut parts = Vec::new();
    let mut projects = Vec::new();
    let mut verbatim_start = 0;
    let mut open: Option<(SectionBegin, usize, usize)> = None;

    for (start, tok, end) in Lexer::new(input) {
        match tok {
            Tok::SectionBegin(begin) if open.is_none() => {
                if verbatim_start < start {
                    parts.push(Part::Verbatim(&input[verbatim_start..start]));
                }
                verbatim_start = start;
                open = Some((begin, start, end));
            }
            Tok::SectionEnd => {
                if let Some((begin, head_start, head_end)) = open.take() {
                    parts.push(Part::Section(Section {
                        begin,
                        head: &input[head_start..head_end],
                        body: Body::Original(&input[head_end..start]),
                        tail: &input[start..end],
                    }));
                    verbatim_start = end;
                }
            }
            Tok::Project(prj) => projects.push(prj),
            Tok::SectionBegin(_) | Tok::Line => {}
        }
    }

    if verbatim_start < input.len() {
        parts.push(Part::Verbatim(&input[verbatim_start..]));
    }

    Document {
        bom,
        line_ending,
        parts,
        projects,
    }
}

impl<'a> Document<'a> {
    /// All C++ project declarations in the order they appear in solution
    #[must_use]
    pub fn projects(&self) -> &[Prj<'a>] {
        &self.projects
    }

    /// Replaces body of the first section with name and stage specified.
    /// Every line is indented with two tabs and terminated by document's line ending.
    /// Returns false and leaves document untouched if there is no such section
    pub fn replace(&mut self, name: &str, stage: &str, lines: &[String]) -> bool {
        let line_ending = self.line_ending;
        let section = self.parts.iter_mut().find_map(|p| match p {
            Part::Section(s) if s.begin.is_section(name, stage) => Some(s),
            _ => None,
        });

        match section {
            Some(s) => {
                let body = lines.iter().fold(String::new(), |mut body, line| {
                    body.push_str(INDENT);
                    body.push_str(line);
                    body.push_str(line_ending);
                    body
                });
                s.body = Body::Generated(body);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut result = String::new();
        if self.bom {
            result.push(UTF8_BOM);
        }
        for part in &self.parts {
            match part {
                Part::Verbatim(s) => result.push_str(s),
                Part::Section(s) => {
                    result.push_str(s.head);
                    match &s.body {
                        Body::Original(b) => result.push_str(b),
                        Body::Generated(b) => result.push_str(b),
                    }
                    result.push_str(s.tail);
                }
            }
        }
        result
    }

    /// Names of all global sections found
    pub fn sections(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.parts.iter().filter_map(|p| match p {
            Part::Section(s) => Some(s.begin.name),
            Part::Verbatim(_) => None,
        })
    }
}
