use std::{fmt::Display, str::SplitInclusive};

use crate::ast::{self, Prj, SectionBegin};

pub type Spanned<Tok, Loc> = (Loc, Tok, Loc);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tok<'a> {
    SectionBegin(SectionBegin<'a>),
    SectionEnd,
    Project(Prj<'a>),
    Line,
}

impl Display for Tok<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tok::SectionBegin(b) => write!(f, "SectionBegin({}, {})", b.name, b.stage)?,
            Tok::SectionEnd => write!(f, "SectionEnd")?,
            Tok::Project(p) => write!(f, "Project({}, {})", p.name, p.id)?,
            Tok::Line => write!(f, "Line")?,
        }
        Ok(())
    }
}

/// Line oriented solution lexer.
///
/// Solution file structure that matters here is line based: section markers and
/// project declarations always occupy their own lines. Every token spans whole line
/// including line break so that concatenating all spans gives the input back.
pub struct Lexer<'a> {
    lines: SplitInclusive<'a, char>,
    offset: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            lines: input.split_inclusive('\n'),
            offset: 0,
        }
    }

    fn classify(line: &'a str) -> Tok<'a> {
        if let Some(begin) = SectionBegin::from_line(line) {
            Tok::SectionBegin(begin)
        } else if ast::is_section_end(line) {
            Tok::SectionEnd
        } else if let Some(prj) = Prj::from_line(line) {
            Tok::Project(prj)
        } else {
            Tok::Line
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Spanned<Tok<'a>, usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        let start = self.offset;
        self.offset += line.len();
        Some((start, Lexer::classify(line), self.offset))
    }
}
