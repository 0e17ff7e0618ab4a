use nom::bytes::complete::{is_not, tag, take_until};
use nom::character::complete::{self, alpha1, char, space0};
use nom::combinator::{map_opt, recognize};
use nom::error::ParseError;
use nom::error::VerboseError;
use nom::sequence::{self, tuple};
use nom::{combinator, IResult};

const VCXPROJ_EXTENSION: &str = ".vcxproj";
const SECTION_END: &str = "EndGlobalSection";

/// C++ project declaration line
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Prj<'input> {
    pub name: &'input str,
    pub file: &'input str,
    pub id: &'input str,
}

/// Global section opening line i.e. `GlobalSection(Name) = stage`
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SectionBegin<'input> {
    pub name: &'input str,
    pub stage: &'input str,
}

impl<'input> Prj<'input> {
    /// Parses line like `Project("{TYPE}") = "Name", "Name.vcxproj", "{ID}"`.
    /// Leading whitespaces and anything after project id are ignored.
    /// Projects of any other type than `vcxproj` aren't recognized
    pub fn from_line(line: &'input str) -> Option<Self> {
        Prj::parse::<VerboseError<&str>>(line.trim_start())
            .ok()
            .map(|(_, prj)| prj)
    }

    fn parse<'a, E>(input: &'a str) -> IResult<&'a str, Prj<'a>, E>
    where
        E: ParseError<&'a str> + std::fmt::Debug,
    {
        let head = sequence::delimited(tag("Project("), quoted(guid), char(')'));
        let parser = tuple((
            head,
            sequence::delimited(space0, char('='), space0),
            quoted(text),
            comma,
            map_opt(quoted(text), |f: &str| f.strip_suffix(VCXPROJ_EXTENSION)),
            comma,
            quoted(guid),
        ));

        combinator::map(parser, |(_, _, name, _, file, _, id)| Prj {
            name,
            file,
            id,
        })(input)
    }
}

impl<'input> SectionBegin<'input> {
    pub fn from_line(line: &'input str) -> Option<Self> {
        SectionBegin::parse::<VerboseError<&str>>(line.trim())
            .ok()
            .filter(|(rest, _)| rest.is_empty())
            .map(|(_, begin)| begin)
    }

    #[must_use]
    pub fn is_section(&self, name: &str, stage: &str) -> bool {
        self.name == name && self.stage == stage
    }

    fn parse<'a, E>(input: &'a str) -> IResult<&'a str, SectionBegin<'a>, E>
    where
        E: ParseError<&'a str> + std::fmt::Debug,
    {
        let parser = sequence::separated_pair(
            sequence::delimited(tag("GlobalSection("), is_not("()"), char(')')),
            sequence::delimited(space0, char('='), space0),
            alpha1,
        );

        combinator::map(parser, |(name, stage)| SectionBegin { name, stage })(input)
    }
}

/// Whether line closes global section
#[must_use]
pub fn is_section_end(line: &str) -> bool {
    line.trim() == SECTION_END
}

fn quoted<'a, O, E, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
where
    E: ParseError<&'a str> + std::fmt::Debug,
    F: FnMut(&'a str) -> IResult<&'a str, O, E>,
{
    sequence::delimited(char('"'), inner, char('"'))
}

fn comma<'a, E>(input: &'a str) -> IResult<&'a str, char, E>
where
    E: ParseError<&'a str> + std::fmt::Debug,
{
    sequence::delimited(space0, char(','), space0)(input)
}

fn text<'a, E>(input: &'a str) -> IResult<&'a str, &'a str, E>
where
    E: ParseError<&'a str> + std::fmt::Debug,
{
    take_until("\"")(input)
}

fn guid<'a, E>(input: &'a str) -> IResult<&'a str, &'a str, E>
where
    E: ParseError<&'a str> + std::fmt::Debug,
{
    recognize(sequence::delimited(
        complete::char('{'),
        is_not("{}\""),
        complete::char('}'),
    ))(input)
}
