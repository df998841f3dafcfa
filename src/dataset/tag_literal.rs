//! Parser for text-encoded tag lists, e.g. `['power metal', "speed metal"]`.

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not},
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, opt, value},
    multi::separated_list1,
    sequence::{delimited, pair, terminated},
    Finish, IResult,
};

use crate::types::TagList;

/// Parse a bracketed list of quoted strings.
///
/// Accepts single or double quotes, a trailing comma, and the escapes
/// `\\`, `\'`, `\"`, `\n`, `\t`. Anything else is rejected with a short
/// description of where parsing stopped.
pub fn parse_tag_literal(input: &str) -> Result<TagList, String> {
    if input.trim().is_empty() {
        return Err("empty tag field".into());
    }
    all_consuming(delimited(multispace0, tag_list, multispace0))(input)
        .finish()
        .map(|(_, tags)| tags)
        .map_err(|err| {
            let near: String = err.input.chars().take(24).collect();
            format!("malformed tag list near {near:?} ({:?})", err.code)
        })
}

fn tag_list(input: &str) -> IResult<&str, TagList> {
    delimited(
        pair(char('['), multispace0),
        map(
            opt(terminated(
                separated_list1(comma, alt((single_quoted, double_quoted))),
                opt(comma),
            )),
            Option::unwrap_or_default,
        ),
        pair(multispace0, char(']')),
    )(input)
}

fn comma(input: &str) -> IResult<&str, char> {
    delimited(multispace0, char(','), multispace0)(input)
}

fn single_quoted(input: &str) -> IResult<&str, String> {
    quoted_with(input, '\'', "\\'")
}

fn double_quoted(input: &str) -> IResult<&str, String> {
    quoted_with(input, '"', "\\\"")
}

fn quoted_with<'a>(input: &'a str, quote: char, normal: &'static str) -> IResult<&'a str, String> {
    // `escaped_transform` rejects an empty body, hence the `opt`.
    delimited(
        char(quote),
        map(
            opt(escaped_transform(is_not(normal), '\\', escape)),
            Option::unwrap_or_default,
        ),
        char(quote),
    )(input)
}

fn escape(input: &str) -> IResult<&str, &str> {
    alt((
        value("\\", char('\\')),
        value("'", char('\'')),
        value("\"", char('"')),
        value("\n", char('n')),
        value("\t", char('t')),
    ))(input)
}
