use crate::core::Value;
use rust_decimal::Decimal;
use std::str::FromStr;
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while},
    character::complete::{alpha1, char, digit1, multispace0, satisfy},
    combinator::{map, map_res, not, opt, recognize},
    sequence::{delimited, pair, terminated, tuple},
    IResult,
};

pub fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

pub fn identifier(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            alt((alpha1, tag("_"))),
            take_while(|c: char| c.is_alphanumeric() || c == '_'),
        )),
        |s: &str| s.to_string(),
    )(input)
}

/// Case-insensitive keyword that must end at a word boundary,
/// so `or` does not match the start of `organizer`
pub fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    terminated(
        tag_no_case(word),
        not(satisfy(|c: char| c.is_alphanumeric() || c == '_')),
    )
}

pub fn string_literal(input: &str) -> IResult<&str, String> {
    map(
        alt((
            delimited(char('\''), take_while(|c| c != '\''), char('\'')),
            delimited(char('"'), take_while(|c| c != '"'), char('"')),
        )),
        |s: &str| s.to_string(),
    )(input)
}

// Integers stay integers; anything with a fraction is kept exact as a decimal
fn number(input: &str) -> IResult<&str, Value> {
    map_res(
        recognize(tuple((opt(char('-')), digit1, opt(pair(char('.'), digit1))))),
        |s: &str| -> Result<Value, String> {
            if s.contains('.') {
                Decimal::from_str(s).map(Value::Numeric).map_err(|e| e.to_string())
            } else {
                s.parse::<i64>().map(Value::Integer).map_err(|e| e.to_string())
            }
        },
    )(input)
}

pub fn value(input: &str) -> IResult<&str, Value> {
    alt((
        map(string_literal, Value::Text),
        number,
        map(keyword("true"), |_| Value::Boolean(true)),
        map(keyword("false"), |_| Value::Boolean(false)),
    ))(input)
}
