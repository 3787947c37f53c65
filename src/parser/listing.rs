use super::common::{identifier, keyword, ws};
use crate::query::{ReportSort, SortDirection};
use nom::{
    branch::alt,
    character::complete::char,
    combinator::{map, opt},
    multi::separated_list1,
    sequence::pair,
    IResult,
};

fn direction(input: &str) -> IResult<&str, SortDirection> {
    alt((
        map(alt((keyword("ascending"), keyword("asc"))), |_| SortDirection::Asc),
        map(alt((keyword("descending"), keyword("desc"))), |_| SortDirection::Desc),
    ))(input)
}

// field [asc|desc], ...
pub fn sort_list(input: &str) -> IResult<&str, Vec<ReportSort>> {
    separated_list1(
        ws(char(',')),
        map(pair(ws(identifier), opt(ws(direction))), |(field, dir)| ReportSort {
            field,
            direction: dir.unwrap_or_default(),
        }),
    )(input)
}

// field, field, ...  or  *  for every column
pub fn column_list(input: &str) -> IResult<&str, Vec<String>> {
    alt((
        map(ws(char('*')), |_| Vec::new()),
        separated_list1(ws(char(',')), ws(identifier)),
    ))(input)
}
