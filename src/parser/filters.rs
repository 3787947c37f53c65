use super::common::{identifier, keyword, value, ws};
use crate::core::Value;
use crate::query::{FilterOperator, LogicalOperator, ReportFilter};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::map,
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

fn value_list(input: &str) -> IResult<&str, Value> {
    map(
        delimited(
            ws(char('(')),
            separated_list1(ws(char(',')), ws(value)),
            ws(char(')')),
        ),
        Value::List,
    )(input)
}

fn comparison(input: &str) -> IResult<&str, FilterOperator> {
    alt((
        map(tag(">="), |_| FilterOperator::GreaterThanOrEqual),
        map(tag("<="), |_| FilterOperator::LessThanOrEqual),
        map(alt((tag("!="), tag("<>"))), |_| FilterOperator::NotEquals),
        map(tag("="), |_| FilterOperator::Equals),
        map(tag(">"), |_| FilterOperator::GreaterThan),
        map(tag("<"), |_| FilterOperator::LessThan),
    ))(input)
}

// Operator plus operand; multi-word operators are tried before their prefixes
fn predicate(input: &str) -> IResult<&str, (FilterOperator, Value)> {
    alt((
        map(
            tuple((ws(keyword("is")), ws(keyword("not")), ws(keyword("empty")))),
            |_| (FilterOperator::IsNotEmpty, Value::Null),
        ),
        map(
            pair(ws(keyword("is")), ws(keyword("empty"))),
            |_| (FilterOperator::IsEmpty, Value::Null),
        ),
        map(
            preceded(pair(ws(keyword("not")), ws(keyword("contains"))), ws(value)),
            |v| (FilterOperator::NotContains, v),
        ),
        map(
            preceded(pair(ws(keyword("not")), ws(keyword("in"))), value_list),
            |v| (FilterOperator::NotIn, v),
        ),
        map(preceded(ws(keyword("contains")), ws(value)), |v| {
            (FilterOperator::Contains, v)
        }),
        map(
            preceded(pair(ws(keyword("starts")), ws(keyword("with"))), ws(value)),
            |v| (FilterOperator::StartsWith, v),
        ),
        map(
            preceded(pair(ws(keyword("ends")), ws(keyword("with"))), ws(value)),
            |v| (FilterOperator::EndsWith, v),
        ),
        map(
            tuple((ws(keyword("between")), ws(value), ws(keyword("and")), ws(value))),
            |(_, low, _, high)| (FilterOperator::Between, Value::List(vec![low, high])),
        ),
        map(preceded(ws(keyword("in")), value_list), |v| (FilterOperator::In, v)),
        pair(ws(comparison), ws(value)),
    ))(input)
}

fn clause(input: &str) -> IResult<&str, ReportFilter> {
    map(pair(ws(identifier), predicate), |(field, (operator, operand))| {
        ReportFilter::new(field, operator, operand)
    })(input)
}

fn connector(input: &str) -> IResult<&str, LogicalOperator> {
    alt((
        map(keyword("and"), |_| LogicalOperator::And),
        map(keyword("or"), |_| LogicalOperator::Or),
    ))(input)
}

/// `clause (and|or clause)*`; each connector becomes the logical operator of
/// the clause that follows it
pub fn filter_chain(input: &str) -> IResult<&str, Vec<ReportFilter>> {
    let (input, first) = clause(input)?;
    let (input, rest) = many0(pair(ws(connector), clause))(input)?;

    let mut filters = Vec::with_capacity(rest.len() + 1);
    filters.push(first);
    for (logical_operator, mut filter) in rest {
        filter.logical_operator = logical_operator;
        filters.push(filter);
    }
    Ok((input, filters))
}
