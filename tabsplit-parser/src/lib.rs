#![warn(clippy::uninlined_format_args)]

mod i18n;

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_till, take_until, take_while1},
    character::complete::{char, digit0, digit1, multispace1, one_of},
    combinator::{opt, recognize},
    error::{Error as NomError, ErrorKind},
    multi::{many0, separated_list1},
    sequence::delimited,
};
use rust_decimal::Decimal;
use std::str::FromStr;

/// A tax or tip entry as typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charge {
    Empty,
    Fixed(Decimal),
    Percent(Decimal),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemLine<'a> {
    pub member: &'a str,
    pub amount: Decimal,
    pub description: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'a> {
    Members(Vec<&'a str>),
    Item(ItemLine<'a>),
    Tax(&'a str),
    Tip(&'a str),
    Payers(Vec<&'a str>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatementWithLine<'a> {
    pub line: usize,
    pub statement: Statement<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program<'a> {
    pub statements: Vec<StatementWithLine<'a>>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Syntax error at line {line}: {detail}")]
    SyntaxError { line: usize, detail: String },
}

/// Reads a charge leniently: a `%` anywhere makes it a percentage, and the value is
/// the leading number of the text. Text without a leading number counts as zero.
pub fn parse_charge(input: &str) -> Charge {
    if input.trim().is_empty() {
        return Charge::Empty;
    }
    let value = parse_number_prefix(input).unwrap_or(Decimal::ZERO);
    if input.contains('%') {
        Charge::Percent(value)
    } else {
        Charge::Fixed(value)
    }
}

/// Parses the longest decimal number at the start of `input`, ignoring leading
/// whitespace and anything after the number.
///
/// Accepts an optional sign, `5`, `5.`, `.5` and an exponent (`1.5e2`). Returns
/// `None` when there is no number or it does not fit a decimal.
pub fn parse_number_prefix(input: &str) -> Option<Decimal> {
    let (_, number) = number_prefix(input.trim_start()).ok()?;
    number.to_decimal()
}

struct NumberPrefix<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
    exponent: Option<(bool, &'a str)>,
}

const MAX_EXPONENT: u32 = 64;

impl NumberPrefix<'_> {
    fn to_decimal(&self) -> Option<Decimal> {
        let integer = self.integer.trim_start_matches('0');
        let integer = if integer.is_empty() { "0" } else { integer };
        let mantissa = if self.fraction.is_empty() {
            Decimal::from_str(integer).ok()?
        } else {
            Decimal::from_str(&format!("{integer}.{}", self.fraction)).ok()?
        };

        let mut value = mantissa;
        if let Some((negative_exponent, digits)) = self.exponent
            && !value.is_zero()
        {
            let exponent = digits.parse::<u32>().unwrap_or(u32::MAX);
            if negative_exponent {
                if exponent > MAX_EXPONENT {
                    value = Decimal::ZERO;
                } else {
                    for _ in 0..exponent {
                        value = value.checked_div(Decimal::TEN)?;
                    }
                }
            } else {
                if exponent > MAX_EXPONENT {
                    return None;
                }
                for _ in 0..exponent {
                    value = value.checked_mul(Decimal::TEN)?;
                }
            }
        }

        Some(if self.negative { -value } else { value })
    }
}

fn number_prefix(input: &str) -> IResult<&str, NumberPrefix<'_>> {
    let digits = alt((
        (digit1, opt((char('.'), digit0)))
            .map(|(integer, fraction)| (integer, fraction.map_or("", |(_, f)| f))),
        (char('.'), digit1).map(|(_, fraction)| ("", fraction)),
    ));
    let exponent = (one_of("eE"), opt(one_of("+-")), digit1)
        .map(|(_, sign, digits)| (sign == Some('-'), digits));

    (opt(one_of("+-")), digits, opt(exponent))
        .map(|(sign, (integer, fraction), exponent)| NumberPrefix {
            negative: sign == Some('-'),
            integer,
            fraction,
            exponent,
        })
        .parse(input)
}

fn sp(input: &str) -> IResult<&str, &str> {
    fn fullwidth_space(input: &str) -> IResult<&str, &str> {
        take_while1(|c: char| c == '\u{3000}')(input)
    }

    fn comment(input: &str) -> IResult<&str, &str> {
        delimited(tag("/*"), take_until("*/"), tag("*/")).parse(input)
    }

    fn line_comment(input: &str) -> IResult<&str, &str> {
        recognize((tag("//"), take_till(|c| c == '\n'))).parse(input)
    }

    recognize(many0(alt((
        multispace1,
        fullwidth_space,
        comment,
        line_comment,
    ))))
    .parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-' || is_japanese_char(c))(input)
}

fn is_japanese_char(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309F}' | // Hiragana
        '\u{30A0}'..='\u{30FF}' | // Katakana
        '\u{4E00}'..='\u{9FFF}' | // Kanji
        '\u{3400}'..='\u{4DBF}'   // Kanji extension
    )
}

fn separator(input: &str) -> IResult<&str, &str> {
    alt((tag(","), tag("，"), tag("、"))).parse(input)
}

fn name_list(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1((sp, separator, sp), identifier).parse(input)
}

fn assign(input: &str) -> IResult<&str, &str> {
    (sp, tag(":="), sp).map(|(_, op, _)| op).parse(input)
}

// Text up to the next comment, with trailing whitespace removed.
fn bare_text(input: &str) -> IResult<&str, &str> {
    let end = [input.find("//"), input.find("/*")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(input.len());
    let text = input[..end].trim_end();
    if text.is_empty() {
        return Err(nom::Err::Error(NomError::new(input, ErrorKind::TakeWhile1)));
    }
    Ok((&input[text.len()..], text))
}

fn quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_till(|c| c == '"'), char('"')).parse(input)
}

fn amount(input: &str) -> IResult<&str, Decimal> {
    let (rest, (_, digits)) = (
        opt(char('$')),
        recognize((digit1, opt((char('.'), digit1)))),
    )
        .parse(input)?;
    let value = Decimal::from_str(digits)
        .map_err(|_| nom::Err::Error(NomError::new(input, ErrorKind::Float)))?;
    Ok((rest, value))
}

// MEMBERS := Alice, Bob
fn members_decl(input: &str) -> IResult<&str, Statement<'_>> {
    (tag_no_case("MEMBERS"), assign, name_list)
        .map(|(_, _, names)| Statement::Members(names))
        .parse(input)
}

// PAYERS := Alice
fn payers_decl(input: &str) -> IResult<&str, Statement<'_>> {
    (tag_no_case("PAYERS"), assign, name_list)
        .map(|(_, _, names)| Statement::Payers(names))
        .parse(input)
}

// TAX := 10% / TIP := 5
fn charge_decl(input: &str) -> IResult<&str, Statement<'_>> {
    alt((
        (tag_no_case("TAX"), assign, opt(bare_text))
            .map(|(_, _, text)| Statement::Tax(text.unwrap_or(""))),
        (tag_no_case("TIP"), assign, opt(bare_text))
            .map(|(_, _, text)| Statement::Tip(text.unwrap_or(""))),
    ))
    .parse(input)
}

// Alice: 12.50 "Caesar salad"
fn item(input: &str) -> IResult<&str, Statement<'_>> {
    (
        identifier,
        sp,
        char(':'),
        sp,
        amount,
        sp,
        opt(alt((quoted, bare_text))),
    )
        .map(|(member, _, _, _, amount, _, description)| {
            Statement::Item(ItemLine {
                member,
                amount,
                description,
            })
        })
        .parse(input)
}

fn statement(input: &str) -> IResult<&str, Statement<'_>> {
    alt((members_decl, payers_decl, charge_decl, item)).parse(input)
}

fn statement_with_sp(input: &str) -> IResult<&str, Statement<'_>> {
    (sp, statement, sp).map(|(_, stmt, _)| stmt).parse(input)
}

/// Parse a bill script, one statement per line.
pub fn parse_program(input: &str) -> Result<Program<'_>, ParseError> {
    let mut statements = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let (rest, _) = sp(line).map_err(|e| ParseError::SyntaxError {
            line: idx + 1,
            detail: i18n::syntax_error_detail(e),
        })?;
        if rest.trim().is_empty() {
            continue;
        }
        match statement_with_sp(rest) {
            Ok((rest, stmt)) => {
                if !rest.trim().is_empty() {
                    return Err(ParseError::SyntaxError {
                        line: idx + 1,
                        detail: i18n::syntax_error_unparsed_detail(rest.trim()),
                    });
                }
                statements.push(StatementWithLine {
                    line: idx + 1,
                    statement: stmt,
                });
            }
            Err(e) => {
                return Err(ParseError::SyntaxError {
                    line: idx + 1,
                    detail: i18n::syntax_error_detail(e),
                });
            }
        }
    }

    Ok(Program { statements })
}
