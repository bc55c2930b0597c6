use nom::{
    branch::alt,
    character::complete::{char, digit1, space0},
    combinator::{all_consuming, map, map_res, opt},
    multi::separated_list1,
    sequence::{delimited, separated_pair},
    IResult, Parser,
};

use crate::error::{Error, Result};
use crate::model::{PageRange, PageSelection};

/// One comma-separated entry of a page list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageToken {
    Single(u32),
    Range(u32, u32),
}

/// Parse a page number, allowing surrounding spaces
fn page_number(input: &str) -> IResult<&str, u32> {
    map_res(delimited(space0, digit1, space0), |digits: &str| {
        digits.parse::<u32>()
    })
    .parse(input)
}

/// Parse `N` or `A-B`
fn page_token(input: &str) -> IResult<&str, PageToken> {
    alt((
        map(
            separated_pair(page_number, char('-'), page_number),
            |(start, end)| PageToken::Range(start, end),
        ),
        map(page_number, PageToken::Single),
    ))
    .parse(input)
}

/// Parse the whole list; empty entries (`"1,,3"`) are allowed
fn page_list(input: &str) -> IResult<&str, Vec<Option<PageToken>>> {
    all_consuming(separated_list1(
        char(','),
        delimited(space0, opt(page_token), space0),
    ))
    .parse(input)
}

/// Parse a page list like `"1,3,5-8"` into a set of 1-based page numbers.
///
/// Ranges are kept as ranges; nothing is expanded page by page.
///
/// Bounds against the document are checked separately with
/// [`PageSelection::validate`] once the page count is known.
pub fn parse_page_list(spec: &str) -> Result<PageSelection> {
    let invalid = |message: String| Error::InvalidPageList {
        spec: spec.to_string(),
        message,
    };

    let (_, tokens) = page_list(spec)
        .map_err(|_| invalid("expected numbers or ranges separated by commas".to_string()))?;

    let mut ranges = Vec::new();
    for token in tokens.into_iter().flatten() {
        match token {
            PageToken::Single(0) | PageToken::Range(0, _) | PageToken::Range(_, 0) => {
                return Err(invalid("page numbers start at 1".to_string()));
            }
            PageToken::Single(page) => ranges.push(PageRange::new(page, page)),
            PageToken::Range(start, end) if start > end => {
                return Err(invalid(format!("range {}-{} is reversed", start, end)));
            }
            PageToken::Range(start, end) => ranges.push(PageRange::new(start, end)),
        }
    }

    if ranges.is_empty() {
        return Err(invalid("no pages selected".to_string()));
    }

    Ok(PageSelection::from_ranges(ranges))
}
