//! OCR invoice word-list reader.
//!
//! The OCR stage writes one word record per line as a Python dict literal:
//!
//! ```text
//! {'page_id': 1, 'line_id': 1, 'pos_id': 1, 'word': 'Acme'}
//! {'page_id': 1, 'line_id': 1, 'pos_id': 2, 'word': "McDonald's"}
//! ```
//!
//! Several records may share a line when separated by commas, and blank
//! lines are skipped. Keys other than the four word fields are ignored.

use crate::{Error, Result};
use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not, tag},
    character::complete::{char, digit0, digit1, multispace0},
    combinator::{all_consuming, map, opt, recognize, value},
    multi::separated_list0,
    sequence::{delimited, pair, preceded, separated_pair, terminated, tuple},
    IResult,
};
use std::path::Path;
use supplier_match_core::InvoiceWord;

/// A literal value as it appears in a record
#[derive(Debug, Clone, PartialEq)]
enum Literal {
    Str(String),
    /// Source text of an integer or decimal number
    Number(String),
    Bool(bool),
    None,
}

impl Literal {
    fn kind(&self) -> &'static str {
        match self {
            Literal::Str(_) => "string",
            Literal::Number(_) => "number",
            Literal::Bool(_) => "boolean",
            Literal::None => "None",
        }
    }
}

type Record = Vec<(String, Literal)>;

/// Reads an invoice word-list file, in file order.
pub fn read_invoice(path: impl AsRef<Path>) -> Result<Vec<InvoiceWord>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let words = parse_invoice(&text)?;
    tracing::debug!(path = %path.display(), words = words.len(), "read invoice words");
    Ok(words)
}

/// Parses invoice word records from text, in input order.
pub fn parse_invoice(text: &str) -> Result<Vec<InvoiceWord>> {
    let mut words = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let records = parse_line(line).map_err(|reason| Error::MalformedInvoice {
            line: idx + 1,
            reason,
        })?;
        for record in records {
            words.push(to_word(words.len() + 1, record)?);
        }
    }
    Ok(words)
}

fn parse_line(line: &str) -> std::result::Result<Vec<Record>, String> {
    let records = all_consuming(delimited(
        multispace0,
        terminated(
            separated_list0(comma, record),
            opt(comma),
        ),
        multispace0,
    ))(line);

    match records {
        Ok((_, records)) => Ok(records),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(format!(
            "unexpected input at column {}: {:?}",
            line.len() - e.input.len() + 1,
            e.code
        )),
        Err(nom::Err::Incomplete(_)) => Err("incomplete record".to_string()),
    }
}

fn to_word(record: usize, fields: Record) -> Result<InvoiceWord> {
    let lookup = |field: &'static str| {
        fields
            .iter()
            .rev()
            .find(|(k, _)| k == field)
            .map(|(_, v)| v)
            .ok_or(Error::MissingField { record, field })
    };
    let position = |field: &'static str| -> Result<u32> {
        match lookup(field)? {
            Literal::Number(n) => n.parse::<u32>().map_err(|_| Error::InvalidField {
                record,
                field,
                reason: format!("expected a non-negative integer, got {n}"),
            }),
            other => Err(Error::InvalidField {
                record,
                field,
                reason: format!("expected a non-negative integer, got {}", other.kind()),
            }),
        }
    };

    let word = match lookup("word")? {
        Literal::Str(s) => s.clone(),
        Literal::Number(n) => n.clone(),
        other => {
            return Err(Error::InvalidField {
                record,
                field: "word",
                reason: format!("expected a string, got {}", other.kind()),
            })
        }
    };

    Ok(InvoiceWord {
        page_id: position("page_id")?,
        line_id: position("line_id")?,
        pos_id: position("pos_id")?,
        word,
    })
}

fn comma(input: &str) -> IResult<&str, char> {
    delimited(multispace0, char(','), multispace0)(input)
}

fn record(input: &str) -> IResult<&str, Record> {
    delimited(
        pair(char('{'), multispace0),
        terminated(separated_list0(comma, entry), opt(comma)),
        pair(multispace0, char('}')),
    )(input)
}

fn entry(input: &str) -> IResult<&str, (String, Literal)> {
    separated_pair(
        string,
        delimited(multispace0, char(':'), multispace0),
        literal,
    )(input)
}

fn literal(input: &str) -> IResult<&str, Literal> {
    alt((
        map(string, Literal::Str),
        map(number, |n: &str| Literal::Number(n.to_string())),
        value(Literal::Bool(true), tag("True")),
        value(Literal::Bool(false), tag("False")),
        value(Literal::None, tag("None")),
    ))(input)
}

fn number(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(alt((char('-'), char('+')))),
        digit1,
        opt(preceded(char('.'), digit0)),
    )))(input)
}

fn string(input: &str) -> IResult<&str, String> {
    alt((quoted('\'', "'\\"), quoted('"', "\"\\")))(input)
}

/// A string between `quote` characters with backslash escapes. `stop`
/// holds the quote and the backslash.
fn quoted<'a>(
    quote: char,
    stop: &'static str,
) -> impl FnMut(&'a str) -> IResult<&'a str, String> {
    move |input| {
        delimited(
            char(quote),
            map(
                opt(escaped_transform(
                    is_not(stop),
                    '\\',
                    alt((
                        value("\n", char('n')),
                        value("\r", char('r')),
                        value("\t", char('t')),
                        value("\\", char('\\')),
                        value("'", char('\'')),
                        value("\"", char('"')),
                    )),
                )),
                Option::unwrap_or_default,
            ),
            char(quote),
        )(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_single_record() {
        let words =
            parse_invoice("{'page_id': 1, 'line_id': 2, 'pos_id': 3, 'word': 'Acme'}\n").unwrap();
        assert_eq!(words, vec![InvoiceWord::new(1, 2, 3, "Acme")]);
    }

    #[test]
    fn test_quotes_and_escapes() {
        let text = r#"{"page_id": 1, "line_id": 1, "pos_id": 1, "word": "McDonald's"}
{'page_id': 1, 'line_id': 1, 'pos_id': 2, 'word': 'O\'Neil'}
{'page_id': 1, 'line_id': 1, 'pos_id': 3, 'word': ''}"#;
        let words = parse_invoice(text).unwrap();
        assert_eq!(words[0].word, "McDonald's");
        assert_eq!(words[1].word, "O'Neil");
        assert_eq!(words[2].word, "");
    }

    #[test]
    fn test_multiple_records_per_line_and_blank_lines() {
        let text = "\n{'page_id': 1, 'line_id': 1, 'pos_id': 1, 'word': 'a'}, \
                    {'page_id': 1, 'line_id': 1, 'pos_id': 2, 'word': 'b'},\n\n   \n\
                    {'page_id': 2, 'line_id': 1, 'pos_id': 1, 'word': 'c'}\n";
        let words = parse_invoice(text).unwrap();
        let text: Vec<&str> = words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(text, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_extra_keys_and_numeric_word() {
        let text = "{'page_id': 1, 'line_id': 4, 'pos_id': 2, 'conf': 0.93, 'bold': False, \
                    'font': None, 'word': 120.50}";
        let words = parse_invoice(text).unwrap();
        assert_eq!(words, vec![InvoiceWord::new(1, 4, 2, "120.50")]);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let text = "{'page_id': 1, 'line_id': 1, 'pos_id': 1, 'word': 'ok'}\n{'page_id': 1,";
        match parse_invoice(text) {
            Err(Error::MalformedInvoice { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected malformed invoice, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_field() {
        let text = "{'page_id': 1, 'line_id': 1, 'word': 'x'}";
        assert!(matches!(
            parse_invoice(text),
            Err(Error::MissingField { record: 1, field: "pos_id" })
        ));
    }

    #[test]
    fn test_invalid_position() {
        for bad in ["-1", "1.5", "'3'", "True"] {
            let text = format!("{{'page_id': {bad}, 'line_id': 1, 'pos_id': 1, 'word': 'x'}}");
            assert!(
                matches!(
                    parse_invoice(&text),
                    Err(Error::InvalidField { field: "page_id", .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_read_invoice_keeps_file_order() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{'page_id': 1, 'line_id': 2, 'pos_id': 1, 'word': 'Corp'}}").unwrap();
        writeln!(file, "{{'page_id': 1, 'line_id': 1, 'pos_id': 1, 'word': 'Acme'}}").unwrap();
        let words = read_invoice(file.path()).unwrap();
        assert_eq!(words[0].word, "Corp");
        assert_eq!(
            supplier_match_core::reconstruct_text(&words),
            "Acme Corp"
        );
    }
}
