//! Pretty, source-anchored error reporting.
//!
//! Parse errors are plain strings with no span attached (the parser only
//! records a message, see [`crate::parser::Parser::errors`]), so they are
//! reported as a single banner pointing at end-of-source. Runtime errors
//! carry a line number, which is resolved back to a byte span over the
//! original source before building the report. Both paths funnel through
//! the same [`ariadne`] report builder.
//!
//! # See Also
//!
//! * [`crate::parser::Parser::errors`] - the source of parse error text
//! * [`crate::object::Value::Error`] - the source of runtime error text

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use std::ops::Range;

fn print_range_report(
    filename: &str,
    source: &str,
    span_range: Range<usize>,
    short_message: &str,
    label_message: &str,
    use_color: bool,
) {
    // `Config::with_color(false)` is enough to suppress ANSI output on its
    // own; the label's own color is harmless to leave set either way.
    let result = Report::build(ReportKind::Error, (filename, span_range.clone()))
        .with_config(
            Config::default()
                .with_index_type(IndexType::Byte)
                .with_color(use_color),
        )
        .with_message(short_message)
        .with_label(
            Label::new((filename, span_range))
                .with_message(label_message)
                .with_color(Color::Red),
        )
        .finish()
        .eprint((filename, Source::from(source)));

    if let Err(report_err) = result {
        eprintln!("{short_message}: {label_message}");
        eprintln!("(failed to display detailed error report: {report_err})");
    }
}

fn end_of_source_range(source: &str) -> Range<usize> {
    if source.is_empty() {
        0..0
    } else {
        let end = source.len().saturating_sub(1);
        end..source.len()
    }
}

/// Returns the byte range spanning source line `line` (1-based), or
/// end-of-source if `line` is out of bounds.
fn line_range(source: &str, line: usize) -> Range<usize> {
    let mut offset = 0;
    for (idx, text) in source.split_inclusive('\n').enumerate() {
        if idx + 1 == line {
            let trimmed = text.trim_end_matches('\n').len();
            return offset..(offset + trimmed.max(1));
        }
        offset += text.len();
    }
    end_of_source_range(source)
}

/// Prints every accumulated syntax error against `source`, one report each.
pub fn report_parse_errors(filename: &str, source: &str, errors: &[String], use_color: bool) {
    let span = end_of_source_range(source);
    for error in errors {
        print_range_report(filename, source, span.clone(), "Syntax error", error, use_color);
    }
}

/// Prints a single runtime error. `message` is expected in the
/// `"on the line <N>.\n<detail>"` form produced by [`crate::object::Value::error`];
/// the line number is parsed back out to anchor the report's span.
pub fn report_runtime_error(
    filename: &str,
    source: &str,
    code: &str,
    message: &str,
    use_color: bool,
) {
    let line = parse_line_number(message).unwrap_or(1);
    let span = line_range(source, line);
    let short = format!("Runtime error[{code}]");
    print_range_report(filename, source, span, &short, message, use_color);
}

fn parse_line_number(message: &str) -> Option<usize> {
    let rest = message.strip_prefix("on the line ")?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_of_source_range_nonempty() {
        assert_eq!(end_of_source_range("abc"), 2..3);
    }

    #[test]
    fn test_end_of_source_range_empty() {
        assert_eq!(end_of_source_range(""), 0..0);
    }

    #[test]
    fn test_line_range_first_line() {
        assert_eq!(line_range("abc\ndef", 1), 0..3);
    }

    #[test]
    fn test_line_range_second_line() {
        assert_eq!(line_range("abc\ndef", 2), 4..7);
    }

    #[test]
    fn test_line_range_out_of_bounds_falls_back_to_end() {
        assert_eq!(line_range("abc", 5), 2..3);
    }

    #[test]
    fn test_parse_line_number() {
        assert_eq!(
            parse_line_number("on the line 3.\nUndefined variable: x."),
            Some(3)
        );
    }

    #[test]
    fn test_parse_line_number_missing_prefix() {
        assert_eq!(parse_line_number("no prefix here"), None);
    }
}
