//! Value coercion for `label: value` lines.

use megaraid_core::{Value, ValueKind};
use tracing::warn;

use super::ParseOptions;

/// Splits `line` at its first `:` into a label and the trimmed remainder.
pub(crate) fn split_field(line: &str) -> Option<(&str, &str)> {
    line.split_once(':').map(|(label, rest)| (label, rest.trim()))
}

/// Coerces the text after the first `:` of `line` into a value of `kind`.
///
/// Never fails: a line without a separator yields the zero value of `kind`,
/// and non-numeric text for an integer yields `0`.
pub fn coerce(line: &str, kind: ValueKind, options: ParseOptions) -> Value {
    match kind {
        ValueKind::Text => Value::Text(coerce_text(line, options)),
        ValueKind::Integer => Value::Integer(coerce_integer(line, options)),
    }
}

pub(crate) fn coerce_text(line: &str, options: ParseOptions) -> String {
    match split_field(line) {
        Some((_, rest)) => rest.to_string(),
        None => {
            report_missing_separator(line, options);
            String::new()
        }
    }
}

pub(crate) fn coerce_integer(line: &str, options: ParseOptions) -> i64 {
    let Some((_, rest)) = split_field(line) else {
        report_missing_separator(line, options);
        return 0;
    };
    match rest.parse::<i64>() {
        Ok(value) => value,
        Err(err) => {
            if options.verbose {
                warn!(line, error = %err, "Integer field is not a base-10 number");
            }
            0
        }
    }
}

fn report_missing_separator(line: &str, options: ParseOptions) {
    if options.verbose {
        warn!(line, "Field line has no ':' separator");
    }
}
