//! Catalog-driven line classification.

use megaraid_core::Record;
use tracing::trace;

use super::ParseOptions;
use super::coerce::coerce;

/// Applies every catalog rule of `R` whose prefix starts `line`.
///
/// Returns `true` when at least one rule fired. Lines matching no rule are
/// ignored.
pub fn classify<R: Record>(line: &str, record: &mut R, options: ParseOptions) -> bool {
    let mut matched = false;
    for rule in R::catalog() {
        if !rule.matches(line) {
            continue;
        }
        let value = coerce(line, rule.slot.kind(), options);
        rule.slot.store(record, &value);
        trace!(kind = %R::KIND, field = rule.field, ?value, "Classified line");
        matched = true;
    }
    matched
}
