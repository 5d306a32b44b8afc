//! Anchor-based splitting of a raw report into per-entity blocks.

use megaraid_core::EntityKind;

/// Contiguous slice of a report that belongs to at most one entity.
///
/// Block 0 holds whatever precedes the first anchor (usually banner text) and
/// is dropped later for lack of an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityBlock {
    pub index: usize,
    pub text: String,
}

impl EntityBlock {
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.text.lines()
    }
}

/// Splits `report` on the anchor of `kind`.
///
/// When the kind has an anchor marker, every anchor occurrence is first
/// rewritten to anchor+marker, so the text following each anchor starts with
/// the identifier label. Joining the blocks with the anchor and removing the
/// markers yields `report` again.
pub fn segment(report: &str, kind: EntityKind) -> Vec<EntityBlock> {
    let anchor = kind.anchor();
    let marked;
    let source = match kind.anchor_marker() {
        Some(marker) => {
            marked = report.replace(anchor, &format!("{anchor}{marker}"));
            marked.as_str()
        }
        None => report,
    };

    source
        .split(anchor)
        .enumerate()
        .map(|(index, text)| EntityBlock {
            index,
            text: text.to_string(),
        })
        .collect()
}
