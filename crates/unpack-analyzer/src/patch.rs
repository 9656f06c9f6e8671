//! Insertion-fix synthesis.
//!
//! One insertion per site, never a rewrite: the missing names go after the
//! last existing element, or right after the `{` when the pattern is empty.
//! Everything else in the file is untouched byte-for-byte.

use unpack_common::InsertFix;
use unpack_parser::{NodeArena, NodeData, NodeId};

use crate::SiteReport;

pub(crate) fn synthesize_fix(
    arena: &NodeArena,
    pattern: NodeId,
    names: &[&str],
) -> Option<InsertFix> {
    let node = arena.get(pattern)?;
    let NodeData::ObjectBindingPattern { elements, .. } = &node.data else {
        return None;
    };
    Some(match elements.last() {
        Some(&last) => InsertFix {
            offset: arena.span(last).end,
            text: format!(", {}", names.join(", ")),
        },
        // `{}` — insert directly after the opening brace.
        None => InsertFix {
            offset: node.span.start + 1,
            text: names.join(", "),
        },
    })
}

/// Apply every report's fix to `source`. Insertions are applied back to
/// front so earlier offsets stay valid.
#[must_use]
pub fn apply_fixes(source: &str, reports: &[SiteReport]) -> String {
    let mut fixes: Vec<&InsertFix> = reports.iter().map(|r| &r.fix).collect();
    fixes.sort_by_key(|fix| std::cmp::Reverse(fix.offset));
    let mut text = source.to_string();
    for fix in fixes {
        text = fix.apply(&text);
    }
    text
}
