//! Completeness checking: declared members minus destructured names.

use rustc_hash::FxHashSet;
use tracing::debug;
use unpack_binder::ScopeIndex;
use unpack_common::Diagnostic;
use unpack_parser::{NodeArena, NodeData, NodeId};

use crate::SiteReport;
use crate::config::AnalyzerConfig;
use crate::locate::BindingSite;
use crate::patch::synthesize_fix;
use crate::resolve::ShapeResolver;

/// Check one binding site. `None` when the type resolves to nothing or the
/// pattern already binds every declared property.
pub(crate) fn check_site<I: ScopeIndex>(
    arena: &NodeArena,
    index: &I,
    config: &AnalyzerConfig,
    file_name: &str,
    site: &BindingSite,
) -> Option<SiteReport> {
    let resolver = ShapeResolver::new(arena, index, config);
    let shape = resolver.resolve(site.declared_type, site.scope);
    if shape.is_empty() {
        return None;
    }

    let bound = destructured_names(arena, site.pattern);
    let missing: Vec<_> = shape
        .iter()
        .filter(|member| !bound.contains(member.name.as_str()))
        .collect();
    if missing.is_empty() {
        return None;
    }
    debug!(
        kind = ?site.kind,
        declared = shape.len(),
        missing = missing.len(),
        "incomplete destructuring"
    );

    let diagnostics = missing
        .iter()
        .map(|member| {
            Diagnostic::warning(
                file_name.to_string(),
                arena.span(member.anchor),
                format!("Property '{}' is never destructured", member.name),
                member.name.clone(),
            )
        })
        .collect();
    let names: Vec<&str> = missing.iter().map(|m| m.name.as_str()).collect();
    let fix = synthesize_fix(arena, site.pattern, &names)?;
    Some(SiteReport { diagnostics, fix })
}

/// Property keys the pattern literally binds: shorthand, `key: alias`,
/// `key = default`, string-literal keys.
fn destructured_names(arena: &NodeArena, pattern: NodeId) -> FxHashSet<String> {
    let mut names = FxHashSet::default();
    if let Some(node) = arena.get(pattern)
        && let NodeData::ObjectBindingPattern { elements, .. } = &node.data
    {
        for &element in elements {
            if let Some(element_node) = arena.get(element)
                && let NodeData::BindingElement { property_name } = &element_node.data
            {
                names.insert(property_name.clone());
            }
        }
    }
    names
}
