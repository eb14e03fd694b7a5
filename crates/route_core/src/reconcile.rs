//! Diff between the params a path encodes and the params an interface declares.

use crate::finding::{Finding, FindingKind};
use crate::path_params::PlaceholderSet;
use crate::signature::InterfaceShape;
use crate::syntax::SourceRange;

/// Emits findings in a fixed order: missing singles, missing spreads,
/// extraneous singles, extraneous spreads, invalid field types. Within each
/// group names follow first-occurrence order. All findings share `anchor`.
pub fn reconcile(
    placeholders: &PlaceholderSet,
    shape: &InterfaceShape,
    anchor: SourceRange,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut emit = |kind, name: &String| findings.push(Finding::new(kind, name.as_str(), anchor));

    for name in placeholders.single.difference(&shape.single) {
        emit(FindingKind::MissingSingle, name);
    }
    for name in placeholders.spread.difference(&shape.spread) {
        emit(FindingKind::MissingSpread, name);
    }
    for name in shape.single.difference(&placeholders.single) {
        emit(FindingKind::ExtraneousSingle, name);
    }
    for name in shape.spread.difference(&placeholders.spread) {
        emit(FindingKind::ExtraneousSpread, name);
    }
    for name in &shape.invalid {
        emit(FindingKind::InvalidFieldType, name);
    }

    findings
}
