use serde::Serialize;

use crate::finding::{Finding, FindingKind};

/// Code carried by every route parameter diagnostic. Kept apart from the
/// ranges a TypeScript host uses for its own diagnostics.
pub const INVALID_PAGE_PROP: u32 = 48_001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
        }
    }
}

/// A finding in the shape hosts hand to editors: byte offset plus length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: FindingKind,
    pub severity: Severity,
    pub code: u32,
    pub message: String,
    pub start: usize,
    pub length: usize,
    /// Longer hint for terminal reports.
    #[serde(skip)]
    pub help: String,
}

impl From<&Finding> for Diagnostic {
    fn from(finding: &Finding) -> Self {
        Self {
            kind: finding.kind,
            severity: Severity::Error,
            code: INVALID_PAGE_PROP,
            message: finding.message(),
            start: finding.anchor.start,
            length: finding.anchor.len(),
            help: finding.help(),
        }
    }
}
