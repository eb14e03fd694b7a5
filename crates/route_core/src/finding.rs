use serde::Serialize;

use crate::syntax::SourceRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FindingKind {
    /// The entry point destructures something other than `route`.
    InvalidRouteProp,
    MissingSingle,
    MissingSpread,
    ExtraneousSingle,
    ExtraneousSpread,
    InvalidFieldType,
}

impl FindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::InvalidRouteProp => "Invalid Route Prop",
            FindingKind::MissingSingle => "Missing Route Param",
            FindingKind::MissingSpread => "Missing Rest Param",
            FindingKind::ExtraneousSingle => "Unknown Route Param",
            FindingKind::ExtraneousSpread => "Unknown Rest Param",
            FindingKind::InvalidFieldType => "Invalid Param Type",
        }
    }
}

/// One validation result before it is turned into a host diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub param: String,
    pub anchor: SourceRange,
}

impl Finding {
    pub fn new(kind: FindingKind, param: impl Into<String>, anchor: SourceRange) -> Self {
        Self {
            kind,
            param: param.into(),
            anchor,
        }
    }

    /// Editor-facing message. These strings are matched by existing tooling
    /// and must not change. Invalid field types share the extraneous message.
    pub fn message(&self) -> String {
        let name = &self.param;
        match self.kind {
            FindingKind::InvalidRouteProp => {
                format!("\"{}\" is not a valid Expo route property.", name)
            }
            FindingKind::MissingSingle | FindingKind::MissingSpread => {
                format!("Missing \"{}\" from route params.", name)
            }
            FindingKind::ExtraneousSingle
            | FindingKind::ExtraneousSpread
            | FindingKind::InvalidFieldType => {
                format!("Attribute \"{}\" is not found on the route.", name)
            }
        }
    }

    /// Longer hint for terminal reports.
    pub fn help(&self) -> String {
        let name = &self.param;
        match self.kind {
            FindingKind::InvalidRouteProp => format!(
                "Page components only receive `route`. Remove `{}` from the destructuring.",
                name
            ),
            FindingKind::MissingSingle => format!(
                "The file path has a [{}] segment. Add `{}: string` to the params interface.",
                name, name
            ),
            FindingKind::MissingSpread => format!(
                "The file path has a [...{}] segment. Add `{}: string[]` to the params interface.",
                name, name
            ),
            FindingKind::ExtraneousSingle => format!(
                "Rename the file to include a [{}] segment or remove the field.",
                name
            ),
            FindingKind::ExtraneousSpread => format!(
                "Rename the file to include a [...{}] segment or remove the field.",
                name
            ),
            FindingKind::InvalidFieldType => format!(
                "Route params are typed `string` or `string[]`. Change the type of `{}`.",
                name
            ),
        }
    }
}
