//! Entry point and params interface inspection.
//!
//! A page module is expected to look like:
//!
//! ```text
//! interface PageParams {
//!   id: string;
//! }
//!
//! export default function Page({ route }: RouteProps<PageParams>) { ... }
//! ```
//!
//! Every default-exported function is an entry point, so each overload
//! signature and the implementation are checked in source order. The first
//! parameter may only destructure `route`, and the single type argument of
//! `RouteProps<…>` names the interface whose fields must line up with the
//! file path.

use indexmap::{IndexMap, IndexSet};

use crate::syntax::{
    BindingField, Declaration, FunctionDecl, InterfaceDecl, Module, ParamBinding, SourceRange,
    TypeKind, TypeMember, TypeNode,
};

/// Generic wrapper expected on the entry point's first parameter.
pub const ROUTE_PROPS_TYPE: &str = "RouteProps";

/// The only property an entry point may destructure.
pub const ROUTE_PROP: &str = "route";

const STRING_TYPE: &str = "string";
const ARRAY_TYPE: &str = "Array";

/// How an array of strings was spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArraySyntax {
    /// `string[]`
    Native,
    /// `Array<string>`
    Generic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape {
    String,
    StringArray(ArraySyntax),
    Other,
}

/// Classifies a declared field type. Comparison is on source text, so
/// `(string)` or an alias of `string` is not a string.
pub fn classify(ty: Option<&TypeNode>) -> TypeShape {
    let Some(ty) = ty else {
        return TypeShape::Other;
    };

    if ty.text == STRING_TYPE {
        return TypeShape::String;
    }

    match &ty.kind {
        TypeKind::Array(element) if element.text == STRING_TYPE => {
            TypeShape::StringArray(ArraySyntax::Native)
        }
        _ => match ty.as_reference_to(ARRAY_TYPE) {
            Some(reference) if reference.args.len() == 1 && reference.args[0].text == STRING_TYPE => {
                TypeShape::StringArray(ArraySyntax::Generic)
            }
            _ => TypeShape::Other,
        },
    }
}

/// Field layout of a params interface. Each set keeps member order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceShape {
    pub single: IndexSet<String>,
    pub spread: IndexSet<String>,
    pub invalid: IndexSet<String>,
}

impl InterfaceShape {
    pub fn from_members(members: &[TypeMember]) -> Self {
        let mut shape = Self::default();
        for member in members {
            let TypeMember::Property(property) = member else {
                continue;
            };
            let name = property.name.clone();
            match classify(property.ty.as_ref()) {
                TypeShape::String => shape.single.insert(name),
                TypeShape::StringArray(_) => shape.spread.insert(name),
                TypeShape::Other => shape.invalid.insert(name),
            };
        }
        shape
    }
}

/// The `X` in `RouteProps<X>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamsType {
    pub name: String,
    /// Range of the type argument; every reconciliation finding points here.
    pub anchor: SourceRange,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntrySignature {
    pub is_valid_entry_point: bool,
    pub params_type: Option<ParamsType>,
    /// Destructured fields other than `route`.
    pub invalid_props: Vec<BindingField>,
}

impl EntrySignature {
    fn from_function(function: &FunctionDecl) -> Self {
        let Some(first) = function.params.first() else {
            return Self {
                is_valid_entry_point: true,
                ..Self::default()
            };
        };

        let invalid_props = match &first.binding {
            ParamBinding::ObjectPattern(fields) => fields
                .iter()
                .filter(|field| field.name != ROUTE_PROP)
                .cloned()
                .collect(),
            ParamBinding::Identifier(_) | ParamBinding::Other => Vec::new(),
        };

        let params_type = first
            .ty
            .as_ref()
            .and_then(|ty| ty.as_reference_to(ROUTE_PROPS_TYPE))
            .filter(|reference| reference.args.len() == 1)
            .map(|reference| ParamsType {
                name: reference.args[0].text.clone(),
                anchor: reference.args[0].range,
            });

        Self {
            is_valid_entry_point: true,
            params_type,
            invalid_props,
        }
    }
}

/// Result of one pass over a module's top-level declarations.
#[derive(Debug, Clone, Default)]
pub struct Inspection<'a> {
    /// Default-exported functions, in source order.
    pub entries: Vec<EntrySignature>,
    /// Interfaces by declared name. A later declaration replaces an earlier
    /// one with the same name.
    pub interfaces: IndexMap<&'a str, &'a InterfaceDecl>,
}

impl Inspection<'_> {
    pub fn has_entry_point(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Shape of the interface bound to `entry`'s `RouteProps<…>`, with the
    /// anchor to blame. `None` when the entry point has no usable params type
    /// or the interface is not declared in this module.
    pub fn params_shape(&self, entry: &EntrySignature) -> Option<(InterfaceShape, SourceRange)> {
        let params_type = entry.params_type.as_ref()?;
        let decl = self.interfaces.get(params_type.name.as_str())?;
        Some((InterfaceShape::from_members(&decl.members), params_type.anchor))
    }
}

pub fn inspect(module: &Module) -> Inspection<'_> {
    let mut inspection = Inspection::default();

    for item in &module.items {
        match item {
            Declaration::Interface(decl) => {
                if inspection.interfaces.insert(decl.name.as_str(), decl).is_some() {
                    tracing::trace!(name = %decl.name, "interface redeclared, keeping the later one");
                }
            }
            Declaration::Function(function) if function.modifiers.is_default_export() => {
                inspection.entries.push(EntrySignature::from_function(function));
            }
            Declaration::Function(_) | Declaration::Other => {}
        }
    }

    inspection
}
