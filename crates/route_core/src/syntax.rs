//! Parser-neutral view of a page module.
//!
//! Parser adapters lower their own AST into these types. Only what the
//! validator reads is modelled: top-level interfaces, function declarations
//! with their export modifiers, parameter bindings and type nodes. Type nodes
//! keep the source text they were written with, since type comparisons are
//! textual. Type nodes and destructured fields carry the byte ranges findings
//! are anchored on.

use serde::Serialize;

/// Half-open byte range into the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SourceRange {
    pub start: usize,
    pub end: usize,
}

impl SourceRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Top-level declarations of one source file, in source order.
#[derive(Debug, Clone, Default)]
pub struct Module {
    pub items: Vec<Declaration>,
}

#[derive(Debug, Clone)]
pub enum Declaration {
    Interface(InterfaceDecl),
    Function(FunctionDecl),
    /// Anything the validator does not look at (imports, type aliases, statements).
    Other,
}

#[derive(Debug, Clone)]
pub struct InterfaceDecl {
    pub name: String,
    pub members: Vec<TypeMember>,
}

#[derive(Debug, Clone)]
pub enum TypeMember {
    Property(PropertySignature),
    /// Methods, index signatures, call and construct signatures.
    Other,
}

#[derive(Debug, Clone)]
pub struct PropertySignature {
    /// Key as written, e.g. `id` or `"id"`.
    pub name: String,
    pub ty: Option<TypeNode>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub export: bool,
    pub default: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        export: false,
        default: false,
    };
    pub const EXPORT: Modifiers = Modifiers {
        export: true,
        default: false,
    };
    pub const EXPORT_DEFAULT: Modifiers = Modifiers {
        export: true,
        default: true,
    };

    pub fn is_default_export(&self) -> bool {
        self.export && self.default
    }
}

#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: Option<String>,
    pub modifiers: Modifiers,
    pub params: Vec<Parameter>,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub binding: ParamBinding,
    pub ty: Option<TypeNode>,
}

#[derive(Debug, Clone)]
pub enum ParamBinding {
    Identifier(String),
    ObjectPattern(Vec<BindingField>),
    /// Array patterns, rest parameters.
    Other,
}

/// One element of an object destructuring pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingField {
    /// Name of the local binding (`r` in `{ route: r }`).
    pub name: String,
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub struct TypeNode {
    pub kind: TypeKind,
    pub text: String,
    pub range: SourceRange,
}

#[derive(Debug, Clone)]
pub enum TypeKind {
    /// `string`, `number`, `boolean` and the other keyword types.
    Keyword,
    /// Native array syntax, `T[]`.
    Array(Box<TypeNode>),
    Reference(TypeReference),
    Other,
}

#[derive(Debug, Clone)]
pub struct TypeReference {
    pub name: EntityName,
    pub args: Vec<TypeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityName {
    Ident(String),
    /// Dotted names such as `Router.RouteProps`.
    Qualified(String),
}

impl TypeNode {
    /// Returns the reference if this is a generic reference to `name` (a plain
    /// identifier, not a qualified name).
    pub fn as_reference_to(&self, name: &str) -> Option<&TypeReference> {
        match &self.kind {
            TypeKind::Reference(reference)
                if matches!(&reference.name, EntityName::Ident(ident) if ident == name) =>
            {
                Some(reference)
            }
            _ => None,
        }
    }
}
