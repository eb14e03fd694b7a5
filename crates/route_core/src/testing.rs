//! Hand-built syntax trees for unit tests.

use crate::syntax::{
    BindingField, Declaration, EntityName, FunctionDecl, InterfaceDecl, Modifiers, ParamBinding,
    Parameter, PropertySignature, SourceRange, TypeKind, TypeMember, TypeNode, TypeReference,
};

pub fn keyword(text: &str) -> TypeNode {
    keyword_at(text, 0)
}

pub fn keyword_at(text: &str, start: usize) -> TypeNode {
    TypeNode {
        kind: TypeKind::Keyword,
        text: text.to_string(),
        range: SourceRange::new(start, start + text.len()),
    }
}

pub fn array(element: TypeNode) -> TypeNode {
    TypeNode {
        text: format!("{}[]", element.text),
        range: SourceRange::new(element.range.start, element.range.end + 2),
        kind: TypeKind::Array(Box::new(element)),
    }
}

pub fn reference(name: &str, args: Vec<TypeNode>) -> TypeNode {
    let text = if args.is_empty() {
        name.to_string()
    } else {
        let args: Vec<_> = args.iter().map(|arg| arg.text.as_str()).collect();
        format!("{}<{}>", name, args.join(", "))
    };
    TypeNode {
        range: SourceRange::new(0, text.len()),
        text,
        kind: TypeKind::Reference(TypeReference {
            name: EntityName::Ident(name.to_string()),
            args,
        }),
    }
}

/// `RouteProps<arg>` with the argument placed at `start`.
pub fn route_props(arg: &str, start: usize) -> TypeNode {
    reference("RouteProps", vec![keyword_at(arg, start)])
}

pub fn property(name: &str, ty: Option<TypeNode>) -> TypeMember {
    TypeMember::Property(PropertySignature {
        name: name.to_string(),
        ty,
    })
}

pub fn interface(name: &str, members: Vec<TypeMember>) -> Declaration {
    Declaration::Interface(InterfaceDecl {
        name: name.to_string(),
        members,
    })
}

/// `export default function Page({ a, b }: ty)`. Destructured field `i` spans
/// `100 + 10 * i` plus the name length.
pub fn entry(fields: Vec<&str>, ty: Option<TypeNode>) -> Declaration {
    let fields = fields
        .into_iter()
        .enumerate()
        .map(|(index, name)| {
            let start = 100 + 10 * index;
            BindingField {
                name: name.to_string(),
                range: SourceRange::new(start, start + name.len()),
            }
        })
        .collect();
    Declaration::Function(FunctionDecl {
        name: Some("Page".to_string()),
        modifiers: Modifiers::EXPORT_DEFAULT,
        params: vec![Parameter {
            binding: ParamBinding::ObjectPattern(fields),
            ty,
        }],
    })
}
