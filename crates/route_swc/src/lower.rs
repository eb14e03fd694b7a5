//! Lowering from the swc AST into `route_core::syntax`.
//!
//! Only the top level is walked. Text for names and types is sliced from the
//! source text so that comparisons see exactly what the author wrote.

use route_core::syntax::{
    BindingField, Declaration, EntityName, FunctionDecl, InterfaceDecl, Modifiers, Module,
    ParamBinding, Parameter, PropertySignature, SourceRange, TypeKind, TypeMember, TypeNode,
    TypeReference,
};
use swc_common::{BytePos, Span, Spanned};
use swc_ecma_ast::{
    Decl, DefaultDecl, Function, Ident, ModuleDecl, ModuleItem, ObjectPatProp, Pat, Stmt,
    TsEntityName, TsInterfaceDecl, TsType, TsTypeAnn, TsTypeElement,
};

/// `source` is the text swc parsed. `offset` is added to every range so
/// ranges index the caller's text when a byte-order mark was stripped.
pub(crate) struct Lowering<'a> {
    source: &'a str,
    start_pos: BytePos,
    offset: usize,
}

impl<'a> Lowering<'a> {
    pub(crate) fn new(source: &'a str, start_pos: BytePos, offset: usize) -> Self {
        Self {
            source,
            start_pos,
            offset,
        }
    }

    pub(crate) fn module(&self, module: &swc_ecma_ast::Module) -> Module {
        Module {
            items: module.body.iter().map(|item| self.item(item)).collect(),
        }
    }

    /// Span relative to the parsed text.
    fn local(&self, span: Span) -> SourceRange {
        let base = self.start_pos.0;
        SourceRange::new(
            span.lo.0.saturating_sub(base) as usize,
            span.hi.0.saturating_sub(base) as usize,
        )
    }

    fn range(&self, span: Span) -> SourceRange {
        let local = self.local(span);
        SourceRange::new(local.start + self.offset, local.end + self.offset)
    }

    fn text(&self, span: Span) -> String {
        let local = self.local(span);
        self.source
            .get(local.start..local.end)
            .unwrap_or_default()
            .to_string()
    }

    fn item(&self, item: &ModuleItem) -> Declaration {
        match item {
            ModuleItem::Stmt(Stmt::Decl(decl)) => self.decl(decl, Modifiers::NONE),
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => {
                self.decl(&export.decl, Modifiers::EXPORT)
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(export)) => match &export.decl {
                DefaultDecl::Fn(fn_expr) => Declaration::Function(self.function(
                    fn_expr.ident.as_ref(),
                    &fn_expr.function,
                    Modifiers::EXPORT_DEFAULT,
                )),
                DefaultDecl::TsInterfaceDecl(decl) => Declaration::Interface(self.interface(decl)),
                _ => Declaration::Other,
            },
            _ => Declaration::Other,
        }
    }

    fn decl(&self, decl: &Decl, modifiers: Modifiers) -> Declaration {
        match decl {
            Decl::TsInterface(decl) => Declaration::Interface(self.interface(decl)),
            Decl::Fn(fn_decl) => Declaration::Function(self.function(
                Some(&fn_decl.ident),
                &fn_decl.function,
                modifiers,
            )),
            _ => Declaration::Other,
        }
    }

    fn interface(&self, decl: &TsInterfaceDecl) -> InterfaceDecl {
        InterfaceDecl {
            name: decl.id.sym.to_string(),
            members: decl
                .body
                .body
                .iter()
                .map(|member| self.member(member))
                .collect(),
        }
    }

    fn member(&self, member: &TsTypeElement) -> TypeMember {
        let TsTypeElement::TsPropertySignature(property) = member else {
            return TypeMember::Other;
        };

        let key = self.text(property.key.span());
        let name = if property.computed {
            format!("[{}]", key)
        } else {
            key
        };

        TypeMember::Property(PropertySignature {
            name,
            ty: self.annotation(property.type_ann.as_deref()),
        })
    }

    fn function(
        &self,
        ident: Option<&Ident>,
        function: &Function,
        modifiers: Modifiers,
    ) -> FunctionDecl {
        FunctionDecl {
            name: ident.map(|ident| ident.sym.to_string()),
            modifiers,
            params: function
                .params
                .iter()
                .map(|param| self.parameter(&param.pat))
                .collect(),
        }
    }

    fn parameter(&self, pat: &Pat) -> Parameter {
        match pat {
            Pat::Ident(binding) => Parameter {
                binding: ParamBinding::Identifier(binding.id.sym.to_string()),
                ty: self.annotation(binding.type_ann.as_deref()),
            },
            Pat::Object(object) => Parameter {
                binding: ParamBinding::ObjectPattern(
                    object
                        .props
                        .iter()
                        .map(|prop| self.binding_field(prop))
                        .collect(),
                ),
                ty: self.annotation(object.type_ann.as_deref()),
            },
            // `({ route }: RouteProps<P> = fallback)` keeps its annotation on the left side.
            Pat::Assign(assign) => self.parameter(&assign.left),
            Pat::Array(array) => Parameter {
                binding: ParamBinding::Other,
                ty: self.annotation(array.type_ann.as_deref()),
            },
            Pat::Rest(rest) => Parameter {
                binding: ParamBinding::Other,
                ty: self.annotation(rest.type_ann.as_deref()),
            },
            _ => Parameter {
                binding: ParamBinding::Other,
                ty: None,
            },
        }
    }

    fn binding_field(&self, prop: &ObjectPatProp) -> BindingField {
        let name = match prop {
            ObjectPatProp::KeyValue(key_value) => self.text(key_value.value.span()),
            ObjectPatProp::Assign(assign) => self.text(assign.key.span()),
            ObjectPatProp::Rest(rest) => self.text(rest.arg.span()),
        };
        BindingField {
            name,
            range: self.range(prop.span()),
        }
    }

    fn annotation(&self, annotation: Option<&TsTypeAnn>) -> Option<TypeNode> {
        annotation.map(|annotation| self.ty(&annotation.type_ann))
    }

    fn ty(&self, ty: &TsType) -> TypeNode {
        let kind = match ty {
            TsType::TsKeywordType(_) => TypeKind::Keyword,
            TsType::TsArrayType(array) => TypeKind::Array(Box::new(self.ty(&array.elem_type))),
            TsType::TsTypeRef(reference) => TypeKind::Reference(TypeReference {
                name: match &reference.type_name {
                    TsEntityName::Ident(ident) => EntityName::Ident(ident.sym.to_string()),
                    qualified => EntityName::Qualified(self.text(qualified.span())),
                },
                args: reference
                    .type_params
                    .as_ref()
                    .map(|params| params.params.iter().map(|arg| self.ty(arg)).collect())
                    .unwrap_or_default(),
            }),
            _ => TypeKind::Other,
        };

        TypeNode {
            kind,
            text: self.text(ty.span()),
            range: self.range(ty.span()),
        }
    }
}
