use std::path::Path;

use crate::diagnostic::Diagnostic;
use crate::finding::{Finding, FindingKind};
use crate::path_params;
use crate::reconcile::reconcile;
use crate::scope::RoutesRoot;
use crate::signature::inspect;
use crate::syntax::Module;

/// Checks route pages of one project against their file paths.
#[derive(Debug, Clone)]
pub struct RouteValidator {
    root: RoutesRoot,
}

impl RouteValidator {
    pub fn new(root: RoutesRoot) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &RoutesRoot {
        &self.root
    }

    pub fn is_route_file(&self, path: &Path) -> bool {
        self.root.contains(path)
    }

    /// Appends route diagnostics for `path` to `prior`. Files outside the
    /// routes root, or without a parsed module, get `prior` back untouched.
    pub fn validate(
        &self,
        path: &Path,
        module: Option<&Module>,
        mut prior: Vec<Diagnostic>,
    ) -> Vec<Diagnostic> {
        if !self.is_route_file(path) {
            tracing::trace!("{} is not a route file", path.display());
            return prior;
        }
        let Some(module) = module else {
            tracing::debug!("no source for {}", path.display());
            return prior;
        };

        prior.extend(self.findings(path, module).iter().map(Diagnostic::from));
        prior
    }

    /// Raw findings for `path`, empty when it is outside the routes root.
    pub fn findings(&self, path: &Path, module: &Module) -> Vec<Finding> {
        if !self.is_route_file(path) {
            return Vec::new();
        }
        check_module(&path.to_string_lossy(), module)
    }
}

/// Findings for one module. Each default-exported function contributes its
/// destructured-prop findings, then its reconciliation findings, in source
/// order. Does not consult the routes root.
pub fn check_module(path: &str, module: &Module) -> Vec<Finding> {
    let inspection = inspect(module);
    if !inspection.has_entry_point() {
        tracing::debug!("{} has no default-exported function", path);
        return Vec::new();
    }

    let placeholders = path_params::extract(path);
    let mut findings = Vec::new();
    for entry in &inspection.entries {
        findings.extend(
            entry
                .invalid_props
                .iter()
                .map(|field| Finding::new(FindingKind::InvalidRouteProp, field.name.as_str(), field.range)),
        );

        match inspection.params_shape(entry) {
            Some((shape, anchor)) => findings.extend(reconcile(&placeholders, &shape, anchor)),
            None => tracing::debug!("{}: entry point has no resolvable RouteProps<…> interface", path),
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::diagnostic::INVALID_PAGE_PROP;
    use crate::syntax::SourceRange;
    use crate::testing::*;

    fn validator() -> RouteValidator {
        RouteValidator::new(RoutesRoot::new("/project", &Config::default()).unwrap())
    }

    fn page(fields: Vec<&str>, params: Vec<crate::syntax::TypeMember>) -> Module {
        Module {
            items: vec![
                interface("PageParams", params),
                entry(fields, Some(route_props("PageParams", 40))),
            ],
        }
    }

    fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    #[test]
    fn matching_page_is_clean() {
        let module = page(vec!["route"], vec![property("id", Some(keyword("string")))]);
        let diagnostics = validator().validate(Path::new("/project/app/[id].tsx"), Some(&module), Vec::new());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn renamed_param_reports_missing_then_extraneous() {
        let module = page(vec!["route"], vec![property("id2", Some(keyword("string")))]);
        let diagnostics = validator().validate(Path::new("/project/app/[id].tsx"), Some(&module), Vec::new());
        assert_eq!(
            messages(&diagnostics),
            vec![
                "Missing \"id\" from route params.",
                "Attribute \"id2\" is not found on the route.",
            ]
        );
        for diagnostic in &diagnostics {
            assert_eq!(diagnostic.code, INVALID_PAGE_PROP);
            assert_eq!((diagnostic.start, diagnostic.length), (40, 10));
        }
    }

    #[test]
    fn invalid_prop_is_anchored_on_the_binding() {
        let module = page(vec!["route", "extra"], vec![property("id", Some(keyword("string")))]);
        let findings = check_module("/project/app/[id].tsx", &module);
        assert_eq!(
            findings,
            vec![Finding::new(
                FindingKind::InvalidRouteProp,
                "extra",
                SourceRange::new(110, 115)
            )]
        );
    }

    #[test]
    fn invalid_props_come_before_param_findings() {
        let module = page(vec!["extra"], vec![property("count", Some(keyword("number")))]);
        let kinds: Vec<_> = check_module("/project/app/index.tsx", &module)
            .into_iter()
            .map(|finding| finding.kind)
            .collect();
        assert_eq!(kinds, vec![FindingKind::InvalidRouteProp, FindingKind::InvalidFieldType]);
    }

    #[test]
    fn out_of_scope_files_keep_prior_diagnostics() {
        let module = page(vec!["route"], vec![property("id2", Some(keyword("string")))]);
        let prior = vec![Diagnostic::from(&Finding::new(
            FindingKind::MissingSingle,
            "host",
            SourceRange::default(),
        ))];
        let validator = validator();
        for path in ["/project/lib/[id].tsx", "/project/app/_layout.tsx"] {
            let diagnostics = validator.validate(Path::new(path), Some(&module), prior.clone());
            assert_eq!(diagnostics, prior);
        }
    }

    #[test]
    fn new_diagnostics_follow_prior_ones() {
        let module = page(vec!["route"], vec![property("id2", Some(keyword("string")))]);
        let prior = vec![Diagnostic::from(&Finding::new(
            FindingKind::MissingSingle,
            "host",
            SourceRange::default(),
        ))];
        let diagnostics = validator().validate(Path::new("/project/app/[id].tsx"), Some(&module), prior.clone());
        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics[0], prior[0]);
    }

    #[test]
    fn findings_respect_the_routes_root() {
        let module = page(vec!["route"], vec![property("id2", Some(keyword("string")))]);
        let validator = validator();
        let kinds: Vec<_> = validator
            .findings(Path::new("/project/src/app/[id].tsx"), &module)
            .into_iter()
            .map(|finding| finding.kind)
            .collect();
        assert_eq!(kinds, vec![FindingKind::MissingSingle, FindingKind::ExtraneousSingle]);
        assert!(validator.findings(Path::new("/project/[id].tsx"), &module).is_empty());
    }

    #[test]
    fn missing_module_keeps_prior_diagnostics() {
        let diagnostics = validator().validate(Path::new("/project/app/[id].tsx"), None, Vec::new());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn overloaded_entry_point_checks_the_implementation() {
        let module = Module {
            items: vec![
                interface("PageParams", vec![property("id2", Some(keyword("string")))]),
                entry(vec![], Some(keyword("unknown"))),
                entry(vec!["route"], Some(route_props("PageParams", 40))),
            ],
        };
        let diagnostics = validator().validate(Path::new("/project/app/[id].tsx"), Some(&module), Vec::new());
        assert_eq!(
            messages(&diagnostics),
            vec![
                "Missing \"id\" from route params.",
                "Attribute \"id2\" is not found on the route.",
            ]
        );
    }

    #[test]
    fn module_without_entry_point_is_clean() {
        let module = Module {
            items: vec![interface("PageParams", vec![property("x", Some(keyword("number")))])],
        };
        assert!(check_module("/project/app/[id].tsx", &module).is_empty());
    }

    #[test]
    fn untyped_entry_point_only_checks_props() {
        let module = Module {
            items: vec![
                interface("PageParams", vec![property("id2", Some(keyword("string")))]),
                entry(vec!["route"], Some(reference("Props", vec![keyword("PageParams")]))),
            ],
        };
        assert!(check_module("/project/app/[id].tsx", &module).is_empty());
    }
}
