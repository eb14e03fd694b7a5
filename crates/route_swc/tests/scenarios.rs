use std::fs;
use std::path::{Path, PathBuf};

use route_core::{Config, Diagnostic, FindingKind, INVALID_PAGE_PROP, RouteValidator, RoutesRoot};
use route_swc::check_source;

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn validator() -> RouteValidator {
    let root = RoutesRoot::new(fixtures_root(), &Config::default()).expect("default config is valid");
    RouteValidator::new(root)
}

struct Checked {
    source: String,
    diagnostics: Vec<Diagnostic>,
}

impl Checked {
    fn messages(&self) -> Vec<&str> {
        self.diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    fn kinds(&self) -> Vec<FindingKind> {
        self.diagnostics.iter().map(|d| d.kind).collect()
    }

    fn anchored_text(&self, diagnostic: &Diagnostic) -> &str {
        &self.source[diagnostic.start..diagnostic.start + diagnostic.length]
    }
}

fn check_fixture(relative: &str) -> Checked {
    let path = fixtures_root().join(relative);
    let source = fs::read_to_string(&path).expect("fixture read failed");
    let diagnostics = check_source(&validator(), &path, &source).expect("fixture parses");
    Checked {
        source,
        diagnostics,
    }
}

#[test]
fn matching_single_param_is_clean() {
    let checked = check_fixture("app/users/[id].tsx");
    assert!(checked.diagnostics.is_empty(), "unexpected: {:?}", checked.diagnostics);
}

#[test]
fn matching_spread_param_is_clean() {
    let checked = check_fixture("app/[...ids].tsx");
    assert!(checked.diagnostics.is_empty(), "unexpected: {:?}", checked.diagnostics);
}

#[test]
fn renamed_param_is_missing_and_extraneous() {
    let checked = check_fixture("app/[id].tsx");
    assert_eq!(
        checked.kinds(),
        vec![FindingKind::MissingSingle, FindingKind::ExtraneousSingle]
    );
    assert_eq!(
        checked.messages(),
        vec![
            "Missing \"id\" from route params.",
            "Attribute \"id2\" is not found on the route.",
        ]
    );
    for diagnostic in &checked.diagnostics {
        assert_eq!(diagnostic.code, INVALID_PAGE_PROP);
        assert_eq!(checked.anchored_text(diagnostic), "PageParams");
    }
}

#[test]
fn spread_path_with_single_field() {
    let checked = check_fixture("app/shop/[...ids].tsx");
    assert_eq!(
        checked.kinds(),
        vec![FindingKind::MissingSpread, FindingKind::ExtraneousSingle]
    );
    assert_eq!(
        checked.messages(),
        vec![
            "Missing \"ids\" from route params.",
            "Attribute \"id\" is not found on the route.",
        ]
    );
}

#[test]
fn non_string_field_is_invalid() {
    let checked = check_fixture("app/posts/[slug].tsx");
    assert_eq!(checked.kinds(), vec![FindingKind::InvalidFieldType]);
    assert_eq!(
        checked.messages(),
        vec!["Attribute \"page\" is not found on the route."]
    );
    assert_eq!(checked.anchored_text(&checked.diagnostics[0]), "PageParams");
}

#[test]
fn extra_destructured_prop_is_anchored_on_the_binding() {
    let checked = check_fixture("app/profile/[id].tsx");
    assert_eq!(checked.kinds(), vec![FindingKind::InvalidRouteProp]);
    assert_eq!(
        checked.messages(),
        vec!["\"extra\" is not a valid Expo route property."]
    );
    assert_eq!(checked.anchored_text(&checked.diagnostics[0]), "extra");
}

#[test]
fn other_generic_wrapper_is_not_checked() {
    let checked = check_fixture("app/untyped/[id].tsx");
    assert!(checked.diagnostics.is_empty(), "unexpected: {:?}", checked.diagnostics);
}

#[test]
fn params_from_parent_directories_and_generic_arrays() {
    let checked = check_fixture("app/docs/[section]/[...path].tsx");
    assert!(checked.diagnostics.is_empty(), "unexpected: {:?}", checked.diagnostics);
}

#[test]
fn interface_declared_after_the_entry_point_resolves() {
    let checked = check_fixture("app/late/[id].tsx");
    assert_eq!(
        checked.messages(),
        vec!["Attribute \"extra\" is not found on the route."]
    );
}

#[test]
fn overload_signature_does_not_hide_the_implementation() {
    let checked = check_fixture("app/overload/[id].tsx");
    assert_eq!(
        checked.messages(),
        vec![
            "Missing \"id\" from route params.",
            "Attribute \"id2\" is not found on the route.",
        ]
    );
    for diagnostic in &checked.diagnostics {
        assert_eq!(checked.anchored_text(diagnostic), "PageParams");
    }
}

#[test]
fn byte_order_mark_does_not_shift_names_or_anchors() {
    let checked = check_fixture("app/bom/[id].tsx");
    assert!(checked.source.starts_with('\u{FEFF}'));
    assert_eq!(
        checked.kinds(),
        vec![FindingKind::MissingSingle, FindingKind::ExtraneousSingle]
    );
    for diagnostic in &checked.diagnostics {
        assert_eq!(checked.anchored_text(diagnostic), "PageParams");
    }
}

#[test]
fn byte_order_mark_on_a_matching_page_is_clean() {
    let path = fixtures_root().join("app/[id].tsx");
    let source = "\u{FEFF}interface P {\n  id: string;\n}\nexport default function Page({ route }: RouteProps<P>) {}";
    let diagnostics = check_source(&validator(), &path, source).expect("parses");
    assert!(diagnostics.is_empty(), "unexpected: {:?}", diagnostics);
}

#[test]
fn underscore_files_are_skipped() {
    let checked = check_fixture("app/_layout.tsx");
    assert!(checked.diagnostics.is_empty());
}

#[test]
fn files_outside_the_routes_root_are_not_parsed() {
    let diagnostics = check_source(
        &validator(),
        Path::new("/elsewhere/components/[id].tsx"),
        "this is not typescript (",
    )
    .expect("out of scope files are skipped");
    assert!(diagnostics.is_empty());
}

#[test]
fn unparseable_route_files_report_parse_errors() {
    let path = fixtures_root().join("app/broken/[id].tsx");
    let result = check_source(&validator(), &path, "export default function Page(");
    assert!(result.is_err());
}

#[test]
fn checking_twice_is_stable() {
    let first = check_fixture("app/[id].tsx");
    let second = check_fixture("app/[id].tsx");
    assert_eq!(first.diagnostics, second.diagnostics);
}
