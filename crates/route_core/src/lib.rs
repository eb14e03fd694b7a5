//! Route parameter validation for file-system routed pages.
//!
//! A page at `app/blog/[slug].tsx` must declare a params interface with a
//! `slug: string` field, and `app/docs/[...path].tsx` one with
//! `path: string[]`. This crate compares the two and reports mismatches as
//! diagnostics. It works on the parser-neutral tree in [`syntax`]; parsing
//! is left to adapters.

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod finding;
pub mod path_params;
pub mod reconcile;
pub mod scope;
pub mod signature;
pub mod syntax;
pub mod validator;

#[cfg(test)]
mod testing;

pub use config::{CONFIG_FILE, Config};
pub use diagnostic::{Diagnostic, INVALID_PAGE_PROP, Severity};
pub use error::ConfigError;
pub use finding::{Finding, FindingKind};
pub use path_params::{PlaceholderSet, extract};
pub use reconcile::reconcile;
pub use scope::RoutesRoot;
pub use signature::{EntrySignature, InterfaceShape, Inspection, inspect};
pub use validator::{RouteValidator, check_module};
