//! swc adapter for `route_core`.
//!
//! Parses TypeScript and JavaScript page modules with swc and lowers them into
//! the parser-neutral tree the validator works on.

mod lower;
mod parse;

use std::path::Path;

use route_core::{Diagnostic, RouteValidator};

pub use parse::{ParseError, parse_module, syntax_for_path};

/// Code hosts attach to a [`ParseError`] when they surface it.
pub const PARSE_ERROR_CODE: u32 = 48_000;

/// Parses and validates one file. Files outside the routes root are not
/// parsed and yield no diagnostics.
pub fn check_source(
    validator: &RouteValidator,
    path: &Path,
    source: &str,
) -> Result<Vec<Diagnostic>, ParseError> {
    if !validator.is_route_file(path) {
        return Ok(Vec::new());
    }

    let module = parse_module(source, &path.to_string_lossy())?;
    let diagnostics = validator.validate(path, Some(&module), Vec::new());
    tracing::debug!("{}: {} route diagnostic(s)", path.display(), diagnostics.len());
    Ok(diagnostics)
}
