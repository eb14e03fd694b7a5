use route_core::syntax::{Module, SourceRange};
use swc_common::{BytePos, FileName, SourceMap, Spanned, sync::Lrc};
use swc_ecma_ast::EsVersion;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax, error::SyntaxError, lexer::Lexer};
use thiserror::Error;

use crate::lower::Lowering;

const BOM: char = '\u{FEFF}';

/// Source that swc could not parse. The range is in bytes from the start of
/// the source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub hint: &'static str,
    pub range: SourceRange,
}

/// Picks TypeScript or ECMAScript syntax from the extension, with JSX
/// enabled for `.tsx` and `.jsx`.
pub fn syntax_for_path(file_path: &str) -> Syntax {
    let lower = file_path.to_ascii_lowercase();
    let is_jsx = lower.ends_with(".tsx") || lower.ends_with(".jsx");
    let is_ts = lower.ends_with(".ts") || lower.ends_with(".tsx") || lower.ends_with(".mts");

    if is_ts {
        Syntax::Typescript(TsSyntax {
            tsx: is_jsx,
            decorators: false,
            dts: false,
            no_early_errors: true,
            disallow_ambiguous_jsx_like: true,
        })
    } else {
        Syntax::Es(EsSyntax {
            jsx: is_jsx,
            decorators: false,
            ..Default::default()
        })
    }
}

/// Parses one page module and lowers its top-level declarations.
///
/// Ranges in the result, and in a returned [`ParseError`], index `source`
/// itself, including any leading byte-order mark.
pub fn parse_module(source: &str, file_path: &str) -> Result<Module, ParseError> {
    let (bom_len, body) = match source.strip_prefix(BOM) {
        Some(rest) => (BOM.len_utf8(), rest),
        None => (0, source),
    };

    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(
        FileName::Custom(file_path.to_string()).into(),
        body.to_string(),
    );

    let lexer = Lexer::new(
        syntax_for_path(file_path),
        EsVersion::Es2022,
        StringInput::from(&*fm),
        None,
    );
    let mut parser = Parser::new_from(lexer);

    let module = parser
        .parse_module()
        .map_err(|err| parse_error(err, fm.start_pos, bom_len))?;

    for recovered in parser.take_errors() {
        tracing::trace!("{}: recovered from {:?}", file_path, recovered.kind());
    }

    Ok(Lowering::new(body, fm.start_pos, bom_len).module(&module))
}

fn parse_error(err: swc_ecma_parser::error::Error, start_pos: BytePos, offset: usize) -> ParseError {
    let span = err.span();
    let (message, hint) = match err.kind() {
        SyntaxError::Eof => (
            "Unexpected end of file".to_string(),
            "Check for an unclosed block, string, or parenthesis.",
        ),
        SyntaxError::UnterminatedStrLit => (
            "Unterminated string literal".to_string(),
            "Add the missing closing quote.",
        ),
        SyntaxError::UnterminatedTpl => (
            "Unterminated template literal".to_string(),
            "Add the missing closing backtick or ${} bracket.",
        ),
        SyntaxError::UnterminatedRegExp => (
            "Unterminated regular expression".to_string(),
            "Add the missing closing /.",
        ),
        SyntaxError::Unexpected { got, expected } => (
            format!("Unexpected token {}, expected {}", got, expected),
            "Check for missing punctuation or a stray character.",
        ),
        other => (
            format!("{:?}", other),
            "Check the syntax near the highlighted location.",
        ),
    };

    let base = start_pos.0;
    ParseError {
        message,
        hint,
        range: SourceRange::new(
            span.lo.0.saturating_sub(base) as usize + offset,
            span.hi.0.saturating_sub(base) as usize + offset,
        ),
    }
}
