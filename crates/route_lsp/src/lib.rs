//! Language server that publishes route parameter diagnostics.
//!
//! Each workspace folder is a project root with its own `routecheck.toml`.
//! Open documents are re-checked on every change, and pull diagnostics are
//! answered from the in-memory copy when there is one.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use route_core::{Config, Diagnostic as RouteDiagnostic, RouteValidator, RoutesRoot, Severity};
use tokio::sync::RwLock;
use tower_lsp::lsp_types::{
    Diagnostic, DiagnosticOptions, DiagnosticServerCapabilities, DiagnosticSeverity,
    DidChangeTextDocumentParams, DidCloseTextDocumentParams, DidOpenTextDocumentParams,
    DidSaveTextDocumentParams, DocumentDiagnosticParams, DocumentDiagnosticReport,
    DocumentDiagnosticReportResult, FullDocumentDiagnosticReport, InitializeParams,
    InitializeResult, InitializedParams, MessageType, NumberOrString, Position, Range,
    RelatedFullDocumentDiagnosticReport, ServerCapabilities, ServerInfo,
    TextDocumentSyncCapability, TextDocumentSyncKind, Url,
};
use tower_lsp::{Client, LanguageServer, LspService, Server};

const SOURCE: &str = "routecheck";

struct Backend {
    client: Client,
    documents: Arc<RwLock<HashMap<Url, String>>>,
    validators: Arc<RwLock<Vec<RouteValidator>>>,
}

impl Backend {
    async fn diagnostics_for_text(&self, text: &str, path: &Path) -> Vec<Diagnostic> {
        let validators = self.validators.read().await;
        route_diagnostics(&validators, path, text)
    }

    async fn validate_document(&self, uri: Url, text: &str) {
        let Ok(path) = uri.to_file_path() else {
            return;
        };
        let diagnostics = self.diagnostics_for_text(text, &path).await;
        self.client.publish_diagnostics(uri, diagnostics, None).await;
    }

    async fn get_document(&self, uri: &Url) -> Option<String> {
        let docs = self.documents.read().await;
        docs.get(uri).cloned()
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(
        &self,
        params: InitializeParams,
    ) -> tower_lsp::jsonrpc::Result<InitializeResult> {
        let mut roots = Vec::new();
        if let Some(folders) = params.workspace_folders {
            for folder in folders {
                if let Ok(path) = folder.uri.to_file_path() {
                    roots.push(path);
                }
            }
        } else if let Some(root_uri) = params.root_uri {
            if let Ok(path) = root_uri.to_file_path() {
                roots.push(path);
            }
        }
        if roots.is_empty() {
            if let Ok(current) = std::env::current_dir() {
                roots.push(current);
            }
        }
        *self.validators.write().await = validators_for_roots(&roots);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                diagnostic_provider: Some(DiagnosticServerCapabilities::Options(
                    DiagnosticOptions {
                        identifier: Some(SOURCE.to_string()),
                        inter_file_dependencies: false,
                        workspace_diagnostics: false,
                        work_done_progress_options: Default::default(),
                    },
                )),
                ..ServerCapabilities::default()
            },
            server_info: Some(ServerInfo {
                name: SOURCE.to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        let validators = self.validators.read().await;
        for validator in validators.iter() {
            self.client
                .log_message(
                    MessageType::INFO,
                    format!(
                        "Starting route parameter validation: {}",
                        validator.root().project_dir().display()
                    ),
                )
                .await;
        }
    }

    async fn shutdown(&self) -> tower_lsp::jsonrpc::Result<()> {
        Ok(())
    }

    async fn diagnostic(
        &self,
        params: DocumentDiagnosticParams,
    ) -> tower_lsp::jsonrpc::Result<DocumentDiagnosticReportResult> {
        let uri = params.text_document.uri;
        let items = match uri.to_file_path() {
            Ok(path) => {
                let text = match self.get_document(&uri).await {
                    Some(in_memory) => in_memory,
                    None => fs::read_to_string(&path).unwrap_or_default(),
                };
                self.diagnostics_for_text(&text, &path).await
            }
            Err(()) => Vec::new(),
        };

        Ok(DocumentDiagnosticReportResult::Report(
            DocumentDiagnosticReport::Full(RelatedFullDocumentDiagnosticReport {
                related_documents: None,
                full_document_diagnostic_report: FullDocumentDiagnosticReport {
                    result_id: None,
                    items,
                },
            }),
        ))
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        tracing::debug!("opened {}", params.text_document.uri);

        let uri = params.text_document.uri;
        let text = params.text_document.text;
        self.documents
            .write()
            .await
            .insert(uri.clone(), text.clone());
        self.validate_document(uri, &text).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let Some(change) = params.content_changes.into_iter().last() else {
            return;
        };
        self.documents
            .write()
            .await
            .insert(uri.clone(), change.text.clone());
        self.validate_document(uri, &change.text).await;
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = params.text_document.uri;
        let text = match params.text {
            Some(text) => Some(text),
            None => self.get_document(&uri).await,
        };
        if let Some(text) = text {
            self.validate_document(uri, &text).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.write().await.remove(&uri);
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }
}

pub async fn run_stdio() -> anyhow::Result<()> {
    let (service, socket) = LspService::new(|client| Backend {
        client,
        documents: Arc::new(RwLock::new(HashMap::new())),
        validators: Arc::new(RwLock::new(Vec::new())),
    });
    Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
        .serve(service)
        .await;
    Ok(())
}

fn validators_for_roots(roots: &[PathBuf]) -> Vec<RouteValidator> {
    let mut validators = Vec::new();
    for root in roots {
        let config = Config::load(root).unwrap_or_else(|err| {
            tracing::warn!("{}; using default settings", err);
            Config::default()
        });
        match RoutesRoot::new(root.clone(), &config) {
            Ok(routes) => validators.push(RouteValidator::new(routes)),
            Err(err) => tracing::warn!("skipping {}: {}", root.display(), err),
        }
    }
    validators
}

/// Diagnostics for one document, using the first project whose routes root
/// holds it. Unparseable documents get none; the editor's own language
/// service reports syntax errors.
fn route_diagnostics(validators: &[RouteValidator], path: &Path, text: &str) -> Vec<Diagnostic> {
    let Some(validator) = validators
        .iter()
        .find(|validator| validator.is_route_file(path))
    else {
        return Vec::new();
    };

    match route_swc::check_source(validator, path, text) {
        Ok(diagnostics) => {
            let line_index = LineIndex::new(text);
            diagnostics
                .iter()
                .map(|diagnostic| diagnostic_to_lsp(diagnostic, &line_index))
                .collect()
        }
        Err(err) => {
            tracing::debug!("skipping {}: {}", path.display(), err);
            Vec::new()
        }
    }
}

fn diagnostic_to_lsp(diagnostic: &RouteDiagnostic, line_index: &LineIndex) -> Diagnostic {
    Diagnostic {
        range: line_index.range(diagnostic.start, diagnostic.start + diagnostic.length),
        severity: Some(severity_to_lsp(diagnostic.severity)),
        code: Some(NumberOrString::Number(diagnostic.code as i32)),
        source: Some(SOURCE.to_string()),
        message: diagnostic.message.clone(),
        ..Diagnostic::default()
    }
}

fn severity_to_lsp(severity: Severity) -> DiagnosticSeverity {
    match severity {
        Severity::Error => DiagnosticSeverity::ERROR,
    }
}

/// Byte offsets to LSP positions, which count UTF-16 code units.
struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0usize];
        for (idx, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                line_starts.push(idx + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let character = self
            .source
            .get(line_start..offset)
            .map(|prefix| prefix.encode_utf16().count())
            .unwrap_or(offset - line_start);
        Position {
            line: line as u32,
            character: character as u32,
        }
    }

    fn range(&self, start: usize, end: usize) -> Range {
        Range {
            start: self.position(start),
            end: self.position(end),
        }
    }
}
