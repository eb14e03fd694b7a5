use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::ValueEnum;
use glob::Pattern;
use route_core::{Config, Diagnostic, RouteValidator, RoutesRoot};
use route_swc::{PARSE_ERROR_CODE, ParseError};
use serde::Serialize;

use crate::report::{Report, line_col, use_color_output};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Debug)]
pub enum Outcome {
    Checked(Vec<Diagnostic>),
    Unparseable(ParseError),
    /// Read failures, including files that are not valid UTF-8.
    Unreadable(String),
}

/// Outcome for one route file.
#[derive(Debug)]
pub struct CheckedFile {
    pub path: PathBuf,
    /// Empty when the file could not be read.
    pub source: String,
    pub outcome: Outcome,
}

impl CheckedFile {
    fn problem_count(&self) -> usize {
        match &self.outcome {
            Outcome::Checked(diagnostics) => diagnostics.len(),
            Outcome::Unparseable(_) | Outcome::Unreadable(_) => 1,
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonDiagnostic<'a> {
    file: String,
    line: usize,
    column: usize,
    severity: &'a str,
    code: u32,
    message: &'a str,
    start: usize,
    length: usize,
}

pub fn run(project: Option<PathBuf>, format: Format) -> Result<ExitCode> {
    let project_dir = match project {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let checked = check_project(&project_dir)?;

    match format {
        Format::Text => print!("{}", render_text(&project_dir, &checked, use_color_output())),
        Format::Json => println!("{}", render_json(&project_dir, &checked)?),
    }

    let problems: usize = checked.iter().map(CheckedFile::problem_count).sum();
    Ok(if problems == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Validates every route file under the project's routes directories.
pub fn check_project(project_dir: &Path) -> Result<Vec<CheckedFile>> {
    let config = Config::load(project_dir)?;
    let root = RoutesRoot::new(project_dir, &config)?;
    let files = collect_route_files(&root, &config)?;
    tracing::info!(
        "checking {} route file(s) under {}",
        files.len(),
        project_dir.display()
    );

    let validator = RouteValidator::new(root);
    Ok(files
        .into_iter()
        .map(|path| check_file(&validator, path))
        .collect())
}

fn check_file(validator: &RouteValidator, path: PathBuf) -> CheckedFile {
    let source = match fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            tracing::warn!("{}: failed to read: {}", path.display(), err);
            return CheckedFile {
                path,
                source: String::new(),
                outcome: Outcome::Unreadable(err.to_string()),
            };
        }
    };

    let outcome = match route_swc::check_source(validator, &path, &source) {
        Ok(diagnostics) => Outcome::Checked(diagnostics),
        Err(err) => {
            tracing::warn!("{}: parse error: {}", path.display(), err);
            Outcome::Unparseable(err)
        }
    };
    CheckedFile {
        path,
        source,
        outcome,
    }
}

/// Route files in every existing routes directory, sorted.
pub fn collect_route_files(root: &RoutesRoot, config: &Config) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for dir in root.dirs() {
        if !dir.is_dir() {
            tracing::debug!("routes dir {} does not exist", dir.display());
            continue;
        }
        let pattern = format!("{}/**/*", Pattern::escape(&dir.to_string_lossy()));
        for entry in glob::glob(&pattern).with_context(|| format!("invalid glob {}", pattern))? {
            let path = entry?;
            let has_route_extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| config.is_route_extension(ext));
            if path.is_file() && has_route_extension && root.contains(&path) {
                files.push(path);
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn display_path(project_dir: &Path, path: &Path) -> String {
    path.strip_prefix(project_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn render_text(project_dir: &Path, checked: &[CheckedFile], use_color: bool) -> String {
    let mut out = String::new();
    for file in checked {
        let file_path = display_path(project_dir, &file.path);
        match &file.outcome {
            Outcome::Checked(diagnostics) => {
                for diagnostic in diagnostics {
                    out.push_str(
                        &Report {
                            source: &file.source,
                            file_path: &file_path,
                            title: diagnostic.kind.as_str(),
                            code: diagnostic.code,
                            start: diagnostic.start,
                            length: diagnostic.length,
                            message: &diagnostic.message,
                            help: &diagnostic.help,
                        }
                        .render(use_color),
                    );
                }
            }
            Outcome::Unparseable(err) => {
                out.push_str(
                    &Report {
                        source: &file.source,
                        file_path: &file_path,
                        title: "Parse Error",
                        code: PARSE_ERROR_CODE,
                        start: err.range.start,
                        length: err.range.len(),
                        message: &err.message,
                        help: err.hint,
                    }
                    .render(use_color),
                );
            }
            Outcome::Unreadable(reason) => {
                out.push_str(&format!(
                    "\nerror[{}]: Unreadable File\n\n┌─ {}\n│\n= {}\n└─\n",
                    PARSE_ERROR_CODE, file_path, reason
                ));
            }
        }
    }

    let problems: usize = checked.iter().map(CheckedFile::problem_count).sum();
    let failing = checked.iter().filter(|file| file.problem_count() > 0).count();
    if problems == 0 {
        out.push_str(&format!(
            "All {} route file(s) match their params.\n",
            checked.len()
        ));
    } else {
        out.push_str(&format!(
            "\n{} problem(s) in {} of {} route file(s).\n",
            problems,
            failing,
            checked.len()
        ));
    }
    out
}

fn render_json(project_dir: &Path, checked: &[CheckedFile]) -> Result<String> {
    let mut entries = Vec::new();
    for file in checked {
        let file_path = display_path(project_dir, &file.path);
        match &file.outcome {
            Outcome::Checked(diagnostics) => {
                for diagnostic in diagnostics {
                    let (line, column) = line_col(&file.source, diagnostic.start);
                    entries.push(JsonDiagnostic {
                        file: file_path.clone(),
                        line,
                        column,
                        severity: diagnostic.severity.as_str(),
                        code: diagnostic.code,
                        message: &diagnostic.message,
                        start: diagnostic.start,
                        length: diagnostic.length,
                    });
                }
            }
            Outcome::Unparseable(err) => {
                let (line, column) = line_col(&file.source, err.range.start);
                entries.push(JsonDiagnostic {
                    file: file_path.clone(),
                    line,
                    column,
                    severity: "error",
                    code: PARSE_ERROR_CODE,
                    message: &err.message,
                    start: err.range.start,
                    length: err.range.len(),
                });
            }
            Outcome::Unreadable(reason) => entries.push(JsonDiagnostic {
                file: file_path.clone(),
                line: 1,
                column: 1,
                severity: "error",
                code: PARSE_ERROR_CODE,
                message: reason,
                start: 0,
                length: 0,
            }),
        }
    }
    serde_json::to_string_pretty(&entries).context("failed to serialize diagnostics")
}
