//! Framed terminal reports for route diagnostics and parse errors.

/// One problem to render against its source text.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    pub source: &'a str,
    pub file_path: &'a str,
    pub title: &'a str,
    pub code: u32,
    /// Byte offset of the highlighted text.
    pub start: usize,
    /// Byte length of the highlighted text.
    pub length: usize,
    pub message: &'a str,
    pub help: &'a str,
}

impl Report<'_> {
    /// Produces:
    ///
    /// ```text
    /// error[48001]: Missing Route Param
    ///
    /// ┌─ app/[id].tsx:13:52
    /// │
    ///  13 │ export default function BlogPost({ route }: RouteProps<PageParams>) {
    ///     │                                                    ^^^^^^^^^^ Missing "id" from route params.
    /// │
    /// = help: The file path has a [id] segment. Add `id: string` to the params interface.
    /// │
    /// └─
    /// ```
    pub fn render(&self, use_color: bool) -> String {
        let (line_num, col_num) = line_col(self.source, self.start);
        let error_line = self.source.lines().nth(line_num - 1).unwrap_or("");
        let underline_length = underline_length(self.source, self.start, self.length);

        let label = colorize(&format!("error[{}]", self.code), "\x1b[31m", use_color);
        let title = colorize(self.title, color_for_title(self.title), use_color);
        let gutter = " ".repeat(line_num.to_string().len().max(3));

        let mut out = format!(
            "\n{}: {}\n\
            \n\
            ┌─ {}:{}:{}\n\
            │\n\
            {:>3} │ {}\n\
            {} │ {}{} {}\n\
            │\n",
            label,
            title,
            self.file_path,
            line_num,
            col_num,
            line_num,
            error_line,
            gutter,
            " ".repeat(col_num.saturating_sub(1)),
            colorize(&"^".repeat(underline_length), "\x1b[31m", use_color),
            self.message,
        );

        if !self.help.trim().is_empty() {
            out.push_str(&format!("= {}: {}\n", colorize("help", "\x1b[36m", use_color), self.help.trim()));
            out.push_str("│\n");
        }
        out.push_str("└─\n");
        out
    }
}

/// 1-based line and column (in characters) of a byte offset.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = floor_char_boundary(source, offset);
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|idx| idx + 1).unwrap_or(0);
    let col = source[line_start..offset].chars().count() + 1;
    (line, col)
}

/// Width of the caret underline in characters, cut at the end of the line.
fn underline_length(source: &str, start: usize, length: usize) -> usize {
    let start = floor_char_boundary(source, start);
    let end = floor_char_boundary(source, start.saturating_add(length));
    source[start..end]
        .split('\n')
        .next()
        .map(|first| first.chars().count())
        .unwrap_or(0)
        .max(1)
}

fn floor_char_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

pub fn use_color_output() -> bool {
    if cfg!(test) {
        return false;
    }
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }
    true
}

fn colorize(text: &str, color: &str, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    format!("{color}{text}\x1b[0m")
}

fn color_for_title(title: &str) -> &'static str {
    let lower = title.to_ascii_lowercase();
    if lower.contains("parse") {
        return "\x1b[31m";
    }
    if lower.contains("type") || lower.contains("prop") {
        return "\x1b[35m";
    }
    "\x1b[36m"
}
