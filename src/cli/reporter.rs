use colored::Colorize;
use flowgen_common::{Diagnostic, DiagnosticCategory, LineMap};
use rustc_hash::FxHashMap;
use std::path::Path;

/// Renders diagnostics as `file:line:col - warning FG<code>: message`.
///
/// Sources are read lazily to turn byte offsets into positions; a file that
/// cannot be read is reported by name only.
pub struct Reporter {
    color: bool,
    sources: FxHashMap<String, String>,
    line_maps: FxHashMap<String, LineMap>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: FxHashMap::default(),
            line_maps: FxHashMap::default(),
        }
    }

    /// Provide the text of `file` up front instead of reading it from disk.
    pub fn add_source(&mut self, file: impl Into<String>, text: impl Into<String>) {
        let file = file.into();
        self.line_maps.remove(&file);
        self.sources.insert(file, text.into());
    }

    pub fn render(&mut self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    /// One serialized diagnostic per line.
    pub fn render_json(diagnostics: &[Diagnostic]) -> serde_json::Result<String> {
        let lines = diagnostics
            .iter()
            .map(serde_json::to_string)
            .collect::<serde_json::Result<Vec<_>>>()?;
        Ok(lines.join("\n"))
    }

    pub fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> String {
        let location = match self.format_location(&diagnostic.file, diagnostic.start) {
            Some(location) => location,
            None if !diagnostic.file.is_empty() => diagnostic.file.clone(),
            None => "<unknown>".to_string(),
        };
        format!(
            "{location} - {} {}: {}",
            self.format_category(diagnostic.category),
            self.format_code(diagnostic.code),
            diagnostic.message_text
        )
    }

    fn format_location(&mut self, file: &str, offset: u32) -> Option<String> {
        if file.is_empty() {
            return None;
        }
        let (line, column) = self.position_for(file, offset)?;
        Some(format!("{file}:{line}:{column}"))
    }

    fn position_for(&mut self, file: &str, offset: u32) -> Option<(u32, u32)> {
        self.ensure_source(file)?;
        let source = self.sources.get(file)?;
        let line_map = self
            .line_maps
            .entry(file.to_string())
            .or_insert_with(|| LineMap::build(source));
        let position = line_map.offset_to_position(offset, source);
        Some((position.line + 1, position.character + 1))
    }

    fn ensure_source(&mut self, file: &str) -> Option<()> {
        if !self.sources.contains_key(file) {
            let contents = std::fs::read_to_string(Path::new(file)).ok()?;
            self.sources.insert(file.to_string(), contents);
        }
        Some(())
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        };
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format!("FG{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}
