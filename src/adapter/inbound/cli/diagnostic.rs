//! Miette-based diagnostics for configuration files.
//!
//! `config validate` re-reads the file and, when TOML parsing fails,
//! renders the offending span with a label and a help line.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(marketdeck::config))]
pub struct ConfigDiagnostic {
    /// Human-readable error message.
    pub message: String,

    /// Source content (the configuration file).
    #[source_code]
    pub src: miette::NamedSource<String>,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: SourceSpan,

    /// Optional help text with suggestions for fixing the error.
    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        name: impl AsRef<str>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: miette::NamedSource::new(name, src.into()),
            span: (offset, len).into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Build a diagnostic from a TOML parse failure, if it carries a span.
    #[must_use]
    pub fn from_toml(name: &str, src: &str, err: &toml::de::Error) -> Option<Self> {
        let span = err.span()?;
        let len = span.end.saturating_sub(span.start).max(1);
        Some(
            Self::new(err.message().to_string(), name, src, span.start, len)
                .with_help("see config.toml.example for the expected layout"),
        )
    }

    /// Render with miette's graphical handler.
    #[must_use]
    pub fn render(&self, color: bool) -> String {
        let theme = if color {
            miette::GraphicalTheme::unicode()
        } else {
            miette::GraphicalTheme::unicode_nocolor()
        };
        let handler = miette::GraphicalReportHandler::new_themed(theme);
        let mut out = String::new();
        if handler.render_report(&mut out, self).is_err() {
            return self.message.clone();
        }
        out
    }
}
