// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Formatting diagnostics for different output formats

use super::diagnostic::Diagnostic;
#[cfg(feature = "terminal")]
use super::diagnostic::Severity;

/// Output format for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
    /// Compact single-line format
    Compact,
}

/// Formatter for diagnostics
pub struct DiagnosticFormatter {
    format: Format,
    show_code: bool,
    #[cfg(feature = "terminal")]
    use_color: bool,
}

impl DiagnosticFormatter {
    /// Create a new formatter
    pub fn new(format: Format) -> Self {
        Self {
            format,
            show_code: true,
            #[cfg(feature = "terminal")]
            use_color: true,
        }
    }

    /// Set whether to show diagnostic codes
    pub fn with_code(mut self, show: bool) -> Self {
        self.show_code = show;
        self
    }

    /// Set whether to use color (terminal feature only)
    #[cfg(feature = "terminal")]
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// Format a diagnostic
    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        match self.format {
            Format::Text => self.format_text(diagnostic),
            Format::Json => self.format_json(diagnostic),
            Format::Compact => self.format_compact(diagnostic),
        }
    }

    /// Format multiple diagnostics
    pub fn format_all(&self, diagnostics: &[Diagnostic]) -> String {
        match self.format {
            Format::Text => diagnostics
                .iter()
                .map(|d| self.format_text(d))
                .collect::<Vec<_>>()
                .join("\n"),
            Format::Json => serde_json::to_string_pretty(diagnostics)
                .unwrap_or_else(|_| format!("{diagnostics:?}")),
            Format::Compact => diagnostics
                .iter()
                .map(|d| self.format_compact(d))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    fn format_text(&self, diagnostic: &Diagnostic) -> String {
        let mut result = String::new();

        #[cfg(feature = "terminal")]
        if self.use_color {
            use colored::Colorize;
            let severity_str = match diagnostic.severity {
                Severity::Warning => "warning".yellow().bold(),
            };

            result.push_str(&format!("{}: {}", severity_str, diagnostic.message.bold()));
        } else {
            result.push_str(&format!("{}: {}", diagnostic.severity, diagnostic.message));
        }

        #[cfg(not(feature = "terminal"))]
        result.push_str(&format!("{}: {}", diagnostic.severity, diagnostic.message));

        if self.show_code {
            result.push_str(&format!(" [{}]", diagnostic.code_string()));
        }

        result.push('\n');
        result.push_str(&format!("  --> ~{{{}}}\n", diagnostic.expression));
        result
    }

    fn format_json(&self, diagnostic: &Diagnostic) -> String {
        serde_json::to_string_pretty(diagnostic).unwrap_or_else(|_| format!("{diagnostic:?}"))
    }

    fn format_compact(&self, diagnostic: &Diagnostic) -> String {
        let code = if self.show_code {
            format!("[{}] ", diagnostic.code_string())
        } else {
            String::new()
        };

        format!(
            "~{{{}}}: {}: {}{}",
            diagnostic.expression, diagnostic.severity, code, diagnostic.message
        )
    }
}

impl Default for DiagnosticFormatter {
    fn default() -> Self {
        Self::new(Format::Text)
    }
}
