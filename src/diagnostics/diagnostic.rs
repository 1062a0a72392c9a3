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

//! Core diagnostic types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity levels
///
/// A failed placeholder never aborts rendering, so every diagnostic is a
/// warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// The placeholder was left unresolved
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Diagnostic codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum DiagnosticCode {
    /// Expression matches no recognised form
    UnsupportedExpression,
}

impl DiagnosticCode {
    /// Short code shown next to messages
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::UnsupportedExpression => "T0001",
        }
    }
}

/// A failed placeholder, as reported to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity of the diagnostic
    pub severity: Severity,
    /// Diagnostic code
    pub code: DiagnosticCode,
    /// Human-readable message
    pub message: String,
    /// Trimmed placeholder expression that failed
    pub expression: String,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            expression: expression.into(),
        }
    }

    /// Create a warning with an empty message
    pub fn warning(code: DiagnosticCode, expression: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, String::new(), expression)
    }

    /// Set the message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the code as a string
    pub fn code_string(&self) -> String {
        self.code.as_str().to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}] in ~{{{}}}",
            self.severity,
            self.message,
            self.code_string(),
            self.expression
        )
    }
}
