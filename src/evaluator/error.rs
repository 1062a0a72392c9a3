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

// Error types for template expression evaluation

use crate::diagnostics::{Diagnostic, DiagnosticCode};
use thiserror::Error;

/// Result type for evaluation operations
pub type EvaluationResult<T> = Result<T, EvaluationError>;

/// Errors that can occur while evaluating a template expression
///
/// A malformed ternary (missing colon, empty branch) has no variant of its
/// own: it is evaluated as a single value and surfaces as
/// [`EvaluationError::UnsupportedExpression`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvaluationError {
    /// Expression matches none of the recognised forms
    #[error("Invalid or unsupported expression: \"{expression}\"")]
    UnsupportedExpression {
        /// The offending expression text
        expression: String,
    },
}

impl EvaluationError {
    /// Create an unsupported expression error
    pub fn unsupported(expression: impl Into<String>) -> Self {
        Self::UnsupportedExpression {
            expression: expression.into(),
        }
    }

    /// The expression text the error refers to
    pub fn expression(&self) -> &str {
        match self {
            Self::UnsupportedExpression { expression } => expression,
        }
    }

    /// Convert to a diagnostic
    ///
    /// `placeholder` is the full trimmed placeholder expression, which may be
    /// wider than [`Self::expression`] when the failure came from a ternary
    /// branch.
    pub fn to_diagnostic(&self, placeholder: &str) -> Diagnostic {
        match self {
            Self::UnsupportedExpression { .. } => {
                Diagnostic::warning(DiagnosticCode::UnsupportedExpression, placeholder)
                    .with_message(self.to_string())
            }
        }
    }
}
