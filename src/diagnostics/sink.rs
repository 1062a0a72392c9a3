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

//! Sinks receiving placeholder evaluation failures

use parking_lot::Mutex;
use std::sync::Arc;

use super::diagnostic::Diagnostic;
use crate::evaluator::EvaluationError;

/// Receiver for non-fatal evaluation failures
///
/// The interpolator calls [`DiagnosticSink::report`] once per failed
/// placeholder with the trimmed expression text and the error. Whatever the
/// sink does has no effect on the interpolated output.
pub trait DiagnosticSink {
    /// Report a failed placeholder
    fn report(&self, expression: &str, error: &EvaluationError);
}

/// Sink that forwards failures to the `log` facade at warn level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, expression: &str, error: &EvaluationError) {
        log::warn!("Failed to evaluate template expression: \"{expression}\": {error}");
    }
}

/// Sink that discards every failure
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl DiagnosticSink for SilentSink {
    fn report(&self, _expression: &str, _error: &EvaluationError) {}
}

/// Sink that records failures as [`Diagnostic`]s
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().clone()
    }

    /// Take everything reported so far, leaving the collector empty
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.lock())
    }

    /// Number of reported failures
    pub fn len(&self) -> usize {
        self.diagnostics.lock().len()
    }

    /// Whether nothing has been reported
    pub fn is_empty(&self) -> bool {
        self.diagnostics.lock().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, expression: &str, error: &EvaluationError) {
        self.diagnostics.lock().push(error.to_diagnostic(expression));
    }
}

/// Adapter turning a closure into a sink
///
/// ```
/// use octofhir_interpolate::{EvaluationError, FnSink, Interpolator};
/// use serde_json::json;
///
/// let interpolator = Interpolator::with_sink(FnSink(|expr: &str, _err: &EvaluationError| {
///     eprintln!("unresolved: {expr}");
/// }));
/// assert_eq!(interpolator.interpolate("~{bad!}", &json!({})), "~{bad!}");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnSink<F>(pub F);

impl<F> DiagnosticSink for FnSink<F>
where
    F: Fn(&str, &EvaluationError),
{
    fn report(&self, expression: &str, error: &EvaluationError) {
        (self.0)(expression, error)
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn report(&self, expression: &str, error: &EvaluationError) {
        (**self).report(expression, error)
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn report(&self, expression: &str, error: &EvaluationError) {
        (**self).report(expression, error)
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn report(&self, expression: &str, error: &EvaluationError) {
        (**self).report(expression, error)
    }
}
