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

//! `~{expr}` placeholder substitution

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::evaluator::evaluate;

/// `~{`, the shortest run of non-`}` characters, `}`
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"~\{([^}]*)\}").expect("valid placeholder pattern"));

/// Template interpolation engine
///
/// Holds the diagnostic sink that receives placeholder failures. The engine
/// itself is stateless, so one instance can serve any number of templates
/// and contexts, from several threads when the sink allows it.
#[derive(Debug, Clone, Default)]
pub struct Interpolator<S = LogSink> {
    sink: S,
}

impl Interpolator<LogSink> {
    /// Create an interpolator that logs failures at warn level
    pub fn new() -> Self {
        Self { sink: LogSink }
    }
}

impl<S: DiagnosticSink> Interpolator<S> {
    /// Create an interpolator reporting failures to `sink`
    pub fn with_sink(sink: S) -> Self {
        Self { sink }
    }

    /// Get the diagnostic sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the interpolator, returning its sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Replace every `~{expr}` in `template` with its evaluated text
    ///
    /// Text outside placeholders is copied unchanged. A placeholder whose
    /// expression fails to evaluate is kept verbatim and reported to the sink;
    /// its siblings are unaffected. Substituted text is not scanned again.
    pub fn interpolate(&self, template: &str, context: &Value) -> String {
        PLACEHOLDER
            .replace_all(template, |caps: &Captures<'_>| {
                self.render_placeholder(&caps[0], &caps[1], context)
            })
            .into_owned()
    }

    fn render_placeholder(&self, matched: &str, inner: &str, context: &Value) -> String {
        let expression = inner.trim();
        if expression.is_empty() {
            return String::new();
        }

        match evaluate(expression, context) {
            Ok(value) => value.to_template_string(),
            Err(error) => {
                self.sink.report(expression, &error);
                matched.to_string()
            }
        }
    }
}

/// Interpolate `template` against `context`, logging failures
pub fn interpolate_template(template: &str, context: &Value) -> String {
    Interpolator::new().interpolate(template, context)
}
