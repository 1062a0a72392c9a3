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

//! `~{expr}` template interpolation over JSON contexts
//!
//! Placeholders hold a tiny expression language: string, boolean, null and
//! numeric literals, dotted paths into the context, and one
//! `cond ? a : b` conditional. Interpolation is total: a placeholder that
//! cannot be evaluated stays in the output verbatim and is reported to a
//! [`DiagnosticSink`].
//!
//! ```
//! use octofhir_interpolate::interpolate_template;
//! use serde_json::json;
//!
//! let ctx = json!({"config": {"api": {"baseUrl": "https://x"}}, "user": {"id": "123"}});
//! assert_eq!(
//!     interpolate_template("~{config.api.baseUrl}/users/~{user.id}", &ctx),
//!     "https://x/users/123"
//! );
//! ```

pub mod diagnostics;
pub mod evaluator;
pub mod model;
pub mod template;

// Re-export main types
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, FnSink, LogSink, SilentSink};
pub use evaluator::{EvaluationError, EvaluationResult, evaluate, resolve};
pub use model::{EvaluatedValue, Node, Opaque, Scalar};
pub use template::{Interpolator, interpolate_deep, interpolate_json, interpolate_template};
