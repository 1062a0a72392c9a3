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

//! Template expression evaluator
//!
//! Resolves dotted paths against a JSON context and evaluates the small
//! expression language found inside `~{...}` placeholders: string, keyword
//! and numeric literals, identifier paths, and a single ternary form.

#![warn(missing_docs)]

mod error;
mod expression;
mod path;

pub use error::{EvaluationError, EvaluationResult};
pub use expression::{evaluate, is_identifier_path};
pub use path::{is_segment_continue, is_segment_start, resolve};
