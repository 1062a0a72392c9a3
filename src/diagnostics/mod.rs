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

//! Diagnostic reporting for unresolved placeholders
//!
//! Placeholder failures never abort interpolation. They are handed to a
//! [`DiagnosticSink`], which may log them, drop them, or collect them as
//! [`Diagnostic`] records for later formatting.

#![warn(missing_docs)]

pub mod diagnostic;
pub mod formatter;
pub mod sink;

pub use diagnostic::{Diagnostic, DiagnosticCode, Severity};
pub use formatter::{DiagnosticFormatter, Format};
pub use sink::{CollectingSink, DiagnosticSink, FnSink, LogSink, SilentSink};
