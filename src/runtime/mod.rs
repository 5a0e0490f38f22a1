// src/runtime/mod.rs
//! Runtime components for evaluating rule trees

pub mod diagnostics;
pub mod evaluator;
pub mod value;

pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use evaluator::Evaluator;
pub use value::{Lookup, Record, Value};
