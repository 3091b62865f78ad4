//! Shared primitive types used by the scanner and the stripper.

pub mod span;

pub use span::{Position, Span};
