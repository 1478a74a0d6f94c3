//! Parser error handling.
//!
//! spec.md §7 calls for a single-fatal-error model: the first problem a parse
//! hits stops it, carrying just enough context (a position and the stack of
//! enclosing block names) to point at the mistake. This drops the teacher's
//! richer `Severity`/hint/related-location/multi-error-accumulation model —
//! there is nothing here to recover into, so there is nothing to accumulate.

mod error;

pub use error::{Breadcrumb, ParseError};
