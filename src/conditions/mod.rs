//! condition evaluation system for form rules
//!
//! provides the named comparison kinds used throughout a form schema:
//! - truthiness and presence checks: true, false, empty, not empty,
//!   null, not null
//! - numeric comparisons: less than, greater than, equal, not equal,
//!   between
//! - pattern matching: matches (regular expression)
//!
//! conditions gate field visibility, read-only state, and rule triggers
//! via the `when` field of a schema.

mod eval;
mod types;

pub use eval::{evaluate, list_matches, ConditionError};
pub use types::{CombineMode, Condition, ConditionKind, ConditionSet};
