//! The redaction engine: type-preserving deep copies driven by an ordered
//! filter chain.
//!
//! [`Redact`] is the visit-fields trait implemented here for scalars, strings
//! and std containers, and derivable for structs with `#[derive(Redact)]`.
//! [`FilterChain`] holds the [`Filter`]s deciding what gets masked and how
//! strings are rewritten.

mod engine;
mod filter;
mod filters;

pub use engine::Redact;
pub use filter::{Filter, FilterChain};
pub use filters::{
    FieldFilter, FieldPrefixFilter, PatternFilter, TagFilter, TypeFilter, ValueFilter,
};

// The derive macro shares the trait's name, serde-style.
pub use scrublog_derive::Redact;
