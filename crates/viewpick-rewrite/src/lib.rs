#![forbid(unsafe_code)]
//! viewpick-rewrite: rewrite each model's query so it stands alone.
//!
//! References to upstream *models* are replaced by the upstream's own
//! (already-inlined) query text in parentheses; references to raw source
//! tables stay as they are. After one pass every model, destination nodes
//! included, carries a query with no dependency on intermediate
//! materialized tables.

pub mod inline;

pub use inline::inline_all;
