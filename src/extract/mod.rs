//! Selector/regex extraction pipeline. Each page shape gets its own module;
//! all of them share the ordered-probe machinery in `probe` and never fail on
//! malformed HTML.

pub mod codes;
pub mod detail;
pub mod list;
mod probe;
