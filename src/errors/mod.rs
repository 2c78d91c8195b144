//! Parse diagnostics.
//!
//! Every recoverable parse failure becomes an [`errors::Error`]: a
//! `thiserror`-derived message plus the source position of the offending
//! token. Errors never abort a parse; the parser collects them in order.

pub mod errors;
