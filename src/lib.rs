//! Final-grade calculation for a single student.
//!
//! This crate re-exports [`gradecalc_core`]; the `gradecalc-cli` binary is the interactive front end.

pub use gradecalc_core::*;
