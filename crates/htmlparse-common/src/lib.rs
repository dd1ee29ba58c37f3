//! Common utilities shared by the htmlparse crates.
//!
//! - **Warning System** - deduplicated, colored diagnostics on stderr

pub mod warning;
