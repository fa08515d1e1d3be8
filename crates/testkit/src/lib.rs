#![warn(missing_docs)]
//! Headless testing surfaces: a wired scene/host harness and tick stepping.

mod harness;

pub use harness::*;
