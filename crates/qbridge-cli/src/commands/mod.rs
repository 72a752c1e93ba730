//! CLI command implementations.

pub mod common;
pub mod convert;
pub mod demo;
pub mod roundtrip;
pub mod target;
pub mod version;
