//! Formwork Core
//!
//! Ambient services shared by the Formwork crates: logging bootstrap,
//! configuration, profiling hooks and fast hash collections.

pub mod alloc;
pub mod config;
pub mod logging;
pub mod profiling;

pub use config::{BenchmarkMode, Config};
