//! Stimulus-script harness for the counter model.

/// Error types for script loading and parsing.
pub mod errors;
pub use errors::{HarnessError, ScriptError};

/// Stimulus script syntax and parser.
pub mod script;
/// Edge-by-edge script execution engine.
pub mod runner;
