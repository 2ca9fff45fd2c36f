//! Command parsing and dispatch for ComStat.
//!
//! An input line is normalized, matched against the domain catalog, and
//! turned into a `ParsedCommand`. The interpreter then renders inventory
//! data or returns a signal (`Monitor`, `Exit`) for the app to act on.

pub mod catalog;
mod interpreter;
pub mod monitor;
pub mod parser;
pub mod render;
pub mod sinks;

/// Top-level command domain.
pub use catalog::Domain;
/// Output produced by a command (text or app signal).
pub use interpreter::CommandOutput;
/// Parses and dispatches input lines.
pub use interpreter::CommandInterpreter;
/// Everything a command may touch.
pub use interpreter::Environment;
/// User-facing line for a failed command.
pub use interpreter::error_text;
/// Stop signal for the load monitor.
pub use monitor::{CancelToken, run_monitor};
/// Parse a raw input line.
pub use parser::{ParsedCommand, parse_command};
