//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes defining commands, parsing arguments, interactive prompts, and
//! rendering search results.

mod commands;
mod output;
mod prompts;

pub use commands::*;
pub use output::*;
pub use prompts::*;
