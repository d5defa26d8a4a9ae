//! CLI module - argument parsing, request loop and report rendering

pub mod args;
pub mod completions;
pub mod report;
pub mod request;
pub mod session;

pub use args::{Cli, OutputFormat};
pub use report::Reporter;
pub use request::Request;
pub use session::{Flow, Session};
