//! Plan text adapter: description parsing and plan rendering.

pub mod format;
pub mod parser;

pub use format::{OutputFormat, render};
pub use parser::{PlanText, PlanTextError, parse_plan_text};
