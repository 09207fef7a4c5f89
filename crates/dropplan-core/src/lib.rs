//! Interval plan generation for independent sessions on cyclic numbering
//! tracks.
//!
//! The engine ([`plan`]) is a pure function of structured [`Session`]
//! records. The [`text`] module is the adapter that turns the tab-delimited
//! plan description into sessions and renders generated plans back.

pub mod error;
pub mod interval;
pub mod plan;
pub mod session;
pub mod text;
pub mod token;

pub use error::{FaultKind, PlanFault};
pub use interval::Interval;
pub use plan::{GeneratorConfig, Plan, PlanGenerator, PlanRow, generate_plan};
pub use session::Session;
pub use text::{OutputFormat, PlanText, PlanTextError, parse_plan_text};
pub use token::Token;
