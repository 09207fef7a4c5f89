//! Plan generation: per-session tracks, the row driver, and the plan shape.

pub mod generate;
pub mod track;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::token::Token;

pub use generate::{GeneratorConfig, PlanGenerator, generate_plan};
pub use track::{Allocation, Track};

/// One drop: a token per session, in session order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanRow {
    tokens: Vec<Token>,
}

impl PlanRow {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, session: usize) -> Option<&Token> {
        self.tokens.get(session)
    }
}

/// Tokens joined by tabs.
impl fmt::Display for PlanRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str("\t")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// A generated plan: session names plus rows in generation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub sessions: Vec<String>,
    pub rows: Vec<PlanRow>,
}

impl Plan {
    /// Every token issued for one session, in drop order.
    pub fn column(&self, session: usize) -> impl Iterator<Item = Token> + '_ {
        self.rows.iter().filter_map(move |row| row.get(session).copied())
    }
}

/// Rows joined by newlines, without a trailing newline.
impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;

    #[test]
    fn renders_tab_and_newline_separated() {
        let plan = Plan {
            sessions: vec!["A".into(), "B".into()],
            rows: vec![
                PlanRow::new(vec![Token::Interval(Interval::new(1, 2).unwrap()), Token::Limit]),
                PlanRow::new(vec![Token::Paused, Token::Reused]),
            ],
        };
        assert_eq!(plan.to_string(), "1-2\tLimite\npause\tX");
        assert_eq!(plan.column(1).collect::<Vec<_>>(), [Token::Limit, Token::Reused]);
    }
}
