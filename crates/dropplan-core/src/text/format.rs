//! Rendering generated plans for output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::plan::Plan;

/// How a generated plan is written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Tab-separated tokens, one row per line. Pastes back as history rows.
    #[default]
    Text,
    /// `{"sessions": [...], "rows": [[...], ...]}`
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Text => "text",
            Self::Json => "json",
        };
        f.write_str(s)
    }
}

impl FromStr for OutputFormat {
    type Err = OutputFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(OutputFormatParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`OutputFormat`] string.
#[derive(Debug, Clone)]
pub struct OutputFormatParseError(pub String);

impl fmt::Display for OutputFormatParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid output format: {:?} (expected text or json)", self.0)
    }
}

impl std::error::Error for OutputFormatParseError {}

/// Render `plan` in the requested format, terminated by a newline.
pub fn render(plan: &Plan, format: OutputFormat) -> Result<String, serde_json::Error> {
    let mut out = match format {
        OutputFormat::Text => plan.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(plan)?,
    };
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;
    use crate::plan::PlanRow;
    use crate::token::Token;

    fn sample() -> Plan {
        Plan {
            sessions: vec!["A".into(), "B".into()],
            rows: vec![
                PlanRow::new(vec![Token::Interval(Interval::new(1, 2).unwrap()), Token::Reused]),
                PlanRow::new(vec![Token::Interval(Interval::new(3, 4).unwrap()), Token::Limit]),
            ],
        }
    }

    #[test]
    fn text_output_is_tab_separated() {
        let out = render(&sample(), OutputFormat::Text).unwrap();
        assert_eq!(out, "1-2\tX\n3-4\tLimite\n");
    }

    #[test]
    fn json_output_carries_names_and_literal_tokens() {
        let out = render(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["sessions"], serde_json::json!(["A", "B"]));
        assert_eq!(value["rows"][0], serde_json::json!(["1-2", "X"]));
        assert_eq!(value["rows"][1][1], "Limite");

        let back: Plan = serde_json::from_str(&out).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn format_names_round_trip() {
        for format in [OutputFormat::Text, OutputFormat::Json] {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
