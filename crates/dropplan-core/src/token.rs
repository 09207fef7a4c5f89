//! Plan tokens: an allocated interval or one of the sentinel labels.
//!
//! The literal sentinel strings are part of the plan text contract and are
//! read back from history rows, so they must not change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::interval::Interval;

/// One cell of a plan row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// A freshly allocated interval.
    Interval(Interval),
    /// The step does not fit before the end of the track (`"Limite"`).
    Limit,
    /// The proposed interval touches a paused range (`"pause"`).
    Paused,
    /// The proposed interval was fully issued in a previous run (`"X"`).
    Reused,
}

impl Token {
    pub const LIMIT: &str = "Limite";
    pub const PAUSED: &str = "pause";
    pub const REUSED: &str = "X";

    /// The allocated interval, if this token is not a sentinel.
    pub fn interval(&self) -> Option<Interval> {
        match self {
            Self::Interval(interval) => Some(*interval),
            _ => None,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        !matches!(self, Self::Interval(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interval(interval) => fmt::Display::fmt(interval, f),
            Self::Limit => f.write_str(Self::LIMIT),
            Self::Paused => f.write_str(Self::PAUSED),
            Self::Reused => f.write_str(Self::REUSED),
        }
    }
}

impl FromStr for Token {
    type Err = TokenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            Self::LIMIT => Ok(Self::Limit),
            Self::PAUSED => Ok(Self::Paused),
            Self::REUSED => Ok(Self::Reused),
            other => other
                .parse::<Interval>()
                .map(Self::Interval)
                .map_err(|_| TokenParseError(s.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Token`] string.
#[derive(Debug, Clone)]
pub struct TokenParseError(pub String);

impl fmt::Display for TokenParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid plan token: {:?}", self.0)
    }
}

impl std::error::Error for TokenParseError {}

// Tokens travel as their literal text in JSON output too.
impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Token {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_render_verbatim() {
        assert_eq!(Token::Limit.to_string(), "Limite");
        assert_eq!(Token::Paused.to_string(), "pause");
        assert_eq!(Token::Reused.to_string(), "X");
        let interval = Interval::new(3, 5).unwrap();
        assert_eq!(Token::Interval(interval).to_string(), "3-5");
    }

    #[test]
    fn parses_every_token_form() {
        assert_eq!("Limite".parse::<Token>().unwrap(), Token::Limit);
        assert_eq!("pause".parse::<Token>().unwrap(), Token::Paused);
        assert_eq!("X".parse::<Token>().unwrap(), Token::Reused);
        assert_eq!(
            "10-19".parse::<Token>().unwrap(),
            Token::Interval(Interval::new(10, 19).unwrap())
        );
    }

    #[test]
    fn rejects_unknown_labels() {
        // Sentinel matching is case sensitive.
        for bad in ["limite", "PAUSE", "x", "", "1-"] {
            assert!(bad.parse::<Token>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn json_uses_literal_text() {
        let tokens = vec![Token::Limit, Token::Interval(Interval::point(7))];
        let json = serde_json::to_string(&tokens).unwrap();
        assert_eq!(json, r#"["Limite","7-7"]"#);
        let back: Vec<Token> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tokens);
    }

    #[test]
    fn interval_accessor() {
        assert!(Token::Paused.is_sentinel());
        assert_eq!(Token::Reused.interval(), None);
        let interval = Interval::new(1, 2).unwrap();
        assert_eq!(Token::Interval(interval).interval(), Some(interval));
    }
}
