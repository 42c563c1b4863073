use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Numeric identifier assigned by the entry store on first persist.
/// `ID(0)` denotes an `Entry` that has not been persisted yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ID(i64);

impl ID {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn unset() -> Self {
        Self(0)
    }

    pub fn is_unset(&self) -> bool {
        self.0 <= 0
    }

    pub fn inner(self) -> i64 {
        self.0
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

impl From<i64> for ID {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for ID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug)]
pub enum InvalidIDError {
    #[error("ID: {0} is malformed")]
    Malformed(String),
}

impl FromStr for ID {
    type Err = InvalidIDError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
            .ok_or_else(|| InvalidIDError::Malformed(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_ids_only() {
        assert_eq!("42".parse::<ID>().unwrap(), ID::new(42));
        assert!("0".parse::<ID>().is_err());
        assert!("-3".parse::<ID>().is_err());
        assert!("abc".parse::<ID>().is_err());
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&ID::new(7)).unwrap();
        assert_eq!(json, "7");
        let id: ID = serde_json::from_str("7").unwrap();
        assert_eq!(id, ID::new(7));
    }
}
