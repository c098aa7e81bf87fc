//! Procurement portals the search service can query.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// A bid portal selectable in a search request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// National government procurement portal
    Gov,
    /// Tokyo Metropolitan Government
    Tokyo,
    /// Kanagawa Prefecture
    Kanagawa,
}

impl Source {
    /// Every source, in the order the service lists them
    pub const ALL: [Source; 3] = [Source::Gov, Source::Tokyo, Source::Kanagawa];

    /// Identifier sent in the `sources` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Gov => "gov",
            Source::Tokyo => "tokyo",
            Source::Kanagawa => "kanagawa",
        }
    }

    /// Label the service uses in result records
    pub fn display_name(&self) -> &'static str {
        match self {
            Source::Gov => "Gov Portal",
            Source::Tokyo => "Tokyo Metro",
            Source::Kanagawa => "Kanagawa",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gov" => Ok(Source::Gov),
            "tokyo" => Ok(Source::Tokyo),
            "kanagawa" => Ok(Source::Kanagawa),
            other => Err(ValidationError::UnknownSource(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_round_trips_through_str() {
        for source in Source::ALL {
            assert_eq!(source.as_str().parse::<Source>().unwrap(), source);
        }
    }

    #[test]
    fn test_source_parse_is_case_insensitive() {
        assert_eq!(" Tokyo ".parse::<Source>().unwrap(), Source::Tokyo);
        assert_eq!("GOV".parse::<Source>().unwrap(), Source::Gov);
    }

    #[test]
    fn test_unknown_source() {
        assert_eq!(
            "osaka".parse::<Source>(),
            Err(ValidationError::UnknownSource("osaka".to_string()))
        );
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Source::Gov.display_name(), "Gov Portal");
        assert_eq!(Source::Kanagawa.to_string(), "kanagawa");
    }

    #[test]
    fn test_order_matches_service_listing() {
        let mut sources = vec![Source::Kanagawa, Source::Gov, Source::Tokyo];
        sources.sort();
        assert_eq!(sources, Source::ALL.to_vec());
    }
}
