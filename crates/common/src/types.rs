//! Common types used across HoopsEdge
//!
//! This module provides the fundamental domain types used throughout
//! the projection and simulation crates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

/// Team identifier as it appears in the ratings store (e.g., "Celtics")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub String);

impl TeamId {
    /// Create a new TeamId
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the team name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TeamId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TeamId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Player identifier as it appears in the ratings store
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new PlayerId
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the player name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Which side of a matchup a team plays on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeAway {
    /// Team hosting the game
    Home,
    /// Visiting team
    Away,
}

impl HomeAway {
    /// Returns true for the home side
    pub fn is_home(&self) -> bool {
        matches!(self, HomeAway::Home)
    }
}

impl std::fmt::Display for HomeAway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HomeAway::Home => write!(f, "home"),
            HomeAway::Away => write!(f, "away"),
        }
    }
}

/// A single game between two teams
///
/// The textual form is `"Away @ Home"`, the way a scoreboard lists games.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Matchup {
    /// Visiting team
    pub away: TeamId,
    /// Hosting team
    pub home: TeamId,
}

impl Matchup {
    /// Create a matchup from the away and home team
    pub fn new(away: impl Into<TeamId>, home: impl Into<TeamId>) -> Self {
        Self {
            away: away.into(),
            home: home.into(),
        }
    }

    /// Side a team plays on, if it is part of this matchup
    pub fn side_of(&self, team: &TeamId) -> Option<HomeAway> {
        if *team == self.home {
            Some(HomeAway::Home)
        } else if *team == self.away {
            Some(HomeAway::Away)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Matchup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}", self.away, self.home)
    }
}

impl FromStr for Matchup {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (away, home) = s
            .split_once(" @ ")
            .ok_or_else(|| Error::invalid_matchup(format!("expected 'Away @ Home', got '{}'", s)))?;

        let away = away.trim();
        let home = home.trim();
        if away.is_empty() || home.is_empty() {
            return Err(Error::invalid_matchup(format!("matchup '{}' is missing a team", s)));
        }
        if away == home {
            return Err(Error::invalid_matchup(format!("team '{}' cannot play itself", away)));
        }

        Ok(Self::new(away, home))
    }
}

/// True when `game_date` is the second of two consecutive calendar days
pub fn is_back_to_back(previous_game: Option<NaiveDate>, game_date: NaiveDate) -> bool {
    previous_game
        .map(|prev| game_date.signed_duration_since(prev).num_days() == 1)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matchup_parse() {
        let matchup: Matchup = "Lakers @ Celtics".parse().unwrap();
        assert_eq!(matchup.away.as_str(), "Lakers");
        assert_eq!(matchup.home.as_str(), "Celtics");
        assert_eq!(matchup.to_string(), "Lakers @ Celtics");
    }

    #[test]
    fn test_matchup_parse_rejects_garbage() {
        assert!("Lakers vs Celtics".parse::<Matchup>().is_err());
        assert!(" @ Celtics".parse::<Matchup>().is_err());
        assert_eq!(
            "Heat @ Heat".parse::<Matchup>(),
            Err(Error::InvalidMatchup("team 'Heat' cannot play itself".to_string()))
        );
    }

    #[test]
    fn test_matchup_sides() {
        let matchup = Matchup::new("Lakers", "Celtics");
        assert_eq!(matchup.side_of(&TeamId::from("Celtics")), Some(HomeAway::Home));
        assert_eq!(matchup.side_of(&TeamId::from("Lakers")), Some(HomeAway::Away));
        assert_eq!(matchup.side_of(&TeamId::from("Knicks")), None);
        assert!(HomeAway::Home.is_home());
    }

    #[test]
    fn test_back_to_back() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let last_week = NaiveDate::from_ymd_opt(2024, 12, 26).unwrap();

        assert!(is_back_to_back(Some(yesterday), today));
        assert!(!is_back_to_back(Some(last_week), today));
        assert!(!is_back_to_back(None, today));
    }

    #[test]
    fn test_ids_serialize_as_strings() {
        let id = PlayerId::from("Jayson Tatum");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"Jayson Tatum\"");
    }
}
