//! Ratings lookup.
//!
//! `RatingsStore` is the seam between the engine and wherever ratings live.
//! The in-memory store is loaded from the two JSON rating documents.

use async_trait::async_trait;
use common::{Matchup, PlayerId, TeamId};
use parking_lot::RwLock;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{info, warn};

use crate::error::{ProjectionError, ProjectionResult};
use crate::types::{PlayerRating, StatKind, TeamRating};

/// A player and their rating.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub player: PlayerId,
    pub rating: PlayerRating,
}

impl RosterEntry {
    pub fn new(player: impl Into<PlayerId>, rating: PlayerRating) -> Self {
        Self {
            player: player.into(),
            rating,
        }
    }
}

#[async_trait]
pub trait RatingsStore: Send + Sync {
    /// Rating for a team, if the store has one.
    async fn find_team(&self, team: &TeamId) -> ProjectionResult<Option<TeamRating>>;

    /// Rating used for teams the store does not know.
    fn default_team(&self) -> TeamRating;

    async fn player_rating(&self, player: &PlayerId) -> ProjectionResult<Option<PlayerRating>>;

    /// All players on any of `teams`, ordered by player name.
    async fn players_for_teams(&self, teams: &[TeamId]) -> ProjectionResult<Vec<RosterEntry>>;

    /// Rating for a team, falling back to the default.
    async fn team_rating(&self, team: &TeamId) -> ProjectionResult<TeamRating> {
        match self.find_team(team).await? {
            Some(rating) => Ok(rating),
            None => {
                warn!(team = %team, "No rating for team, using default");
                Ok(self.default_team())
            }
        }
    }

    /// Players from both sides of a matchup.
    async fn roster_for_matchup(&self, matchup: &Matchup) -> ProjectionResult<Vec<RosterEntry>> {
        let roster = self
            .players_for_teams(&[matchup.home.clone(), matchup.away.clone()])
            .await?;
        if roster.is_empty() {
            return Err(ProjectionError::EmptyRoster(format!(
                "no players found for {} or {}",
                matchup.home, matchup.away
            )));
        }
        Ok(roster)
    }
}

/// Player record as it appears in the ratings document.
#[derive(Debug, Deserialize)]
struct PlayerRecord {
    team: TeamId,
    #[serde(default)]
    usage: f64,
    #[serde(default, alias = "points")]
    pts: Option<f64>,
    #[serde(default, alias = "rebounds")]
    reb: Option<f64>,
    #[serde(default, alias = "assists")]
    ast: Option<f64>,
    #[serde(default, alias = "three_made")]
    threes: Option<f64>,
    #[serde(default, alias = "points_rebounds_assists")]
    pra: Option<f64>,
}

impl From<PlayerRecord> for PlayerRating {
    fn from(record: PlayerRecord) -> Self {
        let mut rating = PlayerRating::new(record.team, record.usage);
        for (kind, value) in [
            (StatKind::Points, record.pts),
            (StatKind::Rebounds, record.reb),
            (StatKind::Assists, record.ast),
            (StatKind::ThreeMade, record.threes),
            (StatKind::PointsReboundsAssists, record.pra),
        ] {
            if let Some(value) = value {
                rating.stat_averages.insert(kind, value);
            }
        }
        rating
    }
}

/// Ratings held in memory.
#[derive(Debug)]
pub struct InMemoryRatingsStore {
    teams: RwLock<HashMap<TeamId, TeamRating>>,
    players: RwLock<BTreeMap<PlayerId, PlayerRating>>,
    default_team: TeamRating,
}

impl InMemoryRatingsStore {
    pub fn new(default_team: TeamRating) -> Self {
        Self {
            teams: RwLock::new(HashMap::new()),
            players: RwLock::new(BTreeMap::new()),
            default_team,
        }
    }

    pub fn insert_team(&self, team: impl Into<TeamId>, rating: TeamRating) {
        self.teams.write().insert(team.into(), rating);
    }

    pub fn insert_player(&self, player: impl Into<PlayerId>, rating: PlayerRating) {
        self.players.write().insert(player.into(), rating);
    }

    pub fn team_count(&self) -> usize {
        self.teams.read().len()
    }

    pub fn player_count(&self) -> usize {
        self.players.read().len()
    }

    /// Build a store from the contents of the two rating documents.
    pub fn from_json_str(
        team_json: &str,
        player_json: &str,
        default_team: TeamRating,
    ) -> ProjectionResult<Self> {
        let teams: HashMap<TeamId, TeamRating> = serde_json::from_str(team_json)?;
        let records: BTreeMap<PlayerId, PlayerRecord> = serde_json::from_str(player_json)?;

        let store = Self::new(default_team);
        *store.teams.write() = teams;
        *store.players.write() = records
            .into_iter()
            .map(|(player, record)| (player, record.into()))
            .collect();

        Ok(store)
    }

    /// Read both rating documents from disk.
    pub fn load_json_files(
        team_path: impl AsRef<Path>,
        player_path: impl AsRef<Path>,
        default_team: TeamRating,
    ) -> ProjectionResult<Self> {
        let team_path = team_path.as_ref();
        let player_path = player_path.as_ref();

        let team_json = std::fs::read_to_string(team_path).map_err(|e| {
            ProjectionError::Load(format!("{}: {}", team_path.display(), e))
        })?;
        let player_json = std::fs::read_to_string(player_path).map_err(|e| {
            ProjectionError::Load(format!("{}: {}", player_path.display(), e))
        })?;

        let store = Self::from_json_str(&team_json, &player_json, default_team)?;
        info!(
            teams = store.team_count(),
            players = store.player_count(),
            "Loaded ratings"
        );
        Ok(store)
    }
}

impl Default for InMemoryRatingsStore {
    fn default() -> Self {
        Self::new(TeamRating::default())
    }
}

#[async_trait]
impl RatingsStore for InMemoryRatingsStore {
    async fn find_team(&self, team: &TeamId) -> ProjectionResult<Option<TeamRating>> {
        Ok(self.teams.read().get(team).copied())
    }

    fn default_team(&self) -> TeamRating {
        self.default_team
    }

    async fn player_rating(&self, player: &PlayerId) -> ProjectionResult<Option<PlayerRating>> {
        Ok(self.players.read().get(player).cloned())
    }

    async fn players_for_teams(&self, teams: &[TeamId]) -> ProjectionResult<Vec<RosterEntry>> {
        let players = self.players.read();
        Ok(players
            .iter()
            .filter(|(_, rating)| teams.contains(&rating.team))
            .map(|(player, rating)| RosterEntry::new(player.clone(), rating.clone()))
            .collect())
    }
}
