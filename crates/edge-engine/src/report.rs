//! Records returned by the engine.

use chrono::NaiveDate;
use common::{is_back_to_back, Matchup, PlayerId, TeamId};
use odds::EdgeResult;
use projection::{
    InjuryDesignation, PlayerProjection, StatKind, TeamProjection, TeamRating, UsageAdjustment,
};
use serde::Serialize;
use simulation::GameSampleSet;
use std::collections::{BTreeMap, BTreeSet};

use crate::market::BothSides;

/// Caller-supplied circumstances of one game.
#[derive(Debug, Clone, Default)]
pub struct GameContext {
    /// Applied per team in this order.
    pub designations: Vec<InjuryDesignation>,
    /// Teams playing the second night of a back-to-back.
    pub back_to_back: BTreeSet<TeamId>,
    /// Extra projection cut for players playing through an injury, in percent.
    pub injury_impact: BTreeMap<PlayerId, f64>,
}

impl GameContext {
    pub fn with_designation(mut self, designation: InjuryDesignation) -> Self {
        self.designations.push(designation);
        self
    }

    pub fn with_back_to_back(mut self, team: impl Into<TeamId>) -> Self {
        self.back_to_back.insert(team.into());
        self
    }

    /// Mark `team` as on a back-to-back when its previous game was the day
    /// before `game_date`.
    pub fn with_last_game(
        mut self,
        team: impl Into<TeamId>,
        previous_game: Option<NaiveDate>,
        game_date: NaiveDate,
    ) -> Self {
        if is_back_to_back(previous_game, game_date) {
            self.back_to_back.insert(team.into());
        }
        self
    }

    pub fn is_out(&self, player: &PlayerId) -> bool {
        self.designations
            .iter()
            .any(|d| &d.player == player && d.status == projection::InjuryStatus::Out)
    }
}

/// Ratings and projected scores for both teams.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupProjection {
    pub matchup: Matchup,
    pub home_rating: TeamRating,
    pub away_rating: TeamRating,
    pub home: TeamProjection,
    pub away: TeamProjection,
}

/// Summary of one simulated game and the markets priced from it.
#[derive(Debug, Clone, Serialize)]
pub struct GameReport {
    pub projection: MatchupProjection,
    pub n_draws: usize,
    pub mean_home: f64,
    pub mean_away: f64,
    pub mean_margin: f64,
    pub mean_total: f64,
    pub suggested_total_line: f64,
    pub home_win_probability: f64,
    pub markets: Vec<BothSides>,
}

impl GameReport {
    pub fn new(
        projection: MatchupProjection,
        samples: &GameSampleSet,
        markets: Vec<BothSides>,
    ) -> Self {
        Self {
            projection,
            n_draws: samples.n_draws(),
            mean_home: samples.mean_home(),
            mean_away: samples.mean_away(),
            mean_margin: samples.mean_margin(),
            mean_total: samples.mean_total(),
            suggested_total_line: samples.suggested_total_line(),
            home_win_probability: samples.home_win_probability(),
            markets,
        }
    }
}

/// Prop market request for every active player in a matchup.
#[derive(Debug, Clone)]
pub struct PropRequest {
    pub stat: StatKind,
    /// American odds applied to both sides
    pub odds: i32,
    /// Lines by player; players without one get `suggested_prop_line`.
    pub lines: BTreeMap<PlayerId, f64>,
}

impl PropRequest {
    pub fn new(stat: StatKind, odds: i32) -> Self {
        Self {
            stat,
            odds,
            lines: BTreeMap::new(),
        }
    }

    pub fn with_line(mut self, player: impl Into<PlayerId>, line: f64) -> Self {
        self.lines.insert(player.into(), line);
        self
    }
}

/// Half-point line nearest to a projected mean.
pub fn suggested_prop_line(mean: f64) -> f64 {
    (mean - 0.5).round() + 0.5
}

/// One player's prop priced on both sides.
#[derive(Debug, Clone, Serialize)]
pub struct PropEvaluation {
    pub player: PlayerId,
    pub team: TeamId,
    pub is_home: bool,
    pub original_usage: f64,
    pub adjusted_usage: f64,
    pub projection: PlayerProjection,
    pub line: f64,
    pub simulated_mean: f64,
    pub p10: f64,
    pub p90: f64,
    pub over: EdgeResult,
    pub under: EdgeResult,
}

impl PropEvaluation {
    /// The side with the larger edge.
    pub fn best_side(&self) -> (&'static str, &EdgeResult) {
        if self.over.edge >= self.under.edge {
            ("over", &self.over)
        } else {
            ("under", &self.under)
        }
    }
}

/// Usage table and prop edges for a matchup.
#[derive(Debug, Clone, Serialize)]
pub struct RosterPropsReport {
    pub matchup: Matchup,
    pub stat: StatKind,
    pub usage: Vec<UsageAdjustment>,
    pub props: Vec<PropEvaluation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_prop_line() {
        assert_eq!(suggested_prop_line(25.3), 25.5);
        assert_eq!(suggested_prop_line(25.9), 25.5);
        assert_eq!(suggested_prop_line(26.1), 26.5);
        assert_eq!(suggested_prop_line(0.2), 0.5);
    }

    #[test]
    fn test_context_out_lookup() {
        let context = GameContext::default()
            .with_designation(InjuryDesignation::out("Star"))
            .with_designation(InjuryDesignation::limited("Wing", 20.0));

        assert!(context.is_out(&PlayerId::from("Star")));
        assert!(!context.is_out(&PlayerId::from("Wing")));
        assert!(!context.is_out(&PlayerId::from("Bench")));
    }

    #[test]
    fn test_last_game_marks_back_to_back() {
        let game = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let context = GameContext::default()
            .with_last_game("Lakers", NaiveDate::from_ymd_opt(2025, 1, 14), game)
            .with_last_game("Celtics", NaiveDate::from_ymd_opt(2025, 1, 12), game)
            .with_last_game("Knicks", None, game);

        assert!(context.back_to_back.contains(&TeamId::from("Lakers")));
        assert!(!context.back_to_back.contains(&TeamId::from("Celtics")));
        assert_eq!(context.back_to_back.len(), 1);
    }
}
