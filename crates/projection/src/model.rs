//! Team score projection.

use config::ModelConfig;
use tracing::debug;

use crate::types::{TeamProjection, TeamRating};

/// Projection formulas parameterised by the model constants.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionModel {
    config: ModelConfig,
}

impl ProjectionModel {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Project both teams of a game, returned as `(home, away)`.
    pub fn project_team(
        &self,
        home: &TeamRating,
        away: &TeamRating,
    ) -> (TeamProjection, TeamProjection) {
        let avg_pace = (home.pace + away.pace) / 2.0;

        let home_mean = self.neutral_mean(home, away, avg_pace) * self.config.home_court_factor;
        let away_mean = self.neutral_mean(away, home, avg_pace) * self.config.away_court_factor;

        let home_projection = TeamProjection {
            mean_points: home_mean,
            score_sd: self.score_sd(home_mean, home.volatility),
        };
        let away_projection = TeamProjection {
            mean_points: away_mean,
            score_sd: self.score_sd(away_mean, away.volatility),
        };

        debug!(
            home_mean,
            away_mean,
            home_sd = home_projection.score_sd,
            away_sd = away_projection.score_sd,
            avg_pace,
            "Projected team scores"
        );

        (home_projection, away_projection)
    }

    /// Expected points for `us` against `opp` before home court.
    fn neutral_mean(&self, us: &TeamRating, opp: &TeamRating, avg_pace: f64) -> f64 {
        let baseline = self.config.rating_baseline;
        (us.offense_rating / baseline)
            * (opp.defense_rating / baseline)
            * self.config.points_baseline
            * (avg_pace / self.config.pace_baseline)
    }

    /// Score deviation grows in proportion to the mean.
    pub fn score_sd(&self, mean_points: f64, volatility: f64) -> f64 {
        self.config.base_score_sd * (mean_points / self.config.sd_reference_points) * volatility
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_league_average_matchup() {
        let model = ProjectionModel::default();
        let avg = TeamRating::default();

        let (home, away) = model.project_team(&avg, &avg);

        assert!(close(home.mean_points, 112.0 * 1.025, 1e-9));
        assert!(close(away.mean_points, 112.0 * 0.975, 1e-9));
        assert!(close(home.score_sd, 11.0 * home.mean_points / 110.0, 1e-9));
    }

    #[test]
    fn test_strong_home_team_scenario() {
        let model = ProjectionModel::default();
        let home = TeamRating::new(118.0, 110.0, 102.0);
        let away = TeamRating::new(112.0, 113.0, 98.0);

        let (home_proj, away_proj) = model.project_team(&home, &away);

        let expected_home = (118.0 / 114.0) * (113.0 / 114.0) * 112.0 * 1.025;
        let expected_away = (112.0 / 114.0) * (110.0 / 114.0) * 112.0 * 0.975;
        assert!(close(home_proj.mean_points, expected_home, 1e-9));
        assert!(close(away_proj.mean_points, expected_away, 1e-9));

        assert!(close(home_proj.mean_points, 118.5, 1.0));
        assert!(close(away_proj.mean_points, 103.9, 1.0));
        assert!(home_proj.mean_points > away_proj.mean_points);
    }

    #[test]
    fn test_pace_scales_both_sides() {
        let model = ProjectionModel::default();
        let slow = TeamRating::new(114.0, 114.0, 90.0);
        let fast = TeamRating::new(114.0, 114.0, 110.0);

        let (home, away) = model.project_team(&slow, &fast);

        assert!(close(home.mean_points / 1.025, away.mean_points / 0.975, 1e-9));
        assert!(close(home.mean_points, 112.0 * 1.025, 1e-9));
    }

    #[test]
    fn test_volatility_scales_sd() {
        let model = ProjectionModel::default();
        let calm = TeamRating::default();
        let wild = TeamRating::default().with_volatility(1.5);

        let (home, away) = model.project_team(&wild, &calm);

        assert!(close(home.score_sd, 1.5 * 11.0 * home.mean_points / 110.0, 1e-9));
        assert!(close(away.score_sd, 11.0 * away.mean_points / 110.0, 1e-9));
    }

    #[test]
    fn test_custom_home_court() {
        let model = ProjectionModel::new(ModelConfig {
            home_court_factor: 1.0,
            away_court_factor: 1.0,
            ..ModelConfig::default()
        });
        let avg = TeamRating::default();

        let (home, away) = model.project_team(&avg, &avg);
        assert!(close(home.mean_points, away.mean_points, 1e-12));
    }
}
