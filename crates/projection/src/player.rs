//! Player stat projection.

use tracing::debug;

use crate::model::ProjectionModel;
use crate::types::{PlayerProjection, PlayerRating, SituationalFlags, StatKind, TeamRating};

impl ProjectionModel {
    /// Project one stat line for a player.
    ///
    /// The stat average is scaled by usage first, then by team offense,
    /// pace, home court, back-to-back fatigue and injury impact, in that order.
    /// The deviation is the per-stat constant times team volatility.
    pub fn project_player(
        &self,
        player: &PlayerRating,
        team: &TeamRating,
        kind: StatKind,
        flags: &SituationalFlags,
    ) -> PlayerProjection {
        let config = self.config();
        let params = kind.params();

        let mut mean = player.stat_average(kind) * (1.0 + player.usage * params.usage_weight);
        mean *= team.offense_rating / config.rating_baseline;
        mean *= team.pace / config.pace_baseline;
        if flags.is_home {
            mean *= config.player_home_factor;
        }
        if flags.back_to_back {
            mean *= config.back_to_back_factor;
        }
        mean *= 1.0 - flags.injury_impact_pct / 100.0;

        let sd = params.base_sd * team.volatility;

        debug!(
            stat = %kind,
            usage = player.usage,
            mean,
            sd,
            "Projected player stat"
        );

        PlayerProjection { kind, mean, sd }
    }
}
