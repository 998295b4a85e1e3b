//! Matchup coordinator.
//!
//! Ratings come from the store, everything after that is pure computation.
//! Sampling runs on the blocking pool, one task per simulation, each with
//! its own generator.

use common::{HomeAway, Matchup, PlayerId, TeamId};
use observability::SimulationMetrics;
use odds::evaluate_edge;
use projection::{
    redistribute_matchup_usage, MatchupUsage, PlayerProjection, ProjectionModel, RatingsStore,
    SituationalFlags, StatKind, TeamRating,
};
use simulation::{simulate_game, simulate_prop, GameSampleSet, PropSampleSet, SimulationConfig};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::market::{BothSides, MarketEvaluation, MarketQuery, MarketSide};
use crate::report::{
    suggested_prop_line, GameContext, GameReport, MatchupProjection, PropEvaluation, PropRequest,
    RosterPropsReport,
};

/// A player ready for prop simulation.
#[derive(Debug, Clone)]
struct PreparedProp {
    player: PlayerId,
    team: TeamId,
    is_home: bool,
    original_usage: f64,
    adjusted_usage: f64,
    projection: PlayerProjection,
}

pub struct EdgeEngine {
    store: Arc<dyn RatingsStore>,
    model: ProjectionModel,
    simulation: SimulationConfig,
    game_metrics: SimulationMetrics,
    prop_metrics: SimulationMetrics,
}

impl EdgeEngine {
    pub fn new(
        store: Arc<dyn RatingsStore>,
        model: ProjectionModel,
        simulation: SimulationConfig,
    ) -> Self {
        Self {
            store,
            model,
            simulation,
            game_metrics: SimulationMetrics::new("game"),
            prop_metrics: SimulationMetrics::new("prop"),
        }
    }

    /// Look up both teams and project their scores.
    pub async fn project_matchup(&self, matchup: &Matchup) -> EngineResult<MatchupProjection> {
        let home_rating = self.store.team_rating(&matchup.home).await?;
        let away_rating = self.store.team_rating(&matchup.away).await?;
        let (home, away) = self.model.project_team(&home_rating, &away_rating);

        Ok(MatchupProjection {
            matchup: matchup.clone(),
            home_rating,
            away_rating,
            home,
            away,
        })
    }

    /// Draw correlated scores for a projected game.
    pub async fn simulate(&self, projection: &MatchupProjection) -> EngineResult<GameSampleSet> {
        let config = self.simulation;
        config.validate()?;

        let home = projection.home;
        let away = projection.away;
        let metrics = self.game_metrics.clone();
        let samples = tokio::task::spawn_blocking(move || {
            let _guard = metrics.start(config.n_draws);
            simulate_game(&home, &away, &config)
        })
        .await??;

        Ok(samples)
    }

    pub fn evaluate_market(
        &self,
        samples: &GameSampleSet,
        query: &MarketQuery,
    ) -> EngineResult<MarketEvaluation> {
        let probability = query.game_probability(samples)?;
        let result = evaluate_edge(probability, query.odds)?;
        Ok(MarketEvaluation {
            query: *query,
            result,
        })
    }

    /// Price a query and its opposite side from the same draws.
    ///
    /// The opposite side uses `opposite_odds`, or the queried price when absent.
    pub fn evaluate_both(
        &self,
        samples: &GameSampleSet,
        query: &MarketQuery,
        opposite_odds: Option<i32>,
    ) -> EngineResult<BothSides> {
        let opposite = query.opposite(opposite_odds.unwrap_or(query.odds));
        Ok(BothSides {
            queried: self.evaluate_market(samples, query)?,
            opposite: self.evaluate_market(samples, &opposite)?,
        })
    }

    /// Project, simulate once, and price every query from those draws.
    pub async fn evaluate_game(
        &self,
        matchup: &Matchup,
        queries: &[MarketQuery],
    ) -> EngineResult<GameReport> {
        let projection = self.project_matchup(matchup).await?;
        let samples = self.simulate(&projection).await?;

        let markets = queries
            .iter()
            .map(|query| self.evaluate_both(&samples, query, None))
            .collect::<EngineResult<Vec<_>>>()?;

        info!(
            matchup = %matchup,
            home_mean = projection.home.mean_points,
            away_mean = projection.away.mean_points,
            markets = markets.len(),
            "Evaluated game"
        );

        Ok(GameReport::new(projection, &samples, markets))
    }

    /// Redistribute usage and project `stat` for every player not ruled out.
    async fn prepare_props(
        &self,
        matchup: &Matchup,
        context: &GameContext,
        stat: StatKind,
    ) -> EngineResult<(MatchupUsage, Vec<PreparedProp>)> {
        let roster = self.store.roster_for_matchup(matchup).await?;
        let usage = redistribute_matchup_usage(&context.designations, &roster)?;

        let home_rating = self.store.team_rating(&matchup.home).await?;
        let away_rating = self.store.team_rating(&matchup.away).await?;

        let mut prepared = Vec::with_capacity(roster.len());
        for entry in roster {
            if context.is_out(&entry.player) {
                continue;
            }
            let Some(side) = matchup.side_of(&entry.rating.team) else {
                continue;
            };
            let team_rating: &TeamRating = match side {
                HomeAway::Home => &home_rating,
                HomeAway::Away => &away_rating,
            };

            let adjusted_usage = usage
                .adjusted_usage(&entry.player)
                .unwrap_or(entry.rating.usage);
            let flags = SituationalFlags {
                is_home: side.is_home(),
                back_to_back: context.back_to_back.contains(&entry.rating.team),
                injury_impact_pct: context
                    .injury_impact
                    .get(&entry.player)
                    .copied()
                    .unwrap_or(0.0),
            };
            let projection = self.model.project_player(
                &entry.rating.with_usage(adjusted_usage),
                team_rating,
                stat,
                &flags,
            );

            prepared.push(PreparedProp {
                player: entry.player,
                team: entry.rating.team,
                is_home: side.is_home(),
                original_usage: entry.rating.usage,
                adjusted_usage,
                projection,
            });
        }

        Ok((usage, prepared))
    }

    /// Price a prop for every active player in a matchup.
    ///
    /// Each player is simulated in its own blocking task. With a seeded
    /// config, player `i` (in name order) uses `seed + i`.
    pub async fn evaluate_roster_props(
        &self,
        matchup: &Matchup,
        context: &GameContext,
        request: &PropRequest,
    ) -> EngineResult<RosterPropsReport> {
        self.simulation.validate()?;
        let (usage, prepared) = self.prepare_props(matchup, context, request.stat).await?;
        if prepared.is_empty() {
            return Err(simulation::SimulationError::EmptyRoster.into());
        }

        let n_players = prepared.len();
        let mut tasks = JoinSet::new();
        for (index, prop) in prepared.into_iter().enumerate() {
            let config = self.simulation.for_stream(index as u64);
            let metrics = self.prop_metrics.clone();
            let line = request
                .lines
                .get(&prop.player)
                .copied()
                .unwrap_or_else(|| suggested_prop_line(prop.projection.mean));
            let odds = request.odds;

            tasks.spawn_blocking(move || -> EngineResult<(usize, PropEvaluation)> {
                let samples = {
                    let _guard = metrics.start(config.n_draws);
                    simulate_prop(&prop.projection, &config)?
                };
                Ok((index, price_prop(prop, &samples, line, odds)?))
            });
        }

        let mut props = Vec::with_capacity(n_players);
        while let Some(joined) = tasks.join_next().await {
            props.push(joined??);
        }
        props.sort_by_key(|(index, _)| *index);

        info!(
            matchup = %matchup,
            stat = %request.stat,
            players = n_players,
            injuries = context.designations.len(),
            "Evaluated roster props"
        );

        Ok(RosterPropsReport {
            matchup: matchup.clone(),
            stat: request.stat,
            usage: usage.adjustments(),
            props: props.into_iter().map(|(_, prop)| prop).collect(),
        })
    }

    /// Price one side of one player's prop.
    ///
    /// Samples from the same stream the player gets in
    /// `evaluate_roster_props`, so a seeded engine prices both alike.
    pub async fn evaluate_player_prop(
        &self,
        matchup: &Matchup,
        context: &GameContext,
        player: &PlayerId,
        stat: StatKind,
        query: &MarketQuery,
    ) -> EngineResult<MarketEvaluation> {
        if self.store.player_rating(player).await?.is_none() {
            return Err(EngineError::UnknownPlayer(player.clone()));
        }
        if context.is_out(player) {
            return Err(EngineError::InvalidQuery(format!("{} is ruled out", player)));
        }

        let (_, prepared) = self.prepare_props(matchup, context, stat).await?;
        let (index, prop) = prepared
            .into_iter()
            .enumerate()
            .find(|(_, p)| &p.player == player)
            .ok_or_else(|| EngineError::UnknownPlayer(player.clone()))?;

        let config = self.simulation.for_stream(index as u64);
        let metrics = self.prop_metrics.clone();
        let projection = prop.projection;
        let samples = tokio::task::spawn_blocking(move || {
            let _guard = metrics.start(config.n_draws);
            simulate_prop(&projection, &config)
        })
        .await??;

        let probability = query.prop_probability(&samples)?;
        let result = evaluate_edge(probability, query.odds)?;
        debug!(
            player = %player,
            stat = %stat,
            probability,
            edge = result.edge,
            "Priced player prop"
        );

        Ok(MarketEvaluation {
            query: *query,
            result,
        })
    }
}

fn price_prop(
    prop: PreparedProp,
    samples: &PropSampleSet,
    line: f64,
    odds: i32,
) -> EngineResult<PropEvaluation> {
    let over = MarketQuery::player_prop(MarketSide::Over, line, odds)?;
    let under = over.opposite(odds);

    Ok(PropEvaluation {
        over: evaluate_edge(over.prop_probability(samples)?, odds)?,
        under: evaluate_edge(under.prop_probability(samples)?, odds)?,
        simulated_mean: samples.mean(),
        p10: samples.quantile(0.1),
        p90: samples.quantile(0.9),
        player: prop.player,
        team: prop.team,
        is_home: prop.is_home,
        original_usage: prop.original_usage,
        adjusted_usage: prop.adjusted_usage,
        projection: prop.projection,
        line,
    })
}
