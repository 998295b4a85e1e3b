//! Injury-aware usage redistribution.
//!
//! Each designation is applied as one pass over a team's allocation:
//! the injured player's lost share is handed to teammates in proportion to
//! their current usage, or split evenly when every teammate sits at zero.
//! Passes run in caller order and each one sees the previous pass's output,
//! so reordering designations can change the result.

use common::{PlayerId, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::{ProjectionError, ProjectionResult};
use crate::store::RosterEntry;
use crate::types::{InjuryDesignation, InjuryStatus};

/// Usage share per player on one team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageAllocation {
    shares: BTreeMap<PlayerId, f64>,
}

impl UsageAllocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, player: impl Into<PlayerId>, usage: f64) {
        self.shares.insert(player.into(), usage);
    }

    pub fn get(&self, player: &PlayerId) -> Option<f64> {
        self.shares.get(player).copied()
    }

    pub fn contains(&self, player: &PlayerId) -> bool {
        self.shares.contains_key(player)
    }

    pub fn total(&self) -> f64 {
        self.shares.values().sum()
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, f64)> {
        self.shares.iter().map(|(player, usage)| (player, *usage))
    }

    /// Remove usage from `player` and hand it to everyone else on the team.
    fn apply(&mut self, designation: &InjuryDesignation) -> ProjectionResult<()> {
        let player = &designation.player;
        let Some(usage) = self.get(player) else {
            warn!(player = %player, "Injured player not on roster, skipping");
            return Ok(());
        };

        let lost = designation.lost_usage(usage);
        if lost <= 0.0 {
            return Ok(());
        }

        let teammates: Vec<PlayerId> = self
            .shares
            .keys()
            .filter(|p| *p != player)
            .cloned()
            .collect();
        if teammates.is_empty() {
            return Err(ProjectionError::EmptyRoster(format!(
                "no teammates to absorb usage lost by {}",
                player
            )));
        }

        self.shares.insert(player.clone(), remaining_usage(designation, usage));

        let teammate_total: f64 = teammates.iter().filter_map(|p| self.get(p)).sum();
        if teammate_total <= 0.0 {
            let per_player = lost / teammates.len() as f64;
            for teammate in &teammates {
                if let Some(share) = self.shares.get_mut(teammate) {
                    *share += per_player;
                }
            }
        } else {
            for teammate in &teammates {
                if let Some(share) = self.shares.get_mut(teammate) {
                    *share += lost * (*share / teammate_total);
                }
            }
        }

        debug!(
            player = %player,
            status = ?designation.status,
            lost,
            teammates = teammates.len(),
            equal_split = teammate_total <= 0.0,
            "Redistributed usage"
        );

        Ok(())
    }

    /// Cut the injured player's usage without handing it to anyone.
    fn withdraw(&mut self, designation: &InjuryDesignation) {
        if let Some(share) = self.shares.get_mut(&designation.player) {
            *share = remaining_usage(designation, *share);
        }
    }
}

fn remaining_usage(designation: &InjuryDesignation, usage: f64) -> f64 {
    match designation.status {
        InjuryStatus::Out => 0.0,
        InjuryStatus::Limited => usage - designation.lost_usage(usage),
    }
}

impl FromIterator<(PlayerId, f64)> for UsageAllocation {
    fn from_iter<I: IntoIterator<Item = (PlayerId, f64)>>(iter: I) -> Self {
        Self {
            shares: iter.into_iter().collect(),
        }
    }
}

/// Apply injury designations for one team, in order.
pub fn redistribute_usage(
    designations: &[InjuryDesignation],
    allocation: &UsageAllocation,
) -> ProjectionResult<UsageAllocation> {
    if allocation.is_empty() {
        return Err(ProjectionError::EmptyRoster(
            "usage allocation has no players".to_string(),
        ));
    }

    let mut adjusted = allocation.clone();
    for designation in designations {
        adjusted.apply(designation)?;
    }

    Ok(adjusted)
}

/// One row of the original-versus-adjusted usage table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageAdjustment {
    pub player: PlayerId,
    pub team: TeamId,
    pub original: f64,
    pub adjusted: f64,
}

/// Usage before and after injuries for every team in a matchup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchupUsage {
    pub original: BTreeMap<TeamId, UsageAllocation>,
    pub adjusted: BTreeMap<TeamId, UsageAllocation>,
}

impl MatchupUsage {
    /// Adjusted usage for a player on any team.
    pub fn adjusted_usage(&self, player: &PlayerId) -> Option<f64> {
        self.adjusted.values().find_map(|allocation| allocation.get(player))
    }

    pub fn adjustments(&self) -> Vec<UsageAdjustment> {
        let mut rows = Vec::new();
        for (team, original) in &self.original {
            let adjusted = self.adjusted.get(team);
            for (player, usage) in original.iter() {
                rows.push(UsageAdjustment {
                    player: player.clone(),
                    team: team.clone(),
                    original: usage,
                    adjusted: adjusted.and_then(|a| a.get(player)).unwrap_or(usage),
                });
            }
        }
        rows
    }
}

/// Group a matchup roster by team and apply each team's designations.
///
/// Designations keep their relative order within a team. A designation
/// naming a player outside the roster is skipped. A player with no rated
/// teammates still loses usage, but nobody picks it up.
pub fn redistribute_matchup_usage(
    designations: &[InjuryDesignation],
    roster: &[RosterEntry],
) -> ProjectionResult<MatchupUsage> {
    if roster.is_empty() {
        return Err(ProjectionError::EmptyRoster("matchup roster is empty".to_string()));
    }

    let mut original: BTreeMap<TeamId, UsageAllocation> = BTreeMap::new();
    let mut team_of: BTreeMap<&PlayerId, &TeamId> = BTreeMap::new();
    for entry in roster {
        original
            .entry(entry.rating.team.clone())
            .or_default()
            .insert(entry.player.clone(), entry.rating.usage);
        team_of.insert(&entry.player, &entry.rating.team);
    }

    let mut by_team: BTreeMap<&TeamId, Vec<InjuryDesignation>> = BTreeMap::new();
    for designation in designations {
        match team_of.get(&designation.player) {
            Some(team) => by_team.entry(*team).or_default().push(designation.clone()),
            None => warn!(player = %designation.player, "Injured player not in matchup, skipping"),
        }
    }

    let mut adjusted = BTreeMap::new();
    for (team, allocation) in &original {
        let mut team_usage = allocation.clone();
        for designation in by_team.get(team).into_iter().flatten() {
            match team_usage.apply(designation) {
                Ok(()) => {}
                Err(ProjectionError::EmptyRoster(reason)) => {
                    warn!(
                        team = %team,
                        player = %designation.player,
                        %reason,
                        "Usage not redistributed"
                    );
                    team_usage.withdraw(designation);
                }
                Err(e) => return Err(e),
            }
        }
        adjusted.insert(team.clone(), team_usage);
    }

    Ok(MatchupUsage { original, adjusted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlayerRating;
    use assert_matches::assert_matches;

    fn allocation(entries: &[(&str, f64)]) -> UsageAllocation {
        entries.iter().map(|(p, u)| (PlayerId::from(*p), *u)).collect()
    }

    fn usage(allocation: &UsageAllocation, player: &str) -> f64 {
        allocation.get(&PlayerId::from(player)).unwrap()
    }

    #[test]
    fn test_out_single_teammate_takes_everything() {
        let before = allocation(&[("Star", 0.30), ("Sidekick", 0.20)]);

        let after = redistribute_usage(&[InjuryDesignation::out("Star")], &before).unwrap();

        assert_eq!(usage(&after, "Star"), 0.0);
        assert!((usage(&after, "Sidekick") - 0.50).abs() < 1e-12);
    }

    #[test]
    fn test_proportional_split() {
        let before = allocation(&[("A", 0.30), ("B", 0.20), ("C", 0.10)]);

        let after = redistribute_usage(&[InjuryDesignation::out("A")], &before).unwrap();

        assert!((usage(&after, "B") - (0.20 + 0.30 * 2.0 / 3.0)).abs() < 1e-12);
        assert!((usage(&after, "C") - (0.10 + 0.30 / 3.0)).abs() < 1e-12);
        assert!((after.total() - before.total()).abs() < 1e-9);
    }

    #[test]
    fn test_limited_keeps_remainder() {
        let before = allocation(&[("A", 0.30), ("B", 0.20), ("C", 0.20)]);

        let after = redistribute_usage(&[InjuryDesignation::limited("A", 20.0)], &before).unwrap();

        assert!((usage(&after, "A") - 0.24).abs() < 1e-12);
        assert!((usage(&after, "B") - 0.23).abs() < 1e-12);
        assert!((usage(&after, "C") - 0.23).abs() < 1e-12);
    }

    #[test]
    fn test_equal_split_fallback() {
        let before = allocation(&[("A", 0.30), ("B", 0.0), ("C", 0.0), ("D", 0.0)]);

        let after = redistribute_usage(&[InjuryDesignation::out("A")], &before).unwrap();

        for p in ["B", "C", "D"] {
            assert!((usage(&after, p) - 0.10).abs() < 1e-12);
        }
        let received: f64 = ["B", "C", "D"].iter().map(|p| usage(&after, p)).sum();
        assert!((received - 0.30).abs() < 1e-12);
    }

    #[test]
    fn test_total_conserved_over_sequence() {
        let before = allocation(&[
            ("A", 0.31),
            ("B", 0.27),
            ("C", 0.19),
            ("D", 0.13),
            ("E", 0.07),
            ("F", 0.03),
        ]);
        let designations = vec![
            InjuryDesignation::limited("C", 35.0),
            InjuryDesignation::out("A"),
            InjuryDesignation::limited("F", 60.0),
            InjuryDesignation::out("D"),
            InjuryDesignation::limited("B", 5.0),
        ];

        let after = redistribute_usage(&designations, &before).unwrap();

        assert!((after.total() - before.total()).abs() < 1e-9);
        assert_eq!(usage(&after, "A"), 0.0);
        assert_eq!(usage(&after, "D"), 0.0);
    }

    #[test]
    fn test_order_matters() {
        let before = allocation(&[("A", 0.30), ("B", 0.25), ("C", 0.20)]);
        let first = [InjuryDesignation::limited("A", 50.0), InjuryDesignation::limited("B", 50.0)];
        let second = [InjuryDesignation::limited("B", 50.0), InjuryDesignation::limited("A", 50.0)];

        let a = redistribute_usage(&first, &before).unwrap();
        let b = redistribute_usage(&second, &before).unwrap();

        assert!((usage(&a, "C") - usage(&b, "C")).abs() > 1e-6);
        assert!((a.total() - b.total()).abs() < 1e-9);
    }

    #[test]
    fn test_out_player_later_untouched() {
        let before = allocation(&[("A", 0.30), ("B", 0.20), ("C", 0.10)]);
        let designations = [InjuryDesignation::out("A"), InjuryDesignation::out("B")];

        let after = redistribute_usage(&designations, &before).unwrap();

        // A is already at zero when B's share moves, so C absorbs all of it.
        assert_eq!(usage(&after, "A"), 0.0);
        assert_eq!(usage(&after, "B"), 0.0);
        assert!((usage(&after, "C") - 0.60).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_player_skipped() {
        let before = allocation(&[("A", 0.30), ("B", 0.20)]);

        let after = redistribute_usage(&[InjuryDesignation::out("Nobody")], &before).unwrap();

        assert_eq!(after, before);
    }

    #[test]
    fn test_empty_allocation() {
        assert_matches!(
            redistribute_usage(&[InjuryDesignation::out("A")], &UsageAllocation::new()),
            Err(ProjectionError::EmptyRoster(_))
        );
    }

    #[test]
    fn test_lone_player_cannot_redistribute() {
        let before = allocation(&[("A", 0.30)]);
        assert_matches!(
            redistribute_usage(&[InjuryDesignation::out("A")], &before),
            Err(ProjectionError::EmptyRoster(_))
        );
    }

    #[test]
    fn test_matchup_groups_by_team() {
        let roster = vec![
            RosterEntry::new("Star", PlayerRating::new("Celtics", 0.30)),
            RosterEntry::new("Sidekick", PlayerRating::new("Celtics", 0.20)),
            RosterEntry::new("Guard", PlayerRating::new("Lakers", 0.25)),
            RosterEntry::new("Wing", PlayerRating::new("Lakers", 0.15)),
        ];

        let usage = redistribute_matchup_usage(
            &[InjuryDesignation::out("Star"), InjuryDesignation::out("Ghost")],
            &roster,
        )
        .unwrap();

        assert_eq!(usage.adjusted_usage(&PlayerId::from("Star")), Some(0.0));
        assert!((usage.adjusted_usage(&PlayerId::from("Sidekick")).unwrap() - 0.50).abs() < 1e-12);
        assert_eq!(usage.adjusted_usage(&PlayerId::from("Guard")), Some(0.25));

        let rows = usage.adjustments();
        assert_eq!(rows.len(), 4);
        let star = rows.iter().find(|r| r.player.as_str() == "Star").unwrap();
        assert_eq!(star.original, 0.30);
        assert_eq!(star.adjusted, 0.0);
        assert_eq!(star.team.as_str(), "Celtics");
    }

    #[test]
    fn test_matchup_lone_player_keeps_other_team() {
        let roster = vec![
            RosterEntry::new("Star", PlayerRating::new("Celtics", 0.30)),
            RosterEntry::new("Guard", PlayerRating::new("Lakers", 0.25)),
            RosterEntry::new("Wing", PlayerRating::new("Lakers", 0.15)),
        ];

        let out = redistribute_matchup_usage(
            &[InjuryDesignation::out("Star"), InjuryDesignation::out("Wing")],
            &roster,
        )
        .unwrap();
        assert_eq!(out.adjusted_usage(&PlayerId::from("Star")), Some(0.0));
        assert!((out.adjusted_usage(&PlayerId::from("Guard")).unwrap() - 0.40).abs() < 1e-12);

        let limited =
            redistribute_matchup_usage(&[InjuryDesignation::limited("Star", 20.0)], &roster)
                .unwrap();
        assert!((limited.adjusted_usage(&PlayerId::from("Star")).unwrap() - 0.24).abs() < 1e-12);
        assert_eq!(limited.adjusted_usage(&PlayerId::from("Wing")), Some(0.15));
    }

    #[test]
    fn test_matchup_empty_roster() {
        assert_matches!(
            redistribute_matchup_usage(&[], &[]),
            Err(ProjectionError::EmptyRoster(_))
        );
    }
}
