//! Team events: teams are seeded by their members' national ranking points and represented
//! in the bracket by their leader.

use crate::config::EngineConfig;
use crate::error::{CompetitionError, Result};
use crate::logic::bracket::open_bracket;
use crate::logic::results::Progress;
use crate::models::{
    Competition, CompetitionKind, CompetitionState, LicenseId, RankingTable, Weapon,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub group: u32,
    pub leader: LicenseId,
    pub members: Vec<LicenseId>,
    /// Sum of the members' best ranking points for the weapon.
    pub points: u32,
}

/// Best points held by `license` in any category ranking of `weapon`.
pub fn best_weapon_points(license: &str, weapon: Weapon, rankings: &[RankingTable]) -> u32 {
    rankings
        .iter()
        .filter(|t| t.weapon == weapon)
        .map(|t| t.points_of(license))
        .max()
        .unwrap_or(0)
}

/// Teams of a team event, strongest first (leader license breaks ties).
pub fn team_seeding(competition: &Competition, rankings: &[RankingTable]) -> Result<Vec<Team>> {
    let mut groups: BTreeMap<u32, (Option<LicenseId>, Vec<LicenseId>)> = BTreeMap::new();
    for r in competition.registrations.iter().filter(|r| r.is_fencer()) {
        let Some(group) = r.group else {
            log::warn!("{}: fencer {} has no team", competition.name, r.license);
            continue;
        };
        let entry = groups.entry(group).or_default();
        if r.group_leader {
            entry.0 = Some(r.license.clone());
        }
        entry.1.push(r.license.clone());
    }

    let mut teams = Vec::with_capacity(groups.len());
    for (group, (leader, members)) in groups {
        let leader = leader.ok_or(CompetitionError::MissingGroupLeader(group))?;
        let points = members
            .iter()
            .map(|m| best_weapon_points(m, competition.weapon, rankings))
            .sum();
        teams.push(Team {
            group,
            leader,
            members,
            points,
        });
    }
    teams.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.leader.cmp(&b.leader)));
    Ok(teams)
}

/// Open the bracket of a team event directly from registration.
pub fn start_team_bracket(
    competition: &mut Competition,
    rankings: &[RankingTable],
    config: &EngineConfig,
) -> Result<Progress> {
    competition.ensure_state(CompetitionState::Registration, "start the team bracket")?;
    if competition.kind != CompetitionKind::Team {
        return Err(CompetitionError::InvalidState {
            action: "start a team bracket for an individual event",
            state: competition.state,
        });
    }
    let teams = team_seeding(competition, rankings)?;
    if teams.len() < 2 {
        return Err(CompetitionError::NotEnoughCompetitors {
            required: 2,
            actual: teams.len(),
        });
    }
    log::info!("{}: seeding {} teams", competition.name, teams.len());
    let field = teams.into_iter().map(|t| t.leader).collect();
    open_bracket(competition, field, config)
}
