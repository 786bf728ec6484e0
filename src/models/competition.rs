//! Competition, its registrations and its lifecycle state.

use crate::error::{CompetitionError, Result};
use crate::models::category::{Category, Weapon};
use crate::models::competitor::{Gender, LicenseId};
use crate::models::phase::{Phase, PhaseId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a competition.
pub type CompetitionId = Uuid;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionKind {
    #[default]
    Individual,
    Team,
}

/// Lifecycle of a competition.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionState {
    /// Sign-ups and withdrawals allowed; nothing scheduled.
    #[default]
    Registration,
    /// Pool matches being fenced.
    Pools,
    /// Every pool is done; waiting for the organizer to open the bracket.
    PoolsComplete,
    /// Barrage / elimination rounds being fenced.
    Elimination,
    /// Final decided; ranking points not yet distributed.
    ReadyToClose,
    Closed,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Fencer,
    Referee,
}

/// Association between a competition and a competitor.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub license: LicenseId,
    pub role: Role,
    /// Team id for team events.
    pub group: Option<u32>,
    pub group_leader: bool,
    /// Position in the field the bracket was seeded from.
    pub seed: Option<u32>,
    pub final_rank: Option<u32>,
    pub final_points: Option<u32>,
}

impl Registration {
    pub fn new(license: LicenseId, role: Role) -> Self {
        Self {
            license,
            role,
            group: None,
            group_leader: false,
            seed: None,
            final_rank: None,
            final_points: None,
        }
    }

    pub fn is_fencer(&self) -> bool {
        self.role == Role::Fencer
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Competition {
    pub id: CompetitionId,
    pub name: String,
    pub weapon: Weapon,
    pub category: Category,
    pub gender: Gender,
    pub date: NaiveDate,
    /// Points awarded to the winner at closure.
    pub coefficient: u32,
    pub kind: CompetitionKind,
    pub state: CompetitionState,
    pub registrations: Vec<Registration>,
    pub phases: Vec<Phase>,
}

impl Competition {
    pub fn new(
        name: impl Into<String>,
        weapon: Weapon,
        category: Category,
        gender: Gender,
        date: NaiveDate,
        coefficient: u32,
        kind: CompetitionKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            weapon,
            category,
            gender,
            date,
            coefficient,
            kind,
            state: CompetitionState::Registration,
            registrations: Vec::new(),
            phases: Vec::new(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state == CompetitionState::Closed
    }

    /// Refuse any mutation once the competition is closed.
    pub fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(CompetitionError::AlreadyClosed);
        }
        Ok(())
    }

    /// Refuse unless the competition is in `expected` state.
    pub fn ensure_state(&self, expected: CompetitionState, action: &'static str) -> Result<()> {
        self.ensure_open()?;
        if self.state != expected {
            return Err(CompetitionError::InvalidState {
                action,
                state: self.state,
            });
        }
        Ok(())
    }

    pub fn is_registered(&self, license: &str) -> bool {
        self.registrations.iter().any(|r| r.license == license)
    }

    pub fn registration(&self, license: &str) -> Option<&Registration> {
        self.registrations.iter().find(|r| r.license == license)
    }

    pub fn registration_mut(&mut self, license: &str) -> Option<&mut Registration> {
        self.registrations.iter_mut().find(|r| r.license == license)
    }

    /// Fencers in registration order.
    pub fn fencers(&self) -> Vec<LicenseId> {
        self.registrations
            .iter()
            .filter(|r| r.is_fencer())
            .map(|r| r.license.clone())
            .collect()
    }

    pub fn referees(&self) -> Vec<LicenseId> {
        self.registrations
            .iter()
            .filter(|r| r.role == Role::Referee)
            .map(|r| r.license.clone())
            .collect()
    }

    /// Entities that receive a final rank: fencers, or team leaders for team events.
    pub fn ranked_entrants(&self) -> Vec<LicenseId> {
        match self.kind {
            CompetitionKind::Individual => self.fencers(),
            CompetitionKind::Team => self
                .registrations
                .iter()
                .filter(|r| r.is_fencer() && r.group_leader)
                .map(|r| r.license.clone())
                .collect(),
        }
    }

    pub fn pool_phases(&self) -> impl Iterator<Item = &Phase> {
        self.phases.iter().filter(|p| p.kind.is_pool())
    }

    pub fn bracket_phases(&self) -> impl Iterator<Item = &Phase> {
        self.phases.iter().filter(|p| !p.kind.is_pool())
    }

    pub fn last_phase(&self) -> Option<&Phase> {
        self.phases.last()
    }

    pub fn phase(&self, id: PhaseId) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id == id)
    }

    pub fn phase_mut(&mut self, id: PhaseId) -> Option<&mut Phase> {
        self.phases.iter_mut().find(|p| p.id == id)
    }

    pub fn next_phase_id(&self) -> PhaseId {
        self.phases.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    /// Number of entrants still without a final rank.
    pub fn unranked_count(&self) -> usize {
        self.ranked_entrants()
            .iter()
            .filter(|l| self.registration(l).map_or(false, |r| r.final_rank.is_none()))
            .count()
    }
}
