//! Errors that can occur during competition operations.

use crate::models::{CompetitionId, CompetitionState, LicenseId, MatchId, MatchState, PhaseId};
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum CompetitionError {
    /// Gender, age category or duplicate registration refused.
    #[error("Competitor {0} is not eligible for this competition")]
    NotEligible(LicenseId),

    #[error("Competitor {0} is already registered")]
    AlreadyRegistered(LicenseId),

    #[error("Competitor {0} is not registered")]
    NotRegistered(LicenseId),

    /// No pool size up to the ceiling fits the referee count.
    #[error("Not enough referees to schedule {fencers} fencers ({referees} referees)")]
    SchedulingInfeasible { fencers: usize, referees: usize },

    #[error("Need at least {required} competitors (got {actual})")]
    NotEnoughCompetitors { required: usize, actual: usize },

    #[error("Cannot {action} while the competition is {state:?}")]
    InvalidState {
        action: &'static str,
        state: CompetitionState,
    },

    #[error("Match {match_id} of phase {phase_id} is {state:?}")]
    InvalidMatchTransition {
        phase_id: PhaseId,
        match_id: MatchId,
        state: MatchState,
    },

    #[error("Competition is already closed")]
    AlreadyClosed,

    #[error("Competition {0} not found")]
    CompetitionNotFound(CompetitionId),

    #[error("Competitor {0} not found")]
    CompetitorNotFound(LicenseId),

    #[error("Phase {0} not found")]
    PhaseNotFound(PhaseId),

    #[error("Competitor {license} does not fence match {match_id} of phase {phase_id}")]
    NotInMatch {
        license: LicenseId,
        phase_id: PhaseId,
        match_id: MatchId,
    },

    #[error("Match {match_id} not found in phase {phase_id}")]
    MatchNotFound { phase_id: PhaseId, match_id: MatchId },

    #[error("Invalid score {winner_touches}-{loser_touches} (target {touch_target})")]
    InvalidScore {
        winner_touches: u32,
        loser_touches: u32,
        touch_target: u32,
    },

    #[error("Team {0} has no designated leader")]
    MissingGroupLeader(u32),

    #[error("Team {0} already has a leader")]
    DuplicateGroupLeader(u32),

    #[error("Ranking table does not match the competition weapon/category")]
    RankingMismatch,

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, CompetitionError>;
