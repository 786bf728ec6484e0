//! Match lifecycle and phase completion: result validation drives advancement.

use crate::config::EngineConfig;
use crate::error::{CompetitionError, Result};
use crate::logic::bracket::{advance, rank_losers};
use crate::models::{
    Competition, CompetitionState, LicenseId, MatchId, MatchState, Outcome, PhaseId,
};
use serde::{Deserialize, Serialize};

/// What a completion check changed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "phase")]
pub enum Progress {
    /// Current phase(s) still have matches to fence.
    Pending,
    /// Every pool is done; the bracket can be started.
    PoolsComplete,
    /// A new bracket phase was created.
    Advanced(PhaseId),
    /// Final decided; the competition can be closed.
    ReadyToClose,
}

/// A referee's result submission for one match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub phase_id: PhaseId,
    pub match_id: MatchId,
    pub winner: LicenseId,
    pub winner_touches: u32,
    pub loser: LicenseId,
    pub loser_touches: u32,
    pub referee: LicenseId,
}

/// `Upcoming → InProgress`, on the referee's call.
pub fn start_match(
    competition: &mut Competition,
    phase_id: PhaseId,
    match_id: MatchId,
) -> Result<()> {
    competition.ensure_open()?;
    let phase = competition
        .phase_mut(phase_id)
        .ok_or(CompetitionError::PhaseNotFound(phase_id))?;
    let m = phase
        .get_match_mut(match_id)
        .ok_or(CompetitionError::MatchNotFound { phase_id, match_id })?;
    if m.state != MatchState::Upcoming {
        return Err(CompetitionError::InvalidMatchTransition {
            phase_id,
            match_id,
            state: m.state,
        });
    }
    m.state = MatchState::InProgress;
    Ok(())
}

/// Record a result and complete the match, then run the completion check.
///
/// A participation naming neither the winner nor the loser is logged and left untouched. In a
/// bracket the winner must be one of the two participants, since the next round is built from it.
pub fn validate_result(
    competition: &mut Competition,
    result: &MatchResult,
    config: &EngineConfig,
) -> Result<Progress> {
    competition.ensure_open()?;
    let (phase_id, match_id) = (result.phase_id, result.match_id);
    let name = competition.name.clone();
    let phase = competition
        .phase_mut(phase_id)
        .ok_or(CompetitionError::PhaseNotFound(phase_id))?;
    let touch_target = phase.touch_target;
    let is_pool = phase.kind.is_pool();
    let m = phase
        .get_match_mut(match_id)
        .ok_or(CompetitionError::MatchNotFound { phase_id, match_id })?;

    if m.state == MatchState::Completed {
        log::warn!("{}: match {}/{} already completed", name, phase_id, match_id);
        return Err(CompetitionError::InvalidMatchTransition {
            phase_id,
            match_id,
            state: m.state,
        });
    }
    if result.winner == result.loser
        || result.winner_touches < result.loser_touches
        || result.winner_touches > touch_target
    {
        return Err(CompetitionError::InvalidScore {
            winner_touches: result.winner_touches,
            loser_touches: result.loser_touches,
            touch_target,
        });
    }
    if !is_pool && !m.competitors().contains(&&result.winner) {
        log::warn!(
            "{}: result for match {}/{} names winner {} who is not fencing it",
            name,
            phase_id,
            match_id,
            result.winner
        );
        return Err(CompetitionError::NotInMatch {
            license: result.winner.clone(),
            phase_id,
            match_id,
        });
    }

    for p in m.participations.iter_mut() {
        if p.competitor == result.winner {
            p.touches = result.winner_touches;
            p.outcome = Outcome::Winner;
        } else if p.competitor == result.loser {
            p.touches = result.loser_touches;
            p.outcome = Outcome::Loser;
        } else {
            log::error!(
                "{}: match {}/{} has participant {} not named in the result ({} vs {})",
                name,
                phase_id,
                match_id,
                p.competitor,
                result.winner,
                result.loser
            );
        }
    }
    m.referee = Some(result.referee.clone());
    m.state = MatchState::Completed;
    log::debug!(
        "{}: match {}/{} won by {} {}-{}",
        name,
        phase_id,
        match_id,
        result.winner,
        result.winner_touches,
        result.loser_touches
    );

    check_progress(competition, config)
}

/// Phase completion check, the only trigger for advancement.
///
/// Pools: once all are done the competition waits in `PoolsComplete`. Bracket: a done phase
/// ranks its losers, then either advances or, for the final, ranks the winner and makes the
/// competition ready to close.
pub fn check_progress(competition: &mut Competition, config: &EngineConfig) -> Result<Progress> {
    match competition.state {
        CompetitionState::Pools => {
            if competition.pool_phases().all(|p| p.is_done()) {
                log::info!("{}: all pools done", competition.name);
                competition.state = CompetitionState::PoolsComplete;
                return Ok(Progress::PoolsComplete);
            }
            Ok(Progress::Pending)
        }
        CompetitionState::Elimination => {
            let (id, is_final, winner) = match competition.last_phase() {
                Some(p) if p.is_done() => (p.id, p.kind.is_final(), p.winners().pop()),
                _ => return Ok(Progress::Pending),
            };
            rank_losers(competition, id)?;
            if !is_final {
                return advance(competition, config).map(Progress::Advanced);
            }
            if let Some(champion) = winner {
                if let Some(r) = competition.registration_mut(&champion) {
                    r.final_rank = Some(1);
                }
                log::info!("{}: won by {}", competition.name, champion);
            }
            competition.state = CompetitionState::ReadyToClose;
            Ok(Progress::ReadyToClose)
        }
        CompetitionState::PoolsComplete => Ok(Progress::PoolsComplete),
        CompetitionState::ReadyToClose => Ok(Progress::ReadyToClose),
        CompetitionState::Registration | CompetitionState::Closed => Ok(Progress::Pending),
    }
}
