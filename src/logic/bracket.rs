//! Elimination bracket: field normalisation (barrage), seeding and round advancement.

use crate::config::EngineConfig;
use crate::error::{CompetitionError, Result};
use crate::logic::classification::classify;
use crate::logic::results::Progress;
use crate::models::{Competition, CompetitionState, LicenseId, Phase, PhaseId, PhaseKind};

/// Largest power of two not above `n` (0 for 0).
pub fn lower_power_of_two(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        1 << (usize::BITS - 1 - n.leading_zeros())
    }
}

/// Seed indices (0-based) in bracket order for a power-of-two `size`.
///
/// Adjacent entries form first-round matches (seed s meets seed size+1-s) and adjacent
/// matches feed the same next-round match, so seeds 1 and 2 can only meet in the final.
pub fn bracket_positions(size: usize) -> Vec<usize> {
    let mut order = vec![0];
    while order.len() < size {
        let len = order.len() * 2;
        order = order.iter().flat_map(|&s| [s, len - 1 - s]).collect();
    }
    order
}

/// First-round pairings for a ranked power-of-two field: best against worst.
pub fn first_round_pairings<T: Clone>(field: &[T]) -> Vec<(T, T)> {
    bracket_positions(field.len())
        .chunks(2)
        .filter(|pair| pair.len() == 2)
        .map(|pair| (field[pair[0]].clone(), field[pair[1]].clone()))
        .collect()
}

/// Split a ranked field into direct qualifiers and barrage pairings.
///
/// The lowest `2·(n−p)` competitors meet best-against-worst; matches closest to the middle of
/// that group come first, so match ids encode proximity to the centre.
pub fn split_barrage<T: Clone>(field: &[T]) -> (Vec<T>, Vec<(T, T)>) {
    let n = field.len();
    let extra = n - lower_power_of_two(n);
    let cut = n - 2 * extra;
    let group = &field[cut..];
    let m = group.len();
    let pairs = (0..m / 2)
        .rev()
        .map(|k| (group[k].clone(), group[m - 1 - k].clone()))
        .collect();
    (field[..cut].to_vec(), pairs)
}

/// Field for the round after a barrage: direct qualifiers, then barrage winners from the
/// highest match id down (each winner takes the seed slot of its better-ranked side).
pub fn merge_barrage_winners<T: Clone>(direct: &[T], winners_by_match_id: &[T]) -> Vec<T> {
    direct
        .iter()
        .cloned()
        .chain(winners_by_match_id.iter().rev().cloned())
        .collect()
}

/// Later rounds: winner of match 1 vs winner of match 2, and so on. No re-seeding.
pub fn next_round_pairings<T: Clone>(winners: &[T]) -> Vec<(T, T)> {
    winners
        .chunks(2)
        .filter(|pair| pair.len() == 2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect()
}

/// Append a bracket phase holding `pairs`, referees assigned round-robin.
fn push_bracket_phase(
    competition: &mut Competition,
    kind: PhaseKind,
    pairs: Vec<(LicenseId, LicenseId)>,
    config: &EngineConfig,
) -> PhaseId {
    let referees = competition.referees();
    let mut phase = Phase::new(
        competition.next_phase_id(),
        competition.id,
        kind,
        config.bracket_touches_for(competition.kind),
    );
    for (i, (a, b)) in pairs.into_iter().enumerate() {
        let referee = if referees.is_empty() {
            None
        } else {
            Some(referees[i % referees.len()].clone())
        };
        phase.push_match(referee, i as u32 + 1, a, b);
    }
    let id = phase.id;
    log::info!(
        "{}: opened {} ({} matches)",
        competition.name,
        kind.label(competition.kind),
        phase.matches.len()
    );
    competition.phases.push(phase);
    id
}

/// Open the round for a freshly seeded field: a barrage if the size is not a power of two,
/// otherwise a seeded elimination round.
fn push_seeded_round(
    competition: &mut Competition,
    field: &[LicenseId],
    config: &EngineConfig,
) -> PhaseId {
    if lower_power_of_two(field.len()) == field.len() {
        let kind = PhaseKind::Elimination {
            field: field.len() as u32,
        };
        push_bracket_phase(competition, kind, first_round_pairings(field), config)
    } else {
        let (_, barrage) = split_barrage(field);
        push_bracket_phase(competition, PhaseKind::Barrage, barrage, config)
    }
}

/// Seed `field` (best first) and open the bracket.
pub(crate) fn open_bracket(
    competition: &mut Competition,
    field: Vec<LicenseId>,
    config: &EngineConfig,
) -> Result<Progress> {
    if field.is_empty() {
        return Err(CompetitionError::NotEnoughCompetitors {
            required: 1,
            actual: 0,
        });
    }
    for (i, license) in field.iter().enumerate() {
        if let Some(r) = competition.registration_mut(license) {
            r.seed = Some(i as u32 + 1);
        }
    }
    if field.len() == 1 {
        if let Some(r) = competition.registration_mut(&field[0]) {
            r.final_rank = Some(1);
        }
        competition.state = CompetitionState::ReadyToClose;
        return Ok(Progress::ReadyToClose);
    }
    competition.state = CompetitionState::Elimination;
    let id = push_seeded_round(competition, &field, config);
    Ok(Progress::Advanced(id))
}

/// Seed the bracket from the pool classification once every pool is done.
pub fn start_elimination(competition: &mut Competition, config: &EngineConfig) -> Result<Progress> {
    competition.ensure_state(CompetitionState::PoolsComplete, "start the elimination")?;
    let fencers = competition.fencers();
    let field: Vec<LicenseId> = classify(competition.pool_phases(), &fencers)
        .into_iter()
        .map(|s| s.license)
        .collect();
    open_bracket(competition, field, config)
}

/// Create the next round from the completed last phase.
///
/// After a barrage the field is re-seeded (direct qualifiers plus barrage winners); after an
/// elimination round the winners are paired in match order.
pub fn advance(competition: &mut Competition, config: &EngineConfig) -> Result<PhaseId> {
    competition.ensure_state(CompetitionState::Elimination, "advance")?;
    let refused = CompetitionError::InvalidState {
        action: "advance",
        state: competition.state,
    };
    let last = match competition.last_phase() {
        Some(p) if p.is_done() && !p.kind.is_pool() && !p.kind.is_final() => p,
        _ => return Err(refused),
    };
    let kind = last.kind;
    let winners = last.winners();
    if winners.len() != last.matches.len() {
        log::error!(
            "{}: phase {} has completed matches without a winner, cannot advance",
            competition.name,
            last.id
        );
        return Err(refused);
    }

    match kind {
        PhaseKind::Barrage => {
            let barrage_fencers = last.competitors();
            let mut direct: Vec<(u32, LicenseId)> = competition
                .ranked_entrants()
                .into_iter()
                .filter(|l| !barrage_fencers.contains(l))
                .filter_map(|l| {
                    let r = competition.registration(&l)?;
                    match r.final_rank {
                        None => Some((r.seed.unwrap_or(u32::MAX), l)),
                        Some(_) => None,
                    }
                })
                .collect();
            direct.sort();
            let direct: Vec<LicenseId> = direct.into_iter().map(|(_, l)| l).collect();
            let field = merge_barrage_winners(&direct, &winners);
            Ok(push_seeded_round(competition, &field, config))
        }
        PhaseKind::Elimination { field } => {
            let pairs = next_round_pairings(&winners);
            let next = PhaseKind::Elimination { field: field / 2 };
            Ok(push_bracket_phase(competition, next, pairs, config))
        }
        PhaseKind::Pool => Err(refused),
    }
}

/// Rank the losers of a completed bracket phase, counting down from the number of entrants
/// still unranked. Both semi-final losers share 3rd place.
pub(crate) fn rank_losers(competition: &mut Competition, phase_id: PhaseId) -> Result<()> {
    let phase = competition
        .phase(phase_id)
        .ok_or(CompetitionError::PhaseNotFound(phase_id))?;
    let semi_final = phase.kind == PhaseKind::Elimination { field: 4 };
    let mut losers: Vec<(u32, LicenseId)> = phase
        .losers()
        .into_iter()
        .filter_map(|l| {
            let r = competition.registration(&l)?;
            if r.final_rank.is_some() {
                return None;
            }
            Some((r.seed.unwrap_or(u32::MAX), l))
        })
        .collect();
    losers.sort();

    let unranked = competition.unranked_count() as u32;
    let first = (unranked + 1).saturating_sub(losers.len() as u32);
    for (i, (_, license)) in losers.into_iter().enumerate() {
        let rank = if semi_final { 3 } else { first + i as u32 };
        if let Some(r) = competition.registration_mut(&license) {
            r.final_rank = Some(rank);
        }
    }
    Ok(())
}
