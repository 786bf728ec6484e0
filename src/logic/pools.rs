//! Pool stage: pool sizing, snake draw and round-robin fixtures.

use crate::config::EngineConfig;
use crate::error::{CompetitionError, Result};
use crate::models::{
    Competition, CompetitionKind, CompetitionState, LicenseId, Phase, PhaseId, PhaseKind,
    RankingTable,
};
use std::collections::BTreeSet;

/// Number of pools for `fencers` given `referees` (one referee per pool).
///
/// Start at the configured pool size and grow it while there would be more pools than
/// referees; fail once the size reaches the ceiling.
pub fn pool_count(fencers: usize, referees: usize, config: &EngineConfig) -> Result<usize> {
    if fencers < 2 {
        return Err(CompetitionError::NotEnoughCompetitors {
            required: 2,
            actual: fencers,
        });
    }
    let infeasible = CompetitionError::SchedulingInfeasible { fencers, referees };
    if referees == 0 {
        return Err(infeasible);
    }
    let mut size = config.initial_pool_size.max(2);
    let mut count = fencers / size;
    while count > referees {
        size += 1;
        if size >= config.max_pool_size {
            return Err(infeasible);
        }
        count = fencers / size;
    }
    Ok(count.max(1))
}

/// Snake order over `pools` pools: 0, 1, .., P-1, P-1, .., 1, 0.
pub fn snake_sequence(pools: usize) -> Vec<usize> {
    (0..pools).chain((0..pools).rev()).collect()
}

/// Split `competitors` into pools with a snake draw, in input order.
pub fn build_pools<T: Clone, R>(
    competitors: &[T],
    referees: &[R],
    config: &EngineConfig,
) -> Result<Vec<Vec<T>>> {
    let count = pool_count(competitors.len(), referees.len(), config)?;
    let sequence = snake_sequence(count);
    let mut pools: Vec<Vec<T>> = vec![Vec::new(); count];
    for (i, c) in competitors.iter().enumerate() {
        pools[sequence[i % sequence.len()]].push(c.clone());
    }
    Ok(pools)
}

/// Greedy round assignment: each pair goes to the earliest round where neither competitor
/// plays yet. A pair that fits nowhere is forced into round 1.
pub fn schedule_rounds<T: Clone + Ord>(competitors: &[T]) -> Vec<Vec<(T, T)>> {
    let n = competitors.len();
    if n < 2 {
        return Vec::new();
    }
    let round_count = n - 1 + n % 2;
    let mut busy: Vec<BTreeSet<&T>> = vec![BTreeSet::new(); round_count];
    let mut rounds: Vec<Vec<(T, T)>> = vec![Vec::new(); round_count];

    for i in 0..n {
        for j in i + 1..n {
            let (a, b) = (&competitors[i], &competitors[j]);
            let slot = busy
                .iter()
                .position(|played| !played.contains(a) && !played.contains(b));
            match slot {
                Some(r) => {
                    busy[r].insert(a);
                    busy[r].insert(b);
                    rounds[r].push((a.clone(), b.clone()));
                }
                None => {
                    log::debug!("No free round for a pair, forcing it into round 1");
                    rounds[0].push((a.clone(), b.clone()));
                }
            }
        }
    }

    for round in &mut rounds {
        round.sort_by(|x, y| x.0.cmp(&y.0));
    }
    rounds.retain(|r| !r.is_empty());
    rounds
}

/// Round-robin fixture list: rounds in order, then pairs in order.
pub fn schedule_round_robin<T: Clone + Ord>(competitors: &[T]) -> Vec<(T, T)> {
    schedule_rounds(competitors).into_iter().flatten().collect()
}

/// Create one Pool phase per pool with all its matches.
///
/// Fencers are drawn in national ranking order (best first) so the snake draw balances the
/// pools. Pool `i` is fenced on track `i` with the `i`-th referee.
pub fn create_pool_phases(
    competition: &mut Competition,
    ranking: &RankingTable,
    config: &EngineConfig,
) -> Result<Vec<PhaseId>> {
    competition.ensure_state(CompetitionState::Registration, "schedule pools")?;
    if competition.kind != CompetitionKind::Individual {
        return Err(CompetitionError::InvalidState {
            action: "schedule pools for a team event",
            state: competition.state,
        });
    }

    let mut fencers = competition.fencers();
    // stable: unranked fencers keep registration order
    fencers.sort_by_key(|l| std::cmp::Reverse(ranking.points_of(l)));
    let referees = competition.referees();
    let pools = build_pools(&fencers, &referees, config)?;

    let first_id = competition.next_phase_id();
    let mut phases = Vec::with_capacity(pools.len());
    for (i, pool) in pools.iter().enumerate() {
        let id = first_id + i as PhaseId;
        let mut phase = Phase::new(id, competition.id, PhaseKind::Pool, config.pool_touches);
        let referee: LicenseId = referees[i % referees.len()].clone();
        for (a, b) in schedule_round_robin(pool) {
            phase.push_match(Some(referee.clone()), i as u32 + 1, a, b);
        }
        phases.push(phase);
    }

    let ids: Vec<PhaseId> = phases.iter().map(|p| p.id).collect();
    log::info!(
        "Scheduled {} pools for {} fencers in {}",
        phases.len(),
        fencers.len(),
        competition.name
    );
    competition.phases.extend(phases);
    competition.state = CompetitionState::Pools;
    Ok(ids)
}
