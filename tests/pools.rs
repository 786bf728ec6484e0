//! Integration tests for pool sizing, the snake draw and round-robin fixtures.

mod common;

use common::{license, play_pending, with_entrants};
use fencing_tournament::logic::{build_pools, pool_count, schedule_rounds, snake_sequence};
use fencing_tournament::{
    create_pool_phases, schedule_round_robin, CompetitionError, CompetitionState, EngineConfig,
    PhaseKind, Progress, RankingTable,
};
use std::collections::HashSet;

#[test]
fn five_fencers_greedy_fixture() {
    let rounds = schedule_rounds(&["A", "B", "C", "D", "E"]);
    assert_eq!(
        rounds,
        vec![
            vec![("A", "B"), ("C", "D"), ("C", "E"), ("D", "E")],
            vec![("A", "C"), ("B", "D")],
            vec![("A", "D"), ("B", "C")],
            vec![("A", "E")],
            vec![("B", "E")],
        ]
    );
    assert_eq!(schedule_round_robin(&["A", "B", "C", "D", "E"]).len(), 10);
}

#[test]
fn four_fencers_pack_perfectly() {
    let rounds = schedule_rounds(&[1, 2, 3, 4]);
    assert_eq!(rounds.len(), 3);
    for round in &rounds {
        let seen: HashSet<_> = round.iter().flat_map(|(a, b)| [*a, *b]).collect();
        assert_eq!(seen.len(), 4);
    }
}

#[test]
fn fewer_than_two_has_no_fixture() {
    assert!(schedule_round_robin::<u8>(&[]).is_empty());
    assert!(schedule_round_robin(&[7]).is_empty());
}

#[test]
fn pool_size_grows_until_referees_suffice() {
    let config = EngineConfig::default();
    // 30 fencers: 6 pools of 5 need 6 referees; with 5 referees the size grows to 6
    assert_eq!(pool_count(30, 6, &config).unwrap(), 6);
    assert_eq!(pool_count(30, 5, &config).unwrap(), 5);
    assert_eq!(pool_count(30, 4, &config).unwrap(), 4);
    // fewer than a full pool still gets one pool
    assert_eq!(pool_count(3, 1, &config).unwrap(), 1);
}

#[test]
fn pool_scheduling_infeasible_without_enough_referees() {
    let config = EngineConfig::default();
    assert_eq!(
        pool_count(30, 2, &config),
        Err(CompetitionError::SchedulingInfeasible {
            fencers: 30,
            referees: 2
        })
    );
    assert!(matches!(
        pool_count(10, 0, &config),
        Err(CompetitionError::SchedulingInfeasible { .. })
    ));
    assert!(matches!(
        pool_count(1, 3, &config),
        Err(CompetitionError::NotEnoughCompetitors { .. })
    ));
}

#[test]
fn snake_draw_alternates_direction() {
    assert_eq!(snake_sequence(3), vec![0, 1, 2, 2, 1, 0]);
    let fencers: Vec<u32> = (1..=12).collect();
    let pools = build_pools(&fencers, &["r1", "r2"], &EngineConfig::default()).unwrap();
    assert_eq!(pools, vec![vec![1, 4, 5, 8, 9, 12], vec![2, 3, 6, 7, 10, 11]]);
}

#[test]
fn pool_phases_created_with_matches_and_referees() {
    let config = EngineConfig::default();
    let mut c = with_entrants(11, 2);
    let ranking = RankingTable::new(c.weapon, c.category);
    let ids = create_pool_phases(&mut c, &ranking, &config).unwrap();

    assert_eq!(ids, vec![1, 2]);
    assert_eq!(c.state, CompetitionState::Pools);
    let sizes: Vec<usize> = c.pool_phases().map(|p| p.competitors().len()).collect();
    assert_eq!(sizes, vec![5, 6]);
    for (i, phase) in c.pool_phases().enumerate() {
        assert_eq!(phase.kind, PhaseKind::Pool);
        let n = phase.competitors().len();
        assert_eq!(phase.matches.len(), n * (n - 1) / 2);
        for m in &phase.matches {
            assert_eq!(m.track, i as u32 + 1);
            assert_eq!(m.referee.as_deref(), Some(format!("R{:02}", i + 1).as_str()));
        }
        assert_eq!(phase.touch_target, 5);
    }
    // pools are disjoint
    let all: Vec<String> = c.pool_phases().flat_map(|p| p.competitors()).collect();
    let unique: HashSet<&String> = all.iter().collect();
    assert_eq!(all.len(), unique.len());
}

#[test]
fn draw_order_follows_national_ranking() {
    let config = EngineConfig::default();
    let mut c = with_entrants(10, 2);
    let mut ranking = RankingTable::new(c.weapon, c.category);
    ranking.add_points(&license(10), 500);
    ranking.add_points(&license(9), 400);
    let _ = create_pool_phases(&mut c, &ranking, &config).unwrap();
    let pools: Vec<Vec<String>> = c.pool_phases().map(|p| p.competitors()).collect();
    assert!(pools[0].contains(&license(10)));
    assert!(pools[1].contains(&license(9)));
}

#[test]
fn infeasible_pools_leave_competition_untouched() {
    let config = EngineConfig::default();
    let mut c = with_entrants(40, 1);
    let ranking = RankingTable::new(c.weapon, c.category);
    assert!(create_pool_phases(&mut c, &ranking, &config).is_err());
    assert!(c.phases.is_empty());
    assert_eq!(c.state, CompetitionState::Registration);
}

#[test]
fn finishing_every_pool_waits_for_organizer() {
    let config = EngineConfig::default();
    let mut c = with_entrants(10, 2);
    let ranking = RankingTable::new(c.weapon, c.category);
    create_pool_phases(&mut c, &ranking, &config).unwrap();
    assert_eq!(play_pending(&mut c, &config), Progress::PoolsComplete);
    assert_eq!(c.state, CompetitionState::PoolsComplete);
    assert_eq!(c.bracket_phases().count(), 0);
}
