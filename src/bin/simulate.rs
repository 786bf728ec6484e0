//! Runs a complete individual competition on a synthetic roster with random scores and prints
//! the final standings and the updated national ranking as JSON.
//! Run with: cargo run --bin simulate
//! Override with env: SIM_FENCERS (23), SIM_REFEREES (5), SIM_SEED (42), SIM_COEFFICIENT (100),
//! plus the FENCING_* engine settings.

use chrono::{Datelike, Local, NaiveDate};
use fencing_tournament::config::env_or;
use fencing_tournament::{
    Category, Competition, CompetitionKind, CompetitionState, EngineConfig, Gender,
    InMemoryRepository, MatchResult, MatchState, Progress, RosterEntry, TournamentService, Weapon,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::error::Error;

#[derive(Serialize)]
struct Report {
    competition: String,
    standings: Vec<fencing_tournament::Standing>,
    awarded: Vec<(String, u32)>,
    ranking: Vec<fencing_tournament::RankingEntry>,
}

fn synthetic_roster(fencers: usize, referees: usize, rng: &mut StdRng) -> Vec<RosterEntry> {
    let today = Local::now().date_naive();
    (0..fencers + referees)
        .map(|i| {
            let age = rng.gen_range(21..=35);
            let birth_date = NaiveDate::from_ymd_opt(today.year() - age, 1, 1).unwrap_or(today);
            RosterEntry {
                license: format!("{:06}", 100_000 + i),
                first_name: format!("Fencer{i}"),
                last_name: "Sim".to_string(),
                birth_date,
                gender: Gender::Female,
                club: format!("Club {}", i % 7),
                referee: i >= fencers,
            }
        })
        .collect()
}

/// Random but valid score: the winner reaches the target, the loser stays below it.
fn random_result(
    phase_id: u32,
    match_id: u32,
    pair: [&String; 2],
    referee: &str,
    target: u32,
    rng: &mut StdRng,
) -> MatchResult {
    let (winner, loser) = if rng.gen_bool(0.5) {
        (pair[0], pair[1])
    } else {
        (pair[1], pair[0])
    };
    MatchResult {
        phase_id,
        match_id,
        winner: winner.clone(),
        winner_touches: target,
        loser: loser.clone(),
        loser_touches: rng.gen_range(0..target),
        referee: referee.to_string(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let fencers: usize = env_or("SIM_FENCERS", 23);
    let referees: usize = env_or("SIM_REFEREES", 5);
    let seed: u64 = env_or("SIM_SEED", 42);
    let coefficient: u32 = env_or("SIM_COEFFICIENT", 100);
    let mut rng = StdRng::seed_from_u64(seed);

    let service = TournamentService::new(InMemoryRepository::new(), EngineConfig::from_env());
    let competition = Competition::new(
        "Simulated Open",
        Weapon::Epee,
        Category::Senior,
        Gender::Female,
        Local::now().date_naive(),
        coefficient,
        CompetitionKind::Individual,
    );
    let id = service.create_competition(competition)?;
    let roster = synthetic_roster(fencers, referees, &mut rng);
    service.register_roster(id, &roster)?;
    service.build_pools(id)?;

    loop {
        let competition = service.get_competition(id)?;
        match competition.state {
            CompetitionState::PoolsComplete => {
                service.start_elimination(id)?;
                continue;
            }
            CompetitionState::ReadyToClose => break,
            CompetitionState::Pools | CompetitionState::Elimination => {}
            state => return Err(format!("unexpected state {state:?}").into()),
        }
        let pending: Vec<MatchResult> = competition
            .phases
            .iter()
            .flat_map(|phase| {
                phase
                    .matches
                    .iter()
                    .filter(|m| m.state != MatchState::Completed)
                    .map(move |m| (phase.id, phase.touch_target, m))
            })
            .map(|(phase_id, target, m)| {
                let referee = m.referee.clone().unwrap_or_default();
                random_result(phase_id, m.id, m.competitors(), &referee, target, &mut rng)
            })
            .collect();
        for result in &pending {
            if service.submit_result(id, result)? == Progress::ReadyToClose {
                break;
            }
        }
    }

    let awarded = service.close(id)?;
    let report = Report {
        competition: service.get_competition(id)?.name,
        standings: service.get_classification(id)?,
        awarded,
        ranking: service.ranking_rows(Weapon::Epee, Category::Senior)?,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
