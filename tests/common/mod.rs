//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use chrono::NaiveDate;
use fencing_tournament::{
    validate_result, Category, Competition, CompetitionKind, Competitor, EngineConfig, Gender,
    MatchResult, MatchState, Progress, Registration, Role, Weapon,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// License ids sort in seeding order: L01 is the strongest.
pub fn license(i: usize) -> String {
    format!("L{i:02}")
}

pub fn referee(i: usize) -> String {
    format!("R{i:02}")
}

pub fn competition(kind: CompetitionKind) -> Competition {
    Competition::new(
        "Test Open",
        Weapon::Foil,
        Category::Senior,
        Gender::Male,
        date(2024, 5, 1),
        100,
        kind,
    )
}

pub fn competitor(license: &str, birth: NaiveDate, gender: Gender) -> Competitor {
    Competitor::new(license, "First", "Last", birth, gender, "CEB")
}

/// Individual competition with fencers L01..Ln and referees R01..Rr, registered directly.
pub fn with_entrants(fencers: usize, referees: usize) -> Competition {
    let mut c = competition(CompetitionKind::Individual);
    for i in 1..=fencers {
        c.registrations.push(Registration::new(license(i), Role::Fencer));
    }
    for i in 1..=referees {
        c.registrations.push(Registration::new(referee(i), Role::Referee));
    }
    c
}

/// Fence every match pending right now; the lower license always wins `target`-1.
pub fn play_pending(c: &mut Competition, config: &EngineConfig) -> Progress {
    let pending: Vec<MatchResult> = c
        .phases
        .iter()
        .flat_map(|p| {
            p.matches
                .iter()
                .filter(|m| m.state != MatchState::Completed)
                .map(move |m| {
                    let [a, b] = m.competitors();
                    let (winner, loser) = if a < b { (a, b) } else { (b, a) };
                    MatchResult {
                        phase_id: p.id,
                        match_id: m.id,
                        winner: winner.clone(),
                        winner_touches: p.touch_target,
                        loser: loser.clone(),
                        loser_touches: 1,
                        referee: m.referee.clone().unwrap_or_default(),
                    }
                })
        })
        .collect();
    let mut progress = Progress::Pending;
    for r in &pending {
        progress = validate_result(c, r, config).unwrap();
    }
    progress
}

/// Play until nothing is pending any more (pools, or the whole bracket).
pub fn play_until_settled(c: &mut Competition, config: &EngineConfig) -> Progress {
    loop {
        match play_pending(c, config) {
            Progress::Advanced(_) => continue,
            other => return other,
        }
    }
}
