//! Fencing tournament engine: registration, pools, elimination bracket and national ranking.

pub mod config;
pub mod error;
pub mod logic;
pub mod models;
pub mod repository;
pub mod service;

pub use config::EngineConfig;
pub use error::{CompetitionError, Result};
pub use logic::{
    advance, best_weapon_points, can_register, can_register_on, check_progress, classify,
    classify_competition, close, create_pool_phases, points_table, register_fencer,
    register_referee, register_team_member, schedule_round_robin, start_elimination,
    start_match, start_team_bracket, team_seeding, validate_result, withdraw, MatchResult,
    Progress, Standing, Team,
};
pub use models::{
    Category, Competition, CompetitionId, CompetitionKind, CompetitionState, Competitor, Gender,
    LicenseId, Match, MatchId, MatchState, Outcome, Participation, Phase, PhaseId, PhaseKind,
    RankingEntry, RankingTable, Registration, Role, Weapon,
};
pub use repository::{InMemoryRepository, Repository};
pub use service::{RosterEntry, RosterReport, TournamentService};
