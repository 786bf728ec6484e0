//! Tournament progression engine: registration, pools, bracket, results, ranking.

mod bracket;
mod classification;
mod closure;
mod pools;
mod registration;
mod results;
mod teams;

pub use bracket::{
    advance, bracket_positions, first_round_pairings, lower_power_of_two, merge_barrage_winners,
    next_round_pairings, split_barrage, start_elimination,
};
pub use classification::{classify, classify_competition, Standing};
pub use closure::{close, points_table};
pub use pools::{
    build_pools, create_pool_phases, pool_count, schedule_round_robin, schedule_rounds,
    snake_sequence,
};
pub use registration::{
    can_register, can_register_on, register_fencer, register_referee, register_team_member,
    withdraw,
};
pub use results::{check_progress, start_match, validate_result, MatchResult, Progress};
pub use teams::{best_weapon_points, start_team_bracket, team_seeding, Team};
