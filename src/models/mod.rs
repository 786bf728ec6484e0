//! Data structures for a fencing competition: competitors, phases, matches, rankings.

mod category;
mod competition;
mod competitor;
mod matches;
mod phase;
mod ranking;

pub use category::{Category, Weapon};
pub use competition::{
    Competition, CompetitionId, CompetitionKind, CompetitionState, Registration, Role,
};
pub use competitor::{Competitor, Gender, LicenseId};
pub use matches::{Match, MatchId, MatchState, Outcome, Participation};
pub use phase::{Phase, PhaseId, PhaseKind};
pub use ranking::{RankingEntry, RankingTable};
