//! Match and Participation: one bout between two competitors.

use crate::models::competitor::LicenseId;
use crate::models::phase::PhaseId;
use serde::{Deserialize, Serialize};

/// Position of a match inside its phase (1-based). Bracket rounds rely on this order.
pub type MatchId = u32;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    #[default]
    Upcoming,
    InProgress,
    /// Terminal.
    Completed,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    Pending,
    Winner,
    Loser,
}

/// One competitor's side of a match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participation {
    pub competitor: LicenseId,
    pub touches: u32,
    pub outcome: Outcome,
}

impl Participation {
    pub fn new(competitor: LicenseId) -> Self {
        Self {
            competitor,
            touches: 0,
            outcome: Outcome::Pending,
        }
    }
}

/// A match always carries exactly two participations.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub phase_id: PhaseId,
    /// Scheduled referee; replaced by the officiating one on validation.
    pub referee: Option<LicenseId>,
    /// Track (strip) number.
    pub track: u32,
    pub state: MatchState,
    pub participations: [Participation; 2],
}

impl Match {
    pub fn new(
        id: MatchId,
        phase_id: PhaseId,
        referee: Option<LicenseId>,
        track: u32,
        first: LicenseId,
        second: LicenseId,
    ) -> Self {
        Self {
            id,
            phase_id,
            referee,
            track,
            state: MatchState::Upcoming,
            participations: [Participation::new(first), Participation::new(second)],
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state == MatchState::Completed
    }

    pub fn competitors(&self) -> [&LicenseId; 2] {
        [
            &self.participations[0].competitor,
            &self.participations[1].competitor,
        ]
    }

    fn with_outcome(&self, outcome: Outcome) -> Option<&LicenseId> {
        self.participations
            .iter()
            .find(|p| p.outcome == outcome)
            .map(|p| &p.competitor)
    }

    /// Winner tag, only once the match is completed.
    pub fn winner(&self) -> Option<&LicenseId> {
        if !self.is_completed() {
            return None;
        }
        self.with_outcome(Outcome::Winner)
    }

    /// Loser tag, or the side facing the winner when the result named a stranger as loser.
    pub fn loser(&self) -> Option<&LicenseId> {
        if !self.is_completed() {
            return None;
        }
        self.with_outcome(Outcome::Loser).or_else(|| {
            let winner = self.with_outcome(Outcome::Winner)?;
            self.participations
                .iter()
                .map(|p| &p.competitor)
                .find(|c| *c != winner)
        })
    }
}
