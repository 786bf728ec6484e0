//! Phase (pool, barrage or elimination round) and its matches.

use crate::models::competition::{CompetitionId, CompetitionKind};
use crate::models::competitor::LicenseId;
use crate::models::matches::{Match, MatchId};
use serde::{Deserialize, Serialize};

/// Position of a phase inside its competition (1-based, creation order).
pub type PhaseId = u32;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum PhaseKind {
    Pool,
    /// Play-in round bringing the field down to a power of two.
    Barrage,
    /// Elimination round with `field` competitors (2 is the final).
    Elimination { field: u32 },
}

impl PhaseKind {
    pub fn is_pool(self) -> bool {
        self == PhaseKind::Pool
    }

    pub fn is_final(self) -> bool {
        self == PhaseKind::Elimination { field: 2 }
    }

    /// Federation display name. Team events get an " E" suffix.
    pub fn label(self, kind: CompetitionKind) -> String {
        let base = match self {
            PhaseKind::Pool => "Poule".to_string(),
            PhaseKind::Barrage => "Barrages".to_string(),
            PhaseKind::Elimination { field: 2 } => "Finale".to_string(),
            PhaseKind::Elimination { field: 4 } => "Demi-finales".to_string(),
            PhaseKind::Elimination { field: 8 } => "Quarts de finale".to_string(),
            PhaseKind::Elimination { field } => format!("{}èmes de finale", field / 2),
        };
        match kind {
            CompetitionKind::Individual => base,
            CompetitionKind::Team => format!("{base} E"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub id: PhaseId,
    pub competition_id: CompetitionId,
    pub kind: PhaseKind,
    /// Victory threshold shared by every match of the phase.
    pub touch_target: u32,
    pub matches: Vec<Match>,
}

impl Phase {
    pub fn new(
        id: PhaseId,
        competition_id: CompetitionId,
        kind: PhaseKind,
        touch_target: u32,
    ) -> Self {
        Self {
            id,
            competition_id,
            kind,
            touch_target,
            matches: Vec::new(),
        }
    }

    /// Append a match for `first` vs `second`; its id is the next position in the phase.
    pub fn push_match(
        &mut self,
        referee: Option<LicenseId>,
        track: u32,
        first: LicenseId,
        second: LicenseId,
    ) -> MatchId {
        let id = self.matches.len() as MatchId + 1;
        self.matches
            .push(Match::new(id, self.id, referee, track, first, second));
        id
    }

    /// All matches completed (a phase is never created empty).
    pub fn is_done(&self) -> bool {
        !self.matches.is_empty() && self.matches.iter().all(Match::is_completed)
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// Competitors in order of first appearance.
    pub fn competitors(&self) -> Vec<LicenseId> {
        let mut seen: Vec<LicenseId> = Vec::new();
        for m in &self.matches {
            for c in m.competitors() {
                if !seen.contains(c) {
                    seen.push(c.clone());
                }
            }
        }
        seen
    }

    /// Winners ordered by match id.
    pub fn winners(&self) -> Vec<LicenseId> {
        let mut by_id: Vec<&Match> = self.matches.iter().collect();
        by_id.sort_by_key(|m| m.id);
        by_id.into_iter().filter_map(|m| m.winner().cloned()).collect()
    }

    pub fn losers(&self) -> Vec<LicenseId> {
        self.matches.iter().filter_map(|m| m.loser().cloned()).collect()
    }
}
