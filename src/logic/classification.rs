//! Classification: win/touch statistics and standings order.

use crate::models::{Competition, LicenseId, Outcome, Phase};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Standings row for one competitor.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub license: LicenseId,
    pub wins: u32,
    pub matches: u32,
    pub touches: u32,
    /// Final rank once eliminated (or once the final is decided).
    pub rank: Option<u32>,
}

impl Standing {
    fn new(license: LicenseId) -> Self {
        Self {
            license,
            ..Self::default()
        }
    }

    pub fn win_ratio(&self) -> f64 {
        if self.matches == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.matches)
        }
    }

    /// Better first: higher win ratio, then more touches. Ratios compare exactly.
    fn cmp_performance(&self, other: &Self) -> Ordering {
        let mine = u64::from(self.wins) * u64::from(other.matches.max(1));
        let theirs = u64::from(other.wins) * u64::from(self.matches.max(1));
        theirs
            .cmp(&mine)
            .then_with(|| other.touches.cmp(&self.touches))
            .then_with(|| self.license.cmp(&other.license))
    }
}

/// Aggregate completed matches of `phases` into ordered standings.
///
/// Everyone in `roster` gets a row even without a completed match; competitors found in the
/// phases but not in the roster are appended.
pub fn classify<'a>(
    phases: impl IntoIterator<Item = &'a Phase>,
    roster: &[LicenseId],
) -> Vec<Standing> {
    let mut order: Vec<LicenseId> = roster.to_vec();
    let mut stats: HashMap<LicenseId, Standing> = roster
        .iter()
        .map(|l| (l.clone(), Standing::new(l.clone())))
        .collect();

    for phase in phases {
        for m in &phase.matches {
            for p in &m.participations {
                let row = stats.entry(p.competitor.clone()).or_insert_with(|| {
                    order.push(p.competitor.clone());
                    Standing::new(p.competitor.clone())
                });
                if !m.is_completed() {
                    continue;
                }
                row.matches += 1;
                row.touches += p.touches;
                if p.outcome == Outcome::Winner {
                    row.wins += 1;
                }
            }
        }
    }

    let mut rows: Vec<Standing> = order
        .into_iter()
        .filter_map(|l| stats.remove(&l))
        .collect();
    rows.sort_by(Standing::cmp_performance);
    rows
}

/// Whole-competition standings. Entrants still in contention come first (by performance),
/// then eliminated ones by their assigned rank.
pub fn classify_competition(competition: &Competition) -> Vec<Standing> {
    let roster = competition.ranked_entrants();
    let mut rows = classify(&competition.phases, &roster);
    for row in &mut rows {
        row.rank = competition
            .registration(&row.license)
            .and_then(|r| r.final_rank);
    }
    rows.sort_by(|a, b| match (a.rank, b.rank) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.license.cmp(&b.license)),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp_performance(b),
    });
    rows
}
