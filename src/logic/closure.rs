//! Competition closure: ranking points distribution and national ranking merge.

use crate::error::{CompetitionError, Result};
use crate::models::{Competition, CompetitionState, LicenseId, RankingTable};

/// Float slack so exact integer values are not pushed up by rounding noise.
const CEIL_EPSILON: f64 = 1e-9;

/// Points for ranks `1..=participants`: `ceil(c − c·ln(rank)/ln(participants))`.
///
/// Rank 1 scores the full coefficient and the last rank scores 0. A single participant
/// takes the full coefficient.
pub fn points_table(coefficient: u32, participants: usize) -> Vec<u32> {
    if participants == 0 {
        return Vec::new();
    }
    if participants == 1 {
        return vec![coefficient];
    }
    let c = f64::from(coefficient);
    let ln_n = (participants as f64).ln();
    (1..=participants)
        .map(|rank| {
            let points = c - c * ((rank as f64).ln() / ln_n);
            (points - CEIL_EPSILON).ceil().max(0.0) as u32
        })
        .collect()
}

/// Close a finished competition: award points by final rank, merge them into `ranking` and
/// re-rank it. Refused (without touching `ranking`) if already closed.
///
/// Returns the points awarded per entrant, in rank order.
pub fn close(
    competition: &mut Competition,
    ranking: &mut RankingTable,
) -> Result<Vec<(LicenseId, u32)>> {
    if competition.is_closed() {
        log::warn!("{}: close requested twice", competition.name);
        return Err(CompetitionError::AlreadyClosed);
    }
    competition.ensure_state(CompetitionState::ReadyToClose, "close")?;
    if ranking.weapon != competition.weapon || ranking.category != competition.category {
        return Err(CompetitionError::RankingMismatch);
    }

    let mut ranked: Vec<(u32, LicenseId)> = competition
        .ranked_entrants()
        .into_iter()
        .filter_map(|l| {
            let rank = competition.registration(&l)?.final_rank?;
            Some((rank, l))
        })
        .collect();
    ranked.sort();

    let table = points_table(competition.coefficient, ranked.len());
    let mut awarded = Vec::with_capacity(ranked.len());
    for (rank, license) in ranked {
        let idx = (rank as usize).clamp(1, table.len()) - 1;
        let points = table[idx];
        ranking.add_points(&license, points);
        if let Some(r) = competition.registration_mut(&license) {
            r.final_points = Some(points);
        }
        awarded.push((license, points));
    }
    ranking.recompute_ranks();

    competition.state = CompetitionState::Closed;
    log::info!(
        "{}: closed, {} entrants awarded ranking points",
        competition.name,
        awarded.len()
    );
    Ok(awarded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_participants_coefficient_100() {
        assert_eq!(points_table(100, 8), vec![100, 67, 48, 34, 23, 14, 7, 0]);
    }

    #[test]
    fn degenerate_sizes() {
        assert!(points_table(50, 0).is_empty());
        assert_eq!(points_table(50, 1), vec![50]);
        assert_eq!(points_table(50, 2), vec![50, 0]);
    }
}
