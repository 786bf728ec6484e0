//! National ranking table per (weapon, category).

use crate::models::category::{Category, Weapon};
use crate::models::competitor::LicenseId;
use serde::{Deserialize, Serialize};

/// One ranking row: accumulated points and position.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub license: LicenseId,
    pub weapon: Weapon,
    pub category: Category,
    pub points: u32,
    pub rank: u32,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RankingTable {
    pub weapon: Weapon,
    pub category: Category,
    /// Kept sorted by rank after `recompute_ranks`.
    pub entries: Vec<RankingEntry>,
}

impl RankingTable {
    pub fn new(weapon: Weapon, category: Category) -> Self {
        Self {
            weapon,
            category,
            entries: Vec::new(),
        }
    }

    pub fn entry(&self, license: &str) -> Option<&RankingEntry> {
        self.entries.iter().find(|e| e.license == license)
    }

    pub fn points_of(&self, license: &str) -> u32 {
        self.entry(license).map_or(0, |e| e.points)
    }

    /// Add points to a competitor's entry, creating it (unranked) if missing.
    pub fn add_points(&mut self, license: &str, points: u32) {
        match self.entries.iter_mut().find(|e| e.license == license) {
            Some(e) => e.points += points,
            None => self.entries.push(RankingEntry {
                license: license.to_string(),
                weapon: self.weapon,
                category: self.category,
                points,
                rank: 0,
            }),
        }
    }

    /// Sort by points (descending, license breaks ties) and renumber from 1.
    pub fn recompute_ranks(&mut self) {
        self.entries
            .sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.license.cmp(&b.license)));
        for (i, e) in self.entries.iter_mut().enumerate() {
            e.rank = i as u32 + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recompute_orders_by_points() {
        let mut t = RankingTable::new(Weapon::Epee, Category::Senior);
        t.add_points("B", 10);
        t.add_points("A", 30);
        t.add_points("C", 10);
        t.add_points("B", 5);
        t.recompute_ranks();
        let order: Vec<_> = t.entries.iter().map(|e| (e.license.as_str(), e.rank)).collect();
        assert_eq!(order, vec![("A", 1), ("B", 2), ("C", 3)]);
    }
}
