//! Persistence boundary. The engine never does I/O; the service loads and saves through this.

use crate::error::{CompetitionError, Result};
use crate::models::{
    Category, Competition, CompetitionId, Competitor, LicenseId, RankingTable, Weapon,
};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub trait Repository: Send + Sync {
    fn load_competition(&self, id: CompetitionId) -> Result<Competition>;
    /// Persist the whole aggregate (phases, matches, registrations) as one unit.
    fn save_competition(&self, competition: &Competition) -> Result<()>;
    fn load_competitor(&self, license: &str) -> Result<Competitor>;
    fn save_competitor(&self, competitor: &Competitor) -> Result<()>;
    /// Ranking for (weapon, category); empty table if none exists yet.
    fn load_ranking(&self, weapon: Weapon, category: Category) -> Result<RankingTable>;
    /// Every category ranking of `weapon`.
    fn load_weapon_rankings(&self, weapon: Weapon) -> Result<Vec<RankingTable>>;
    fn save_ranking(&self, table: &RankingTable) -> Result<()>;
}

/// In-memory store, for tests and the simulator.
#[derive(Default)]
pub struct InMemoryRepository {
    competitions: RwLock<HashMap<CompetitionId, Competition>>,
    competitors: RwLock<HashMap<LicenseId, Competitor>>,
    rankings: RwLock<HashMap<(Weapon, Category), RankingTable>>,
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| CompetitionError::Storage("lock error".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| CompetitionError::Storage("lock error".to_string()))
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repository for InMemoryRepository {
    fn load_competition(&self, id: CompetitionId) -> Result<Competition> {
        read(&self.competitions)?
            .get(&id)
            .cloned()
            .ok_or(CompetitionError::CompetitionNotFound(id))
    }

    fn save_competition(&self, competition: &Competition) -> Result<()> {
        write(&self.competitions)?.insert(competition.id, competition.clone());
        Ok(())
    }

    fn load_competitor(&self, license: &str) -> Result<Competitor> {
        read(&self.competitors)?
            .get(license)
            .cloned()
            .ok_or_else(|| CompetitionError::CompetitorNotFound(license.to_string()))
    }

    fn save_competitor(&self, competitor: &Competitor) -> Result<()> {
        write(&self.competitors)?.insert(competitor.license.clone(), competitor.clone());
        Ok(())
    }

    fn load_ranking(&self, weapon: Weapon, category: Category) -> Result<RankingTable> {
        Ok(read(&self.rankings)?
            .get(&(weapon, category))
            .cloned()
            .unwrap_or_else(|| RankingTable::new(weapon, category)))
    }

    fn load_weapon_rankings(&self, weapon: Weapon) -> Result<Vec<RankingTable>> {
        let mut tables: Vec<RankingTable> = read(&self.rankings)?
            .values()
            .filter(|t| t.weapon == weapon)
            .cloned()
            .collect();
        tables.sort_by_key(|t| t.category);
        Ok(tables)
    }

    fn save_ranking(&self, table: &RankingTable) -> Result<()> {
        write(&self.rankings)?.insert((table.weapon, table.category), table.clone());
        Ok(())
    }
}
