//! Collaborator-facing facade: loads competitions from a repository, runs the engine under a
//! per-competition lock and persists the result only when the operation succeeds.

use crate::config::EngineConfig;
use crate::error::{CompetitionError, Result};
use crate::logic::{self, MatchResult, Progress, Standing};
use crate::models::{
    Category, Competition, CompetitionId, Competitor, Gender, LicenseId, MatchId, Phase,
    PhaseId, RankingEntry, Weapon,
};
use crate::repository::Repository;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One line of the roster feed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub license: LicenseId,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub club: String,
    #[serde(default)]
    pub referee: bool,
}

impl RosterEntry {
    pub fn to_competitor(&self) -> Competitor {
        Competitor::new(
            self.license.clone(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.birth_date,
            self.gender,
            self.club.clone(),
        )
    }
}

/// Outcome of a roster ingestion. Refusals are reported here, not as errors.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RosterReport {
    pub fencers: Vec<LicenseId>,
    pub referees: Vec<LicenseId>,
    pub rejected: Vec<LicenseId>,
}

pub struct TournamentService<R: Repository> {
    repo: R,
    config: EngineConfig,
    locks: Mutex<HashMap<CompetitionId, Arc<Mutex<()>>>>,
    /// Held while a closure merges points into a shared ranking table.
    ranking_lock: Mutex<()>,
}

fn lock_error<T>(_: T) -> CompetitionError {
    CompetitionError::Storage("lock error".to_string())
}

impl<R: Repository> TournamentService<R> {
    pub fn new(repo: R, config: EngineConfig) -> Self {
        Self {
            repo,
            config,
            locks: Mutex::new(HashMap::new()),
            ranking_lock: Mutex::new(()),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn competition_lock(&self, id: CompetitionId) -> Result<Arc<Mutex<()>>> {
        let mut locks = self.locks.lock().map_err(lock_error)?;
        Ok(locks.entry(id).or_default().clone())
    }

    /// Run `f` on the competition under its lock; save only if `f` succeeds.
    fn mutate<T>(
        &self,
        id: CompetitionId,
        f: impl FnOnce(&mut Competition) -> Result<T>,
    ) -> Result<T> {
        let lock = self.competition_lock(id)?;
        let _guard = lock.lock().map_err(lock_error)?;
        let mut competition = self.repo.load_competition(id)?;
        let out = f(&mut competition)?;
        self.repo.save_competition(&competition)?;
        Ok(out)
    }

    pub fn create_competition(&self, competition: Competition) -> Result<CompetitionId> {
        competition.ensure_open()?;
        self.repo.save_competition(&competition)?;
        log::info!("Created competition {} ({})", competition.name, competition.id);
        Ok(competition.id)
    }

    /// Whether the stored competitor may register, judged today.
    pub fn can_register(&self, id: CompetitionId, license: &str) -> Result<bool> {
        let competitor = self.repo.load_competitor(license)?;
        let competition = self.repo.load_competition(id)?;
        Ok(logic::can_register(&competitor, &competition))
    }

    /// Store roster competitors and register them as fencers or referees.
    pub fn register_roster(
        &self,
        id: CompetitionId,
        roster: &[RosterEntry],
    ) -> Result<RosterReport> {
        let today = Local::now().date_naive();
        self.mutate(id, |competition| {
            let mut report = RosterReport::default();
            for entry in roster {
                let competitor = entry.to_competitor();
                self.repo.save_competitor(&competitor)?;
                let registered = if entry.referee {
                    logic::register_referee(competition, &competitor)
                } else {
                    logic::register_fencer(competition, &competitor, today)
                };
                match registered {
                    Ok(()) if entry.referee => report.referees.push(competitor.license),
                    Ok(()) => report.fencers.push(competitor.license),
                    Err(CompetitionError::NotEligible(l))
                    | Err(CompetitionError::AlreadyRegistered(l)) => report.rejected.push(l),
                    Err(e) => return Err(e),
                }
            }
            log::info!(
                "{}: roster ingested ({} fencers, {} referees, {} rejected)",
                competition.name,
                report.fencers.len(),
                report.referees.len(),
                report.rejected.len()
            );
            Ok(report)
        })
    }

    pub fn register_fencer(&self, id: CompetitionId, license: &str) -> Result<()> {
        let competitor = self.repo.load_competitor(license)?;
        let today = Local::now().date_naive();
        self.mutate(id, |c| logic::register_fencer(c, &competitor, today))
    }

    pub fn register_referee(&self, id: CompetitionId, license: &str) -> Result<()> {
        let competitor = self.repo.load_competitor(license)?;
        self.mutate(id, |c| logic::register_referee(c, &competitor))
    }

    pub fn register_team_member(
        &self,
        id: CompetitionId,
        license: &str,
        group: u32,
        leader: bool,
    ) -> Result<()> {
        let competitor = self.repo.load_competitor(license)?;
        let today = Local::now().date_naive();
        self.mutate(id, |c| {
            logic::register_team_member(c, &competitor, group, leader, today)
        })
    }

    pub fn withdraw(&self, id: CompetitionId, license: &str) -> Result<()> {
        self.mutate(id, |c| logic::withdraw(c, license))
    }

    /// Draw pools, using the competition's national ranking as draw order.
    pub fn build_pools(&self, id: CompetitionId) -> Result<Vec<PhaseId>> {
        self.mutate(id, |c| {
            let ranking = self.repo.load_ranking(c.weapon, c.category)?;
            logic::create_pool_phases(c, &ranking, &self.config)
        })
    }

    pub fn start_elimination(&self, id: CompetitionId) -> Result<Progress> {
        self.mutate(id, |c| logic::start_elimination(c, &self.config))
    }

    pub fn start_team_bracket(&self, id: CompetitionId) -> Result<Progress> {
        self.mutate(id, |c| {
            let rankings = self.repo.load_weapon_rankings(c.weapon)?;
            logic::start_team_bracket(c, &rankings, &self.config)
        })
    }

    pub fn start_match(
        &self,
        id: CompetitionId,
        phase_id: PhaseId,
        match_id: MatchId,
    ) -> Result<()> {
        self.mutate(id, |c| logic::start_match(c, phase_id, match_id))
    }

    pub fn submit_result(&self, id: CompetitionId, result: &MatchResult) -> Result<Progress> {
        self.mutate(id, |c| logic::validate_result(c, result, &self.config))
    }

    pub fn check_progress(&self, id: CompetitionId) -> Result<Progress> {
        self.mutate(id, |c| logic::check_progress(c, &self.config))
    }

    /// Close the competition and merge its points into the national ranking.
    ///
    /// The competition's lock entry is released once it is closed.
    pub fn close(&self, id: CompetitionId) -> Result<Vec<(LicenseId, u32)>> {
        let _ranking_guard = self.ranking_lock.lock().map_err(lock_error)?;
        let closed = self.mutate(id, |c| {
            let mut ranking = self.repo.load_ranking(c.weapon, c.category)?;
            let awarded = logic::close(c, &mut ranking)?;
            self.repo.save_ranking(&ranking)?;
            Ok(awarded)
        });
        if matches!(closed, Ok(_) | Err(CompetitionError::AlreadyClosed)) {
            self.locks.lock().map_err(lock_error)?.remove(&id);
        }
        closed
    }

    pub fn get_competition(&self, id: CompetitionId) -> Result<Competition> {
        self.repo.load_competition(id)
    }

    pub fn get_pools(&self, id: CompetitionId) -> Result<Vec<Phase>> {
        let competition = self.repo.load_competition(id)?;
        Ok(competition.pool_phases().cloned().collect())
    }

    pub fn get_bracket_phases(&self, id: CompetitionId) -> Result<Vec<Phase>> {
        let competition = self.repo.load_competition(id)?;
        Ok(competition.bracket_phases().cloned().collect())
    }

    pub fn get_classification(&self, id: CompetitionId) -> Result<Vec<Standing>> {
        let competition = self.repo.load_competition(id)?;
        Ok(logic::classify_competition(&competition))
    }

    pub fn ranking_rows(&self, weapon: Weapon, category: Category) -> Result<Vec<RankingEntry>> {
        Ok(self.repo.load_ranking(weapon, category)?.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompetitionKind, CompetitionState, Registration, Role};
    use crate::repository::InMemoryRepository;

    fn ready_to_close() -> Competition {
        let mut c = Competition::new(
            "Solo Open",
            Weapon::Sabre,
            Category::Senior,
            Gender::Male,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            50,
            CompetitionKind::Individual,
        );
        let mut r = Registration::new("L1".to_string(), Role::Fencer);
        r.final_rank = Some(1);
        c.registrations.push(r);
        c.state = CompetitionState::ReadyToClose;
        c
    }

    #[test]
    fn close_releases_competition_lock() {
        let service = TournamentService::new(InMemoryRepository::new(), EngineConfig::default());
        let id = service.create_competition(ready_to_close()).unwrap();
        service.check_progress(id).unwrap();
        assert!(service.locks.lock().unwrap().contains_key(&id));

        assert_eq!(service.close(id).unwrap(), vec![("L1".to_string(), 50)]);
        assert!(service.locks.lock().unwrap().is_empty());

        assert_eq!(service.close(id), Err(CompetitionError::AlreadyClosed));
        assert!(service.locks.lock().unwrap().is_empty());
    }
}
